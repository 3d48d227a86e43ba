use std::collections::BTreeMap;
use std::time::Duration;

use projectile_shared::config::{Launcher, SimulationConfig, Speed};
use projectile_shared::result::BatchResult;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::error::{SimError, SimResult};
use crate::generator::SampleGenerator;
use crate::histogram::{build_histogram, Histogram};
use crate::timer::{TimerHandle, TimerSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    SingleShotPending,
    ContinuousRunning,
}

#[derive(Debug, Clone)]
pub struct LaunchReport {
    pub launcher_id: u32,
    pub launcher_name: String,
    pub sample_size: usize,
    pub batch: BatchResult,
    pub mean: f64,
    /// Entries in the bucket after this launch was recorded.
    pub recorded: usize,
}

/// What a press of the combined Launch/Stop control did.
#[derive(Debug, Clone)]
pub enum Triggered {
    Launched(LaunchReport),
    Started(TimerHandle),
    Stopped,
}

/// Accumulated batch means per sample size plus the current selections.
///
/// Driven from a single event loop: user actions call the setters and
/// `launch_once`/`start`/`stop`, and the loop feeds wall-clock progress to
/// [`Session::advance`], which fires every interval that came due.
#[derive(Debug)]
pub struct Session {
    config: SimulationConfig,
    history: BTreeMap<usize, Vec<f64>>,
    launcher: Launcher,
    generator: SampleGenerator,
    sample_size: usize,
    bin_width: f64,
    continuous: bool,
    speed: Speed,
    status: RunStatus,
    timer: TimerSlot,
    rng: Pcg64,
}

fn check_bin_width(bin_width: f64) -> SimResult<f64> {
    if !bin_width.is_finite() || bin_width <= 0.0 {
        return Err(SimError::InvalidBinWidth(bin_width));
    }
    Ok(bin_width)
}

impl Session {
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        let launcher = config.launchers.first().cloned().ok_or(SimError::EmptyRoster)?;
        let generator =
            SampleGenerator::new(&launcher, config.launch_angle_deg, config.gravity)?;
        if config.sample_sizes.contains(&0) {
            return Err(SimError::InvalidSampleSize);
        }
        let sample_size = *config.sample_sizes.first().ok_or(SimError::InvalidSampleSize)?;
        let bin_width = check_bin_width(config.default_bin_width)?;
        let history = config.sample_sizes.iter().map(|&n| (n, Vec::new())).collect();

        Ok(Self {
            history,
            launcher,
            generator,
            sample_size,
            bin_width,
            continuous: false,
            speed: config.speed,
            status: RunStatus::Idle,
            timer: TimerSlot::default(),
            rng: Pcg64::seed_from_u64(config.seed),
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    pub fn continuous_mode(&self) -> bool {
        self.continuous
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer.active()
    }

    pub fn time_to_next_launch(&self) -> Option<Duration> {
        self.timer.remaining()
    }

    /// Recorded batch means for `sample_size`; empty if none were recorded.
    pub fn history(&self, sample_size: usize) -> &[f64] {
        self.history.get(&sample_size).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn current_history(&self) -> &[f64] {
        self.history(self.sample_size)
    }

    pub fn sample_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.history.keys().copied()
    }

    pub fn select_launcher(&mut self, id: u32) -> SimResult<()> {
        let launcher = self
            .config
            .launcher(id)
            .cloned()
            .ok_or(SimError::UnknownLauncher(id))?;
        self.generator =
            SampleGenerator::new(&launcher, self.config.launch_angle_deg, self.config.gravity)?;
        self.launcher = launcher;
        self.restart_if_running();
        Ok(())
    }

    /// Sizes outside the configured set get a bucket on first use.
    pub fn select_sample_size(&mut self, sample_size: usize) -> SimResult<()> {
        if sample_size == 0 {
            return Err(SimError::InvalidSampleSize);
        }
        self.history.entry(sample_size).or_default();
        self.sample_size = sample_size;
        self.restart_if_running();
        Ok(())
    }

    pub fn set_bin_width(&mut self, bin_width: f64) -> SimResult<()> {
        self.bin_width = check_bin_width(bin_width)?;
        Ok(())
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
        self.restart_if_running();
    }

    /// Turning continuous mode off while running stops the timer.
    pub fn set_continuous_mode(&mut self, enabled: bool) {
        self.continuous = enabled;
        if !enabled {
            self.stop();
        } else {
            self.restart_if_running();
        }
    }

    /// Fires one batch and records its mean under the current sample size.
    pub fn launch_once(&mut self) -> SimResult<LaunchReport> {
        if self.status != RunStatus::Idle {
            return self.fire();
        }
        self.status = RunStatus::SingleShotPending;
        let report = self.fire();
        self.status = RunStatus::Idle;
        report
    }

    pub fn start(&mut self) -> SimResult<TimerHandle> {
        if !self.continuous {
            return Err(SimError::ContinuousModeOff);
        }
        if let Some(handle) = self.timer.active() {
            return Ok(handle);
        }
        let handle = self.timer.start(self.speed.interval());
        self.status = RunStatus::ContinuousRunning;
        log::info!(
            "continuous launches started: {} n={} every {:?}",
            self.launcher.name,
            self.sample_size,
            handle.interval
        );
        Ok(handle)
    }

    pub fn stop(&mut self) -> Option<TimerHandle> {
        let cancelled = self.timer.cancel();
        if let Some(handle) = cancelled {
            log::info!("continuous launches stopped (timer #{})", handle.generation);
        }
        self.status = RunStatus::Idle;
        cancelled
    }

    /// Single mode launches once; continuous mode toggles start/stop.
    pub fn trigger(&mut self) -> SimResult<Triggered> {
        if !self.continuous {
            return self.launch_once().map(Triggered::Launched);
        }
        if self.status == RunStatus::ContinuousRunning {
            self.stop();
            Ok(Triggered::Stopped)
        } else {
            self.start().map(Triggered::Started)
        }
    }

    /// Feeds elapsed time to the timer and performs every launch that came due.
    pub fn advance(&mut self, elapsed: Duration) -> SimResult<Vec<LaunchReport>> {
        if self.status != RunStatus::ContinuousRunning {
            return Ok(Vec::new());
        }
        let due = self.timer.advance(elapsed);
        (0..due).map(|_| self.fire()).collect()
    }

    /// Empties every bucket and returns to idle.
    pub fn reset(&mut self) {
        self.stop();
        for means in self.history.values_mut() {
            means.clear();
        }
        log::info!("session reset, all buckets cleared");
    }

    /// Empties the bucket of the selected sample size only and returns to idle.
    pub fn clear_current(&mut self) {
        self.stop();
        if let Some(means) = self.history.get_mut(&self.sample_size) {
            means.clear();
        }
        log::info!("cleared bucket n={}", self.sample_size);
    }

    pub fn histogram(&self) -> SimResult<Histogram> {
        self.histogram_for(self.sample_size)
    }

    pub fn histogram_for(&self, sample_size: usize) -> SimResult<Histogram> {
        build_histogram(self.history(sample_size), self.bin_width)
    }

    /// One histogram per bucket, smallest sample size first.
    pub fn comparison(&self) -> SimResult<Vec<(usize, Histogram)>> {
        self.history
            .iter()
            .map(|(&n, means)| Ok((n, build_histogram(means, self.bin_width)?)))
            .collect()
    }

    fn restart_if_running(&mut self) {
        if self.status != RunStatus::ContinuousRunning {
            return;
        }
        if let Some(handle) = self.timer.restart(self.speed.interval()) {
            log::info!(
                "timer restarted as #{}: {} n={} every {:?}",
                handle.generation,
                self.launcher.name,
                self.sample_size,
                handle.interval
            );
        }
    }

    fn fire(&mut self) -> SimResult<LaunchReport> {
        let batch = self.generator.generate(self.sample_size, &mut self.rng)?;
        let mean = batch.mean();
        let bucket = self.history.entry(self.sample_size).or_default();
        bucket.push(mean);
        let recorded = bucket.len();
        log::debug!(
            "{} fired n={} mean={:.3}m ({} recorded)",
            self.launcher.name,
            self.sample_size,
            mean,
            recorded
        );
        Ok(LaunchReport {
            launcher_id: self.launcher.id,
            launcher_name: self.launcher.name.clone(),
            sample_size: self.sample_size,
            batch,
            mean,
            recorded,
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SimulationConfig {
            seed: 42,
            ..SimulationConfig::default()
        })
        .unwrap()
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn starts_idle_with_empty_configured_buckets() {
        let s = session();
        assert_eq!(s.status(), RunStatus::Idle);
        assert_eq!(s.sample_sizes().collect::<Vec<_>>(), vec![2, 5, 15, 40]);
        assert!(s.sample_sizes().all(|n| s.history(n).is_empty()));
        assert_eq!(s.launcher().id, 1);
        assert_eq!(s.sample_size(), 2);
        assert_eq!(s.bin_width(), 0.2);
    }

    #[test]
    fn k_launches_give_k_entries() {
        let mut s = session();
        s.select_sample_size(5).unwrap();
        for k in 1..=7 {
            let report = s.launch_once().unwrap();
            assert_eq!(report.recorded, k);
            assert_eq!(report.batch.sample_size(), 5);
            assert_eq!(s.status(), RunStatus::Idle);
        }
        assert_eq!(s.history(5).len(), 7);
        assert!(s.history(2).is_empty());
    }

    #[test]
    fn clear_current_leaves_other_buckets() {
        let mut s = session();
        s.launch_once().unwrap();
        s.select_sample_size(15).unwrap();
        s.launch_once().unwrap();
        s.launch_once().unwrap();
        s.clear_current();
        assert!(s.history(15).is_empty());
        assert_eq!(s.history(2).len(), 1);
    }

    #[test]
    fn reset_clears_everything_and_stops() {
        let mut s = session();
        s.launch_once().unwrap();
        s.set_continuous_mode(true);
        s.start().unwrap();
        s.advance(ms(2500)).unwrap();
        s.reset();
        assert_eq!(s.status(), RunStatus::Idle);
        assert!(s.timer().is_none());
        assert!(s.sample_sizes().all(|n| s.history(n).is_empty()));
    }

    #[test]
    fn continuous_mode_fires_on_interval() {
        let mut s = session();
        assert_eq!(s.start().unwrap_err(), SimError::ContinuousModeOff);

        s.set_continuous_mode(true);
        s.set_speed(Speed::Fast);
        s.start().unwrap();
        assert_eq!(s.status(), RunStatus::ContinuousRunning);
        assert!(s.advance(ms(299)).unwrap().is_empty());
        assert_eq!(s.advance(ms(1)).unwrap().len(), 1);
        assert_eq!(s.advance(ms(900)).unwrap().len(), 3);
        assert_eq!(s.history(2).len(), 4);

        s.stop();
        assert!(s.advance(ms(5000)).unwrap().is_empty());
        assert_eq!(s.history(2).len(), 4);
    }

    #[test]
    fn switching_sample_size_mid_run_redirects_to_new_bucket() {
        let mut s = session();
        s.set_continuous_mode(true);
        let first = s.start().unwrap();
        s.advance(ms(1000)).unwrap();

        // 7 has no configured bucket.
        s.select_sample_size(7).unwrap();
        let second = s.timer().unwrap();
        assert_ne!(first.generation, second.generation);
        assert_eq!(s.status(), RunStatus::ContinuousRunning);
        let reports = s.advance(ms(1000)).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].sample_size, 7);
        assert_eq!(s.history(7).len(), 1);
        assert_eq!(s.history(2).len(), 1);
        assert!(s.histogram().unwrap().total() == 1);
    }

    #[test]
    fn parameter_changes_restart_timer_phase() {
        let mut s = session();
        s.set_continuous_mode(true);
        s.start().unwrap();
        s.advance(ms(900)).unwrap();
        s.select_launcher(3).unwrap();
        // The restarted timer waits a full interval again.
        assert!(s.advance(ms(200)).unwrap().is_empty());
        let reports = s.advance(ms(800)).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].launcher_id, 3);
    }

    #[test]
    fn speed_and_mode_changes_restart_timer_phase() {
        let mut s = session();
        s.set_continuous_mode(true);
        let first = s.start().unwrap();
        assert_eq!(first.interval, ms(1000));
        s.advance(ms(900)).unwrap();

        s.set_speed(Speed::Fast);
        let fast = s.timer().unwrap();
        assert_ne!(fast.generation, first.generation);
        assert_eq!(fast.interval, ms(300));
        assert_eq!(s.time_to_next_launch(), Some(ms(300)));
        assert!(s.advance(ms(299)).unwrap().is_empty());
        assert_eq!(s.advance(ms(1)).unwrap().len(), 1);

        s.advance(ms(200)).unwrap();
        s.set_continuous_mode(true);
        let again = s.timer().unwrap();
        assert_ne!(again.generation, fast.generation);
        assert_eq!(again.interval, ms(300));
        assert_eq!(s.status(), RunStatus::ContinuousRunning);
        assert!(s.advance(ms(299)).unwrap().is_empty());
        assert_eq!(s.advance(ms(1)).unwrap().len(), 1);
    }

    #[test]
    fn toggling_continuous_off_stops() {
        let mut s = session();
        s.set_continuous_mode(true);
        s.start().unwrap();
        s.set_continuous_mode(false);
        assert_eq!(s.status(), RunStatus::Idle);
        assert!(s.timer().is_none());
    }

    #[test]
    fn trigger_follows_mode() {
        let mut s = session();
        assert!(matches!(s.trigger().unwrap(), Triggered::Launched(_)));
        s.set_continuous_mode(true);
        assert!(matches!(s.trigger().unwrap(), Triggered::Started(_)));
        assert!(matches!(s.trigger().unwrap(), Triggered::Stopped));
        assert_eq!(s.status(), RunStatus::Idle);
    }

    #[test]
    fn rejects_bad_selections() {
        let mut s = session();
        assert_eq!(s.select_launcher(99), Err(SimError::UnknownLauncher(99)));
        assert_eq!(s.select_sample_size(0), Err(SimError::InvalidSampleSize));
        assert!(matches!(s.set_bin_width(0.0), Err(SimError::InvalidBinWidth(_))));
        assert_eq!(s.launcher().id, 1);
        assert_eq!(s.bin_width(), 0.2);
    }

    #[test]
    fn comparison_covers_every_bucket() {
        let mut s = session();
        for n in [2, 40] {
            s.select_sample_size(n).unwrap();
            for _ in 0..5 {
                s.launch_once().unwrap();
            }
        }
        let hists = s.comparison().unwrap();
        assert_eq!(hists.len(), 4);
        assert_eq!(hists[0].1.count, 5);
        assert!(hists[1].1.is_empty());
        assert_eq!(hists[3].1.count, 5);
    }

    #[test]
    fn empty_roster_is_rejected() {
        let config = SimulationConfig {
            launchers: Vec::new(),
            ..SimulationConfig::default()
        };
        assert_eq!(Session::new(config).unwrap_err(), SimError::EmptyRoster);
    }
}
