/// Landing distances of one launch action.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub launcher_id: u32,
    pub distances: Vec<f64>,
}

impl BatchResult {
    pub fn new(launcher_id: u32, distances: Vec<f64>) -> Self {
        Self {
            launcher_id,
            distances,
        }
    }

    pub fn sample_size(&self) -> usize {
        self.distances.len()
    }

    pub fn mean(&self) -> f64 {
        if self.distances.is_empty() {
            0.0
        } else {
            self.distances.iter().sum::<f64>() / self.distances.len() as f64
        }
    }
}

/// Batch means collected for one sample size by a study run.
#[derive(Debug, Clone)]
pub struct SampleSizeResult {
    pub sample_size: usize,
    pub means: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct StudyResult {
    pub launcher_id: u32,
    pub per_size: Vec<SampleSizeResult>,
}

impl StudyResult {
    pub fn n_batches(&self) -> usize {
        self.per_size.iter().map(|s| s.means.len()).sum()
    }

    pub fn means_for(&self, sample_size: usize) -> Option<&[f64]> {
        self.per_size
            .iter()
            .find(|s| s.sample_size == sample_size)
            .map(|s| s.means.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_mean() {
        let batch = BatchResult::new(1, vec![40.0, 41.0, 42.0]);
        assert_eq!(batch.sample_size(), 3);
        assert!((batch.mean() - 41.0).abs() < 1e-12);
    }

    #[test]
    fn empty_batch_mean_is_zero() {
        assert_eq!(BatchResult::new(1, Vec::new()).mean(), 0.0);
    }
}
