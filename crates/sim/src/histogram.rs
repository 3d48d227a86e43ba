use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn label(&self) -> String {
        format!("{:.1}-{:.1}", self.start, self.end)
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Frequency bins and summary statistics; always rebuilt from the raw values.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<Bin>,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Bin with the highest count, the first one on ties.
    pub fn mode_bin(&self) -> Option<&Bin> {
        self.bins
            .iter()
            .fold(None, |best: Option<&Bin>, b| match best {
                Some(m) if m.count >= b.count => Some(m),
                _ => Some(b),
            })
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Returns `(mean, population std dev)`, or zeros for empty input.
pub fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Upper bound on the bins a single histogram may hold.
pub const MAX_BINS: usize = 100_000;

/// Bins `values` over `[floor(min), ceil(max) + bin_width)` in steps of
/// `bin_width`, counting each value in the half-open bin that contains it.
///
/// Fails with [`SimError::TooManyBins`] past [`MAX_BINS`], and with
/// [`SimError::BinWidthBelowResolution`] when the values are so large that
/// stepping by `bin_width` no longer moves an edge.
pub fn build_histogram(values: &[f64], bin_width: f64) -> SimResult<Histogram> {
    if !bin_width.is_finite() || bin_width <= 0.0 {
        return Err(SimError::InvalidBinWidth(bin_width));
    }
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(SimError::NonFiniteValue { index, value });
    }
    if values.is_empty() {
        return Ok(Histogram {
            bins: Vec::new(),
            count: 0,
            mean: 0.0,
            std_dev: 0.0,
        });
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lo = min.floor();
    let top = max.ceil();
    for magnitude in [lo, top] {
        if magnitude + bin_width <= magnitude {
            return Err(SimError::BinWidthBelowResolution { bin_width, magnitude });
        }
    }
    let hi = top + bin_width;

    let estimate = ((hi - lo) / bin_width).ceil();
    if estimate > MAX_BINS as f64 {
        return Err(SimError::TooManyBins {
            bins: estimate as u64,
            max: MAX_BINS,
        });
    }

    // Edges are lo + i * width so neighbouring bins share the exact same edge.
    let mut edges = Vec::with_capacity(estimate as usize + 2);
    let mut i = 0u64;
    loop {
        let edge = lo + i as f64 * bin_width;
        if edges.last().is_some_and(|&prev| edge <= prev) {
            return Err(SimError::BinWidthBelowResolution {
                bin_width,
                magnitude: edge,
            });
        }
        edges.push(edge);
        if edge >= hi {
            break;
        }
        if edges.len() > MAX_BINS {
            return Err(SimError::TooManyBins {
                bins: estimate as u64,
                max: MAX_BINS,
            });
        }
        i += 1;
    }

    // Edges strictly increase from lo (<= min) to >= hi (> max), so every
    // value has exactly one slot.
    let mut counts = vec![0usize; edges.len() - 1];
    for &v in values {
        let slot = edges.partition_point(|&e| e <= v) - 1;
        counts[slot] += 1;
    }

    let bins = edges
        .windows(2)
        .zip(counts)
        .map(|(w, count)| Bin {
            start: w[0],
            end: w[1],
            count,
        })
        .collect();
    let (mean, std_dev) = mean_and_std_dev(values);

    Ok(Histogram {
        bins,
        count: values.len(),
        mean,
        std_dev,
    })
}
