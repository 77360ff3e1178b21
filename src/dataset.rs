//! Dataset
//!
//! The hardcoded table of labeled website visits the tree is trained on.
use crate::constants::N_FEATURES;
use crate::data::columns_from_rows;

/// Names of the four features, in column order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = ["time_spent_mins", "visits_per_day", "work_hours", "manually_blocked"];

/// One labeled visit profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Time spent (mins), visits per day, work hours (0/1), manually blocked (0/1).
    pub features: [f64; N_FEATURES],
    /// 1 = distracting, 0 = productive.
    pub label: u8,
}

impl Sample {
    pub const fn new(features: [f64; N_FEATURES], label: u8) -> Self {
        Sample { features, label }
    }
}

pub const SAMPLES: [Sample; 6] = [
    // Social media, blocked
    Sample::new([120., 5., 0., 1.], 1),
    // Work related
    Sample::new([30., 3., 1., 0.], 0),
    // Video binge
    Sample::new([200., 10., 0., 1.], 1),
    // Research
    Sample::new([10., 1., 1., 0.], 0),
    // Streaming
    Sample::new([180., 6., 0., 1.], 1),
    // Educational site
    Sample::new([15., 2., 1., 0.], 0),
];

/// Column-major feature buffer for a set of samples, ready for `Matrix::new`.
pub fn feature_data(samples: &[Sample]) -> Vec<f64> {
    let rows: Vec<[f64; N_FEATURES]> = samples.iter().map(|s| s.features).collect();
    columns_from_rows(&rows)
}

/// Labels as floats, in sample order.
pub fn labels(samples: &[Sample]) -> Vec<f64> {
    samples.iter().map(|s| f64::from(s.label)).collect()
}
