//! Splitter
//!
//! Search for the best threshold split of a node. Every feature is scanned in
//! parallel, each scan sorts the node's rows by the feature and sweeps the
//! class counts from left to right.
use crate::constants::FEATURE_THRESHOLD;
use crate::data::Matrix;
use crate::errors::FocusTreeError;
use crate::utils::{entropy, gini, items_to_strings};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Impurity measure used to score splits.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub enum Criterion {
    Gini,
    Entropy,
}

impl Criterion {
    pub fn impurity(&self, counts: &[f64]) -> f64 {
        match self {
            Criterion::Gini => gini(counts),
            Criterion::Entropy => entropy(counts),
        }
    }
}

impl FromStr for Criterion {
    type Err = FocusTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Gini" | "gini" => Ok(Criterion::Gini),
            "Entropy" | "entropy" => Ok(Criterion::Entropy),
            _ => Err(FocusTreeError::ParseString(
                s.to_string(),
                "Criterion".to_string(),
                items_to_strings(vec!["Gini", "Entropy"]),
            )),
        }
    }
}

/// The chosen split of a node.
#[derive(Debug, Clone)]
pub struct SplitInfo {
    pub split_feature: usize,
    pub split_value: f64,
    /// Parent impurity minus the size weighted impurity of the children.
    pub impurity_decrease: f64,
    pub left_index: Vec<usize>,
    pub right_index: Vec<usize>,
}

impl SplitInfo {
    /// `true` when `self` should be preferred over `other`.
    /// Higher decrease wins, then the lower feature, then the lower threshold.
    fn is_better_than(&self, other: &SplitInfo) -> bool {
        match self.impurity_decrease.total_cmp(&other.impurity_decrease) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => (self.split_feature, self.split_value) < (other.split_feature, other.split_value),
        }
    }
}

pub trait Splitter {
    fn get_criterion(&self) -> Criterion;

    /// Find the best split of the rows in `index`, `None` if no split is possible.
    ///
    /// * `data` - Feature matrix.
    /// * `y` - Class id of every row of `data`, rows outside of `index` are ignored.
    /// * `index` - Rows belonging to the node.
    /// * `counts` - Per class counts of the node.
    fn best_split(&self, data: &Matrix<f64>, y: &[usize], index: &[usize], counts: &[f64]) -> Option<SplitInfo>;
}

/// Exhaustive search over every feature and every distinct midpoint.
pub struct BestSplitter {
    pub criterion: Criterion,
    pub min_samples_leaf: usize,
}

impl BestSplitter {
    pub fn new(criterion: Criterion, min_samples_leaf: usize) -> Self {
        BestSplitter {
            criterion,
            min_samples_leaf,
        }
    }

    fn best_feature_split(
        &self,
        data: &Matrix<f64>,
        y: &[usize],
        index: &[usize],
        counts: &[f64],
        feature: usize,
    ) -> Option<SplitInfo> {
        let col = data.get_col(feature);
        let mut sorted = index.to_vec();
        sorted.sort_by(|a, b| col[*a].total_cmp(&col[*b]).then(a.cmp(b)));

        let n = sorted.len();
        let (first, last) = (col[sorted[0]], col[sorted[n - 1]]);
        if last <= first + FEATURE_THRESHOLD {
            return None;
        }

        let parent_impurity = self.criterion.impurity(counts);
        let mut left_counts = vec![0.0; counts.len()];
        let mut best: Option<(usize, f64, f64)> = None;

        for pos in 0..(n - 1) {
            left_counts[y[sorted[pos]]] += 1.0;
            let (v, v_next) = (col[sorted[pos]], col[sorted[pos + 1]]);
            if v_next <= v + FEATURE_THRESHOLD {
                continue;
            }
            let n_left = pos + 1;
            let n_right = n - n_left;
            if n_left < self.min_samples_leaf || n_right < self.min_samples_leaf {
                continue;
            }
            let right_counts: Vec<f64> = counts.iter().zip(&left_counts).map(|(c, l)| c - l).collect();
            let decrease = parent_impurity
                - (n_left as f64 / n as f64) * self.criterion.impurity(&left_counts)
                - (n_right as f64 / n as f64) * self.criterion.impurity(&right_counts);

            if best.map_or(true, |(_, _, d)| decrease > d) {
                let mut threshold = v / 2.0 + v_next / 2.0;
                if threshold == v_next || threshold.is_infinite() {
                    threshold = v;
                }
                best = Some((n_left, threshold, decrease));
            }
        }

        best.map(|(n_left, split_value, impurity_decrease)| {
            let right_index = sorted.split_off(n_left);
            SplitInfo {
                split_feature: feature,
                split_value,
                impurity_decrease,
                left_index: sorted,
                right_index,
            }
        })
    }
}

impl Splitter for BestSplitter {
    fn get_criterion(&self) -> Criterion {
        self.criterion
    }

    fn best_split(&self, data: &Matrix<f64>, y: &[usize], index: &[usize], counts: &[f64]) -> Option<SplitInfo> {
        if index.len() < 2 {
            return None;
        }
        (0..data.cols)
            .into_par_iter()
            .filter_map(|feature| self.best_feature_split(data, y, index, counts, feature))
            .reduce_with(|a, b| if b.is_better_than(&a) { b } else { a })
    }
}
