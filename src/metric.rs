use crate::errors::FocusTreeError;
use crate::utils::items_to_strings;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub type MetricFn = fn(&[f64], &[f64]) -> f64;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub enum Metric {
    /// Share of predicted labels equal to the true labels.
    Accuracy,
    /// Binary log loss of the predicted probability of label 1.
    LogLoss,
}

impl FromStr for Metric {
    type Err = FocusTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Accuracy" => Ok(Metric::Accuracy),
            "LogLoss" => Ok(Metric::LogLoss),
            _ => Err(FocusTreeError::ParseString(
                s.to_string(),
                "Metric".to_string(),
                items_to_strings(vec!["Accuracy", "LogLoss"]),
            )),
        }
    }
}

pub fn metric_callables(metric_type: &Metric) -> MetricFn {
    match metric_type {
        Metric::Accuracy => AccuracyMetric::calculate_metric,
        Metric::LogLoss => LogLossMetric::calculate_metric,
    }
}

pub trait EvaluationMetric {
    /// Metric value, NaN for empty inputs.
    fn calculate_metric(y: &[f64], yhat: &[f64]) -> f64;
}

pub struct AccuracyMetric {}
impl EvaluationMetric for AccuracyMetric {
    fn calculate_metric(y: &[f64], yhat: &[f64]) -> f64 {
        if y.is_empty() {
            return f64::NAN;
        }
        let correct = y.iter().zip(yhat).filter(|(t, p)| t == p).count();
        correct as f64 / y.len() as f64
    }
}

pub struct LogLossMetric {}
impl EvaluationMetric for LogLossMetric {
    fn calculate_metric(y: &[f64], yhat: &[f64]) -> f64 {
        if y.is_empty() {
            return f64::NAN;
        }
        let eps = 1e-15;
        let total: f64 = y
            .iter()
            .zip(yhat)
            .map(|(y_, p)| {
                let p = p.clamp(eps, 1.0 - eps);
                -(y_ * p.ln() + (1.0 - y_) * (1.0 - p).ln())
            })
            .sum();
        total / y.len() as f64
    }
}
