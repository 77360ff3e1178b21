//! Tree Exporter
//!
//! The training pipeline: load the dataset, split it, fit a tree, evaluate it,
//! and write the exported arrays to disk.
use crate::classifier::DecisionTreeClassifier;
use crate::config::{ModelIO, TreeConfig};
use crate::constants::{DEFAULT_OUTPUT_PATH, DEFAULT_SEED, DEFAULT_TEST_SIZE, N_FEATURES};
use crate::data::{columns_from_rows, Matrix};
use crate::dataset::{labels, Sample, FEATURE_NAMES, SAMPLES};
use crate::errors::FocusTreeError;
use crate::export::TreeExport;
use crate::metric::{metric_callables, Metric};
use crate::sampler::{NoSampler, SampleMethod, Sampler, ShuffleSampler};
use crate::utils::validate_float_parameter;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_seed() -> u64 {
    DEFAULT_SEED
}
fn default_test_size() -> f64 {
    DEFAULT_TEST_SIZE
}
fn default_sample_method() -> SampleMethod {
    SampleMethod::Shuffle
}
fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExporterConfig {
    /// Seed of the train/test shuffle.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Fraction of rows held out, rounded up.
    #[serde(default = "default_test_size")]
    pub test_size: f64,
    #[serde(default = "default_sample_method")]
    pub sample_method: SampleMethod,
    /// Destination of the exported tree, replaced on every run.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default)]
    pub tree: TreeConfig,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        ExporterConfig {
            seed: default_seed(),
            test_size: default_test_size(),
            sample_method: default_sample_method(),
            output_path: default_output_path(),
            tree: TreeConfig::default(),
        }
    }
}

impl ModelIO for ExporterConfig {}

/// A fitted classifier together with the partition it was fitted on.
pub struct FittedTree {
    pub classifier: DecisionTreeClassifier,
    pub train_index: Vec<usize>,
    pub test_index: Vec<usize>,
    pub train_accuracy: f64,
    /// `None` when no rows were held out.
    pub test_accuracy: Option<f64>,
}

/// Summary of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub output_path: PathBuf,
    pub n_nodes: usize,
    pub n_leaves: usize,
    pub depth: usize,
    pub train_accuracy: f64,
    pub test_accuracy: Option<f64>,
}

pub struct TreeExporter {
    pub cfg: ExporterConfig,
}

impl Default for TreeExporter {
    fn default() -> Self {
        TreeExporter::new(ExporterConfig::default())
    }
}

impl TreeExporter {
    pub fn new(cfg: ExporterConfig) -> Self {
        TreeExporter { cfg }
    }

    /// Split the rows with the configured seed and fit a tree on the training part.
    ///
    /// * `rows` - Feature vectors.
    /// * `y` - Binary label of each feature vector.
    pub fn fit(&self, rows: &[[f64; N_FEATURES]], y: &[f64]) -> Result<FittedTree, FocusTreeError> {
        validate_float_parameter(self.cfg.test_size, 0.0, 1.0, "test_size")?;
        if rows.len() != y.len() {
            return Err(FocusTreeError::ShapeMismatch(rows.len(), y.len()));
        }

        let mut rng = StdRng::seed_from_u64(self.cfg.seed);
        let index: Vec<usize> = (0..rows.len()).collect();
        let (train_index, test_index) = match self.cfg.sample_method {
            SampleMethod::Shuffle => ShuffleSampler::new(self.cfg.test_size).sample(&mut rng, &index),
            SampleMethod::None => NoSampler.sample(&mut rng, &index),
        };
        info!(
            "Split {} samples into {} training and {} test rows (seed {}).",
            rows.len(),
            train_index.len(),
            test_index.len(),
            self.cfg.seed
        );

        let data_vec = columns_from_rows(rows);
        let train = Matrix::new(&data_vec, rows.len(), N_FEATURES).with_index(train_index.clone());
        let mut classifier = DecisionTreeClassifier::new(self.cfg.tree.clone());
        classifier.fit(&train, y)?;
        if let Some(root) = classifier.get_tree()?.nodes.first().filter(|n| !n.is_leaf) {
            info!(
                "Root split: {} <= {}",
                FEATURE_NAMES.get(root.split_feature).copied().unwrap_or("unknown"),
                root.split_value
            );
        }

        let accuracy = metric_callables(&Metric::Accuracy);
        let train_accuracy = accuracy(&subset(y, &train_index), &classifier.predict(&train, true)?);
        info!("Training accuracy: {:.2}%", train_accuracy * 100.0);

        let test_accuracy = if test_index.is_empty() {
            warn!("No rows were held out, skipping test evaluation.");
            None
        } else {
            let test = Matrix::new(&data_vec, rows.len(), N_FEATURES).with_index(test_index.clone());
            let y_test = subset(y, &test_index);
            let test_accuracy = accuracy(&y_test, &classifier.predict(&test, true)?);
            let log_loss = metric_callables(&Metric::LogLoss);
            let test_log_loss = log_loss(&y_test, &classifier.predict_label_proba(&test, 1.0, true)?);
            info!(
                "Test accuracy: {:.2}%, test log loss: {:.4}",
                test_accuracy * 100.0,
                test_log_loss
            );
            Some(test_accuracy)
        };

        Ok(FittedTree {
            classifier,
            train_index,
            test_index,
            train_accuracy,
            test_accuracy,
        })
    }

    /// Extract the fitted tree and write it to the configured output path,
    /// replacing any existing file.
    pub fn export(&self, classifier: &DecisionTreeClassifier) -> Result<TreeExport, FocusTreeError> {
        let export = classifier.export()?;
        export.save(&self.cfg.output_path)?;
        info!(
            "Wrote {} nodes to {}.",
            export.n_nodes(),
            self.cfg.output_path.display()
        );
        Ok(export)
    }

    /// Fit on `samples` and export the resulting tree.
    pub fn run_on(&self, samples: &[Sample]) -> Result<ExportReport, FocusTreeError> {
        let rows: Vec<[f64; N_FEATURES]> = samples.iter().map(|s| s.features).collect();
        let fitted = self.fit(&rows, &labels(samples))?;
        let export = self.export(&fitted.classifier)?;
        let tree = fitted.classifier.get_tree()?;
        Ok(ExportReport {
            output_path: self.cfg.output_path.clone(),
            n_nodes: export.n_nodes(),
            n_leaves: tree.n_leaves,
            depth: tree.depth,
            train_accuracy: fitted.train_accuracy,
            test_accuracy: fitted.test_accuracy,
        })
    }

    /// Fit on the built in dataset and export the resulting tree.
    pub fn run(&self) -> Result<ExportReport, FocusTreeError> {
        self.run_on(&SAMPLES)
    }
}

fn subset(y: &[f64], index: &[usize]) -> Vec<f64> {
    index.iter().map(|i| y[*i]).collect()
}
