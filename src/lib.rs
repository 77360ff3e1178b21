//! Train a small decision tree that flags distracting website visits, and
//! export it as parallel JSON arrays for an external inference consumer.

// Modules
pub mod classifier;
pub mod config;
pub mod constants;
pub mod data;
pub mod dataset;
pub mod errors;
pub mod export;
pub mod exporter;
pub mod metric;
pub mod node;
pub mod sampler;
pub mod splitter;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use classifier::DecisionTreeClassifier;
pub use config::{ModelIO, TreeConfig, ValueFormat};
pub use data::Matrix;
pub use errors::FocusTreeError;
pub use export::TreeExport;
pub use exporter::{ExportReport, ExporterConfig, TreeExporter};
