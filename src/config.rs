//! Tree Configuration
//!
//! Defines the configuration structures and enums used to grow and export a
//! decision tree, and the JSON IO shared by every serializable model type.
use crate::errors::FocusTreeError;
use crate::splitter::Criterion;
use crate::utils::{items_to_strings, validate_min_usize_parameter, validate_positive_float_parameter};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// How per node class values are written to the exported `value` array.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Default)]
pub enum ValueFormat {
    /// Fraction of the node's training samples in each class.
    #[default]
    Fractions,
    /// Raw training sample count of each class.
    Counts,
}

impl FromStr for ValueFormat {
    type Err = FocusTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fractions" => Ok(ValueFormat::Fractions),
            "Counts" => Ok(ValueFormat::Counts),
            _ => Err(FocusTreeError::ParseString(
                s.to_string(),
                "ValueFormat".to_string(),
                items_to_strings(vec!["Fractions", "Counts"]),
            )),
        }
    }
}

fn default_criterion() -> Criterion {
    Criterion::Gini
}
fn default_max_depth() -> Option<usize> {
    None
}
fn default_min_samples_split() -> usize {
    2
}
fn default_min_samples_leaf() -> usize {
    1
}
fn default_min_impurity_decrease() -> f64 {
    0.0
}

/// Parameters controlling tree growth.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TreeConfig {
    /// Impurity measure used to score splits.
    #[serde(default = "default_criterion")]
    pub criterion: Criterion,
    /// Maximum depth of the tree, unbounded when `None`.
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<usize>,
    /// Minimum samples a node needs to be split.
    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,
    /// Minimum samples each child of a split must keep.
    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,
    /// A split is kept only if its impurity decrease, weighted by the
    /// fraction of training samples reaching the node, is at least this.
    #[serde(default = "default_min_impurity_decrease")]
    pub min_impurity_decrease: f64,
    #[serde(default)]
    pub value_format: ValueFormat,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            criterion: default_criterion(),
            max_depth: default_max_depth(),
            min_samples_split: default_min_samples_split(),
            min_samples_leaf: default_min_samples_leaf(),
            min_impurity_decrease: default_min_impurity_decrease(),
            value_format: ValueFormat::default(),
        }
    }
}

impl TreeConfig {
    pub fn validate(&self) -> Result<(), FocusTreeError> {
        validate_min_usize_parameter(self.min_samples_split, 2, "min_samples_split")?;
        validate_min_usize_parameter(self.min_samples_leaf, 1, "min_samples_leaf")?;
        if let Some(max_depth) = self.max_depth {
            validate_min_usize_parameter(max_depth, 1, "max_depth")?;
        }
        validate_positive_float_parameter(self.min_impurity_decrease, "min_impurity_decrease")
    }
}

/// IO
pub trait ModelIO: Serialize + DeserializeOwned + Sized {
    /// Save as a json object to a file, replacing any existing file.
    ///
    /// * `path` - Path to save to.
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), FocusTreeError> {
        fs::write(path, self.json_dump()?).map_err(|e| FocusTreeError::UnableToWrite(e.to_string()))
    }

    /// Dump as a json object
    fn json_dump(&self) -> Result<String, FocusTreeError> {
        serde_json::to_string(self).map_err(|e| FocusTreeError::UnableToWrite(e.to_string()))
    }

    /// Load from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, FocusTreeError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| FocusTreeError::UnableToRead(e.to_string()))
    }

    /// Load from a path to a json object.
    ///
    /// * `path` - Path to load from.
    fn load<P: AsRef<Path>>(path: P) -> Result<Self, FocusTreeError> {
        let json_str = fs::read_to_string(path).map_err(|e| FocusTreeError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ModelIO for TreeConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_tree_config_default() {
        let config = TreeConfig::default();
        assert_eq!(config.criterion, Criterion::Gini);
        assert_eq!(config.max_depth, None);
        assert_eq!(config.min_samples_split, 2);
        assert_eq!(config.min_samples_leaf, 1);
        assert_eq!(config.value_format, ValueFormat::Fractions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = TreeConfig::from_json(r#"{"max_depth": 3, "value_format": "Counts"}"#).unwrap();
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.value_format, ValueFormat::Counts);
        assert_eq!(config.min_samples_split, 2);
        assert_eq!(config.criterion, Criterion::Gini);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let config = TreeConfig {
            min_samples_split: 1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(FocusTreeError::InvalidParameter(..))));

        let config = TreeConfig {
            max_depth: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TreeConfig {
            min_impurity_decrease: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tree_config_io_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tree_config.json");
        let config = TreeConfig {
            criterion: Criterion::Entropy,
            ..Default::default()
        };
        config.save(&file_path).unwrap();
        let config2 = TreeConfig::load(&file_path).unwrap();
        assert_eq!(config, config2);
    }

    #[test]
    fn test_value_format_from_str() {
        assert_eq!(ValueFormat::from_str("Counts").unwrap(), ValueFormat::Counts);
        assert!(ValueFormat::from_str("Probabilities").is_err());
    }
}
