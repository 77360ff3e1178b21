//! Export
//!
//! The portable form of a fitted tree: parallel arrays indexed by node id,
//! written as a JSON object with 4 space indentation. Consumers walk the
//! arrays from node 0, going left when `row[feature] <= threshold`.
use crate::config::{ModelIO, ValueFormat};
use crate::constants::{JSON_INDENT, TREE_LEAF, TREE_UNDEFINED};
use crate::errors::FocusTreeError;
use crate::tree::Tree;
use crate::utils::{argmax, normalize};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TreeExport {
    /// Left child id, `-1` for leaves.
    pub children_left: Vec<i64>,
    /// Right child id, `-1` for leaves.
    pub children_right: Vec<i64>,
    /// Split feature, `-2` for leaves.
    pub feature: Vec<i64>,
    /// Split threshold, `-2.0` for leaves.
    pub threshold: Vec<f64>,
    /// Per node `[outputs][classes]` values.
    pub value: Vec<Vec<Vec<f64>>>,
}

impl TreeExport {
    pub fn from_tree(tree: &Tree, value_format: ValueFormat) -> Self {
        let n_nodes = tree.nodes.len();
        let mut export = TreeExport {
            children_left: Vec::with_capacity(n_nodes),
            children_right: Vec::with_capacity(n_nodes),
            feature: Vec::with_capacity(n_nodes),
            threshold: Vec::with_capacity(n_nodes),
            value: Vec::with_capacity(n_nodes),
        };
        for node in tree.nodes.iter() {
            if node.is_leaf {
                export.children_left.push(TREE_LEAF);
                export.children_right.push(TREE_LEAF);
                export.feature.push(TREE_UNDEFINED);
                export.threshold.push(TREE_UNDEFINED as f64);
            } else {
                export.children_left.push(node.left_child as i64);
                export.children_right.push(node.right_child as i64);
                export.feature.push(node.split_feature as i64);
                export.threshold.push(node.split_value);
            }
            let values = match value_format {
                ValueFormat::Fractions => node.class_fractions(),
                ValueFormat::Counts => node.class_counts.clone(),
            };
            export.value.push(vec![values]);
        }
        export
    }

    pub fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    pub fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == TREE_LEAF
    }

    /// Check the parallel array invariants.
    pub fn validate(&self) -> Result<(), FocusTreeError> {
        let n = self.n_nodes();
        if n == 0 {
            return Err(FocusTreeError::InvalidTree("the tree has no nodes".to_string()));
        }
        let lengths = [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ];
        if lengths.iter().any(|l| *l != n) {
            return Err(FocusTreeError::InvalidTree(format!(
                "array lengths differ, children_left has {} entries, others have {:?}",
                n, lengths
            )));
        }
        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == TREE_LEAF || right == TREE_LEAF {
                if left != right || self.feature[i] != TREE_UNDEFINED {
                    return Err(FocusTreeError::InvalidTree(format!("node {} is a malformed leaf", i)));
                }
            } else if left <= i as i64 || right <= i as i64 || left >= n as i64 || right >= n as i64 {
                // Pre-order ids, children always come after their parent.
                return Err(FocusTreeError::InvalidTree(format!(
                    "node {} has children {} and {} out of range",
                    i, left, right
                )));
            } else if self.feature[i] < 0 {
                return Err(FocusTreeError::InvalidTree(format!(
                    "node {} splits on feature {}",
                    i, self.feature[i]
                )));
            }
        }
        Ok(())
    }

    /// Id of the leaf reached by a row.
    pub fn leaf_index(&self, row: &[f64]) -> Result<usize, FocusTreeError> {
        let mut node = 0;
        // A walk visits each node at most once in a well formed tree.
        for _ in 0..self.n_nodes() {
            if self.is_leaf(node) {
                return Ok(node);
            }
            let feature = usize::try_from(self.feature[node])
                .map_err(|_| FocusTreeError::InvalidTree(format!("node {} has no split feature", node)))?;
            let v = row.get(feature).ok_or_else(|| {
                FocusTreeError::InvalidTree(format!("feature {} is out of range for a row of {}", feature, row.len()))
            })?;
            let next = if *v <= self.threshold[node] {
                self.children_left[node]
            } else {
                self.children_right[node]
            };
            node = usize::try_from(next)
                .ok()
                .filter(|n| *n < self.n_nodes())
                .ok_or_else(|| FocusTreeError::InvalidTree(format!("node {} points to child {}", node, next)))?;
        }
        Err(FocusTreeError::InvalidTree("the walk did not reach a leaf".to_string()))
    }

    /// Class fractions at the leaf reached by a row.
    pub fn predict_proba_row(&self, row: &[f64]) -> Result<Vec<f64>, FocusTreeError> {
        let leaf = self.leaf_index(row)?;
        Ok(self.value[leaf].first().map(|v| normalize(v)).unwrap_or_default())
    }

    /// Class id predicted for a row, the first class wins on ties.
    pub fn predict_row(&self, row: &[f64]) -> Result<usize, FocusTreeError> {
        Ok(argmax(&self.predict_proba_row(row)?))
    }
}

impl ModelIO for TreeExport {
    /// Dump with 4 space indentation.
    fn json_dump(&self) -> Result<String, FocusTreeError> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
        self.serialize(&mut ser)
            .map_err(|e| FocusTreeError::UnableToWrite(e.to_string()))?;
        String::from_utf8(buf).map_err(|e| FocusTreeError::UnableToWrite(e.to_string()))
    }
}
