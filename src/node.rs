use crate::splitter::SplitInfo;
use crate::utils::{fmt_vec_output, normalize};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Node {
    pub num: usize,
    pub depth: usize,
    pub split_value: f64,
    pub split_feature: usize,
    pub impurity: f64,
    pub n_samples: usize,
    pub left_child: usize,
    pub right_child: usize,
    pub is_leaf: bool,
    /// Training samples of each class that reached this node.
    pub class_counts: Vec<f64>,
}

impl Node {
    /// Create a node, we default to the node being a leaf.
    pub fn new(num: usize, depth: usize, impurity: f64, class_counts: Vec<f64>) -> Self {
        Node {
            num,
            depth,
            split_value: 0.0,
            split_feature: 0,
            impurity,
            n_samples: class_counts.iter().sum::<f64>() as usize,
            left_child: 0,
            right_child: 0,
            is_leaf: true,
            class_counts,
        }
    }

    /// Update all the info that is needed if this node is a
    /// parent node. Children are linked as they get created.
    pub fn make_parent_node(&mut self, split_info: &SplitInfo) {
        self.is_leaf = false;
        self.split_value = split_info.split_value;
        self.split_feature = split_info.split_feature;
    }

    /// Get the path that should be traveled down, given a value.
    pub fn get_child_idx(&self, v: f64) -> usize {
        if v <= self.split_value {
            self.left_child
        } else {
            self.right_child
        }
    }

    /// Class counts scaled to fractions of the node's samples.
    pub fn class_fractions(&self) -> Vec<f64> {
        normalize(&self.class_counts)
    }
}

impl fmt::Display for Node {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_leaf {
            write!(
                f,
                "{}:leaf=[{}],samples={}",
                self.num,
                fmt_vec_output(&self.class_fractions()),
                self.n_samples
            )
        } else {
            write!(
                f,
                "{}:[{} <= {}] yes={},no={},impurity={:.4},samples={}",
                self.num,
                self.split_feature,
                self.split_value,
                self.left_child,
                self.right_child,
                self.impurity,
                self.n_samples
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(feature: usize, value: f64) -> SplitInfo {
        SplitInfo {
            split_feature: feature,
            split_value: value,
            impurity_decrease: 0.5,
            left_index: vec![0],
            right_index: vec![1],
        }
    }

    #[test]
    fn test_make_parent_node() {
        let mut node = Node::new(0, 0, 0.5, vec![1., 1.]);
        assert!(node.is_leaf);
        assert_eq!(node.n_samples, 2);
        node.make_parent_node(&split(2, 0.5));
        node.left_child = 1;
        node.right_child = 2;
        assert!(!node.is_leaf);
        assert_eq!(node.split_feature, 2);
        assert_eq!(node.get_child_idx(0.5), 1);
        assert_eq!(node.get_child_idx(0.6), 2);
    }

    #[test]
    fn test_display() {
        let mut node = Node::new(0, 0, 0.5, vec![2., 2.]);
        assert_eq!(format!("{}", node), "0:leaf=[0.5000, 0.5000],samples=4");
        node.make_parent_node(&split(1, 4.0));
        node.left_child = 1;
        node.right_child = 2;
        assert_eq!(format!("{}", node), "0:[1 <= 4] yes=1,no=2,impurity=0.5000,samples=4");
    }
}
