use crate::config::TreeConfig;
use crate::constants::IMPURITY_EPS;
use crate::data::Matrix;
use crate::node::Node;
use crate::splitter::Splitter;
use crate::utils::argmax;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::max;
use std::fmt::{self, Display};

/// A node waiting on the growth stack.
struct Growable {
    index: Vec<usize>,
    depth: usize,
    /// Parent node, and whether this is its left child.
    parent: Option<(usize, bool)>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct Tree {
    /// Nodes in depth first pre-order, the position of a node is its id.
    pub nodes: Vec<Node>,
    pub n_classes: usize,
    pub depth: usize,
    pub n_leaves: usize,
}

impl Tree {
    pub fn new() -> Self {
        Tree::default()
    }

    /// Grow the tree on the active rows of `data`.
    ///
    /// * `data` - Feature matrix, only rows in `data.index` are used.
    /// * `y` - Class id of every row of `data`.
    /// * `n_classes` - Number of classes.
    /// * `splitter` - Split search strategy.
    /// * `cfg` - Stopping rules.
    pub fn fit<T: Splitter>(&mut self, data: &Matrix<f64>, y: &[usize], n_classes: usize, splitter: &T, cfg: &TreeConfig) {
        self.nodes.clear();
        self.n_classes = n_classes;
        self.depth = 0;
        self.n_leaves = 0;

        let n_total = data.index.len() as f64;
        let criterion = splitter.get_criterion();

        // Right children are pushed first, so left subtrees get the lower ids.
        let mut growable = vec![Growable {
            index: data.index.clone(),
            depth: 0,
            parent: None,
        }];

        while let Some(g) = growable.pop() {
            let num = self.nodes.len();
            if let Some((parent, is_left)) = g.parent {
                let p = &mut self.nodes[parent];
                if is_left {
                    p.left_child = num;
                } else {
                    p.right_child = num;
                }
            }

            let counts = class_counts(y, &g.index, n_classes);
            let impurity = criterion.impurity(&counts);
            let mut node = Node::new(num, g.depth, impurity, counts);
            self.depth = max(self.depth, g.depth);

            let n_samples = g.index.len();
            let stop = n_samples < cfg.min_samples_split
                || n_samples < 2 * cfg.min_samples_leaf
                || impurity <= IMPURITY_EPS
                || cfg.max_depth.is_some_and(|d| g.depth >= d);

            let split_info = if stop {
                None
            } else {
                splitter.best_split(data, y, &g.index, &node.class_counts)
            };

            match split_info {
                Some(info)
                    if (n_samples as f64 / n_total) * info.impurity_decrease + IMPURITY_EPS
                        >= cfg.min_impurity_decrease =>
                {
                    node.make_parent_node(&info);
                    growable.push(Growable {
                        index: info.right_index,
                        depth: g.depth + 1,
                        parent: Some((num, false)),
                    });
                    growable.push(Growable {
                        index: info.left_index,
                        depth: g.depth + 1,
                        parent: Some((num, true)),
                    });
                }
                _ => self.n_leaves += 1,
            }
            self.nodes.push(node);
        }
    }

    /// Leaf reached by a row.
    pub fn leaf(&self, row: &[f64]) -> &Node {
        let mut node_idx = 0;
        loop {
            let node = &self.nodes[node_idx];
            if node.is_leaf {
                return node;
            } else {
                node_idx = node.get_child_idx(row[node.split_feature]);
            }
        }
    }

    pub fn predict_proba_row(&self, row: &[f64]) -> Vec<f64> {
        self.leaf(row).class_fractions()
    }

    /// Class id predicted for a row.
    pub fn predict_row(&self, row: &[f64]) -> usize {
        argmax(&self.leaf(row).class_counts)
    }

    fn predict_proba_single_threaded(&self, data: &Matrix<f64>) -> Vec<Vec<f64>> {
        data.index.iter().map(|i| self.predict_proba_row(&data.get_row(*i))).collect()
    }

    fn predict_proba_parallel(&self, data: &Matrix<f64>) -> Vec<Vec<f64>> {
        data.index
            .par_iter()
            .map(|i| self.predict_proba_row(&data.get_row(*i)))
            .collect()
    }

    /// Class fractions for every active row of `data`.
    pub fn predict_proba(&self, data: &Matrix<f64>, parallel: bool) -> Vec<Vec<f64>> {
        if parallel {
            self.predict_proba_parallel(data)
        } else {
            self.predict_proba_single_threaded(data)
        }
    }

    /// Class ids for every active row of `data`.
    pub fn predict(&self, data: &Matrix<f64>, parallel: bool) -> Vec<usize> {
        if parallel {
            data.index
                .par_iter()
                .map(|i| self.predict_row(&data.get_row(*i)))
                .collect()
        } else {
            data.index.iter().map(|i| self.predict_row(&data.get_row(*i))).collect()
        }
    }
}

impl Display for Tree {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut print_buffer: Vec<usize> = if self.nodes.is_empty() { vec![] } else { vec![0] };
        let mut r = String::new();
        while let Some(idx) = print_buffer.pop() {
            let node = &self.nodes[idx];
            r += format!("{}{}\n", "      ".repeat(node.depth).as_str(), node).as_str();
            if !node.is_leaf {
                print_buffer.push(node.right_child);
                print_buffer.push(node.left_child);
            }
        }
        write!(f, "{}", r)
    }
}

pub fn class_counts(y: &[usize], index: &[usize], n_classes: usize) -> Vec<f64> {
    let mut counts = vec![0.0; n_classes];
    for i in index {
        counts[y[*i]] += 1.0;
    }
    counts
}
