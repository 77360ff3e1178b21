//! Decision Tree Classifier
//!
//! A single CART classification tree with its configuration and the class
//! labels it was trained on.
use crate::config::{ModelIO, TreeConfig, ValueFormat};
use crate::data::Matrix;
use crate::errors::FocusTreeError;
use crate::export::TreeExport;
use crate::splitter::{BestSplitter, Criterion};
use crate::tree::Tree;
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DecisionTreeClassifier {
    pub cfg: TreeConfig,
    /// Sorted distinct labels seen during fitting, class id `k` is `classes[k]`.
    pub classes: Vec<f64>,
    tree: Option<Tree>,
}

impl DecisionTreeClassifier {
    pub fn new(cfg: TreeConfig) -> Self {
        DecisionTreeClassifier {
            cfg,
            classes: Vec::new(),
            tree: None,
        }
    }

    /// Fit the tree on the active rows of `data`.
    ///
    /// * `data` - Feature matrix, only rows in `data.index` are used.
    /// * `y` - Binary label of every row of `data`.
    pub fn fit(&mut self, data: &Matrix<f64>, y: &[f64]) -> Result<(), FocusTreeError> {
        self.cfg.validate()?;
        if data.rows != y.len() {
            return Err(FocusTreeError::ShapeMismatch(data.rows, y.len()));
        }
        if data.index.is_empty() || data.cols == 0 {
            return Err(FocusTreeError::EmptyDataset);
        }

        for i in data.index.iter() {
            if let Some((j, v)) = data.get_row_iter(*i).enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(FocusTreeError::NonFiniteValue(*v, *i, j));
            }
        }

        let mut classes = Vec::new();
        for i in data.index.iter() {
            let label = y[*i];
            if label != 0.0 && label != 1.0 {
                return Err(FocusTreeError::InvalidLabel(label));
            }
            if !classes.contains(&label) {
                classes.push(label);
            }
        }
        classes.sort_by(|a, b| a.total_cmp(b));

        // Rows outside of the index keep class 0, the splitter never reads them.
        let mut y_class = vec![0; y.len()];
        for i in data.index.iter() {
            y_class[*i] = classes.iter().position(|c| *c == y[*i]).unwrap_or_default();
        }

        let splitter = BestSplitter::new(self.cfg.criterion, self.cfg.min_samples_leaf);
        let mut tree = Tree::new();
        tree.fit(data, &y_class, classes.len(), &splitter, &self.cfg);
        info!(
            "Fitted tree on {} rows: {} nodes, {} leaves, depth {}.",
            data.index.len(),
            tree.nodes.len(),
            tree.n_leaves,
            tree.depth
        );
        debug!("Tree structure:\n{}", tree);

        self.classes = classes;
        self.tree = Some(tree);
        Ok(())
    }

    pub fn get_tree(&self) -> Result<&Tree, FocusTreeError> {
        self.tree.as_ref().ok_or(FocusTreeError::NotFitted)
    }

    /// Predicted label of every active row of `data`.
    pub fn predict(&self, data: &Matrix<f64>, parallel: bool) -> Result<Vec<f64>, FocusTreeError> {
        let tree = self.get_tree()?;
        Ok(tree.predict(data, parallel).into_iter().map(|k| self.classes[k]).collect())
    }

    /// Class fractions of every active row of `data`, ordered as `self.classes`.
    pub fn predict_proba(&self, data: &Matrix<f64>, parallel: bool) -> Result<Vec<Vec<f64>>, FocusTreeError> {
        Ok(self.get_tree()?.predict_proba(data, parallel))
    }

    /// Probability of `label` for every active row of `data`, zero if the label was never seen.
    pub fn predict_label_proba(&self, data: &Matrix<f64>, label: f64, parallel: bool) -> Result<Vec<f64>, FocusTreeError> {
        let proba = self.predict_proba(data, parallel)?;
        Ok(match self.classes.iter().position(|c| *c == label) {
            Some(k) => proba.into_iter().map(|p| p[k]).collect(),
            None => vec![0.0; proba.len()],
        })
    }

    /// Extract the tree as parallel arrays.
    pub fn export(&self) -> Result<TreeExport, FocusTreeError> {
        Ok(TreeExport::from_tree(self.get_tree()?, self.cfg.value_format))
    }

    // Set methods for parameters

    /// Set the impurity criterion.
    pub fn set_criterion(mut self, criterion: Criterion) -> Self {
        self.cfg.criterion = criterion;
        self
    }

    /// Set the maximum depth, `None` grows until the leaves are pure.
    pub fn set_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.cfg.max_depth = max_depth;
        self
    }

    pub fn set_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.cfg.min_samples_split = min_samples_split;
        self
    }

    pub fn set_min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.cfg.min_samples_leaf = min_samples_leaf;
        self
    }

    pub fn set_min_impurity_decrease(mut self, min_impurity_decrease: f64) -> Self {
        self.cfg.min_impurity_decrease = min_impurity_decrease;
        self
    }

    /// Set how leaf values are exported.
    pub fn set_value_format(mut self, value_format: ValueFormat) -> Self {
        self.cfg.value_format = value_format;
        self
    }
}

impl ModelIO for DecisionTreeClassifier {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{feature_data, labels, SAMPLES};
    use crate::constants::N_FEATURES;

    #[test]
    fn test_fit_separates_dataset() {
        let data_vec = feature_data(&SAMPLES);
        let y = labels(&SAMPLES);
        let data = Matrix::new(&data_vec, SAMPLES.len(), N_FEATURES);
        let mut model = DecisionTreeClassifier::default();
        model.fit(&data, &y).unwrap();
        assert_eq!(model.classes, vec![0., 1.]);
        assert_eq!(model.predict(&data, true).unwrap(), y);
        // A single split on the first feature separates the toy data.
        let tree = model.get_tree().unwrap();
        assert_eq!(tree.nodes.len(), 3);
        assert_eq!(tree.nodes[0].split_feature, 0);
        assert_eq!(tree.nodes[0].split_value, 75.0);
    }

    #[test]
    fn test_fit_errors() {
        let data_vec = vec![1., 2., 3.];
        let data = Matrix::new(&data_vec, 3, 1);
        let mut model = DecisionTreeClassifier::default();
        assert!(matches!(
            model.fit(&data, &[0., 1.]),
            Err(FocusTreeError::ShapeMismatch(3, 2))
        ));
        assert!(matches!(
            model.fit(&data, &[0., 1., 2.]),
            Err(FocusTreeError::InvalidLabel(_))
        ));
        let empty = Matrix::new(&data_vec, 3, 1).with_index(vec![]);
        assert!(matches!(
            model.fit(&empty, &[0., 1., 0.]),
            Err(FocusTreeError::EmptyDataset)
        ));
        assert!(matches!(model.get_tree(), Err(FocusTreeError::NotFitted)));
        assert!(matches!(model.export(), Err(FocusTreeError::NotFitted)));
    }

    #[test]
    fn test_fit_rejects_non_finite_features() {
        // Column 0 is [1, 2, NaN, NaN], column 1 holds an infinity.
        let data_vec = vec![1., 2., f64::NAN, f64::NAN, 0., 1., 0., f64::INFINITY];
        let y = vec![0., 0., 1., 1.];
        let mut model = DecisionTreeClassifier::default();
        let data = Matrix::new(&data_vec, 4, 2);
        assert!(matches!(
            model.fit(&data, &y),
            Err(FocusTreeError::NonFiniteValue(v, 2, 0)) if v.is_nan()
        ));
        let data = Matrix::new(&data_vec, 4, 2).with_index(vec![0, 1, 3]);
        assert!(matches!(
            model.fit(&data, &y),
            Err(FocusTreeError::NonFiniteValue(v, 3, 1)) if v == f64::INFINITY
        ));
        assert!(matches!(model.get_tree(), Err(FocusTreeError::NotFitted)));

        // Rows outside of the index are never read.
        let data = Matrix::new(&data_vec, 4, 2).with_index(vec![0, 1]);
        assert!(model.fit(&data, &y).is_ok());
    }

    #[test]
    fn test_fit_rejects_invalid_config() {
        let data_vec = vec![1., 2.];
        let data = Matrix::new(&data_vec, 2, 1);
        let mut model = DecisionTreeClassifier::default().set_min_samples_leaf(0);
        assert!(matches!(
            model.fit(&data, &[0., 1.]),
            Err(FocusTreeError::InvalidParameter(..))
        ));
    }

    #[test]
    fn test_single_class_training_rows() {
        let data_vec = vec![1., 2., 3., 4.];
        let y = vec![1., 1., 0., 0.];
        let data = Matrix::new(&data_vec, 4, 1).with_index(vec![0, 1]);
        let mut model = DecisionTreeClassifier::default();
        model.fit(&data, &y).unwrap();
        assert_eq!(model.classes, vec![1.]);
        let all = Matrix::new(&data_vec, 4, 1);
        assert_eq!(model.predict(&all, false).unwrap(), vec![1.; 4]);
        assert_eq!(model.predict_label_proba(&all, 1.0, false).unwrap(), vec![1.; 4]);
        assert_eq!(model.predict_label_proba(&all, 0.0, false).unwrap(), vec![0.; 4]);
    }

    #[test]
    fn test_setters() {
        let model = DecisionTreeClassifier::default()
            .set_criterion(Criterion::Entropy)
            .set_max_depth(Some(2))
            .set_min_samples_split(4)
            .set_min_impurity_decrease(0.1)
            .set_value_format(ValueFormat::Counts);
        assert_eq!(model.cfg.criterion, Criterion::Entropy);
        assert_eq!(model.cfg.max_depth, Some(2));
        assert_eq!(model.cfg.min_samples_split, 4);
        assert_eq!(model.cfg.min_impurity_decrease, 0.1);
        assert_eq!(model.cfg.value_format, ValueFormat::Counts);
    }

    #[test]
    fn test_model_json_round_trip() {
        let data_vec = vec![1., 2., 3., 4.];
        let data = Matrix::new(&data_vec, 4, 1);
        let mut model = DecisionTreeClassifier::default();
        model.fit(&data, &[0., 0., 1., 1.]).unwrap();
        let model2 = DecisionTreeClassifier::from_json(&model.json_dump().unwrap()).unwrap();
        assert_eq!(model2.predict(&data, false).unwrap(), vec![0., 0., 1., 1.]);
    }
}
