/// Child id stored for a node without children.
pub const TREE_LEAF: i64 = -1;
/// Feature id, and threshold, stored for leaves.
pub const TREE_UNDEFINED: i64 = -2;
/// Features varying less than this inside a node are considered constant.
pub const FEATURE_THRESHOLD: f64 = 1e-7;
/// Impurity at or below this marks a node as pure.
pub const IMPURITY_EPS: f64 = 1e-12;
pub const N_FEATURES: usize = 4;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TEST_SIZE: f64 = 0.2;
pub const DEFAULT_OUTPUT_PATH: &str = "decision_tree.json";
pub const JSON_INDENT: &[u8] = b"    ";
