pub mod arff;
pub mod builder;
pub mod dataset;
pub mod entropy;
pub mod error;
pub mod evaluate;
pub mod harness;
pub mod loader;
pub mod persist;
pub mod record;
pub mod render;
pub mod tree;

#[cfg(test)]
mod test_data;

pub use crate::builder::{train, BuildOptions, ScanStrategy};
pub use crate::dataset::{Dataset, DatasetView, Path};
pub use crate::error::{Error, Result};
pub use crate::harness::{
    best_tree_search, stratified_split, Allocation, BestTreeResult, ScoringRule, SearchOptions,
    SearchReport, SplitOptions,
};
pub use crate::record::Record;
pub use crate::tree::{Edge, Node, NodeId, Tree};
