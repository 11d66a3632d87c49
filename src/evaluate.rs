use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::tree::Tree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
}

impl Evaluation {
    pub fn accuracy(&self) -> f64 {
        self.correct as f64 / self.total as f64
    }
}

/// Classifies every row of `validation_data` and counts the hits.
pub fn evaluate(validation_data: &[&Record], tree: &Tree, target: usize) -> Result<Evaluation> {
    if validation_data.is_empty() {
        return Err(Error::invalid("cannot evaluate on an empty test set"));
    }
    let correct = validation_data
        .iter()
        .filter(|record| record.get(target) == Some(tree.classify(record)))
        .count();
    Ok(Evaluation {
        correct,
        total: validation_data.len(),
    })
}

/// Scores a tree, possibly trained elsewhere, on every row of `dataset`. The
/// dataset must have the tree's columns and the tree's target.
pub fn evaluate_dataset(dataset: &Dataset, tree: &Tree) -> Result<Evaluation> {
    if tree.attributes() != dataset.attributes() {
        return Err(Error::invalid("tree was trained on different columns"));
    }
    if tree.target() != dataset.target_name() {
        return Err(Error::invalid(format!(
            "tree predicts `{}` but the dataset target is `{}`",
            tree.target(),
            dataset.target_name()
        )));
    }
    evaluate(dataset.view().rows(), tree, dataset.target())
}
