//! Entropy and information gain over dataset views.
//!
//! All entropies are in bits. A partition whose rows share a single target
//! value has an entropy of exactly `0.0`, which the builder relies on to
//! recognise leaf decisions.

use crate::dataset::DatasetView;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Target distribution within the rows holding one value of a candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueEntropy<'a> {
    pub entropy: f64,
    pub total: usize,
    pub target_counts: BTreeMap<&'a str, usize>,
}

impl<'a> ValueEntropy<'a> {
    fn from_counts(target_counts: BTreeMap<&'a str, usize>) -> Self {
        let total = target_counts.values().sum();
        Self {
            entropy: calculate_information(target_counts.values().copied(), total),
            total,
            target_counts,
        }
    }

    /// The sole target value of a pure partition.
    pub fn sole_target(&self) -> Option<&'a str> {
        let mut observed = self.target_counts.iter().filter(|(_, &count)| count > 0);
        match (observed.next(), observed.next()) {
            (Some((&value, _)), None) => Some(value),
            _ => None,
        }
    }
}

/// Per-value breakdown of a candidate attribute, keyed by attribute value.
pub type Partition<'a> = BTreeMap<&'a str, ValueEntropy<'a>>;

/// Everything the builder needs to pick a split at one node.
#[derive(Debug, Clone)]
pub struct NodeStatistics<'a> {
    pub size: usize,
    pub target_counts: BTreeMap<&'a str, usize>,
    pub target_entropy: f64,
    /// Candidate attributes in the order they were requested.
    pub candidates: Vec<(usize, Partition<'a>)>,
}

fn calculate_information<I>(distribution: I, total: usize) -> f64
where
    I: IntoIterator<Item = usize>,
{
    let total = total as f64;
    distribution
        .into_iter()
        .filter(|count| *count > 0)
        .map(|count| count as f64 / total)
        .fold(0., |acc, p| acc - p * p.log2())
}

fn ensure_non_empty(view: &DatasetView<'_>) -> Result<()> {
    if view.is_empty() {
        Err(Error::invalid("entropy of an empty dataset view"))
    } else {
        Ok(())
    }
}

/// `H = -Σ p_v log2 p_v` over the values of `attribute` in `view`.
pub fn entropy(attribute: usize, view: &DatasetView<'_>) -> Result<f64> {
    ensure_non_empty(view)?;
    let counts = view.value_counts(attribute);
    Ok(calculate_information(counts.values().copied(), view.len()))
}

/// Partitions `view` by `candidate` and measures the target entropy of each part.
pub fn conditional_entropy_and_counts<'a>(
    candidate: usize,
    view: &DatasetView<'a>,
    target: usize,
) -> Result<Partition<'a>> {
    ensure_non_empty(view)?;
    let mut counts: BTreeMap<&'a str, BTreeMap<&'a str, usize>> = BTreeMap::new();
    for record in view.rows() {
        if let (Some(value), Some(class)) = (record.get(candidate), record.get(target)) {
            *counts.entry(value).or_default().entry(class).or_insert(0) += 1;
        }
    }
    Ok(finish_partition(counts))
}

fn finish_partition<'a>(counts: BTreeMap<&'a str, BTreeMap<&'a str, usize>>) -> Partition<'a> {
    counts
        .into_iter()
        .map(|(value, target_counts)| (value, ValueEntropy::from_counts(target_counts)))
        .collect()
}

/// `IG = H(target) - Σ (total_v / size) · H_v`.
pub fn information_gain(partition: &Partition<'_>, dataset_size: usize, target_entropy: f64) -> f64 {
    let size = dataset_size as f64;
    target_entropy
        - partition
            .values()
            .map(|part| (part.total as f64 / size) * part.entropy)
            .sum::<f64>()
}

/// Counts the target and every candidate in a single pass over `view`.
pub fn scan<'a>(view: &DatasetView<'a>, candidates: &[usize], target: usize) -> Result<NodeStatistics<'a>> {
    ensure_non_empty(view)?;
    let mut target_counts: BTreeMap<&'a str, usize> = BTreeMap::new();
    let mut counts: Vec<BTreeMap<&'a str, BTreeMap<&'a str, usize>>> =
        vec![BTreeMap::new(); candidates.len()];
    for record in view.rows() {
        let class = match record.get(target) {
            Some(class) => class,
            None => continue,
        };
        *target_counts.entry(class).or_insert(0) += 1;
        for (slot, &candidate) in counts.iter_mut().zip(candidates) {
            if let Some(value) = record.get(candidate) {
                *slot.entry(value).or_default().entry(class).or_insert(0) += 1;
            }
        }
    }
    let size = target_counts.values().sum();
    Ok(NodeStatistics {
        size,
        target_entropy: calculate_information(target_counts.values().copied(), size),
        target_counts,
        candidates: candidates
            .iter()
            .copied()
            .zip(counts.into_iter().map(finish_partition))
            .collect(),
    })
}

/// Same result as [`scan`], but with one pass per candidate attribute.
pub fn scan_per_attribute<'a>(
    view: &DatasetView<'a>,
    candidates: &[usize],
    target: usize,
) -> Result<NodeStatistics<'a>> {
    let target_entropy = entropy(target, view)?;
    let target_counts = view.value_counts(target);
    let candidates = candidates
        .iter()
        .map(|&candidate| Ok((candidate, conditional_entropy_and_counts(candidate, view, target)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(NodeStatistics {
        size: view.len(),
        target_counts,
        target_entropy,
        candidates,
    })
}
