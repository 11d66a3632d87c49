//! Train/test splitting and the repeated-trial search for the best tree.

use crate::builder::{self, BuildOptions};
use crate::dataset::{Dataset, DatasetView};
use crate::error::{Error, Result};
use crate::evaluate::{evaluate, Evaluation};
use crate::record::Record;
use crate::tree::Tree;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::time::Instant;

/// How many rows of each class go to the training set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// `floor(class_count * fraction)` rows per class.
    PerClass,
    /// `floor(rows / classes * fraction)` rows per class, whatever its size.
    PerTotal,
}

impl Default for Allocation {
    fn default() -> Self {
        Allocation::PerClass
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SplitOptions {
    /// `None` (or zero) trains on every row and tests on every row. Otherwise
    /// it must lie in `(0, 1)`; a fraction of one would leave nothing to test.
    pub training_fraction: Option<f64>,
    pub allocation: Allocation,
}

#[derive(Debug, Clone)]
pub struct Split<'a> {
    pub train: DatasetView<'a>,
    pub test: DatasetView<'a>,
}

/// Shuffles the rows and deals each class's quota into the training set.
pub fn stratified_split<'a, R>(dataset: &'a Dataset, options: &SplitOptions, rng: &mut R) -> Result<Split<'a>>
where
    R: Rng + ?Sized,
{
    let mut shuffled: Vec<&Record> = dataset.records().iter().collect();
    shuffled.shuffle(rng);

    let fraction = match options.training_fraction {
        None => None,
        Some(f) if f == 0.0 => None,
        Some(f) if f > 0.0 && f < 1.0 => Some(f),
        Some(f) => {
            return Err(Error::invalid(format!(
                "training fraction {} is outside (0, 1)",
                f
            )))
        }
    };
    let fraction = match fraction {
        Some(fraction) => fraction,
        None => {
            return Ok(Split {
                train: DatasetView::from_rows(dataset, shuffled),
                test: dataset.view(),
            })
        }
    };

    let target = dataset.target();
    let class_counts = dataset.view().value_counts(target);
    let per_total = dataset.len() as f64 / class_counts.len() as f64;
    let mut quotas = BTreeMap::new();
    for (&class, &count) in &class_counts {
        let quota = match options.allocation {
            Allocation::PerClass => (count as f64 * fraction).floor() as usize,
            Allocation::PerTotal => (per_total * fraction).floor() as usize,
        };
        if quota == 0 {
            return Err(Error::invalid(format!(
                "class `{}` would have no training rows at fraction {}",
                class, fraction
            )));
        }
        quotas.insert(class, quota);
    }

    let mut train = Vec::new();
    let mut test = Vec::new();
    for record in shuffled {
        let quota = record.get(target).and_then(|class| quotas.get_mut(class));
        match quota {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                train.push(record);
            }
            _ => test.push(record),
        }
    }
    Ok(Split {
        train: DatasetView::from_rows(dataset, train),
        test: DatasetView::from_rows(dataset, test),
    })
}

/// Ranks the trees produced by a search. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoringRule {
    Accuracy,
    /// Accuracy, but trees below the threshold are never retained.
    MinimumAccuracy(f64),
    /// Accuracy per `log2(node_count + 1)`, favouring smaller trees.
    Efficiency,
}

impl Default for ScoringRule {
    fn default() -> Self {
        ScoringRule::Accuracy
    }
}

impl ScoringRule {
    /// `None` when the tree is not eligible at all.
    pub fn score(&self, accuracy: f64, node_count: usize) -> Option<f64> {
        match *self {
            ScoringRule::Accuracy => Some(accuracy),
            ScoringRule::MinimumAccuracy(minimum) if accuracy >= minimum => Some(accuracy),
            ScoringRule::MinimumAccuracy(_) => None,
            ScoringRule::Efficiency => Some(accuracy / (node_count as f64 + 1.0).log2()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub split: SplitOptions,
    pub build: BuildOptions,
    pub runs: usize,
    pub scoring: ScoringRule,
    pub seed: u64,
    /// Abort on the first failed trial instead of skipping it.
    pub fail_fast: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            split: SplitOptions::default(),
            build: BuildOptions::default(),
            runs: 1,
            scoring: ScoringRule::default(),
            seed: 0,
            fail_fast: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BestTreeResult {
    pub tree: Tree,
    pub run: usize,
    pub node_count: usize,
    pub accuracy: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    pub run: usize,
    pub node_count: usize,
    pub evaluation: Evaluation,
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub best: Option<BestTreeResult>,
    /// Mean accuracy over the trials that completed.
    pub average_accuracy: Option<f64>,
    pub trials: Vec<TrialOutcome>,
    pub failed: usize,
}

fn run_trial<R>(dataset: &Dataset, options: &SearchOptions, rng: &mut R) -> Result<(Tree, Evaluation)>
where
    R: Rng + ?Sized,
{
    let split = stratified_split(dataset, &options.split, rng)?;
    let tree = builder::train(&split.train, &options.build)?;
    let evaluation = evaluate(split.test.rows(), &tree, dataset.target())?;
    Ok((tree, evaluation))
}

/// Trains `options.runs` trees on fresh splits and keeps the best scoring one.
/// Ties keep the earlier tree. A tree that classifies none of its test rows
/// correctly is never kept, whatever the scoring rule, so a search whose
/// trials all score zero reports no best tree.
pub fn best_tree_search(dataset: &Dataset, options: &SearchOptions) -> Result<SearchReport> {
    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut best: Option<BestTreeResult> = None;
    let mut trials = Vec::with_capacity(options.runs);
    let mut failed = 0;

    for run in 0..options.runs {
        let (tree, evaluation) = match run_trial(dataset, options, &mut rng) {
            Ok(trial) => trial,
            Err(err) if !options.fail_fast => {
                warn!("({} / {}) trial failed: {}", run + 1, options.runs, err);
                failed += 1;
                continue;
            }
            Err(err) => return Err(err),
        };
        let accuracy = evaluation.accuracy();
        let node_count = tree.node_count();
        info!(
            "({} / {}) valid: {}/{} ({:.2}%), {} nodes",
            run + 1,
            options.runs,
            evaluation.correct,
            evaluation.total,
            accuracy * 100.0,
            node_count
        );
        trials.push(TrialOutcome {
            run,
            node_count,
            evaluation,
        });
        if let Some(score) = options.scoring.score(accuracy, node_count) {
            if score > 0.0 && best.as_ref().map_or(true, |best| score > best.score) {
                best = Some(BestTreeResult {
                    tree,
                    run,
                    node_count,
                    accuracy,
                    score,
                });
            }
        }
    }

    let average_accuracy = if trials.is_empty() {
        None
    } else {
        Some(trials.iter().map(|t| t.evaluation.accuracy()).sum::<f64>() / trials.len() as f64)
    };
    match &best {
        Some(best) => info!(
            "best of {} runs in {:.2?}: {:.2}% accurate with {} nodes (run {})",
            options.runs,
            start.elapsed(),
            best.accuracy * 100.0,
            best.node_count,
            best.run + 1
        ),
        None => info!("no tree qualified after {} runs", options.runs),
    }
    Ok(SearchReport {
        best,
        average_accuracy,
        trials,
        failed,
    })
}
