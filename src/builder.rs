use crate::dataset::{DatasetView, Path};
use crate::entropy::{self, information_gain, NodeStatistics, Partition};
use crate::error::{Error, Result};
use crate::tree::{BranchNode, Edge, Node, NodeId, Tree};
use log::{debug, info};
use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;

/// How candidate attributes are counted at each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStrategy {
    /// One pass over the node's rows counts every candidate.
    SingleScan,
    /// One pass per candidate attribute.
    PerAttribute,
}

impl Default for ScanStrategy {
    fn default() -> Self {
        ScanStrategy::SingleScan
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub scan: ScanStrategy,
}

struct Pending<'a> {
    id: NodeId,
    path: Path,
    view: DatasetView<'a>,
}

/// Induces an ID3 tree from `view`, predicting the dataset's target column.
///
/// Nodes are expanded breadth first from an explicit queue, so ids are
/// handed out in the same order the nodes are built.
pub fn train(view: &DatasetView<'_>, options: &BuildOptions) -> Result<Tree> {
    if view.is_empty() {
        return Err(Error::invalid("cannot train on an empty dataset view"));
    }
    let start = Instant::now();
    let dataset = view.dataset();
    let target = dataset.target();
    let default_class = view
        .majority(target)
        .ok_or_else(|| Error::invalid("training rows have no target values"))?
        .to_owned();

    let mut nodes: Vec<Node> = Vec::new();
    let mut next_id = 1;
    let mut queue = VecDeque::new();
    queue.push_back(Pending {
        id: Tree::ROOT,
        path: Path::new(),
        view: view.clone(),
    });

    while let Some(Pending { id, path, view }) = queue.pop_front() {
        debug_assert_eq!(id.0, nodes.len());
        let candidates = dataset.candidates(&path);
        if candidates.is_empty() {
            let class = view
                .majority(target)
                .ok_or_else(|| Error::invalid("node has no target values"))?;
            debug!("node {}: attributes exhausted, majority `{}`", id.0, class);
            nodes.push(Node::Leaf {
                class: class.to_owned(),
            });
            continue;
        }

        let statistics = match options.scan {
            ScanStrategy::SingleScan => entropy::scan(&view, &candidates, target)?,
            ScanStrategy::PerAttribute => entropy::scan_per_attribute(&view, &candidates, target)?,
        };
        let (attribute, gain, partition) = best_split(&statistics)
            .ok_or_else(|| Error::invalid("no candidate attribute to split on"))?;
        debug!(
            "node {}: {} rows, H = {:.4}, split on `{}` (gain {:.4})",
            id.0,
            statistics.size,
            statistics.target_entropy,
            dataset.attributes()[attribute],
            gain
        );

        let mut edges = BTreeMap::new();
        for (&value, part) in partition {
            // A zero-entropy partition has exactly one target value.
            match part.sole_target() {
                Some(class) if part.entropy == 0.0 => {
                    edges.insert(value.to_owned(), Edge::Leaf(class.to_owned()));
                }
                _ => {
                    let child = NodeId(next_id);
                    next_id += 1;
                    let child_path = path.with(attribute, value)?;
                    let child_view = view.filter(&child_path);
                    edges.insert(value.to_owned(), Edge::Branch(child));
                    queue.push_back(Pending {
                        id: child,
                        path: child_path,
                        view: child_view,
                    });
                }
            }
        }
        nodes.push(Node::Branch(BranchNode { attribute, edges }));
    }

    info!(
        "built tree with {} nodes from {} rows in {:.2?}",
        nodes.len(),
        view.len(),
        start.elapsed()
    );
    Ok(Tree {
        nodes,
        attributes: dataset.attributes().to_vec(),
        target: dataset.target_name().to_owned(),
        default_class,
    })
}

/// Highest-gain candidate; the first one in candidate order wins ties.
fn best_split<'s, 'a>(statistics: &'s NodeStatistics<'a>) -> Option<(usize, f64, &'s Partition<'a>)> {
    let mut best: Option<(usize, f64, &Partition<'a>)> = None;
    for (attribute, partition) in &statistics.candidates {
        let gain = information_gain(partition, statistics.size, statistics.target_entropy);
        if best.map_or(true, |(_, best_gain, _)| gain > best_gain) {
            best = Some((*attribute, gain, partition));
        }
    }
    best
}
