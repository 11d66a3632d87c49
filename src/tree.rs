use crate::error::{Error, Result};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Outcome of one observed value of a branch node's attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    /// Every training row with this value had the same target value.
    Leaf(String),
    /// Rows with this value need further testing at the child node.
    Branch(NodeId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchNode {
    pub attribute: usize,
    pub edges: BTreeMap<String, Edge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Branch(BranchNode),
    /// Candidate attributes ran out before the rows became pure.
    Leaf { class: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) attributes: Vec<String>,
    pub(crate) target: String,
    pub(crate) default_class: String,
}

impl Tree {
    pub const ROOT: NodeId = NodeId(0);

    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn attribute_name(&self, attribute: usize) -> &str {
        &self.attributes[attribute]
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Majority target value of the training rows; returned for rows the
    /// tree cannot resolve.
    pub fn default_class(&self) -> &str {
        &self.default_class
    }

    /// Checks the arena of a tree that did not come from the builder: it must
    /// have a root, every attribute must index the header, and every branch
    /// edge must point at a later node so traversal always terminates.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::invalid("tree has no nodes"));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            let branch = match node {
                Node::Branch(branch) => branch,
                Node::Leaf { .. } => continue,
            };
            if branch.attribute >= self.attributes.len() {
                return Err(Error::invalid(format!(
                    "node {} tests attribute {} but the header has {} columns",
                    index,
                    branch.attribute,
                    self.attributes.len()
                )));
            }
            for (value, edge) in &branch.edges {
                if let Edge::Branch(child) = edge {
                    if child.0 <= index || child.0 >= self.nodes.len() {
                        return Err(Error::invalid(format!(
                            "node {} edge `{}` points at invalid node {}",
                            index, value, child.0
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Predicts the target value of `record`, whose values must be in the
    /// same column order as the training data. Values never seen during
    /// training fall back to [`Tree::default_class`].
    pub fn classify(&self, record: &Record) -> &str {
        let mut queue = VecDeque::new();
        queue.push_back(Self::ROOT);
        while let Some(id) = queue.pop_front() {
            match &self.nodes[id.0] {
                Node::Leaf { class } => return class,
                Node::Branch(branch) => {
                    let edge = record
                        .get(branch.attribute)
                        .and_then(|value| branch.edges.get(value));
                    match edge {
                        Some(Edge::Leaf(class)) => return class,
                        Some(Edge::Branch(child)) => queue.push_back(*child),
                        None => {}
                    }
                }
            }
        }
        &self.default_class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(entries: Vec<(&str, Edge)>) -> BTreeMap<String, Edge> {
        entries.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
    }

    fn sample() -> Tree {
        Tree {
            nodes: vec![
                Node::Branch(BranchNode {
                    attribute: 0,
                    edges: edges(vec![
                        ("sunny", Edge::Branch(NodeId(1))),
                        ("overcast", Edge::Leaf("yes".to_owned())),
                        ("rainy", Edge::Branch(NodeId(2))),
                    ]),
                }),
                Node::Branch(BranchNode {
                    attribute: 1,
                    edges: edges(vec![
                        ("high", Edge::Leaf("no".to_owned())),
                        ("normal", Edge::Leaf("yes".to_owned())),
                    ]),
                }),
                Node::Leaf {
                    class: "no".to_owned(),
                },
            ],
            attributes: vec!["outlook".to_owned(), "humidity".to_owned(), "play".to_owned()],
            target: "play".to_owned(),
            default_class: "yes".to_owned(),
        }
    }

    #[test]
    fn follows_branches_to_decisions() {
        let tree = sample();
        assert_eq!(tree.classify(&Record::new(vec!["overcast", "high", "?"])), "yes");
        assert_eq!(tree.classify(&Record::new(vec!["sunny", "high", "?"])), "no");
        assert_eq!(tree.classify(&Record::new(vec!["sunny", "normal", "?"])), "yes");
        assert_eq!(tree.classify(&Record::new(vec!["rainy", "normal", "?"])), "no");
    }

    #[test]
    fn unseen_value_falls_back_to_default() {
        let tree = sample();
        assert_eq!(tree.classify(&Record::new(vec!["foggy", "high", "?"])), "yes");
        assert_eq!(tree.classify(&Record::new(vec!["sunny", "damp", "?"])), "yes");
        assert_eq!(tree.classify(&Record::new(Vec::<String>::new())), "yes");
    }

    #[test]
    fn classification_is_repeatable() {
        let tree = sample();
        let record = Record::new(vec!["sunny", "high", "?"]);
        assert_eq!(tree.classify(&record), tree.classify(&record));
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn validate_accepts_well_formed_arena() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_broken_arenas() {
        let mut dangling = sample();
        dangling.nodes[1] = Node::Branch(BranchNode {
            attribute: 1,
            edges: edges(vec![("high", Edge::Branch(NodeId(7)))]),
        });
        assert!(matches!(dangling.validate(), Err(Error::InvalidInput(_))));

        let mut cycle = sample();
        cycle.nodes[1] = Node::Branch(BranchNode {
            attribute: 1,
            edges: edges(vec![("high", Edge::Branch(NodeId(0)))]),
        });
        assert!(cycle.validate().is_err());

        let mut wide = sample();
        wide.nodes[2] = Node::Branch(BranchNode {
            attribute: 9,
            edges: BTreeMap::new(),
        });
        assert!(wide.validate().is_err());

        let mut empty = sample();
        empty.nodes.clear();
        assert!(empty.validate().is_err());
    }
}
