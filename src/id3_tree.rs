use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::entries::{AttributeId, Entries};
use crate::error::{Id3Error, Result};

/// Node of a decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Terminal node carrying the predicted class.
    Leaf { class: String },
    /// Internal node splitting on an attribute, one branch per observed value.
    Split {
        attribute_id: AttributeId,
        branches: BTreeMap<String, Node>,
    },
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Split { branches, .. } => {
                1 + branches.values().map(Node::depth).max().unwrap_or(0)
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { branches, .. } => branches.values().map(Node::leaf_count).sum(),
        }
    }
}

/// Decision tree induced with ID3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    attribute_names: Vec<String>,
    root: Node,
}

impl DecisionTree {
    /// Build a tree from `entries`. `attribute_names[i]` names attribute `i`;
    /// missing names render as `attr{i}`.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::EmptyDataset`] when `entries` has no rows, and
    /// propagates entropy errors from split selection.
    pub fn build(entries: &Entries, attribute_names: &[String]) -> Result<Self> {
        if entries.is_empty() {
            return Err(Id3Error::EmptyDataset);
        }

        let attribute_names: Vec<String> = (0..entries.attribute_count())
            .map(|id| {
                attribute_names
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| format!("attr{id}"))
            })
            .collect();
        let attributes: Vec<AttributeId> = (0..entries.attribute_count()).collect();

        let root = Self::build_tree(entries, &attributes, "")?;
        info!(
            "built decision tree over {} entries: depth {}, {} leaves",
            entries.len(),
            root.depth(),
            root.leaf_count()
        );
        Ok(DecisionTree {
            attribute_names,
            root,
        })
    }

    fn build_tree(
        entries: &Entries,
        attributes: &[AttributeId],
        parent_majority: &str,
    ) -> Result<Node> {
        if entries.is_empty() {
            return Ok(Node::Leaf {
                class: parent_majority.to_string(),
            });
        }

        let majority = entries.majority_class().unwrap_or(parent_majority).to_string();

        if entries.are_all_entries_with_same_class() || attributes.is_empty() {
            return Ok(Node::Leaf { class: majority });
        }

        let best = entries.attribute_with_highest_information_gain_among(attributes)?;
        debug!("splitting {} entries on attr{best}", entries.len());

        let remaining: Vec<AttributeId> = attributes
            .iter()
            .copied()
            .filter(|&id| id != best)
            .collect();

        let mut branches = BTreeMap::new();
        for (value, subset) in entries.partition(best) {
            let child = Self::build_tree(&subset, &remaining, &majority)?;
            branches.insert(value, child);
        }

        Ok(Node::Split {
            attribute_id: best,
            branches,
        })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    pub fn attribute_name(&self, attribute_id: AttributeId) -> &str {
        self.attribute_names
            .get(attribute_id)
            .map(String::as_str)
            .unwrap_or("?")
    }

    /// Predict the class of a record given its attribute values (class column
    /// excluded). Returns `None` when the record carries a value no training
    /// row had at some split, or is too short.
    pub fn predict(&self, attributes: &[&str]) -> Option<&str> {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { class } => return Some(class.as_str()),
                Node::Split {
                    attribute_id,
                    branches,
                } => {
                    let value = attributes.get(*attribute_id)?;
                    node = branches.get(*value)?;
                }
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| Id3Error::SerializeTree { source })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Id3Error::SerializeTree { source })
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match node {
            Node::Leaf { class } => writeln!(f, "{indent}=> {class}"),
            Node::Split {
                attribute_id,
                branches,
            } => {
                let name = self.attribute_name(*attribute_id);
                for (value, child) in branches {
                    writeln!(f, "{indent}{name} = {value}")?;
                    self.fmt_node(f, child, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, &self.root, 0)
    }
}
