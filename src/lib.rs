//! ID3 split selection over categorical tables.
//!
//! Shannon entropy, average information entropy of an attribute, and the
//! attribute with the highest information gain, plus a recursive builder
//! that turns a table into a decision tree.

mod cal_probabilities;
mod cal_shannon_entropy;
mod entries;
mod error;
mod id3_tree;
mod parser;

pub use cal_probabilities::{cal_value_probabilities, count_values};
pub use cal_shannon_entropy::{
    Count, Entropy, PROBABILITY_TOLERANCE, calculate_average_information_entropy,
    calculate_entropy,
};
pub use entries::{AttributeId, Entries, Row};
pub use error::{ErrorKind, Id3Error, Result};
pub use id3_tree::{DecisionTree, Node};
pub use parser::{ParsedTable, parse_rows, read_table};
