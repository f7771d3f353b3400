use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use crate::cal_probabilities::{cal_value_probabilities, count_values};
use crate::cal_shannon_entropy::{
    Count, Entropy, calculate_average_information_entropy, calculate_entropy,
};
use crate::error::{Id3Error, Result};

/// Zero-based index over attribute columns; the class column is not counted.
pub type AttributeId = usize;

/// One record: field 0 is the class label, fields 1.. are attribute values.
pub type Row = Vec<String>;

const CLASS_COLUMN: usize = 0;

fn column_of(attribute_id: AttributeId) -> usize {
    attribute_id + 1
}

/// Immutable table of categorical rows.
///
/// All rows are expected to have the same length; the table parser enforces
/// this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entries {
    data: Vec<Row>,
}

impl Entries {
    pub fn new(data: Vec<Row>) -> Self {
        Entries { data }
    }

    pub fn rows(&self) -> &[Row] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of attribute columns, taken from the first row.
    pub fn attribute_count(&self) -> usize {
        self.data
            .first()
            .map(|row| row.len().saturating_sub(1))
            .unwrap_or(0)
    }

    /// All distinct class labels (field 0).
    pub fn classes(&self) -> BTreeSet<&str> {
        self.class_labels().collect()
    }

    pub fn are_all_entries_with_same_class(&self) -> bool {
        self.classes().len() == 1
    }

    /// Most frequent class label; ties go to the smallest label.
    pub fn majority_class(&self) -> Option<&str> {
        let class_counts = count_values(self.class_labels());
        let mut majority: Option<(&str, Count)> = None;
        for (class, count) in class_counts {
            match majority {
                Some((_, best)) if count <= best => {}
                _ => majority = Some((class, count)),
            }
        }
        majority.map(|(class, _)| class)
    }

    /// Class distribution of the whole table, one probability per class in
    /// label order.
    pub fn class_probabilities(&self) -> Vec<f64> {
        cal_value_probabilities(self.class_labels())
    }

    /// E(S), the class entropy of the whole table.
    pub fn entropy(&self) -> Result<Entropy> {
        calculate_entropy(&self.class_probabilities())
    }

    /// Number of rows whose value for `attribute_id` equals `value`.
    pub fn count_entries_by_attribute(&self, attribute_id: AttributeId, value: &str) -> Count {
        self.rows_with_value(attribute_id, value).count()
    }

    /// Distinct values observed in the column of `attribute_id`.
    pub fn all_possible_attribute_values(&self, attribute_id: AttributeId) -> BTreeSet<&str> {
        self.data
            .iter()
            .filter_map(|row| row.get(column_of(attribute_id)))
            .map(String::as_str)
            .collect()
    }

    /// E(A=x), e.g. E(Outlook=sunny): class entropy of the rows where the
    /// attribute takes `value`. A value with no rows has entropy 0.
    pub fn attribute_entropy(&self, attribute_id: AttributeId, value: &str) -> Result<Entropy> {
        let probabilities = cal_value_probabilities(
            self.rows_with_value(attribute_id, value)
                .map(|row| row[CLASS_COLUMN].as_str()),
        );
        if probabilities.is_empty() {
            return Ok(0.0);
        }
        let entropy = calculate_entropy(&probabilities)?;
        trace!("E(attr{attribute_id}={value}) = {entropy:.6}");
        Ok(entropy)
    }

    /// I(A), the average information entropy left after splitting on
    /// `attribute_id`.
    pub fn attribute_average_information_entropy(
        &self,
        attribute_id: AttributeId,
    ) -> Result<Entropy> {
        let pairs = self
            .all_possible_attribute_values(attribute_id)
            .into_iter()
            .map(|value| -> Result<(Count, Entropy)> {
                let count = self.count_entries_by_attribute(attribute_id, value);
                Ok((count, self.attribute_entropy(attribute_id, value)?))
            })
            .collect::<Result<Vec<_>>>()?;
        calculate_average_information_entropy(self.len(), &pairs)
    }

    /// Gain(A) = E(S) - I(A).
    pub fn information_gain(&self, attribute_id: AttributeId) -> Result<f64> {
        Ok(self.entropy()? - self.attribute_average_information_entropy(attribute_id)?)
    }

    /// The attribute with maximal information gain over all attribute
    /// columns. The lowest id wins ties.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::EmptyDataset`] on zero rows and
    /// [`Id3Error::NoAttributes`] when rows carry only a class column.
    pub fn attribute_with_highest_information_gain(&self) -> Result<AttributeId> {
        if self.is_empty() {
            return Err(Id3Error::EmptyDataset);
        }
        let candidates: Vec<AttributeId> = (0..self.attribute_count()).collect();
        self.attribute_with_highest_information_gain_among(&candidates)
    }

    /// Same as [`Self::attribute_with_highest_information_gain`], restricted
    /// to `candidates`. Ties go to the lowest id regardless of candidate
    /// order.
    pub fn attribute_with_highest_information_gain_among(
        &self,
        candidates: &[AttributeId],
    ) -> Result<AttributeId> {
        if self.is_empty() {
            return Err(Id3Error::EmptyDataset);
        }
        let attribute_count = self.attribute_count();
        if attribute_count == 0 || candidates.is_empty() {
            return Err(Id3Error::NoAttributes);
        }
        if let Some(&attribute_id) = candidates.iter().find(|&&id| id >= attribute_count) {
            return Err(Id3Error::AttributeOutOfRange {
                attribute_id,
                attribute_count,
            });
        }

        let mut ordered = candidates.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        let base_entropy = self.entropy()?;
        let mut best: Option<(AttributeId, f64)> = None;
        for attribute_id in ordered {
            let gain = base_entropy - self.attribute_average_information_entropy(attribute_id)?;
            debug!("Gain(attr{attribute_id}) = {gain:.6}");
            match best {
                Some((_, best_gain)) if gain <= best_gain => {}
                _ => best = Some((attribute_id, gain)),
            }
        }

        let (attribute_id, gain) = best.ok_or(Id3Error::NoAttributes)?;
        debug!("selected attr{attribute_id} with gain {gain:.6}");
        Ok(attribute_id)
    }

    /// Split rows by their value for `attribute_id`. Children keep every
    /// column so attribute ids remain valid in them.
    pub fn partition(&self, attribute_id: AttributeId) -> BTreeMap<String, Entries> {
        let mut children: BTreeMap<String, Entries> = BTreeMap::new();
        for row in &self.data {
            if let Some(value) = row.get(column_of(attribute_id)) {
                children
                    .entry(value.clone())
                    .or_default()
                    .data
                    .push(row.clone());
            }
        }
        children
    }

    fn class_labels(&self) -> impl Iterator<Item = &str> {
        self.data
            .iter()
            .filter_map(|row| row.get(CLASS_COLUMN))
            .map(String::as_str)
    }

    fn rows_with_value<'a>(
        &'a self,
        attribute_id: AttributeId,
        value: &'a str,
    ) -> impl Iterator<Item = &'a Row> {
        self.data
            .iter()
            .filter(move |row| row.get(column_of(attribute_id)).map(String::as_str) == Some(value))
    }
}

impl From<Vec<Row>> for Entries {
    fn from(data: Vec<Row>) -> Self {
        Entries::new(data)
    }
}
