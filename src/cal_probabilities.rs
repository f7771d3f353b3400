use std::collections::BTreeMap;

use crate::cal_shannon_entropy::Count;

/// Count occurrences of each distinct value, ordered by value.
pub fn count_values<'a, I>(values: I) -> BTreeMap<&'a str, Count>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut value_counts: BTreeMap<&'a str, Count> = BTreeMap::new();
    for value in values {
        *value_counts.entry(value).or_insert(0) += 1;
    }
    value_counts
}

/// Relative frequency of each distinct value, in value order.
///
/// Returns an empty vector when `values` is empty.
pub fn cal_value_probabilities<'a, I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    let value_counts = count_values(values);
    let total_count: Count = value_counts.values().sum();

    if total_count == 0 {
        return Vec::new();
    }

    let total_f64 = total_count as f64;
    value_counts
        .values()
        .map(|&count| count as f64 / total_f64)
        .collect()
}
