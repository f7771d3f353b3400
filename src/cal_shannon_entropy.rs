use crate::error::{Id3Error, Result};

pub type Count = usize;
pub type Entropy = f64;

/// Allowed deviation of a distribution's sum from 1.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Shannon entropy in bits of a probability distribution.
///
/// `probabilities[i]` is P(class i). Zero probabilities contribute nothing
/// (0 * log2(0) = 0).
///
/// # Errors
///
/// Returns [`Id3Error::InvalidProbabilitySum`] if the probabilities do not sum
/// to 1 within [`PROBABILITY_TOLERANCE`], or if any of them lies outside
/// `[0, 1]` or is NaN.
pub fn calculate_entropy(probabilities: &[f64]) -> Result<Entropy> {
    let sum: f64 = probabilities.iter().sum();
    let in_range = probabilities.iter().all(|p| (0.0..=1.0).contains(p));
    let sums_to_one = (sum - 1.0).abs() <= PROBABILITY_TOLERANCE;
    if !in_range || !sums_to_one {
        return Err(Id3Error::InvalidProbabilitySum { sum });
    }

    let entropy = probabilities
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum();
    Ok(entropy)
}

/// Weighted average of partition entropies, i.e. the conditional entropy of
/// the class given an attribute.
///
/// For an attribute `outlook` with values rainy, overcast and sunny:
///
/// ```text
/// I(outlook) = |rainy| / total * E(outlook = rainy)
///            + |overcast| / total * E(outlook = overcast)
///            + |sunny| / total * E(outlook = sunny)
/// ```
///
/// # Errors
///
/// Returns [`Id3Error::InvalidEntryCount`] if any partition count exceeds
/// `total_count`.
pub fn calculate_average_information_entropy(
    total_count: Count,
    count_entropy_pairs: &[(Count, Entropy)],
) -> Result<Entropy> {
    let mut average = 0.0;
    for &(count, entropy) in count_entropy_pairs {
        if count > total_count {
            return Err(Id3Error::InvalidEntryCount {
                count,
                total: total_count,
            });
        }
        if count > 0 {
            average += (count as f64 / total_count as f64) * entropy;
        }
    }
    Ok(average)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_entropy_of_certain_outcome_is_zero() {
        assert_eq!(calculate_entropy(&[1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_entropy_in_bits() {
        assert!(close(calculate_entropy(&[0.5, 0.5]).unwrap(), 1.0));
        assert!(close(calculate_entropy(&[0.25, 0.25, 0.25, 0.25]).unwrap(), 2.0));
    }

    #[test]
    fn test_zero_probabilities_are_skipped() {
        let entropy = calculate_entropy(&[0.0, 1.0, 0.0]).unwrap();
        assert_eq!(entropy, 0.0);
        assert!(!entropy.is_nan());

        let entropy = calculate_entropy(&[0.5, 0.0, 0.5]).unwrap();
        assert!(close(entropy, 1.0));
    }

    #[test]
    fn test_invalid_probability_sum() {
        let err = calculate_entropy(&[0.5, 0.49]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidProbabilitySum);

        let err = calculate_entropy(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidProbabilitySum);
    }

    #[test]
    fn test_nan_and_out_of_range_probabilities_are_rejected() {
        let err = calculate_entropy(&[f64::NAN]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidProbabilitySum);

        let err = calculate_entropy(&[0.5, f64::NAN, 0.5]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidProbabilitySum);

        // sums to exactly 1 but is not a distribution
        let err = calculate_entropy(&[1.5, -0.5]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidProbabilitySum);
    }

    #[test]
    fn test_rounding_error_within_tolerance_is_accepted() {
        // sums to 0.9999999998
        let probabilities = [0.4999999999, 0.4999999999];
        let entropy = calculate_entropy(&probabilities).unwrap();
        assert!((entropy - 1.0).abs() < 1e-6);

        let thirds = [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0];
        assert!(close(calculate_entropy(&thirds).unwrap(), 3f64.log2()));
    }

    #[test]
    fn test_average_information_entropy() {
        // PlayTennis, Outlook: sunny 2+/3-, overcast 4+/0-, rain 3+/2-
        let sunny = calculate_entropy(&[2.0 / 5.0, 3.0 / 5.0]).unwrap();
        let overcast = calculate_entropy(&[1.0]).unwrap();
        let rain = calculate_entropy(&[3.0 / 5.0, 2.0 / 5.0]).unwrap();

        let average =
            calculate_average_information_entropy(14, &[(5, sunny), (4, overcast), (5, rain)])
                .unwrap();
        assert!((average - 0.6935).abs() < 1e-3);
    }

    #[test]
    fn test_average_information_entropy_of_no_partitions_is_zero() {
        assert_eq!(calculate_average_information_entropy(0, &[]).unwrap(), 0.0);
        assert_eq!(calculate_average_information_entropy(3, &[(0, 1.0)]).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_entry_count() {
        let err = calculate_average_information_entropy(10, &[(11, 0.5)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEntryCount);
        match err {
            Id3Error::InvalidEntryCount { count, total } => {
                assert_eq!(count, 11);
                assert_eq!(total, 10);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
