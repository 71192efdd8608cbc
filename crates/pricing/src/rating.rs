//! Rating aggregation.

/// Arithmetic mean of a rating collection, rounded to 1 decimal place.
///
/// An empty collection averages to 0. Values are taken as stored; range
/// enforcement belongs to the write boundary.
pub fn average_rating(values: &[i32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: i64 = values.iter().map(|&v| v as i64).sum();
    let mean = sum as f64 / values.len() as f64;
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn mean_rounded_to_one_decimal() {
        assert_eq!(average_rating(&[4, 5]), 4.5);
        assert_eq!(average_rating(&[1, 1, 1]), 1.0);
        // 11/3 = 3.666... -> 3.7
        assert_eq!(average_rating(&[3, 4, 4]), 3.7);
        // 10/3 = 3.333... -> 3.3
        assert_eq!(average_rating(&[3, 3, 4]), 3.3);
    }
}
