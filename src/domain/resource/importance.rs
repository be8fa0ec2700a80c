//! Importance ranking of a status update.
//!
//! Importance is stored in the `chips_available` column as free text. Known levels
//! rank `critical` > `high` > `medium` > `low`; anything else ranks 0.

/// Returns the rank of an importance label, matching case-insensitively. Surrounding
/// whitespace makes a label unknown.
pub fn importance_rank(label: &str) -> u8 {
    match label.to_ascii_lowercase().as_str() {
        "critical" => 4,
        "high" => 3,
        "medium" => 2,
        "low" => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_are_ordered() {
        assert_eq!(importance_rank("critical"), 4);
        assert_eq!(importance_rank("high"), 3);
        assert_eq!(importance_rank("medium"), 2);
        assert_eq!(importance_rank("low"), 1);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(importance_rank("CRITICAL"), 4);
        assert_eq!(importance_rank("High"), 3);
    }

    #[test]
    fn unknown_or_empty_ranks_zero() {
        assert_eq!(importance_rank(""), 0);
        assert_eq!(importance_rank("12 chips left"), 0);
        assert_eq!(importance_rank(" high "), 0);
    }
}
