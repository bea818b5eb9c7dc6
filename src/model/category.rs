use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{PayrollError, PayrollResult};

/// Employee category; selects the per-leave deduction applied to net salary.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[strum(to_string = "Standard")]
    Standard,
    #[strum(to_string = "FullTime", serialize = "full-time", serialize = "full_time")]
    FullTime,
    #[strum(to_string = "PartTime", serialize = "part-time", serialize = "part_time")]
    PartTime,
}

impl Category {
    pub const fn leave_deduction(self) -> f64 {
        match self {
            Category::Standard => 100.0,
            Category::FullTime => 150.0,
            Category::PartTime => 50.0,
        }
    }

    /// Maps the option index picked in the category prompt. The prompt lists
    /// Full-Time first, then Part-Time, then Standard.
    pub fn from_choice(choice: Option<usize>) -> PayrollResult<Self> {
        match choice {
            Some(0) => Ok(Category::FullTime),
            Some(1) => Ok(Category::PartTime),
            Some(2) => Ok(Category::Standard),
            _ => Err(PayrollError::SelectionCancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn deduction_rates() {
        assert_eq!(Category::Standard.leave_deduction(), 100.0);
        assert_eq!(Category::FullTime.leave_deduction(), 150.0);
        assert_eq!(Category::PartTime.leave_deduction(), 50.0);
    }

    #[test]
    fn parses_common_spellings() {
        assert_eq!(Category::from_str("fulltime").unwrap(), Category::FullTime);
        assert_eq!(Category::from_str("Full-Time").unwrap(), Category::FullTime);
        assert_eq!(Category::from_str("part_time").unwrap(), Category::PartTime);
        assert_eq!(Category::from_str("STANDARD").unwrap(), Category::Standard);
        assert!(Category::from_str("contractor").is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for category in Category::iter() {
            assert_eq!(Category::from_str(&category.to_string()).unwrap(), category);
        }
    }

    #[test]
    fn unknown_choice_cancels_selection() {
        assert_eq!(Category::from_choice(Some(0)).unwrap(), Category::FullTime);
        assert_eq!(Category::from_choice(Some(1)).unwrap(), Category::PartTime);
        assert!(matches!(
            Category::from_choice(None),
            Err(PayrollError::SelectionCancelled)
        ));
        assert!(matches!(
            Category::from_choice(Some(7)),
            Err(PayrollError::SelectionCancelled)
        ));
    }
}
