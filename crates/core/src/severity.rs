//! Severity bucketing for display emphasis.

use rust_decimal::Decimal;

use crate::types::{DisplayRow, EnrichedRow, Severity};

/// Classifies a row into its severity bucket. Rules are evaluated in
/// order and the first match wins:
///
/// 1. `Critical` — percent-to-ATM at or below zero, or in the money.
/// 2. `Warning` — within 1% of at-the-money.
/// 3. `Caution` — within 2% of at-the-money.
/// 4. `Normal` — otherwise.
#[must_use]
pub fn classify(in_the_money: bool, pct_to_atm: Decimal) -> Severity {
    if in_the_money || pct_to_atm <= Decimal::ZERO {
        Severity::Critical
    } else if pct_to_atm.abs() <= Decimal::ONE {
        Severity::Warning
    } else if pct_to_atm.abs() <= Decimal::TWO {
        Severity::Caution
    } else {
        Severity::Normal
    }
}

/// Attaches a severity tag and a stable row key to each ordered row.
#[must_use]
pub fn classify_rows(rows: Vec<EnrichedRow>) -> Vec<DisplayRow> {
    rows.into_iter()
        .map(|row| {
            let key = row.record.key();
            let severity = classify(row.in_the_money, row.pct_to_atm);
            DisplayRow { key, row, severity }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_itm_is_critical_regardless_of_pct() {
        assert_eq!(classify(true, dec!(5.00)), Severity::Critical);
    }

    #[test]
    fn test_non_positive_pct_is_critical() {
        assert_eq!(classify(false, dec!(0)), Severity::Critical);
        assert_eq!(classify(false, dec!(-1.69)), Severity::Critical);
    }

    #[test]
    fn test_within_one_percent_is_warning() {
        assert_eq!(classify(false, dec!(0.5)), Severity::Warning);
        assert_eq!(classify(false, dec!(1.00)), Severity::Warning);
    }

    #[test]
    fn test_within_two_percent_is_caution() {
        assert_eq!(classify(false, dec!(1.01)), Severity::Caution);
        assert_eq!(classify(false, dec!(2.00)), Severity::Caution);
    }

    #[test]
    fn test_far_from_atm_is_normal() {
        assert_eq!(classify(false, dec!(2.01)), Severity::Normal);
        assert_eq!(classify(false, dec!(35)), Severity::Normal);
    }
}
