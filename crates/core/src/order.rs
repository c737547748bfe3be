//! Deterministic ordering of enriched rows.

use std::cmp::Ordering;

use crate::types::EnrichedRow;

/// Sorts rows by `(expiry, ticker, strike)` ascending.
///
/// The sort is stable: rows sharing the full key keep the order the
/// parser emitted them in.
pub fn sort_rows(rows: &mut [EnrichedRow]) {
    rows.sort_by(compare);
}

fn compare(a: &EnrichedRow, b: &EnrichedRow) -> Ordering {
    let a = &a.record;
    let b = &b.record;
    a.expiry
        .cmp(&b.expiry)
        .then_with(|| a.ticker.cmp(&b.ticker))
        .then_with(|| a.strike.cmp(&b.strike))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OptionRight, PositionRecord, Side};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn row(ticker: &str, strike: Decimal, expiry: (i32, u32, u32), qty: Decimal) -> EnrichedRow {
        EnrichedRow {
            record: PositionRecord {
                side: Side::Long,
                right: OptionRight::Put,
                ticker: ticker.to_string(),
                quantity: qty,
                strike,
                expiry: NaiveDate::from_ymd_opt(expiry.0, expiry.1, expiry.2).unwrap(),
            },
            spot: dec!(100),
            in_the_money: false,
            dist_to_atm: dec!(0),
            pct_to_atm: dec!(0),
        }
    }

    fn keys(rows: &[EnrichedRow]) -> Vec<(String, Decimal)> {
        rows.iter()
            .map(|r| (r.record.ticker.clone(), r.record.strike))
            .collect()
    }

    #[test]
    fn test_orders_by_expiry_then_ticker_then_strike() {
        let mut rows = vec![
            row("MSFT", dec!(300), (2024, 2, 16), dec!(1)),
            row("AAPL", dec!(155), (2024, 1, 12), dec!(1)),
            row("MSFT", dec!(290), (2024, 1, 12), dec!(1)),
            row("AAPL", dec!(150), (2024, 1, 12), dec!(1)),
        ];
        sort_rows(&mut rows);
        assert_eq!(
            keys(&rows),
            vec![
                ("AAPL".to_string(), dec!(150)),
                ("AAPL".to_string(), dec!(155)),
                ("MSFT".to_string(), dec!(290)),
                ("MSFT".to_string(), dec!(300)),
            ]
        );
    }

    #[test]
    fn test_sort_is_deterministic() {
        let mut a = vec![
            row("MSFT", dec!(300), (2024, 2, 16), dec!(1)),
            row("AAPL", dec!(150), (2024, 1, 12), dec!(1)),
            row("AAPL", dec!(145), (2024, 3, 15), dec!(1)),
        ];
        let mut b = a.clone();
        sort_rows(&mut a);
        sort_rows(&mut b);
        assert_eq!(a, b);
        // Sorting an already-sorted set is a no-op.
        let again = {
            let mut c = a.clone();
            sort_rows(&mut c);
            c
        };
        assert_eq!(a, again);
    }

    #[test]
    fn test_full_key_ties_keep_emission_order() {
        // Same contract key, distinguishable by quantity.
        let mut rows = vec![
            row("AAPL", dec!(150), (2024, 1, 12), dec!(7)),
            row("AAPL", dec!(150), (2024, 1, 12), dec!(2)),
        ];
        sort_rows(&mut rows);
        assert_eq!(rows[0].record.quantity, dec!(7));
        assert_eq!(rows[1].record.quantity, dec!(2));
    }

    #[test]
    fn test_distinct_keys_never_compare_equal() {
        let a = row("AAPL", dec!(150), (2024, 1, 12), dec!(1));
        let b = row("AAPL", dec!(150.5), (2024, 1, 12), dec!(1));
        let c = row("AAPL", dec!(150), (2024, 1, 13), dec!(1));
        assert_ne!(compare(&a, &b), Ordering::Equal);
        assert_ne!(compare(&a, &c), Ordering::Equal);
        assert_ne!(compare(&b, &c), Ordering::Equal);
    }
}
