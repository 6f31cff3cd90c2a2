use rust_decimal::Decimal;
use tradebook_model::{
    enums::PipelineKind,
    error::ReportError,
    ledger::Ledger,
    summary::SummaryStats,
};

/// Computes [`SummaryStats`] from a [`Ledger`]. Cost basis uses BUY rows only, fees use
/// every row.
#[derive(Debug, Copy, Clone, Default)]
pub struct Aggregator;

impl Aggregator {
    /// Fails with [`ReportError::Overflow`] when a sum or product does not fit a decimal.
    pub fn summarise(ledger: &Ledger, current_price: Option<Decimal>) -> Result<SummaryStats, ReportError> {
        let (total_buy_quantity, total_buy_cost) = ledger.buys().try_fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(quantity, cost), row| -> Result<_, ReportError> {
                Ok((
                    checked_sum(quantity, row.quantity, "total buy quantity")?,
                    checked_sum(cost, row.total, "total buy cost")?,
                ))
            },
        )?;

        let average_cost = Self::average_cost(total_buy_cost, total_buy_quantity)?;

        let total_fees = ledger
            .rows
            .iter()
            .try_fold(Decimal::ZERO, |fees, row| checked_sum(fees, row.fee, "total fees"))?;

        let unrealized_pnl = current_price
            .map(|price| {
                price
                    .checked_sub(average_cost)
                    .and_then(|gain| gain.checked_mul(total_buy_quantity))
                    .ok_or(ReportError::Overflow("unrealized P/L"))
            })
            .transpose()?;

        Ok(SummaryStats {
            total_buy_quantity,
            total_buy_cost,
            average_cost,
            total_fees,
            fee_asset: ledger.rows.first().map(|row| row.fee_asset.clone()),
            fees_estimated: ledger.kind == PipelineKind::Orders,
            unrealized_pnl,
        })
    }

    /// Weighted average price, zero when nothing was bought.
    pub fn average_cost(total_cost: Decimal, total_quantity: Decimal) -> Result<Decimal, ReportError> {
        if total_quantity > Decimal::ZERO {
            total_cost
                .checked_div(total_quantity)
                .ok_or(ReportError::Overflow("average cost"))
        } else {
            Ok(Decimal::ZERO)
        }
    }
}

pub(crate) fn checked_sum(lhs: Decimal, rhs: Decimal, what: &'static str) -> Result<Decimal, ReportError> {
    lhs.checked_add(rhs).ok_or(ReportError::Overflow(what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tradebook_model::{
        enums::{Resolution, Side},
        instruments::Symbol,
        ledger::LedgerRow,
    };

    fn row(side: Side, quantity: Decimal, unit_price: Decimal, fee: Decimal, fee_asset: &str) -> LedgerRow {
        LedgerRow {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap(),
            side,
            unit_price,
            quantity,
            total: quantity * unit_price,
            fee,
            fee_asset: Symbol::new(fee_asset),
        }
    }

    fn fills(rows: Vec<LedgerRow>) -> Ledger {
        Ledger::new(PipelineKind::Fills, Resolution::Time, rows)
    }

    #[test]
    fn test_summarise_with_live_price() {
        let ledger = fills(vec![
            row(Side::Buy, dec!(1), dec!(100), dec!(0.001), "bnb"),
            row(Side::Buy, dec!(1), dec!(200), dec!(0.002), "bnb"),
        ]);

        let actual = Aggregator::summarise(&ledger, Some(dec!(300))).unwrap();

        assert_eq!(actual.total_buy_quantity, dec!(2));
        assert_eq!(actual.total_buy_cost, dec!(300));
        assert_eq!(actual.average_cost, dec!(150));
        assert_eq!(actual.total_fees, dec!(0.003));
        assert_eq!(actual.unrealized_pnl, Some(dec!(300)));
        assert_eq!(actual.fee_asset, Some(Symbol::new("bnb")));
        assert!(!actual.fees_estimated);
    }

    #[test]
    fn test_summarise_without_price_omits_pnl() {
        let ledger = fills(vec![row(Side::Buy, dec!(1), dec!(100), dec!(0), "bnb")]);

        let actual = Aggregator::summarise(&ledger, None).unwrap();

        assert_eq!(actual.average_cost, dec!(100));
        assert_eq!(actual.unrealized_pnl, None);
    }

    #[test]
    fn test_summarise_sells_only_count_towards_fees() {
        let ledger = fills(vec![
            row(Side::Sell, dec!(0.5), dec!(250), dec!(0.1), "usdt"),
            row(Side::Buy, dec!(2), dec!(100), dec!(0.2), "bnb"),
            row(Side::Sell, dec!(0.5), dec!(260), dec!(0.3), "bnb"),
        ]);

        let actual = Aggregator::summarise(&ledger, Some(dec!(90))).unwrap();

        assert_eq!(actual.total_buy_quantity, dec!(2));
        assert_eq!(actual.total_buy_cost, dec!(200));
        assert_eq!(actual.average_cost, dec!(100));
        assert_eq!(actual.total_fees, dec!(0.6));
        // First row labels the fee asset, mixed assets are not converted
        assert_eq!(actual.fee_asset, Some(Symbol::new("usdt")));
        assert_eq!(actual.unrealized_pnl, Some(dec!(-20)));
    }

    #[test]
    fn test_summarise_without_buys_has_zero_average_cost() {
        struct TestCase {
            input: Ledger,
            expected_fees: Decimal,
        }

        let cases = vec![
            TestCase {
                // TC0: empty ledger
                input: fills(vec![]),
                expected_fees: Decimal::ZERO,
            },
            TestCase {
                // TC1: sells only
                input: fills(vec![row(Side::Sell, dec!(1), dec!(100), dec!(0.1), "bnb")]),
                expected_fees: dec!(0.1),
            },
            TestCase {
                // TC2: zero quantity buy
                input: fills(vec![row(Side::Buy, dec!(0), dec!(100), dec!(0), "bnb")]),
                expected_fees: Decimal::ZERO,
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let actual = Aggregator::summarise(&test.input, Some(dec!(500))).unwrap();
            assert_eq!(actual.average_cost, Decimal::ZERO, "TC{} failed", index);
            assert_eq!(actual.total_fees, test.expected_fees, "TC{} failed", index);
            assert_eq!(actual.unrealized_pnl, Some(Decimal::ZERO), "TC{} failed", index);
        }
    }

    #[test]
    fn test_summarise_orders_marks_fees_estimated() {
        let ledger = Ledger::new(
            PipelineKind::Orders,
            Resolution::Day,
            vec![row(Side::Buy, dec!(10), dec!(34), dec!(0.025), "usdt")],
        );

        let actual = Aggregator::summarise(&ledger, None).unwrap();

        assert!(actual.fees_estimated);
        assert_eq!(actual.total_buy_cost, dec!(340));
        assert_eq!(actual.average_cost, dec!(34));
    }

    #[test]
    fn test_summarise_overflow() {
        struct TestCase {
            input: Ledger,
            current_price: Option<Decimal>,
            expected: &'static str,
        }

        let cases = vec![
            TestCase {
                // TC0: buy quantities do not fit a decimal
                input: fills(vec![
                    row(Side::Buy, Decimal::MAX, dec!(0), dec!(0), "bnb"),
                    row(Side::Buy, Decimal::MAX, dec!(0), dec!(0), "bnb"),
                ]),
                current_price: None,
                expected: "total buy quantity",
            },
            TestCase {
                // TC1: fees of both sides do not fit a decimal
                input: fills(vec![
                    row(Side::Sell, dec!(1), dec!(1), Decimal::MAX, "bnb"),
                    row(Side::Buy, dec!(1), dec!(1), Decimal::MAX, "bnb"),
                ]),
                current_price: None,
                expected: "total fees",
            },
            TestCase {
                // TC2: tiny quantity bought at the largest total
                input: fills(vec![LedgerRow {
                    total: Decimal::MAX,
                    ..row(Side::Buy, dec!(0.0000000000000000000000000001), dec!(0), dec!(0), "bnb")
                }]),
                current_price: None,
                expected: "average cost",
            },
            TestCase {
                // TC3: P/L of a huge position
                input: fills(vec![LedgerRow {
                    total: Decimal::MAX,
                    ..row(Side::Buy, Decimal::MAX, dec!(1), dec!(0), "bnb")
                }]),
                current_price: Some(dec!(10)),
                expected: "unrealized P/L",
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            match Aggregator::summarise(&test.input, test.current_price) {
                Err(ReportError::Overflow(what)) => assert_eq!(what, test.expected, "TC{} failed", index),
                other => panic!("TC{index} failed: {other:?}"),
            }
        }
    }
}
