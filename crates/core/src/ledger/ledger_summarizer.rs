use num_traits::Zero;
use rust_decimal::Decimal;

use super::LedgerSummary;
use crate::errors::{LedgerError, Result};
use crate::movements::{Movement, MovementClass};

/// Running totals for one side of the book, net of returns.
#[derive(Debug, Default, Clone, Copy)]
struct NetTotals {
    quantity: i64,
    value: Decimal,
}

impl NetTotals {
    fn apply(&mut self, movement: &Movement) -> Result<()> {
        let quantity = i64::from(movement.quantity);
        let (quantity, value) = if movement.movement_type.is_return() {
            (
                self.quantity.checked_sub(quantity),
                self.value.checked_sub(movement.amount),
            )
        } else {
            (
                self.quantity.checked_add(quantity),
                self.value.checked_add(movement.amount),
            )
        };
        self.quantity = quantity.ok_or(LedgerError::ValuationOverflow("net quantity"))?;
        self.value = value.ok_or(LedgerError::ValuationOverflow("net value"))?;
        Ok(())
    }
}

/// Aggregates purchase and sale totals for the period and derives average
/// cost, profit and margin.
///
/// Profit uses the period's own average purchase cost, not lot-matched cost.
/// Ratios with a zero denominator are zero. Totals that leave the `Decimal`
/// range are an error rather than a wrapped or truncated figure.
pub fn summarize_movements(movements: &[Movement]) -> Result<LedgerSummary> {
    let mut purchases = NetTotals::default();
    let mut sales = NetTotals::default();

    for movement in movements {
        match movement.movement_type.class() {
            MovementClass::Purchase => purchases.apply(movement)?,
            MovementClass::Sale => sales.apply(movement)?,
        }
    }

    let avg_cost = if purchases.quantity != 0 {
        purchases
            .value
            .checked_div(Decimal::from(purchases.quantity))
            .ok_or(LedgerError::ValuationOverflow("average cost"))?
    } else {
        Decimal::zero()
    };
    let profit = avg_cost
        .checked_mul(Decimal::from(sales.quantity))
        .and_then(|cost_of_sales| sales.value.checked_sub(cost_of_sales))
        .ok_or(LedgerError::ValuationOverflow("profit"))?;
    let margin_percent = if !sales.value.is_zero() {
        profit
            .checked_div(sales.value)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(LedgerError::ValuationOverflow("margin"))?
    } else {
        Decimal::zero()
    };

    Ok(LedgerSummary {
        total_purchase_qty: purchases.quantity,
        total_purchase_value: purchases.value,
        total_sale_qty: sales.quantity,
        total_sale_value: sales.value,
        avg_cost,
        profit,
        margin_percent,
    })
}
