use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Result, ValidationError};
use crate::movements::{Movement, MovementType};

/// Stock ledger request as received from callers. Every field may be absent
/// until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLedgerRequest {
    pub item_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl StockLedgerRequest {
    pub fn new(item_id: i64, date_from: NaiveDate, date_to: NaiveDate) -> Self {
        StockLedgerRequest {
            item_id: Some(item_id),
            date_from: Some(date_from),
            date_to: Some(date_to),
        }
    }

    /// Rejects missing items and inverted ranges before any source is queried.
    pub fn validate(&self) -> Result<LedgerQuery> {
        let item_id = self
            .item_id
            .ok_or_else(|| ValidationError::MissingField("itemId".to_string()))?;
        if item_id <= 0 {
            return Err(ValidationError::InvalidInput(format!(
                "itemId must be a positive id, got {}",
                item_id
            ))
            .into());
        }
        let date_from = self
            .date_from
            .ok_or_else(|| ValidationError::MissingField("dateFrom".to_string()))?;
        let date_to = self
            .date_to
            .ok_or_else(|| ValidationError::MissingField("dateTo".to_string()))?;
        if date_from > date_to {
            return Err(ValidationError::InvalidDateRange {
                from: date_from,
                to: date_to,
            }
            .into());
        }
        Ok(LedgerQuery {
            item_id,
            date_from,
            date_to,
        })
    }
}

/// A validated request. Also the ledger cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerQuery {
    pub item_id: i64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// A movement with the stock on hand after it has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    #[serde(flatten)]
    pub movement: Movement,
    pub balance: i64,
}

/// Period totals for one item. Purchase and sale figures are net of returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total_purchase_qty: i64,
    pub total_purchase_value: Decimal,
    pub total_sale_qty: i64,
    pub total_sale_value: Decimal,
    pub avg_cost: Decimal,
    pub profit: Decimal,
    pub margin_percent: Decimal,
}

impl LedgerSummary {
    /// Rounds the derived ratios for display. Totals are left untouched.
    pub fn rounded(mut self) -> Self {
        self.avg_cost = self.avg_cost.round_dp(DISPLAY_DECIMAL_PRECISION);
        self.profit = self.profit.round_dp(DISPLAY_DECIMAL_PRECISION);
        self.margin_percent = self.margin_percent.round_dp(DISPLAY_DECIMAL_PRECISION);
        self
    }

    pub fn is_zero(&self) -> bool {
        *self == LedgerSummary::default()
    }
}

/// One row of the report table, with the quantity split into in/out columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransaction {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub ref_id: String,
    pub qty_in: u32,
    pub qty_out: u32,
    pub amount: Decimal,
    pub balance: i64,
}

impl From<LedgerRow> for LedgerTransaction {
    fn from(row: LedgerRow) -> Self {
        let movement = row.movement;
        let (qty_in, qty_out) = if movement.movement_type.is_inflow() {
            (movement.quantity, 0)
        } else {
            (0, movement.quantity)
        };
        LedgerTransaction {
            date: movement.date,
            movement_type: movement.movement_type,
            ref_id: movement.reference_id,
            qty_in,
            qty_out,
            amount: movement.amount,
            balance: row.balance,
        }
    }
}

/// The stock ledger report handed to the presentation and export layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLedgerReport {
    pub item_id: i64,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub opening_stock: i64,
    pub closing_stock: i64,
    pub transactions: Vec<LedgerTransaction>,
    pub summary: LedgerSummary,
}

impl StockLedgerReport {
    pub fn assemble(
        query: &LedgerQuery,
        opening_stock: i64,
        rows: Vec<LedgerRow>,
        summary: LedgerSummary,
    ) -> Self {
        let closing_stock = rows.last().map_or(opening_stock, |row| row.balance);
        StockLedgerReport {
            item_id: query.item_id,
            date_from: query.date_from,
            date_to: query.date_to,
            opening_stock,
            closing_stock,
            transactions: rows.into_iter().map(LedgerTransaction::from).collect(),
            summary: summary.rounded(),
        }
    }
}

/// Quantity on hand at the end of a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockOnHand {
    pub item_id: i64,
    pub as_of: NaiveDate,
    pub quantity: i64,
}
