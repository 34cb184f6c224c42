//! Database model for one document line seen as a stock movement.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use stockledger_core::errors::{DatabaseError, Error, Result};
use stockledger_core::movements::{Movement, MovementType};

/// Document date and reference joined with one of its lines.
#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct MovementLineDB {
    pub document_date: String,
    pub reference_no: String,
    pub line_id: i64,
    pub quantity: i64,
    pub amount: String,
}

impl MovementLineDB {
    /// Maps the line onto a movement of `movement_type`. Negative or malformed
    /// stored values are an error, not something to skip.
    pub fn into_movement(self, movement_type: MovementType) -> Result<Movement> {
        let invalid = |reason: String| {
            Error::Database(DatabaseError::InvalidData(format!(
                "{} line {} ({}): {}",
                movement_type, self.line_id, self.reference_no, reason
            )))
        };

        let date = NaiveDate::parse_from_str(&self.document_date, "%Y-%m-%d")
            .map_err(|e| invalid(format!("date '{}': {}", self.document_date, e)))?;
        // Window bounds are compared as text, so only the canonical form sorts correctly.
        if date_key(date) != self.document_date {
            return Err(invalid(format!(
                "date '{}' is not in YYYY-MM-DD form",
                self.document_date
            )));
        }
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| invalid(format!("quantity {} out of range", self.quantity)))?;
        let amount = Decimal::from_str(&self.amount)
            .map_err(|e| invalid(format!("amount '{}': {}", self.amount, e)))?;
        if amount < Decimal::ZERO {
            return Err(invalid(format!("negative amount {}", amount)));
        }

        Ok(Movement::new(
            date,
            movement_type,
            quantity,
            amount,
            self.reference_no,
        ))
    }
}

/// Converts every loaded line, failing on the first bad one.
pub fn into_movements(lines: Vec<MovementLineDB>, movement_type: MovementType) -> Result<Vec<Movement>> {
    lines
        .into_iter()
        .map(|line| line.into_movement(movement_type))
        .collect()
}

/// Date bound in the storage text format.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
