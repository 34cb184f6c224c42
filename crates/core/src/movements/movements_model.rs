use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::movements_constants::*;
use crate::errors::{LedgerError, Result};

/// Which side of the book a movement belongs to for valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementClass {
    Purchase,
    Sale,
}

/// One entry of the movement rule table.
///
/// `sign` is the effect of one unit on stock on hand. Return families are
/// netted against their class in the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignRule {
    pub movement_type: MovementType,
    pub name: &'static str,
    pub sign: i64,
    pub class: MovementClass,
    pub is_return: bool,
}

/// Rule table for every movement type, in declared order.
///
/// The position of a rule is the same-day tie-break rank of its type, and it
/// must match the discriminant of `MovementType`.
pub static MOVEMENT_TYPE_RULES: [SignRule; 4] = [
    SignRule {
        movement_type: MovementType::Purchase,
        name: MOVEMENT_TYPE_PURCHASE,
        sign: 1,
        class: MovementClass::Purchase,
        is_return: false,
    },
    SignRule {
        movement_type: MovementType::PurchaseReturn,
        name: MOVEMENT_TYPE_PURCHASE_RETURN,
        sign: -1,
        class: MovementClass::Purchase,
        is_return: true,
    },
    SignRule {
        movement_type: MovementType::Sale,
        name: MOVEMENT_TYPE_SALE,
        sign: -1,
        class: MovementClass::Sale,
        is_return: false,
    },
    SignRule {
        movement_type: MovementType::SaleReturn,
        name: MOVEMENT_TYPE_SALE_RETURN,
        sign: 1,
        class: MovementClass::Sale,
        is_return: true,
    },
];

/// Transaction family a movement originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    Purchase = 0,
    PurchaseReturn = 1,
    Sale = 2,
    SaleReturn = 3,
}

impl MovementType {
    pub const ALL: [MovementType; 4] = [
        MovementType::Purchase,
        MovementType::PurchaseReturn,
        MovementType::Sale,
        MovementType::SaleReturn,
    ];

    pub fn rule(&self) -> &'static SignRule {
        &MOVEMENT_TYPE_RULES[*self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        self.rule().name
    }

    /// +1 for inflows (purchase, sale return), -1 for outflows.
    pub fn sign(&self) -> i64 {
        self.rule().sign
    }

    /// Rank used to order movements that fall on the same date.
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    pub fn is_inflow(&self) -> bool {
        self.sign() > 0
    }

    pub fn class(&self) -> MovementClass {
        self.rule().class
    }

    pub fn is_return(&self) -> bool {
        self.rule().is_return
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        MOVEMENT_TYPE_RULES
            .iter()
            .find(|rule| rule.name == s)
            .map(|rule| rule.movement_type)
            .ok_or_else(|| format!("Unknown movement type: {}", s))
    }
}

/// A single stock-affecting event, as reported by one transaction source.
///
/// Quantity and amount are magnitudes; the direction comes from `movement_type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: u32,
    pub amount: Decimal,
    pub reference_id: String,
}

impl Movement {
    pub fn new(
        date: NaiveDate,
        movement_type: MovementType,
        quantity: u32,
        amount: Decimal,
        reference_id: impl Into<String>,
    ) -> Self {
        Movement {
            date,
            movement_type,
            quantity,
            amount,
            reference_id: reference_id.into(),
        }
    }

    /// Effect of this movement on stock on hand.
    pub fn signed_delta(&self) -> i64 {
        self.movement_type.sign() * i64::from(self.quantity)
    }

    /// Checks a movement returned by the source registered for `expected`.
    pub fn validate_for(&self, expected: MovementType) -> Result<()> {
        if self.movement_type != expected {
            return Err(LedgerError::InvalidMovement {
                movement_type: expected,
                reference_id: self.reference_id.clone(),
                reason: format!("tagged as {}", self.movement_type),
            }
            .into());
        }
        if self.amount < Decimal::ZERO {
            return Err(LedgerError::InvalidMovement {
                movement_type: expected,
                reference_id: self.reference_id.clone(),
                reason: format!("negative amount {}", self.amount),
            }
            .into());
        }
        Ok(())
    }
}

/// Inclusive date window handed to transaction sources.
///
/// A missing lower bound means "since the first recorded movement".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementWindow {
    pub from: Option<NaiveDate>,
    pub until: NaiveDate,
}

impl MovementWindow {
    pub fn between(from: NaiveDate, until: NaiveDate) -> Self {
        MovementWindow {
            from: Some(from),
            until,
        }
    }

    pub fn up_to(until: NaiveDate) -> Self {
        MovementWindow { from: None, until }
    }

    /// Everything strictly before `date`, or `None` when nothing can precede it.
    pub fn before(date: NaiveDate) -> Option<Self> {
        date.pred_opt().map(Self::up_to)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date <= self.until && self.from.map_or(true, |from| date >= from)
    }
}
