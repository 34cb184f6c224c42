use log::warn;

use super::LedgerRow;
use crate::movements::Movement;

/// Walks merged movements in order and attaches the balance after each one.
///
/// `movements` must already be in ledger order. Negative balances are kept
/// as-is and only logged.
pub fn apply_running_balance(opening_balance: i64, movements: Vec<Movement>) -> Vec<LedgerRow> {
    let mut balance = opening_balance;
    let mut went_negative = false;

    movements
        .into_iter()
        .map(|movement| {
            balance += movement.signed_delta();
            if balance < 0 && !went_negative {
                went_negative = true;
                warn!(
                    "Stock balance went negative ({}) at {} {} on {}",
                    balance, movement.movement_type, movement.reference_id, movement.date
                );
            }
            LedgerRow { movement, balance }
        })
        .collect()
}
