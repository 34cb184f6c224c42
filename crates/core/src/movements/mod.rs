//! Movements module - the records every transaction source emits.

mod movements_constants;
mod movements_model;
mod movements_traits;

pub use movements_constants::*;
pub use movements_model::{
    Movement, MovementClass, MovementType, MovementWindow, SignRule, MOVEMENT_TYPE_RULES,
};
pub use movements_traits::MovementSourceTrait;
