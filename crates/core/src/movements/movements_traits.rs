use async_trait::async_trait;

use super::movements_model::{Movement, MovementType, MovementWindow};
use crate::errors::Result;

/// Trait defining the contract for one transaction family's movement source.
///
/// Implementations map their own document schema onto `Movement` and must not
/// filter or re-sign records: the type tag carries the direction.
#[async_trait]
pub trait MovementSourceTrait: Send + Sync {
    /// The single movement type every record from this source carries.
    fn movement_type(&self) -> MovementType;

    /// Fetches movements of `item_id` whose date falls inside `window`.
    async fn fetch_movements(&self, item_id: i64, window: MovementWindow)
        -> Result<Vec<Movement>>;
}
