use async_trait::async_trait;

use super::Item;
use crate::Result;

/// Trait defining the contract for the item catalog.
#[async_trait]
pub trait ItemRepositoryTrait: Send + Sync {
    /// Returns the item, or `Error::ItemNotFound` when the id is unknown.
    async fn get_item(&self, item_id: i64) -> Result<Item>;
    async fn list_items(&self) -> Result<Vec<Item>>;
}
