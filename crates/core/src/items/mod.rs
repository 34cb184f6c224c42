//! Item catalog module - read-only lookup of inventory items.

mod items_model;
mod items_traits;

pub use items_model::Item;
pub use items_traits::ItemRepositoryTrait;
