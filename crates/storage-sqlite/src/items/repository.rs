use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use stockledger_core::items::{Item, ItemRepositoryTrait};
use stockledger_core::{Error, Result};

use super::model::ItemDB;
use crate::db::{read_blocking, DbPool};
use crate::errors::IntoCore;
use crate::schema::items;

/// Repository for reading the item catalog
pub struct ItemRepository {
    pool: Arc<DbPool>,
}

impl ItemRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepositoryTrait for ItemRepository {
    async fn get_item(&self, item_id: i64) -> Result<Item> {
        read_blocking(self.pool.clone(), move |conn| {
            let item = items::table
                .select(ItemDB::as_select())
                .find(item_id)
                .first::<ItemDB>(conn)
                .optional()
                .into_core()?;

            item.map(Item::from).ok_or(Error::ItemNotFound(item_id))
        })
        .await
    }

    async fn list_items(&self) -> Result<Vec<Item>> {
        read_blocking(self.pool.clone(), |conn| {
            let items_db = items::table
                .select(ItemDB::as_select())
                .order(items::name.asc())
                .load::<ItemDB>(conn)
                .into_core()?;

            Ok(items_db.into_iter().map(Item::from).collect())
        })
        .await
    }
}
