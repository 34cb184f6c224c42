//! Database models for items.

use diesel::prelude::*;
use stockledger_core::items::Item;

/// Database model for items
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ItemDB {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub category: Option<String>,
    pub unit: String,
}

impl From<ItemDB> for Item {
    fn from(db: ItemDB) -> Self {
        Item {
            id: db.id,
            code: db.code,
            name: db.name,
            category: db.category,
            unit: db.unit,
        }
    }
}
