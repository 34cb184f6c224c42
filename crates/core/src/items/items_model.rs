use serde::{Deserialize, Serialize};

/// Inventory item as exposed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub category: Option<String>,
    pub unit: String,
}
