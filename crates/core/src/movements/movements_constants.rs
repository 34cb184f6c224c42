/// Movement types
///
/// Each constant is the wire/storage name of one transaction family.

/// Goods received from a supplier. Increases stock.
pub const MOVEMENT_TYPE_PURCHASE: &str = "purchase";

/// Goods sent back to a supplier. Decreases stock.
pub const MOVEMENT_TYPE_PURCHASE_RETURN: &str = "purchase_return";

/// Goods delivered to a customer. Decreases stock.
pub const MOVEMENT_TYPE_SALE: &str = "sale";

/// Goods taken back from a customer. Increases stock.
pub const MOVEMENT_TYPE_SALE_RETURN: &str = "sale_return";
