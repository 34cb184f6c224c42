use crate::movements::document_movement_source;

document_movement_source! {
    /// Purchase lines as inbound stock movements.
    PurchaseRepository => Purchase {
        lines: purchase_lines,
        documents: purchases,
        date: purchase_date,
    }
}

document_movement_source! {
    /// Purchase return lines as outbound stock movements.
    PurchaseReturnRepository => PurchaseReturn {
        lines: purchase_return_lines,
        documents: purchase_returns,
        date: return_date,
    }
}
