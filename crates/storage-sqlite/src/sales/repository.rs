use crate::movements::document_movement_source;

document_movement_source! {
    /// Sale lines as outbound stock movements.
    SaleRepository => Sale {
        lines: sale_lines,
        documents: sales,
        date: sale_date,
    }
}

document_movement_source! {
    /// Sale return lines as inbound stock movements.
    SaleReturnRepository => SaleReturn {
        lines: sale_return_lines,
        documents: sale_returns,
        date: return_date,
    }
}
