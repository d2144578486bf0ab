//! Input schema constants shared across the workspace.

/// Transaction date column (ISO `YYYY-MM-DD` after normalization).
pub const COL_DATE: &str = "Fecha";
/// Product name column.
pub const COL_PRODUCT: &str = "Producto";
/// Product category column. Exact match required, accent included.
pub const COL_CATEGORY: &str = "Categoría";
/// Sold quantity column (non-negative integer).
pub const COL_QUANTITY: &str = "Cantidad";
/// Unit price column (non-negative decimal).
pub const COL_UNIT_PRICE: &str = "Precio_Unitario";
/// Seller name column.
pub const COL_SELLER: &str = "Vendedor";
/// Branch name column.
pub const COL_BRANCH: &str = "Sucursal";
/// Derived per-row total column (`Cantidad * Precio_Unitario`, 2 decimals).
pub const COL_TOTAL: &str = "Total_Venta";

/// Required input columns, in consolidated output order.
///
/// Validation is exact string match against the header row, diacritics
/// included; the source treats a renamed/unaccented header as a schema error.
pub const TUP_COLS_REQUIRED: [&str; 7] = [
    COL_DATE,
    COL_PRODUCT,
    COL_CATEGORY,
    COL_QUANTITY,
    COL_UNIT_PRICE,
    COL_SELLER,
    COL_BRANCH,
];

/// Default input file pattern.
pub const PATTERN_INPUT_DEFAULT: &str = "*.xlsx";

/// Prefix of Excel owner/lock temp files, skipped during discovery.
pub const PREFIX_EXCEL_LOCK_FILE: &str = "~$";
