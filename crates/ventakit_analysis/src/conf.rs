//! Summary-table column constants.

/// Aggregated sales total column.
pub const COL_TOTAL_SALES: &str = "Total_Ventas";
/// Transaction count column.
pub const COL_TRANSACTIONS: &str = "Transacciones";
/// Percentage-share column (fraction of grand total, 0..=1).
pub const COL_SHARE: &str = "Participacion";
/// Mean transaction amount per seller.
pub const COL_AVG_TICKET: &str = "Ticket_Promedio";
/// Units-sold column in the category summary.
pub const COL_UNITS_SOLD: &str = "Unidades_Vendidas";

/// Default Top-N size for product rankings.
pub const N_TOP_PRODUCTS_DEFAULT: usize = 10;
