//! Aggregate statistic models.

/// Headline KPI metrics over the consolidated frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecGeneralStats {
    /// Sum of all per-row totals.
    pub total_sales: f64,
    /// Consolidated record count.
    pub cnt_transactions: usize,
    /// Mean per-row total.
    pub avg_ticket: f64,
    /// Earliest transaction date (ISO).
    pub date_start: String,
    /// Latest transaction date (ISO).
    pub date_end: String,
    /// Distinct branch count.
    pub cnt_branches: usize,
    /// Distinct seller count.
    pub cnt_sellers: usize,
    /// Distinct product count.
    pub cnt_products: usize,
}
