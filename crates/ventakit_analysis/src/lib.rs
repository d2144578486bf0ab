//! `ventakit_analysis`:
//! Fixed aggregation set over the consolidated sales frame.
//!
//! Module architecture:
//! - `conf`     : summary column constants
//! - `spec`     : aggregate statistic models
//! - `analysis` : group-by-and-reduce operations

pub mod analysis;
pub mod conf;
pub mod spec;

pub use analysis::{
    derive_branch_summary, derive_category_summary, derive_daily_trend, derive_general_stats,
    derive_seller_summary, derive_top_products,
};
pub use conf::{
    COL_AVG_TICKET, COL_SHARE, COL_TOTAL_SALES, COL_TRANSACTIONS, COL_UNITS_SOLD,
    N_TOP_PRODUCTS_DEFAULT,
};
pub use spec::SpecGeneralStats;
