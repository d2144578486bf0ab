//! `ventakit_report`:
//! Formatted multi-sheet XLSX rendering of the consolidated sales data and
//! its aggregations, including native dashboard charts.
//!
//! Module architecture:
//! - `conf`   : workbook constants, palette, format presets
//! - `spec`   : cell format model, sheet options, run report
//! - `util`   : pure naming/value/format helpers
//! - `charts` : native chart builders
//! - `writer` : stateful workbook writer

pub mod charts;
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    SHEET_BRANCHES, SHEET_DASHBOARD, SHEET_DATA, SHEET_SELLERS, SHEET_TOP_PRODUCTS,
    derive_default_report_formats,
};
pub use spec::{ReportWorkbook, SpecCellFormat, SpecReportFormats, SpecTableSheetOptions};
pub use writer::{ReportWriter, SpecDashboardInputs};
