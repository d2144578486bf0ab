//! `ventakit_ingest`:
//! Input discovery, schema validation, and consolidation of per-branch sales
//! workbooks into one in-memory frame.
//!
//! Module architecture:
//! - `conf`   : input schema constants
//! - `spec`   : options and error types
//! - `report` : run-time ingest report model
//! - `reader` : discovery/read/consolidate orchestration
//! - `util`   : pure cell/header helpers

pub mod conf;
pub mod reader;
pub mod report;
pub mod spec;
pub mod util;

pub use conf::{
    COL_BRANCH, COL_CATEGORY, COL_DATE, COL_PRODUCT, COL_QUANTITY, COL_SELLER, COL_TOTAL,
    COL_UNIT_PRICE, PATTERN_INPUT_DEFAULT, TUP_COLS_REQUIRED,
};
pub use reader::{consolidate_sales_dir, discover_input_files, read_sales_file};
pub use report::{ReportIngest, ReportIngestBuilder, SpecFileLoad};
pub use spec::{IngestError, SpecIngestOptions};
