//! Input discovery, workbook reading, and consolidation orchestration.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};
use globset::Glob;
use polars::prelude::{Column, DataFrame};

use crate::conf::{
    COL_BRANCH, COL_CATEGORY, COL_DATE, COL_PRODUCT, COL_QUANTITY, COL_SELLER, COL_TOTAL,
    COL_UNIT_PRICE, PREFIX_EXCEL_LOCK_FILE, TUP_COLS_REQUIRED,
};
use crate::report::{ReportIngest, ReportIngestBuilder};
use crate::spec::{IngestError, SpecIngestOptions};
use crate::util::{
    convert_cell_to_iso_date, convert_cell_to_price, convert_cell_to_quantity,
    convert_cell_to_text, find_missing_columns, round2, select_column_indices,
};

////////////////////////////////////////////////////////////////////////////////
// #region Discovery

/// List input files under `dir` matching `pattern`, sorted by path.
///
/// Excel `~$` lock files are skipped via the ingest report warnings, not here;
/// this function only filters and orders.
pub fn discover_input_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, IngestError> {
    if !dir.is_dir() {
        return Err(IngestError::InputDirMissing(dir.to_path_buf()));
    }

    let matcher = Glob::new(pattern)
        .map_err(|err| IngestError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })?
        .compile_matcher();

    let entries = std::fs::read_dir(dir).map_err(|err| IngestError::FileUnreadable {
        path: dir.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut l_paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| IngestError::FileUnreadable {
            path: dir.to_path_buf(),
            message: err.to_string(),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(c_basename) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if matcher.is_match(c_basename) {
            l_paths.push(path);
        }
    }

    l_paths.sort();

    if l_paths.is_empty() {
        return Err(IngestError::NoFilesMatched {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    Ok(l_paths)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileReading

/// Read one sales workbook into an 8-column frame (7 required + derived total).
///
/// The first worksheet is used; its first row must carry all required column
/// names verbatim. Every data cell is validated; the first bad cell fails the
/// file with row/column context.
pub fn read_sales_file(path: &Path) -> Result<DataFrame, IngestError> {
    let mut workbook =
        open_workbook::<Xlsx<_>, _>(path).map_err(|err| IngestError::FileUnreadable {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::FileUnreadable {
            path: path.to_path_buf(),
            message: "workbook has no worksheets".to_string(),
        })?
        .map_err(|err| IngestError::FileUnreadable {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let mut rows = range.rows();
    let Some(row_header) = rows.next() else {
        return Err(IngestError::FileUnreadable {
            path: path.to_path_buf(),
            message: "worksheet is empty".to_string(),
        });
    };

    let l_headers: Vec<String> = row_header.iter().map(derive_header_text).collect();
    let l_cols_missing = find_missing_columns(&l_headers, &TUP_COLS_REQUIRED);
    if !l_cols_missing.is_empty() {
        return Err(IngestError::MissingColumns {
            path: path.to_path_buf(),
            columns: l_cols_missing,
        });
    }
    let l_cols_idx = select_column_indices(&l_headers, &TUP_COLS_REQUIRED);

    let mut v_dates = Vec::new();
    let mut v_products = Vec::new();
    let mut v_categories = Vec::new();
    let mut v_quantities = Vec::new();
    let mut v_prices = Vec::new();
    let mut v_sellers = Vec::new();
    let mut v_branches = Vec::new();

    for (n_idx_row, row) in rows.enumerate() {
        let cell_at = |n_idx_required: usize| -> &Data {
            row.get(l_cols_idx[n_idx_required]).unwrap_or(&Data::Empty)
        };
        let fail = |n_idx_required: usize, message: String| IngestError::InvalidCell {
            path: path.to_path_buf(),
            row: n_idx_row + 1,
            column: TUP_COLS_REQUIRED[n_idx_required].to_string(),
            message,
        };

        v_dates.push(convert_cell_to_iso_date(cell_at(0)).map_err(|msg| fail(0, msg))?);
        v_products.push(convert_cell_to_text(cell_at(1)).map_err(|msg| fail(1, msg))?);
        v_categories.push(convert_cell_to_text(cell_at(2)).map_err(|msg| fail(2, msg))?);
        v_quantities.push(convert_cell_to_quantity(cell_at(3)).map_err(|msg| fail(3, msg))?);
        v_prices.push(convert_cell_to_price(cell_at(4)).map_err(|msg| fail(4, msg))?);
        v_sellers.push(convert_cell_to_text(cell_at(5)).map_err(|msg| fail(5, msg))?);
        v_branches.push(convert_cell_to_text(cell_at(6)).map_err(|msg| fail(6, msg))?);
    }

    let v_totals: Vec<f64> = v_quantities
        .iter()
        .zip(&v_prices)
        .map(|(n_qty, n_price)| round2(*n_qty as f64 * n_price))
        .collect();

    DataFrame::new(vec![
        Column::new(COL_DATE.into(), v_dates),
        Column::new(COL_PRODUCT.into(), v_products),
        Column::new(COL_CATEGORY.into(), v_categories),
        Column::new(COL_QUANTITY.into(), v_quantities),
        Column::new(COL_UNIT_PRICE.into(), v_prices),
        Column::new(COL_SELLER.into(), v_sellers),
        Column::new(COL_BRANCH.into(), v_branches),
        Column::new(COL_TOTAL.into(), v_totals),
    ])
    .map_err(|err| IngestError::Frame(err.to_string()))
}

fn derive_header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.trim().to_string(),
        other => other.to_string(),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Consolidation

/// Discover, read, validate, and vertically stack every matching input file.
///
/// All validation happens before this returns: a malformed file halts the run
/// and no frame is produced. The report carries per-file row counts whose sum
/// equals the consolidated height.
pub fn consolidate_sales_dir(
    dir: &Path,
    options: &SpecIngestOptions,
) -> Result<(DataFrame, ReportIngest), IngestError> {
    let l_paths = discover_input_files(dir, &options.pattern)?;

    let mut builder = ReportIngestBuilder::default();
    let mut df_consolidated: Option<DataFrame> = None;

    for path in l_paths {
        let if_lock_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(PREFIX_EXCEL_LOCK_FILE));
        if if_lock_file {
            builder.add_warning(format!("Skipped Excel lock file: {}", path.display()));
            continue;
        }

        let df_file = read_sales_file(&path)?;
        builder.add_file(path, df_file.height() as u64);

        df_consolidated = Some(match df_consolidated.take() {
            None => df_file,
            Some(mut df_all) => {
                df_all
                    .vstack_mut(&df_file)
                    .map_err(|err| IngestError::Frame(err.to_string()))?;
                df_all
            }
        });
    }

    let df_consolidated = df_consolidated.ok_or_else(|| IngestError::NoFilesMatched {
        dir: dir.to_path_buf(),
        pattern: options.pattern.clone(),
    })?;

    Ok((df_consolidated, builder.build()))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
