//! End-to-end consolidation pipeline: read input workbooks, aggregate, and
//! render the formatted report workbook.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use polars::prelude::DataFrame;

use ventakit_analysis::conf::{COL_AVG_TICKET, COL_SHARE, COL_TOTAL_SALES, COL_TRANSACTIONS};
use ventakit_analysis::spec::SpecGeneralStats;
use ventakit_analysis::{
    derive_branch_summary, derive_category_summary, derive_daily_trend, derive_general_stats,
    derive_seller_summary, derive_top_products,
};
use ventakit_ingest::conf::{COL_CATEGORY, COL_DATE, COL_QUANTITY, COL_TOTAL, COL_UNIT_PRICE};
use ventakit_ingest::spec::{IngestError, SpecIngestOptions};
use ventakit_ingest::{ReportIngest, consolidate_sales_dir};
use ventakit_report::spec::ReportWorkbook;
use ventakit_report::writer::{ReportWriter, SpecDashboardInputs};
use ventakit_report::{
    SHEET_BRANCHES, SHEET_DATA, SHEET_SELLERS, SHEET_TOP_PRODUCTS, SpecTableSheetOptions,
};

////////////////////////////////////////////////////////////////////////////////
// #region PipelineTypes

/// Options for one consolidation run.
#[derive(Debug, Clone)]
pub struct SpecPipelineOptions {
    /// Directory scanned for input workbooks.
    pub dir_input: PathBuf,
    /// Output workbook path.
    pub path_file_out: PathBuf,
    /// Glob pattern applied to input file basenames.
    pub pattern: String,
    /// Ranking length on the top-products sheet.
    pub top_n: usize,
}

/// Outcome of one successful consolidation run.
#[derive(Debug, Clone)]
pub struct SpecPipelineOutcome {
    /// Ingest counters and per-file loads.
    pub report_ingest: ReportIngest,
    /// Written sheets and workbook warnings.
    pub report_workbook: ReportWorkbook,
    /// Headline KPI metrics rendered on the dashboard.
    pub stats: SpecGeneralStats,
}

/// Failure in any pipeline stage.
#[derive(Debug)]
pub enum PipelineError {
    /// Input discovery/validation/read failure.
    Ingest(IngestError),
    /// Aggregation failure.
    Analysis(String),
    /// Workbook rendering/save failure.
    Report(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Ingest(err) => write!(f, "{err}"),
            PipelineError::Analysis(msg) => write!(f, "Analysis failed: {msg}"),
            PipelineError::Report(msg) => write!(f, "Report write failed: {msg}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Ingest(err) => Some(err),
            PipelineError::Analysis(_) | PipelineError::Report(_) => None,
        }
    }
}

impl From<IngestError> for PipelineError {
    fn from(err: IngestError) -> Self {
        PipelineError::Ingest(err)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Orchestration

/// Run the full pipeline and save the report workbook.
///
/// Sheet order in the output: Dashboard first, then the consolidated data,
/// rankings, seller, and branch sheets.
pub fn run_consolidation(
    options: &SpecPipelineOptions,
) -> Result<SpecPipelineOutcome, PipelineError> {
    tracing::info!(
        dir_input = %options.dir_input.display(),
        pattern = %options.pattern,
        "scanning input directory"
    );
    let (df_consolidated, report_ingest) = consolidate_sales_dir(
        &options.dir_input,
        &SpecIngestOptions {
            pattern: options.pattern.clone(),
        },
    )?;
    for c_warning in &report_ingest.warnings {
        tracing::warn!("{c_warning}");
    }
    tracing::info!("{report_ingest}");

    let stats = derive_general_stats(&df_consolidated).map_err(PipelineError::Analysis)?;
    let df_branches = derive_branch_summary(&df_consolidated).map_err(PipelineError::Analysis)?;
    let (df_top_by_qty, df_top_by_amount) =
        derive_top_products(&df_consolidated, options.top_n).map_err(PipelineError::Analysis)?;
    let df_sellers = derive_seller_summary(&df_consolidated).map_err(PipelineError::Analysis)?;
    let df_categories =
        derive_category_summary(&df_consolidated).map_err(PipelineError::Analysis)?;
    let df_daily = derive_daily_trend(&df_consolidated).map_err(PipelineError::Analysis)?;
    tracing::info!(
        transactions = stats.cnt_transactions,
        branches = stats.cnt_branches,
        "aggregations computed"
    );

    let l_category_totals =
        derive_label_value_pairs(&df_categories, COL_CATEGORY, COL_TOTAL_SALES)
            .map_err(PipelineError::Analysis)?;
    let l_daily_totals = derive_label_value_pairs(&df_daily, COL_DATE, COL_TOTAL)
        .map_err(PipelineError::Analysis)?;

    let mut writer = ReportWriter::new(options.path_file_out.clone());

    writer
        .write_table_sheet(
            &df_consolidated,
            SHEET_DATA,
            &SpecTableSheetOptions {
                cols_currency: vec![COL_UNIT_PRICE.to_string(), COL_TOTAL.to_string()],
                cols_integer: vec![COL_QUANTITY.to_string()],
                ..Default::default()
            },
        )
        .map_err(PipelineError::Report)?;

    writer
        .write_top_products_sheet(&df_top_by_qty, &df_top_by_amount, SHEET_TOP_PRODUCTS)
        .map_err(PipelineError::Report)?;

    writer
        .write_table_sheet(
            &df_sellers,
            SHEET_SELLERS,
            &SpecTableSheetOptions {
                cols_currency: vec![COL_TOTAL_SALES.to_string(), COL_AVG_TICKET.to_string()],
                cols_integer: vec![COL_TRANSACTIONS.to_string()],
                ..Default::default()
            },
        )
        .map_err(PipelineError::Report)?;

    let c_sheet_branches = writer
        .write_table_sheet(
            &df_branches,
            SHEET_BRANCHES,
            &SpecTableSheetOptions {
                cols_currency: vec![COL_TOTAL_SALES.to_string()],
                cols_integer: vec![COL_TRANSACTIONS.to_string()],
                cols_percent: vec![COL_SHARE.to_string()],
                cols_totals: vec![
                    COL_TOTAL_SALES.to_string(),
                    COL_TRANSACTIONS.to_string(),
                    COL_SHARE.to_string(),
                ],
                ..Default::default()
            },
        )
        .map_err(PipelineError::Report)?;

    // Written last so its charts can reference the other sheets, then moved
    // to the first tab.
    let c_sheet_dashboard = writer
        .write_dashboard(
            &stats,
            &SpecDashboardInputs {
                sheet_branches: &c_sheet_branches,
                cnt_branches: df_branches.height(),
                l_category_totals: &l_category_totals,
                l_daily_totals: &l_daily_totals,
            },
        )
        .map_err(PipelineError::Report)?;
    writer
        .move_sheet_first(&c_sheet_dashboard)
        .map_err(PipelineError::Report)?;

    writer.close().map_err(PipelineError::Report)?;
    let report_workbook = writer.report();
    for c_warning in &report_workbook.warnings {
        tracing::warn!("{c_warning}");
    }
    tracing::info!(
        path_file_out = %options.path_file_out.display(),
        "{report_workbook}"
    );

    Ok(SpecPipelineOutcome {
        report_ingest,
        report_workbook,
        stats,
    })
}

fn derive_label_value_pairs(
    df: &DataFrame,
    col_label: &str,
    col_value: &str,
) -> Result<Vec<(String, f64)>, String> {
    let labels = df
        .column(col_label)
        .map_err(|err| format!("polars error: {err}"))?
        .as_materialized_series()
        .str()
        .map_err(|err| format!("polars error: {err}"))?;
    let values = df
        .column(col_value)
        .map_err(|err| format!("polars error: {err}"))?
        .as_materialized_series()
        .f64()
        .map_err(|err| format!("polars error: {err}"))?;

    Ok(labels
        .into_iter()
        .zip(values)
        .filter_map(|(label, value)| Some((label?.to_string(), value?)))
        .collect())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    #[test]
    fn label_value_pairs_preserve_frame_order() {
        let df_pairs = df!(
            "Categoría" => ["Hogar", "Audio"],
            "Total_Ventas" => [120.5f64, 80.0],
        )
        .unwrap();

        let l_pairs =
            derive_label_value_pairs(&df_pairs, "Categoría", "Total_Ventas").unwrap();
        assert_eq!(
            l_pairs,
            vec![("Hogar".to_string(), 120.5), ("Audio".to_string(), 80.0)]
        );
    }

    #[test]
    fn pipeline_error_display_keeps_stage_context() {
        let err = PipelineError::Analysis("empty frame".to_string());
        assert_eq!(err.to_string(), "Analysis failed: empty frame");
    }
}
