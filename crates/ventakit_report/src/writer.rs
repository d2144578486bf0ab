//! Workbook writer kernel for the consolidated sales report.

use std::collections::BTreeSet;
use std::path::PathBuf;

use polars::prelude::DataFrame;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError, utility};

use ventakit_analysis::conf::COL_TOTAL_SALES;
use ventakit_analysis::spec::SpecGeneralStats;
use ventakit_ingest::conf::{COL_CATEGORY, COL_DATE, COL_TOTAL};

use crate::charts::{SpecChartColumnRange, build_column_chart, build_line_chart, build_pie_chart};
use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NROWS_EXCEL_MAX, NUM_FMT_CURRENCY, NUM_FMT_INTEGER,
    SHEET_DASHBOARD, derive_default_report_formats,
};
use crate::spec::{
    EnumCellValue, ReportWorkbook, SpecCellFormat, SpecReportFormats, SpecTableSheetOptions,
};
use crate::util::{
    derive_cell_value_from_any_value, derive_rust_xlsx_format, estimate_width_len,
    sanitize_sheet_name, validate_unique_columns,
};

/// Autofit floor for column width units.
const N_WIDTH_CELL_MIN: usize = 8;
/// Autofit cap for column width units.
const N_WIDTH_CELL_MAX: usize = 60;
/// Padding added to the inferred width.
const N_WIDTH_CELL_PADDING: usize = 2;

/// Column format class resolved per table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnumColumnClass {
    Text,
    Integer,
    Currency,
    Percent,
    Decimal,
}

/// Dashboard chart/table source data.
pub struct SpecDashboardInputs<'a> {
    /// Actual name of the already-written branch summary sheet.
    pub sheet_branches: &'a str,
    /// Branch row count on that sheet (excludes header and totals row).
    pub cnt_branches: usize,
    /// Category name/total pairs, ordered as in the category summary.
    pub l_category_totals: &'a [(String, f64)],
    /// ISO date/total pairs, ordered ascending by date.
    pub l_daily_totals: &'a [(String, f64)],
}

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] is called; no
/// output file exists on disk while any sheet write can still fail.
pub struct ReportWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    fmts: SpecReportFormats,
    set_sheet_names_existing: BTreeSet<String>,
    report: ReportWorkbook,
    if_closed: bool,
}

impl ReportWriter {
    /// Create writer bound to output path with default format presets.
    pub fn new(path_file_out: PathBuf) -> Self {
        Self::with_formats(path_file_out, derive_default_report_formats())
    }

    /// Create writer with explicit format presets.
    pub fn with_formats(path_file_out: PathBuf, fmts: SpecReportFormats) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            fmts,
            set_sheet_names_existing: BTreeSet::new(),
            report: ReportWorkbook::default(),
            if_closed: false,
        }
    }

    /// Return output file path as string.
    pub fn file_out(&self) -> String {
        self.path_file_out.to_string_lossy().to_string()
    }

    /// Return immutable snapshot of the run report.
    pub fn report(&self) -> ReportWorkbook {
        self.report.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), String> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(derive_xlsx_error_text)?;
        self.if_closed = true;
        Ok(())
    }

    /// Write one table sheet: header row, typed body, optional `TOTAL` footer.
    ///
    /// Returns the actual (sanitized, deduplicated) sheet name.
    pub fn write_table_sheet(
        &mut self,
        df: &DataFrame,
        sheet_name: &str,
        options: &SpecTableSheetOptions,
    ) -> Result<String, String> {
        if self.if_closed {
            return Err("Cannot write after close().".to_string());
        }

        let l_colnames: Vec<String> = df
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        validate_unique_columns(&l_colnames)?;

        let n_height = df.height();
        let if_totals_row = !options.cols_totals.is_empty();
        if n_height + 1 + usize::from(if_totals_row) > N_NROWS_EXCEL_MAX {
            return Err(format!(
                "Table {sheet_name:?} has {n_height} rows and exceeds the Excel sheet limit."
            ));
        }

        let l_col_classes: Vec<EnumColumnClass> = l_colnames
            .iter()
            .enumerate()
            .map(|(n_idx, c_name)| derive_column_class(df, n_idx, c_name, options))
            .collect();
        let l_fmt_specs: Vec<SpecCellFormat> = l_col_classes
            .iter()
            .map(|class| self.derive_class_format_spec(*class))
            .collect();
        let l_fmt_data: Vec<Format> = l_fmt_specs.iter().map(derive_rust_xlsx_format).collect();
        let fmt_header = derive_rust_xlsx_format(&self.fmts.header);
        let l_fmt_totals: Vec<Format> = l_fmt_specs
            .iter()
            .map(|spec| derive_rust_xlsx_format(&spec.merge(&self.fmts.total_label)))
            .collect();

        let c_sheet_name =
            self.derive_unique_sheet_name(&sanitize_sheet_name(sheet_name, "_"));
        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&c_sheet_name)
            .map_err(derive_xlsx_error_text)?;

        let mut l_width_by_col = vec![0usize; l_colnames.len()];

        for (n_idx_col, c_name) in l_colnames.iter().enumerate() {
            worksheet
                .write_string_with_format(0, cast_col_num(n_idx_col)?, c_name, &fmt_header)
                .map_err(derive_xlsx_error_text)?;
            l_width_by_col[n_idx_col] =
                estimate_width_len(&EnumCellValue::String(c_name.clone()));
        }

        for n_idx_row in 0..n_height {
            for (n_idx_col, col) in df.get_columns().iter().enumerate() {
                let value = derive_cell_value_from_any_value(
                    col.get(n_idx_row)
                        .map_err(|err| format!("Failed to access cell value: {err}"))?,
                );
                l_width_by_col[n_idx_col] =
                    usize::max(l_width_by_col[n_idx_col], estimate_width_len(&value));
                write_cell_with_format(
                    worksheet,
                    n_idx_row + 1,
                    n_idx_col,
                    &value,
                    &l_fmt_data[n_idx_col],
                )?;
            }
        }

        if if_totals_row {
            let n_row_totals = n_height + 1;
            worksheet
                .write_string_with_format(
                    cast_row_num(n_row_totals)?,
                    0,
                    "TOTAL",
                    &l_fmt_totals[0],
                )
                .map_err(derive_xlsx_error_text)?;

            for (n_idx_col, c_name) in l_colnames.iter().enumerate() {
                if !options.cols_totals.contains(c_name) {
                    continue;
                }
                let c_col_letter = utility::column_number_to_name(cast_col_num(n_idx_col)?);
                let c_formula =
                    format!("=SUM({c_col_letter}2:{c_col_letter}{})", n_height + 1);
                worksheet
                    .write_formula_with_format(
                        cast_row_num(n_row_totals)?,
                        cast_col_num(n_idx_col)?,
                        c_formula.as_str(),
                        &l_fmt_totals[n_idx_col],
                    )
                    .map_err(derive_xlsx_error_text)?;
            }
        }

        worksheet
            .set_freeze_panes(1, cast_col_num(options.col_freeze)?)
            .map_err(derive_xlsx_error_text)?;

        for (n_idx_col, n_width) in l_width_by_col.iter().enumerate() {
            let n_width_final = usize::min(
                N_WIDTH_CELL_MAX,
                usize::max(N_WIDTH_CELL_MIN, n_width + N_WIDTH_CELL_PADDING),
            );
            worksheet
                .set_column_width(cast_col_num(n_idx_col)?, n_width_final as f64)
                .map_err(derive_xlsx_error_text)?;
        }

        self.report.sheets.push(c_sheet_name.clone());
        Ok(c_sheet_name)
    }

    /// Write the two side-by-side product rankings under merged banners.
    ///
    /// Layout: ranking-by-quantity in columns A/B, a spacer column, then
    /// ranking-by-amount in columns D/E.
    pub fn write_top_products_sheet(
        &mut self,
        df_by_quantity: &DataFrame,
        df_by_amount: &DataFrame,
        sheet_name: &str,
    ) -> Result<String, String> {
        if self.if_closed {
            return Err("Cannot write after close().".to_string());
        }
        if df_by_quantity.width() != 2 || df_by_amount.width() != 2 {
            return Err("Top-product rankings must have exactly 2 columns.".to_string());
        }

        let fmt_banner = derive_rust_xlsx_format(&self.fmts.banner);
        let fmt_header = derive_rust_xlsx_format(&self.fmts.header);
        let fmt_text = derive_rust_xlsx_format(&self.fmts.text);
        let fmt_integer = derive_rust_xlsx_format(&self.fmts.integer);
        let fmt_currency = derive_rust_xlsx_format(&self.fmts.currency);

        let c_sheet_name =
            self.derive_unique_sheet_name(&sanitize_sheet_name(sheet_name, "_"));
        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&c_sheet_name)
            .map_err(derive_xlsx_error_text)?;

        worksheet
            .merge_range(0, 0, 0, 1, "MÁS VENDIDOS (Por Cantidad)", &fmt_banner)
            .map_err(derive_xlsx_error_text)?;
        worksheet
            .merge_range(0, 3, 0, 4, "MÁS RENTABLES (Por Monto)", &fmt_banner)
            .map_err(derive_xlsx_error_text)?;

        write_ranking_block(worksheet, df_by_quantity, 0, &fmt_header, &fmt_text, &fmt_integer)?;
        write_ranking_block(worksheet, df_by_amount, 3, &fmt_header, &fmt_text, &fmt_currency)?;

        for (n_idx_col, n_width) in [(0u16, 32.0), (1, 14.0), (2, 3.0), (3, 32.0), (4, 14.0)] {
            worksheet
                .set_column_width(n_idx_col, n_width)
                .map_err(derive_xlsx_error_text)?;
        }

        self.report.sheets.push(c_sheet_name.clone());
        Ok(c_sheet_name)
    }

    /// Write the dashboard: title, period caption, KPI block, three charts.
    ///
    /// Chart-source tables for the pie and line charts are parked in far
    /// dashboard columns; the column chart references the branch sheet.
    pub fn write_dashboard(
        &mut self,
        stats: &SpecGeneralStats,
        inputs: &SpecDashboardInputs<'_>,
    ) -> Result<String, String> {
        if self.if_closed {
            return Err("Cannot write after close().".to_string());
        }

        let fmt_title = derive_rust_xlsx_format(&self.fmts.title);
        let fmt_caption = derive_rust_xlsx_format(&self.fmts.caption);
        let fmt_section = derive_rust_xlsx_format(&self.fmts.section);
        let fmt_kpi_label = derive_rust_xlsx_format(&self.fmts.kpi_label);
        let fmt_kpi_currency = derive_rust_xlsx_format(&self.fmts.kpi_value.with_(
            SpecCellFormat {
                num_format: Some(NUM_FMT_CURRENCY.to_string()),
                ..Default::default()
            },
        ));
        let fmt_kpi_integer = derive_rust_xlsx_format(&self.fmts.kpi_value.with_(
            SpecCellFormat {
                num_format: Some(NUM_FMT_INTEGER.to_string()),
                ..Default::default()
            },
        ));
        let fmt_header = derive_rust_xlsx_format(&self.fmts.header);
        let fmt_text = derive_rust_xlsx_format(&self.fmts.text);
        let fmt_currency = derive_rust_xlsx_format(&self.fmts.currency);

        let c_sheet_name =
            self.derive_unique_sheet_name(&sanitize_sheet_name(SHEET_DASHBOARD, "_"));

        let mut l_warnings: Vec<String> = Vec::new();
        {
            let worksheet = self.workbook.add_worksheet();
            worksheet
                .set_name(&c_sheet_name)
                .map_err(derive_xlsx_error_text)?;

            for (n_idx_col, n_width) in [(0u16, 5.0), (1, 35.0), (2, 20.0)] {
                worksheet
                    .set_column_width(n_idx_col, n_width)
                    .map_err(derive_xlsx_error_text)?;
            }

            worksheet
                .write_string_with_format(1, 1, "REPORTE CONSOLIDADO DE VENTAS", &fmt_title)
                .map_err(derive_xlsx_error_text)?;
            worksheet
                .set_row_height(1, 30)
                .map_err(derive_xlsx_error_text)?;
            worksheet
                .write_string_with_format(
                    2,
                    1,
                    format!("Período: {} al {}", stats.date_start, stats.date_end),
                    &fmt_caption,
                )
                .map_err(derive_xlsx_error_text)?;

            let l_kpis: [(&str, f64, &Format); 6] = [
                ("Total Ventas:", stats.total_sales, &fmt_kpi_currency),
                (
                    "Total Transacciones:",
                    stats.cnt_transactions as f64,
                    &fmt_kpi_integer,
                ),
                ("Ticket Promedio:", stats.avg_ticket, &fmt_kpi_currency),
                ("Sucursales:", stats.cnt_branches as f64, &fmt_kpi_integer),
                ("Vendedores:", stats.cnt_sellers as f64, &fmt_kpi_integer),
                (
                    "Productos Únicos:",
                    stats.cnt_products as f64,
                    &fmt_kpi_integer,
                ),
            ];
            for (n_idx, (c_label, n_value, fmt_value)) in l_kpis.iter().enumerate() {
                let n_row = (4 + n_idx) as u32;
                worksheet
                    .write_string_with_format(n_row, 1, *c_label, &fmt_kpi_label)
                    .map_err(derive_xlsx_error_text)?;
                worksheet
                    .write_number_with_format(n_row, 2, *n_value, fmt_value)
                    .map_err(derive_xlsx_error_text)?;
                worksheet
                    .set_row_height(n_row, 25)
                    .map_err(derive_xlsx_error_text)?;
            }

            // Chart-source tables, parked right of the visible dashboard area.
            write_pair_table(
                worksheet,
                15,
                COL_CATEGORY,
                COL_TOTAL_SALES,
                inputs.l_category_totals,
                &fmt_header,
                &fmt_text,
                &fmt_currency,
            )?;
            write_pair_table(
                worksheet,
                18,
                COL_DATE,
                COL_TOTAL,
                inputs.l_daily_totals,
                &fmt_header,
                &fmt_text,
                &fmt_currency,
            )?;

            worksheet
                .write_string_with_format(12, 1, "Ventas por Sucursal", &fmt_section)
                .map_err(derive_xlsx_error_text)?;
            worksheet
                .write_string_with_format(12, 8, "Distribución por Categoría", &fmt_section)
                .map_err(derive_xlsx_error_text)?;
            worksheet
                .write_string_with_format(37, 1, "Tendencia de Ventas Diarias", &fmt_section)
                .map_err(derive_xlsx_error_text)?;

            if inputs.cnt_branches > 0 {
                let chart_branches = build_column_chart(
                    "Ventas Totales por Sucursal",
                    inputs.sheet_branches,
                    SpecChartColumnRange {
                        row_first: 1,
                        row_last: inputs.cnt_branches as u32,
                        col: 0,
                    },
                    SpecChartColumnRange {
                        row_first: 1,
                        row_last: inputs.cnt_branches as u32,
                        col: 1,
                    },
                );
                worksheet
                    .insert_chart(13, 1, &chart_branches)
                    .map_err(derive_xlsx_error_text)?;
            } else {
                l_warnings.push("Branch chart skipped: no branch rows.".to_string());
            }

            if !inputs.l_category_totals.is_empty() {
                let n_row_last = (12 + inputs.l_category_totals.len()) as u32;
                let chart_categories = build_pie_chart(
                    "Distribución de Ventas por Categoría",
                    &c_sheet_name,
                    SpecChartColumnRange {
                        row_first: 13,
                        row_last: n_row_last,
                        col: 15,
                    },
                    SpecChartColumnRange {
                        row_first: 13,
                        row_last: n_row_last,
                        col: 16,
                    },
                );
                worksheet
                    .insert_chart(13, 8, &chart_categories)
                    .map_err(derive_xlsx_error_text)?;
            } else {
                l_warnings.push("Category chart skipped: no category rows.".to_string());
            }

            if !inputs.l_daily_totals.is_empty() {
                let n_row_last = (12 + inputs.l_daily_totals.len()) as u32;
                let chart_trend = build_line_chart(
                    "Evolución de Ventas Diarias",
                    &c_sheet_name,
                    SpecChartColumnRange {
                        row_first: 13,
                        row_last: n_row_last,
                        col: 18,
                    },
                    SpecChartColumnRange {
                        row_first: 13,
                        row_last: n_row_last,
                        col: 19,
                    },
                );
                worksheet
                    .insert_chart(38, 1, &chart_trend)
                    .map_err(derive_xlsx_error_text)?;
            } else {
                l_warnings.push("Trend chart skipped: no daily rows.".to_string());
            }
        }

        for c_warning in l_warnings {
            self.report.warn(c_warning);
        }
        self.report.sheets.push(c_sheet_name.clone());
        Ok(c_sheet_name)
    }

    /// Move an already-written sheet to the first tab position.
    ///
    /// Lets callers write chart-bearing sheets after their source sheets while
    /// still presenting them first.
    pub fn move_sheet_first(&mut self, sheet_name: &str) -> Result<(), String> {
        if self.if_closed {
            return Err("Cannot reorder after close().".to_string());
        }

        let worksheets = self.workbook.worksheets_mut();
        let n_idx = worksheets
            .iter()
            .position(|ws| ws.name() == sheet_name)
            .ok_or_else(|| format!("Unknown sheet {sheet_name:?}"))?;
        worksheets[..=n_idx].rotate_right(1);

        if let Some(n_idx_report) = self.report.sheets.iter().position(|name| name == sheet_name) {
            self.report.sheets[..=n_idx_report].rotate_right(1);
        }
        Ok(())
    }

    fn derive_class_format_spec(&self, class: EnumColumnClass) -> SpecCellFormat {
        match class {
            EnumColumnClass::Text => self.fmts.text.clone(),
            EnumColumnClass::Integer => self.fmts.integer.clone(),
            EnumColumnClass::Currency => self.fmts.currency.clone(),
            EnumColumnClass::Percent => self.fmts.percent.clone(),
            EnumColumnClass::Decimal => self.fmts.decimal.clone(),
        }
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate: String = format!("{base_name}__{n_idx}")
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX)
                .collect();
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn derive_column_class(
    df: &DataFrame,
    n_idx_col: usize,
    col_name: &str,
    options: &SpecTableSheetOptions,
) -> EnumColumnClass {
    let contains = |refs: &[String]| refs.iter().any(|c_ref| c_ref == col_name);

    if contains(&options.cols_currency) {
        return EnumColumnClass::Currency;
    }
    if contains(&options.cols_percent) {
        return EnumColumnClass::Percent;
    }
    if contains(&options.cols_integer) {
        return EnumColumnClass::Integer;
    }

    let dtype = df.get_columns()[n_idx_col].dtype();
    if dtype.is_integer() {
        EnumColumnClass::Integer
    } else if dtype.is_numeric() {
        EnumColumnClass::Decimal
    } else {
        EnumColumnClass::Text
    }
}

fn write_ranking_block(
    worksheet: &mut Worksheet,
    df: &DataFrame,
    col_start: usize,
    fmt_header: &Format,
    fmt_name: &Format,
    fmt_metric: &Format,
) -> Result<(), String> {
    for (n_idx_col, c_name) in df.get_column_names_str().iter().enumerate() {
        worksheet
            .write_string_with_format(
                1,
                cast_col_num(col_start + n_idx_col)?,
                *c_name,
                fmt_header,
            )
            .map_err(derive_xlsx_error_text)?;
    }

    for n_idx_row in 0..df.height() {
        for (n_idx_col, col) in df.get_columns().iter().enumerate() {
            let value = derive_cell_value_from_any_value(
                col.get(n_idx_row)
                    .map_err(|err| format!("Failed to access ranking value: {err}"))?,
            );
            let fmt = if n_idx_col == 0 { fmt_name } else { fmt_metric };
            write_cell_with_format(worksheet, n_idx_row + 2, col_start + n_idx_col, &value, fmt)?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn write_pair_table(
    worksheet: &mut Worksheet,
    col_start: usize,
    header_name: &str,
    header_value: &str,
    pairs: &[(String, f64)],
    fmt_header: &Format,
    fmt_name: &Format,
    fmt_value: &Format,
) -> Result<(), String> {
    worksheet
        .write_string_with_format(12, cast_col_num(col_start)?, header_name, fmt_header)
        .map_err(derive_xlsx_error_text)?;
    worksheet
        .write_string_with_format(12, cast_col_num(col_start + 1)?, header_value, fmt_header)
        .map_err(derive_xlsx_error_text)?;

    for (n_idx, (c_name, n_value)) in pairs.iter().enumerate() {
        let n_row = cast_row_num(13 + n_idx)?;
        worksheet
            .write_string_with_format(n_row, cast_col_num(col_start)?, c_name, fmt_name)
            .map_err(derive_xlsx_error_text)?;
        worksheet
            .write_number_with_format(n_row, cast_col_num(col_start + 1)?, *n_value, fmt_value)
            .map_err(derive_xlsx_error_text)?;
    }

    Ok(())
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), String> {
    match value {
        EnumCellValue::None => {
            worksheet
                .write_blank(cast_row_num(row_idx)?, cast_col_num(col_idx)?, format)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::String(val) => {
            worksheet
                .write_string_with_format(cast_row_num(row_idx)?, cast_col_num(col_idx)?, val, format)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::Number(val) => {
            worksheet
                .write_number_with_format(cast_row_num(row_idx)?, cast_col_num(col_idx)?, *val, format)
                .map_err(derive_xlsx_error_text)?;
        }
    }
    Ok(())
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}
