//! Shared report models: cell formats, sheet options, and the run report.

use std::fmt;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification converted to `rust_xlsxwriter` formats at write
/// time. Patch-merge semantics allow presets to be derived from a base.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Horizontal alignment (`left`/`center`/`right`).
    pub align: Option<String>,
    /// Vertical alignment (`top`/`vcenter`/`bottom`).
    pub valign: Option<String>,
    /// Border style for all sides (0 = none, 1 = thin).
    pub border: Option<i64>,
    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color.
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

/// Named format presets used across all sheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecReportFormats {
    /// Generic text cell.
    pub text: SpecCellFormat,
    /// Table header cell.
    pub header: SpecCellFormat,
    /// Integer number cell.
    pub integer: SpecCellFormat,
    /// Currency number cell.
    pub currency: SpecCellFormat,
    /// Percentage number cell.
    pub percent: SpecCellFormat,
    /// Plain decimal number cell.
    pub decimal: SpecCellFormat,
    /// Dashboard main title.
    pub title: SpecCellFormat,
    /// Dashboard period caption.
    pub caption: SpecCellFormat,
    /// Dashboard chart section title.
    pub section: SpecCellFormat,
    /// KPI label cell.
    pub kpi_label: SpecCellFormat,
    /// KPI value cell.
    pub kpi_value: SpecCellFormat,
    /// Merged banner cell on the top-products sheet.
    pub banner: SpecCellFormat,
    /// `TOTAL` row label/values on the branch sheet.
    pub total_label: SpecCellFormat,
}

/// Normalized cell value during the write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TableSheetOptions

/// Per-sheet options for generic table writes.
#[derive(Debug, Clone, Default)]
pub struct SpecTableSheetOptions {
    /// Columns (by name) written with the currency format.
    pub cols_currency: Vec<String>,
    /// Columns (by name) written with the integer format.
    pub cols_integer: Vec<String>,
    /// Columns (by name) written with the percent format.
    pub cols_percent: Vec<String>,
    /// Number of frozen columns (header row is always frozen).
    pub col_freeze: usize,
    /// Columns (by name) summed into a bold `TOTAL` footer row.
    ///
    /// Empty means no footer. The label lands in the first column.
    pub cols_totals: Vec<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WorkbookReport

/// Run report for one output workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportWorkbook {
    /// Actual sheet names in write order.
    pub sheets: Vec<String>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ReportWorkbook {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} sheets={} warnings={}",
            self.sheets.len(),
            self.warnings.len()
        )
    }
}

impl fmt::Display for ReportWorkbook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[REPORT]"))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
