//! Workbook constants, corporate palette, and default format presets.

use crate::spec::{SpecCellFormat, SpecReportFormats};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Dashboard/KPIs sheet.
pub const SHEET_DASHBOARD: &str = "Dashboard";
/// Full consolidated data sheet.
pub const SHEET_DATA: &str = "Datos_Consolidados";
/// Top-products sheet (two side-by-side rankings).
pub const SHEET_TOP_PRODUCTS: &str = "Top_Productos";
/// Seller analysis sheet.
pub const SHEET_SELLERS: &str = "Analisis_Vendedores";
/// Branch summary sheet.
pub const SHEET_BRANCHES: &str = "Resumen_Sucursales";

/// Corporate palette (titles/headers).
pub const COLOR_BLUE_DARK: &str = "#1F4788";
/// KPI value background.
pub const COLOR_BLUE_LIGHT: &str = "#D6E4F5";
/// Secondary text.
pub const COLOR_GRAY: &str = "#7F7F7F";
/// Positive values.
pub const COLOR_GREEN: &str = "#70AD47";
/// Header/banner text.
pub const COLOR_WHITE: &str = "#FFFFFF";

/// Currency number format.
pub const NUM_FMT_CURRENCY: &str = "$#,##0.00";
/// Integer number format.
pub const NUM_FMT_INTEGER: &str = "#,##0";
/// Percentage number format (fraction rendered as percent).
pub const NUM_FMT_PERCENT: &str = "0.0%";
/// Plain decimal number format.
pub const NUM_FMT_DECIMAL: &str = "#,##0.00";

/// Build the default format presets used by [`crate::writer::ReportWriter`].
pub fn derive_default_report_formats() -> SpecReportFormats {
    let cfg_base = SpecCellFormat {
        font_name: Some("Calibri".to_string()),
        font_size: Some(11),
        ..Default::default()
    };

    SpecReportFormats {
        text: cfg_base.clone(),
        header: cfg_base.with_(SpecCellFormat {
            bold: Some(true),
            align: Some("center".to_string()),
            valign: Some("vcenter".to_string()),
            bg_color: Some(COLOR_BLUE_DARK.to_string()),
            font_color: Some(COLOR_WHITE.to_string()),
            border: Some(1),
            ..Default::default()
        }),
        integer: cfg_base.with_(SpecCellFormat {
            num_format: Some(NUM_FMT_INTEGER.to_string()),
            ..Default::default()
        }),
        currency: cfg_base.with_(SpecCellFormat {
            num_format: Some(NUM_FMT_CURRENCY.to_string()),
            ..Default::default()
        }),
        percent: cfg_base.with_(SpecCellFormat {
            num_format: Some(NUM_FMT_PERCENT.to_string()),
            ..Default::default()
        }),
        decimal: cfg_base.with_(SpecCellFormat {
            num_format: Some(NUM_FMT_DECIMAL.to_string()),
            ..Default::default()
        }),
        title: cfg_base.with_(SpecCellFormat {
            font_size: Some(16),
            bold: Some(true),
            font_color: Some(COLOR_BLUE_DARK.to_string()),
            valign: Some("vcenter".to_string()),
            ..Default::default()
        }),
        caption: cfg_base.with_(SpecCellFormat {
            font_size: Some(10),
            font_color: Some(COLOR_GRAY.to_string()),
            ..Default::default()
        }),
        section: cfg_base.with_(SpecCellFormat {
            font_size: Some(12),
            bold: Some(true),
            font_color: Some(COLOR_BLUE_DARK.to_string()),
            ..Default::default()
        }),
        kpi_label: cfg_base.with_(SpecCellFormat {
            bold: Some(true),
            ..Default::default()
        }),
        kpi_value: cfg_base.with_(SpecCellFormat {
            font_color: Some(COLOR_GREEN.to_string()),
            bg_color: Some(COLOR_BLUE_LIGHT.to_string()),
            align: Some("center".to_string()),
            ..Default::default()
        }),
        banner: cfg_base.with_(SpecCellFormat {
            font_size: Some(12),
            bold: Some(true),
            align: Some("center".to_string()),
            bg_color: Some(COLOR_BLUE_DARK.to_string()),
            font_color: Some(COLOR_WHITE.to_string()),
            ..Default::default()
        }),
        total_label: cfg_base.with_(SpecCellFormat {
            bold: Some(true),
            bg_color: Some(COLOR_BLUE_LIGHT.to_string()),
            ..Default::default()
        }),
    }
}
