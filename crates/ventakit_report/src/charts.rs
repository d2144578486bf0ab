//! Native chart builders for the dashboard sheet.
//!
//! Charts reference worksheet cell ranges directly, so the chart-source
//! tables must be written before the workbook is saved.

use rust_xlsxwriter::{Chart, ChartLine, ChartSolidFill, ChartType};

use crate::conf::COLOR_BLUE_DARK;

/// Cell range on one sheet: `(row_first, col, row_last)` for a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecChartColumnRange {
    /// First data row (zero-based, header excluded).
    pub row_first: u32,
    /// Last data row (inclusive).
    pub row_last: u32,
    /// Column index.
    pub col: u16,
}

/// Column (vertical bar) chart over a category/value column pair.
pub fn build_column_chart(
    title: &str,
    sheet_name: &str,
    range_categories: SpecChartColumnRange,
    range_values: SpecChartColumnRange,
) -> Chart {
    let mut chart = Chart::new(ChartType::Column);
    chart.title().set_name(title);
    chart.legend().set_hidden();
    chart.set_width(440).set_height(300);

    chart
        .add_series()
        .set_categories((
            sheet_name,
            range_categories.row_first,
            range_categories.col,
            range_categories.row_last,
            range_categories.col,
        ))
        .set_values((
            sheet_name,
            range_values.row_first,
            range_values.col,
            range_values.row_last,
            range_values.col,
        ))
        .set_format(ChartSolidFill::new().set_color(COLOR_BLUE_DARK));

    chart
}

/// Pie chart over a category/value column pair.
pub fn build_pie_chart(
    title: &str,
    sheet_name: &str,
    range_categories: SpecChartColumnRange,
    range_values: SpecChartColumnRange,
) -> Chart {
    let mut chart = Chart::new(ChartType::Pie);
    chart.title().set_name(title);
    chart.set_width(440).set_height(300);

    chart
        .add_series()
        .set_categories((
            sheet_name,
            range_categories.row_first,
            range_categories.col,
            range_categories.row_last,
            range_categories.col,
        ))
        .set_values((
            sheet_name,
            range_values.row_first,
            range_values.col,
            range_values.row_last,
            range_values.col,
        ));

    chart
}

/// Line chart over a category/value column pair.
pub fn build_line_chart(
    title: &str,
    sheet_name: &str,
    range_categories: SpecChartColumnRange,
    range_values: SpecChartColumnRange,
) -> Chart {
    let mut chart = Chart::new(ChartType::Line);
    chart.title().set_name(title);
    chart.legend().set_hidden();
    chart.set_width(720).set_height(300);

    chart
        .add_series()
        .set_categories((
            sheet_name,
            range_categories.row_first,
            range_categories.col,
            range_categories.row_last,
            range_categories.col,
        ))
        .set_values((
            sheet_name,
            range_values.row_first,
            range_values.col,
            range_values.row_last,
            range_values.col,
        ))
        .set_format(ChartLine::new().set_color(COLOR_BLUE_DARK));

    chart
}
