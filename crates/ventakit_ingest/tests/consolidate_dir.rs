//! File-level ingest tests against real workbooks on disk.

use std::path::Path;

use rust_xlsxwriter::Workbook;
use ventakit_ingest::{
    COL_TOTAL, IngestError, SpecIngestOptions, TUP_COLS_REQUIRED, consolidate_sales_dir,
    read_sales_file,
};

/// Write a minimal sales workbook with `rows` data rows.
fn write_sales_fixture(path: &Path, headers: &[&str], rows: &[(&str, &str, &str, i64, f64, &str, &str)]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (n_idx_col, c_header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, n_idx_col as u16, *c_header)
            .unwrap();
    }
    for (n_idx_row, row) in rows.iter().enumerate() {
        let n_row = (n_idx_row + 1) as u32;
        worksheet.write_string(n_row, 0, row.0).unwrap();
        worksheet.write_string(n_row, 1, row.1).unwrap();
        worksheet.write_string(n_row, 2, row.2).unwrap();
        worksheet.write_number(n_row, 3, row.3 as f64).unwrap();
        worksheet.write_number(n_row, 4, row.4).unwrap();
        worksheet.write_string(n_row, 5, row.5).unwrap();
        worksheet.write_string(n_row, 6, row.6).unwrap();
    }

    workbook.save(path).unwrap();
}

fn sample_row(date: &'static str) -> (&'static str, &'static str, &'static str, i64, f64, &'static str, &'static str) {
    (date, "Mouse Logitech", "Accesorios", 2, 19.99, "Ana López", "Centro")
}

#[test]
fn consolidated_record_count_equals_sum_of_per_file_counts() {
    let dir = tempfile::tempdir().unwrap();

    write_sales_fixture(
        &dir.path().join("ventas_centro.xlsx"),
        &TUP_COLS_REQUIRED,
        &[sample_row("2024-12-01"), sample_row("2024-12-02")],
    );
    write_sales_fixture(
        &dir.path().join("ventas_norte.xlsx"),
        &TUP_COLS_REQUIRED,
        &[sample_row("2024-12-03")],
    );

    let (df, report) =
        consolidate_sales_dir(dir.path(), &SpecIngestOptions::default()).unwrap();

    assert_eq!(report.cnt_files, 2);
    assert_eq!(report.cnt_records, 3);
    assert_eq!(df.height(), 3);
    assert_eq!(df.width(), 8);

    // Derived totals: 2 * 19.99 per row.
    let n_total: f64 = df
        .column(COL_TOTAL)
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .sum();
    assert!((n_total - 3.0 * 39.98).abs() < 1e-9);
}

#[test]
fn file_missing_required_column_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    // "Categoría" replaced by its unaccented spelling: exact match must fail.
    let headers = [
        "Fecha",
        "Producto",
        "Categoria",
        "Cantidad",
        "Precio_Unitario",
        "Vendedor",
        "Sucursal",
    ];
    write_sales_fixture(
        &dir.path().join("ventas_sur.xlsx"),
        &headers,
        &[sample_row("2024-12-01")],
    );

    let err = consolidate_sales_dir(dir.path(), &SpecIngestOptions::default()).unwrap_err();
    match err {
        IngestError::MissingColumns { columns, .. } => {
            assert_eq!(columns, vec!["Categoría".to_string()]);
        }
        other => panic!("expected MissingColumns, got {other}"),
    }
}

#[test]
fn blank_required_cell_fails_the_file_with_row_context() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ventas_centro.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (n_idx_col, c_header) in TUP_COLS_REQUIRED.iter().enumerate() {
        worksheet
            .write_string(0, n_idx_col as u16, *c_header)
            .unwrap();
    }
    // Row 1 is valid, row 2 leaves "Vendedor" blank.
    let row = sample_row("2024-12-01");
    for (n_row, if_skip_seller) in [(1u32, false), (2u32, true)] {
        worksheet.write_string(n_row, 0, row.0).unwrap();
        worksheet.write_string(n_row, 1, row.1).unwrap();
        worksheet.write_string(n_row, 2, row.2).unwrap();
        worksheet.write_number(n_row, 3, row.3 as f64).unwrap();
        worksheet.write_number(n_row, 4, row.4).unwrap();
        if !if_skip_seller {
            worksheet.write_string(n_row, 5, row.5).unwrap();
        }
        worksheet.write_string(n_row, 6, row.6).unwrap();
    }
    workbook.save(&path).unwrap();

    let err = read_sales_file(&path).unwrap_err();
    match err {
        IngestError::InvalidCell { row, column, .. } => {
            assert_eq!(row, 2);
            assert_eq!(column, "Vendedor");
        }
        other => panic!("expected InvalidCell, got {other}"),
    }
}

#[test]
fn corrupt_workbook_is_reported_as_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ventas_rotas.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let err = read_sales_file(&path).unwrap_err();
    assert!(matches!(err, IngestError::FileUnreadable { .. }));

    let err = consolidate_sales_dir(dir.path(), &SpecIngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileUnreadable { .. }));
}

#[test]
fn missing_directory_and_empty_directory_are_distinct_errors() {
    let dir = tempfile::tempdir().unwrap();

    let err = consolidate_sales_dir(
        &dir.path().join("no_such_dir"),
        &SpecIngestOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, IngestError::InputDirMissing(_)));

    let err = consolidate_sales_dir(dir.path(), &SpecIngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::NoFilesMatched { .. }));
}
