//! Full pipeline run over generated sample data, verified by reading the
//! saved report back.

use calamine::{Data, Reader, Xlsx, open_workbook};

use ventakit_cli::pipeline::{PipelineError, SpecPipelineOptions, run_consolidation};
use ventakit_cli::sample::{SpecSampleOptions, gen_sample_files};

#[test]
fn sample_data_consolidates_into_a_five_sheet_report() {
    let dir = tempfile::tempdir().unwrap();
    let dir_input = dir.path().join("input");
    let path_file_out = dir.path().join("reporte_consolidado.xlsx");

    gen_sample_files(&dir_input, &SpecSampleOptions { seed: 42 }).unwrap();

    let outcome = run_consolidation(&SpecPipelineOptions {
        dir_input: dir_input.clone(),
        path_file_out: path_file_out.clone(),
        pattern: "*.xlsx".to_string(),
        top_n: 10,
    })
    .unwrap();

    assert_eq!(outcome.report_ingest.cnt_files, 3);
    assert_eq!(outcome.report_ingest.cnt_records, 400);
    assert_eq!(outcome.stats.cnt_transactions, 400);
    assert_eq!(outcome.stats.cnt_branches, 3);
    assert!(outcome.stats.total_sales > 0.0);
    assert_eq!(
        outcome.report_workbook.sheets,
        vec![
            "Dashboard",
            "Datos_Consolidados",
            "Top_Productos",
            "Analisis_Vendedores",
            "Resumen_Sucursales"
        ]
    );

    let mut workbook: Xlsx<_> = open_workbook(&path_file_out).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec![
            "Dashboard".to_string(),
            "Datos_Consolidados".to_string(),
            "Top_Productos".to_string(),
            "Analisis_Vendedores".to_string(),
            "Resumen_Sucursales".to_string()
        ]
    );

    // Header plus 400 data rows.
    let range_data = workbook.worksheet_range("Datos_Consolidados").unwrap();
    assert_eq!(range_data.height(), 401);
    assert_eq!(
        range_data.get_value((0, 7)),
        Some(&Data::String("Total_Venta".to_string()))
    );

    // The total-sales KPI must match the sum of the written totals column.
    let n_total_written: f64 = (1..range_data.height() as u32)
        .map(|n_row| match range_data.get_value((n_row, 7)) {
            Some(Data::Float(val)) => *val,
            Some(Data::Int(val)) => *val as f64,
            other => panic!("expected number in totals column, got {other:?}"),
        })
        .sum();
    assert!((n_total_written - outcome.stats.total_sales).abs() < 1e-6);

    // Branch sheet footer: SUM formulas over totals, transactions, and the
    // share column, whose sum renders as 100%.
    let range_branches = workbook.worksheet_range("Resumen_Sucursales").unwrap();
    assert_eq!(
        range_branches.get_value((4, 0)),
        Some(&Data::String("TOTAL".to_string()))
    );
    let range_formulas = workbook.worksheet_formula("Resumen_Sucursales").unwrap();
    assert_eq!(
        range_formulas.get_value((4, 1)),
        Some(&"SUM(B2:B4)".to_string())
    );
    assert_eq!(
        range_formulas.get_value((4, 3)),
        Some(&"SUM(D2:D4)".to_string())
    );

    let range_dashboard = workbook.worksheet_range("Dashboard").unwrap();
    assert_eq!(
        range_dashboard.get_value((1, 1)),
        Some(&Data::String("REPORTE CONSOLIDADO DE VENTAS".to_string()))
    );
    match range_dashboard.get_value((4, 2)) {
        Some(Data::Float(val)) => assert!((val - outcome.stats.total_sales).abs() < 1e-6),
        other => panic!("expected total-sales KPI number, got {other:?}"),
    }
}

#[test]
fn unmatched_pattern_surfaces_as_ingest_error() {
    let dir = tempfile::tempdir().unwrap();
    let dir_input = dir.path().join("input");
    gen_sample_files(&dir_input, &SpecSampleOptions::default()).unwrap();

    let err = run_consolidation(&SpecPipelineOptions {
        dir_input,
        path_file_out: dir.path().join("out.xlsx"),
        pattern: "*.xls".to_string(),
        top_n: 10,
    })
    .unwrap_err();

    assert!(matches!(err, PipelineError::Ingest(_)));
}

#[test]
fn missing_input_directory_fails_before_writing_output() {
    let dir = tempfile::tempdir().unwrap();
    let path_file_out = dir.path().join("out.xlsx");

    let err = run_consolidation(&SpecPipelineOptions {
        dir_input: dir.path().join("no_such_dir"),
        path_file_out: path_file_out.clone(),
        pattern: "*.xlsx".to_string(),
        top_n: 10,
    })
    .unwrap_err();

    assert!(matches!(err, PipelineError::Ingest(_)));
    assert!(!path_file_out.exists());
}
