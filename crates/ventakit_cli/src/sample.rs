//! Demo input generator: three per-branch sales workbooks with realistic
//! product, seller, and price data.

use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_xlsxwriter::Workbook;

use ventakit_ingest::conf::TUP_COLS_REQUIRED;
use ventakit_ingest::util::round2;

/// Branch name, seller roster, and generated row count.
const TUP_BRANCHES: [(&str, &[&str], usize); 3] = [
    (
        "Centro",
        &["Juan Pérez", "Ana López", "Carlos Méndez", "María García"],
        150,
    ),
    (
        "Norte",
        &["Pedro Ramírez", "Lucía Torres", "Roberto Silva"],
        120,
    ),
    (
        "Sur",
        &["Carmen Ruiz", "Diego Morales", "Patricia Herrera"],
        130,
    ),
];

/// Product name, category, and unit price range.
const TUP_PRODUCTS: [(&str, &str, f64, f64); 32] = [
    ("Laptop Dell XPS", "Electrónica", 850.00, 1200.00),
    ("Laptop HP Pavilion", "Electrónica", 650.00, 900.00),
    ("Monitor Samsung 27\"", "Electrónica", 250.00, 400.00),
    ("Monitor LG 24\"", "Electrónica", 180.00, 300.00),
    ("Tablet Samsung", "Electrónica", 300.00, 450.00),
    ("iPad Air", "Electrónica", 550.00, 750.00),
    ("Impresora HP LaserJet", "Electrónica", 200.00, 350.00),
    ("Impresora Epson Multifuncional", "Electrónica", 150.00, 250.00),
    ("Disco Duro Externo 1TB", "Electrónica", 50.00, 80.00),
    ("SSD 500GB", "Electrónica", 60.00, 100.00),
    ("Mouse Logitech", "Accesorios", 15.00, 35.00),
    ("Teclado Mecánico", "Accesorios", 50.00, 100.00),
    ("Teclado Inalámbrico", "Accesorios", 25.00, 45.00),
    ("Webcam HD", "Accesorios", 40.00, 70.00),
    ("Audífonos Bluetooth", "Accesorios", 35.00, 80.00),
    ("Audífonos Gaming", "Accesorios", 60.00, 120.00),
    ("Cable HDMI 2m", "Accesorios", 8.00, 15.00),
    ("Cable USB-C", "Accesorios", 10.00, 20.00),
    ("Hub USB 4 puertos", "Accesorios", 15.00, 30.00),
    ("Mousepad Gaming", "Accesorios", 12.00, 25.00),
    ("Licencia Office 365", "Software", 70.00, 100.00),
    ("Antivirus Norton", "Software", 40.00, 60.00),
    ("Windows 11 Pro", "Software", 150.00, 200.00),
    ("Adobe Creative Cloud", "Software", 50.00, 80.00),
    ("AutoCAD Licencia", "Software", 200.00, 300.00),
    ("Memoria RAM 8GB", "Componentes", 35.00, 60.00),
    ("Memoria RAM 16GB", "Componentes", 70.00, 110.00),
    ("Procesador Intel i5", "Componentes", 180.00, 250.00),
    ("Procesador AMD Ryzen 5", "Componentes", 170.00, 240.00),
    ("Tarjeta Gráfica GTX", "Componentes", 250.00, 400.00),
    ("Placa Madre ASUS", "Componentes", 120.00, 180.00),
    ("Fuente de Poder 600W", "Componentes", 60.00, 90.00),
];

/// Sale dates are spread over this many days back from today.
const N_DAYS_BACK: i64 = 30;

/// Options for sample data generation.
#[derive(Debug, Clone)]
pub struct SpecSampleOptions {
    /// RNG seed; a fixed seed reproduces identical workbooks per day.
    pub seed: u64,
}

impl Default for SpecSampleOptions {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Generate one workbook per branch under `dir_out`.
///
/// Returns the written file paths in generation order. File names follow the
/// `ventas_sucursal_<branch>.xlsx` convention.
pub fn gen_sample_files(
    dir_out: &Path,
    options: &SpecSampleOptions,
) -> Result<Vec<PathBuf>, String> {
    std::fs::create_dir_all(dir_out)
        .map_err(|err| format!("Cannot create {:?}: {err}", dir_out))?;

    let mut rng = StdRng::seed_from_u64(options.seed);
    let date_today = Local::now().date_naive();
    let mut l_paths = Vec::with_capacity(TUP_BRANCHES.len());

    for (c_branch, l_sellers, n_rows) in TUP_BRANCHES {
        let path_file = dir_out.join(format!(
            "ventas_sucursal_{}.xlsx",
            c_branch.to_lowercase()
        ));
        write_branch_workbook(&path_file, c_branch, l_sellers, n_rows, date_today, &mut rng)?;
        tracing::info!(
            branch = c_branch,
            rows = n_rows,
            path = %path_file.display(),
            "sample workbook written"
        );
        l_paths.push(path_file);
    }

    Ok(l_paths)
}

fn write_branch_workbook(
    path_file: &Path,
    branch: &str,
    sellers: &[&str],
    n_rows: usize,
    date_today: NaiveDate,
    rng: &mut StdRng,
) -> Result<(), String> {
    let mut l_rows: Vec<(String, usize)> = (0..n_rows)
        .map(|_| {
            let c_date = (date_today - Duration::days(rng.gen_range(0..=N_DAYS_BACK)))
                .format("%Y-%m-%d")
                .to_string();
            let n_idx_product = rng.gen_range(0..TUP_PRODUCTS.len());
            (c_date, n_idx_product)
        })
        .collect();
    l_rows.sort();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Ventas")
        .map_err(|err| format!("xlsx write error: {err}"))?;

    for (n_idx_col, c_name) in TUP_COLS_REQUIRED.iter().enumerate() {
        worksheet
            .write_string(0, n_idx_col as u16, *c_name)
            .map_err(|err| format!("xlsx write error: {err}"))?;
    }

    for (n_idx_row, (c_date, n_idx_product)) in l_rows.iter().enumerate() {
        let (c_product, c_category, n_price_min, n_price_max) = TUP_PRODUCTS[*n_idx_product];
        let n_quantity = derive_quantity(c_product, rng);
        let n_price = round2(rng.gen_range(n_price_min..=n_price_max));
        let c_seller = sellers[rng.gen_range(0..sellers.len())];

        let n_row = (n_idx_row + 1) as u32;
        worksheet
            .write_string(n_row, 0, c_date)
            .and_then(|ws| ws.write_string(n_row, 1, c_product))
            .and_then(|ws| ws.write_string(n_row, 2, c_category))
            .and_then(|ws| ws.write_number(n_row, 3, n_quantity as f64))
            .and_then(|ws| ws.write_number(n_row, 4, n_price))
            .and_then(|ws| ws.write_string(n_row, 5, c_seller))
            .and_then(|ws| ws.write_string(n_row, 6, branch))
            .map_err(|err| format!("xlsx write error: {err}"))?;
    }

    workbook
        .save(path_file)
        .map_err(|err| format!("xlsx write error: {err}"))
}

/// Expensive items sell in small quantities, cheap ones in larger lots.
fn derive_quantity(product: &str, rng: &mut StdRng) -> i64 {
    let if_expensive = ["Laptop", "Monitor", "Tablet", "iPad", "Procesador"]
        .iter()
        .any(|kw| product.contains(kw));
    let if_cheap = ["Cable", "Mouse", "Mousepad"]
        .iter()
        .any(|kw| product.contains(kw));

    if if_expensive {
        rng.gen_range(1..=3)
    } else if if_cheap {
        rng.gen_range(1..=10)
    } else {
        rng.gen_range(1..=5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_tiers_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!((1..=3).contains(&derive_quantity("Laptop Dell XPS", &mut rng)));
            assert!((1..=10).contains(&derive_quantity("Cable HDMI 2m", &mut rng)));
            assert!((1..=5).contains(&derive_quantity("Antivirus Norton", &mut rng)));
        }
    }

    #[test]
    fn generated_files_follow_branch_naming() {
        let dir = tempfile::tempdir().unwrap();
        let l_paths = gen_sample_files(dir.path(), &SpecSampleOptions::default()).unwrap();

        assert_eq!(l_paths.len(), 3);
        let l_names: Vec<String> = l_paths
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            l_names,
            vec![
                "ventas_sucursal_centro.xlsx",
                "ventas_sucursal_norte.xlsx",
                "ventas_sucursal_sur.xlsx"
            ]
        );
        assert!(l_paths.iter().all(|path| path.is_file()));
    }
}
