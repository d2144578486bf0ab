//! Stateless cell/header conversion helpers used by the reader.

use calamine::Data;
use chrono::NaiveDate;

////////////////////////////////////////////////////////////////////////////////
// #region HeaderValidation

/// Return required columns absent from `headers`, in required order.
///
/// Matching is exact (case- and diacritic-sensitive), per the source policy.
pub fn find_missing_columns(headers: &[String], cols_required: &[&str]) -> Vec<String> {
    cols_required
        .iter()
        .filter(|c_required| !headers.iter().any(|c_header| c_header == *c_required))
        .map(ToString::to_string)
        .collect()
}

/// Resolve required column names to indices in the header row.
///
/// Call only after [`find_missing_columns`] returned empty.
pub fn select_column_indices(headers: &[String], cols_required: &[&str]) -> Vec<usize> {
    cols_required
        .iter()
        .filter_map(|c_required| {
            headers.iter().position(|c_header| c_header == c_required)
        })
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellConversion

/// Normalize a date cell to an ISO `YYYY-MM-DD` string.
///
/// Accepts native Excel datetime cells and `YYYY-MM-DD` / `DD/MM/YYYY` text.
pub fn convert_cell_to_iso_date(cell: &Data) -> Result<String, String> {
    match cell {
        Data::Empty => Err("required value is blank".to_string()),
        Data::DateTime(value) => value
            .as_datetime()
            .map(|dt| dt.date().format("%Y-%m-%d").to_string())
            .ok_or_else(|| "unrepresentable Excel datetime".to_string()),
        Data::DateTimeIso(value) => {
            let c_date_part: String = value.chars().take(10).collect();
            NaiveDate::parse_from_str(&c_date_part, "%Y-%m-%d")
                .map(|date| date.format("%Y-%m-%d").to_string())
                .map_err(|_| format!("unparseable ISO date {value:?}"))
        }
        Data::String(value) => {
            let c_text = value.trim();
            NaiveDate::parse_from_str(c_text, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(c_text, "%d/%m/%Y"))
                .map(|date| date.format("%Y-%m-%d").to_string())
                .map_err(|_| format!("unparseable date {c_text:?}"))
        }
        other => Err(format!("expected a date, found {other:?}")),
    }
}

/// Extract a non-empty text value.
pub fn convert_cell_to_text(cell: &Data) -> Result<String, String> {
    match cell {
        Data::Empty => Err("required value is blank".to_string()),
        Data::String(value) => {
            let c_text = value.trim();
            if c_text.is_empty() {
                Err("required value is blank".to_string())
            } else {
                Ok(c_text.to_string())
            }
        }
        other => Err(format!("expected text, found {other:?}")),
    }
}

/// Extract a non-negative integer quantity.
pub fn convert_cell_to_quantity(cell: &Data) -> Result<i64, String> {
    let n_value = match cell {
        Data::Empty => return Err("required value is blank".to_string()),
        Data::Int(value) => *value,
        Data::Float(value) => {
            if value.fract() != 0.0 {
                return Err(format!("expected an integer quantity, found {value}"));
            }
            *value as i64
        }
        other => return Err(format!("expected a quantity, found {other:?}")),
    };

    if n_value < 0 {
        return Err(format!("quantity must be non-negative, found {n_value}"));
    }
    Ok(n_value)
}

/// Extract a non-negative decimal unit price.
pub fn convert_cell_to_price(cell: &Data) -> Result<f64, String> {
    let n_value = match cell {
        Data::Empty => return Err("required value is blank".to_string()),
        Data::Int(value) => *value as f64,
        Data::Float(value) => *value,
        other => return Err(format!("expected a price, found {other:?}")),
    };

    if !n_value.is_finite() || n_value < 0.0 {
        return Err(format!("price must be a non-negative number, found {n_value}"));
    }
    Ok(n_value)
}

/// Round to 2 decimals (half away from zero), matching the derived-total rule.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_missing_columns_is_exact_match_including_accents() {
        let headers = vec![
            "Fecha".to_string(),
            "Producto".to_string(),
            "Categoria".to_string(), // accent stripped: must not match
        ];
        let missing = find_missing_columns(&headers, &["Fecha", "Categoría"]);
        assert_eq!(missing, vec!["Categoría".to_string()]);
    }

    #[test]
    fn select_column_indices_follows_required_order() {
        let headers = vec![
            "Sucursal".to_string(),
            "Fecha".to_string(),
            "Producto".to_string(),
        ];
        let indices = select_column_indices(&headers, &["Fecha", "Producto", "Sucursal"]);
        assert_eq!(indices, vec![1, 2, 0]);
    }

    #[test]
    fn convert_cell_to_iso_date_accepts_iso_and_day_first_text() {
        let iso = convert_cell_to_iso_date(&Data::String("2024-12-03".to_string())).unwrap();
        assert_eq!(iso, "2024-12-03");

        let day_first = convert_cell_to_iso_date(&Data::String("03/12/2024".to_string())).unwrap();
        assert_eq!(day_first, "2024-12-03");

        assert!(convert_cell_to_iso_date(&Data::String("December 3".to_string())).is_err());
        assert!(convert_cell_to_iso_date(&Data::Empty).is_err());
    }

    #[test]
    fn convert_cell_to_quantity_rejects_negative_and_fractional() {
        assert_eq!(convert_cell_to_quantity(&Data::Int(4)).unwrap(), 4);
        assert_eq!(convert_cell_to_quantity(&Data::Float(7.0)).unwrap(), 7);
        assert!(convert_cell_to_quantity(&Data::Int(-1)).is_err());
        assert!(convert_cell_to_quantity(&Data::Float(2.5)).is_err());
        assert!(convert_cell_to_quantity(&Data::Empty).is_err());
    }

    #[test]
    fn convert_cell_to_price_rejects_negative() {
        assert_eq!(convert_cell_to_price(&Data::Float(19.99)).unwrap(), 19.99);
        assert_eq!(convert_cell_to_price(&Data::Int(20)).unwrap(), 20.0);
        assert!(convert_cell_to_price(&Data::Float(-0.01)).is_err());
    }

    #[test]
    fn convert_cell_to_text_trims_and_rejects_blank() {
        assert_eq!(
            convert_cell_to_text(&Data::String("  Centro ".to_string())).unwrap(),
            "Centro"
        );
        assert!(convert_cell_to_text(&Data::String("   ".to_string())).is_err());
    }

    #[test]
    fn round2_rounds_to_cents() {
        assert_eq!(round2(10.0 / 3.0), 3.33);
        assert_eq!(round2(-1.2349), -1.23);
        assert_eq!(round2(2.5), 2.5);
    }
}
