//! Grouped summaries over the consolidated sales frame.
//!
//! Every function is a pure group-by-and-reduce over the frame produced by
//! `ventakit_ingest`; rankings are strictly ordered on the ranking metric with
//! name-ascending tie-break so repeated runs emit identical tables.

use polars::prelude::{DataFrame, DataType, IntoLazy, SortMultipleOptions, col};

use ventakit_ingest::conf::{
    COL_BRANCH, COL_CATEGORY, COL_DATE, COL_PRODUCT, COL_QUANTITY, COL_SELLER, COL_TOTAL,
};

use crate::conf::{COL_AVG_TICKET, COL_SHARE, COL_TOTAL_SALES, COL_TRANSACTIONS, COL_UNITS_SOLD};
use crate::spec::SpecGeneralStats;

////////////////////////////////////////////////////////////////////////////////
// #region GeneralStats

/// Compute headline KPI metrics. Fails on an empty frame.
pub fn derive_general_stats(df: &DataFrame) -> Result<SpecGeneralStats, String> {
    let n_transactions = df.height();
    if n_transactions == 0 {
        return Err("Cannot compute statistics over an empty consolidated frame.".to_string());
    }

    let totals = df
        .column(COL_TOTAL)
        .map_err(derive_polars_error_text)?
        .as_materialized_series()
        .f64()
        .map_err(derive_polars_error_text)?;
    let n_total_sales: f64 = totals.into_iter().flatten().sum();

    let dates = df
        .column(COL_DATE)
        .map_err(derive_polars_error_text)?
        .as_materialized_series()
        .str()
        .map_err(derive_polars_error_text)?;
    let c_date_start = dates
        .into_iter()
        .flatten()
        .min()
        .unwrap_or_default()
        .to_string();
    let c_date_end = dates
        .into_iter()
        .flatten()
        .max()
        .unwrap_or_default()
        .to_string();

    Ok(SpecGeneralStats {
        total_sales: n_total_sales,
        cnt_transactions: n_transactions,
        avg_ticket: n_total_sales / n_transactions as f64,
        date_start: c_date_start,
        date_end: c_date_end,
        cnt_branches: count_unique(df, COL_BRANCH)?,
        cnt_sellers: count_unique(df, COL_SELLER)?,
        cnt_products: count_unique(df, COL_PRODUCT)?,
    })
}

fn count_unique(df: &DataFrame, col_name: &str) -> Result<usize, String> {
    df.column(col_name)
        .map_err(derive_polars_error_text)?
        .as_materialized_series()
        .n_unique()
        .map_err(derive_polars_error_text)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region GroupedSummaries

/// Per-branch totals, transaction counts, and share of the grand total.
///
/// Sorted by total descending, branch name ascending on ties.
pub fn derive_branch_summary(df: &DataFrame) -> Result<DataFrame, String> {
    df.clone()
        .lazy()
        .group_by([col(COL_BRANCH)])
        .agg([
            col(COL_TOTAL).sum().alias(COL_TOTAL_SALES),
            col(COL_TOTAL)
                .count()
                .cast(DataType::Int64)
                .alias(COL_TRANSACTIONS),
        ])
        .with_column((col(COL_TOTAL_SALES) / col(COL_TOTAL_SALES).sum()).alias(COL_SHARE))
        .sort_by_exprs(
            [col(COL_TOTAL_SALES), col(COL_BRANCH)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()
        .map_err(derive_polars_error_text)
}

/// Two product rankings: units sold and sales amount, truncated to `top_n`.
///
/// Both are strictly ordered descending on the ranking metric; ties are broken
/// by product name ascending.
pub fn derive_top_products(
    df: &DataFrame,
    top_n: usize,
) -> Result<(DataFrame, DataFrame), String> {
    let df_by_quantity = df
        .clone()
        .lazy()
        .group_by([col(COL_PRODUCT)])
        .agg([col(COL_QUANTITY).sum().alias(COL_QUANTITY)])
        .sort_by_exprs(
            [col(COL_QUANTITY), col(COL_PRODUCT)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .limit(top_n as u32)
        .collect()
        .map_err(derive_polars_error_text)?;

    let df_by_amount = df
        .clone()
        .lazy()
        .group_by([col(COL_PRODUCT)])
        .agg([col(COL_TOTAL).sum().alias(COL_TOTAL)])
        .sort_by_exprs(
            [col(COL_TOTAL), col(COL_PRODUCT)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .limit(top_n as u32)
        .collect()
        .map_err(derive_polars_error_text)?;

    Ok((df_by_quantity, df_by_amount))
}

/// Per-seller totals, transaction counts, and average ticket.
pub fn derive_seller_summary(df: &DataFrame) -> Result<DataFrame, String> {
    df.clone()
        .lazy()
        .group_by([col(COL_SELLER)])
        .agg([
            col(COL_TOTAL).sum().alias(COL_TOTAL_SALES),
            col(COL_TOTAL)
                .count()
                .cast(DataType::Int64)
                .alias(COL_TRANSACTIONS),
        ])
        .with_column((col(COL_TOTAL_SALES) / col(COL_TRANSACTIONS)).alias(COL_AVG_TICKET))
        .sort_by_exprs(
            [col(COL_TOTAL_SALES), col(COL_SELLER)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()
        .map_err(derive_polars_error_text)
}

/// Per-category totals, units sold, and share of the grand total.
pub fn derive_category_summary(df: &DataFrame) -> Result<DataFrame, String> {
    df.clone()
        .lazy()
        .group_by([col(COL_CATEGORY)])
        .agg([
            col(COL_TOTAL).sum().alias(COL_TOTAL_SALES),
            col(COL_QUANTITY).sum().alias(COL_UNITS_SOLD),
        ])
        .with_column((col(COL_TOTAL_SALES) / col(COL_TOTAL_SALES).sum()).alias(COL_SHARE))
        .sort_by_exprs(
            [col(COL_TOTAL_SALES), col(COL_CATEGORY)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()
        .map_err(derive_polars_error_text)
}

/// Per-date totals, sorted by date ascending (ISO strings sort correctly).
pub fn derive_daily_trend(df: &DataFrame) -> Result<DataFrame, String> {
    df.clone()
        .lazy()
        .group_by([col(COL_DATE)])
        .agg([col(COL_TOTAL).sum().alias(COL_TOTAL)])
        .sort_by_exprs([col(COL_DATE)], SortMultipleOptions::default())
        .collect()
        .map_err(derive_polars_error_text)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

fn derive_polars_error_text(err: polars::prelude::PolarsError) -> String {
    format!("polars error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    fn sample_frame() -> DataFrame {
        df!(
            COL_DATE => ["2024-12-02", "2024-12-01", "2024-12-01", "2024-12-03"],
            COL_PRODUCT => ["Mouse", "Teclado", "Mouse", "Webcam"],
            COL_CATEGORY => ["Accesorios", "Accesorios", "Accesorios", "Video"],
            COL_QUANTITY => [2i64, 1, 3, 1],
            "Precio_Unitario" => [10.0, 50.0, 10.0, 40.0],
            COL_SELLER => ["Ana", "Ana", "Luis", "Luis"],
            COL_BRANCH => ["Centro", "Centro", "Norte", "Norte"],
            COL_TOTAL => [20.0, 50.0, 30.0, 40.0],
        )
        .unwrap()
    }

    fn column_f64(df: &DataFrame, name: &str) -> Vec<f64> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    fn column_str(df: &DataFrame, name: &str) -> Vec<String> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn general_stats_match_hand_computed_values() {
        let stats = derive_general_stats(&sample_frame()).unwrap();
        assert_eq!(stats.cnt_transactions, 4);
        assert!((stats.total_sales - 140.0).abs() < 1e-9);
        assert!((stats.avg_ticket - 35.0).abs() < 1e-9);
        assert_eq!(stats.date_start, "2024-12-01");
        assert_eq!(stats.date_end, "2024-12-03");
        assert_eq!(stats.cnt_branches, 2);
        assert_eq!(stats.cnt_sellers, 2);
        assert_eq!(stats.cnt_products, 3);
    }

    #[test]
    fn general_stats_reject_empty_frame() {
        let df_empty = sample_frame()
            .lazy()
            .limit(0)
            .collect()
            .unwrap();
        assert!(derive_general_stats(&df_empty).is_err());
    }

    #[test]
    fn branch_summary_orders_by_total_and_shares_sum_to_one() {
        let df_summary = derive_branch_summary(&sample_frame()).unwrap();

        assert_eq!(column_str(&df_summary, COL_BRANCH), vec!["Centro", "Norte"]);
        assert_eq!(column_f64(&df_summary, COL_TOTAL_SALES), vec![70.0, 70.0]);

        let n_share_total: f64 = column_f64(&df_summary, COL_SHARE).iter().sum();
        assert!((n_share_total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn branch_summary_breaks_total_ties_by_name_ascending() {
        // Centro and Norte both total 70.0; Centro must come first.
        let df_summary = derive_branch_summary(&sample_frame()).unwrap();
        assert_eq!(column_str(&df_summary, COL_BRANCH), vec!["Centro", "Norte"]);
    }

    #[test]
    fn top_products_are_strictly_ordered_and_truncated() {
        let (df_by_qty, df_by_amount) = derive_top_products(&sample_frame(), 2).unwrap();

        // Quantities: Mouse 5, Teclado 1, Webcam 1 -> top 2 keeps Teclado by
        // name-ascending tie-break against Webcam.
        assert_eq!(column_str(&df_by_qty, COL_PRODUCT), vec!["Mouse", "Teclado"]);

        // Amounts: Mouse 50, Teclado 50, Webcam 40 -> tie broken by name.
        assert_eq!(
            column_str(&df_by_amount, COL_PRODUCT),
            vec!["Mouse", "Teclado"]
        );
        assert_eq!(column_f64(&df_by_amount, COL_TOTAL), vec![50.0, 50.0]);
    }

    #[test]
    fn seller_summary_computes_average_ticket() {
        let df_summary = derive_seller_summary(&sample_frame()).unwrap();

        assert_eq!(column_str(&df_summary, COL_SELLER), vec!["Ana", "Luis"]);
        assert_eq!(column_f64(&df_summary, COL_AVG_TICKET), vec![35.0, 35.0]);
    }

    #[test]
    fn category_summary_sums_units_and_shares() {
        let df_summary = derive_category_summary(&sample_frame()).unwrap();

        assert_eq!(
            column_str(&df_summary, COL_CATEGORY),
            vec!["Accesorios", "Video"]
        );
        assert_eq!(column_f64(&df_summary, COL_TOTAL_SALES), vec![100.0, 40.0]);

        let units = df_summary
            .column(COL_UNITS_SOLD)
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        assert_eq!(units, vec![6, 1]);

        let n_share_total: f64 = column_f64(&df_summary, COL_SHARE).iter().sum();
        assert!((n_share_total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn daily_trend_is_sorted_ascending_by_date() {
        let df_trend = derive_daily_trend(&sample_frame()).unwrap();

        assert_eq!(
            column_str(&df_trend, COL_DATE),
            vec!["2024-12-01", "2024-12-02", "2024-12-03"]
        );
        assert_eq!(column_f64(&df_trend, COL_TOTAL), vec![80.0, 20.0, 40.0]);
    }
}
