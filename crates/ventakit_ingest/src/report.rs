//! Ingest report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Per-file load record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFileLoad {
    /// Loaded input file.
    pub path: PathBuf,
    /// Number of data rows read from the file.
    pub cnt_records: u64,
}

/// Aggregate counters and diagnostics for one consolidation run.
#[derive(Debug, Default, Clone)]
pub struct ReportIngest {
    /// Number of input files loaded.
    pub cnt_files: u64,
    /// Number of consolidated records (sum of per-file counts).
    pub cnt_records: u64,
    /// Per-file load records in discovery order.
    pub files: Vec<SpecFileLoad>,
    /// Non-fatal warnings collected during discovery/load.
    pub warnings: Vec<String>,
}

impl ReportIngest {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_files".to_string(), self.cnt_files);
        dict_counts.insert("cnt_records".to_string(), self.cnt_records);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} files={} records={} warnings={}",
            dict_counts["cnt_files"], dict_counts["cnt_records"], dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportIngest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[INGEST]"))
    }
}

/// Mutable accumulator for ingest statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportIngestBuilder {
    /// See [`ReportIngest::files`].
    pub files: Vec<SpecFileLoad>,
    /// See [`ReportIngest::warnings`].
    pub warnings: Vec<String>,
}

impl ReportIngestBuilder {
    /// Record one loaded file and its row count.
    pub fn add_file(&mut self, path: PathBuf, cnt_records: u64) {
        self.files.push(SpecFileLoad { path, cnt_records });
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportIngest {
        ReportIngest {
            cnt_files: self.files.len() as u64,
            cnt_records: self.files.iter().map(|file| file.cnt_records).sum(),
            files: self.files,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReportIngestBuilder;
    use std::path::PathBuf;

    #[test]
    fn report_ingest_counts_sum_per_file_records() {
        let mut builder = ReportIngestBuilder::default();
        builder.add_file(PathBuf::from("a.xlsx"), 150);
        builder.add_file(PathBuf::from("b.xlsx"), 120);
        builder.add_file(PathBuf::from("c.xlsx"), 130);
        builder.add_warning("w".to_string());

        let report = builder.build();
        assert_eq!(report.cnt_files, 3);
        assert_eq!(report.cnt_records, 400);

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_records"], 400);
        assert_eq!(dict_counts["cnt_warnings"], 1);
        assert_eq!(
            report.to_string(),
            "[INGEST] files=3 records=400 warnings=1"
        );
    }
}
