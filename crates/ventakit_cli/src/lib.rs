//! `ventakit_cli`:
//! Command-line front end wiring ingest, analysis, and report rendering into
//! one consolidation pipeline, plus a deterministic sample-data generator.
//!
//! Module architecture:
//! - `pipeline` : end-to-end consolidate-and-report orchestration
//! - `sample`   : demo input workbook generator

pub mod pipeline;
pub mod sample;

pub use pipeline::{PipelineError, SpecPipelineOptions, SpecPipelineOutcome, run_consolidation};
pub use sample::{SpecSampleOptions, gen_sample_files};
