pub mod attributes;
pub mod error;
pub mod extract;
pub mod issues;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod pricing;
pub mod promo;
pub mod tax;
pub mod types;

pub use error::PipelineError;
pub use extract::{extract_product, FlatRecord, SkipReason};
pub use issues::{ConversionIssue, IssueField};
pub use normalize::normalize_record;
pub use pipeline::{
    read_catalogue, run_pipeline, transform_catalogue, transform_files, write_output,
    PipelinePaths, PipelineReport,
};
pub use tax::ExciseSchedule;
pub use types::RawProduct;
