//! Output formatter trait for CLI results.

use anyhow::Result;
use irifetch_core::Inspection;
use irifetch_core::RetrieveReport;
use irifetch_core::catalog::Dataset;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of a single retrieval
    fn format_retrieve_result(&self, report: &RetrieveReport) -> Result<()>;

    /// Format the results of a catalog sync, in catalog order
    fn format_sync_result(&self, results: &[(&Dataset, RetrieveReport)]) -> Result<()>;

    /// Format the catalog listing
    fn format_catalog(&self, datasets: &[Dataset], data_root: &Path) -> Result<()>;

    /// Format the inspection of a local file
    fn format_inspection(&self, file: &Path, inspection: &Inspection) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(operation: impl Into<String>, data: T, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: Some(data),
            error: Some(error.into()),
        }
    }

    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
