//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use irifetch_core::Inspection;
use irifetch_core::RetrieveReport;
use irifetch_core::catalog::Dataset;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

#[derive(Serialize)]
struct RetrieveOutput {
    url: String,
    status: String,
    written_paths: Vec<String>,
    bytes_fetched: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    extraction: Option<ExtractionOutput>,
    duration_ms: u128,
}

#[derive(Serialize)]
struct ExtractionOutput {
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    duration_ms: u128,
}

impl From<&RetrieveReport> for RetrieveOutput {
    fn from(report: &RetrieveReport) -> Self {
        Self {
            url: report.url.clone(),
            status: report.status.to_string(),
            written_paths: report
                .written_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            bytes_fetched: report.bytes_fetched,
            extraction: report.extraction.as_ref().map(|e| ExtractionOutput {
                files_extracted: e.files_extracted,
                directories_created: e.directories_created,
                bytes_written: e.bytes_written,
                duration_ms: e.duration.as_millis(),
            }),
            duration_ms: report.duration.as_millis(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_retrieve_result(&self, report: &RetrieveReport) -> Result<()> {
        let output = JsonOutput::success("retrieve", RetrieveOutput::from(report));
        Self::output(&output)
    }

    fn format_sync_result(&self, results: &[(&Dataset, RetrieveReport)]) -> Result<()> {
        #[derive(Serialize)]
        struct SyncEntry {
            dataset: &'static str,
            #[serde(flatten)]
            result: RetrieveOutput,
        }

        let data: Vec<SyncEntry> = results
            .iter()
            .map(|(dataset, report)| SyncEntry {
                dataset: dataset.name,
                result: RetrieveOutput::from(report),
            })
            .collect();

        let output = JsonOutput::success("sync", data);
        Self::output(&output)
    }

    fn format_catalog(&self, datasets: &[Dataset], data_root: &Path) -> Result<()> {
        #[derive(Serialize)]
        struct CatalogEntry {
            name: &'static str,
            url: String,
            directory: String,
        }

        let data: Vec<CatalogEntry> = datasets
            .iter()
            .map(|d| CatalogEntry {
                name: d.name,
                url: format!("{}/{}", d.base_url, d.file_name),
                directory: d.directory(data_root).display().to_string(),
            })
            .collect();

        let output = JsonOutput::success("catalog", data);
        Self::output(&output)
    }

    fn format_inspection(&self, file: &Path, inspection: &Inspection) -> Result<()> {
        #[derive(Serialize)]
        struct MemberOutput {
            name: String,
            kind: String,
            size: u64,
            #[serde(skip_serializing_if = "Option::is_none")]
            mode: Option<u32>,
        }

        #[derive(Serialize)]
        struct CheckOutput {
            file: String,
            is_archive: bool,
            safe: bool,
            members: Vec<MemberOutput>,
        }

        let data = CheckOutput {
            file: file.display().to_string(),
            is_archive: inspection.is_archive,
            safe: inspection.is_safe(),
            members: inspection
                .members
                .iter()
                .map(|m| MemberOutput {
                    name: m.name.display().to_string(),
                    kind: m.kind.to_string(),
                    size: m.size,
                    mode: m.mode,
                })
                .collect(),
        };

        let output = match &inspection.rejected {
            None => JsonOutput::success("check", data),
            Some((member, rule)) => JsonOutput::failure(
                "check",
                data,
                format!("unsafe member '{}': {rule}", member.display()),
            ),
        };
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("unknown", format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
