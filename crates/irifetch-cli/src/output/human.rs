//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use irifetch_core::Inspection;
use irifetch_core::MemberKind;
use irifetch_core::RetrieveReport;
use irifetch_core::RetrieveStatus;
use irifetch_core::catalog::Dataset;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    fn check_mark(&self) -> String {
        if self.use_colors {
            style("✓").green().bold().to_string()
        } else {
            "✓".to_string()
        }
    }

    const fn kind_char(kind: MemberKind) -> &'static str {
        match kind {
            MemberKind::Regular => "-",
            MemberKind::Directory => "d",
            MemberKind::Symlink => "l",
            MemberKind::Hardlink => "h",
            MemberKind::Device => "c",
            MemberKind::Other => "?",
        }
    }

    fn write_report_body(&self, report: &RetrieveReport) {
        self.line(&format!(
            "  Downloaded: {}",
            humanize_bytes(report.bytes_fetched)
        ));

        if let Some(extraction) = &report.extraction {
            self.line(&format!("  Files extracted: {}", extraction.files_extracted));
            self.line(&format!("  Directories: {}", extraction.directories_created));
            self.line(&format!(
                "  Total size: {}",
                humanize_bytes(extraction.bytes_written)
            ));
        }

        if self.verbose {
            for path in &report.written_paths {
                self.line(&format!("    {}", path.display()));
            }
            self.line(&format!("  Duration: {:?}", report.duration));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_retrieve_result(&self, report: &RetrieveReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let headline = match report.status {
            RetrieveStatus::Extracted => format!("Extracted {}", report.url),
            RetrieveStatus::Stored => match report.written_paths.first() {
                Some(path) => format!("Stored {}", path.display()),
                None => format!("Stored {}", report.url),
            },
        };
        self.line(&format!("{} {headline}", self.check_mark()));
        self.write_report_body(report);

        Ok(())
    }

    fn format_sync_result(&self, results: &[(&Dataset, RetrieveReport)]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for (dataset, report) in results {
            let name = if self.use_colors {
                style(dataset.name).bold().to_string()
            } else {
                dataset.name.to_string()
            };
            self.line(&format!(
                "{} {name}: {} {}",
                self.check_mark(),
                report.status,
                dataset.file_name
            ));
            if self.verbose {
                self.write_report_body(report);
            }
        }

        let total: u64 = results.iter().map(|(_, r)| r.bytes_fetched).sum();
        self.line("");
        self.line(&format!(
            "Synced {} data sets ({} downloaded)",
            results.len(),
            humanize_bytes(total)
        ));

        Ok(())
    }

    fn format_catalog(&self, datasets: &[Dataset], data_root: &Path) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for dataset in datasets {
            self.line(&format!(
                "{:<16} {}/{}",
                dataset.name, dataset.base_url, dataset.file_name
            ));
            self.line(&format!(
                "{:<16} -> {}",
                "",
                dataset.directory(data_root).display()
            ));
        }

        Ok(())
    }

    fn format_inspection(&self, file: &Path, inspection: &Inspection) -> Result<()> {
        if !inspection.is_archive {
            if !self.quiet {
                self.line(&format!(
                    "{}: not a tar archive, would be stored as fetched",
                    file.display()
                ));
            }
            return Ok(());
        }

        if !self.quiet {
            for member in &inspection.members {
                let mode_str = member
                    .mode
                    .map_or_else(|| "-".to_string(), |m| format!("{m:o}"));
                self.line(&format!(
                    "{}{:<6} {:>10}  {}",
                    Self::kind_char(member.kind),
                    mode_str,
                    if self.verbose {
                        member.size.to_string()
                    } else {
                        humanize_bytes(member.size)
                    },
                    member.name.display()
                ));
            }
            self.line("");
        }

        match &inspection.rejected {
            None => {
                if !self.quiet {
                    let verdict = if self.use_colors {
                        style("SAFE").green().bold().to_string()
                    } else {
                        "SAFE".to_string()
                    };
                    self.line(&format!(
                        "{}: {verdict} ({} members)",
                        file.display(),
                        inspection.members.len()
                    ));
                }
            }
            Some((member, rule)) => {
                // Verdict is shown even in quiet mode
                let verdict = if self.use_colors {
                    style("REJECTED").red().bold().to_string()
                } else {
                    "REJECTED".to_string()
                };
                self.line(&format!(
                    "{}: {verdict} at '{}': {rule}",
                    file.display(),
                    member.display()
                ));
            }
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
