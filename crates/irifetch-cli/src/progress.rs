//! Download progress bar.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use irifetch_core::FetchProgress;
use irifetch_core::ResourceLocator;
use std::fmt::Write;

/// CLI progress bar wrapper implementing `FetchProgress`.
///
/// Shows a byte bar when the server advertised a length and a spinner
/// otherwise. Automatically cleans up on drop.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_received: u64,
}

impl CliProgress {
    /// Creates a hidden progress bar; it becomes visible in `on_start`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            bytes_received: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }

    fn style_for(total: Option<u64>) -> ProgressStyle {
        let template = if total.is_some() {
            // "apf107.dat [████████░░░░] 1.2 MB/3.4 MB (512.0 KB/s, 4s)"
            "{msg} [{bar:40.cyan/blue}] {bytes}/{total} ({bytes_per_sec}, {eta})"
        } else {
            "{spinner} {msg} {bytes} ({bytes_per_sec})"
        };

        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key("bytes", |state: &ProgressState, w: &mut dyn Write| {
                write!(w, "{}", humanize_bytes(state.pos())).unwrap_or(());
            })
            .with_key("total", |state: &ProgressState, w: &mut dyn Write| {
                write!(w, "{}", humanize_bytes(state.len().unwrap_or(0))).unwrap_or(());
            })
            .with_key("bytes_per_sec", |state: &ProgressState, w: &mut dyn Write| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let bytes_per_sec = state.per_sec() as u64;
                write!(w, "{}/s", humanize_bytes(bytes_per_sec)).unwrap_or(());
            })
            .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
                write!(w, "{}", humanize_duration(state.eta())).unwrap_or(());
            })
            .progress_chars("█▓░")
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl FetchProgress for CliProgress {
    fn on_start(&mut self, locator: &ResourceLocator, total: Option<u64>) {
        self.bar = total.map_or_else(ProgressBar::new_spinner, ProgressBar::new);
        self.bar.set_style(Self::style_for(total));
        self.bar.set_message(locator.name().to_string());
        self.bytes_received = 0;
    }

    fn on_bytes(&mut self, bytes: u64) {
        self.bytes_received += bytes;
        self.bar.set_position(self.bytes_received);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Converts duration to human-readable format.
fn humanize_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}
