//! Progress display for synchronization runs
//!
//! Consumes [`ProgressEvent`]s from the coordinator. On a terminal a single
//! indicatif bar tracks processed items; otherwise (or when bars are
//! disabled) a plain `Processed X of Y` line is printed after each batch.
//! Failures are always printed as warnings.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gear_sync::cli::{ProgressConfig, ProgressDisplay};
//! use tokio::sync::mpsc;
//!
//! # async fn example() {
//! let (tx, rx) = mpsc::unbounded_channel();
//! let display = ProgressDisplay::new(ProgressConfig::default()).spawn(rx);
//! // hand `tx` to the coordinator, run, drop the coordinator...
//! drop(tx);
//! display.await.ok();
//! # }
//! ```

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::app::ProgressEvent;

/// Progress display settings
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Use a progress bar when stderr is a terminal
    pub enable_progress_bar: bool,
    /// Suppress per-batch lines (failures are still shown)
    pub quiet: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enable_progress_bar: true,
            quiet: false,
        }
    }
}

/// Renders coordinator progress on stderr
pub struct ProgressDisplay {
    config: ProgressConfig,
    is_terminal: bool,
}

impl ProgressDisplay {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            config,
            is_terminal: std::io::stderr().is_terminal(),
        }
    }

    fn use_bar(&self) -> bool {
        self.config.enable_progress_bar && self.is_terminal && !self.config.quiet
    }

    /// Consume events until the sender side is dropped
    pub fn spawn(self, mut events: mpsc::UnboundedReceiver<ProgressEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut bar: Option<ProgressBar> = None;

            while let Some(event) = events.recv().await {
                match (&event, self.use_bar()) {
                    (ProgressEvent::Started { total, .. }, true) => {
                        bar = Some(new_bar(*total));
                    }
                    (ProgressEvent::BatchCompleted { processed, .. }, true) => {
                        if let Some(bar) = &bar {
                            bar.set_position(*processed as u64);
                        }
                    }
                    (ProgressEvent::ItemFailed { .. }, true) => {
                        if let (Some(bar), Some(line)) = (&bar, render_line(&event)) {
                            bar.println(line);
                        }
                    }
                    (_, false) => {
                        let is_failure = matches!(event, ProgressEvent::ItemFailed { .. });
                        if self.config.quiet && !is_failure {
                            continue;
                        }
                        if let Some(line) = render_line(&event) {
                            eprintln!("{}", line);
                        }
                    }
                }
            }

            if let Some(bar) = bar {
                bar.finish_and_clear();
            }
            debug!("Progress display finished");
        })
    }
}

fn new_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    bar.set_style(style);
    bar
}

/// Text rendering of an event for non-terminal output
pub fn render_line(event: &ProgressEvent) -> Option<String> {
    match event {
        ProgressEvent::Started { .. } => None,
        ProgressEvent::ItemFailed { id, error } => {
            Some(format!("Warning: failed to synchronize {}: {}", id, error))
        }
        ProgressEvent::BatchCompleted {
            processed, total, ..
        } => Some(format!("Processed {} of {}", processed, total)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_batch_line() {
        let line = render_line(&ProgressEvent::BatchCompleted {
            batch: 2,
            processed: 200,
            total: 250,
        });
        assert_eq!(line.as_deref(), Some("Processed 200 of 250"));
    }

    #[test]
    fn test_render_failure_line() {
        let line = render_line(&ProgressEvent::ItemFailed {
            id: 42,
            error: "Catalog returned HTTP 404 for item 42".to_string(),
        })
        .unwrap();
        assert!(line.starts_with("Warning: failed to synchronize 42"));
        assert!(line.contains("HTTP 404"));
    }

    #[test]
    fn test_started_is_silent() {
        assert!(render_line(&ProgressEvent::Started {
            total: 1,
            batches: 1
        })
        .is_none());
    }

    #[tokio::test]
    async fn test_display_ends_when_sender_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = ProgressDisplay::new(ProgressConfig {
            enable_progress_bar: false,
            quiet: true,
        })
        .spawn(rx);

        tx.send(ProgressEvent::Started {
            total: 1,
            batches: 1,
        })
        .unwrap();
        tx.send(ProgressEvent::BatchCompleted {
            batch: 1,
            processed: 1,
            total: 1,
        })
        .unwrap();
        drop(tx);

        handle.await.unwrap();
    }
}
