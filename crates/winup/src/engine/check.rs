use std::time::Duration;

use chrono::Local;
use log::{error, info};

use winup_backend::QueryOutcome;

use crate::events::{StatusIcon, StatusTone};

use super::Engine;

impl Engine {
    /// Check the update source for pending updates.
    ///
    /// A no-op when a check is already in flight.
    pub async fn check_for_updates(&self) {
        let Some(_guard) = self.check_gate.try_start() else {
            return;
        };

        self.reporter.status(
            "Checking for updates...",
            Some("This might take a few minutes"),
            StatusIcon::Working,
            StatusTone::Accent,
        );
        self.reporter.log("Checking for updates online...");
        self.ramp_progress(0, 30, 5, Duration::from_millis(100)).await;

        if let Err(err) = self.source.ensure_available().await {
            error!("Update source unavailable: {err}");
            self.reporter.error(format!("Failed to load update module: {err}"));
            self.reporter.status(
                "Error",
                Some("Failed to load update module"),
                StatusIcon::Failed,
                StatusTone::Error,
            );
            self.reporter.progress(0);
            return;
        }

        let query = self.source.pending_updates().await;
        self.ramp_progress(30, 90, 10, Duration::from_millis(50)).await;

        let last_checked = format!(
            "Last checked: {}",
            Local::now().format("%I:%M %p, %B %d, %Y")
        );

        match query {
            Err(err) => {
                self.reporter.error(format!("Error checking updates: {err}"));
                self.reporter.status(
                    "Error checking for updates",
                    Some(&last_checked),
                    StatusIcon::Failed,
                    StatusTone::Error,
                );
            }
            Ok(QueryOutcome::UpToDate) => {
                self.reporter.log("Your device is up to date");
                self.reporter.status(
                    "You're up to date",
                    Some(&last_checked),
                    StatusIcon::UpToDate,
                    StatusTone::Success,
                );
            }
            Ok(QueryOutcome::Updates(updates)) => {
                let count = updates.len();
                info!("{count} updates pending");
                self.reporter.log(format!("Found {count} available updates"));
                for update in updates.iter().take(10) {
                    let kb = update.kb.as_deref().unwrap_or("N/A");
                    self.reporter
                        .log(format!("  - {} (KB{kb})", update.display_title()));
                }

                let plural = if count == 1 { "" } else { "s" };
                self.reporter.status(
                    format!("{count} update{plural} available"),
                    Some(&last_checked),
                    StatusIcon::Attention,
                    StatusTone::Warning,
                );
            }
            Ok(QueryOutcome::UpdatesUnparsed) => {
                self.reporter.log("Found updates but couldn't parse details");
                self.reporter.status(
                    "Updates available",
                    Some(&last_checked),
                    StatusIcon::Attention,
                    StatusTone::Warning,
                );
            }
        }

        self.finish_progress().await;
    }
}
