use winup_backend::{QueryOutcome, RebootPolicy};

use super::Engine;

impl Engine {
    /// Install all pending updates straight from the update source.
    ///
    /// A no-op when an install is already in flight.
    pub async fn install_updates(&self) {
        let Some(_guard) = self.install_gate.try_start() else {
            return;
        };

        let settings = self.settings();
        self.reporter.log("Installing updates...");
        self.reporter.progress(10);

        if let Err(err) = self.source.ensure_available().await {
            self.reporter.error(format!("Failed to load update module: {err}"));
            self.reporter.progress(0);
            return;
        }

        self.reporter.progress(30);

        let count = match self.source.pending_updates().await {
            Ok(QueryOutcome::UpToDate) => {
                self.reporter.log("No updates available");
                self.reporter.progress(0);
                return;
            }
            Ok(QueryOutcome::Updates(updates)) => updates.len(),
            Ok(QueryOutcome::UpdatesUnparsed) => {
                self.reporter
                    .error("Failed to check updates: unreadable update listing");
                self.reporter.progress(0);
                return;
            }
            Err(err) => {
                self.reporter.error(format!("Failed to check updates: {err}"));
                self.reporter.progress(0);
                return;
            }
        };

        self.reporter.log(format!("Installing {count} updates..."));
        self.reporter.progress(50);

        let reboot = RebootPolicy::from_auto_reboot(settings.auto_reboot);
        self.reporter.log("Running the update installation...");
        let outcome = self.source.install_all(reboot).await;
        self.reporter.progress(90);

        match outcome {
            Ok(lines) => {
                for line in &lines {
                    self.reporter.log(line.clone());
                }
                self.reporter.log("Updates installed successfully");
            }
            Err(err) => {
                self.reporter.error(format!("Installation failed: {err}"));
            }
        }

        self.finish_progress().await;
    }
}
