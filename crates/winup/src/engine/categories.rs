use std::time::Duration;

use winup_backend::{SourceError, classify};

use super::Engine;

impl Engine {
    /// Update Office through its Click-to-Run client.
    pub async fn update_office(&self) {
        let settings = self.settings();

        self.reporter.log("Updating Office (Click-to-Run)...");
        self.reporter.progress(30);

        let Some(client) = winup_windows::locate_client() else {
            self.reporter.error("Office Click-to-Run not found");
            self.reporter.progress(0);
            return;
        };

        self.reporter.progress(60);
        let result = winup_windows::run_client_update(
            &client,
            Duration::from_secs(settings.office_timeout_secs),
        )
        .await;
        self.reporter.progress(90);

        if result.exit_code == 0 {
            self.reporter.log("Office updated successfully");
        } else if result.stdout.is_empty() && !result.stderr.is_empty() {
            // Launch failures and timeouts produce no output at all.
            self.reporter
                .error(format!("Office update error: {}", result.failure_text()));
        } else {
            self.reporter.log("Office update completed with warnings");
        }

        self.finish_progress().await;
    }

    /// Install the pending updates whose titles mention .NET.
    pub async fn update_dotnet(&self) {
        if let Err(err) = self.source.ensure_available().await {
            self.reporter.error(format!("Failed to load update module: {err}"));
            return;
        }

        self.reporter.log("Updating .NET Framework...");
        self.reporter.progress(30);

        let outcome = self.source.install_matching("*.NET*").await;
        self.reporter.progress(90);

        match outcome {
            Ok(lines) => {
                for line in &lines {
                    self.reporter.log(line.clone());
                }
                self.reporter.log(".NET Framework update completed");
            }
            Err(err) => {
                self.reporter.error(format!(".NET update error: {err}"));
            }
        }

        self.finish_progress().await;
    }

    /// Upgrade the VC++ redistributables, preferring the system package
    /// manager and falling back to the vendor installers.
    pub async fn update_vcredist(&self) {
        let settings = self.settings();

        self.reporter.log("Updating VC++ Redistributables...");
        self.reporter.progress(30);

        let timeout = Duration::from_secs(settings.shell_timeout_secs);
        let outcome = if winup_windows::winget_available() {
            let result = winup_windows::upgrade_via_winget(timeout).await;
            if classify(result.exit_code, result.timed_out, &result.stderr).is_failure() {
                Err(SourceError::command_failed(result.failure_text()))
            } else {
                Ok(())
            }
        } else {
            winup_windows::install_from_vendor(timeout).await
        };

        self.reporter.progress(90);

        match outcome {
            Ok(()) => self.reporter.log("VC++ Redistributables updated"),
            Err(err) => self.reporter.error(format!("VC++ update error: {err}")),
        }

        self.finish_progress().await;
    }
}
