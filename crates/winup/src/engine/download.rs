use std::sync::Arc;

use log::warn;

use winup_backend::QueryOutcome;

use crate::repo::LocalRepository;

use super::Engine;

impl Engine {
    /// Download all pending updates into the local repository.
    pub async fn download_updates(&self) {
        let repo = self.repository();

        self.reporter
            .log(format!("Downloading updates to {}...", repo.root().display()));
        self.reporter.progress(10);

        if let Err(err) = self.source.ensure_available().await {
            self.reporter.error(format!("Failed to load update module: {err}"));
            self.reporter.progress(0);
            return;
        }

        if let Err(err) = repo.ensure_downloads_dir() {
            self.reporter
                .error(format!("Could not create the download directory: {err}"));
            self.reporter.progress(0);
            return;
        }

        self.reporter.progress(30);
        self.reporter.progress(50);
        let outcome = self.source.download_all().await;
        self.reporter.progress(90);

        match outcome {
            Ok(lines) => {
                for line in &lines {
                    self.reporter.log(line.clone());
                }
                self.reporter.log("Updates downloaded successfully");
                self.write_manifest_in_background(repo);
            }
            Err(err) => {
                self.reporter.error(format!("Download error: {err}"));
            }
        }

        self.finish_progress().await;
    }

    // The manifest is a convenience artifact: a stale or missing one is not
    // worth failing the download over, so persistence runs detached from the
    // workflow.
    fn write_manifest_in_background(&self, repo: LocalRepository) {
        let source = Arc::clone(&self.source);
        let reporter = self.reporter.clone();

        self.background.spawn(async move {
            let updates = match source.pending_updates().await {
                Ok(QueryOutcome::Updates(updates)) => updates,
                Ok(QueryOutcome::UpToDate) => Vec::new(),
                Ok(QueryOutcome::UpdatesUnparsed) => {
                    reporter.log("Could not create manifest: unreadable update listing");
                    return;
                }
                Err(err) => {
                    warn!("Manifest query failed: {err}");
                    return;
                }
            };

            match repo.write_manifest(&updates) {
                Ok(()) => reporter.log("Created update manifest"),
                Err(err) => reporter.log(format!("Could not create manifest: {err}")),
            }
        });
    }
}
