use log::info;

use super::Engine;

impl Engine {
    /// Install previously downloaded `.msu` packages without querying the
    /// update source. Honors the shutdown signal between files.
    pub async fn install_offline(&self) {
        let repo = self.repository();

        self.reporter.log(format!(
            "Installing from repository: {}...",
            repo.root().display()
        ));
        self.reporter.progress(10);

        if !repo.has_downloads() {
            self.reporter.error("No updates found in repository");
            self.reporter.progress(0);
            return;
        }

        let files = repo.msu_files().unwrap_or_default();
        if files.is_empty() {
            self.reporter.error("No .msu files found");
            self.reporter.progress(0);
            return;
        }

        let total = files.len();
        self.reporter.log(format!("Found {total} update files"));
        self.reporter.progress(30);

        let mut installed = 0usize;
        for (index, file) in files.iter().enumerate() {
            if self.cancel.is_cancelled() {
                info!("Offline install interrupted before {}", file.display());
                break;
            }

            let name = file
                .file_name()
                .map_or_else(|| file.display().to_string(), |name| name.to_string_lossy().into_owned());
            self.reporter.log(format!("Installing {name}..."));

            match self.installer.install_package(file).await {
                Ok(()) => {
                    installed += 1;
                    self.reporter.log(format!("Successfully installed {name}"));
                }
                Err(err) => {
                    self.reporter.error(format!("Failed to install {name}: {err}"));
                }
            }

            let percent = 30 + (index + 1) * 60 / total;
            self.reporter.progress(u8::try_from(percent).unwrap_or(90));
        }

        self.reporter
            .log(format!("Installed {installed} of {total} updates"));
        self.finish_progress().await;
    }
}
