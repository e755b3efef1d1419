use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};

use winup_backend::{
    Outcome, QueryOutcome, RebootPolicy, SourceError, UpdateSource, classify,
};
use winup_platform::{ProcessResult, run_powershell};

use crate::scripts;

const DEFAULT_SHELL_TIMEOUT: Duration = Duration::from_secs(3600);

/// Update source backed by the PSWindowsUpdate PowerShell module.
///
/// The availability flag is sticky: once the module has been seen or
/// installed, later `ensure_available` calls return without spawning a
/// shell.
pub struct PswuSource {
    timeout: Duration,
    available: AtomicBool,
}

impl Default for PswuSource {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL_TIMEOUT)
    }
}

impl PswuSource {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            available: AtomicBool::new(false),
        }
    }

    async fn run(&self, script: &str) -> ProcessResult {
        run_powershell(script, self.timeout).await
    }

    fn failure(&self, result: &ProcessResult) -> SourceError {
        if result.timed_out {
            SourceError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            SourceError::command_failed(result.failure_text())
        }
    }

    fn output_lines(&self, result: &ProcessResult) -> Result<Vec<String>, SourceError> {
        if classify(result.exit_code, result.timed_out, &result.stderr).is_failure() {
            return Err(self.failure(result));
        }
        Ok(result
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[async_trait]
impl UpdateSource for PswuSource {
    fn name(&self) -> &'static str {
        "PSWindowsUpdate"
    }

    async fn is_available(&self) -> bool {
        if self.available.load(Ordering::SeqCst) {
            return true;
        }

        let result = self.run(scripts::MODULE_CHECK).await;
        let present = !result.stdout.is_empty();
        if present {
            self.available.store(true, Ordering::SeqCst);
        }
        present
    }

    async fn ensure_available(&self) -> Result<(), SourceError> {
        if self.is_available().await {
            return Ok(());
        }

        info!("PSWindowsUpdate module not found, installing it");

        // The first two steps are best-effort: a locked-down gallery or an
        // old provider often still allows the module install to succeed.
        let trust = self.run(scripts::TRUST_GALLERY).await;
        if classify(trust.exit_code, trust.timed_out, &trust.stderr).is_failure() {
            warn!("Could not mark the gallery as trusted: {}", trust.failure_text());
        }

        let nuget = self.run(scripts::INSTALL_NUGET).await;
        if classify(nuget.exit_code, nuget.timed_out, &nuget.stderr).is_failure() {
            warn!("Could not install the NuGet provider: {}", nuget.failure_text());
        }

        let install = self.run(scripts::INSTALL_MODULE).await;
        if classify(install.exit_code, install.timed_out, &install.stderr).is_failure() {
            return Err(SourceError::module_install(
                "module install",
                install.failure_text(),
            ));
        }

        self.available.store(true, Ordering::SeqCst);
        info!("PSWindowsUpdate module is ready");
        Ok(())
    }

    async fn pending_updates(&self) -> Result<QueryOutcome, SourceError> {
        let result = self.run(scripts::QUERY_UPDATES).await;

        match classify(result.exit_code, result.timed_out, &result.stderr) {
            Outcome::NoUpdates => Ok(QueryOutcome::UpToDate),
            Outcome::Failure => Err(self.failure(&result)),
            Outcome::Success => Ok(QueryOutcome::from_response(&result.stdout)),
        }
    }

    async fn download_all(&self) -> Result<Vec<String>, SourceError> {
        let result = self.run(scripts::DOWNLOAD_ALL).await;
        self.output_lines(&result)
    }

    async fn install_all(&self, reboot: RebootPolicy) -> Result<Vec<String>, SourceError> {
        let script = scripts::install_all(reboot.flag());
        let result = self.run(&script).await;
        self.output_lines(&result)
    }

    async fn install_matching(&self, title_pattern: &str) -> Result<Vec<String>, SourceError> {
        let script = scripts::install_matching(title_pattern);
        let result = self.run(&script).await;
        self.output_lines(&result)
    }
}
