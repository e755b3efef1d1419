use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use winup_backend::{PackageInstaller, SourceError, classify};
use winup_platform::run_command;

/// Applies `.msu` packages to the running system through DISM.
pub struct DismInstaller {
    timeout: Duration,
}

impl DismInstaller {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn arguments(package: &Path) -> [String; 5] {
        [
            "/online".to_string(),
            "/add-package".to_string(),
            format!("/packagepath:{}", package.display()),
            "/quiet".to_string(),
            "/norestart".to_string(),
        ]
    }
}

#[async_trait]
impl PackageInstaller for DismInstaller {
    fn name(&self) -> &'static str {
        "DISM"
    }

    async fn install_package(&self, package: &Path) -> Result<(), SourceError> {
        debug!("Applying package {}", package.display());

        let arguments = Self::arguments(package);
        let arguments: Vec<&str> = arguments.iter().map(String::as_str).collect();
        let result = run_command("dism", &arguments, self.timeout).await;

        if classify(result.exit_code, result.timed_out, &result.stderr).is_failure() {
            if result.timed_out {
                return Err(SourceError::Timeout {
                    seconds: self.timeout.as_secs(),
                });
            }
            return Err(SourceError::command_failed(result.failure_text()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::DismInstaller;

    #[test]
    fn arguments_request_quiet_online_servicing() {
        let arguments = DismInstaller::arguments(Path::new("C:/Repo/Downloads/kb5034123.msu"));

        assert_eq!(arguments[0], "/online");
        assert_eq!(arguments[1], "/add-package");
        assert_eq!(arguments[2], "/packagepath:C:/Repo/Downloads/kb5034123.msu");
        assert_eq!(arguments[3], "/quiet");
        assert_eq!(arguments[4], "/norestart");
    }
}
