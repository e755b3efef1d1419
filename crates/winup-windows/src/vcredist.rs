use std::path::Path;
use std::time::Duration;

use log::info;
use which::which;

use winup_backend::{SourceError, classify};
use winup_platform::{ProcessResult, run_command};

/// Vendor installer URLs used when no package manager is available.
pub const VENDOR_INSTALLERS: [&str; 2] = [
    "https://aka.ms/vs/17/release/vc_redist.x64.exe",
    "https://aka.ms/vs/17/release/vc_redist.x86.exe",
];

const WINGET_ARGS: [&str; 5] = [
    "upgrade",
    "--id",
    "Microsoft.VCRedist.*",
    "--silent",
    "--accept-package-agreements",
];

/// Whether the system package manager is on the PATH.
#[must_use]
pub fn winget_available() -> bool {
    which("winget").is_ok()
}

/// Upgrade the redistributables through the system package manager.
pub async fn upgrade_via_winget(timeout: Duration) -> ProcessResult {
    run_command("winget", &WINGET_ARGS, timeout).await
}

/// Download the fixed vendor installers and run each silently.
///
/// # Errors
/// Returns an error when a download fails or an installer reports failure.
pub async fn install_from_vendor(timeout: Duration) -> Result<(), SourceError> {
    let staging = tempfile::tempdir()?;

    for url in VENDOR_INSTALLERS {
        let target = staging.path().join(installer_file_name(url));
        download_installer(url, &target).await?;

        info!("Running {}", installer_file_name(url));
        let result = run_command(
            &target.to_string_lossy(),
            &["/install", "/quiet", "/norestart"],
            timeout,
        )
        .await;
        if classify(result.exit_code, result.timed_out, &result.stderr).is_failure() {
            return Err(SourceError::command_failed(result.failure_text()));
        }
    }

    Ok(())
}

fn installer_file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or("vc_redist.exe")
}

async fn download_installer(url: &str, target: &Path) -> Result<(), SourceError> {
    let response = reqwest::get(url)
        .await
        .map_err(|err| SourceError::download(format!("{url}: {err}")))?;

    if !response.status().is_success() {
        return Err(SourceError::download(format!(
            "{url}: HTTP {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|err| SourceError::download(format!("{url}: {err}")))?;
    tokio::fs::write(target, &bytes).await?;
    Ok(())
}
