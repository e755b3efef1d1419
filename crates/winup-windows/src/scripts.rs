//! PowerShell command text for the PSWindowsUpdate module.
//!
//! Scripts print `[]` instead of nothing when the update list is empty so
//! that callers can tell "no updates" apart from "no output".

pub const MODULE_CHECK: &str = "Get-Module -ListAvailable -Name PSWindowsUpdate";

pub const TRUST_GALLERY: &str =
    "Set-PSRepository -Name PSGallery -InstallationPolicy Trusted -ErrorAction SilentlyContinue";

pub const INSTALL_NUGET: &str =
    "Install-PackageProvider -Name NuGet -MinimumVersion 2.8.5.201 -Force -ErrorAction SilentlyContinue";

pub const INSTALL_MODULE: &str = r#"
$ErrorActionPreference = 'Stop'
try {
    if (!(Get-Module -ListAvailable -Name PSWindowsUpdate)) {
        Install-Module PSWindowsUpdate -Force -Scope AllUsers -AllowClobber
        Write-Output "PSWindowsUpdate installed successfully"
    } else {
        Write-Output "PSWindowsUpdate already installed"
    }
} catch {
    Write-Error $_.Exception.Message
    exit 1
}
"#;

pub const QUERY_UPDATES: &str = r#"
Import-Module PSWindowsUpdate
$ErrorActionPreference = 'Continue'
try {
    $updates = Get-WindowsUpdate -MicrosoftUpdate
    if ($updates) {
        $updates | Select-Object Title, KB, Size, IsDownloaded | ConvertTo-Json
    } else {
        Write-Output "[]"
    }
} catch {
    Write-Error $_.Exception.Message
    exit 1
}
"#;

pub const DOWNLOAD_ALL: &str = r#"
Import-Module PSWindowsUpdate
$ErrorActionPreference = 'Continue'
try {
    $updates = Get-WindowsUpdate -MicrosoftUpdate
    if ($updates) {
        $updates | ForEach-Object {
            Write-Output "Downloading: $($_.Title)"
        }
        Get-WindowsUpdate -MicrosoftUpdate -Download -AcceptAll -Verbose
        Write-Output "Download completed successfully"
    } else {
        Write-Output "No updates available to download"
    }
} catch {
    Write-Error $_.Exception.Message
    exit 1
}
"#;

#[must_use]
pub fn install_all(reboot_flag: &str) -> String {
    format!(
        r#"
Import-Module PSWindowsUpdate
$ErrorActionPreference = 'Continue'
try {{
    Get-WindowsUpdate -MicrosoftUpdate -Install -AcceptAll {reboot_flag} -Verbose
    Write-Output "Installation completed"
}} catch {{
    Write-Error $_.Exception.Message
    exit 1
}}
"#
    )
}

#[must_use]
pub fn install_matching(title_pattern: &str) -> String {
    format!(
        r#"
Import-Module PSWindowsUpdate
$ErrorActionPreference = 'Continue'
try {{
    $updates = Get-WindowsUpdate -MicrosoftUpdate | Where-Object {{ $_.Title -like '{title_pattern}' }}
    if ($updates) {{
        Get-WindowsUpdate -MicrosoftUpdate -Install -AcceptAll -IgnoreReboot -Verbose | Where-Object {{ $_.Title -like '{title_pattern}' }}
        Write-Output "Matching updates installed"
    }} else {{
        Write-Output "No matching updates available"
    }}
}} catch {{
    Write-Error $_.Exception.Message
    exit 1
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_script_targets_the_vendor_wide_source() {
        assert!(QUERY_UPDATES.contains("Get-WindowsUpdate -MicrosoftUpdate"));
        assert!(QUERY_UPDATES.contains("ConvertTo-Json"));
        assert!(QUERY_UPDATES.contains(r#"Write-Output "[]""#));
    }

    #[test]
    fn install_script_carries_the_reboot_flag() {
        let auto = install_all("-AutoReboot");
        let suppressed = install_all("-IgnoreReboot");

        assert!(auto.contains("-Install -AcceptAll -AutoReboot"));
        assert!(suppressed.contains("-Install -AcceptAll -IgnoreReboot"));
    }

    #[test]
    fn matching_install_filters_by_title_pattern() {
        let script = install_matching("*.NET*");

        assert!(script.contains("$_.Title -like '*.NET*'"));
        assert!(script.contains("-IgnoreReboot"));
    }

    #[test]
    fn module_install_tolerates_already_installed() {
        assert!(INSTALL_MODULE.contains("already installed"));
        assert!(INSTALL_MODULE.contains("-Scope AllUsers"));
    }

    #[test]
    fn download_script_accepts_all_pending_updates() {
        assert!(DOWNLOAD_ALL.contains("-Download -AcceptAll"));
    }
}
