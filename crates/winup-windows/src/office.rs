use std::path::{Path, PathBuf};
use std::time::Duration;

use winup_platform::{ProcessResult, run_command};

/// Fixed install locations of the Office Click-to-Run update client.
const CLIENT_CANDIDATES: [&str; 2] = [
    r"C:\Program Files\Common Files\Microsoft Shared\ClickToRun\OfficeC2RClient.exe",
    r"C:\Program Files (x86)\Common Files\Microsoft Shared\ClickToRun\OfficeC2RClient.exe",
];

/// First existing Click-to-Run client, if Office is installed at a known
/// location.
#[must_use]
pub fn locate_client() -> Option<PathBuf> {
    first_existing(CLIENT_CANDIDATES.iter().map(PathBuf::from))
}

fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|candidate| candidate.exists())
}

/// Ask the Click-to-Run client to update the installed Office products.
pub async fn run_client_update(client: &Path, timeout: Duration) -> ProcessResult {
    run_command(&client.to_string_lossy(), &["/update", "user"], timeout).await
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::first_existing;

    #[test]
    fn first_existing_picks_the_earliest_present_candidate() {
        let dir = tempfile::tempdir().expect("temporary directory should be created");
        let missing = dir.path().join("missing.exe");
        let present_a = dir.path().join("a.exe");
        let present_b = dir.path().join("b.exe");
        std::fs::write(&present_a, b"").expect("candidate should be writable");
        std::fs::write(&present_b, b"").expect("candidate should be writable");

        let located = first_existing([missing.clone(), present_a.clone(), present_b]);

        assert_eq!(located, Some(present_a));
    }

    #[test]
    fn first_existing_returns_none_when_nothing_is_installed() {
        let dir = tempfile::tempdir().expect("temporary directory should be created");

        let located = first_existing([dir.path().join("nope.exe")]);

        assert_eq!(located, None);
    }

    #[test]
    fn candidates_cover_both_program_files_roots() {
        assert!(super::CLIENT_CANDIDATES[0].contains("Program Files\\"));
        assert!(super::CLIENT_CANDIDATES[1].contains("Program Files (x86)"));
        assert!(
            super::CLIENT_CANDIDATES
                .iter()
                .all(|path| path.ends_with("OfficeC2RClient.exe"))
        );
    }
}
