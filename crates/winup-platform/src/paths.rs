use std::path::PathBuf;

/// Default root of the local update repository, created next to the working
/// directory the app was launched from.
#[must_use]
pub fn default_repo_root() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("WinupRepo")
}

/// Location of the diagnostic log file, when a per-user data directory can
/// be determined.
#[must_use]
pub fn log_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("winup").join("winup.log"))
}

#[cfg(test)]
mod tests {
    use super::{default_repo_root, log_file};

    #[test]
    fn default_repo_root_is_under_working_directory() {
        let root = default_repo_root();

        assert!(root.ends_with("WinupRepo"));
        assert!(root.parent().is_some());
    }

    #[test]
    fn log_file_lives_in_app_data_directory() {
        let Some(path) = log_file() else {
            return;
        };

        assert!(path.ends_with(std::path::Path::new("winup").join("winup.log")));
    }
}
