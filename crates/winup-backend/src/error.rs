use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Command failed: {stderr}")]
    CommandFailed { stderr: String },

    #[error("Command timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Could not parse update listing: {details}")]
    Parse { details: String },

    #[error("Update module installation failed during {phase}: {details}")]
    ModuleInstall {
        phase: &'static str,
        details: String,
    },

    #[error("Download failed: {details}")]
    Download { details: String },

    #[error("IO error ({kind}): {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl SourceError {
    pub fn command_failed(stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            stderr: stderr.into(),
        }
    }

    pub fn parse(details: impl Into<String>) -> Self {
        Self::Parse {
            details: details.into(),
        }
    }

    pub fn module_install(phase: &'static str, details: impl Into<String>) -> Self {
        Self::ModuleInstall {
            phase,
            details: details.into(),
        }
    }

    pub fn download(details: impl Into<String>) -> Self {
        Self::Download {
            details: details.into(),
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
