use async_trait::async_trait;
use std::path::Path;

use crate::error::SourceError;
use crate::types::{QueryOutcome, RebootPolicy};

/// The update-query capability behind the check/download/install workflows.
///
/// Implementations wrap a concrete query tool; workflows only see this trait
/// so they can be exercised against scripted fakes.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the query capability is currently present on the system.
    async fn is_available(&self) -> bool;

    /// Make the query capability present, installing it if required.
    /// Idempotent: once it has succeeded, later calls return without work.
    async fn ensure_available(&self) -> Result<(), SourceError>;

    /// Ask the source what is pending. Parse trouble is reported inside
    /// [`QueryOutcome`], not as an error.
    async fn pending_updates(&self) -> Result<QueryOutcome, SourceError>;

    /// Download everything pending, returning the tool's output lines.
    async fn download_all(&self) -> Result<Vec<String>, SourceError>;

    /// Install everything pending, returning the tool's output lines.
    async fn install_all(&self, reboot: RebootPolicy) -> Result<Vec<String>, SourceError>;

    /// Install only the pending updates whose titles match the given
    /// wildcard pattern.
    async fn install_matching(&self, title_pattern: &str) -> Result<Vec<String>, SourceError>;
}

/// Applies one already-downloaded package file via a servicing tool.
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    fn name(&self) -> &'static str;

    async fn install_package(&self, package: &Path) -> Result<(), SourceError>;
}
