mod classify;
mod error;
mod traits;
mod types;

pub use classify::{NO_UPDATES_CODE, Outcome, classify};
pub use error::SourceError;
pub use traits::{PackageInstaller, UpdateSource};
pub use types::{QueryOutcome, RebootPolicy, WindowsUpdate, parse_update_response};
