/// Result code the update query emits when no updates are pending. It often
/// arrives wrapped in an error-looking message, so it is checked before any
/// other failure rule.
pub const NO_UPDATES_CODE: &str = "0x80240024";

/// How a finished external invocation should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The command succeeded and reported that nothing is pending.
    NoUpdates,
    Failure,
}

impl Outcome {
    #[must_use]
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failure)
    }
}

/// Classify an external invocation from its exit code and error stream.
///
/// The wrapped tools report failure inconsistently: some set a non-zero exit
/// code, some only write an error-marked message to stderr. A stderr that
/// mentions [`NO_UPDATES_CODE`] wins over everything else and counts as
/// success with an empty result.
#[must_use]
pub fn classify(exit_code: i32, timed_out: bool, stderr: &str) -> Outcome {
    if stderr.contains(NO_UPDATES_CODE) {
        return Outcome::NoUpdates;
    }
    if timed_out || exit_code != 0 {
        return Outcome::Failure;
    }
    if stderr.to_ascii_lowercase().contains("error") {
        return Outcome::Failure;
    }
    Outcome::Success
}
