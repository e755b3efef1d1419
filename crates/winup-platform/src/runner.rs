use std::process::Stdio;
use std::time::Duration;

use log::{debug, error, trace};
use tokio::process::Command;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Captured result of one external invocation.
///
/// Construction never fails: a timeout or a launch failure is encoded in the
/// value instead of being raised, so callers interpret every invocation
/// through the same shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub timed_out: bool,
}

impl ProcessResult {
    fn from_output(output: &std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            timed_out: false,
        }
    }

    fn launch_failure(err: &std::io::Error) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("Error: {err}"),
            exit_code: 1,
            timed_out: false,
        }
    }

    fn timed_out_after(timeout: Duration) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("Command timed out after {}s", timeout.as_secs()),
            exit_code: 1,
            timed_out: true,
        }
    }

    /// Error text to surface when this invocation is treated as a failure.
    #[must_use]
    pub fn failure_text(&self) -> &str {
        if self.stderr.is_empty() {
            "Unknown error"
        } else {
            &self.stderr
        }
    }
}

/// Run a script through the system shell, window suppressed, capturing both
/// streams.
pub async fn run_powershell(script: &str, timeout: Duration) -> ProcessResult {
    debug!("Running PowerShell script ({} bytes)", script.len());

    let mut command = Command::new("powershell");
    command
        .args([
            "-NoProfile",
            "-ExecutionPolicy",
            "Bypass",
            "-WindowStyle",
            "Hidden",
            "-Command",
        ])
        .arg(script);

    run(command, timeout).await
}

/// Run an executable directly, window suppressed, capturing both streams.
pub async fn run_command(program: &str, args: &[&str], timeout: Duration) -> ProcessResult {
    debug!("Running {program} {}", args.join(" "));

    let mut command = Command::new(program);
    command.args(args);

    run(command, timeout).await
}

async fn run(mut command: Command, timeout: Duration) -> ProcessResult {
    command.stdin(Stdio::null()).kill_on_drop(true);
    hide_window(&mut command);

    let result = match tokio::time::timeout(timeout, command.output()).await {
        Err(_) => {
            error!("Command exceeded its {}s budget", timeout.as_secs());
            ProcessResult::timed_out_after(timeout)
        }
        Ok(Err(err)) => {
            error!("Command could not be launched: {err}");
            ProcessResult::launch_failure(&err)
        }
        Ok(Ok(output)) => ProcessResult::from_output(&output),
    };

    trace!(
        "exit_code={} timed_out={} stderr='{}'",
        result.exit_code, result.timed_out, result.stderr
    );
    result
}

#[cfg(windows)]
fn hide_window(command: &mut Command) {
    use std::os::windows::process::CommandExt as _;
    command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_window(_command: &mut Command) {}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::run_command;

    #[tokio::test]
    async fn launch_failure_is_a_result_not_an_error() {
        let result = run_command(
            "winup-test-binary-that-does-not-exist",
            &[],
            Duration::from_secs(5),
        )
        .await;

        assert_eq!(result.exit_code, 1);
        assert!(!result.timed_out);
        assert!(result.stderr.starts_with("Error:"));
        assert!(!result.failure_text().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captured_output_is_trimmed() {
        let result = run_command("echo", &["hello"], Duration::from_secs(5)).await;

        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "hello");
        assert!(result.stderr.is_empty());
        assert!(!result.timed_out);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_code_is_reported() {
        let result = run_command("false", &[], Duration::from_secs(5)).await;

        assert_ne!(result.exit_code, 0);
        assert!(!result.timed_out);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timeout_produces_synthetic_failure() {
        let result = run_command("sleep", &["5"], Duration::from_millis(100)).await;

        assert!(result.timed_out);
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("timed out"));
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn failure_text_falls_back_when_stderr_is_empty() {
        let result = super::ProcessResult {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 1,
            timed_out: false,
        };

        assert_eq!(result.failure_text(), "Unknown error");
    }
}
