use crossbeam_channel::{Receiver, Sender, unbounded};

/// Severity of a user-facing log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// Icon the presentation layer should show next to the headline status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    UpToDate,
    Working,
    Attention,
    Failed,
}

/// Color family for the headline status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Accent,
    Warning,
    Error,
}

/// One notification from the engine to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Log {
        message: String,
        level: LogLevel,
    },
    Progress(u8),
    Status {
        title: String,
        subtitle: Option<String>,
        icon: StatusIcon,
        tone: StatusTone,
    },
}

/// Sending half of the engine's event stream.
///
/// Sends never block, and events are dropped silently once the consumer is
/// gone, so a closing frontend cannot wedge a running workflow.
#[derive(Clone)]
pub struct Reporter {
    sender: Sender<UiEvent>,
}

impl Reporter {
    #[must_use]
    pub fn channel() -> (Self, Receiver<UiEvent>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }

    pub fn log(&self, message: impl Into<String>) {
        let _ = self.sender.send(UiEvent::Log {
            message: message.into(),
            level: LogLevel::Info,
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        let _ = self.sender.send(UiEvent::Log {
            message: message.into(),
            level: LogLevel::Error,
        });
    }

    pub fn progress(&self, percent: u8) {
        let _ = self.sender.send(UiEvent::Progress(percent));
    }

    pub fn status(
        &self,
        title: impl Into<String>,
        subtitle: Option<&str>,
        icon: StatusIcon,
        tone: StatusTone,
    ) {
        let _ = self.sender.send(UiEvent::Status {
            title: title.into(),
            subtitle: subtitle.map(str::to_string),
            icon,
            tone,
        });
    }
}
