use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QueueError>;

/// Structured error data for the message channel
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorInfo {
    Snapshot(String),
    Note { path: String, message: String },
}

impl ErrorInfo {
    pub fn snapshot(e: &QueueError) -> Self {
        ErrorInfo::Snapshot(e.to_string())
    }

    pub fn note(path: &str, e: &QueueError) -> Self {
        ErrorInfo::Note {
            path: path.to_string(),
            message: e.to_string(),
        }
    }
}

/// Ready-to-render error popup data
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPopup {
    pub title: String,
    pub message: String,
    pub hint: String,
}

impl ErrorPopup {
    pub fn from_error_info(info: &ErrorInfo) -> Self {
        match info {
            ErrorInfo::Snapshot(msg) => Self {
                title: "Queue Unavailable".into(),
                message: truncate(msg, 200),
                hint: "Check queue.snapshot in your config.toml".into(),
            },
            ErrorInfo::Note { path, message } => Self {
                title: "Cannot Open Note".into(),
                message: truncate(&format!("{}: {}", path, message), 200),
                hint: "The note may have been moved; press r to reload".into(),
            },
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
