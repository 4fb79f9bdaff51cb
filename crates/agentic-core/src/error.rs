use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgenticError {
    #[error("failed to copy {} to {}: {source}", src.display(), dest.display())]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteFileFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    AllWorkflowsUnknown {
        message: String,
        unknown: Vec<String>,
    },

    #[error("no IDE setup detected: run `agentic init` first or pass --ide")]
    NoIdeDetected,

    #[error("no settings found at {}: run `agentic init` first", path.display())]
    SettingsNotFound { path: PathBuf },

    #[error("failed to parse settings at {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write settings to {}: {source}", path.display())]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: Box<AgenticError>,
    },

    #[error(
        "Invalid --namespace value: \"{0}\". Must be lowercase letters, digits, hyphens; \
         start with letter; 2-30 chars."
    )]
    InvalidNamespace(String),

    #[error("invalid IDE '{0}': use claude, cursor, or both")]
    InvalidIde(String),

    #[error("catalog at {location} is inconsistent:\n  - {}", problems.join("\n  - "))]
    CatalogInconsistent {
        location: String,
        problems: Vec<String>,
    },

    #[error("failed to back up {}: {source}", path.display())]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AgenticError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AgenticError::CopyFailed { .. } => "COPY_FAILED",
            AgenticError::WriteFileFailed { .. } => "WRITE_FILE_FAILED",
            AgenticError::AllWorkflowsUnknown { .. } => "ALL_WORKFLOWS_UNKNOWN",
            AgenticError::NoIdeDetected => "NO_IDE_DETECTED",
            AgenticError::SettingsNotFound { .. } => "READ_SETTINGS_FAILED",
            AgenticError::SettingsParse { .. } => "PARSE_FAILED",
            AgenticError::SettingsWrite { .. } => "WRITE_SETTINGS_FAILED",
            AgenticError::InvalidNamespace(_) => "INVALID_NAMESPACE",
            AgenticError::InvalidIde(_) => "INVALID_IDE",
            AgenticError::CatalogInconsistent { .. } => "CATALOG_INCONSISTENT",
            AgenticError::BackupFailed { .. } => "BACKUP_FAILED",
            AgenticError::Io(_) | AgenticError::Json(_) => "IO",
        }
    }
}

pub type Result<T> = std::result::Result<T, AgenticError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_failed_keeps_both_paths_and_cause() {
        let err = AgenticError::CopyFailed {
            src: PathBuf::from("catalog/agents/a.md"),
            dest: PathBuf::from(".claude/agents/a.md"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.code(), "COPY_FAILED");
        let msg = err.to_string();
        assert!(msg.contains("catalog/agents/a.md"));
        assert!(msg.contains(".claude/agents/a.md"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn catalog_problems_are_listed() {
        let err = AgenticError::CatalogInconsistent {
            location: "/cat".to_string(),
            problems: vec!["missing agent x".into(), "missing skill y".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("missing agent x"));
        assert!(msg.contains("missing skill y"));
    }
}
