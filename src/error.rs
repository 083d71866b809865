use thiserror::Error;

/// Main error type for the corpus pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Malformed or missing columns in a source row
    #[error("Validation error at line {line}: {message}")]
    Validation { line: usize, message: String },

    /// Negative draw larger than the other-group pool
    #[error("Sampling error for group {group_id}: requested {requested} negatives but only {available} other-group texts are available")]
    Sampling {
        group_id: i64,
        requested: usize,
        available: usize,
    },

    /// Jaccard similarity of two sentences that both tokenize empty
    #[error(
        "Degenerate input{}: both {left:?} and {right:?} have no tokens",
        describe_location(.group_id, .record)
    )]
    DegenerateInput {
        group_id: Option<i64>,
        record: Option<usize>,
        left: String,
        right: String,
    },

    /// Invalid configuration values
    #[error("Config error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML config errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Worker pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl PipelineError {
    pub fn validation(line: usize, message: impl Into<String>) -> Self {
        PipelineError::Validation {
            line,
            message: message.into(),
        }
    }

    /// Degenerate similarity input, not yet tied to a group or record
    pub fn degenerate(left: impl Into<String>, right: impl Into<String>) -> Self {
        PipelineError::DegenerateInput {
            group_id: None,
            record: None,
            left: left.into(),
            right: right.into(),
        }
    }

    /// Attach the owning group to a degenerate-input error
    pub fn in_group(self, id: i64) -> Self {
        match self {
            PipelineError::DegenerateInput {
                group_id: None,
                record,
                left,
                right,
            } => PipelineError::DegenerateInput {
                group_id: Some(id),
                record,
                left,
                right,
            },
            other => other,
        }
    }

    /// Attach the record index to a degenerate-input error
    pub fn at_record(self, index: usize) -> Self {
        match self {
            PipelineError::DegenerateInput {
                group_id,
                record: None,
                left,
                right,
            } => PipelineError::DegenerateInput {
                group_id,
                record: Some(index),
                left,
                right,
            },
            other => other,
        }
    }
}

fn describe_location(group_id: &Option<i64>, record: &Option<usize>) -> String {
    match (group_id, record) {
        (Some(group), Some(record)) => format!(" in group {} at record {}", group, record),
        (Some(group), None) => format!(" in group {}", group),
        (None, Some(record)) => format!(" at record {}", record),
        (None, None) => String::new(),
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_location_in_message() {
        let err = PipelineError::degenerate("", " ").in_group(7).at_record(3);

        assert_eq!(
            err.to_string(),
            r#"Degenerate input in group 7 at record 3: both "" and " " have no tokens"#
        );
    }

    #[test]
    fn test_location_is_set_once() {
        let err = PipelineError::degenerate("", "").at_record(3).at_record(9).in_group(1);

        assert!(matches!(
            err,
            PipelineError::DegenerateInput {
                group_id: Some(1),
                record: Some(3),
                ..
            }
        ));
        assert_eq!(
            PipelineError::degenerate("", "").to_string(),
            r#"Degenerate input: both "" and "" have no tokens"#
        );
    }

    #[test]
    fn test_location_leaves_other_errors_alone() {
        let err = PipelineError::Config("bad".into()).in_group(1).at_record(2);
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
