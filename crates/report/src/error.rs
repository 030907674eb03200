//! Error types for report generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop report generation.
///
/// Recoverable conditions (blank reference ids, unpriced SKUs, failed group
/// lookups) are logged and never surface here.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A required input CSV does not exist.
    #[error("Required input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV in {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    /// Graph returned no users holding a license.
    #[error("No licensed users were returned by the directory")]
    NoLicensedUsers,

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Rendered output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl ReportError {
    pub(crate) fn csv(origin: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            origin: origin.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_names_the_path() {
        let err = ReportError::MissingInput {
            path: PathBuf::from("/data/SkuLookup.csv"),
        };
        assert_eq!(
            err.to_string(),
            "Required input file not found: /data/SkuLookup.csv"
        );
    }
}
