//! 失敗カテゴリ
//!
//! 各カテゴリは発生箇所に最も近い境界で捕捉され、標準出力に表示される

use thiserror::Error;

pub const USAGE: &str = "Need three arguments: Input OWL ontology, output JSON file, a SPARQL-DL query string";

#[derive(Error, Debug)]
pub enum ConsultError {
    #[error("{}", USAGE)]
    Usage,

    #[error("Could not load the ontology: {0}")]
    Load(String),

    #[error("Unsupported reasoner operation.")]
    UnsupportedOperation(String),

    #[error("Could not open output file: {0}")]
    OutputCreation(String),

    #[error("Query parser error: {0}")]
    QueryParse(String),

    #[error("Query engine error: {0}")]
    QueryExecution(String),

    #[error("Exception while writing output file:{0}")]
    OutputWrite(String),
}

impl ConsultError {
    /// sysexits-style status used by the strict exit code policy
    pub fn exit_code(&self) -> i32 {
        match self {
            ConsultError::Usage => 64,
            ConsultError::Load(_) => 65,
            ConsultError::QueryParse(_) => 66,
            ConsultError::UnsupportedOperation(_) => 69,
            ConsultError::QueryExecution(_) => 70,
            ConsultError::OutputCreation(_) => 73,
            ConsultError::OutputWrite(_) => 74,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ConsultError::Usage.to_string(), USAGE);
        assert_eq!(
            ConsultError::Load("no such file".into()).to_string(),
            "Could not load the ontology: no such file"
        );
        assert_eq!(
            ConsultError::UnsupportedOperation("DATA_PROPERTY_ASSERTIONS".into()).to_string(),
            "Unsupported reasoner operation."
        );
        assert_eq!(
            ConsultError::OutputWrite("disk full".into()).to_string(),
            "Exception while writing output file:disk full"
        );
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            ConsultError::Usage,
            ConsultError::Load(String::new()),
            ConsultError::UnsupportedOperation(String::new()),
            ConsultError::OutputCreation(String::new()),
            ConsultError::QueryParse(String::new()),
            ConsultError::QueryExecution(String::new()),
            ConsultError::OutputWrite(String::new()),
        ];
        let mut codes: Vec<i32> = errors.iter().map(ConsultError::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|code| *code != 0));
    }
}
