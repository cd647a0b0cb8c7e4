//! SPARQL-DL クエリエンジン
//!
//! このクレートは以下を提供します:
//! - 字句解析・構文解析 (Lexer / Parser)
//! - 推論バックエンドに対するアトム評価 (Evaluator)
//! - 結果モデルと SPARQL Query Results XML / JSON 形式へのシリアライズ

pub mod lexer;
pub mod query;
pub mod parser;
pub mod evaluator;
pub mod result;
pub mod format;

// Re-exports
pub use query::{AtomKind, QueryArgument, QueryAtom, QueryForm, QueryGroup, SparqlDlQuery, Variable};
pub use parser::{DefaultSparqlDlParser, SparqlDlParser};
pub use evaluator::{DefaultSparqlDlEvaluator, EvaluationOptions, SparqlDlEvaluator};
pub use result::{BindingRow, QueryResult};
pub use format::{JsonSerializer, ResultSerializer, XmlSerializer};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SparqlDlError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Evaluation limit exceeded: more than {0} intermediate bindings")]
    LimitExceeded(usize),

    #[error("Reasoner error: {0}")]
    Reasoner(#[from] dlconsult_owl::OwlError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}
