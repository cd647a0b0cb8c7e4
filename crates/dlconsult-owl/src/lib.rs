//! OWL 推論バックエンド
//!
//! このクレートは以下を提供します:
//! - OWL オントロジーモデル (クラス式・プロパティ式・公理)
//! - RDF トリプルから OWL への変換 (ローダー)
//! - クラス階層・プロパティ階層の飽和と個体レベルの推論
//! - 推論の事前計算と問い合わせプリミティブ (`OwlReasoner`)

pub mod model;
pub mod loader;
pub mod hierarchy;
pub mod realization;
pub mod reasoner;

pub use model::{Axiom, ClassExpression, Individual, Ontology, OwlIri, PropertyCharacteristic, PropertyExpression, Value};
pub use loader::{DefaultOntologyLoader, OntologyLoader};
pub use reasoner::{InferenceType, OwlDlReasoner, OwlReasoner};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OwlError {
    #[error("Loader error: {0}")]
    LoaderError(String),

    #[error("Consistency error: {0}")]
    ConsistencyError(String),

    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
}
