//! # dlconsult RDF
//!
//! RDF レイヤー: 知識文書 (RDF/XML, Turtle, N-Triples) をトリプルに変換し、
//! OWL ローダーが参照するインデックス付きストアに格納する

pub mod model;
pub mod parser;
pub mod store;
pub mod vocab;

pub use model::{Literal, Term, Triple};
pub use parser::{parse_bytes, parse_document, RdfFormat};
pub use store::TripleStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RdfError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Syntax error: {0}")]
    Syntax(String),
}
