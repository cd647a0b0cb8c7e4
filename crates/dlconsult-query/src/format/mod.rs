//! 結果のシリアライズ (SPARQL Query Results XML / JSON)

mod json;
mod xml;

pub use json::{JsonResults, JsonSerializer};
pub use xml::XmlSerializer;

use crate::result::QueryResult;
use crate::SparqlDlError;
use std::io::Write;

/// `xmlns` of the SPARQL Query Results XML Format
pub const SPARQL_RESULTS_NS: &str = "http://www.w3.org/2005/sparql-results#";

/// Rendering of a result into one concrete format
///
/// Renderings enumerate rows in order and, within a row, the head variables
/// in head order. Unbound variables are omitted.
pub trait ResultSerializer {
    fn write(&self, result: &QueryResult, out: &mut dyn Write) -> Result<(), SparqlDlError>;

    fn render(&self, result: &QueryResult) -> Result<String, SparqlDlError> {
        let mut buffer = Vec::new();
        self.write(result, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| SparqlDlError::SerializationError(e.to_string()))
    }
}
