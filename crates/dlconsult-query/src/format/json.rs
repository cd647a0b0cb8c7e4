use super::ResultSerializer;
use crate::result::{BindingRow, QueryResult};
use crate::query::Variable;
use crate::SparqlDlError;
use dlconsult_rdf::Term;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use std::io::Write;

/// SPARQL 1.1 Query Results JSON Format
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl ResultSerializer for JsonSerializer {
    fn write(&self, result: &QueryResult, out: &mut dyn Write) -> Result<(), SparqlDlError> {
        serde_json::to_writer(out, &JsonResults(result)).map_err(|e| SparqlDlError::SerializationError(e.to_string()))
    }
}

/// Serialize view of a result in the JSON results layout
pub struct JsonResults<'a>(pub &'a QueryResult);

/// `None` is the ASK head, which carries no `vars` member
struct Head<'a>(Option<&'a [Variable]>);

struct Results<'a> {
    variables: &'a [Variable],
    rows: &'a [BindingRow],
}

struct Row<'a> {
    variables: &'a [Variable],
    row: &'a BindingRow,
}

struct JsonTerm<'a>(&'a Term);

impl Serialize for JsonResults<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self.0 {
            QueryResult::Ask { result } => {
                map.serialize_entry("head", &Head(None))?;
                map.serialize_entry("boolean", result)?;
            }
            QueryResult::Select { variables, rows } => {
                map.serialize_entry("head", &Head(Some(variables.as_slice())))?;
                map.serialize_entry("results", &Results { variables, rows })?;
            }
        }
        map.end()
    }
}

impl Serialize for Head<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(variables) = self.0 else {
            return serializer.serialize_map(Some(0))?.end();
        };
        let mut map = serializer.serialize_map(Some(1))?;
        let names: Vec<&str> = variables.iter().map(Variable::name).collect();
        map.serialize_entry("vars", &names)?;
        map.end()
    }
}

impl Serialize for Results<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Bindings<'a>(&'a Results<'a>);

        impl Serialize for Bindings<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut seq = serializer.serialize_seq(Some(self.0.rows.len()))?;
                for row in self.0.rows {
                    seq.serialize_element(&Row {
                        variables: self.0.variables,
                        row,
                    })?;
                }
                seq.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("bindings", &Bindings(self))?;
        map.end()
    }
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for variable in self.variables {
            if let Some(term) = self.row.get(variable) {
                map.serialize_entry(variable.name(), &JsonTerm(term))?;
            }
        }
        map.end()
    }
}

impl Serialize for JsonTerm<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self.0 {
            Term::Iri(iri) => {
                map.serialize_entry("type", "uri")?;
                map.serialize_entry("value", iri)?;
            }
            Term::BlankNode(id) => {
                map.serialize_entry("type", "bnode")?;
                map.serialize_entry("value", id)?;
            }
            Term::Literal(literal) => {
                map.serialize_entry("type", "literal")?;
                map.serialize_entry("value", &literal.lexical)?;
                if let Some(language) = &literal.language {
                    map.serialize_entry("xml:lang", language)?;
                } else if let Some(datatype) = &literal.datatype {
                    map.serialize_entry("datatype", datatype)?;
                }
            }
        }
        map.end()
    }
}
