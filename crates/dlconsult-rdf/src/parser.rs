//! Knowledge document parsing (RDF/XML, Turtle, N-Triples) via Sophia

use crate::model::{Literal, Term, Triple};
use crate::store::TripleStore;
use crate::RdfError;
use sophia::api::source::TripleSource;
use sophia::api::term::{Term as SophiaTerm, TermKind};
use sophia::api::triple::Triple as SophiaTriple;
use std::path::Path;
use tracing::debug;

/// Supported RDF serializations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    RdfXml,
    Turtle,
    NTriples,
}

impl RdfFormat {
    /// Guess the syntax from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "owl" | "rdf" | "xml" => Some(RdfFormat::RdfXml),
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "nt" | "ntriples" => Some(RdfFormat::NTriples),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RdfFormat::RdfXml => "RDF/XML",
            RdfFormat::Turtle => "Turtle",
            RdfFormat::NTriples => "N-Triples",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct TripleSinkError {
    message: String,
}

/// Read and parse a knowledge document.
///
/// Unknown extensions are tried as RDF/XML first, then as Turtle.
pub fn parse_document(path: &Path) -> Result<TripleStore, RdfError> {
    let bytes = std::fs::read(path)?;

    match RdfFormat::from_path(path) {
        Some(format) => parse_bytes(&bytes, format),
        None => parse_bytes(&bytes, RdfFormat::RdfXml).or_else(|xml_err| {
            debug!(error = %xml_err, "document is not RDF/XML, trying Turtle");
            parse_bytes(&bytes, RdfFormat::Turtle).map_err(|ttl_err| {
                RdfError::Syntax(format!(
                    "{} is neither RDF/XML ({}) nor Turtle ({})",
                    path.display(),
                    xml_err,
                    ttl_err
                ))
            })
        }),
    }
}

/// Parse an in-memory document of the given syntax
pub fn parse_bytes(bytes: &[u8], format: RdfFormat) -> Result<TripleStore, RdfError> {
    let reader = std::io::BufReader::new(std::io::Cursor::new(bytes));
    let mut store = TripleStore::new();

    match format {
        RdfFormat::RdfXml => {
            let mut source = sophia::xml::parser::parse_bufread(reader);
            collect_triples(&mut source, &mut store, format)?;
        }
        RdfFormat::Turtle => {
            let mut source = sophia::turtle::parser::turtle::parse_bufread(reader);
            collect_triples(&mut source, &mut store, format)?;
        }
        RdfFormat::NTriples => {
            let mut source = sophia::turtle::parser::nt::parse_bufread(reader);
            collect_triples(&mut source, &mut store, format)?;
        }
    }

    debug!(format = format.name(), triples = store.len(), "parsed knowledge document");
    Ok(store)
}

fn collect_triples<S>(source: &mut S, store: &mut TripleStore, format: RdfFormat) -> Result<(), RdfError>
where
    S: TripleSource,
{
    source
        .try_for_each_triple(|t| -> Result<(), TripleSinkError> {
            let subject = convert_term(t.s()).filter(Term::is_node).ok_or_else(|| TripleSinkError {
                message: "triple subject must be an IRI or blank node".to_string(),
            })?;
            let Some(Term::Iri(predicate)) = convert_term(t.p()) else {
                return Err(TripleSinkError {
                    message: "triple predicate must be an IRI".to_string(),
                });
            };
            let object = convert_term(t.o()).ok_or_else(|| TripleSinkError {
                message: "unsupported object term".to_string(),
            })?;

            store.insert(Triple::new(subject, predicate, object));
            Ok(())
        })
        .map_err(|e| RdfError::Syntax(format!("failed to parse {}: {}", format.name(), e)))
}

fn convert_term<T: SophiaTerm>(term: T) -> Option<Term> {
    match term.kind() {
        TermKind::Iri => term.iri().map(|iri| Term::Iri(iri.as_str().to_string())),
        TermKind::BlankNode => term.bnode_id().map(|id| Term::BlankNode(id.as_str().to_string())),
        TermKind::Literal => {
            let lexical = term.lexical_form()?.to_string();
            let language = term.language_tag().map(|tag| tag.as_str().to_string());
            // rdf:langString is implied by the language tag
            let datatype = match language {
                Some(_) => None,
                None => term
                    .datatype()
                    .map(|dt| dt.as_str().to_string())
                    .filter(|dt| dt != "http://www.w3.org/2001/XMLSchema#string"),
            };
            Some(Term::Literal(Literal {
                lexical,
                datatype,
                language,
            }))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::rdf;

    const TURTLE: &str = r#"
        @prefix ex: <http://example.org/> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

        ex:Person a owl:Class .
        ex:Student a owl:Class ; rdfs:subClassOf ex:Person .
        ex:alice a ex:Student ; ex:name "Alice"@en ; ex:age 21 .
        ex:Parent owl:equivalentClass [ a owl:Restriction ; owl:onProperty ex:hasChild ; owl:someValuesFrom ex:Person ] .
    "#;

    #[test]
    fn test_format_from_path() {
        assert_eq!(RdfFormat::from_path(Path::new("a.owl")), Some(RdfFormat::RdfXml));
        assert_eq!(RdfFormat::from_path(Path::new("a.RDF")), Some(RdfFormat::RdfXml));
        assert_eq!(RdfFormat::from_path(Path::new("dir/a.ttl")), Some(RdfFormat::Turtle));
        assert_eq!(RdfFormat::from_path(Path::new("a.nt")), Some(RdfFormat::NTriples));
        assert_eq!(RdfFormat::from_path(Path::new("a.json")), None);
        assert_eq!(RdfFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_parse_turtle() {
        let store = parse_bytes(TURTLE.as_bytes(), RdfFormat::Turtle).unwrap();

        let alice = Term::iri("http://example.org/alice");
        assert!(store.has_type(&alice, "http://example.org/Student"));

        let name = store.object(&alice, "http://example.org/name").unwrap();
        assert_eq!(name, &Term::Literal(Literal::lang("Alice", "en")));

        let age = store.object(&alice, "http://example.org/age").unwrap();
        assert_eq!(
            age,
            &Term::Literal(Literal::typed("21", "http://www.w3.org/2001/XMLSchema#integer"))
        );

        let restriction = store
            .object(&Term::iri("http://example.org/Parent"), "http://www.w3.org/2002/07/owl#equivalentClass")
            .unwrap();
        assert!(restriction.is_blank());
    }

    #[test]
    fn test_parse_ntriples() {
        let nt = "<http://example.org/alice> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/Student> .\n";
        let store = parse_bytes(nt.as_bytes(), RdfFormat::NTriples).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.find(None, Some(rdf::TYPE), None).len(), 1);
    }

    #[test]
    fn test_parse_invalid_turtle() {
        let result = parse_bytes(b"this is not turtle", RdfFormat::Turtle);
        assert!(matches!(result, Err(RdfError::Syntax(_))));
    }
}
