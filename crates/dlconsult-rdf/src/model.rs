//! RDF data model

use serde::{Deserialize, Serialize};

/// RDF literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl Literal {
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    pub fn lang(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }
}

/// RDF term
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Iri(String),
    BlankNode(String),
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// IRI or blank node
    pub fn is_node(&self) -> bool {
        !matches!(self, Term::Literal(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::BlankNode(id) => write!(f, "_:{}", id),
            Term::Literal(literal) => {
                write!(f, "\"{}\"", literal.lexical.replace('\\', "\\\\").replace('"', "\\\""))?;
                if let Some(language) = &literal.language {
                    write!(f, "@{}", language)
                } else if let Some(datatype) = &literal.datatype {
                    write!(f, "^^<{}>", datatype)
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// RDF Triple representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_display_ntriples_form() {
        assert_eq!(Term::iri("http://example.org/a").to_string(), "<http://example.org/a>");
        assert_eq!(Term::BlankNode("b0".to_string()).to_string(), "_:b0");
        assert_eq!(Term::Literal(Literal::plain("say \"hi\"")).to_string(), "\"say \\\"hi\\\"\"");
        assert_eq!(Term::Literal(Literal::lang("chat", "fr")).to_string(), "\"chat\"@fr");
        assert_eq!(
            Term::Literal(Literal::typed("42", "http://www.w3.org/2001/XMLSchema#integer")).to_string(),
            "\"42\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
    }

    #[test]
    fn test_term_accessors() {
        let iri = Term::iri("http://example.org/a");
        assert_eq!(iri.as_iri(), Some("http://example.org/a"));
        assert!(iri.is_node());
        assert!(!iri.is_blank());

        let literal = Term::Literal(Literal::plain("x"));
        assert_eq!(literal.as_iri(), None);
        assert!(!literal.is_node());
        assert_eq!(literal.as_literal().map(|l| l.lexical.as_str()), Some("x"));
    }

    #[test]
    fn test_triple_display() {
        let triple = Triple::new(
            Term::iri("http://example.org/alice"),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
            Term::iri("http://example.org/Student"),
        );
        assert_eq!(
            triple.to_string(),
            "<http://example.org/alice> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/Student> ."
        );
    }
}
