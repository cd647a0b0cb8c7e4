//! SPARQL-DL 構文解析器

use crate::lexer::{tokenize, Token};
use crate::query::{AtomKind, QueryArgument, QueryAtom, QueryForm, QueryGroup, SparqlDlQuery, Variable};
use crate::SparqlDlError;
use dlconsult_rdf::vocab::{OWL_NS, RDFS_NS, RDF_NS, XSD_NS};
use dlconsult_rdf::Literal;
use std::collections::BTreeMap;
use tracing::debug;

/// SPARQL-DL Parser trait
pub trait SparqlDlParser {
    fn parse(&self, query: &str) -> Result<SparqlDlQuery, SparqlDlError>;
}

/// Default implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSparqlDlParser;

impl SparqlDlParser for DefaultSparqlDlParser {
    fn parse(&self, query: &str) -> Result<SparqlDlQuery, SparqlDlError> {
        let tokens = tokenize(query)
            .map_err(|offset| SparqlDlError::ParseError(format!("unexpected character at offset {}", offset)))?;
        let parsed = QueryParser::new(tokens).parse_query()?;
        debug!(groups = parsed.groups.len(), ask = parsed.is_ask(), "query parsed");
        Ok(parsed)
    }
}

fn predeclared_prefixes() -> BTreeMap<String, String> {
    [("rdf", RDF_NS), ("rdfs", RDFS_NS), ("owl", OWL_NS), ("xsd", XSD_NS)]
        .into_iter()
        .map(|(prefix, ns)| (prefix.to_string(), ns.to_string()))
        .collect()
}

struct QueryParser<'a> {
    tokens: Vec<(Token<'a>, usize)>,
    position: usize,
    prefixes: BTreeMap<String, String>,
}

impl<'a> QueryParser<'a> {
    fn new(tokens: Vec<(Token<'a>, usize)>) -> Self {
        Self {
            tokens,
            position: 0,
            prefixes: predeclared_prefixes(),
        }
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.position).map(|(token, _)| token)
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.position).map(|(token, _)| token.clone());
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn error(&self, message: impl std::fmt::Display) -> SparqlDlError {
        match self.tokens.get(self.position) {
            Some((token, offset)) => {
                SparqlDlError::ParseError(format!("{} (found '{}' at offset {})", message, token, offset))
            }
            None => SparqlDlError::ParseError(format!("{} (found end of query)", message)),
        }
    }

    fn expect(&mut self, expected: Token<'a>) -> Result<(), SparqlDlError> {
        if self.peek() == Some(&expected) {
            self.position += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", expected)))
        }
    }

    fn eat(&mut self, token: &Token<'a>) -> bool {
        if self.peek() == Some(token) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn parse_query(mut self) -> Result<SparqlDlQuery, SparqlDlError> {
        while self.eat(&Token::Prefix) {
            self.parse_prefix_declaration()?;
        }

        let form = match self.next() {
            Some(Token::Select) => self.parse_projection()?,
            Some(Token::Ask) => QueryForm::Ask,
            _ => {
                self.position = self.position.saturating_sub(1);
                return Err(self.error("expected SELECT or ASK"));
            }
        };

        self.eat(&Token::Where);
        let mut groups = vec![self.parse_group()?];
        while self.eat(&Token::Or) {
            self.eat(&Token::Where);
            groups.push(self.parse_group()?);
        }

        if self.peek().is_some() {
            return Err(self.error("unexpected trailing input"));
        }

        Ok(SparqlDlQuery {
            form,
            prefixes: self.prefixes,
            groups,
        })
    }

    fn parse_prefix_declaration(&mut self) -> Result<(), SparqlDlError> {
        let prefix = match self.peek() {
            Some(Token::PrefixedName(name)) if name.ends_with(':') => name.trim_end_matches(':').to_string(),
            _ => return Err(self.error("expected prefix name ending in ':'")),
        };
        self.position += 1;

        match self.next() {
            Some(Token::Iri(namespace)) => {
                self.prefixes.insert(prefix, namespace.to_string());
                Ok(())
            }
            _ => {
                self.position -= 1;
                Err(self.error("expected namespace IRI"))
            }
        }
    }

    fn parse_projection(&mut self) -> Result<QueryForm, SparqlDlError> {
        let distinct = self.eat(&Token::Distinct);

        if self.eat(&Token::Star) {
            return Ok(QueryForm::Select {
                distinct,
                variables: Vec::new(),
            });
        }

        let mut variables: Vec<Variable> = Vec::new();
        while let Some(Token::Variable(name)) = self.peek() {
            let variable = Variable::new(*name);
            if !variables.contains(&variable) {
                variables.push(variable);
            }
            self.position += 1;
        }

        if variables.is_empty() {
            return Err(self.error("expected result variables or '*'"));
        }
        Ok(QueryForm::Select { distinct, variables })
    }

    fn parse_group(&mut self) -> Result<QueryGroup, SparqlDlError> {
        self.expect(Token::LBrace)?;
        let mut atoms = Vec::new();

        if self.eat(&Token::RBrace) {
            return Ok(QueryGroup::new(atoms));
        }

        loop {
            atoms.push(self.parse_atom()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect(Token::RBrace)?;
            return Ok(QueryGroup::new(atoms));
        }
    }

    fn parse_atom(&mut self) -> Result<QueryAtom, SparqlDlError> {
        let kind = match self.peek() {
            Some(Token::Word(name)) => AtomKind::from_name(name).ok_or_else(|| self.error("unknown query atom"))?,
            _ => return Err(self.error("expected query atom")),
        };
        self.position += 1;
        self.expect(Token::LParen)?;

        let mut args = Vec::new();
        loop {
            let position = args.len();
            if position == kind.arity() {
                return Err(self.error(format!("{} takes {} argument(s)", kind, kind.arity())));
            }

            let argument = self.parse_argument()?;
            if matches!(argument, QueryArgument::Literal(_)) && !kind.accepts_literal(position) {
                return Err(SparqlDlError::ParseError(format!(
                    "literal not allowed as argument {} of {}",
                    position + 1,
                    kind
                )));
            }
            args.push(argument);

            if !self.eat(&Token::Comma) {
                break;
            }
        }

        if args.len() != kind.arity() {
            return Err(self.error(format!("{} takes {} argument(s)", kind, kind.arity())));
        }
        self.expect(Token::RParen)?;
        Ok(QueryAtom::new(kind, args))
    }

    fn parse_argument(&mut self) -> Result<QueryArgument, SparqlDlError> {
        match self.next() {
            Some(Token::Variable(name)) => Ok(QueryArgument::Var(Variable::new(name))),
            Some(Token::Iri(iri)) => Ok(QueryArgument::Iri(iri.to_string())),
            Some(Token::PrefixedName(name)) => {
                self.position -= 1;
                let iri = self.expand(name)?;
                self.position += 1;
                Ok(QueryArgument::Iri(iri))
            }
            Some(Token::Integer(value)) => Ok(QueryArgument::Literal(Literal::typed(
                value.trim_start_matches('+'),
                format!("{}integer", XSD_NS),
            ))),
            Some(Token::StringLiteral(value)) => {
                let lexical = unescape(value);
                let literal = match self.peek() {
                    Some(Token::LangTag(tag)) => {
                        let literal = Literal::lang(lexical, tag.to_ascii_lowercase());
                        self.position += 1;
                        literal
                    }
                    Some(Token::DoubleCaret) => {
                        self.position += 1;
                        let datatype = match self.next() {
                            Some(Token::Iri(iri)) => iri.to_string(),
                            Some(Token::PrefixedName(name)) => {
                                self.position -= 1;
                                let iri = self.expand(name)?;
                                self.position += 1;
                                iri
                            }
                            _ => {
                                self.position -= 1;
                                return Err(self.error("expected datatype IRI"));
                            }
                        };
                        if datatype == format!("{}string", XSD_NS) {
                            Literal::plain(lexical)
                        } else {
                            Literal::typed(lexical, datatype)
                        }
                    }
                    _ => Literal::plain(lexical),
                };
                Ok(QueryArgument::Literal(literal))
            }
            _ => {
                self.position = self.position.saturating_sub(1);
                Err(self.error("expected variable, IRI or literal"))
            }
        }
    }

    fn expand(&self, name: &str) -> Result<String, SparqlDlError> {
        let (prefix, local) = name
            .split_once(':')
            .ok_or_else(|| self.error("malformed prefixed name"))?;
        self.prefixes
            .get(prefix)
            .map(|namespace| format!("{}{}", namespace, local))
            .ok_or_else(|| self.error(format!("unknown prefix '{}:'", prefix)))
    }
}

fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}
