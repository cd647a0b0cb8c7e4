//! SPARQL-DL クエリモデル

use dlconsult_rdf::Literal;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query variable, stored without its `?`/`$` sigil
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Variable(pub String);

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "?{}", self.0)
    }
}

/// Atom argument after prefix expansion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryArgument {
    Var(Variable),
    Iri(String),
    Literal(Literal),
}

impl QueryArgument {
    pub fn as_var(&self) -> Option<&Variable> {
        match self {
            QueryArgument::Var(var) => Some(var),
            _ => None,
        }
    }
}

impl std::fmt::Display for QueryArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryArgument::Var(var) => write!(f, "{}", var),
            QueryArgument::Iri(iri) => write!(f, "<{}>", iri),
            QueryArgument::Literal(literal) => {
                write!(f, "\"{}\"", literal.lexical)?;
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

/// SPARQL-DL atom predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum AtomKind {
    Type,
    DirectType,
    PropertyValue,
    SameAs,
    DifferentFrom,
    SubClassOf,
    StrictSubClassOf,
    DirectSubClassOf,
    EquivalentClass,
    DisjointWith,
    ComplementOf,
    SubPropertyOf,
    StrictSubPropertyOf,
    DirectSubPropertyOf,
    EquivalentProperty,
    InverseOf,
    ObjectProperty,
    DataProperty,
    Functional,
    InverseFunctional,
    Transitive,
    Symmetric,
    Reflexive,
    Irreflexive,
    Class,
    Property,
    Individual,
    Annotation,
}

impl AtomKind {
    pub const ALL: [AtomKind; 28] = [
        AtomKind::Type,
        AtomKind::DirectType,
        AtomKind::PropertyValue,
        AtomKind::SameAs,
        AtomKind::DifferentFrom,
        AtomKind::SubClassOf,
        AtomKind::StrictSubClassOf,
        AtomKind::DirectSubClassOf,
        AtomKind::EquivalentClass,
        AtomKind::DisjointWith,
        AtomKind::ComplementOf,
        AtomKind::SubPropertyOf,
        AtomKind::StrictSubPropertyOf,
        AtomKind::DirectSubPropertyOf,
        AtomKind::EquivalentProperty,
        AtomKind::InverseOf,
        AtomKind::ObjectProperty,
        AtomKind::DataProperty,
        AtomKind::Functional,
        AtomKind::InverseFunctional,
        AtomKind::Transitive,
        AtomKind::Symmetric,
        AtomKind::Reflexive,
        AtomKind::Irreflexive,
        AtomKind::Class,
        AtomKind::Property,
        AtomKind::Individual,
        AtomKind::Annotation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AtomKind::Type => "Type",
            AtomKind::DirectType => "DirectType",
            AtomKind::PropertyValue => "PropertyValue",
            AtomKind::SameAs => "SameAs",
            AtomKind::DifferentFrom => "DifferentFrom",
            AtomKind::SubClassOf => "SubClassOf",
            AtomKind::StrictSubClassOf => "StrictSubClassOf",
            AtomKind::DirectSubClassOf => "DirectSubClassOf",
            AtomKind::EquivalentClass => "EquivalentClass",
            AtomKind::DisjointWith => "DisjointWith",
            AtomKind::ComplementOf => "ComplementOf",
            AtomKind::SubPropertyOf => "SubPropertyOf",
            AtomKind::StrictSubPropertyOf => "StrictSubPropertyOf",
            AtomKind::DirectSubPropertyOf => "DirectSubPropertyOf",
            AtomKind::EquivalentProperty => "EquivalentProperty",
            AtomKind::InverseOf => "InverseOf",
            AtomKind::ObjectProperty => "ObjectProperty",
            AtomKind::DataProperty => "DataProperty",
            AtomKind::Functional => "Functional",
            AtomKind::InverseFunctional => "InverseFunctional",
            AtomKind::Transitive => "Transitive",
            AtomKind::Symmetric => "Symmetric",
            AtomKind::Reflexive => "Reflexive",
            AtomKind::Irreflexive => "Irreflexive",
            AtomKind::Class => "Class",
            AtomKind::Property => "Property",
            AtomKind::Individual => "Individual",
            AtomKind::Annotation => "Annotation",
        }
    }

    /// Case-insensitive lookup by atom name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub fn arity(&self) -> usize {
        match self {
            AtomKind::PropertyValue | AtomKind::Annotation => 3,
            AtomKind::ObjectProperty
            | AtomKind::DataProperty
            | AtomKind::Functional
            | AtomKind::InverseFunctional
            | AtomKind::Transitive
            | AtomKind::Symmetric
            | AtomKind::Reflexive
            | AtomKind::Irreflexive
            | AtomKind::Class
            | AtomKind::Property
            | AtomKind::Individual => 1,
            _ => 2,
        }
    }

    /// Whether a literal may appear at the given argument position
    pub fn accepts_literal(&self, position: usize) -> bool {
        matches!(self, AtomKind::PropertyValue | AtomKind::Annotation) && position == 2
    }
}

impl std::fmt::Display for AtomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One query atom such as `Type(?x, <C>)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryAtom {
    pub kind: AtomKind,
    pub args: Vec<QueryArgument>,
}

impl QueryAtom {
    pub fn new(kind: AtomKind, args: Vec<QueryArgument>) -> Self {
        Self { kind, args }
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.args.iter().filter_map(QueryArgument::as_var)
    }
}

impl std::fmt::Display for QueryAtom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind, self.args.iter().join(", "))
    }
}

/// Conjunction of atoms; the query is a disjunction of groups (`OR WHERE`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryGroup {
    pub atoms: Vec<QueryAtom>,
}

impl QueryGroup {
    pub fn new(atoms: Vec<QueryAtom>) -> Self {
        Self { atoms }
    }
}

/// Query Form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryForm {
    /// `SELECT`; an empty variable list means `SELECT *`
    Select { distinct: bool, variables: Vec<Variable> },
    Ask,
}

/// Parsed SPARQL-DL query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparqlDlQuery {
    pub form: QueryForm,
    pub prefixes: BTreeMap<String, String>,
    pub groups: Vec<QueryGroup>,
}

impl SparqlDlQuery {
    pub fn is_ask(&self) -> bool {
        matches!(self.form, QueryForm::Ask)
    }

    pub fn is_distinct(&self) -> bool {
        matches!(self.form, QueryForm::Select { distinct: true, .. })
    }

    /// Variables in order of first appearance in the pattern
    pub fn pattern_variables(&self) -> Vec<Variable> {
        self.groups
            .iter()
            .flat_map(|group| group.atoms.iter())
            .flat_map(QueryAtom::variables)
            .unique()
            .cloned()
            .collect()
    }

    /// Head of the result: the projection, or every pattern variable for
    /// `SELECT *`, and nothing for `ASK`
    pub fn result_variables(&self) -> Vec<Variable> {
        match &self.form {
            QueryForm::Select { variables, .. } if variables.is_empty() => self.pattern_variables(),
            QueryForm::Select { variables, .. } => variables.clone(),
            QueryForm::Ask => Vec::new(),
        }
    }
}

impl std::fmt::Display for SparqlDlQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.form {
            QueryForm::Select { distinct, variables } => {
                write!(f, "SELECT ")?;
                if *distinct {
                    write!(f, "DISTINCT ")?;
                }
                if variables.is_empty() {
                    write!(f, "*")?;
                } else {
                    write!(f, "{}", variables.iter().join(" "))?;
                }
            }
            QueryForm::Ask => write!(f, "ASK")?,
        }

        for (i, group) in self.groups.iter().enumerate() {
            let keyword = if i == 0 { " WHERE" } else { " OR WHERE" };
            write!(f, "{} {{ {} }}", keyword, group.atoms.iter().join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_lookup_ignores_case() {
        assert_eq!(AtomKind::from_name("subclassof"), Some(AtomKind::SubClassOf));
        assert_eq!(AtomKind::from_name("TYPE"), Some(AtomKind::Type));
        assert_eq!(AtomKind::from_name("Unknown"), None);
        assert!(AtomKind::ALL.iter().all(|kind| AtomKind::from_name(kind.name()) == Some(*kind)));
    }

    #[test]
    fn test_arity_and_literal_positions() {
        assert_eq!(AtomKind::PropertyValue.arity(), 3);
        assert_eq!(AtomKind::Type.arity(), 2);
        assert_eq!(AtomKind::Class.arity(), 1);
        assert!(AtomKind::PropertyValue.accepts_literal(2));
        assert!(!AtomKind::PropertyValue.accepts_literal(0));
        assert!(!AtomKind::Type.accepts_literal(1));
    }

    #[test]
    fn test_result_variables_for_select_star() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let query = SparqlDlQuery {
            form: QueryForm::Select {
                distinct: false,
                variables: vec![],
            },
            prefixes: BTreeMap::new(),
            groups: vec![
                QueryGroup::new(vec![QueryAtom::new(
                    AtomKind::Type,
                    vec![QueryArgument::Var(x.clone()), QueryArgument::Var(y.clone())],
                )]),
                QueryGroup::new(vec![QueryAtom::new(AtomKind::Individual, vec![QueryArgument::Var(x.clone())])]),
            ],
        };

        assert_eq!(query.result_variables(), vec![x, y]);
        assert_eq!(query.to_string(), "SELECT * WHERE { Type(?x, ?y) } OR WHERE { Individual(?x) }");
    }
}
