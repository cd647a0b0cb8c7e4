//! SPARQL-DL 実行エンジン

use crate::query::{AtomKind, QueryArgument, QueryAtom, QueryGroup, SparqlDlQuery};
use crate::result::{BindingRow, QueryResult};
use crate::SparqlDlError;
use dlconsult_owl::{Individual, OwlIri, OwlReasoner, PropertyCharacteristic, Value};
use dlconsult_rdf::Term;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Limits applied while evaluating a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOptions {
    /// Maximum number of intermediate solutions explored
    pub max_bindings: usize,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            max_bindings: 1_000_000,
        }
    }
}

/// 実行エンジントレイト
pub trait SparqlDlEvaluator {
    fn evaluate(&self, query: &SparqlDlQuery, reasoner: &dyn OwlReasoner) -> Result<QueryResult, SparqlDlError>;
}

/// デフォルト実行エンジン
#[derive(Debug, Clone, Default)]
pub struct DefaultSparqlDlEvaluator {
    options: EvaluationOptions,
}

impl DefaultSparqlDlEvaluator {
    pub fn new(options: EvaluationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EvaluationOptions {
        &self.options
    }
}

impl SparqlDlEvaluator for DefaultSparqlDlEvaluator {
    fn evaluate(&self, query: &SparqlDlQuery, reasoner: &dyn OwlReasoner) -> Result<QueryResult, SparqlDlError> {
        reasoner.ensure_consistent()?;

        let mut search = Search {
            reasoner,
            limit: self.options.max_bindings,
            explored: 0,
            first_only: query.is_ask(),
        };

        let mut solutions = Vec::new();
        for group in &query.groups {
            search.solve_group(group, &mut solutions)?;
            if search.first_only && !solutions.is_empty() {
                break;
            }
        }
        debug!(solutions = solutions.len(), explored = search.explored, "query evaluated");

        if query.is_ask() {
            return Ok(QueryResult::ask(!solutions.is_empty()));
        }

        let variables = query.result_variables();
        let projected = solutions.into_iter().map(|solution| {
            solution
                .into_iter()
                .filter(|(variable, _)| variables.contains(variable))
                .collect::<BindingRow>()
        });
        let rows: Vec<BindingRow> = if query.is_distinct() {
            projected.unique().collect()
        } else {
            projected.collect()
        };

        Ok(QueryResult::select(variables, rows))
    }
}

type Tuple = Vec<Term>;

struct Search<'r> {
    reasoner: &'r dyn OwlReasoner,
    limit: usize,
    explored: usize,
    first_only: bool,
}

fn iri_term(iri: &OwlIri) -> Term {
    Term::Iri(iri.as_str().to_string())
}

fn individual_term(individual: &Individual) -> Term {
    iri_term(individual.iri())
}

fn as_iri(term: &Term) -> Option<OwlIri> {
    term.as_iri().map(OwlIri::new)
}

fn resolve(argument: &QueryArgument, binding: &BindingRow) -> Option<Term> {
    match argument {
        QueryArgument::Var(variable) => binding.get(variable).cloned(),
        QueryArgument::Iri(iri) => Some(Term::Iri(iri.clone())),
        QueryArgument::Literal(literal) => Some(Term::Literal(literal.clone())),
    }
}

/// Extend `binding` so that the atom arguments match `tuple`
fn unify(binding: &BindingRow, args: &[QueryArgument], tuple: Tuple) -> Option<BindingRow> {
    let mut extended = binding.clone();
    for (argument, term) in args.iter().zip(tuple) {
        match argument {
            QueryArgument::Var(variable) => match extended.get(variable) {
                Some(bound) if *bound != term => return None,
                Some(_) => {}
                None => {
                    extended.insert(variable.clone(), term);
                }
            },
            QueryArgument::Iri(iri) => {
                if term.as_iri() != Some(iri.as_str()) {
                    return None;
                }
            }
            QueryArgument::Literal(literal) => {
                if term.as_literal() != Some(literal) {
                    return None;
                }
            }
        }
    }
    Some(extended)
}

impl<'r> Search<'r> {
    fn solve_group(&mut self, group: &QueryGroup, solutions: &mut Vec<BindingRow>) -> Result<(), SparqlDlError> {
        let remaining: Vec<&QueryAtom> = group.atoms.iter().collect();
        self.solve(&remaining, BindingRow::new(), solutions)
    }

    fn solve(&mut self, remaining: &[&QueryAtom], binding: BindingRow, solutions: &mut Vec<BindingRow>) -> Result<(), SparqlDlError> {
        if remaining.is_empty() {
            solutions.push(binding);
            return Ok(());
        }

        // Most constrained atom first; ties keep the written order
        let next = remaining
            .iter()
            .enumerate()
            .min_by_key(|(_, atom)| atom.variables().filter(|v| !binding.contains_key(*v)).count())
            .map(|(index, _)| index)
            .unwrap_or(0);
        let atom = remaining[next];
        let rest: Vec<&QueryAtom> = remaining
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != next)
            .map(|(_, atom)| *atom)
            .collect();

        for tuple in self.candidates(atom, &binding) {
            let Some(extended) = unify(&binding, &atom.args, tuple) else {
                continue;
            };

            self.explored += 1;
            if self.explored > self.limit {
                return Err(SparqlDlError::LimitExceeded(self.limit));
            }

            self.solve(&rest, extended, solutions)?;
            if self.first_only && !solutions.is_empty() {
                return Ok(());
            }
        }
        Ok(())
    }

    /// Candidate argument tuples for an atom, narrowed by already bound arguments
    fn candidates(&self, atom: &QueryAtom, binding: &BindingRow) -> Vec<Tuple> {
        let args: Vec<Option<Term>> = atom.args.iter().map(|arg| resolve(arg, binding)).collect();
        let r = self.reasoner;

        match atom.kind {
            AtomKind::Class => unary(r.classes().iter().map(iri_term)),
            AtomKind::ObjectProperty => unary(r.object_properties().iter().map(iri_term)),
            AtomKind::DataProperty => unary(r.data_properties().iter().map(iri_term)),
            AtomKind::Property => unary(self.all_properties(true).iter().map(iri_term)),
            AtomKind::Individual => unary(r.individuals().iter().map(individual_term)),
            AtomKind::Functional => unary(
                self.all_properties(false)
                    .iter()
                    .filter(|p| r.has_characteristic(p, PropertyCharacteristic::Functional))
                    .map(iri_term),
            ),
            AtomKind::InverseFunctional => self.characteristic(PropertyCharacteristic::InverseFunctional),
            AtomKind::Transitive => self.characteristic(PropertyCharacteristic::Transitive),
            AtomKind::Symmetric => self.characteristic(PropertyCharacteristic::Symmetric),
            AtomKind::Reflexive => self.characteristic(PropertyCharacteristic::Reflexive),
            AtomKind::Irreflexive => self.characteristic(PropertyCharacteristic::Irreflexive),

            AtomKind::Type | AtomKind::DirectType => {
                let direct = atom.kind == AtomKind::DirectType;
                binary(
                    &args,
                    || r.individuals().iter().map(individual_term).collect(),
                    |i| r.types(&Individual(i), direct).iter().map(iri_term).collect(),
                    |c| Some(r.instances(&c, direct).iter().map(individual_term).collect()),
                )
            }
            AtomKind::SameAs => binary(
                &args,
                || r.individuals().iter().map(individual_term).collect(),
                |i| r.same_individuals(&Individual(i)).iter().map(individual_term).collect(),
                |j| Some(r.same_individuals(&Individual(j)).iter().map(individual_term).collect()),
            ),
            AtomKind::DifferentFrom => binary(
                &args,
                || r.individuals().iter().map(individual_term).collect(),
                |i| r.different_individuals(&Individual(i)).iter().map(individual_term).collect(),
                |j| Some(r.different_individuals(&Individual(j)).iter().map(individual_term).collect()),
            ),

            AtomKind::SubClassOf => binary(
                &args,
                || r.classes().iter().map(iri_term).collect(),
                |c| r.superclasses(&c, false).iter().map(iri_term).collect(),
                |d| Some(r.subclasses(&d, false).iter().map(iri_term).collect()),
            ),
            AtomKind::StrictSubClassOf => binary(
                &args,
                || r.classes().iter().map(iri_term).collect(),
                |c| strict(r.superclasses(&c, false), r.equivalent_classes(&c)),
                |d| Some(strict(r.subclasses(&d, false), r.equivalent_classes(&d))),
            ),
            AtomKind::DirectSubClassOf => binary(
                &args,
                || r.classes().iter().map(iri_term).collect(),
                |c| r.superclasses(&c, true).iter().map(iri_term).collect(),
                |d| Some(r.subclasses(&d, true).iter().map(iri_term).collect()),
            ),
            AtomKind::EquivalentClass => symmetric(&args, || r.classes(), |c| r.equivalent_classes(c)),
            AtomKind::DisjointWith => symmetric(&args, || r.classes(), |c| r.disjoint_classes(c)),
            AtomKind::ComplementOf => symmetric(&args, || r.classes(), |c| r.complement_classes(c)),

            AtomKind::SubPropertyOf => binary(
                &args,
                || self.all_properties(false).iter().map(iri_term).collect(),
                |p| r.superproperties(&p, false).iter().map(iri_term).collect(),
                |q| Some(r.subproperties(&q, false).iter().map(iri_term).collect()),
            ),
            AtomKind::StrictSubPropertyOf => binary(
                &args,
                || self.all_properties(false).iter().map(iri_term).collect(),
                |p| strict(r.superproperties(&p, false), r.equivalent_properties(&p)),
                |q| Some(strict(r.subproperties(&q, false), r.equivalent_properties(&q))),
            ),
            AtomKind::DirectSubPropertyOf => binary(
                &args,
                || self.all_properties(false).iter().map(iri_term).collect(),
                |p| r.superproperties(&p, true).iter().map(iri_term).collect(),
                |q| Some(r.subproperties(&q, true).iter().map(iri_term).collect()),
            ),
            AtomKind::EquivalentProperty => {
                symmetric(&args, || self.all_properties(false), |p| r.equivalent_properties(p))
            }
            AtomKind::InverseOf => symmetric(&args, || r.object_properties(), |p| r.inverse_properties(p)),

            AtomKind::PropertyValue => self.property_values(&args),
            AtomKind::Annotation => self.annotation_values(&args),
        }
    }

    /// Object and data properties, optionally with annotation properties
    fn all_properties(&self, with_annotations: bool) -> Vec<OwlIri> {
        let mut properties: BTreeSet<OwlIri> = self.reasoner.object_properties().into_iter().collect();
        properties.extend(self.reasoner.data_properties());
        if with_annotations {
            properties.extend(self.reasoner.annotation_properties());
        }
        properties.into_iter().collect()
    }

    fn characteristic(&self, characteristic: PropertyCharacteristic) -> Vec<Tuple> {
        unary(
            self.reasoner
                .object_properties()
                .iter()
                .filter(|p| self.reasoner.has_characteristic(p, characteristic))
                .map(iri_term),
        )
    }

    fn property_values(&self, args: &[Option<Term>]) -> Vec<Tuple> {
        let r = self.reasoner;
        let object_properties: BTreeSet<OwlIri> = r.object_properties().into_iter().collect();
        let data_properties: BTreeSet<OwlIri> = r.data_properties().into_iter().collect();

        let properties: Vec<OwlIri> = match &args[1] {
            Some(term) => as_iri(term).into_iter().collect(),
            None => object_properties.iter().chain(data_properties.iter()).cloned().collect(),
        };
        let subjects: Vec<Individual> = match &args[0] {
            Some(term) => as_iri(term).map(Individual).into_iter().collect(),
            None => r.individuals(),
        };

        let mut tuples = Vec::new();
        for property in &properties {
            let is_object = object_properties.contains(property);
            if !is_object && !data_properties.contains(property) {
                continue;
            }
            for subject in &subjects {
                let values: Vec<Term> = if is_object {
                    r.object_property_values(subject, property)
                        .iter()
                        .map(individual_term)
                        .collect()
                } else {
                    r.data_property_values(subject, property)
                        .into_iter()
                        .map(Term::Literal)
                        .collect()
                };
                for value in values {
                    tuples.push(vec![individual_term(subject), iri_term(property), value]);
                }
            }
        }
        tuples
    }

    fn annotation_values(&self, args: &[Option<Term>]) -> Vec<Tuple> {
        let r = self.reasoner;
        let subjects: Vec<OwlIri> = match &args[0] {
            Some(term) => as_iri(term).into_iter().collect(),
            None => r.annotation_subjects(),
        };
        let property = args[1].as_ref().and_then(as_iri);
        if args[1].is_some() && property.is_none() {
            return Vec::new();
        }

        let mut tuples = Vec::new();
        for subject in &subjects {
            for (p, value) in r.annotations(subject, property.as_ref()) {
                let value = match value {
                    Value::Iri(iri) => iri_term(&iri),
                    Value::Literal(literal) => Term::Literal(literal),
                };
                tuples.push(vec![iri_term(subject), iri_term(&p), value]);
            }
        }
        tuples
    }
}

fn unary(terms: impl Iterator<Item = Term>) -> Vec<Tuple> {
    terms.map(|term| vec![term]).collect()
}

fn strict(related: Vec<OwlIri>, equivalents: Vec<OwlIri>) -> Vec<Term> {
    related
        .iter()
        .filter(|iri| !equivalents.contains(iri))
        .map(iri_term)
        .collect()
}

/// Tuples of a binary relation, looked up from whichever side is bound.
/// `backward` may decline, in which case the domain is scanned.
fn binary(
    args: &[Option<Term>],
    domain: impl Fn() -> Vec<Term>,
    forward: impl Fn(OwlIri) -> Vec<Term>,
    backward: impl Fn(OwlIri) -> Option<Vec<Term>>,
) -> Vec<Tuple> {
    let lookup = |term: &Term| as_iri(term).map(&forward).unwrap_or_default();

    match (&args[0], &args[1]) {
        (Some(a), _) => lookup(a).into_iter().map(|b| vec![a.clone(), b]).collect(),
        (None, Some(b)) => match as_iri(b).map(&backward) {
            Some(Some(sources)) => sources.into_iter().map(|a| vec![a, b.clone()]).collect(),
            Some(None) => scan(domain(), lookup),
            None => Vec::new(),
        },
        (None, None) => scan(domain(), lookup),
    }
}

fn scan(domain: Vec<Term>, lookup: impl Fn(&Term) -> Vec<Term>) -> Vec<Tuple> {
    domain
        .into_iter()
        .flat_map(|a| lookup(&a).into_iter().map(move |b| vec![a.clone(), b]))
        .collect()
}

/// Binary relation that holds in both directions
fn symmetric(
    args: &[Option<Term>],
    domain: impl Fn() -> Vec<OwlIri>,
    related: impl Fn(&OwlIri) -> Vec<OwlIri>,
) -> Vec<Tuple> {
    binary(
        args,
        || domain().iter().map(iri_term).collect(),
        |a| related(&a).iter().map(iri_term).collect(),
        |b| Some(related(&b).iter().map(iri_term).collect()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{DefaultSparqlDlParser, SparqlDlParser};
    use crate::query::Variable;
    use dlconsult_owl::{Axiom, ClassExpression, Ontology, OwlDlReasoner, PropertyExpression};
    use dlconsult_rdf::Literal;

    fn iri(local: &str) -> OwlIri {
        OwlIri::new(format!("http://example.org/{}", local))
    }

    fn named(local: &str) -> ClassExpression {
        ClassExpression::Named(iri(local))
    }

    fn ind(local: &str) -> Individual {
        Individual(iri(local))
    }

    fn reasoner() -> OwlDlReasoner {
        let mut ontology = Ontology::new();
        ontology.add_axiom(Axiom::SubClassOf(named("Student"), named("Person")));
        ontology.add_axiom(Axiom::SubClassOf(named("Teacher"), named("Person")));
        ontology.add_axiom(Axiom::EquivalentClasses(vec![named("Human"), named("Person")]));
        ontology.add_axiom(Axiom::ClassAssertion(named("Student"), ind("alice")));
        ontology.add_axiom(Axiom::ClassAssertion(named("Teacher"), ind("bob")));
        ontology.add_axiom(Axiom::ObjectPropertyAssertion(iri("knows"), ind("alice"), ind("bob")));
        ontology.add_axiom(Axiom::DataPropertyAssertion(iri("age"), ind("alice"), Literal::typed("21", "http://www.w3.org/2001/XMLSchema#integer")));
        ontology.add_axiom(Axiom::PropertyCharacteristic(
            PropertyExpression::ObjectProperty(iri("knows")),
            PropertyCharacteristic::Symmetric,
        ));
        OwlDlReasoner::new(ontology)
    }

    fn run(query: &str) -> Result<QueryResult, SparqlDlError> {
        let parsed = DefaultSparqlDlParser.parse(&format!("PREFIX ex: <http://example.org/>\n{}", query))?;
        DefaultSparqlDlEvaluator::default().evaluate(&parsed, &reasoner())
    }

    fn column(result: &QueryResult, name: &str) -> Vec<String> {
        result
            .rows()
            .iter()
            .filter_map(|row| row.get(&Variable::new(name)))
            .map(|term| match term {
                Term::Iri(iri) => iri.trim_start_matches("http://example.org/").to_string(),
                Term::Literal(literal) => literal.lexical.clone(),
                Term::BlankNode(id) => id.clone(),
            })
            .collect()
    }

    #[test]
    fn test_instance_retrieval() {
        let result = run("SELECT ?x WHERE { Type(?x, ex:Person) }").unwrap();
        assert_eq!(column(&result, "x"), vec!["alice", "bob"]);
        assert_eq!(result.size(), 2);
    }

    #[test]
    fn test_join_across_atoms() {
        let result = run("SELECT ?x ?y WHERE { PropertyValue(?x, ex:knows, ?y), Type(?y, ex:Teacher) }").unwrap();
        assert_eq!(column(&result, "x"), vec!["alice"]);
        assert_eq!(column(&result, "y"), vec!["bob"]);
    }

    #[test]
    fn test_data_property_values() {
        let result = run("SELECT ?v WHERE { PropertyValue(ex:alice, ex:age, ?v) }").unwrap();
        assert_eq!(column(&result, "v"), vec!["21"]);

        let matched = run("ASK { PropertyValue(ex:alice, ex:age, \"21\"^^xsd:integer) }").unwrap();
        assert_eq!(matched.boolean(), Some(true));
        let mismatched = run("ASK { PropertyValue(ex:alice, ex:age, 22) }").unwrap();
        assert_eq!(mismatched.boolean(), Some(false));
    }

    #[test]
    fn test_class_atoms() {
        let strict = run("SELECT ?c WHERE { StrictSubClassOf(ex:Student, ?c) }").unwrap();
        assert_eq!(
            column(&strict, "c"),
            vec!["Human", "Person", "http://www.w3.org/2002/07/owl#Thing"]
        );

        let direct = run("SELECT ?c WHERE { DirectSubClassOf(?c, ex:Person) }").unwrap();
        assert_eq!(column(&direct, "c"), vec!["Student", "Teacher"]);

        let equivalent = run("SELECT ?c WHERE { EquivalentClass(ex:Person, ?c) }").unwrap();
        assert_eq!(column(&equivalent, "c"), vec!["Human", "Person"]);
    }

    #[test]
    fn test_repeated_variable() {
        let result = run("SELECT ?c WHERE { SubClassOf(?c, ?c), Class(?c) }").unwrap();
        assert_eq!(result.size(), 6);
    }

    #[test]
    fn test_distinct_and_projection() {
        let all = run("SELECT ?x WHERE { Type(?x, ?c) }").unwrap();
        let distinct = run("SELECT DISTINCT ?x WHERE { Type(?x, ?c) }").unwrap();
        assert!(all.size() > distinct.size());
        assert_eq!(column(&distinct, "x"), vec!["alice", "bob"]);
    }

    #[test]
    fn test_or_where_and_unbound_variables() {
        let result = run("SELECT ?x ?p WHERE { Type(?x, ex:Student) } OR WHERE { Symmetric(?p) }").unwrap();
        assert_eq!(result.size(), 2);
        assert_eq!(column(&result, "x"), vec!["alice"]);
        assert_eq!(column(&result, "p"), vec!["knows"]);
        assert!(result.rows()[0].get(&Variable::new("p")).is_none());
    }

    #[test]
    fn test_ask_and_empty_select() {
        assert_eq!(run("ASK { SameAs(ex:alice, ex:alice) }").unwrap().boolean(), Some(true));
        assert_eq!(run("ASK { Type(ex:bob, ex:Student) }").unwrap().boolean(), Some(false));

        let empty = run("SELECT ?x WHERE { Type(?x, ex:Unknown) }").unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.variables(), &[Variable::new("x")]);
    }

    #[test]
    fn test_binding_limit() {
        let parsed = DefaultSparqlDlParser
            .parse("SELECT * WHERE { Class(?a), Class(?b), Class(?c) }")
            .unwrap();
        let evaluator = DefaultSparqlDlEvaluator::new(EvaluationOptions { max_bindings: 10 });
        let result = evaluator.evaluate(&parsed, &reasoner());
        assert!(matches!(result, Err(SparqlDlError::LimitExceeded(10))));
    }

    #[test]
    fn test_inconsistent_ontology_is_rejected() {
        let mut ontology = Ontology::new();
        ontology.add_axiom(Axiom::ClassAssertion(ClassExpression::Nothing, ind("ghost")));
        let reasoner = OwlDlReasoner::new(ontology);
        let parsed = DefaultSparqlDlParser.parse("SELECT ?x WHERE { Individual(?x) }").unwrap();

        let result = DefaultSparqlDlEvaluator::default().evaluate(&parsed, &reasoner);
        assert!(matches!(result, Err(SparqlDlError::Reasoner(_))));
    }
}
