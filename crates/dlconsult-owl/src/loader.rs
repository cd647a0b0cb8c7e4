//! OWLオントロジーローダー (RDF トリプル → OWL 公理)

use crate::model::{
    Axiom, ClassExpression, Individual, Ontology, OwlIri, PropertyCharacteristic, PropertyExpression, Value,
};
use crate::OwlError;
use dlconsult_rdf::vocab::{self, owl, rdf, rdfs, XSD_NS};
use dlconsult_rdf::{Term, Triple, TripleStore};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Nesting limit for anonymous class expressions
const MAX_EXPRESSION_DEPTH: usize = 64;

const BUILTIN_ANNOTATION_PROPERTIES: &[&str] = &[
    rdfs::LABEL,
    rdfs::COMMENT,
    rdfs::SEE_ALSO,
    rdfs::IS_DEFINED_BY,
    owl::VERSION_INFO,
    owl::DEPRECATED,
];

/// Ontology loader trait
pub trait OntologyLoader {
    fn load_from_store(&self, store: &TripleStore) -> Result<Ontology, OwlError>;
}

/// Default OWL ontology loader (OWL 2 RDF mapping, structural subset)
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultOntologyLoader;

impl OntologyLoader for DefaultOntologyLoader {
    fn load_from_store(&self, store: &TripleStore) -> Result<Ontology, OwlError> {
        let mut ontology = Ontology::new();
        load_declarations(store, &mut ontology);

        let mapper = AxiomMapper {
            store,
            object_properties: ontology.object_properties.clone(),
            data_properties: ontology.data_properties.clone(),
            annotation_properties: ontology.annotation_properties.clone(),
        };

        let mut skipped = 0usize;
        for triple in store.iter() {
            match mapper.translate(triple) {
                Ok(axioms) => {
                    for axiom in axioms {
                        ontology.add_axiom(axiom);
                    }
                }
                Err(OwlError::UnsupportedFeature(reason)) => {
                    warn!(triple = %triple, reason = %reason, "skipping unsupported construct");
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            axioms = ontology.axioms.len(),
            classes = ontology.classes.len(),
            individuals = ontology.individuals.len(),
            skipped,
            "ontology loaded"
        );
        Ok(ontology)
    }
}

/// First pass: entity declarations, so that property kinds are known
/// before any axiom is translated
fn load_declarations(store: &TripleStore, ontology: &mut Ontology) {
    for triple in store.find(None, Some(rdf::TYPE), None) {
        let (Some(subject), Some(kind)) = (triple.subject.as_iri(), triple.object.as_iri()) else {
            continue;
        };
        let iri = OwlIri::new(subject);

        match kind {
            owl::ONTOLOGY => ontology.iri = Some(iri),
            owl::CLASS | rdfs::CLASS => ontology.declare_class(iri),
            owl::OBJECT_PROPERTY => {
                ontology.object_properties.insert(iri);
            }
            owl::DATATYPE_PROPERTY => {
                ontology.data_properties.insert(iri);
            }
            owl::ANNOTATION_PROPERTY => {
                ontology.annotation_properties.insert(iri);
            }
            owl::NAMED_INDIVIDUAL => {
                ontology.individuals.insert(Individual(iri));
            }
            owl::TRANSITIVE_PROPERTY
            | owl::SYMMETRIC_PROPERTY
            | owl::ASYMMETRIC_PROPERTY
            | owl::REFLEXIVE_PROPERTY
            | owl::IRREFLEXIVE_PROPERTY
            | owl::INVERSE_FUNCTIONAL_PROPERTY => {
                if !ontology.data_properties.contains(&iri) {
                    ontology.object_properties.insert(iri);
                }
            }
            _ => {}
        }
    }

    // Properties that are used but never declared
    let declared: BTreeSet<&str> = ontology
        .object_properties
        .iter()
        .chain(&ontology.data_properties)
        .chain(&ontology.annotation_properties)
        .map(OwlIri::as_str)
        .collect();

    let mut implicit_object = BTreeSet::new();
    let mut implicit_data = BTreeSet::new();
    for triple in store.iter() {
        let predicate = triple.predicate.as_str();
        if vocab::is_builtin(predicate) || declared.contains(predicate) {
            continue;
        }
        match triple.object {
            Term::Literal(_) => implicit_data.insert(predicate.to_string()),
            _ => implicit_object.insert(predicate.to_string()),
        };
    }

    for predicate in implicit_data {
        if !implicit_object.contains(&predicate) {
            debug!(property = %predicate, "undeclared property used with literals, treating as data property");
            ontology.data_properties.insert(OwlIri::new(predicate));
        }
    }
    for predicate in implicit_object {
        ontology.object_properties.insert(OwlIri::new(predicate));
    }
}

/// Second pass: translate triples into axioms
struct AxiomMapper<'a> {
    store: &'a TripleStore,
    object_properties: BTreeSet<OwlIri>,
    data_properties: BTreeSet<OwlIri>,
    annotation_properties: BTreeSet<OwlIri>,
}

impl<'a> AxiomMapper<'a> {
    fn translate(&self, triple: &Triple) -> Result<Vec<Axiom>, OwlError> {
        let subject = &triple.subject;
        let object = &triple.object;

        let axiom = match triple.predicate.as_str() {
            rdf::TYPE => return self.translate_type(subject, object),
            rdfs::SUB_CLASS_OF => Axiom::SubClassOf(self.class(subject, 0)?, self.class(object, 0)?),
            owl::EQUIVALENT_CLASS => Axiom::EquivalentClasses(vec![self.class(subject, 0)?, self.class(object, 0)?]),
            owl::DISJOINT_WITH => Axiom::DisjointClasses(vec![self.class(subject, 0)?, self.class(object, 0)?]),
            predicate @ (owl::INTERSECTION_OF | owl::UNION_OF | owl::COMPLEMENT_OF | owl::ONE_OF) => {
                // Named class definitions; anonymous ones are parsed from their use site
                let Some(iri) = subject.as_iri() else {
                    return Ok(Vec::new());
                };
                Axiom::EquivalentClasses(vec![
                    ClassExpression::from_iri(iri),
                    self.boolean_expression(predicate, object, 0)?,
                ])
            }
            rdfs::SUB_PROPERTY_OF => Axiom::SubPropertyOf(self.property(subject)?, self.property(object)?),
            owl::EQUIVALENT_PROPERTY => Axiom::EquivalentProperties(vec![self.property(subject)?, self.property(object)?]),
            owl::INVERSE_OF => match (subject.as_iri(), object.as_iri()) {
                (Some(p), Some(q)) => Axiom::InverseProperties(OwlIri::new(p), OwlIri::new(q)),
                _ => return Ok(Vec::new()),
            },
            rdfs::DOMAIN => Axiom::PropertyDomain(self.property(subject)?, self.class(object, 0)?),
            rdfs::RANGE => {
                let property = self.property(subject)?;
                if property.is_data() || self.is_data_range(object) {
                    debug!(property = %subject, "data ranges are not modelled");
                    return Ok(Vec::new());
                }
                Axiom::PropertyRange(property, self.class(object, 0)?)
            }
            owl::SAME_AS => Axiom::SameIndividual(vec![self.individual(subject)?, self.individual(object)?]),
            owl::DIFFERENT_FROM => Axiom::DifferentIndividuals(vec![self.individual(subject)?, self.individual(object)?]),
            predicate => return self.translate_assertion(subject, predicate, object),
        };

        Ok(vec![axiom])
    }

    fn translate_type(&self, subject: &Term, object: &Term) -> Result<Vec<Axiom>, OwlError> {
        let Some(kind) = object.as_iri() else {
            // rdf:type with an anonymous class expression
            if subject.is_blank() {
                return Ok(Vec::new());
            }
            return Ok(vec![Axiom::ClassAssertion(self.class(object, 0)?, self.individual(subject)?)]);
        };

        let characteristic = match kind {
            owl::FUNCTIONAL_PROPERTY => Some(PropertyCharacteristic::Functional),
            owl::INVERSE_FUNCTIONAL_PROPERTY => Some(PropertyCharacteristic::InverseFunctional),
            owl::TRANSITIVE_PROPERTY => Some(PropertyCharacteristic::Transitive),
            owl::SYMMETRIC_PROPERTY => Some(PropertyCharacteristic::Symmetric),
            owl::ASYMMETRIC_PROPERTY => Some(PropertyCharacteristic::Asymmetric),
            owl::REFLEXIVE_PROPERTY => Some(PropertyCharacteristic::Reflexive),
            owl::IRREFLEXIVE_PROPERTY => Some(PropertyCharacteristic::Irreflexive),
            _ => None,
        };
        if let Some(characteristic) = characteristic {
            return Ok(vec![Axiom::PropertyCharacteristic(self.property(subject)?, characteristic)]);
        }

        let axiom = match kind {
            owl::ALL_DISJOINT_CLASSES => {
                let members = self.required_object(subject, owl::MEMBERS)?;
                let classes = self
                    .list(members)?
                    .iter()
                    .map(|member| self.class(member, 0))
                    .collect::<Result<Vec<_>, _>>()?;
                Axiom::DisjointClasses(classes)
            }
            owl::ALL_DIFFERENT => {
                let members = self
                    .store
                    .object(subject, owl::DISTINCT_MEMBERS)
                    .or_else(|| self.store.object(subject, owl::MEMBERS))
                    .ok_or_else(|| OwlError::LoaderError(format!("{} has no owl:distinctMembers", subject)))?;
                let individuals = self
                    .list(members)?
                    .iter()
                    .map(|member| self.individual(member))
                    .collect::<Result<Vec<_>, _>>()?;
                Axiom::DifferentIndividuals(individuals)
            }
            owl::NEGATIVE_PROPERTY_ASSERTION => self.negative_assertion(subject)?,
            owl::THING if !subject.is_blank() => Axiom::ClassAssertion(ClassExpression::Thing, self.individual(subject)?),
            // Declarations were handled in the first pass
            iri if vocab::is_builtin(iri) => return Ok(Vec::new()),
            _ if subject.is_blank() => {
                debug!(subject = %subject, "skipping type of anonymous individual");
                return Ok(Vec::new());
            }
            iri => Axiom::ClassAssertion(ClassExpression::from_iri(iri), self.individual(subject)?),
        };

        Ok(vec![axiom])
    }

    fn translate_assertion(&self, subject: &Term, predicate: &str, object: &Term) -> Result<Vec<Axiom>, OwlError> {
        let property = OwlIri::new(predicate);
        let Some(subject_iri) = subject.as_iri() else {
            return Ok(Vec::new());
        };

        if self.annotation_properties.contains(&property) || BUILTIN_ANNOTATION_PROPERTIES.contains(&predicate) {
            let value = match object {
                Term::Iri(iri) => Value::Iri(OwlIri::new(iri.clone())),
                Term::Literal(literal) => Value::Literal(literal.clone()),
                Term::BlankNode(_) => return Ok(Vec::new()),
            };
            return Ok(vec![Axiom::AnnotationAssertion(property, OwlIri::new(subject_iri), value)]);
        }

        if vocab::is_builtin(predicate) {
            return Ok(Vec::new());
        }

        let source = Individual::new(subject_iri);
        let axiom = match object {
            Term::Literal(literal) if self.data_properties.contains(&property) => {
                Axiom::DataPropertyAssertion(property, source, literal.clone())
            }
            Term::Iri(target) if self.object_properties.contains(&property) => {
                Axiom::ObjectPropertyAssertion(property, source, Individual::new(target.clone()))
            }
            Term::BlankNode(_) => {
                return Err(OwlError::UnsupportedFeature("anonymous individual as property value".to_string()))
            }
            _ => {
                return Err(OwlError::UnsupportedFeature(format!(
                    "value does not match the kind of property {}",
                    predicate
                )))
            }
        };

        Ok(vec![axiom])
    }

    fn negative_assertion(&self, node: &Term) -> Result<Axiom, OwlError> {
        let source = self.individual(self.required_object(node, owl::SOURCE_INDIVIDUAL)?)?;
        let property = self.required_object(node, owl::ASSERTION_PROPERTY)?;
        let Some(property) = property.as_iri() else {
            return Err(OwlError::UnsupportedFeature("negative assertion on a property expression".to_string()));
        };

        if let Some(target) = self.store.object(node, owl::TARGET_INDIVIDUAL) {
            return Ok(Axiom::NegativeObjectPropertyAssertion(
                OwlIri::new(property),
                source,
                self.individual(target)?,
            ));
        }

        match self.required_object(node, owl::TARGET_VALUE)? {
            Term::Literal(literal) => Ok(Axiom::NegativeDataPropertyAssertion(
                OwlIri::new(property),
                source,
                literal.clone(),
            )),
            other => Err(OwlError::LoaderError(format!("owl:targetValue must be a literal, found {}", other))),
        }
    }

    fn class(&self, term: &Term, depth: usize) -> Result<ClassExpression, OwlError> {
        match term {
            Term::Iri(iri) => Ok(ClassExpression::from_iri(iri)),
            Term::Literal(_) => Err(OwlError::LoaderError(format!("literal {} used as a class", term))),
            Term::BlankNode(_) => {
                if depth > MAX_EXPRESSION_DEPTH {
                    return Err(OwlError::LoaderError(format!("class expression {} is nested too deeply", term)));
                }

                for predicate in [owl::INTERSECTION_OF, owl::UNION_OF, owl::COMPLEMENT_OF, owl::ONE_OF] {
                    if let Some(object) = self.store.object(term, predicate) {
                        return self.boolean_expression(predicate, object, depth + 1);
                    }
                }

                if let Some(on_property) = self.store.object(term, owl::ON_PROPERTY) {
                    return self.restriction(term, on_property, depth + 1);
                }

                Err(OwlError::UnsupportedFeature(format!("unrecognised class expression {}", term)))
            }
        }
    }

    fn boolean_expression(&self, predicate: &str, object: &Term, depth: usize) -> Result<ClassExpression, OwlError> {
        match predicate {
            owl::COMPLEMENT_OF => Ok(ClassExpression::ComplementOf(Box::new(self.class(object, depth)?))),
            owl::ONE_OF => {
                let individuals = self
                    .list(object)?
                    .iter()
                    .map(|member| self.individual(member))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ClassExpression::OneOf(individuals))
            }
            _ => {
                let operands = self
                    .list(object)?
                    .iter()
                    .map(|member| self.class(member, depth))
                    .collect::<Result<Vec<_>, _>>()?;
                if predicate == owl::INTERSECTION_OF {
                    Ok(ClassExpression::IntersectionOf(operands))
                } else {
                    Ok(ClassExpression::UnionOf(operands))
                }
            }
        }
    }

    fn restriction(&self, node: &Term, on_property: &Term, depth: usize) -> Result<ClassExpression, OwlError> {
        let property = self.property(on_property)?;
        let is_data = property.is_data();

        if let Some(filler) = self.store.object(node, owl::SOME_VALUES_FROM) {
            return Ok(ClassExpression::SomeValuesFrom {
                class: Box::new(self.filler(filler, is_data, depth)?),
                property,
            });
        }
        if let Some(filler) = self.store.object(node, owl::ALL_VALUES_FROM) {
            return Ok(ClassExpression::AllValuesFrom {
                class: Box::new(self.filler(filler, is_data, depth)?),
                property,
            });
        }
        if let Some(value) = self.store.object(node, owl::HAS_VALUE) {
            let value = match value {
                Term::Iri(iri) => Value::Iri(OwlIri::new(iri.clone())),
                Term::Literal(literal) => Value::Literal(literal.clone()),
                Term::BlankNode(_) => {
                    return Err(OwlError::UnsupportedFeature("owl:hasValue with an anonymous individual".to_string()))
                }
            };
            return Ok(ClassExpression::HasValue { property, value });
        }

        let qualifier = match self.store.object(node, owl::ON_CLASS) {
            Some(class) if !is_data => Some(Box::new(self.class(class, depth)?)),
            _ => None,
        };

        let cardinalities = [
            (owl::MIN_CARDINALITY, owl::MIN_QUALIFIED_CARDINALITY),
            (owl::MAX_CARDINALITY, owl::MAX_QUALIFIED_CARDINALITY),
            (owl::CARDINALITY, owl::QUALIFIED_CARDINALITY),
        ];
        for (plain, qualified) in cardinalities {
            let (count, class) = match (self.store.object(node, plain), self.store.object(node, qualified)) {
                (Some(count), _) => (count, None),
                (None, Some(count)) => (count, qualifier.clone()),
                (None, None) => continue,
            };
            let cardinality = parse_cardinality(count)?;

            return Ok(match plain {
                owl::MIN_CARDINALITY => ClassExpression::MinCardinality { cardinality, property, class },
                owl::MAX_CARDINALITY => ClassExpression::MaxCardinality { cardinality, property, class },
                _ => ClassExpression::ExactCardinality { cardinality, property, class },
            });
        }

        Err(OwlError::UnsupportedFeature(format!("restriction {} has no supported filler", node)))
    }

    /// Data ranges are folded to owl:Thing
    fn filler(&self, term: &Term, is_data: bool, depth: usize) -> Result<ClassExpression, OwlError> {
        if is_data || self.is_data_range(term) {
            Ok(ClassExpression::Thing)
        } else {
            self.class(term, depth)
        }
    }

    fn is_data_range(&self, term: &Term) -> bool {
        match term {
            Term::Iri(iri) => {
                iri.starts_with(XSD_NS)
                    || iri == rdfs::LITERAL
                    || iri == rdf::PLAIN_LITERAL
                    || iri == rdf::LANG_STRING
            }
            Term::BlankNode(_) => self.store.has_type(term, rdfs::DATATYPE),
            Term::Literal(_) => false,
        }
    }

    fn property(&self, term: &Term) -> Result<PropertyExpression, OwlError> {
        match term {
            Term::Iri(iri) => {
                let iri = OwlIri::new(iri.clone());
                if self.data_properties.contains(&iri) {
                    Ok(PropertyExpression::DataProperty(iri))
                } else {
                    Ok(PropertyExpression::ObjectProperty(iri))
                }
            }
            Term::BlankNode(_) => match self.store.object(term, owl::INVERSE_OF) {
                Some(inner) => Ok(PropertyExpression::InverseOf(Box::new(self.property(inner)?))),
                None => Err(OwlError::UnsupportedFeature(format!("unrecognised property expression {}", term))),
            },
            Term::Literal(_) => Err(OwlError::LoaderError(format!("literal {} used as a property", term))),
        }
    }

    fn individual(&self, term: &Term) -> Result<Individual, OwlError> {
        match term {
            Term::Iri(iri) => Ok(Individual::new(iri.clone())),
            Term::BlankNode(_) => Err(OwlError::UnsupportedFeature("anonymous individual".to_string())),
            Term::Literal(_) => Err(OwlError::LoaderError(format!("literal {} used as an individual", term))),
        }
    }

    fn list(&self, head: &Term) -> Result<Vec<Term>, OwlError> {
        self.store
            .rdf_list(head)
            .ok_or_else(|| OwlError::LoaderError(format!("malformed RDF list at {}", head)))
    }

    fn required_object(&self, subject: &Term, predicate: &str) -> Result<&'a Term, OwlError> {
        self.store
            .object(subject, predicate)
            .ok_or_else(|| OwlError::LoaderError(format!("{} is missing <{}>", subject, predicate)))
    }
}

fn parse_cardinality(term: &Term) -> Result<u32, OwlError> {
    term.as_literal()
        .and_then(|literal| literal.lexical.trim().parse::<u32>().ok())
        .ok_or_else(|| OwlError::LoaderError(format!("invalid cardinality {}", term)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlconsult_rdf::{parse_bytes, RdfFormat};

    const UNIVERSITY: &str = r#"
        @prefix ex: <http://example.org/> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

        <http://example.org/univ> a owl:Ontology .
        ex:Person a owl:Class ; rdfs:label "Person"@en .
        ex:Student a owl:Class ; rdfs:subClassOf ex:Person .
        ex:Course a owl:Class ; owl:disjointWith ex:Person .
        ex:takes a owl:ObjectProperty ; rdfs:domain ex:Student ; rdfs:range ex:Course .
        ex:age a owl:DatatypeProperty, owl:FunctionalProperty ; rdfs:range xsd:integer .
        ex:Learner owl:equivalentClass [
            a owl:Restriction ; owl:onProperty ex:takes ; owl:someValuesFrom ex:Course
        ] .
        ex:Adult owl:intersectionOf ( ex:Person [ a owl:Restriction ; owl:onProperty ex:age ; owl:minCardinality "1"^^xsd:nonNegativeInteger ] ) .
        ex:alice a ex:Student ; ex:takes ex:logic ; ex:age 21 ; ex:friend ex:bob .
        ex:alice owl:differentFrom ex:bob .
        [] a owl:AllDisjointClasses ; owl:members ( ex:Person ex:Course ex:Room ) .
    "#;

    fn load(ttl: &str) -> Ontology {
        let store = parse_bytes(ttl.as_bytes(), RdfFormat::Turtle).unwrap();
        DefaultOntologyLoader.load_from_store(&store).unwrap()
    }

    fn iri(local: &str) -> OwlIri {
        OwlIri::new(format!("http://example.org/{}", local))
    }

    #[test]
    fn test_declarations_and_signature() {
        let ontology = load(UNIVERSITY);

        assert_eq!(ontology.iri, Some(OwlIri::new("http://example.org/univ")));
        for class in ["Person", "Student", "Course", "Learner", "Adult", "Room"] {
            assert!(ontology.classes.contains(&iri(class)), "missing class {}", class);
        }
        assert!(ontology.object_properties.contains(&iri("takes")));
        assert!(ontology.data_properties.contains(&iri("age")));
        // undeclared, used with an IRI value
        assert!(ontology.object_properties.contains(&iri("friend")));
        assert!(ontology.individuals.contains(&Individual(iri("logic"))));
    }

    #[test]
    fn test_class_axioms() {
        let ontology = load(UNIVERSITY);

        assert!(ontology.axioms.contains(&Axiom::SubClassOf(
            ClassExpression::Named(iri("Student")),
            ClassExpression::Named(iri("Person")),
        )));
        assert!(ontology.axioms.contains(&Axiom::EquivalentClasses(vec![
            ClassExpression::Named(iri("Learner")),
            ClassExpression::SomeValuesFrom {
                property: PropertyExpression::ObjectProperty(iri("takes")),
                class: Box::new(ClassExpression::Named(iri("Course"))),
            },
        ])));
        assert!(ontology.axioms.contains(&Axiom::DisjointClasses(vec![
            ClassExpression::Named(iri("Person")),
            ClassExpression::Named(iri("Course")),
            ClassExpression::Named(iri("Room")),
        ])));
    }

    #[test]
    fn test_named_intersection_becomes_equivalence() {
        let ontology = load(UNIVERSITY);

        let definition = ontology.axioms.iter().find_map(|axiom| match axiom {
            Axiom::EquivalentClasses(classes) if classes[0] == ClassExpression::Named(iri("Adult")) => {
                Some(classes[1].clone())
            }
            _ => None,
        });
        assert_eq!(
            definition,
            Some(ClassExpression::IntersectionOf(vec![
                ClassExpression::Named(iri("Person")),
                ClassExpression::MinCardinality {
                    cardinality: 1,
                    property: PropertyExpression::DataProperty(iri("age")),
                    class: None,
                },
            ]))
        );
    }

    #[test]
    fn test_property_axioms() {
        let ontology = load(UNIVERSITY);

        assert!(ontology.axioms.contains(&Axiom::PropertyDomain(
            PropertyExpression::ObjectProperty(iri("takes")),
            ClassExpression::Named(iri("Student")),
        )));
        assert!(ontology.axioms.contains(&Axiom::PropertyCharacteristic(
            PropertyExpression::DataProperty(iri("age")),
            PropertyCharacteristic::Functional,
        )));
        // xsd range is not a class
        assert!(!ontology.classes.contains(&OwlIri::new("http://www.w3.org/2001/XMLSchema#integer")));
    }

    #[test]
    fn test_individual_axioms() {
        let ontology = load(UNIVERSITY);
        let alice = Individual(iri("alice"));

        assert!(ontology
            .axioms
            .contains(&Axiom::ClassAssertion(ClassExpression::Named(iri("Student")), alice.clone())));
        assert!(ontology.axioms.contains(&Axiom::ObjectPropertyAssertion(
            iri("takes"),
            alice.clone(),
            Individual(iri("logic")),
        )));
        assert!(ontology.axioms.iter().any(|axiom| matches!(
            axiom,
            Axiom::DataPropertyAssertion(p, i, literal) if p == &iri("age") && i == &alice && literal.lexical == "21"
        )));
        assert!(ontology
            .axioms
            .contains(&Axiom::DifferentIndividuals(vec![alice, Individual(iri("bob"))])));
    }

    #[test]
    fn test_annotations() {
        let ontology = load(UNIVERSITY);
        let label = OwlIri::new(rdfs::LABEL);
        let values = &ontology.annotations[&iri("Person")][&label];
        assert!(values.contains(&Value::Literal(dlconsult_rdf::Literal::lang("Person", "en"))));
    }

    #[test]
    fn test_negative_property_assertion() {
        let ontology = load(
            r#"
            @prefix ex: <http://example.org/> .
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            ex:knows a owl:ObjectProperty .
            [] a owl:NegativePropertyAssertion ;
               owl:sourceIndividual ex:alice ;
               owl:assertionProperty ex:knows ;
               owl:targetIndividual ex:carol .
            "#,
        );

        assert!(ontology.axioms.contains(&Axiom::NegativeObjectPropertyAssertion(
            iri("knows"),
            Individual(iri("alice")),
            Individual(iri("carol")),
        )));
    }

    #[test]
    fn test_invalid_cardinality_is_an_error() {
        let store = parse_bytes(
            br#"
            @prefix ex: <http://example.org/> .
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            ex:A rdfs:subClassOf [ a owl:Restriction ; owl:onProperty ex:p ; owl:maxCardinality "many" ] .
            "#,
            RdfFormat::Turtle,
        )
        .unwrap();

        let result = DefaultOntologyLoader.load_from_store(&store);
        assert!(matches!(result, Err(OwlError::LoaderError(_))));
    }

    #[test]
    fn test_unsupported_constructs_are_skipped() {
        let ontology = load(
            r#"
            @prefix ex: <http://example.org/> .
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            ex:A rdfs:subClassOf [ ex:unknown ex:thing ] .
            ex:A rdfs:subClassOf ex:B .
            "#,
        );

        assert_eq!(
            ontology
                .axioms
                .iter()
                .filter(|axiom| matches!(axiom, Axiom::SubClassOf(..)))
                .count(),
            1
        );
    }
}
