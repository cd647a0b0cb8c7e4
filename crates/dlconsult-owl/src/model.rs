//! OWL データモデル

use dlconsult_rdf::vocab::owl;
use dlconsult_rdf::Literal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// OWL IRI wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OwlIri(pub String);

impl OwlIri {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn thing() -> Self {
        Self(owl::THING.to_string())
    }

    pub fn nothing() -> Self {
        Self(owl::NOTHING.to_string())
    }
}

impl std::fmt::Display for OwlIri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named OWL individual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Individual(pub OwlIri);

impl Individual {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(OwlIri::new(iri))
    }

    pub fn iri(&self) -> &OwlIri {
        &self.0
    }
}

/// Individual or literal value (hasValue fillers, annotation values)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Value {
    Iri(OwlIri),
    Literal(Literal),
}

/// OWL Class Expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum ClassExpression {
    /// Named class
    Named(OwlIri),

    /// owl:Thing (⊤)
    Thing,

    /// owl:Nothing (⊥)
    Nothing,

    /// C1 ⊓ C2 ⊓ ... ⊓ Cn
    IntersectionOf(Vec<ClassExpression>),

    /// C1 ⊔ C2 ⊔ ... ⊔ Cn
    UnionOf(Vec<ClassExpression>),

    /// ¬C
    ComplementOf(Box<ClassExpression>),

    /// {i1, i2, ..., in}
    OneOf(Vec<Individual>),

    /// ∃R.C
    SomeValuesFrom {
        property: PropertyExpression,
        class: Box<ClassExpression>,
    },

    /// ∀R.C
    AllValuesFrom {
        property: PropertyExpression,
        class: Box<ClassExpression>,
    },

    /// ∃R.{v}
    HasValue {
        property: PropertyExpression,
        value: Value,
    },

    /// ≥n R.C
    MinCardinality {
        cardinality: u32,
        property: PropertyExpression,
        class: Option<Box<ClassExpression>>, // None means owl:Thing
    },

    /// ≤n R.C
    MaxCardinality {
        cardinality: u32,
        property: PropertyExpression,
        class: Option<Box<ClassExpression>>,
    },

    /// =n R.C
    ExactCardinality {
        cardinality: u32,
        property: PropertyExpression,
        class: Option<Box<ClassExpression>>,
    },
}

impl ClassExpression {
    /// Map a class IRI, folding the built-in top and bottom classes
    pub fn from_iri(iri: &str) -> Self {
        match iri {
            owl::THING => ClassExpression::Thing,
            owl::NOTHING => ClassExpression::Nothing,
            _ => ClassExpression::Named(OwlIri::new(iri)),
        }
    }

    /// IRI of a named (or built-in) class
    pub fn as_named(&self) -> Option<OwlIri> {
        match self {
            ClassExpression::Named(iri) => Some(iri.clone()),
            ClassExpression::Thing => Some(OwlIri::thing()),
            ClassExpression::Nothing => Some(OwlIri::nothing()),
            _ => None,
        }
    }

    pub fn is_named(&self) -> bool {
        self.as_named().is_some()
    }
}

/// OWL Property Expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum PropertyExpression {
    ObjectProperty(OwlIri),
    DataProperty(OwlIri),
    /// R⁻
    InverseOf(Box<PropertyExpression>),
}

impl PropertyExpression {
    /// Named property underneath any number of inverses, and whether the
    /// expression is inverted an odd number of times
    pub fn named(&self) -> (&OwlIri, bool) {
        match self {
            PropertyExpression::ObjectProperty(iri) | PropertyExpression::DataProperty(iri) => (iri, false),
            PropertyExpression::InverseOf(inner) => {
                let (iri, inverted) = inner.named();
                (iri, !inverted)
            }
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, PropertyExpression::DataProperty(_))
    }
}

/// Property characteristics that can be asserted and queried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum PropertyCharacteristic {
    Functional,
    InverseFunctional,
    Transitive,
    Symmetric,
    Asymmetric,
    Reflexive,
    Irreflexive,
}

/// OWL Axiom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axiom {
    SubClassOf(ClassExpression, ClassExpression),
    EquivalentClasses(Vec<ClassExpression>),
    DisjointClasses(Vec<ClassExpression>),

    SubPropertyOf(PropertyExpression, PropertyExpression),
    EquivalentProperties(Vec<PropertyExpression>),
    InverseProperties(OwlIri, OwlIri),
    PropertyDomain(PropertyExpression, ClassExpression),
    PropertyRange(PropertyExpression, ClassExpression),
    PropertyCharacteristic(PropertyExpression, PropertyCharacteristic),

    SameIndividual(Vec<Individual>),
    DifferentIndividuals(Vec<Individual>),
    ClassAssertion(ClassExpression, Individual),
    ObjectPropertyAssertion(OwlIri, Individual, Individual),
    NegativeObjectPropertyAssertion(OwlIri, Individual, Individual),
    DataPropertyAssertion(OwlIri, Individual, Literal),
    NegativeDataPropertyAssertion(OwlIri, Individual, Literal),

    /// AnnotationAssertion(property subject value)
    AnnotationAssertion(OwlIri, OwlIri, Value),
}

/// OWL Ontology
///
/// Entity sets are ordered so that every enumeration over the ontology is
/// deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ontology {
    pub iri: Option<OwlIri>,
    pub axioms: Vec<Axiom>,
    pub classes: BTreeSet<OwlIri>,
    pub object_properties: BTreeSet<OwlIri>,
    pub data_properties: BTreeSet<OwlIri>,
    pub annotation_properties: BTreeSet<OwlIri>,
    pub individuals: BTreeSet<Individual>,
    /// subject → property → values
    pub annotations: BTreeMap<OwlIri, BTreeMap<OwlIri, BTreeSet<Value>>>,
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iri(iri: OwlIri) -> Self {
        Self {
            iri: Some(iri),
            ..Self::default()
        }
    }

    pub fn declare_class(&mut self, iri: OwlIri) {
        if iri.as_str() != owl::THING && iri.as_str() != owl::NOTHING {
            self.classes.insert(iri);
        }
    }

    pub fn add_axiom(&mut self, axiom: Axiom) {
        // Extract the signature from the axiom
        match &axiom {
            Axiom::SubClassOf(c1, c2) => {
                self.collect_class_expression(c1);
                self.collect_class_expression(c2);
            }
            Axiom::EquivalentClasses(expressions) | Axiom::DisjointClasses(expressions) => {
                for expr in expressions {
                    self.collect_class_expression(expr);
                }
            }
            Axiom::SubPropertyOf(p1, p2) => {
                self.collect_property_expression(p1);
                self.collect_property_expression(p2);
            }
            Axiom::EquivalentProperties(expressions) => {
                for expr in expressions {
                    self.collect_property_expression(expr);
                }
            }
            Axiom::InverseProperties(p, q) => {
                self.object_properties.insert(p.clone());
                self.object_properties.insert(q.clone());
            }
            Axiom::PropertyDomain(pe, ce) | Axiom::PropertyRange(pe, ce) => {
                self.collect_property_expression(pe);
                self.collect_class_expression(ce);
            }
            Axiom::PropertyCharacteristic(pe, _) => {
                self.collect_property_expression(pe);
            }
            Axiom::SameIndividual(individuals) | Axiom::DifferentIndividuals(individuals) => {
                self.individuals.extend(individuals.iter().cloned());
            }
            Axiom::ClassAssertion(ce, i) => {
                self.collect_class_expression(ce);
                self.individuals.insert(i.clone());
            }
            Axiom::ObjectPropertyAssertion(p, i1, i2) | Axiom::NegativeObjectPropertyAssertion(p, i1, i2) => {
                self.object_properties.insert(p.clone());
                self.individuals.insert(i1.clone());
                self.individuals.insert(i2.clone());
            }
            Axiom::DataPropertyAssertion(p, i, _) | Axiom::NegativeDataPropertyAssertion(p, i, _) => {
                self.data_properties.insert(p.clone());
                self.individuals.insert(i.clone());
            }
            Axiom::AnnotationAssertion(property, subject, value) => {
                self.annotation_properties.insert(property.clone());
                self.annotations
                    .entry(subject.clone())
                    .or_default()
                    .entry(property.clone())
                    .or_default()
                    .insert(value.clone());
            }
        }

        self.axioms.push(axiom);
    }

    fn collect_class_expression(&mut self, expr: &ClassExpression) {
        match expr {
            ClassExpression::Named(iri) => self.declare_class(iri.clone()),
            ClassExpression::Thing | ClassExpression::Nothing => {}
            ClassExpression::IntersectionOf(expressions) | ClassExpression::UnionOf(expressions) => {
                for expr in expressions {
                    self.collect_class_expression(expr);
                }
            }
            ClassExpression::ComplementOf(expr) => self.collect_class_expression(expr),
            ClassExpression::OneOf(individuals) => {
                self.individuals.extend(individuals.iter().cloned());
            }
            ClassExpression::SomeValuesFrom { property, class } | ClassExpression::AllValuesFrom { property, class } => {
                self.collect_property_expression(property);
                self.collect_class_expression(class);
            }
            ClassExpression::HasValue { property, value } => {
                self.collect_property_expression(property);
                if let (Value::Iri(iri), false) = (value, property.is_data()) {
                    self.individuals.insert(Individual(iri.clone()));
                }
            }
            ClassExpression::MinCardinality { property, class, .. }
            | ClassExpression::MaxCardinality { property, class, .. }
            | ClassExpression::ExactCardinality { property, class, .. } => {
                self.collect_property_expression(property);
                if let Some(class) = class {
                    self.collect_class_expression(class);
                }
            }
        }
    }

    fn collect_property_expression(&mut self, expr: &PropertyExpression) {
        match expr {
            PropertyExpression::ObjectProperty(iri) => {
                self.object_properties.insert(iri.clone());
            }
            PropertyExpression::DataProperty(iri) => {
                self.data_properties.insert(iri.clone());
            }
            PropertyExpression::InverseOf(inner) => self.collect_property_expression(inner),
        }
    }
}
