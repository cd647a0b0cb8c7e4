//! 推論バックエンド: 事前計算と問い合わせプリミティブ

use crate::hierarchy::{Hierarchy, Taxonomy};
use crate::model::{Individual, Ontology, OwlIri, PropertyCharacteristic, Value};
use crate::realization::Realization;
use crate::OwlError;
use dlconsult_rdf::Literal;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Categories of implied facts a reasoner can derive ahead of query time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum InferenceType {
    ClassHierarchy,
    ObjectPropertyHierarchy,
    DataPropertyHierarchy,
    ClassAssertions,
    ObjectPropertyAssertions,
    DataPropertyAssertions,
    DisjointClasses,
    SameIndividual,
    DifferentIndividuals,
}

impl std::fmt::Display for InferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InferenceType::ClassHierarchy => "CLASS_HIERARCHY",
            InferenceType::ObjectPropertyHierarchy => "OBJECT_PROPERTY_HIERARCHY",
            InferenceType::DataPropertyHierarchy => "DATA_PROPERTY_HIERARCHY",
            InferenceType::ClassAssertions => "CLASS_ASSERTIONS",
            InferenceType::ObjectPropertyAssertions => "OBJECT_PROPERTY_ASSERTIONS",
            InferenceType::DataPropertyAssertions => "DATA_PROPERTY_ASSERTIONS",
            InferenceType::DisjointClasses => "DISJOINT_CLASSES",
            InferenceType::SameIndividual => "SAME_INDIVIDUAL",
            InferenceType::DifferentIndividuals => "DIFFERENT_INDIVIDUALS",
        };
        write!(f, "{}", name)
    }
}

/// Reasoning backend consulted by the query evaluator
///
/// Every enumeration is returned in sorted IRI order. Class and property
/// queries are reflexive unless `direct` is requested.
pub trait OwlReasoner {
    /// Derive the given categories eagerly. Fails without side effects when
    /// any category is not supported.
    fn precompute_inferences(&mut self, inferences: &[InferenceType]) -> Result<(), OwlError>;

    fn is_precomputed(&self, inference: InferenceType) -> bool;

    fn is_consistent(&self) -> Result<bool, OwlError>;

    /// Fails with `OwlError::ConsistencyError` when the ontology has no model
    fn ensure_consistent(&self) -> Result<(), OwlError> {
        if self.is_consistent()? {
            Ok(())
        } else {
            Err(OwlError::ConsistencyError("ontology is inconsistent".to_string()))
        }
    }

    // Signature
    fn classes(&self) -> Vec<OwlIri>;
    fn object_properties(&self) -> Vec<OwlIri>;
    fn data_properties(&self) -> Vec<OwlIri>;
    fn annotation_properties(&self) -> Vec<OwlIri>;
    fn individuals(&self) -> Vec<Individual>;

    // Classes
    fn superclasses(&self, class: &OwlIri, direct: bool) -> Vec<OwlIri>;
    fn subclasses(&self, class: &OwlIri, direct: bool) -> Vec<OwlIri>;
    fn equivalent_classes(&self, class: &OwlIri) -> Vec<OwlIri>;
    fn disjoint_classes(&self, class: &OwlIri) -> Vec<OwlIri>;
    fn complement_classes(&self, class: &OwlIri) -> Vec<OwlIri>;

    // Individuals
    fn types(&self, individual: &Individual, direct: bool) -> Vec<OwlIri>;
    fn instances(&self, class: &OwlIri, direct: bool) -> Vec<Individual>;
    fn object_property_values(&self, individual: &Individual, property: &OwlIri) -> Vec<Individual>;
    fn data_property_values(&self, individual: &Individual, property: &OwlIri) -> Vec<Literal>;
    fn same_individuals(&self, individual: &Individual) -> Vec<Individual>;
    fn different_individuals(&self, individual: &Individual) -> Vec<Individual>;

    // Properties
    fn superproperties(&self, property: &OwlIri, direct: bool) -> Vec<OwlIri>;
    fn subproperties(&self, property: &OwlIri, direct: bool) -> Vec<OwlIri>;
    fn equivalent_properties(&self, property: &OwlIri) -> Vec<OwlIri>;
    fn inverse_properties(&self, property: &OwlIri) -> Vec<OwlIri>;
    fn has_characteristic(&self, property: &OwlIri, characteristic: PropertyCharacteristic) -> bool;

    // Annotations
    fn annotation_subjects(&self) -> Vec<OwlIri>;
    /// Annotation values on `subject`, optionally restricted to one property
    fn annotations(&self, subject: &OwlIri, property: Option<&OwlIri>) -> Vec<(OwlIri, Value)>;
}

/// Saturation-based reasoner over a loaded ontology
///
/// The taxonomy and the realization are built on first use, so precomputation
/// only moves work earlier.
pub struct OwlDlReasoner {
    ontology: Ontology,
    taxonomy: OnceCell<Taxonomy>,
    realization: OnceCell<Realization>,
    precomputed: BTreeSet<InferenceType>,
}

impl OwlDlReasoner {
    pub fn new(ontology: Ontology) -> Self {
        Self {
            ontology,
            taxonomy: OnceCell::new(),
            realization: OnceCell::new(),
            precomputed: BTreeSet::new(),
        }
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// Description of the first contradiction found, if any
    pub fn inconsistency(&self) -> Option<&str> {
        self.realization().clash()
    }

    fn taxonomy(&self) -> &Taxonomy {
        self.taxonomy.get_or_init(|| Taxonomy::build(&self.ontology))
    }

    fn realization(&self) -> &Realization {
        self.realization
            .get_or_init(|| Realization::build(&self.ontology, self.taxonomy()))
    }

    fn is_supported(inference: InferenceType) -> bool {
        !matches!(
            inference,
            InferenceType::DataPropertyAssertions | InferenceType::DifferentIndividuals
        )
    }

    fn property_query(&self, property: &OwlIri, direct: bool, up: bool) -> Vec<OwlIri> {
        let hierarchy: &Hierarchy = self.taxonomy().property_hierarchy(property);
        let result = match (up, direct) {
            (true, false) => hierarchy.supers(property),
            (true, true) => hierarchy.direct_supers(property),
            (false, false) => hierarchy.subs(property),
            (false, true) => hierarchy.direct_subs(property),
        };
        result.into_iter().collect()
    }
}

impl OwlReasoner for OwlDlReasoner {
    fn precompute_inferences(&mut self, inferences: &[InferenceType]) -> Result<(), OwlError> {
        if let Some(unsupported) = inferences.iter().find(|i| !Self::is_supported(**i)) {
            return Err(OwlError::UnsupportedFeature(format!(
                "precomputation of {} is not supported",
                unsupported
            )));
        }

        for inference in inferences {
            match inference {
                InferenceType::ClassHierarchy
                | InferenceType::ObjectPropertyHierarchy
                | InferenceType::DataPropertyHierarchy
                | InferenceType::DisjointClasses => {
                    self.taxonomy();
                }
                _ => {
                    self.realization();
                }
            }
            self.precomputed.insert(*inference);
            debug!(inference = %inference, "inference precomputed");
        }

        info!(
            categories = inferences.len(),
            classes = self.ontology.classes.len(),
            individuals = self.ontology.individuals.len(),
            "inferences precomputed"
        );
        Ok(())
    }

    fn is_precomputed(&self, inference: InferenceType) -> bool {
        self.precomputed.contains(&inference)
    }

    fn is_consistent(&self) -> Result<bool, OwlError> {
        Ok(self.inconsistency().is_none())
    }

    fn ensure_consistent(&self) -> Result<(), OwlError> {
        match self.inconsistency() {
            None => Ok(()),
            Some(reason) => Err(OwlError::ConsistencyError(format!("ontology is inconsistent: {}", reason))),
        }
    }

    fn classes(&self) -> Vec<OwlIri> {
        let mut classes: BTreeSet<OwlIri> = self.ontology.classes.clone();
        classes.insert(OwlIri::thing());
        classes.insert(OwlIri::nothing());
        classes.into_iter().collect()
    }

    fn object_properties(&self) -> Vec<OwlIri> {
        self.ontology.object_properties.iter().cloned().collect()
    }

    fn data_properties(&self) -> Vec<OwlIri> {
        self.ontology.data_properties.iter().cloned().collect()
    }

    fn annotation_properties(&self) -> Vec<OwlIri> {
        self.ontology.annotation_properties.iter().cloned().collect()
    }

    fn individuals(&self) -> Vec<Individual> {
        self.realization().individuals().iter().cloned().collect()
    }

    fn superclasses(&self, class: &OwlIri, direct: bool) -> Vec<OwlIri> {
        let classes = &self.taxonomy().classes;
        let result = if direct { classes.direct_supers(class) } else { classes.supers(class) };
        result.into_iter().collect()
    }

    fn subclasses(&self, class: &OwlIri, direct: bool) -> Vec<OwlIri> {
        let classes = &self.taxonomy().classes;
        let result = if direct { classes.direct_subs(class) } else { classes.subs(class) };
        result.into_iter().collect()
    }

    fn equivalent_classes(&self, class: &OwlIri) -> Vec<OwlIri> {
        self.taxonomy().classes.equivalents(class).into_iter().collect()
    }

    fn disjoint_classes(&self, class: &OwlIri) -> Vec<OwlIri> {
        let taxonomy = self.taxonomy();
        taxonomy
            .classes
            .nodes()
            .filter(|other| taxonomy.are_disjoint(class, other))
            .cloned()
            .collect()
    }

    fn complement_classes(&self, class: &OwlIri) -> Vec<OwlIri> {
        let taxonomy = self.taxonomy();
        taxonomy
            .classes
            .nodes()
            .filter(|other| taxonomy.are_complements(class, other))
            .cloned()
            .collect()
    }

    fn types(&self, individual: &Individual, direct: bool) -> Vec<OwlIri> {
        let types = self.realization().types(individual);
        if direct {
            self.taxonomy().classes.minimal(&types).into_iter().collect()
        } else {
            types.into_iter().collect()
        }
    }

    fn instances(&self, class: &OwlIri, direct: bool) -> Vec<Individual> {
        let realization = self.realization();
        realization
            .individuals()
            .iter()
            .filter(|individual| {
                if direct {
                    self.types(individual, true).contains(class)
                } else {
                    realization.has_type(individual, class)
                }
            })
            .cloned()
            .collect()
    }

    fn object_property_values(&self, individual: &Individual, property: &OwlIri) -> Vec<Individual> {
        self.realization()
            .object_values(individual, property)
            .into_iter()
            .collect()
    }

    fn data_property_values(&self, individual: &Individual, property: &OwlIri) -> Vec<Literal> {
        self.realization()
            .data_values(individual, property)
            .into_iter()
            .collect()
    }

    fn same_individuals(&self, individual: &Individual) -> Vec<Individual> {
        self.realization().same_as(individual).into_iter().collect()
    }

    fn different_individuals(&self, individual: &Individual) -> Vec<Individual> {
        let realization = self.realization();
        let taxonomy = self.taxonomy();
        realization
            .individuals()
            .iter()
            .filter(|other| realization.are_different(taxonomy, individual, other))
            .cloned()
            .collect()
    }

    fn superproperties(&self, property: &OwlIri, direct: bool) -> Vec<OwlIri> {
        self.property_query(property, direct, true)
    }

    fn subproperties(&self, property: &OwlIri, direct: bool) -> Vec<OwlIri> {
        self.property_query(property, direct, false)
    }

    fn equivalent_properties(&self, property: &OwlIri) -> Vec<OwlIri> {
        self.taxonomy()
            .property_hierarchy(property)
            .equivalents(property)
            .into_iter()
            .collect()
    }

    fn inverse_properties(&self, property: &OwlIri) -> Vec<OwlIri> {
        self.taxonomy().inverses(property).into_iter().collect()
    }

    fn has_characteristic(&self, property: &OwlIri, characteristic: PropertyCharacteristic) -> bool {
        if self.ontology.data_properties.contains(property) {
            // only functionality applies to data properties
            return characteristic == PropertyCharacteristic::Functional
                && self.taxonomy().has_characteristic(property, characteristic);
        }
        self.taxonomy().has_characteristic(property, characteristic)
    }

    fn annotation_subjects(&self) -> Vec<OwlIri> {
        self.ontology.annotations.keys().cloned().collect()
    }

    fn annotations(&self, subject: &OwlIri, property: Option<&OwlIri>) -> Vec<(OwlIri, Value)> {
        let Some(by_property) = self.ontology.annotations.get(subject) else {
            return Vec::new();
        };
        by_property
            .iter()
            .filter(|(p, _)| property.map_or(true, |wanted| wanted == *p))
            .flat_map(|(p, values)| values.iter().map(move |value| (p.clone(), value.clone())))
            .collect()
    }
}
