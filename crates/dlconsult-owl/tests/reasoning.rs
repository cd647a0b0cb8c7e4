use dlconsult_owl::{
    DefaultOntologyLoader, Individual, InferenceType, OntologyLoader, OwlDlReasoner, OwlError, OwlIri, OwlReasoner,
    PropertyCharacteristic,
};
use dlconsult_rdf::{parse_bytes, parse_document, RdfFormat};
use std::io::Write;

const FAMILY: &str = r#"
@prefix : <http://example.org/family#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

:Person a owl:Class .
:Man a owl:Class ; rdfs:subClassOf :Person .
:Woman a owl:Class ; rdfs:subClassOf :Person ; owl:disjointWith :Man .
:Parent a owl:Class ;
    owl:equivalentClass [ a owl:Restriction ; owl:onProperty :hasChild ; owl:someValuesFrom :Person ] .
:Mother a owl:Class ;
    owl:equivalentClass [ a owl:Class ; owl:intersectionOf ( :Woman :Parent ) ] .

:hasChild a owl:ObjectProperty ; rdfs:domain :Person ; rdfs:range :Person .
:hasParent a owl:ObjectProperty ; owl:inverseOf :hasChild .
:hasDescendant a owl:ObjectProperty , owl:TransitiveProperty .
:hasChild rdfs:subPropertyOf :hasDescendant .
:age a owl:DatatypeProperty , owl:FunctionalProperty .

:mary a :Woman ; :hasChild :tom ; :age "52"^^xsd:integer .
:tom a :Man ; :hasChild :ann .
:ann rdfs:label "Ann"@en .
"#;

fn family() -> OwlDlReasoner {
    let store = parse_bytes(FAMILY.as_bytes(), RdfFormat::Turtle).unwrap();
    let ontology = DefaultOntologyLoader.load_from_store(&store).unwrap();
    OwlDlReasoner::new(ontology)
}

fn iri(local: &str) -> OwlIri {
    OwlIri::new(format!("http://example.org/family#{}", local))
}

fn ind(local: &str) -> Individual {
    Individual(iri(local))
}

#[test]
fn test_defined_classes_are_realized() {
    let reasoner = family();
    assert!(reasoner.is_consistent().unwrap());

    assert_eq!(reasoner.instances(&iri("Parent"), false), vec![ind("mary"), ind("tom")]);
    assert_eq!(reasoner.instances(&iri("Mother"), false), vec![ind("mary")]);
    assert_eq!(reasoner.types(&ind("mary"), true), vec![iri("Mother")]);
    // range of hasChild
    assert!(reasoner.instances(&iri("Person"), false).contains(&ind("ann")));
}

#[test]
fn test_defined_class_is_classified() {
    let reasoner = family();
    let supers = reasoner.superclasses(&iri("Mother"), false);
    assert!(supers.contains(&iri("Woman")));
    assert!(supers.contains(&iri("Parent")));
    assert!(supers.contains(&iri("Person")));
}

#[test]
fn test_property_inferences() {
    let reasoner = family();

    assert_eq!(reasoner.object_property_values(&ind("ann"), &iri("hasParent")), vec![ind("tom")]);
    assert_eq!(
        reasoner.object_property_values(&ind("mary"), &iri("hasDescendant")),
        vec![ind("ann"), ind("tom")]
    );
    assert_eq!(reasoner.inverse_properties(&iri("hasChild")), vec![iri("hasParent")]);
    assert!(reasoner.has_characteristic(&iri("hasDescendant"), PropertyCharacteristic::Transitive));
    assert!(reasoner.has_characteristic(&iri("age"), PropertyCharacteristic::Functional));
    assert_eq!(reasoner.data_properties(), vec![iri("age")]);
    assert_eq!(reasoner.data_property_values(&ind("mary"), &iri("age")).len(), 1);
}

#[test]
fn test_disjointness_is_inherited() {
    let reasoner = family();
    assert!(reasoner.disjoint_classes(&iri("Mother")).contains(&iri("Man")));
    assert!(reasoner.different_individuals(&ind("mary")).contains(&ind("tom")));
}

#[test]
fn test_inconsistent_document() {
    let document = format!("{}\n:tom a :Woman .\n", FAMILY);
    let store = parse_bytes(document.as_bytes(), RdfFormat::Turtle).unwrap();
    let ontology = DefaultOntologyLoader.load_from_store(&store).unwrap();
    let mut reasoner = OwlDlReasoner::new(ontology);

    // precomputation succeeds even when the ontology has no model
    reasoner
        .precompute_inferences(&[InferenceType::ClassHierarchy, InferenceType::ClassAssertions])
        .unwrap();
    assert!(!reasoner.is_consistent().unwrap());
    assert!(matches!(reasoner.ensure_consistent(), Err(OwlError::ConsistencyError(_))));
}

#[test]
fn test_load_from_rdf_xml_file() {
    let mut file = tempfile::Builder::new().suffix(".owl").tempfile().unwrap();
    file.write_all(
        br#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:Class rdf:about="http://example.org/Person"/>
  <owl:Class rdf:about="http://example.org/Student">
    <rdfs:subClassOf rdf:resource="http://example.org/Person"/>
  </owl:Class>
  <owl:NamedIndividual rdf:about="http://example.org/alice">
    <rdf:type rdf:resource="http://example.org/Student"/>
  </owl:NamedIndividual>
</rdf:RDF>
"#,
    )
    .unwrap();
    file.flush().unwrap();

    let store = parse_document(file.path()).unwrap();
    let ontology = DefaultOntologyLoader.load_from_store(&store).unwrap();
    let mut reasoner = OwlDlReasoner::new(ontology);
    reasoner
        .precompute_inferences(&[
            InferenceType::ClassHierarchy,
            InferenceType::DisjointClasses,
            InferenceType::ObjectPropertyHierarchy,
            InferenceType::ClassAssertions,
            InferenceType::ObjectPropertyAssertions,
        ])
        .unwrap();

    assert_eq!(
        reasoner.instances(&OwlIri::new("http://example.org/Person"), false),
        vec![Individual::new("http://example.org/alice")]
    );
}
