use dlconsult_owl::{DefaultOntologyLoader, OntologyLoader, OwlDlReasoner};
use dlconsult_query::{
    DefaultSparqlDlEvaluator, DefaultSparqlDlParser, JsonSerializer, QueryResult, ResultSerializer, SparqlDlError,
    SparqlDlEvaluator, SparqlDlParser, XmlSerializer,
};
use dlconsult_rdf::parse_document;
use std::io::Write;

const PIZZA: &str = r#"
@prefix : <http://example.org/pizza#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

:Food a owl:Class .
:Pizza a owl:Class ; rdfs:subClassOf :Food ; rdfs:label "Pizza"@en , "Pizza"@it .
:Topping a owl:Class ; rdfs:subClassOf :Food ; owl:disjointWith :Pizza .
:CheeseTopping a owl:Class ; rdfs:subClassOf :Topping .
:MeatTopping a owl:Class ; rdfs:subClassOf :Topping ; owl:disjointWith :CheeseTopping .
:CheesyPizza a owl:Class ;
    owl:equivalentClass [ a owl:Class ; owl:intersectionOf ( :Pizza
        [ a owl:Restriction ; owl:onProperty :hasTopping ; owl:someValuesFrom :CheeseTopping ] ) ] .

:hasTopping a owl:ObjectProperty ; rdfs:domain :Pizza ; rdfs:range :Topping .
:hasIngredient a owl:ObjectProperty , owl:TransitiveProperty .
:hasTopping rdfs:subPropertyOf :hasIngredient .

:margherita :hasTopping :mozzarella , :tomato .
:mozzarella a :CheeseTopping .
:salami a :MeatTopping .
"#;

fn reasoner() -> (tempfile::NamedTempFile, OwlDlReasoner) {
    let mut file = tempfile::Builder::new().suffix(".ttl").tempfile().unwrap();
    file.write_all(PIZZA.as_bytes()).unwrap();
    file.flush().unwrap();

    let store = parse_document(file.path()).unwrap();
    let ontology = DefaultOntologyLoader.load_from_store(&store).unwrap();
    (file, OwlDlReasoner::new(ontology))
}

fn consult(query: &str) -> Result<QueryResult, SparqlDlError> {
    let (_file, reasoner) = reasoner();
    let query = DefaultSparqlDlParser.parse(&format!("PREFIX : <http://example.org/pizza#>\n{}", query))?;
    DefaultSparqlDlEvaluator::default().evaluate(&query, &reasoner)
}

#[test]
fn test_inferred_membership() {
    let result = consult("SELECT ?p WHERE { Type(?p, :CheesyPizza) }").unwrap();
    assert_eq!(
        JsonSerializer.render(&result).unwrap(),
        r#"{"head":{"vars":["p"]},"results":{"bindings":[{"p":{"type":"uri","value":"http://example.org/pizza#margherita"}}]}}"#
    );
}

#[test]
fn test_range_and_sub_property() {
    let toppings = consult("SELECT ?t WHERE { PropertyValue(:margherita, :hasIngredient, ?t), Type(?t, :Topping) }").unwrap();
    assert_eq!(toppings.size(), 2);

    let disjoint = consult("ASK { DisjointWith(:CheesyPizza, :MeatTopping) }").unwrap();
    assert_eq!(disjoint.boolean(), Some(true));
}

#[test]
fn test_annotations_and_xml() {
    let result = consult("SELECT ?l WHERE { Annotation(:Pizza, rdfs:label, ?l) }").unwrap();
    assert_eq!(
        XmlSerializer.render(&result).unwrap(),
        concat!(
            r#"<sparql xmlns="http://www.w3.org/2005/sparql-results#"><head><variable name="l"/></head><results>"#,
            r#"<result><binding name="l"><literal xml:lang="en">Pizza</literal></binding></result>"#,
            r#"<result><binding name="l"><literal xml:lang="it">Pizza</literal></binding></result>"#,
            r#"</results></sparql>"#
        )
    );
}

#[test]
fn test_empty_result_is_success() {
    let result = consult("SELECT ?x WHERE { Type(?x, :CheesyPizza), Type(?x, :Topping) }").unwrap();
    assert!(result.is_empty());
    assert_eq!(
        JsonSerializer.render(&result).unwrap(),
        r#"{"head":{"vars":["x"]},"results":{"bindings":[]}}"#
    );
}

#[test]
fn test_parse_error_never_reaches_the_reasoner() {
    let result = DefaultSparqlDlParser.parse("SELECT ?x WHERE { Type(?x, :Pizza }");
    assert!(matches!(result, Err(SparqlDlError::ParseError(_))));
}
