use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dlconsult_owl::{Axiom, ClassExpression, Individual, InferenceType, Ontology, OwlDlReasoner, OwlIri, OwlReasoner};
use dlconsult_query::{
    DefaultSparqlDlEvaluator, DefaultSparqlDlParser, JsonSerializer, ResultSerializer, SparqlDlEvaluator, SparqlDlParser,
    XmlSerializer,
};

/// Generate a people ontology with a class chain and a `knows` chain
fn generate_test_reasoner(size: usize) -> OwlDlReasoner {
    let mut ontology = Ontology::new();
    let iri = |local: String| OwlIri::new(format!("http://example.org/{}", local));

    ontology.add_axiom(Axiom::SubClassOf(
        ClassExpression::Named(iri("Student".to_string())),
        ClassExpression::Named(iri("Person".to_string())),
    ));

    for i in 0..size {
        let person = Individual(iri(format!("person{}", i)));
        let class = if i % 2 == 0 { "Student" } else { "Person" };
        ontology.add_axiom(Axiom::ClassAssertion(ClassExpression::Named(iri(class.to_string())), person.clone()));

        if i > 0 {
            let previous = Individual(iri(format!("person{}", i - 1)));
            ontology.add_axiom(Axiom::ObjectPropertyAssertion(iri("knows".to_string()), person, previous));
        }
    }

    let mut reasoner = OwlDlReasoner::new(ontology);
    reasoner
        .precompute_inferences(&[InferenceType::ClassHierarchy, InferenceType::ClassAssertions])
        .unwrap();
    reasoner
}

/// Benchmark SPARQL-DL parsing performance
fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparql_dl_parsing");

    let queries = vec![
        ("simple_type", "PREFIX ex: <http://example.org/> SELECT ?x WHERE { Type(?x, ex:Person) }"),
        (
            "join",
            "PREFIX ex: <http://example.org/> SELECT ?x ?y WHERE { Type(?x, ex:Student), PropertyValue(?x, ex:knows, ?y), Type(?y, ex:Person) }",
        ),
        (
            "disjunction",
            "SELECT * WHERE { SubClassOf(?c, owl:Thing) } OR WHERE { Individual(?c) } OR WHERE { ObjectProperty(?c) }",
        ),
    ];

    for (name, query) in queries {
        group.bench_with_input(BenchmarkId::from_parameter(name), &query, |b, query| {
            b.iter(|| DefaultSparqlDlParser.parse(black_box(query)).unwrap());
        });
    }
    group.finish();
}

/// Benchmark evaluation and rendering over growing individual counts
fn benchmark_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparql_dl_evaluation");
    let query = DefaultSparqlDlParser
        .parse("PREFIX ex: <http://example.org/> SELECT ?x ?y WHERE { Type(?x, ex:Student), PropertyValue(?x, ex:knows, ?y) }")
        .unwrap();
    let evaluator = DefaultSparqlDlEvaluator::default();

    for size in [100, 500, 1000] {
        let reasoner = generate_test_reasoner(size);
        group.bench_with_input(BenchmarkId::new("join", size), &reasoner, |b, reasoner| {
            b.iter(|| evaluator.evaluate(black_box(&query), reasoner).unwrap());
        });

        let result = evaluator.evaluate(&query, &reasoner).unwrap();
        group.bench_with_input(BenchmarkId::new("render", size), &result, |b, result| {
            b.iter(|| {
                let _xml = XmlSerializer.render(black_box(result)).unwrap();
                let _json = JsonSerializer.render(black_box(result)).unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_parsing, benchmark_evaluation);
criterion_main!(benches);
