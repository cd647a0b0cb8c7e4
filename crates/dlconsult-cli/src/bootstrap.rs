//! 知識ベースの初期化
//!
//! 文書 → トリプル → オントロジー → 推論器 の順に構築し、固定の推論カテゴリを事前計算する

use crate::error::ConsultError;
use dlconsult_owl::{DefaultOntologyLoader, InferenceType, Ontology, OntologyLoader, OwlDlReasoner, OwlError, OwlReasoner};
use std::path::Path;
use tracing::{debug, info, info_span};

/// Inference categories computed up front for every consultation
pub const PRECOMPUTED_INFERENCES: [InferenceType; 5] = [
    InferenceType::ClassHierarchy,
    InferenceType::DisjointClasses,
    InferenceType::ObjectPropertyHierarchy,
    InferenceType::ClassAssertions,
    InferenceType::ObjectPropertyAssertions,
];

/// Turns a knowledge document into an ontology
pub trait DocumentLoader {
    fn load(&self, path: &Path) -> Result<Ontology, ConsultError>;
}

/// RDF/XML, Turtle or N-Triples documents, chosen by file extension
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDocumentLoader;

impl DocumentLoader for DefaultDocumentLoader {
    fn load(&self, path: &Path) -> Result<Ontology, ConsultError> {
        let store = dlconsult_rdf::parse_document(path).map_err(|e| ConsultError::Load(e.to_string()))?;
        debug!(triples = store.len(), "document parsed");
        DefaultOntologyLoader
            .load_from_store(&store)
            .map_err(|e| ConsultError::Load(e.to_string()))
    }
}

/// Creates the reasoning backend for a loaded ontology
pub trait BackendFactory {
    fn create(&self, ontology: Ontology) -> Box<dyn OwlReasoner>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultBackendFactory;

impl BackendFactory for DefaultBackendFactory {
    fn create(&self, ontology: Ontology) -> Box<dyn OwlReasoner> {
        Box::new(OwlDlReasoner::new(ontology))
    }
}

/// Builds the knowledge base handle owned by a single consultation
pub struct Bootstrapper<'a> {
    loader: &'a dyn DocumentLoader,
    factory: &'a dyn BackendFactory,
    precompute: bool,
}

impl<'a> Bootstrapper<'a> {
    pub fn new(loader: &'a dyn DocumentLoader, factory: &'a dyn BackendFactory) -> Self {
        Self {
            loader,
            factory,
            precompute: true,
        }
    }

    pub fn with_precompute(mut self, precompute: bool) -> Self {
        self.precompute = precompute;
        self
    }

    pub fn load(&self, path: &Path) -> Result<Box<dyn OwlReasoner>, ConsultError> {
        let span = info_span!("bootstrap", document = %path.display());
        let _guard = span.enter();

        let ontology = self.loader.load(path)?;
        info!(axioms = ontology.axioms.len(), individuals = ontology.individuals.len(), "ontology loaded");

        let mut reasoner = self.factory.create(ontology);
        if self.precompute {
            reasoner
                .precompute_inferences(&PRECOMPUTED_INFERENCES)
                .map_err(|e| match e {
                    OwlError::UnsupportedFeature(detail) => ConsultError::UnsupportedOperation(detail),
                    other => ConsultError::Load(other.to_string()),
                })?;
            debug!("inferences precomputed");
        }

        Ok(reasoner)
    }
}
