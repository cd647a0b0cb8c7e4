//! Indexed in-memory triple store

use crate::model::{Term, Triple};
use crate::vocab::rdf;
use std::collections::{HashMap, HashSet};

/// Triple store with subject / predicate indices.
///
/// Insertion order is preserved and duplicate triples are ignored, so the
/// store behaves as an RDF graph (a set) while iteration stays deterministic.
#[derive(Debug, Default)]
pub struct TripleStore {
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
    subject_index: HashMap<Term, Vec<usize>>,
    predicate_index: HashMap<String, Vec<usize>>,
}

impl TripleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple; returns false when it was already present
    pub fn insert(&mut self, triple: Triple) -> bool {
        if !self.seen.insert(triple.clone()) {
            return false;
        }

        let index = self.triples.len();
        self.subject_index
            .entry(triple.subject.clone())
            .or_default()
            .push(index);
        self.predicate_index
            .entry(triple.predicate.clone())
            .or_default()
            .push(index);
        self.triples.push(triple);
        true
    }

    pub fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) {
        for triple in triples {
            self.insert(triple);
        }
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Find triples matching a pattern
    pub fn find(&self, subject: Option<&Term>, predicate: Option<&str>, object: Option<&Term>) -> Vec<&Triple> {
        // Use the most selective index
        let candidates: Box<dyn Iterator<Item = &Triple> + '_> = if let Some(subj) = subject {
            match self.subject_index.get(subj) {
                Some(indices) => Box::new(indices.iter().map(|&i| &self.triples[i])),
                None => return Vec::new(),
            }
        } else if let Some(pred) = predicate {
            match self.predicate_index.get(pred) {
                Some(indices) => Box::new(indices.iter().map(|&i| &self.triples[i])),
                None => return Vec::new(),
            }
        } else {
            Box::new(self.triples.iter())
        };

        candidates
            .filter(|t| subject.map_or(true, |s| &t.subject == s))
            .filter(|t| predicate.map_or(true, |p| t.predicate == p))
            .filter(|t| object.map_or(true, |o| &t.object == o))
            .collect()
    }

    pub fn objects<'a>(&'a self, subject: &Term, predicate: &str) -> Vec<&'a Term> {
        self.find(Some(subject), Some(predicate), None)
            .into_iter()
            .map(|t| &t.object)
            .collect()
    }

    pub fn object<'a>(&'a self, subject: &Term, predicate: &str) -> Option<&'a Term> {
        self.objects(subject, predicate).into_iter().next()
    }

    pub fn subjects<'a>(&'a self, predicate: &str, object: &Term) -> Vec<&'a Term> {
        self.find(None, Some(predicate), Some(object))
            .into_iter()
            .map(|t| &t.subject)
            .collect()
    }

    pub fn has_type(&self, subject: &Term, class_iri: &str) -> bool {
        !self
            .find(Some(subject), Some(rdf::TYPE), Some(&Term::iri(class_iri)))
            .is_empty()
    }

    /// Parse an RDF collection into its members; `None` for a malformed list
    pub fn rdf_list(&self, head: &Term) -> Option<Vec<Term>> {
        let mut result = Vec::new();
        let mut current = head.clone();
        let mut visited = HashSet::new();

        loop {
            if current.as_iri() == Some(rdf::NIL) {
                return Some(result);
            }
            if !visited.insert(current.clone()) {
                return None; // cyclic list
            }

            let first = self.object(&current, rdf::FIRST)?;
            result.push(first.clone());
            current = self.object(&current, rdf::REST)?.clone();
        }
    }
}
