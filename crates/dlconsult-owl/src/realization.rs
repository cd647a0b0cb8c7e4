//! 個体レベルの飽和 (ABox): クラス所属・プロパティ値・同一性・無矛盾性

use crate::hierarchy::Taxonomy;
use crate::model::{Axiom, ClassExpression, Individual, Ontology, OwlIri, PropertyCharacteristic, PropertyExpression, Value};
use dlconsult_rdf::Literal;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Recursion limit when checking nested restrictions against individuals
const MAX_MEMBERSHIP_DEPTH: usize = 16;

type Edge = (Individual, Individual);

/// Saturated assertions about named individuals
#[derive(Debug, Clone, Default)]
pub struct Realization {
    individuals: BTreeSet<Individual>,
    same: BTreeMap<Individual, BTreeSet<Individual>>,
    different: BTreeSet<Edge>,
    types: BTreeMap<Individual, BTreeSet<OwlIri>>,
    complex: BTreeMap<Individual, BTreeSet<ClassExpression>>,
    object_edges: BTreeMap<OwlIri, BTreeSet<Edge>>,
    data_edges: BTreeMap<OwlIri, BTreeSet<(Individual, Literal)>>,
    clash: Option<String>,
}

impl Realization {
    pub fn build(ontology: &Ontology, taxonomy: &Taxonomy) -> Self {
        let mut realization = Self::default();

        for individual in &ontology.individuals {
            realization.register(individual);
            realization.assert_type(taxonomy, individual, &ClassExpression::Thing);
        }

        let mut negative_object = Vec::new();
        let mut negative_data = Vec::new();

        for axiom in &ontology.axioms {
            match axiom {
                Axiom::ClassAssertion(class, individual) => {
                    realization.assert_type(taxonomy, individual, class);
                }
                Axiom::ObjectPropertyAssertion(property, source, target) => {
                    realization.add_object(property, source, target);
                }
                Axiom::DataPropertyAssertion(property, source, value) => {
                    realization.add_data(property, source, value);
                }
                Axiom::SameIndividual(individuals) => {
                    for pair in individuals.windows(2) {
                        realization.merge(&pair[0], &pair[1]);
                    }
                }
                Axiom::DifferentIndividuals(individuals) => {
                    for (i, first) in individuals.iter().enumerate() {
                        for second in &individuals[i + 1..] {
                            realization.different.insert((first.clone(), second.clone()));
                        }
                    }
                }
                Axiom::NegativeObjectPropertyAssertion(property, source, target) => {
                    negative_object.push((property.clone(), source.clone(), target.clone()));
                }
                Axiom::NegativeDataPropertyAssertion(property, source, value) => {
                    negative_data.push((property.clone(), source.clone(), value.clone()));
                }
                _ => {}
            }
        }

        let reflexive: Vec<OwlIri> = taxonomy
            .object_properties
            .nodes()
            .filter(|p| taxonomy.has_characteristic(p, PropertyCharacteristic::Reflexive))
            .cloned()
            .collect();
        for property in &reflexive {
            for individual in realization.individuals.clone() {
                realization.add_object(property, &individual, &individual);
            }
        }

        let mut rounds = 0usize;
        loop {
            rounds += 1;
            let mut changed = false;
            changed |= realization.close_edges(taxonomy);
            changed |= realization.apply_domains_and_ranges(taxonomy);
            changed |= realization.apply_functional(taxonomy);
            changed |= realization.share_same(taxonomy);
            changed |= realization.apply_universals(taxonomy);
            changed |= realization.apply_definitions(taxonomy);
            if !changed {
                break;
            }
        }

        realization.clash = realization.find_clash(taxonomy, &negative_object, &negative_data);
        debug!(
            individuals = realization.individuals.len(),
            rounds,
            consistent = realization.clash.is_none(),
            "individuals realized"
        );
        realization
    }

    pub fn clash(&self) -> Option<&str> {
        self.clash.as_deref()
    }

    pub fn individuals(&self) -> &BTreeSet<Individual> {
        &self.individuals
    }

    pub fn types(&self, individual: &Individual) -> BTreeSet<OwlIri> {
        self.types.get(individual).cloned().unwrap_or_default()
    }

    pub fn has_type(&self, individual: &Individual, class: &OwlIri) -> bool {
        self.types.get(individual).map_or(false, |types| types.contains(class))
    }

    pub fn same_as(&self, individual: &Individual) -> BTreeSet<Individual> {
        self.same
            .get(individual)
            .cloned()
            .unwrap_or_else(|| BTreeSet::from([individual.clone()]))
    }

    pub fn object_values(&self, individual: &Individual, property: &OwlIri) -> BTreeSet<Individual> {
        self.object_edges
            .get(property)
            .map(|edges| {
                edges
                    .iter()
                    .filter(|(source, _)| source == individual)
                    .map(|(_, target)| target.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn data_values(&self, individual: &Individual, property: &OwlIri) -> BTreeSet<Literal> {
        self.data_edges
            .get(property)
            .map(|edges| {
                edges
                    .iter()
                    .filter(|(source, _)| source == individual)
                    .map(|(_, value)| value.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Known to denote different objects (asserted or via disjoint types)
    pub fn are_different(&self, taxonomy: &Taxonomy, a: &Individual, b: &Individual) -> bool {
        let same_a = self.same_as(a);
        let same_b = self.same_as(b);
        if same_a.contains(b) {
            return false;
        }

        let asserted = same_a.iter().any(|x| {
            same_b
                .iter()
                .any(|y| self.different.contains(&(x.clone(), y.clone())) || self.different.contains(&(y.clone(), x.clone())))
        });
        if asserted {
            return true;
        }

        let types_b = self.types(b);
        self.types(a).iter().any(|t| {
            taxonomy
                .told_disjoint(t)
                .map_or(false, |disjoint| disjoint.iter().any(|d| types_b.contains(d)))
        })
    }

    fn register(&mut self, individual: &Individual) -> bool {
        if !self.individuals.insert(individual.clone()) {
            return false;
        }
        self.same
            .insert(individual.clone(), BTreeSet::from([individual.clone()]));
        self.types.entry(individual.clone()).or_default();
        true
    }

    fn add_object(&mut self, property: &OwlIri, source: &Individual, target: &Individual) -> bool {
        self.register(source);
        self.register(target);
        self.object_edges
            .entry(property.clone())
            .or_default()
            .insert((source.clone(), target.clone()))
    }

    fn add_object_expression(&mut self, property: &PropertyExpression, source: &Individual, target: &Individual) -> bool {
        let (iri, inverted) = property.named();
        let iri = iri.clone();
        if inverted {
            self.add_object(&iri, target, source)
        } else {
            self.add_object(&iri, source, target)
        }
    }

    fn add_data(&mut self, property: &OwlIri, source: &Individual, value: &Literal) -> bool {
        self.register(source);
        self.data_edges
            .entry(property.clone())
            .or_default()
            .insert((source.clone(), value.clone()))
    }

    fn merge(&mut self, a: &Individual, b: &Individual) -> bool {
        self.register(a);
        self.register(b);
        let same_a = self.same_as(a);
        if same_a.contains(b) {
            return false;
        }

        let merged: BTreeSet<Individual> = same_a.union(&self.same_as(b)).cloned().collect();
        for member in &merged {
            self.same.insert(member.clone(), merged.clone());
        }
        true
    }

    fn add_named(&mut self, taxonomy: &Taxonomy, individual: &Individual, class: &OwlIri) -> bool {
        let mut supers = taxonomy.classes.supers(class);
        if supers.is_empty() {
            supers.insert(class.clone());
        }

        let mut changed = false;
        for sup in supers {
            let inserted = self.types.entry(individual.clone()).or_default().insert(sup.clone());
            if inserted {
                changed = true;
                let told: Vec<ClassExpression> = taxonomy.told_supers(&sup).cloned().collect();
                for expression in &told {
                    self.assert_type(taxonomy, individual, expression);
                }
            }
        }
        changed
    }

    fn assert_type(&mut self, taxonomy: &Taxonomy, individual: &Individual, class: &ClassExpression) -> bool {
        self.register(individual);

        match class {
            ClassExpression::Named(_) | ClassExpression::Thing | ClassExpression::Nothing => match class.as_named() {
                Some(iri) => self.add_named(taxonomy, individual, &iri),
                None => false,
            },
            ClassExpression::IntersectionOf(parts) => {
                let mut changed = false;
                for part in parts {
                    changed |= self.assert_type(taxonomy, individual, part);
                }
                changed
            }
            ClassExpression::HasValue { property, value } => {
                let mut changed = self.add_complex(individual, class);
                match value {
                    Value::Iri(target) if !property.is_data() => {
                        changed |= self.add_object_expression(property, individual, &Individual(target.clone()));
                    }
                    Value::Literal(literal) if property.is_data() => {
                        changed |= self.add_data(property.named().0, individual, literal);
                    }
                    _ => {}
                }
                changed
            }
            ClassExpression::OneOf(members) if members.len() == 1 => {
                let changed = self.add_complex(individual, class);
                self.merge(individual, &members[0]) || changed
            }
            _ => self.add_complex(individual, class),
        }
    }

    fn add_complex(&mut self, individual: &Individual, class: &ClassExpression) -> bool {
        self.complex
            .entry(individual.clone())
            .or_default()
            .insert(class.clone())
    }

    fn all_object_edges(&self) -> Vec<(OwlIri, Individual, Individual)> {
        self.object_edges
            .iter()
            .flat_map(|(property, edges)| {
                edges
                    .iter()
                    .map(move |(source, target)| (property.clone(), source.clone(), target.clone()))
            })
            .collect()
    }

    /// Sub-properties, inverses, symmetry, transitivity and sameAs over edges
    fn close_edges(&mut self, taxonomy: &Taxonomy) -> bool {
        let mut additions = Vec::new();

        for (property, source, target) in self.all_object_edges() {
            for sup in taxonomy.object_properties.supers(&property) {
                if sup != property {
                    additions.push((sup, source.clone(), target.clone()));
                }
            }
            for inverse in taxonomy.inverses(&property) {
                additions.push((inverse, target.clone(), source.clone()));
            }
            for source_alias in self.same_as(&source) {
                for target_alias in self.same_as(&target) {
                    additions.push((property.clone(), source_alias.clone(), target_alias));
                }
            }
        }

        let mut changed = false;
        for (property, source, target) in additions {
            changed |= self.add_object(&property, &source, &target);
        }

        let transitive: Vec<OwlIri> = self
            .object_edges
            .keys()
            .filter(|p| taxonomy.has_characteristic(p, PropertyCharacteristic::Transitive))
            .cloned()
            .collect();
        for property in transitive {
            changed |= self.close_transitive(&property);
        }

        let mut data_additions = Vec::new();
        for (property, edges) in &self.data_edges {
            for (source, value) in edges {
                for sup in taxonomy.data_properties.supers(property) {
                    if &sup != property {
                        data_additions.push((sup, source.clone(), value.clone()));
                    }
                }
                for alias in self.same_as(source) {
                    data_additions.push((property.clone(), alias, value.clone()));
                }
            }
        }
        for (property, source, value) in data_additions {
            changed |= self.add_data(&property, &source, &value);
        }

        changed
    }

    fn close_transitive(&mut self, property: &OwlIri) -> bool {
        let mut changed = false;
        loop {
            let edges = self.object_edges.get(property).cloned().unwrap_or_default();
            let mut successors: BTreeMap<&Individual, Vec<&Individual>> = BTreeMap::new();
            for (source, target) in &edges {
                successors.entry(source).or_default().push(target);
            }

            let mut additions = Vec::new();
            for (source, target) in &edges {
                for next in successors.get(target).into_iter().flatten() {
                    if !edges.contains(&(source.clone(), (*next).clone())) {
                        additions.push((source.clone(), (*next).clone()));
                    }
                }
            }

            if additions.is_empty() {
                return changed;
            }
            for (source, target) in additions {
                changed |= self.add_object(property, &source, &target);
            }
        }
    }

    fn apply_domains_and_ranges(&mut self, taxonomy: &Taxonomy) -> bool {
        let mut assertions = Vec::new();

        for (property, edges) in &self.object_edges {
            for domain in taxonomy.domains(property) {
                for (source, _) in edges {
                    assertions.push((source.clone(), domain.clone()));
                }
            }
            for range in taxonomy.ranges(property) {
                for (_, target) in edges {
                    assertions.push((target.clone(), range.clone()));
                }
            }
        }
        for (property, edges) in &self.data_edges {
            for domain in taxonomy.domains(property) {
                for (source, _) in edges {
                    assertions.push((source.clone(), domain.clone()));
                }
            }
        }

        let mut changed = false;
        for (individual, class) in assertions {
            changed |= self.assert_type(taxonomy, &individual, &class);
        }
        changed
    }

    fn apply_functional(&mut self, taxonomy: &Taxonomy) -> bool {
        let mut merges = Vec::new();

        for (property, edges) in &self.object_edges {
            if taxonomy.has_characteristic(property, PropertyCharacteristic::Functional) {
                let mut by_source: BTreeMap<&Individual, Vec<&Individual>> = BTreeMap::new();
                for (source, target) in edges {
                    by_source.entry(source).or_default().push(target);
                }
                for targets in by_source.values() {
                    for pair in targets.windows(2) {
                        merges.push((pair[0].clone(), pair[1].clone()));
                    }
                }
            }
            if taxonomy.has_characteristic(property, PropertyCharacteristic::InverseFunctional) {
                let mut by_target: BTreeMap<&Individual, Vec<&Individual>> = BTreeMap::new();
                for (source, target) in edges {
                    by_target.entry(target).or_default().push(source);
                }
                for sources in by_target.values() {
                    for pair in sources.windows(2) {
                        merges.push((pair[0].clone(), pair[1].clone()));
                    }
                }
            }
        }

        let mut changed = false;
        for (a, b) in merges {
            changed |= self.merge(&a, &b);
        }
        changed
    }

    fn share_same(&mut self, taxonomy: &Taxonomy) -> bool {
        let mut assertions = Vec::new();
        for (individual, aliases) in &self.same {
            for alias in aliases {
                if alias == individual {
                    continue;
                }
                for class in self.types.get(alias).into_iter().flatten() {
                    assertions.push((individual.clone(), ClassExpression::from_iri(class.as_str())));
                }
                for class in self.complex.get(alias).into_iter().flatten() {
                    assertions.push((individual.clone(), class.clone()));
                }
            }
        }

        let mut changed = false;
        for (individual, class) in assertions {
            changed |= self.assert_type(taxonomy, &individual, &class);
        }
        changed
    }

    fn apply_universals(&mut self, taxonomy: &Taxonomy) -> bool {
        let mut assertions = Vec::new();
        for (individual, classes) in &self.complex {
            for class in classes {
                if let ClassExpression::AllValuesFrom { property, class: filler } = class {
                    if property.is_data() {
                        continue;
                    }
                    for target in self.fillers(property, individual) {
                        assertions.push((target, (**filler).clone()));
                    }
                }
            }
        }

        let mut changed = false;
        for (individual, class) in assertions {
            changed |= self.assert_type(taxonomy, &individual, &class);
        }
        changed
    }

    fn apply_definitions(&mut self, taxonomy: &Taxonomy) -> bool {
        let mut assertions = Vec::new();
        for (expression, defined) in taxonomy.definitions() {
            for individual in &self.individuals {
                if !self.has_type(individual, defined) && self.satisfies(taxonomy, individual, expression, 0) {
                    assertions.push((individual.clone(), defined.clone()));
                }
            }
        }

        let mut changed = false;
        for (individual, class) in assertions {
            changed |= self.add_named(taxonomy, &individual, &class);
        }
        changed
    }

    /// Object property fillers, following inverse expressions
    fn fillers(&self, property: &PropertyExpression, individual: &Individual) -> Vec<Individual> {
        let (iri, inverted) = property.named();
        self.object_edges
            .get(iri)
            .map(|edges| {
                edges
                    .iter()
                    .filter_map(|(source, target)| match inverted {
                        false if source == individual => Some(target.clone()),
                        true if target == individual => Some(source.clone()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the individual is known to satisfy the class expression
    pub fn satisfies(&self, taxonomy: &Taxonomy, individual: &Individual, class: &ClassExpression, depth: usize) -> bool {
        if depth > MAX_MEMBERSHIP_DEPTH {
            return false;
        }
        if self
            .complex
            .get(individual)
            .map_or(false, |classes| classes.contains(class))
        {
            return true;
        }

        match class {
            ClassExpression::Thing => true,
            ClassExpression::Nothing => self.has_type(individual, &OwlIri::nothing()),
            ClassExpression::Named(iri) => self.has_type(individual, iri),
            ClassExpression::IntersectionOf(parts) => parts
                .iter()
                .all(|part| self.satisfies(taxonomy, individual, part, depth + 1)),
            ClassExpression::UnionOf(parts) => parts
                .iter()
                .any(|part| self.satisfies(taxonomy, individual, part, depth + 1)),
            ClassExpression::ComplementOf(inner) => match inner.as_ref() {
                ClassExpression::Named(iri) => self
                    .types(individual)
                    .iter()
                    .any(|t| taxonomy.are_disjoint(t, iri)),
                ClassExpression::OneOf(members) => members
                    .iter()
                    .all(|member| self.are_different(taxonomy, individual, member)),
                _ => false,
            },
            ClassExpression::OneOf(members) => {
                let aliases = self.same_as(individual);
                members.iter().any(|member| aliases.contains(member))
            }
            ClassExpression::SomeValuesFrom { property, class: filler } => {
                if property.is_data() {
                    !self.data_values(individual, property.named().0).is_empty()
                } else {
                    self.fillers(property, individual)
                        .iter()
                        .any(|target| self.satisfies(taxonomy, target, filler, depth + 1))
                }
            }
            ClassExpression::HasValue { property, value } => match value {
                Value::Iri(target) => {
                    let target = Individual(target.clone());
                    self.fillers(property, individual)
                        .iter()
                        .any(|filler| self.same_as(filler).contains(&target))
                }
                Value::Literal(literal) => self.data_values(individual, property.named().0).contains(literal),
            },
            ClassExpression::MinCardinality { cardinality, property, class: filler } => {
                self.distinct_fillers(taxonomy, individual, property, filler.as_deref(), depth) >= *cardinality as usize
            }
            // Open world: upper bounds and universals are never entailed by missing facts
            ClassExpression::MaxCardinality { .. }
            | ClassExpression::ExactCardinality { .. }
            | ClassExpression::AllValuesFrom { .. } => false,
        }
    }

    /// Size of a set of fillers known to be pairwise different
    fn distinct_fillers(
        &self,
        taxonomy: &Taxonomy,
        individual: &Individual,
        property: &PropertyExpression,
        filler: Option<&ClassExpression>,
        depth: usize,
    ) -> usize {
        if property.is_data() {
            return self.data_values(individual, property.named().0).len();
        }

        let candidates: Vec<Individual> = self
            .fillers(property, individual)
            .into_iter()
            .filter(|target| filler.map_or(true, |class| self.satisfies(taxonomy, target, class, depth + 1)))
            .collect();

        let mut chosen: Vec<&Individual> = Vec::new();
        for candidate in &candidates {
            if chosen.iter().all(|other| self.are_different(taxonomy, other, candidate)) {
                chosen.push(candidate);
            }
        }
        chosen.len()
    }

    fn find_clash(
        &self,
        taxonomy: &Taxonomy,
        negative_object: &[(OwlIri, Individual, Individual)],
        negative_data: &[(OwlIri, Individual, Literal)],
    ) -> Option<String> {
        for (individual, types) in &self.types {
            for class in types {
                if !taxonomy.is_satisfiable(class) {
                    return Some(format!("{} is an instance of unsatisfiable class {}", individual.0, class));
                }
                if let Some(disjoint) = taxonomy.told_disjoint(class).and_then(|d| d.iter().find(|d| types.contains(*d))) {
                    return Some(format!(
                        "{} is an instance of disjoint classes {} and {}",
                        individual.0, class, disjoint
                    ));
                }
            }
        }

        for (individual, classes) in &self.complex {
            for class in classes {
                let violated = match class {
                    ClassExpression::ComplementOf(inner) => self.satisfies(taxonomy, individual, inner, 0),
                    ClassExpression::MaxCardinality { cardinality, property, class: filler }
                    | ClassExpression::ExactCardinality { cardinality, property, class: filler } => {
                        self.distinct_fillers(taxonomy, individual, property, filler.as_deref(), 0) > *cardinality as usize
                    }
                    _ => false,
                };
                if violated {
                    return Some(format!("{} violates {:?}", individual.0, class));
                }
            }
        }

        for (a, b) in &self.different {
            if self.same_as(a).contains(b) {
                return Some(format!("{} and {} are asserted different but inferred to be the same", a.0, b.0));
            }
        }

        for (property, source, target) in negative_object {
            let targets = self.same_as(target);
            if self
                .object_values(source, property)
                .iter()
                .any(|value| targets.contains(value))
            {
                return Some(format!("negative assertion {}({}, {}) is violated", property, source.0, target.0));
            }
        }
        for (property, source, value) in negative_data {
            if self.data_values(source, property).contains(value) {
                return Some(format!("negative assertion {}({}, {:?}) is violated", property, source.0, value.lexical));
            }
        }

        for (property, edges) in &self.object_edges {
            let irreflexive = taxonomy.has_characteristic(property, PropertyCharacteristic::Irreflexive);
            let asymmetric = taxonomy.has_characteristic(property, PropertyCharacteristic::Asymmetric);
            for (source, target) in edges {
                if irreflexive && self.same_as(source).contains(target) {
                    return Some(format!("irreflexive property {} relates {} to itself", property, source.0));
                }
                if asymmetric && edges.contains(&(target.clone(), source.clone())) {
                    return Some(format!("asymmetric property {} holds in both directions between {} and {}", property, source.0, target.0));
                }
            }
        }

        None
    }
}
