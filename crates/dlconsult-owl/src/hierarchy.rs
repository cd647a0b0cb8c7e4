//! クラス階層・プロパティ階層の飽和 (TBox)

use crate::model::{Axiom, ClassExpression, Ontology, OwlIri, PropertyCharacteristic, PropertyExpression};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Recursion limit when comparing nested restrictions
const MAX_SUBSUMPTION_DEPTH: usize = 16;

/// Reflexive-transitive "is below" relation over named entities
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    supers: BTreeMap<OwlIri, BTreeSet<OwlIri>>,
}

impl Hierarchy {
    pub fn new(nodes: impl IntoIterator<Item = OwlIri>) -> Self {
        let mut hierarchy = Self::default();
        for node in nodes {
            hierarchy.add_node(node);
        }
        hierarchy
    }

    pub fn add_node(&mut self, node: OwlIri) {
        self.supers
            .entry(node.clone())
            .or_insert_with(|| BTreeSet::from([node]));
    }

    pub fn contains(&self, node: &OwlIri) -> bool {
        self.supers.contains_key(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &OwlIri> {
        self.supers.keys()
    }

    /// Record `sub ⊑ sup`; returns true when the edge is new
    pub fn add_edge(&mut self, sub: &OwlIri, sup: &OwlIri) -> bool {
        self.add_node(sub.clone());
        self.add_node(sup.clone());
        self.supers
            .get_mut(sub)
            .map_or(false, |supers| supers.insert(sup.clone()))
    }

    /// Make `node` a sub of every node
    pub fn collapse_to_bottom(&mut self, node: &OwlIri) {
        let all: BTreeSet<OwlIri> = self.supers.keys().cloned().collect();
        self.supers.insert(node.clone(), all);
    }

    /// Transitive closure
    pub fn close(&mut self) {
        loop {
            let mut changed = false;
            let snapshot = self.supers.clone();
            for supers in self.supers.values_mut() {
                let reachable: Vec<OwlIri> = supers
                    .iter()
                    .filter_map(|s| snapshot.get(s))
                    .flatten()
                    .cloned()
                    .collect();
                for node in reachable {
                    changed |= supers.insert(node);
                }
            }
            if !changed {
                break;
            }
        }
    }

    pub fn is_sub(&self, sub: &OwlIri, sup: &OwlIri) -> bool {
        self.supers.get(sub).map_or(false, |supers| supers.contains(sup))
    }

    pub fn supers(&self, node: &OwlIri) -> BTreeSet<OwlIri> {
        self.supers.get(node).cloned().unwrap_or_default()
    }

    pub fn subs(&self, node: &OwlIri) -> BTreeSet<OwlIri> {
        if !self.contains(node) {
            return BTreeSet::new();
        }
        self.supers
            .iter()
            .filter(|(_, supers)| supers.contains(node))
            .map(|(sub, _)| sub.clone())
            .collect()
    }

    pub fn equivalents(&self, node: &OwlIri) -> BTreeSet<OwlIri> {
        self.supers(node)
            .into_iter()
            .filter(|sup| self.is_sub(sup, node))
            .collect()
    }

    pub fn is_strict_sub(&self, sub: &OwlIri, sup: &OwlIri) -> bool {
        self.is_sub(sub, sup) && !self.is_sub(sup, sub)
    }

    pub fn direct_supers(&self, node: &OwlIri) -> BTreeSet<OwlIri> {
        let strict: BTreeSet<OwlIri> = self
            .supers(node)
            .into_iter()
            .filter(|sup| !self.is_sub(sup, node))
            .collect();
        self.minimal(&strict)
    }

    pub fn direct_subs(&self, node: &OwlIri) -> BTreeSet<OwlIri> {
        let strict: BTreeSet<OwlIri> = self
            .subs(node)
            .into_iter()
            .filter(|sub| !self.is_sub(node, sub))
            .collect();
        strict
            .iter()
            .filter(|candidate| !strict.iter().any(|other| self.is_strict_sub(candidate, other)))
            .cloned()
            .collect()
    }

    /// Members of `set` with no strict sub inside `set`
    pub fn minimal(&self, set: &BTreeSet<OwlIri>) -> BTreeSet<OwlIri> {
        set.iter()
            .filter(|candidate| !set.iter().any(|other| self.is_strict_sub(other, candidate)))
            .cloned()
            .collect()
    }
}

/// Saturated terminology: class and property hierarchies plus the told
/// conditions the individual-level saturation needs
#[derive(Debug, Clone)]
pub struct Taxonomy {
    pub classes: Hierarchy,
    pub object_properties: Hierarchy,
    pub data_properties: Hierarchy,
    inverses: BTreeMap<OwlIri, BTreeSet<OwlIri>>,
    characteristics: BTreeMap<OwlIri, BTreeSet<PropertyCharacteristic>>,
    disjoint: BTreeMap<OwlIri, BTreeSet<OwlIri>>,
    complements: BTreeMap<OwlIri, BTreeSet<OwlIri>>,
    told_supers: BTreeMap<OwlIri, BTreeSet<ClassExpression>>,
    definitions: Vec<(ClassExpression, OwlIri)>,
    domains: BTreeMap<OwlIri, Vec<ClassExpression>>,
    ranges: BTreeMap<OwlIri, Vec<ClassExpression>>,
    unsatisfiable: BTreeSet<OwlIri>,
}

impl Taxonomy {
    pub fn build(ontology: &Ontology) -> Self {
        let thing = OwlIri::thing();
        let nothing = OwlIri::nothing();

        let mut classes = Hierarchy::new(ontology.classes.iter().cloned());
        classes.add_node(thing.clone());
        classes.add_node(nothing.clone());

        let mut taxonomy = Self {
            classes,
            object_properties: Hierarchy::new(ontology.object_properties.iter().cloned()),
            data_properties: Hierarchy::new(ontology.data_properties.iter().cloned()),
            inverses: BTreeMap::new(),
            characteristics: BTreeMap::new(),
            disjoint: BTreeMap::new(),
            complements: BTreeMap::new(),
            told_supers: BTreeMap::new(),
            definitions: Vec::new(),
            domains: BTreeMap::new(),
            ranges: BTreeMap::new(),
            unsatisfiable: BTreeSet::from([nothing.clone()]),
        };

        taxonomy.build_property_hierarchies(ontology);

        for axiom in &ontology.axioms {
            match axiom {
                Axiom::SubClassOf(sub, sup) => taxonomy.include(sub, sup),
                Axiom::EquivalentClasses(expressions) => {
                    for (i, first) in expressions.iter().enumerate() {
                        for second in &expressions[i + 1..] {
                            taxonomy.include(first, second);
                            taxonomy.include(second, first);
                            taxonomy.record_complement(first, second);
                            taxonomy.record_complement(second, first);
                        }
                    }
                }
                Axiom::DisjointClasses(expressions) => {
                    let named: Vec<OwlIri> = expressions.iter().filter_map(ClassExpression::as_named).collect();
                    if named.len() < expressions.len() {
                        debug!("disjointness between complex class expressions is ignored");
                    }
                    for (i, first) in named.iter().enumerate() {
                        for second in &named[i + 1..] {
                            taxonomy.add_disjoint(first, second);
                        }
                    }
                }
                Axiom::PropertyDomain(property, class) => {
                    let (iri, inverted) = property.named();
                    let target = if inverted { &mut taxonomy.ranges } else { &mut taxonomy.domains };
                    target.entry(iri.clone()).or_default().push(class.clone());
                }
                Axiom::PropertyRange(property, class) => {
                    let (iri, inverted) = property.named();
                    let target = if inverted { &mut taxonomy.domains } else { &mut taxonomy.ranges };
                    target.entry(iri.clone()).or_default().push(class.clone());
                }
                _ => {}
            }
        }

        // Every class is below owl:Thing
        let all: Vec<OwlIri> = taxonomy.classes.nodes().cloned().collect();
        for class in &all {
            taxonomy.classes.add_edge(class, &thing);
        }

        taxonomy.saturate_classes();
        debug!(
            classes = all.len(),
            unsatisfiable = taxonomy.unsatisfiable.len() - 1,
            definitions = taxonomy.definitions.len(),
            "class hierarchy saturated"
        );
        taxonomy
    }

    fn build_property_hierarchies(&mut self, ontology: &Ontology) {
        let mut inverse_pairs: BTreeSet<(OwlIri, OwlIri)> = BTreeSet::new();

        for axiom in &ontology.axioms {
            match axiom {
                Axiom::SubPropertyOf(sub, sup) => self.include_property(sub, sup),
                Axiom::EquivalentProperties(properties) => {
                    for (i, first) in properties.iter().enumerate() {
                        for second in &properties[i + 1..] {
                            let (p, p_inverted) = first.named();
                            let (q, q_inverted) = second.named();
                            if p_inverted != q_inverted {
                                // p ≡ q⁻
                                inverse_pairs.insert((p.clone(), q.clone()));
                                inverse_pairs.insert((q.clone(), p.clone()));
                            } else {
                                self.include_property(first, second);
                                self.include_property(second, first);
                            }
                        }
                    }
                }
                Axiom::InverseProperties(p, q) => {
                    inverse_pairs.insert((p.clone(), q.clone()));
                    inverse_pairs.insert((q.clone(), p.clone()));
                }
                Axiom::PropertyCharacteristic(property, characteristic) => {
                    let (iri, inverted) = property.named();
                    let characteristic = match (inverted, characteristic) {
                        (true, PropertyCharacteristic::Functional) => PropertyCharacteristic::InverseFunctional,
                        (true, PropertyCharacteristic::InverseFunctional) => PropertyCharacteristic::Functional,
                        (_, other) => *other,
                    };
                    self.characteristics.entry(iri.clone()).or_default().insert(characteristic);
                }
                _ => {}
            }
        }

        // p ⊑ q and p⁻ = p', q⁻ = q' entail p' ⊑ q'
        loop {
            self.object_properties.close();
            let mut changed = false;
            for (p, p_inverse) in &inverse_pairs {
                for (q, q_inverse) in &inverse_pairs {
                    if p != q && self.object_properties.is_sub(p, q) {
                        changed |= self.object_properties.add_edge(p_inverse, q_inverse);
                    }
                }
            }
            if !changed {
                break;
            }
        }
        self.data_properties.close();

        for (p, q) in &inverse_pairs {
            for p_equivalent in self.object_properties.equivalents(p) {
                self.inverses
                    .entry(p_equivalent)
                    .or_default()
                    .extend(self.object_properties.equivalents(q));
            }
        }
    }

    fn include_property(&mut self, sub: &PropertyExpression, sup: &PropertyExpression) {
        let (sub_iri, sub_inverted) = sub.named();
        let (sup_iri, sup_inverted) = sup.named();

        if sub.is_data() || sup.is_data() {
            self.data_properties.add_edge(sub_iri, sup_iri);
        } else if sub_inverted == sup_inverted {
            // p⁻ ⊑ q⁻ is the same as p ⊑ q
            self.object_properties.add_edge(sub_iri, sup_iri);
        } else {
            debug!(sub = %sub_iri, sup = %sup_iri, "sub-property of an inverse property is ignored");
        }
    }

    /// Normalise `sub ⊑ sup` into hierarchy edges, told conditions or definitions
    fn include(&mut self, sub: &ClassExpression, sup: &ClassExpression) {
        match (sub.as_named(), sup) {
            (_, ClassExpression::Thing) => {}
            (_, ClassExpression::IntersectionOf(parts)) => {
                for part in parts {
                    self.include(sub, part);
                }
            }
            (Some(a), ClassExpression::Named(_) | ClassExpression::Nothing) => {
                if let Some(b) = sup.as_named() {
                    self.classes.add_edge(&a, &b);
                }
            }
            (Some(a), ClassExpression::ComplementOf(inner)) if inner.is_named() => {
                if let Some(b) = inner.as_named() {
                    self.add_disjoint(&a, &b);
                }
                self.told_supers.entry(a).or_default().insert(sup.clone());
            }
            (Some(a), _) => {
                self.told_supers.entry(a).or_default().insert(sup.clone());
            }
            (None, _) => match (sub, sup.as_named()) {
                (ClassExpression::UnionOf(parts), _) => {
                    for part in parts {
                        self.include(part, sup);
                    }
                }
                (_, Some(b)) => self.definitions.push((sub.clone(), b)),
                (_, None) => debug!("general inclusion between complex class expressions is ignored"),
            },
        }
    }

    fn record_complement(&mut self, named: &ClassExpression, other: &ClassExpression) {
        if let (Some(a), ClassExpression::ComplementOf(inner)) = (named.as_named(), other) {
            if let Some(b) = inner.as_named() {
                self.complements.entry(a.clone()).or_default().insert(b.clone());
                self.complements.entry(b).or_default().insert(a);
            }
        }
    }

    fn add_disjoint(&mut self, a: &OwlIri, b: &OwlIri) {
        self.disjoint.entry(a.clone()).or_default().insert(b.clone());
        self.disjoint.entry(b.clone()).or_default().insert(a.clone());
    }

    fn saturate_classes(&mut self) {
        let nodes: Vec<OwlIri> = self.classes.nodes().cloned().collect();
        loop {
            self.classes.close();
            let mut changed = false;

            for class in &nodes {
                if !self.unsatisfiable.contains(class) && self.has_clash(class) {
                    debug!(class = %class, "class is unsatisfiable");
                    self.unsatisfiable.insert(class.clone());
                    changed = true;
                }
            }

            let definitions = self.definitions.clone();
            for (expression, defined) in &definitions {
                for class in &nodes {
                    if !self.classes.is_sub(class, defined) && self.entails(class, expression, 0) {
                        changed |= self.classes.add_edge(class, defined);
                    }
                }
            }

            if !changed {
                break;
            }
        }

        for class in self.unsatisfiable.clone() {
            self.classes.collapse_to_bottom(&class);
        }
    }

    fn has_clash(&self, class: &OwlIri) -> bool {
        let supers = self.classes.supers(class);
        supers.iter().any(|sup| {
            self.unsatisfiable.contains(sup)
                || self
                    .disjoint
                    .get(sup)
                    .map_or(false, |disjoint| disjoint.iter().any(|d| supers.contains(d)))
        })
    }

    /// Whether every instance of the named class satisfies `expression`
    fn entails(&self, class: &OwlIri, expression: &ClassExpression, depth: usize) -> bool {
        if self.unsatisfiable.contains(class) {
            return true;
        }
        match expression {
            ClassExpression::Named(_) | ClassExpression::Thing | ClassExpression::Nothing => expression
                .as_named()
                .map_or(false, |target| self.classes.is_sub(class, &target)),
            ClassExpression::IntersectionOf(parts) => parts.iter().all(|part| self.entails(class, part, depth)),
            ClassExpression::UnionOf(parts) => parts.iter().any(|part| self.entails(class, part, depth)),
            _ => self.classes.supers(class).iter().any(|sup| {
                self.told_supers(sup)
                    .any(|told| self.expression_subsumes(told, expression, depth))
            }),
        }
    }

    /// Structural subsumption between a told condition and a target expression
    fn expression_subsumes(&self, told: &ClassExpression, target: &ClassExpression, depth: usize) -> bool {
        use ClassExpression::*;

        if depth > MAX_SUBSUMPTION_DEPTH {
            return false;
        }
        if told == target {
            return true;
        }

        match (told, target) {
            (_, Thing) => true,
            (_, IntersectionOf(parts)) => parts.iter().all(|part| self.expression_subsumes(told, part, depth + 1)),
            (_, UnionOf(parts)) => parts.iter().any(|part| self.expression_subsumes(told, part, depth + 1)),
            (IntersectionOf(parts), _) => parts.iter().any(|part| self.expression_subsumes(part, target, depth + 1)),
            (Named(_), _) => told
                .as_named()
                .map_or(false, |class| self.entails(&class, target, depth + 1)),
            (SomeValuesFrom { property: p, class: c }, SomeValuesFrom { property: q, class: d }) => {
                self.property_entails(p, q) && self.filler_entails(c, d, depth)
            }
            (
                MinCardinality { cardinality, property: p, class: c } | ExactCardinality { cardinality, property: p, class: c },
                SomeValuesFrom { property: q, class: d },
            ) if *cardinality >= 1 => {
                self.property_entails(p, q) && self.filler_entails(c.as_deref().unwrap_or(&Thing), d, depth)
            }
            (
                MinCardinality { cardinality: n, property: p, class: c } | ExactCardinality { cardinality: n, property: p, class: c },
                MinCardinality { cardinality: m, property: q, class: d },
            ) => {
                n >= m
                    && self.property_entails(p, q)
                    && self.filler_entails(c.as_deref().unwrap_or(&Thing), d.as_deref().unwrap_or(&Thing), depth)
            }
            (HasValue { property: p, value: v }, HasValue { property: q, value: w }) => {
                v == w && self.property_entails(p, q)
            }
            (HasValue { property: p, .. }, SomeValuesFrom { property: q, class: d }) => {
                **d == Thing && self.property_entails(p, q)
            }
            (AllValuesFrom { property: p, class: c }, AllValuesFrom { property: q, class: d }) => {
                self.property_entails(q, p) && self.filler_entails(c, d, depth)
            }
            (
                MaxCardinality { cardinality: n, property: p, class: c } | ExactCardinality { cardinality: n, property: p, class: c },
                MaxCardinality { cardinality: m, property: q, class: d },
            ) => n <= m && c == d && self.property_entails(q, p),
            (OneOf(members), OneOf(others)) => members.iter().all(|member| others.contains(member)),
            _ => false,
        }
    }

    fn filler_entails(&self, filler: &ClassExpression, target: &ClassExpression, depth: usize) -> bool {
        if *target == ClassExpression::Thing || filler == target {
            return true;
        }
        match filler.as_named() {
            Some(class) => self.entails(&class, target, depth + 1),
            None => self.expression_subsumes(filler, target, depth + 1),
        }
    }

    /// `sub ⊑ sup` between property expressions
    pub fn property_entails(&self, sub: &PropertyExpression, sup: &PropertyExpression) -> bool {
        let (sub_iri, sub_inverted) = sub.named();
        let (sup_iri, sup_inverted) = sup.named();
        let hierarchy = self.property_hierarchy(sub_iri);

        if sub_inverted == sup_inverted {
            hierarchy.is_sub(sub_iri, sup_iri)
        } else {
            self.inverses(sup_iri)
                .iter()
                .any(|inverse| hierarchy.is_sub(sub_iri, inverse))
        }
    }

    pub fn property_hierarchy(&self, property: &OwlIri) -> &Hierarchy {
        if self.data_properties.contains(property) {
            &self.data_properties
        } else {
            &self.object_properties
        }
    }

    pub fn is_satisfiable(&self, class: &OwlIri) -> bool {
        !self.unsatisfiable.contains(class)
    }

    /// Complex necessary conditions asserted on a named class
    pub fn told_supers(&self, class: &OwlIri) -> impl Iterator<Item = &ClassExpression> {
        self.told_supers.get(class).into_iter().flatten()
    }

    pub fn definitions(&self) -> &[(ClassExpression, OwlIri)] {
        &self.definitions
    }

    pub fn domains(&self, property: &OwlIri) -> &[ClassExpression] {
        self.domains.get(property).map_or(&[], Vec::as_slice)
    }

    pub fn ranges(&self, property: &OwlIri) -> &[ClassExpression] {
        self.ranges.get(property).map_or(&[], Vec::as_slice)
    }

    pub fn told_disjoint(&self, class: &OwlIri) -> Option<&BTreeSet<OwlIri>> {
        self.disjoint.get(class)
    }

    pub fn are_disjoint(&self, a: &OwlIri, b: &OwlIri) -> bool {
        if !self.classes.contains(a) || !self.classes.contains(b) {
            return false;
        }
        if self.unsatisfiable.contains(a) || self.unsatisfiable.contains(b) {
            return true;
        }
        let b_supers = self.classes.supers(b);
        self.classes.supers(a).iter().any(|sup| {
            self.disjoint
                .get(sup)
                .map_or(false, |disjoint| disjoint.iter().any(|d| b_supers.contains(d)))
        })
    }

    pub fn are_complements(&self, a: &OwlIri, b: &OwlIri) -> bool {
        let thing = OwlIri::thing();
        let nothing = OwlIri::nothing();
        let a_equivalents = self.classes.equivalents(a);
        let b_equivalents = self.classes.equivalents(b);

        if (a_equivalents.contains(&thing) && b_equivalents.contains(&nothing))
            || (a_equivalents.contains(&nothing) && b_equivalents.contains(&thing))
        {
            return true;
        }

        a_equivalents.iter().any(|x| {
            self.complements
                .get(x)
                .map_or(false, |complements| complements.iter().any(|y| b_equivalents.contains(y)))
        })
    }

    pub fn inverses(&self, property: &OwlIri) -> BTreeSet<OwlIri> {
        let mut inverses = self.inverses.get(property).cloned().unwrap_or_default();
        if self.has_told_characteristic(property, PropertyCharacteristic::Symmetric) {
            inverses.extend(self.object_properties.equivalents(property));
        }
        inverses
    }

    fn has_told_characteristic(&self, property: &OwlIri, characteristic: PropertyCharacteristic) -> bool {
        self.property_hierarchy(property)
            .equivalents(property)
            .iter()
            .chain(std::iter::once(property))
            .any(|p| {
                self.characteristics
                    .get(p)
                    .map_or(false, |characteristics| characteristics.contains(&characteristic))
            })
    }

    pub fn has_characteristic(&self, property: &OwlIri, characteristic: PropertyCharacteristic) -> bool {
        if self.has_told_characteristic(property, characteristic) {
            return true;
        }
        let inverses = self.inverses.get(property);
        match characteristic {
            // a property that is its own inverse
            PropertyCharacteristic::Symmetric => inverses.map_or(false, |inverses| inverses.contains(property)),
            PropertyCharacteristic::Functional => inverses.map_or(false, |inverses| {
                inverses
                    .iter()
                    .any(|q| self.has_told_characteristic(q, PropertyCharacteristic::InverseFunctional))
            }),
            PropertyCharacteristic::InverseFunctional => inverses.map_or(false, |inverses| {
                inverses
                    .iter()
                    .any(|q| self.has_told_characteristic(q, PropertyCharacteristic::Functional))
            }),
            PropertyCharacteristic::Transitive
            | PropertyCharacteristic::Asymmetric
            | PropertyCharacteristic::Reflexive
            | PropertyCharacteristic::Irreflexive => inverses.map_or(false, |inverses| {
                inverses.iter().any(|q| self.has_told_characteristic(q, characteristic))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Individual;

    fn iri(local: &str) -> OwlIri {
        OwlIri::new(format!("http://example.org/{}", local))
    }

    fn named(local: &str) -> ClassExpression {
        ClassExpression::Named(iri(local))
    }

    fn object(local: &str) -> PropertyExpression {
        PropertyExpression::ObjectProperty(iri(local))
    }

    fn ontology(axioms: Vec<Axiom>) -> Ontology {
        let mut ontology = Ontology::new();
        for axiom in axioms {
            ontology.add_axiom(axiom);
        }
        ontology
    }

    #[test]
    fn test_hierarchy_closure_and_direct() {
        let mut hierarchy = Hierarchy::new([iri("A"), iri("B"), iri("C"), iri("D")]);
        hierarchy.add_edge(&iri("A"), &iri("B"));
        hierarchy.add_edge(&iri("B"), &iri("C"));
        hierarchy.add_edge(&iri("D"), &iri("B"));
        hierarchy.add_edge(&iri("B"), &iri("D"));
        hierarchy.close();

        assert!(hierarchy.is_sub(&iri("A"), &iri("C")));
        assert!(hierarchy.is_sub(&iri("A"), &iri("A")));
        assert_eq!(hierarchy.equivalents(&iri("B")), BTreeSet::from([iri("B"), iri("D")]));
        assert_eq!(hierarchy.direct_supers(&iri("A")), BTreeSet::from([iri("B"), iri("D")]));
        assert_eq!(hierarchy.direct_supers(&iri("B")), BTreeSet::from([iri("C")]));
        assert_eq!(hierarchy.direct_subs(&iri("C")), BTreeSet::from([iri("B"), iri("D")]));
        assert!(hierarchy.subs(&iri("unknown")).is_empty());
    }

    #[test]
    fn test_told_hierarchy_and_thing() {
        let taxonomy = Taxonomy::build(&ontology(vec![
            Axiom::SubClassOf(named("Student"), named("Person")),
            Axiom::EquivalentClasses(vec![named("Person"), named("Human")]),
        ]));

        assert!(taxonomy.classes.is_sub(&iri("Student"), &iri("Human")));
        assert!(taxonomy.classes.is_sub(&iri("Student"), &OwlIri::thing()));
        assert!(taxonomy.classes.is_sub(&OwlIri::nothing(), &iri("Student")));
        assert_eq!(
            taxonomy.classes.direct_supers(&iri("Student")),
            BTreeSet::from([iri("Human"), iri("Person")])
        );
    }

    #[test]
    fn test_defined_class_classification() {
        // Parent ≡ Person ⊓ ∃hasChild.Person ; Mother ⊑ Woman, Woman ⊑ Person, Mother ⊑ ∃hasChild.Person
        let has_child_person = ClassExpression::SomeValuesFrom {
            property: object("hasChild"),
            class: Box::new(named("Person")),
        };
        let taxonomy = Taxonomy::build(&ontology(vec![
            Axiom::EquivalentClasses(vec![
                named("Parent"),
                ClassExpression::IntersectionOf(vec![named("Person"), has_child_person.clone()]),
            ]),
            Axiom::SubClassOf(named("Woman"), named("Person")),
            Axiom::SubClassOf(named("Mother"), named("Woman")),
            Axiom::SubClassOf(named("Mother"), has_child_person),
        ]));

        assert!(taxonomy.classes.is_sub(&iri("Mother"), &iri("Parent")));
        assert!(taxonomy.classes.is_sub(&iri("Parent"), &iri("Person")));
        assert!(!taxonomy.classes.is_sub(&iri("Woman"), &iri("Parent")));
    }

    #[test]
    fn test_union_definition() {
        let taxonomy = Taxonomy::build(&ontology(vec![Axiom::EquivalentClasses(vec![
            named("Pet"),
            ClassExpression::UnionOf(vec![named("Cat"), named("Dog")]),
        ])]));

        assert!(taxonomy.classes.is_sub(&iri("Cat"), &iri("Pet")));
        assert!(taxonomy.classes.is_sub(&iri("Dog"), &iri("Pet")));
        assert!(!taxonomy.classes.is_sub(&iri("Pet"), &iri("Cat")));
    }

    #[test]
    fn test_unsatisfiable_class() {
        let taxonomy = Taxonomy::build(&ontology(vec![
            Axiom::DisjointClasses(vec![named("Cat"), named("Dog")]),
            Axiom::SubClassOf(named("CatDog"), named("Cat")),
            Axiom::SubClassOf(named("CatDog"), named("Dog")),
        ]));

        assert!(!taxonomy.is_satisfiable(&iri("CatDog")));
        assert!(taxonomy.classes.is_sub(&iri("CatDog"), &OwlIri::nothing()));
        assert!(taxonomy.classes.equivalents(&OwlIri::nothing()).contains(&iri("CatDog")));
        assert!(taxonomy.are_disjoint(&iri("Cat"), &iri("Dog")));
        assert!(taxonomy.is_satisfiable(&iri("Cat")));
    }

    #[test]
    fn test_disjointness_is_inherited() {
        let taxonomy = Taxonomy::build(&ontology(vec![
            Axiom::DisjointClasses(vec![named("Animal"), named("Plant")]),
            Axiom::SubClassOf(named("Cat"), named("Animal")),
            Axiom::SubClassOf(named("Tree"), named("Plant")),
        ]));

        assert!(taxonomy.are_disjoint(&iri("Cat"), &iri("Tree")));
        assert!(!taxonomy.are_disjoint(&iri("Cat"), &iri("Animal")));
    }

    #[test]
    fn test_complements() {
        let taxonomy = Taxonomy::build(&ontology(vec![Axiom::EquivalentClasses(vec![
            named("Dead"),
            ClassExpression::ComplementOf(Box::new(named("Alive"))),
        ])]));

        assert!(taxonomy.are_complements(&iri("Dead"), &iri("Alive")));
        assert!(taxonomy.are_complements(&iri("Alive"), &iri("Dead")));
        assert!(taxonomy.are_disjoint(&iri("Dead"), &iri("Alive")));
        assert!(taxonomy.are_complements(&OwlIri::thing(), &OwlIri::nothing()));
    }

    #[test]
    fn test_property_hierarchy_and_inverses() {
        let taxonomy = Taxonomy::build(&ontology(vec![
            Axiom::SubPropertyOf(object("hasSon"), object("hasChild")),
            Axiom::InverseProperties(iri("hasChild"), iri("hasParent")),
            Axiom::InverseProperties(iri("hasSon"), iri("hasSonParent")),
            Axiom::PropertyCharacteristic(object("knows"), PropertyCharacteristic::Symmetric),
            Axiom::PropertyCharacteristic(
                PropertyExpression::InverseOf(Box::new(object("hasParent"))),
                PropertyCharacteristic::Functional,
            ),
        ]));

        assert!(taxonomy.object_properties.is_sub(&iri("hasSon"), &iri("hasChild")));
        assert!(taxonomy.object_properties.is_sub(&iri("hasSonParent"), &iri("hasParent")));
        assert_eq!(taxonomy.inverses(&iri("hasChild")), BTreeSet::from([iri("hasParent")]));
        assert!(taxonomy.inverses(&iri("knows")).contains(&iri("knows")));
        assert!(taxonomy.has_characteristic(&iri("knows"), PropertyCharacteristic::Symmetric));
        assert!(taxonomy.has_characteristic(&iri("hasParent"), PropertyCharacteristic::InverseFunctional));
        assert!(taxonomy.has_characteristic(&iri("hasChild"), PropertyCharacteristic::Functional));
    }

    #[test]
    fn test_domains_and_ranges_of_inverse() {
        let taxonomy = Taxonomy::build(&ontology(vec![
            Axiom::PropertyDomain(object("teaches"), named("Teacher")),
            Axiom::PropertyRange(
                PropertyExpression::InverseOf(Box::new(object("attends"))),
                named("Student"),
            ),
            Axiom::ClassAssertion(named("Teacher"), Individual::new("http://example.org/bob")),
        ]));

        assert_eq!(taxonomy.domains(&iri("teaches")), &[named("Teacher")]);
        assert_eq!(taxonomy.domains(&iri("attends")), &[named("Student")]);
        assert!(taxonomy.ranges(&iri("teaches")).is_empty());
    }
}
