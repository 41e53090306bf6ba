/*!
Sources of definitions for concept names.

When a [goal](crate::goal) is built, each concept name reachable from the goal equations is checked for a definition, and any definition found is added to the goal.
Definitions are read through the [DefinitionProvider] trait, so any ontology-like store may be used.

Two implementations are provided:
- [Definitions], a map from concept name atoms to their (primitive) definitions.
- [NoDefinitions], which defines nothing.
*/

use std::collections::HashMap;

use crate::{
    misc::log::targets::{self},
    structures::{atom::AtomId, equation::Equation},
};

/// Something which may define concept names.
///
/// A definition of `A` is an equation whose left side is `A`.
/// A full definition states `A ≡ C`, and a primitive definition states `A ⊑ C`.
pub trait DefinitionProvider {
    /// The full definition of `atom`, if any.
    fn get_definition(&self, atom: AtomId) -> Option<Equation>;

    /// The primitive definition of `atom`, if any.
    fn get_primitive_definition(&self, atom: AtomId) -> Option<Equation>;

    fn has_definition(&self, atom: AtomId) -> bool {
        self.get_definition(atom).is_some()
    }

    fn has_primitive_definition(&self, atom: AtomId) -> bool {
        self.get_primitive_definition(atom).is_some()
    }
}

/// A provider with no definitions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDefinitions;

impl DefinitionProvider for NoDefinitions {
    fn get_definition(&self, _atom: AtomId) -> Option<Equation> {
        None
    }

    fn get_primitive_definition(&self, _atom: AtomId) -> Option<Equation> {
        None
    }
}

/// Ok results when adding a definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefinitionOk {
    /// The definition was added.
    Added,

    /// A definition of the concept name was already present, and the first is kept.
    Ambiguous,
}

/// Definitions held in a map, keyed by the defined atom.
#[derive(Clone, Debug, Default)]
pub struct Definitions {
    full: HashMap<AtomId, Equation>,
    primitive: HashMap<AtomId, Equation>,
}

impl Definitions {
    /// Adds `equation` as a definition of its left side, full or primitive as the equation is.
    pub fn add(&mut self, equation: Equation) -> DefinitionOk {
        let left = equation.left;
        if self.full.contains_key(&left) || self.primitive.contains_key(&left) {
            log::warn!(target: targets::GOAL, "Ambiguous definition of atom {left} ignored");
            return DefinitionOk::Ambiguous;
        }
        match equation.is_primitive {
            true => self.primitive.insert(left, equation),
            false => self.full.insert(left, equation),
        };
        DefinitionOk::Added
    }

    pub fn count(&self) -> usize {
        self.full.len() + self.primitive.len()
    }
}

impl DefinitionProvider for Definitions {
    fn get_definition(&self, atom: AtomId) -> Option<Equation> {
        self.full.get(&atom).cloned()
    }

    fn get_primitive_definition(&self, atom: AtomId) -> Option<Equation> {
        self.primitive.get(&atom).cloned()
    }
}

#[cfg(test)]
mod definition_tests {
    use super::*;

    #[test]
    fn first_definition_is_kept() {
        let mut definitions = Definitions::default();
        assert_eq!(definitions.add(Equation::new(0, [1])), DefinitionOk::Added);
        assert_eq!(
            definitions.add(Equation::primitive(0, [2])),
            DefinitionOk::Ambiguous
        );
        assert_eq!(definitions.count(), 1);
        assert_eq!(definitions.get_definition(0), Some(Equation::new(0, [1])));
        assert!(!definitions.has_primitive_definition(0));
    }
}
