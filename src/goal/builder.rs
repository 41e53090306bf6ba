use std::collections::{HashSet, VecDeque};

use indexmap::IndexSet;

use crate::{
    config::Config,
    db::atom::AtomDB,
    goal::{definitions::DefinitionProvider, flatten::flatten, Goal},
    misc::log::targets::{self},
    structures::{
        atom::{Atom, AtomId},
        concept::Concept,
        equation::{Disequation, Dissubsumption, Equation},
    },
    types::err::{self},
};

/// A builder of [goals](Goal).
///
/// Constraints are added either flat, over atoms, or as [concept terms](Concept) which are flattened on addition.
/// On [build](GoalBuilder::build) the definitions of concept names used by the goal are added, transitively.
pub struct GoalBuilder<'a> {
    atoms: &'a mut AtomDB,

    equations: Vec<Equation>,

    dissubsumptions: Vec<Dissubsumption>,

    disequations: Vec<Disequation>,

    /// The atom read as the top concept, if any.
    top: Option<AtomId>,
}

/// Atoms in order of registration, and a queue of atoms to expand.
#[derive(Default)]
struct Registry {
    atoms: IndexSet<AtomId>,
    queue: VecDeque<AtomId>,
}

impl Registry {
    fn register(&mut self, atom: AtomId) {
        if self.atoms.insert(atom) {
            self.queue.push_back(atom);
        }
    }
}

impl<'a> GoalBuilder<'a> {
    pub fn new(atoms: &'a mut AtomDB) -> Self {
        GoalBuilder {
            atoms,
            equations: Vec::default(),
            dissubsumptions: Vec::default(),
            disequations: Vec::default(),
            top: None,
        }
    }

    /// A builder with the top alias of `config`, if any.
    pub fn from_config(atoms: &'a mut AtomDB, config: &Config) -> Self {
        let mut builder = GoalBuilder::new(atoms);
        if let Some(alias) = &config.top_alias {
            builder.set_top_alias(alias);
        }
        builder
    }

    /// Reads the concept name `name` as the top concept, if the name is known.
    ///
    /// The name is then defined as the empty conjunction.
    pub fn set_top_alias(&mut self, name: &str) {
        self.top = match self.atoms.concept_id(name) {
            Ok(concept) => self.atoms.make_concept_name(concept, false).ok(),
            Err(_) => {
                log::debug!(target: targets::GOAL, "Top alias {name} is not a known concept name");
                None
            }
        };
    }

    /// The atom database of the builder, e.g. to intern atoms of a further constraint.
    pub fn atoms(&mut self) -> &mut AtomDB {
        &mut *self.atoms
    }

    /// Adds a flat equation, whose left side must be a concept name.
    pub fn add_equation(&mut self, equation: Equation) -> Result<(), err::ErrorKind> {
        if self.atoms.get(equation.left)?.is_existential() {
            return Err(err::GoalError::ExistentialLeft(equation.left).into());
        }
        for atom in &equation.right {
            self.atoms.get(*atom)?;
        }
        self.equations.push(equation);
        Ok(())
    }

    pub fn add_dissubsumption(&mut self, dissubsumption: Dissubsumption) -> Result<(), err::ErrorKind> {
        for atom in dissubsumption.atoms() {
            self.atoms.get(atom)?;
        }
        self.dissubsumptions.push(dissubsumption);
        Ok(())
    }

    pub fn add_disequation(&mut self, disequation: Disequation) -> Result<(), err::ErrorKind> {
        for atom in disequation.atoms() {
            self.atoms.get(atom)?;
        }
        self.disequations.push(disequation);
        Ok(())
    }

    /// Adds `left ≡ right`.
    ///
    /// If either side is a concept name the name is used as the left side of the flat equation, and otherwise a fresh variable is equated with both sides.
    pub fn add_term_equation(&mut self, left: &Concept, right: &Concept) -> Result<(), err::ErrorKind> {
        let mut equations = Vec::default();
        match (left.as_name(), right.as_name()) {
            (Some(name), _) => {
                let conjuncts = flatten(self.atoms, right, &mut equations)?;
                equations.push(Equation::new(name, conjuncts));
            }

            (None, Some(name)) => {
                let conjuncts = flatten(self.atoms, left, &mut equations)?;
                equations.push(Equation::new(name, conjuncts));
            }

            (None, None) => {
                let left_conjuncts = flatten(self.atoms, left, &mut equations)?;
                let right_conjuncts = flatten(self.atoms, right, &mut equations)?;
                let fresh = self.atoms.fresh_variable();
                equations.push(Equation::new(fresh, left_conjuncts));
                equations.push(Equation::new(fresh, right_conjuncts));
            }
        }
        for equation in equations {
            self.add_equation(equation)?;
        }
        Ok(())
    }

    /// Adds `left ⊑ right`, as a primitive equation.
    pub fn add_term_subsumption(&mut self, left: &Concept, right: &Concept) -> Result<(), err::ErrorKind> {
        let mut equations = Vec::default();
        let name = match left.as_name() {
            Some(name) => name,
            None => {
                let conjuncts = flatten(self.atoms, left, &mut equations)?;
                let fresh = self.atoms.fresh_variable();
                equations.push(Equation::new(fresh, conjuncts));
                fresh
            }
        };
        let conjuncts = flatten(self.atoms, right, &mut equations)?;
        equations.push(Equation::primitive(name, conjuncts));
        for equation in equations {
            self.add_equation(equation)?;
        }
        Ok(())
    }

    /// Adds `left ⋢ right`.
    pub fn add_term_dissubsumption(&mut self, left: &Concept, right: &Concept) -> Result<(), err::ErrorKind> {
        let mut equations = Vec::default();
        let left_conjuncts = flatten(self.atoms, left, &mut equations)?;
        let right_conjuncts = flatten(self.atoms, right, &mut equations)?;
        for equation in equations {
            self.add_equation(equation)?;
        }
        self.add_dissubsumption(Dissubsumption::new(left_conjuncts, right_conjuncts))
    }

    /// Adds `left ≢ right`.
    pub fn add_term_disequation(&mut self, left: &Concept, right: &Concept) -> Result<(), err::ErrorKind> {
        let mut equations = Vec::default();
        let left_conjuncts = flatten(self.atoms, left, &mut equations)?;
        let right_conjuncts = flatten(self.atoms, right, &mut equations)?;
        for equation in equations {
            self.add_equation(equation)?;
        }
        self.add_disequation(Disequation::new(left_conjuncts, right_conjuncts))
    }

    /// The goal of the constraints added, closed under the definitions of `definitions`.
    ///
    /// Atoms are registered breadth first: atoms of the given constraints in order, and then the filler of each existential restriction and the atoms of each definition, as atoms are expanded.
    /// A primitive definition `A ⊑ C` is added as `A ≡ C ⊓ A_UNDEF`.
    /// Defined concept names are variables of the goal.
    pub fn build(self, definitions: &dyn DefinitionProvider) -> Result<Goal, err::ErrorKind> {
        let GoalBuilder {
            atoms,
            equations: given_equations,
            dissubsumptions,
            disequations,
            top,
        } = self;

        let mut registry = Registry::default();
        let mut equations = IndexSet::new();
        let mut defined = HashSet::new();

        for equation in given_equations {
            for atom in equation.atoms() {
                registry.register(atom);
            }
            equations.insert(equation);
        }

        let dissubsumptions = dissubsumptions.into_iter().collect::<IndexSet<_>>();
        for dissubsumption in &dissubsumptions {
            for atom in dissubsumption.atoms() {
                registry.register(atom);
            }
        }

        let disequations = disequations.into_iter().collect::<IndexSet<_>>();
        for disequation in &disequations {
            for atom in disequation.atoms() {
                registry.register(atom);
            }
        }

        while let Some(atom) = registry.queue.pop_front() {
            match *atoms.get(atom)? {
                Atom::ExistentialRestriction { child, .. } => registry.register(child),

                Atom::ConceptName { .. } => {
                    let definition = if top == Some(atom) {
                        Some(Equation::new(atom, []))
                    } else if let Some(definition) = definitions.get_definition(atom) {
                        Some(Equation::new(atom, definition.right))
                    } else if let Some(definition) = definitions.get_primitive_definition(atom) {
                        let undefined = atoms.make_undefined_variant(atom, false)?;
                        let mut right = definition.right;
                        right.insert(undefined);
                        Some(Equation::new(atom, right))
                    } else {
                        None
                    };

                    if let Some(definition) = definition {
                        log::trace!(target: targets::GOAL, "Definition of {atom}: {:?}", definition.right);
                        defined.insert(atom);
                        for conjunct in &definition.right {
                            atoms.get(*conjunct)?;
                            registry.register(*conjunct);
                        }
                        equations.insert(definition);
                    }
                }
            }
        }

        let mut goal = Goal {
            equations: equations.into_iter().collect(),
            dissubsumptions: dissubsumptions.into_iter().collect(),
            disequations: disequations.into_iter().collect(),
            top: top.filter(|top| registry.atoms.contains(top)),
            ..Default::default()
        };

        let mut existentials = Vec::default();
        for &atom in &registry.atoms {
            match *atoms.get(atom)? {
                Atom::ConceptName {
                    variable,
                    user_variable,
                    ..
                } => {
                    if variable || defined.contains(&atom) {
                        goal.variables.push(atom);
                        goal.variable_set.insert(atom);
                        if user_variable {
                            goal.user_variables.push(atom);
                            goal.user_variable_set.insert(atom);
                        }
                    } else {
                        goal.constants.push(atom);
                    }
                }

                Atom::ExistentialRestriction { child, .. } => {
                    existentials.push(atom);
                    goal.children.insert(atom, child);
                }
            }
        }
        goal.nonvariables = goal.constants.clone();
        goal.nonvariables.extend(existentials.iter().copied());
        goal.existentials = existentials;
        goal.atoms = registry.atoms.into_iter().collect();

        log::debug!(target: targets::GOAL,
            "Goal with {} equations, {} variables ({} user), {} constants, {} existential restrictions",
            goal.equations.len(),
            goal.variables.len(),
            goal.user_variables.len(),
            goal.constants.len(),
            goal.existentials.len());

        Ok(goal)
    }
}

/// The goal of `equations`, closed under the definitions of `definitions`.
pub fn build_goal(
    atoms: &mut AtomDB,
    equations: impl IntoIterator<Item = Equation>,
    definitions: &dyn DefinitionProvider,
) -> Result<Goal, err::ErrorKind> {
    let mut builder = GoalBuilder::new(atoms);
    for equation in equations {
        builder.add_equation(equation)?;
    }
    builder.build(definitions)
}
