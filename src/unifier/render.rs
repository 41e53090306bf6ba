/*!
Rendering of unifiers, and goals, as concept definitions.

Each definition is written `(define-concept X C)`, or `(define-primitive-concept X C)` for a primitive equation, where `C` is:
- `top`, for the empty conjunction.
- The atom, for a conjunction of one atom.
- `(and C1 … Cn)`, otherwise.

An existential restriction is written `(some r C)`.
When rendering a unifier only the definitions of user variables are written, and the definition of any other variable is written in place of the variable.

Names are written as interned, unless some [ShortForms] gives a short form of the name.
*/

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::{
    db::atom::AtomDB,
    goal::Goal,
    structures::{
        atom::{Atom, AtomId},
        equation::Equation,
    },
    types::err::{self},
    unifier::Unifier,
};

/// The keyword of the top concept.
pub const TOP: &str = "top";

/// A source of short forms for names.
pub trait ShortForms {
    fn short_form(&self, name: &str) -> Option<&str>;
}

impl ShortForms for HashMap<String, String> {
    fn short_form(&self, name: &str) -> Option<&str> {
        self.get(name).map(|short| short.as_str())
    }
}

pub struct Renderer<'a> {
    atoms: &'a AtomDB,

    short_forms: Option<&'a dyn ShortForms>,
}

impl<'a> Renderer<'a> {
    pub fn new(atoms: &'a AtomDB) -> Self {
        Renderer {
            atoms,
            short_forms: None,
        }
    }

    pub fn with_short_forms(mut self, short_forms: &'a dyn ShortForms) -> Self {
        self.short_forms = Some(short_forms);
        self
    }

    /// The definitions of the user variables of `unifier`, one per line.
    pub fn render_unifier(&self, unifier: &Unifier) -> Result<String, err::ErrorKind> {
        let inline = unifier
            .equations()
            .iter()
            .map(|definition| definition.left)
            .filter(|&variable| !unifier.is_user_variable(variable))
            .collect::<HashSet<_>>();
        self.render_equations(unifier.equations(), &inline)
    }

    /// The equations of `goal`, one per line.
    pub fn render_goal(&self, goal: &Goal) -> Result<String, err::ErrorKind> {
        self.render_equations(goal.equations(), &HashSet::default())
    }

    /// The equations whose left side is not in `inline`, one per line, with the definitions of `inline` written in place.
    pub fn render_equations(
        &self,
        equations: &[Equation],
        inline: &HashSet<AtomId>,
    ) -> Result<String, err::ErrorKind> {
        let mut definitions = HashMap::new();
        for equation in equations {
            if inline.contains(&equation.left) {
                definitions.entry(equation.left).or_insert(&equation.right);
            }
        }

        let mut lines = Vec::default();
        for equation in equations {
            if inline.contains(&equation.left) {
                continue;
            }
            let keyword = match equation.is_primitive {
                true => "define-primitive-concept",
                false => "define-concept",
            };
            lines.push(format!(
                "({keyword} {} {})",
                self.concept_name(equation.left)?,
                self.render_conjunction(&equation.right, &definitions, inline)?
            ));
        }
        Ok(lines.join("\n"))
    }

    fn render_conjunction(
        &self,
        conjuncts: &BTreeSet<AtomId>,
        definitions: &HashMap<AtomId, &BTreeSet<AtomId>>,
        inline: &HashSet<AtomId>,
    ) -> Result<String, err::ErrorKind> {
        let mut parts = Vec::with_capacity(conjuncts.len());
        for &conjunct in conjuncts {
            parts.push(self.render_atom(conjunct, definitions, inline)?);
        }
        Ok(match parts.len() {
            0 => TOP.to_string(),
            1 => parts.swap_remove(0),
            _ => format!("(and {})", parts.join(" ")),
        })
    }

    fn render_atom(
        &self,
        atom: AtomId,
        definitions: &HashMap<AtomId, &BTreeSet<AtomId>>,
        inline: &HashSet<AtomId>,
    ) -> Result<String, err::ErrorKind> {
        match *self.atoms.get(atom)? {
            Atom::ConceptName { .. } if inline.contains(&atom) => match definitions.get(&atom) {
                Some(conjuncts) => self.render_conjunction(conjuncts, definitions, inline),
                None => Ok(TOP.to_string()),
            },

            Atom::ConceptName { .. } => self.concept_name(atom),

            Atom::ExistentialRestriction { role, child } => {
                let role = self.atoms.role_name(role)?;
                Ok(format!(
                    "(some {} {})",
                    self.short(role),
                    self.render_atom(child, definitions, inline)?
                ))
            }
        }
    }

    fn concept_name(&self, atom: AtomId) -> Result<String, err::ErrorKind> {
        Ok(self.short(self.atoms.atom_name(atom)?))
    }

    fn short(&self, name: &str) -> String {
        self.short_forms
            .and_then(|short_forms| short_forms.short_form(name))
            .unwrap_or(name)
            .to_string()
    }
}
