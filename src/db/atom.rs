/*!
The atom database.

Every atom used during unification is interned here, and identified by its id --- its index in the database.
Ids are dense, stable, and assigned in order of creation.

Interning is idempotent:
- A concept name atom is identified by its concept name alone.
  Whether the name is a variable is a property of the atom, and asking for a variable atom of a name previously interned as a constant promotes the atom to a variable.
  An atom is never demoted from a variable.
- An existential restriction is identified by its role and filler.

```rust
# use otter_uel::db::atom::AtomDB;
let mut atoms = AtomDB::default();
let a = atoms.constant("A");
let r_a = atoms.existential("r", a).unwrap();

assert_eq!(atoms.existential("r", a), Ok(r_a));
assert_eq!(atoms.atom_string(r_a).unwrap(), "(some r A)");

assert!(!atoms.get(a).unwrap().is_variable());
assert_eq!(atoms.variable("A"), a);
assert!(atoms.get(a).unwrap().is_variable());
```

Besides atoms over names given by a user, the database creates:
- Fresh auxiliary variables, used to name nested concept terms when [flattening](crate::goal::flatten).
- Undefined variants of a concept name `A`, written `A_UNDEF`, used to express the primitive definition `A ⊑ C` as the full definition `A ≡ C ⊓ A_UNDEF`.
*/

use indexmap::IndexSet;

use crate::{
    db::names::NameDB,
    misc::log::targets::{self},
    structures::atom::{Atom, AtomId, ConceptId, RoleId},
    types::err::{self},
};

/// The suffix of the undefined variant of a concept name.
pub const UNDEF_SUFFIX: &str = "_UNDEF";

/// The prefix of fresh auxiliary variables.
pub const AUX_PREFIX: &str = "_aux";

/// The identifying part of an atom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum AtomKey {
    Concept(ConceptId),
    Existential(RoleId, AtomId),
}

/// The atom database.
#[derive(Clone, Debug, Default)]
pub struct AtomDB {
    /// Concept names, by id.
    concepts: NameDB,

    /// Role names, by id.
    roles: NameDB,

    /// The identifying part of each atom, indexed by atom id.
    keys: IndexSet<AtomKey>,

    /// Atoms, indexed by atom id.
    atoms: Vec<Atom>,

    /// A count of fresh auxiliary variables made.
    fresh_count: usize,
}

impl AtomDB {
    /// The id of the concept name `name`, interning the name if required.
    pub fn intern_concept(&mut self, name: &str) -> ConceptId {
        self.concepts.intern(name)
    }

    /// The id of the role name `name`, interning the name if required.
    pub fn intern_role(&mut self, name: &str) -> RoleId {
        self.roles.intern(name)
    }

    pub fn concept_id(&self, name: &str) -> Result<ConceptId, err::AtomDBError> {
        self.concepts
            .id_of(name)
            .ok_or_else(|| err::AtomDBError::UnknownName(name.to_string()))
    }

    pub fn role_id(&self, name: &str) -> Result<RoleId, err::AtomDBError> {
        self.roles
            .id_of(name)
            .ok_or_else(|| err::AtomDBError::UnknownName(name.to_string()))
    }

    pub fn concept_name(&self, concept: ConceptId) -> Result<&str, err::AtomDBError> {
        self.concepts
            .name_of(concept)
            .ok_or(err::AtomDBError::UnknownConcept(concept))
    }

    pub fn role_name(&self, role: RoleId) -> Result<&str, err::AtomDBError> {
        self.roles
            .name_of(role)
            .ok_or(err::AtomDBError::UnknownRole(role))
    }

    /// The atom with id `id`.
    pub fn get(&self, id: AtomId) -> Result<&Atom, err::AtomDBError> {
        self.atoms.get(id).ok_or(err::AtomDBError::UnknownAtomId(id))
    }

    /// A count of all atoms.
    pub fn count(&self) -> usize {
        self.atoms.len()
    }

    /// The atom of an interned concept name, made a variable if `variable` is set.
    pub fn make_concept_name(
        &mut self,
        concept: ConceptId,
        variable: bool,
    ) -> Result<AtomId, err::AtomDBError> {
        self.make_concept_name_atom(concept, variable, false)
    }

    /// The atom of an interned concept name, as a variable the user asks for a substitution of.
    pub fn make_user_variable(&mut self, concept: ConceptId) -> Result<AtomId, err::AtomDBError> {
        self.make_concept_name_atom(concept, true, true)
    }

    fn make_concept_name_atom(
        &mut self,
        concept: ConceptId,
        variable: bool,
        user_variable: bool,
    ) -> Result<AtomId, err::AtomDBError> {
        if concept >= self.concepts.count() {
            return Err(err::AtomDBError::UnknownConcept(concept));
        }
        Ok(self.insert_concept_name(concept, variable, user_variable))
    }

    /// Inserts the atom of `concept`, which must be interned.
    fn insert_concept_name(
        &mut self,
        concept: ConceptId,
        variable: bool,
        user_variable: bool,
    ) -> AtomId {
        let (id, fresh) = self.keys.insert_full(AtomKey::Concept(concept));
        if fresh {
            self.atoms.push(Atom::ConceptName {
                concept,
                variable,
                user_variable,
            });
            log::trace!(target: targets::ATOM_DB, "Atom {id}: concept {concept}, variable: {variable}");
            return id;
        }

        if let Some(Atom::ConceptName {
            variable: is_variable,
            user_variable: is_user_variable,
            ..
        }) = self.atoms.get_mut(id)
        {
            if variable && !*is_variable {
                log::trace!(target: targets::ATOM_DB, "Atom {id} promoted to variable");
                *is_variable = true;
            }
            if user_variable {
                *is_user_variable = true;
            }
        }
        id
    }

    /// The atom `∃role.child`, where `child` must be a concept name atom.
    pub fn make_existential(
        &mut self,
        role: RoleId,
        child: AtomId,
    ) -> Result<AtomId, err::AtomDBError> {
        if role >= self.roles.count() {
            return Err(err::AtomDBError::UnknownRole(role));
        }
        if !self.get(child)?.is_concept_name() {
            return Err(err::AtomDBError::NotConceptName(child));
        }

        let (id, fresh) = self.keys.insert_full(AtomKey::Existential(role, child));
        if fresh {
            self.atoms
                .push(Atom::ExistentialRestriction { role, child });
            log::trace!(target: targets::ATOM_DB, "Atom {id}: role {role}, child {child}");
        }
        Ok(id)
    }

    /// The atom of `A_UNDEF`, for the concept name `A` of the atom `of`.
    pub fn make_undefined_variant(
        &mut self,
        of: AtomId,
        variable: bool,
    ) -> Result<AtomId, err::AtomDBError> {
        let concept = match self.get(of)? {
            Atom::ConceptName { concept, .. } => *concept,
            Atom::ExistentialRestriction { .. } => {
                return Err(err::AtomDBError::NotConceptName(of))
            }
        };
        let name = format!("{}{UNDEF_SUFFIX}", self.concept_name(concept)?);
        let undefined = self.intern_concept(&name);
        self.make_concept_name(undefined, variable)
    }

    /// A fresh variable, not requested by the user, with a name distinct from any interned name.
    pub fn fresh_variable(&mut self) -> AtomId {
        let name = loop {
            let candidate = format!("{AUX_PREFIX}{}", self.fresh_count);
            self.fresh_count += 1;
            if self.concepts.id_of(&candidate).is_none() {
                break candidate;
            }
        };
        let concept = self.intern_concept(&name);
        self.insert_concept_name(concept, true, false)
    }

    /// Returns whether the atom is a concept name introduced by the database, rather than by a user.
    pub fn is_fresh(&self, id: AtomId) -> Result<bool, err::AtomDBError> {
        match self.get(id)? {
            Atom::ConceptName { concept, .. } => {
                Ok(self.concept_name(*concept)?.starts_with(AUX_PREFIX))
            }
            Atom::ExistentialRestriction { .. } => Ok(false),
        }
    }

    /// The name of the concept name atom `id`.
    pub fn atom_name(&self, id: AtomId) -> Result<&str, err::AtomDBError> {
        match self.get(id)? {
            Atom::ConceptName { concept, .. } => self.concept_name(*concept),
            Atom::ExistentialRestriction { .. } => Err(err::AtomDBError::NotConceptName(id)),
        }
    }

    /// A string representation of the atom `id`.
    pub fn atom_string(&self, id: AtomId) -> Result<String, err::AtomDBError> {
        match self.get(id)? {
            Atom::ConceptName { concept, .. } => Ok(self.concept_name(*concept)?.to_string()),
            Atom::ExistentialRestriction { role, child } => Ok(format!(
                "(some {} {})",
                self.role_name(*role)?,
                self.atom_name(*child)?
            )),
        }
    }
}

/// Conveniences, interning the given name.
impl AtomDB {
    /// The atom of the concept name `name`, as a constant.
    ///
    /// If `name` was previously interned as a variable, the atom remains a variable.
    pub fn constant(&mut self, name: &str) -> AtomId {
        let concept = self.intern_concept(name);
        self.insert_concept_name(concept, false, false)
    }

    /// The atom of the concept name `name`, as a variable.
    pub fn variable(&mut self, name: &str) -> AtomId {
        let concept = self.intern_concept(name);
        self.insert_concept_name(concept, true, false)
    }

    /// The atom of the concept name `name`, as a user variable.
    pub fn user_variable(&mut self, name: &str) -> AtomId {
        let concept = self.intern_concept(name);
        self.insert_concept_name(concept, true, true)
    }

    /// The atom `∃role.child`.
    pub fn existential(&mut self, role: &str, child: AtomId) -> Result<AtomId, err::AtomDBError> {
        let role = self.intern_role(role);
        self.make_existential(role, child)
    }
}

#[cfg(test)]
mod atom_db_tests {
    use super::*;

    #[test]
    fn concept_names_dedup_on_name() {
        let mut atoms = AtomDB::default();
        let a = atoms.constant("A");
        let x = atoms.user_variable("X");
        assert_ne!(a, x);
        assert_eq!(atoms.constant("A"), a);
        assert_eq!(atoms.count(), 2);

        assert!(atoms.get(x).unwrap().is_user_variable());
        assert!(atoms.get(x).unwrap().is_variable());
        assert!(!atoms.get(a).unwrap().is_variable());
    }

    #[test]
    fn variables_are_never_demoted() {
        let mut atoms = AtomDB::default();
        let x = atoms.variable("X");
        assert_eq!(atoms.constant("X"), x);
        assert!(atoms.get(x).unwrap().is_variable());
        assert!(!atoms.get(x).unwrap().is_user_variable());
    }

    #[test]
    fn existentials_dedup_on_role_and_child() {
        let mut atoms = AtomDB::default();
        let a = atoms.constant("A");
        let b = atoms.constant("B");
        let r_a = atoms.existential("r", a).unwrap();
        let s_a = atoms.existential("s", a).unwrap();
        let r_b = atoms.existential("r", b).unwrap();

        assert_ne!(r_a, s_a);
        assert_ne!(r_a, r_b);
        assert_eq!(atoms.existential("r", a), Ok(r_a));
        assert_eq!(atoms.get(r_b).unwrap().child(), Some(b));
    }

    #[test]
    fn existential_fillers_are_names() {
        let mut atoms = AtomDB::default();
        let a = atoms.constant("A");
        let r_a = atoms.existential("r", a).unwrap();
        assert_eq!(
            atoms.existential("r", r_a),
            Err(err::AtomDBError::NotConceptName(r_a))
        );
        assert_eq!(
            atoms.existential("r", 41),
            Err(err::AtomDBError::UnknownAtomId(41))
        );
        assert_eq!(
            atoms.make_existential(7, a),
            Err(err::AtomDBError::UnknownRole(7))
        );
    }

    #[test]
    fn unknown_ids() {
        let mut atoms = AtomDB::default();
        assert_eq!(atoms.get(0), Err(err::AtomDBError::UnknownAtomId(0)));
        assert_eq!(
            atoms.make_concept_name(3, false),
            Err(err::AtomDBError::UnknownConcept(3))
        );
        assert_eq!(
            atoms.concept_id("A"),
            Err(err::AtomDBError::UnknownName("A".to_string()))
        );
    }

    #[test]
    fn undefined_variants() {
        let mut atoms = AtomDB::default();
        let a = atoms.constant("A");
        let undef = atoms.make_undefined_variant(a, false).unwrap();
        assert_eq!(atoms.atom_name(undef), Ok("A_UNDEF"));
        assert_eq!(atoms.make_undefined_variant(a, false), Ok(undef));
    }

    #[test]
    fn fresh_variables_avoid_interned_names() {
        let mut atoms = AtomDB::default();
        atoms.constant("_aux0");
        let fresh = atoms.fresh_variable();
        assert_eq!(atoms.atom_name(fresh), Ok("_aux1"));
        assert!(atoms.get(fresh).unwrap().is_variable());
        assert!(!atoms.get(fresh).unwrap().is_user_variable());
        assert_eq!(atoms.is_fresh(fresh), Ok(true));
    }
}
