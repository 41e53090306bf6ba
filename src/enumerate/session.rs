/*!
Enumerations behind handles.

A [Session] owns any number of enumerators, each behind an [EnumeratorKey].
Unlike [compute_next](super::UnifierEnumerator::compute_next), [has_next](Session::has_next) may be called any number of times before [next](Session::next), as the unifier found is buffered until taken.

```rust
# use otter_uel::config::Config;
# use otter_uel::db::atom::AtomDB;
# use otter_uel::enumerate::Session;
# use otter_uel::goal::{build_goal, definitions::NoDefinitions};
# use otter_uel::structures::equation::Equation;
# use otter_uel::types::err::{EnumerationError, ErrorKind};
# use std::rc::Rc;
let mut atoms = AtomDB::default();
let x = atoms.user_variable("X");
let a = atoms.constant("A");
let goal = Rc::new(build_goal(&mut atoms, [Equation::new(x, [a])], &NoDefinitions).unwrap());

let mut session = Session::default();
let key = session.initialize(&atoms, goal, &Config::default()).unwrap();

assert_eq!(session.has_next(key), Ok(true));
assert_eq!(session.has_next(key), Ok(true));
assert!(session.next(key).is_ok());
assert_eq!(session.has_next(key), Ok(false));
assert_eq!(session.next(key), Err(ErrorKind::Enumeration(EnumerationError::NoMoreUnifiers)));

session.cleanup(key).unwrap();
assert_eq!(session.cleanup(key), Err(ErrorKind::Enumeration(EnumerationError::UnknownHandle)));
```
*/

use std::rc::Rc;

use slotmap::SlotMap;

use crate::{
    config::Config,
    db::atom::AtomDB,
    enumerate::UnifierEnumerator,
    goal::Goal,
    misc::log::targets::{self},
    types::err::{self},
    unifier::Unifier,
};

slotmap::new_key_type! {
    /// The handle of an enumerator in a [Session].
    pub struct EnumeratorKey;
}

struct Entry {
    enumerator: UnifierEnumerator,

    /// A unifier found by `has_next`, not yet taken by `next`.
    buffered: Option<Unifier>,
}

#[derive(Default)]
pub struct Session {
    enumerators: SlotMap<EnumeratorKey, Entry>,
}

impl Session {
    /// Creates an enumerator for `goal`, returning its handle.
    pub fn initialize(
        &mut self,
        atoms: &AtomDB,
        goal: Rc<Goal>,
        config: &Config,
    ) -> Result<EnumeratorKey, err::ErrorKind> {
        let mut enumerator = UnifierEnumerator::new(atoms, goal, config)?;
        enumerator.initialize()?;

        let key = self.enumerators.insert(Entry {
            enumerator,
            buffered: None,
        });
        log::debug!(target: targets::ENUMERATION, "Enumerator {key:?} initialized");
        Ok(key)
    }

    /// Whether the enumerator of `key` has a further unifier.
    pub fn has_next(&mut self, key: EnumeratorKey) -> Result<bool, err::ErrorKind> {
        let entry = self.entry_mut(key)?;
        if entry.buffered.is_some() {
            return Ok(true);
        }

        if entry.enumerator.compute_next()? {
            entry.buffered = entry.enumerator.take_unifier();
        }
        Ok(entry.buffered.is_some())
    }

    /// The next unifier of the enumerator of `key`.
    pub fn next(&mut self, key: EnumeratorKey) -> Result<Unifier, err::ErrorKind> {
        self.has_next(key)?;
        self.entry_mut(key)?
            .buffered
            .take()
            .ok_or(err::ErrorKind::from(err::EnumerationError::NoMoreUnifiers))
    }

    /// Releases the enumerator of `key`, and invalidates the handle.
    pub fn cleanup(&mut self, key: EnumeratorKey) -> Result<(), err::ErrorKind> {
        match self.enumerators.remove(key) {
            Some(mut entry) => {
                entry.enumerator.cleanup();
                log::debug!(target: targets::ENUMERATION, "Enumerator {key:?} released");
                Ok(())
            }
            None => Err(err::EnumerationError::UnknownHandle.into()),
        }
    }

    pub fn enumerator(&self, key: EnumeratorKey) -> Result<&UnifierEnumerator, err::ErrorKind> {
        self.enumerators
            .get(key)
            .map(|entry| &entry.enumerator)
            .ok_or(err::EnumerationError::UnknownHandle.into())
    }

    /// A count of live enumerators.
    pub fn count(&self) -> usize {
        self.enumerators.len()
    }

    fn entry_mut(&mut self, key: EnumeratorKey) -> Result<&mut Entry, err::ErrorKind> {
        self.enumerators
            .get_mut(key)
            .ok_or(err::EnumerationError::UnknownHandle.into())
    }
}
