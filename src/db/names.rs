//! A bidirectional map between names and dense ids.

use indexmap::IndexSet;

#[derive(Clone, Debug, Default)]
pub struct NameDB {
    names: IndexSet<String>,
}

impl NameDB {
    /// The id of `name`, interning the name if required.
    pub fn intern(&mut self, name: &str) -> usize {
        self.names.insert_full(name.to_string()).0
    }

    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn name_of(&self, id: usize) -> Option<&str> {
        self.names.get_index(id).map(|name| name.as_str())
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod name_db_tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let mut names = NameDB::default();
        let a = names.intern("A");
        let b = names.intern("B");
        assert_ne!(a, b);
        assert_eq!(names.intern("A"), a);
        assert_eq!(names.count(), 2);
        assert_eq!(names.name_of(b), Some("B"));
        assert_eq!(names.id_of("C"), None);
    }
}
