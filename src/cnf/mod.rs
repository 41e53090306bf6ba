/*!
A set of clauses, together with literals to minimize, as given to a [solver](crate::solver).

Clauses are normalized on addition --- literals are ordered by id and then polarity, and duplicate literals are removed --- and a clause equal to one already present is not added again.
Clauses keep their order of (first) addition, and so rendering is deterministic.

A clause set is rendered as:
- DIMACS CNF, when there is nothing to minimize.
- WCNF, where each clause of the set is hard and each literal *l* to minimize adds the soft clause `-l` of weight 1.

```rust
# use otter_uel::cnf::SatInput;
let mut input = SatInput::default();

assert_eq!(input.add_clause([2, -1]), Ok(true));
assert_eq!(input.add_clause([-1, 2, 2]), Ok(false));
assert_eq!(input.add_clause([3]), Ok(true));

assert_eq!(input.to_cnf(), "p cnf 3 2\n-1 2 0\n3 0\n");

assert_eq!(input.add_minimize_literal(2), Ok(true));
assert_eq!(input.to_wcnf(input.default_hard_weight()), "p wcnf 3 3 2\n2 -1 2 0\n2 3 0\n1 -2 0\n");
```
*/

use indexmap::IndexSet;

use crate::{
    misc::log::targets::{self},
    structures::{
        clause::{CClause, Clause},
        literal::{CLiteral, Literal, LiteralId},
    },
    types::err::{self},
};

#[derive(Clone, Debug, Default)]
pub struct SatInput {
    /// Clauses, in order of addition.
    clauses: IndexSet<CClause>,

    /// Ids of literals to minimize, in order of addition.
    minimize: IndexSet<LiteralId>,

    /// The highest id of any literal present.
    highest: LiteralId,
}

impl SatInput {
    /// Adds `clause`, returning whether the clause set grew.
    ///
    /// An empty clause, or a clause containing the reserved literal `0`, is an error.
    pub fn add_clause(
        &mut self,
        clause: impl IntoIterator<Item = CLiteral>,
    ) -> Result<bool, err::ClauseSetError> {
        let mut clause: CClause = clause.into_iter().collect();
        if clause.is_empty() {
            return Err(err::ClauseSetError::EmptyClause);
        }
        if clause.contains(&0) {
            return Err(err::ClauseSetError::ReservedLiteral);
        }

        clause.sort_unstable_by_key(|literal| (literal.id(), literal.polarity()));
        clause.dedup();

        if self.clauses.contains(&clause) {
            return Ok(false);
        }

        if let Some(highest) = clause.ids().max() {
            self.highest = self.highest.max(highest);
        }
        log::trace!(target: targets::CLAUSE_SET, "Clause {}: {}", self.clauses.len(), clause.as_dimacs(false));
        self.clauses.insert(clause);
        Ok(true)
    }

    /// Adds `id` to the literals to minimize, returning whether the literals to minimize grew.
    pub fn add_minimize_literal(&mut self, id: LiteralId) -> Result<bool, err::ClauseSetError> {
        if id == 0 {
            return Err(err::ClauseSetError::ReservedLiteral);
        }
        if !self.minimize.insert(id) {
            return Ok(false);
        }
        self.highest = self.highest.max(id);
        Ok(true)
    }

    /// Clauses, in order of addition.
    pub fn clauses(&self) -> impl ExactSizeIterator<Item = &CClause> {
        self.clauses.iter()
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    pub fn minimize_literals(&self) -> impl ExactSizeIterator<Item = &LiteralId> {
        self.minimize.iter()
    }

    /// True if there are literals to minimize.
    pub fn is_weighted(&self) -> bool {
        !self.minimize.is_empty()
    }

    /// The highest id of any literal present, or 0 if there are none.
    pub fn highest_literal(&self) -> LiteralId {
        self.highest
    }

    /// The weight of hard clauses if none is configured: one more than the count of soft clauses.
    pub fn default_hard_weight(&self) -> u64 {
        self.minimize.len() as u64 + 1
    }

    /// The clause set in DIMACS CNF form.
    pub fn to_cnf(&self) -> String {
        let mut cnf = format!("p cnf {} {}\n", self.highest, self.clauses.len());
        for clause in &self.clauses {
            cnf.push_str(&clause.as_dimacs(true));
            cnf.push('\n');
        }
        cnf
    }

    /// The clause set in WCNF form, with every clause hard at `hard_weight`.
    pub fn to_wcnf(&self, hard_weight: u64) -> String {
        let mut wcnf = format!(
            "p wcnf {} {} {hard_weight}\n",
            self.highest,
            self.clauses.len() + self.minimize.len()
        );
        for clause in &self.clauses {
            wcnf.push_str(&format!("{hard_weight} {}\n", clause.as_dimacs(true)));
        }
        for id in &self.minimize {
            wcnf.push_str(&format!("1 -{id} 0\n"));
        }
        wcnf
    }

    /// Removes all clauses and literals to minimize.
    pub fn clear(&mut self) {
        self.clauses.clear();
        self.minimize.clear();
        self.highest = 0;
    }
}

#[cfg(test)]
mod sat_input_tests {
    use super::*;

    #[test]
    fn rejects_malformed_clauses() {
        let mut input = SatInput::default();
        assert_eq!(
            input.add_clause(Vec::<CLiteral>::new()),
            Err(err::ClauseSetError::EmptyClause)
        );
        assert_eq!(
            input.add_clause([1, 0, 2]),
            Err(err::ClauseSetError::ReservedLiteral)
        );
        assert_eq!(
            input.add_minimize_literal(0),
            Err(err::ClauseSetError::ReservedLiteral)
        );
        assert_eq!(input.clause_count(), 0);
    }

    #[test]
    fn normalized_duplicates_are_ignored() {
        let mut input = SatInput::default();
        assert_eq!(input.add_clause([-3, 1, -3]), Ok(true));
        assert_eq!(input.add_clause([1, -3]), Ok(false));
        assert_eq!(input.add_clause([3, 1]), Ok(true));
        assert_eq!(
            input.clauses().cloned().collect::<Vec<_>>(),
            vec![vec![1, -3], vec![1, 3]]
        );
        assert_eq!(input.highest_literal(), 3);
    }

    #[test]
    fn minimize_literals_raise_highest() {
        let mut input = SatInput::default();
        input.add_clause([1, 2]).unwrap();
        assert_eq!(input.add_minimize_literal(7), Ok(true));
        assert_eq!(input.add_minimize_literal(7), Ok(false));
        assert!(input.is_weighted());
        assert_eq!(input.highest_literal(), 7);
        assert_eq!(input.to_wcnf(10), "p wcnf 7 2 10\n10 1 2 0\n1 -7 0\n");
    }

    #[test]
    fn clear_resets() {
        let mut input = SatInput::default();
        input.add_clause([1, 2]).unwrap();
        input.add_minimize_literal(2).unwrap();
        input.clear();
        assert_eq!(input.to_cnf(), "p cnf 0 0\n");
        assert!(!input.is_weighted());
        assert_eq!(input.add_clause([2, 1]), Ok(true));
    }
}
