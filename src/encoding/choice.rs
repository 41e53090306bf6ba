/*!
Binary encodings of a choice among alternatives.

A choice among `n` alternatives uses ⌈log₂ n⌉ fresh propositions, read as the bits of the index of the chosen alternative.
The pattern of an index is the conjunction of literals fixing each bit to the value of that bit in the index, and so exactly one pattern is true on any valuation.
When `n` is not a power of two the patterns of indices `n` and above are excluded by clauses.

A choice among a single alternative has no bits, and the empty pattern.
*/

use crate::{
    encoding::proposition::{Proposition, PropositionDB},
    structures::{
        clause::CClause,
        literal::{CLiteral, Literal, LiteralId},
    },
};

#[derive(Clone, Debug)]
pub struct Choice {
    /// The number of alternatives.
    size: usize,

    /// Ids of the bit propositions, least significant first.
    bits: Vec<LiteralId>,
}

impl Choice {
    /// A choice among `size` alternatives, with bit propositions tagged by `choice`.
    pub fn new(size: usize, choice: u32, propositions: &mut PropositionDB) -> Self {
        let bits = (0..Choice::bit_width(size))
            .map(|bit| propositions.id(Proposition::Choice { choice, bit }))
            .collect();
        Choice { size, bits }
    }

    /// ⌈log₂ size⌉, with no bits for at most one alternative.
    pub fn bit_width(size: usize) -> u32 {
        match size {
            0 | 1 => 0,
            _ => usize::BITS - (size - 1).leading_zeros(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bits(&self) -> &[LiteralId] {
        &self.bits
    }

    /// The pattern of alternative `index`, as literals.
    pub fn pattern(&self, index: usize) -> Vec<CLiteral> {
        self.bits
            .iter()
            .enumerate()
            .map(|(bit, id)| CLiteral::new(*id, (index >> bit) & 1 == 1))
            .collect()
    }

    /// The negation of the pattern of alternative `index`, to guard a clause with.
    pub fn guard(&self, index: usize) -> Vec<CLiteral> {
        self.pattern(index)
            .into_iter()
            .map(|literal| literal.negate())
            .collect()
    }

    /// Clauses excluding the patterns of indices beyond the alternatives.
    pub fn exclusions(&self) -> impl Iterator<Item = CClause> + '_ {
        (self.size..(1 << self.bits.len())).map(|index| self.guard(index))
    }
}

#[cfg(test)]
mod choice_tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(Choice::bit_width(0), 0);
        assert_eq!(Choice::bit_width(1), 0);
        assert_eq!(Choice::bit_width(2), 1);
        assert_eq!(Choice::bit_width(3), 2);
        assert_eq!(Choice::bit_width(4), 2);
        assert_eq!(Choice::bit_width(5), 3);
        assert_eq!(Choice::bit_width(8), 3);
        assert_eq!(Choice::bit_width(9), 4);
    }

    #[test]
    fn patterns_and_exclusions() {
        let mut propositions = PropositionDB::default();
        let choice = Choice::new(3, 0, &mut propositions);
        assert_eq!(choice.bits(), &[1, 2]);

        assert_eq!(choice.pattern(0), vec![-1, -2]);
        assert_eq!(choice.pattern(1), vec![1, -2]);
        assert_eq!(choice.pattern(2), vec![-1, 2]);
        assert_eq!(choice.guard(2), vec![1, -2]);

        let exclusions = choice.exclusions().collect::<Vec<_>>();
        assert_eq!(exclusions, vec![vec![-1, -2]]);
    }

    #[test]
    fn exactly_the_alternatives_survive() {
        // The bit with id `i` takes bit `i - 1` of an assignment.
        fn value(literal: CLiteral, assignment: usize) -> bool {
            ((assignment >> (literal.id() - 1)) & 1 == 1) == literal.polarity()
        }

        for size in 1..=17 {
            let mut propositions = PropositionDB::default();
            let choice = Choice::new(size, 0, &mut propositions);
            let width = choice.bits().len();
            assert_eq!(width as u32, Choice::bit_width(size));

            let exclusions = choice.exclusions().collect::<Vec<_>>();
            assert_eq!(exclusions.len(), (1 << width) - size);

            let survivors = (0..1usize << width)
                .filter(|&assignment| {
                    exclusions
                        .iter()
                        .all(|clause| clause.iter().any(|&literal| value(literal, assignment)))
                })
                .collect::<Vec<_>>();
            assert_eq!(survivors, (0..size).collect::<Vec<_>>());

            for index in 0..size {
                let matching = (0..1usize << width)
                    .filter(|&assignment| {
                        choice
                            .pattern(index)
                            .iter()
                            .all(|&literal| value(literal, assignment))
                    })
                    .collect::<Vec<_>>();
                assert_eq!(matching, vec![index]);
            }
        }
    }

    #[test]
    fn single_alternative() {
        let mut propositions = PropositionDB::default();
        let choice = Choice::new(1, 0, &mut propositions);
        assert!(choice.pattern(0).is_empty());
        assert_eq!(choice.exclusions().count(), 0);
        assert_eq!(propositions.count(), 0);
    }
}
