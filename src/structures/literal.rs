//! Literals are propositions paired with a (boolean) polarity.
//!
//! Propositions of the [encoding](crate::encoding) are identified by positive integers, and literals use the representation of DIMACS: an integer whose absolute value is the id of the proposition and whose sign is the polarity.
//! As such, `0` is not a literal, and is reserved as the terminator of a clause.
//!
//! ```rust
//! # use otter_uel::structures::literal::{CLiteral, Literal};
//! let literal = CLiteral::new(79, false);
//!
//! assert!(!literal.polarity());
//! assert_eq!(literal.id(), 79);
//! assert_eq!(literal.negate(), 79);
//! ```

/// The id of a proposition.
pub type LiteralId = u32;

/// The canonical representation of a literal.
pub type CLiteral = i32;

/// Something which has methods for returning a proposition id and a polarity.
pub trait Literal: std::cmp::Ord + std::hash::Hash + Copy {
    /// A fresh literal, specified by pairing an id with a boolean.
    fn new(id: LiteralId, polarity: bool) -> Self;

    /// The negation of the literal.
    fn negate(&self) -> Self;

    /// The proposition id of the literal.
    fn id(&self) -> LiteralId;

    /// The polarity of the literal.
    fn polarity(&self) -> bool;
}

impl Literal for CLiteral {
    fn new(id: LiteralId, polarity: bool) -> Self {
        match polarity {
            true => id as CLiteral,
            false => -(id as CLiteral),
        }
    }

    fn negate(&self) -> Self {
        -self
    }

    fn id(&self) -> LiteralId {
        self.unsigned_abs()
    }

    fn polarity(&self) -> bool {
        self.is_positive()
    }
}
