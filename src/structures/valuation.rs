/*!
A (partial) function from propositions to truth values.

The canonical representation of a valuation is a vector of optional booleans, where each non-zero index is interpreted as the id of a proposition.
The trait is implemented for anything which can be dereferenced to a slice of optional booleans.
The zero index is unused, as `0` is not the id of any proposition.

```rust
# use otter_uel::structures::valuation::Valuation;
let valuation = vec![None, Some(true), None, Some(false)];

assert_eq!(valuation.value_of(1), Some(Some(true)));
assert_eq!(valuation.value_of(4), None);
assert_eq!(valuation.true_ids().collect::<Vec<_>>(), vec![1]);
assert_eq!(valuation.unvalued_ids().collect::<Vec<_>>(), vec![2]);
```
*/

use super::literal::LiteralId;

/// The valuation trait.
pub trait Valuation {
    /// Some(v) if the id is in the domain of the valuation, with v its optional value, and None otherwise.
    fn value_of(&self, id: LiteralId) -> Option<Option<bool>>;

    /// The ids which are valued true, in order.
    fn true_ids(&self) -> impl Iterator<Item = LiteralId>;

    /// The ids without a value, in order.
    fn unvalued_ids(&self) -> impl Iterator<Item = LiteralId>;
}

impl<T: std::ops::Deref<Target = [Option<bool>]>> Valuation for T {
    fn value_of(&self, id: LiteralId) -> Option<Option<bool>> {
        match id {
            0 => None,
            _ => self.get(id as usize).copied(),
        }
    }

    fn true_ids(&self) -> impl Iterator<Item = LiteralId> {
        self.iter()
            .enumerate()
            .skip(1)
            .filter(|(_, value)| **value == Some(true))
            .map(|(id, _)| id as LiteralId)
    }

    fn unvalued_ids(&self) -> impl Iterator<Item = LiteralId> {
        self.iter()
            .enumerate()
            .skip(1)
            .filter(|(_, value)| value.is_none())
            .map(|(id, _)| id as LiteralId)
    }
}
