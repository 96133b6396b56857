//! A compact set of keys sampled during a single tick.

use super::KeyCode;

use ::bitvec::prelude::*;
use ::std::fmt;

/// The set of keys sampled as pressed, or left unclaimed, during one tick.
///
/// Backed by a fixed 256-bit field indexed by [`KeyCode::value`], so set
/// operations never allocate. Iteration yields keys in ascending key value,
/// which keeps traversal order deterministic regardless of the order in which
/// a platform reported its keys.
///
/// ```
/// use ::switchyard::input::keyboard::{KeyCode, KeySet};
///
/// let pressed = KeySet::from([KeyCode::Escape, KeyCode::Enter]);
/// let claimed = KeySet::from([KeyCode::Enter]);
///
/// let unclaimed = pressed.difference(&claimed);
/// assert_eq!(unclaimed, KeySet::from([KeyCode::Escape]));
/// assert!(unclaimed.is_subset(&pressed));
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KeySet {
    bits: BitArr!(for 256, in usize, Lsb0),
}

impl Default for KeySet {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySet {
    /// Constructs an empty set.
    pub const fn new() -> Self {
        Self {
            bits: BitArray::ZERO,
        }
    }

    /// Adds a key. Returns `true` if the key was not already present.
    pub fn insert(&mut self, key: KeyCode) -> bool {
        let index = key.value() as usize;
        let was_present = self.bits[index];
        self.bits.set(index, true);
        !was_present
    }

    /// Removes a key. Returns `true` if the key was present.
    pub fn remove(&mut self, key: KeyCode) -> bool {
        let index = key.value() as usize;
        let was_present = self.bits[index];
        self.bits.set(index, false);
        was_present
    }

    /// Returns `true` if the set contains the key.
    pub fn contains(&self, key: KeyCode) -> bool {
        self.bits[key.value() as usize]
    }

    /// The number of keys in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Returns `true` if no key is in the set.
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Removes every key from the set.
    pub fn clear(&mut self) {
        self.bits = BitArray::ZERO;
    }

    /// Iterates over the keys in ascending key value.
    pub fn iter(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.bits
            .iter_ones()
            .filter_map(|index| KeyCode::from_repr(index as u8))
    }

    /// Keys present in either set.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.extend(other.iter());
        out
    }

    /// Keys present in both sets.
    pub fn intersection(&self, other: &Self) -> Self {
        self.iter().filter(|key| other.contains(*key)).collect()
    }

    /// Keys present in `self` but not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        self.iter().filter(|key| !other.contains(*key)).collect()
    }

    /// Returns `true` if every key of `self` is also in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|key| other.contains(key))
    }
}

impl fmt::Debug for KeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Extend<KeyCode> for KeySet {
    fn extend<I: IntoIterator<Item = KeyCode>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<KeyCode> for KeySet {
    fn from_iter<I: IntoIterator<Item = KeyCode>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<const N: usize> From<[KeyCode; N]> for KeySet {
    fn from(keys: [KeyCode; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl From<&[KeyCode]> for KeySet {
    fn from(keys: &[KeyCode]) -> Self {
        keys.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;
    use ::strum::IntoEnumIterator;

    #[test]
    fn test_insert_and_remove() {
        let mut set = KeySet::new();
        assert!(set.is_empty());

        assert!(set.insert(KeyCode::A));
        assert!(!set.insert(KeyCode::A), "Second insert should report no change");
        assert!(set.contains(KeyCode::A));
        assert_eq!(set.len(), 1);

        assert!(set.remove(KeyCode::A));
        assert!(!set.remove(KeyCode::A));
        assert!(set.is_empty());
    }

    #[test]
    fn test_iteration_is_ordered_by_key_value() {
        let set = KeySet::from([KeyCode::Z, KeyCode::Escape, KeyCode::A, KeyCode::Enter]);
        let keys: Vec<_> = set.iter().collect();
        assert_eq!(
            keys,
            vec![KeyCode::Enter, KeyCode::Escape, KeyCode::A, KeyCode::Z]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let set: KeySet = [KeyCode::Up, KeyCode::Up, KeyCode::Down].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_set_algebra() {
        let left = KeySet::from([KeyCode::A, KeyCode::B, KeyCode::C]);
        let right = KeySet::from([KeyCode::B, KeyCode::C, KeyCode::D]);

        assert_eq!(
            left.union(&right),
            KeySet::from([KeyCode::A, KeyCode::B, KeyCode::C, KeyCode::D])
        );
        assert_eq!(
            left.intersection(&right),
            KeySet::from([KeyCode::B, KeyCode::C])
        );
        assert_eq!(left.difference(&right), KeySet::from([KeyCode::A]));
        assert!(KeySet::from([KeyCode::B]).is_subset(&left));
        assert!(!right.is_subset(&left));
        assert!(KeySet::new().is_subset(&left));
    }

    #[test]
    fn test_every_key_fits() {
        let all: KeySet = KeyCode::iter().collect();
        assert_eq!(all.len(), KeyCode::iter().count());
        assert!(KeyCode::iter().all(|key| all.contains(key)));
    }

    #[test]
    fn test_debug_lists_keys() {
        let set = KeySet::from([KeyCode::Escape, KeyCode::Enter]);
        assert_eq!(format!("{set:?}"), "{Enter, Escape}");
    }
}
