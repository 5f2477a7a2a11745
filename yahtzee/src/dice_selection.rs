use std::iter::FusedIterator;

use crate::bitset::bitset_traits;
use crate::{IllegalAction, NUM_DICE};

/// A compact set of die positions, e.g. the dice a player wants to reroll.
///
/// Positions are 0-based internally. Players address dice by 1-based
/// indices, see [`DiceSelection::from_indices()`].
///
/// ```
/// use yahtzee::DiceSelection;
/// let selection = DiceSelection::from_indices([5, 1, 5]).unwrap();
/// assert_eq!(Vec::from_iter(selection), vec![0, 4]);
/// assert_eq!(Vec::from_iter(!selection), vec![1, 2, 3]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiceSelection {
    // Only the low 5 bits are used.
    pub(crate) bits: u8,
}

const VALID_BITS: u8 = 0b11111;

bitset_traits!(DiceSelection, VALID_BITS);

impl DiceSelection {
    /// All five dice.
    pub const ALL: DiceSelection = DiceSelection { bits: VALID_BITS };

    /// Builds a selection from 1-based die indices. Duplicates are ignored.
    ///
    /// Fails on the first index outside of `1..=5`.
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Result<Self, IllegalAction> {
        let mut bits = 0;
        for index in indices {
            if !(1..=NUM_DICE).contains(&index) {
                return Err(IllegalAction::InvalidDieIndex { index });
            }
            bits |= 1u8 << (index - 1);
        }
        Ok(Self { bits })
    }

    pub fn contains(self, pos: usize) -> bool {
        pos < NUM_DICE && (self.bits & (1u8 << pos)) != 0
    }

    /// Panics if `pos` is not a valid 0-based position.
    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, pos: usize) -> Self {
        assert!(pos < NUM_DICE, "Die position {} out of range", pos);
        Self {
            bits: self.bits | (1u8 << pos),
        }
    }

    /// The 1-based indices of the selected dice, as shown to players.
    pub fn indices(self) -> Vec<usize> {
        self.into_iter().map(|pos| pos + 1).collect()
    }
}

impl FromIterator<usize> for DiceSelection {
    /// Collects 0-based positions. Panics on positions outside of `0..5`.
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        iter.into_iter()
            .fold(DiceSelection::new(), |selection, pos| selection.insert(pos))
    }
}

impl IntoIterator for DiceSelection {
    type Item = usize;

    type IntoIter = DiceSelectionIter;

    fn into_iter(self) -> Self::IntoIter {
        DiceSelectionIter { bits: self.bits }
    }
}

/// Iterator for a [`DiceSelection`] that returns 0-based positions in ascending order.
#[derive(Clone, Copy, Debug)]
pub struct DiceSelectionIter {
    bits: u8,
}

impl Iterator for DiceSelectionIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let pos = self.bits.trailing_zeros() as usize;
            self.bits ^= 1u8 << pos;
            Some(pos)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for DiceSelectionIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for DiceSelectionIter {}
