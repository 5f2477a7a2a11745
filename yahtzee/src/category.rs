use std::iter::FusedIterator;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bitset::bitset_traits;
use crate::IllegalAction;

/// The number of scoring categories on a card.
pub const NUM_CATEGORIES: usize = 13;

/// One of the thirteen scoring rules a roll can be committed to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Chance,
    Yahtzee,
}

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Category; NUM_CATEGORIES] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Chance,
        Category::Yahtzee,
    ];

    /// Looks up a category by its 1-based menu number.
    pub fn from_number(number: usize) -> Result<Self, IllegalAction> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
            .ok_or(IllegalAction::InvalidCategory { number })
    }

    /// The 1-based menu number.
    pub fn number(self) -> usize {
        self.to_index() + 1
    }

    pub(crate) fn to_index(self) -> usize {
        self as usize
    }

    /// For the numbered categories (Ones to Sixes), the face value that counts.
    pub fn face(self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Ones => "Ones",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "Three-of-a-kind",
            Category::FourOfAKind => "Four-of-a-kind",
            Category::FullHouse => "Full house",
            Category::SmallStraight => "Small straight",
            Category::LargeStraight => "Large straight",
            Category::Chance => "Chance",
            Category::Yahtzee => "Yahtzee",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The error type for the [`FromStr`] instance of [`Category`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryFromStrErr {
    Empty,
    InvalidNumber(IllegalAction),
    UnknownName { name: String },
}

impl std::error::Error for CategoryFromStrErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CategoryFromStrErr::InvalidNumber(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for CategoryFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFromStrErr::Empty => write!(f, "No category was given"),
            CategoryFromStrErr::InvalidNumber(err) => write!(f, "{}", err),
            CategoryFromStrErr::UnknownName { name } => {
                write!(f, "There is no category called '{}'", name)
            }
        }
    }
}

impl FromStr for Category {
    type Err = CategoryFromStrErr;

    /// Accepts a menu number (`"9"`) or a name, ignoring case, spaces,
    /// dashes and underscores (`"full house"`, `"FullHouse"`, `"full_house"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CategoryFromStrErr::Empty);
        }
        if let Ok(number) = s.parse::<usize>() {
            return Category::from_number(number).map_err(CategoryFromStrErr::InvalidNumber);
        }
        let normalize = |name: &str| -> String {
            name.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect()
        };
        let wanted = normalize(s);
        Category::ALL
            .into_iter()
            .find(|category| normalize(category.name()) == wanted)
            .ok_or_else(|| CategoryFromStrErr::UnknownName {
                name: String::from(s),
            })
    }
}

/// A compact set of [`Category`]s.
///
/// Allows intersection/union/xor with other such sets via bitwise ops, and
/// iterates in menu order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategorySet {
    // Only the low 13 bits are used.
    pub(crate) bits: u16,
}

const VALID_BITS: u16 = 0b1_1111_1111_1111;

bitset_traits!(CategorySet, VALID_BITS);

impl CategorySet {
    /// Contains every category.
    pub const ALL: CategorySet = CategorySet { bits: VALID_BITS };

    pub fn contains(self, category: Category) -> bool {
        (self.bits & (1u16 << category.to_index())) != 0
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, category: Category) -> Self {
        Self {
            bits: self.bits | (1u16 << category.to_index()),
        }
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn remove(self, category: Category) -> Self {
        Self {
            bits: self.bits & !(1u16 << category.to_index()),
        }
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<T: IntoIterator<Item = Category>>(iter: T) -> Self {
        let mut bits = 0;
        for category in iter {
            bits |= 1u16 << category.to_index();
        }
        Self { bits }
    }
}

impl IntoIterator for CategorySet {
    type Item = Category;

    type IntoIter = CategorySetIter;

    fn into_iter(self) -> Self::IntoIter {
        CategorySetIter { bits: self.bits }
    }
}

/// Iterator for a [`CategorySet`] that returns categories in menu order.
#[derive(Clone, Copy, Debug)]
pub struct CategorySetIter {
    bits: u16,
}

impl Iterator for CategorySetIter {
    type Item = Category;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let idx = self.bits.trailing_zeros() as usize;
            self.bits ^= 1u16 << idx;
            Some(Category::ALL[idx])
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for CategorySetIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for CategorySetIter {}
