use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DiceSelection, DiceSource};

/// The number of dice in a [`Hand`].
pub const NUM_DICE: usize = 5;

/// The face values of the five dice during one turn.
///
/// Every face is in `1..=6`. The order of the dice is significant, because
/// dice are addressed by their position when choosing which ones to reroll.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 5]", into = "[u8; 5]")]
pub struct Hand([u8; NUM_DICE]);

impl Hand {
    /// Creates a hand from five face values.
    ///
    /// Panics if a face is outside of `1..=6`.
    pub fn new(faces: [u8; NUM_DICE]) -> Self {
        assert!(
            faces.iter().all(|face| (1..=6).contains(face)),
            "Die faces must be in 1..=6, got {:?}",
            faces
        );
        Self(faces)
    }

    /// Rolls all five dice.
    pub fn roll<D: DiceSource + ?Sized>(dice: &mut D) -> Self {
        let mut faces = [0; NUM_DICE];
        for face in faces.iter_mut() {
            *face = dice.roll_die();
        }
        Self::new(faces)
    }

    /// Returns a new hand where the selected positions got a fresh roll and
    /// all other dice are kept.
    #[must_use]
    pub fn reroll<D: DiceSource + ?Sized>(self, selection: DiceSelection, dice: &mut D) -> Self {
        let mut faces = self.0;
        for pos in selection {
            faces[pos] = dice.roll_die();
        }
        Self::new(faces)
    }

    pub fn faces(self) -> [u8; NUM_DICE] {
        self.0
    }

    /// The faces in ascending order.
    pub fn sorted(self) -> [u8; NUM_DICE] {
        let mut faces = self.0;
        faces.sort_unstable();
        faces
    }

    /// How often each face occurs, indexed by the face value.
    ///
    /// Index 0 is always zero.
    pub fn face_counts(self) -> [u8; 7] {
        let mut counts = [0; 7];
        for face in self.0 {
            counts[face as usize] += 1;
        }
        counts
    }

    pub fn sum(self) -> u32 {
        self.0.iter().map(|&face| face as u32).sum()
    }

    /// Render this hand as Unicode die faces, one character per die.
    pub fn unicode_string(self) -> String {
        self.0.iter().map(|&face| die_char(face)).collect()
    }
}

/// The Unicode character for a single die face, e.g. `⚂` for 3.
pub fn die_char(face: u8) -> char {
    // https://en.wikipedia.org/wiki/Miscellaneous_Symbols (U+2680..U+2685)
    debug_assert!((1..=6).contains(&face));
    char::from_u32(0x2680 + face as u32 - 1).unwrap_or('?')
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e] = self.0;
        write!(f, "[{}, {}, {}, {}, {}]", a, b, c, d, e)
    }
}

impl From<Hand> for [u8; NUM_DICE] {
    fn from(hand: Hand) -> Self {
        hand.0
    }
}

/// The error type for conversions into a [`Hand`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandFromStrErr {
    WrongNumberOfDice { found: usize },
    InvalidFace { face: char },
}

impl std::error::Error for HandFromStrErr {}

impl std::fmt::Display for HandFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandFromStrErr::WrongNumberOfDice { found } => {
                write!(f, "A hand has exactly {} dice, but {} were given", NUM_DICE, found)
            }
            HandFromStrErr::InvalidFace { face } => {
                write!(f, "'{}' is not a die face between 1 and 6", face)
            }
        }
    }
}

impl TryFrom<[u8; NUM_DICE]> for Hand {
    type Error = HandFromStrErr;

    fn try_from(faces: [u8; NUM_DICE]) -> Result<Self, Self::Error> {
        match faces.iter().find(|face| !(1..=6).contains(*face)) {
            Some(&face) => Err(HandFromStrErr::InvalidFace {
                face: char::from_digit(face as u32, 10).unwrap_or('?'),
            }),
            None => Ok(Self(faces)),
        }
    }
}

impl FromStr for Hand {
    type Err = HandFromStrErr;

    /// Parses five digits. Whitespace and commas between them are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut faces = Vec::with_capacity(NUM_DICE);
        for c in s.chars() {
            if c.is_whitespace() || c == ',' {
                continue;
            }
            match c.to_digit(10) {
                Some(face @ 1..=6) => faces.push(face as u8),
                _ => return Err(HandFromStrErr::InvalidFace { face: c }),
            }
        }
        let found = faces.len();
        let faces: [u8; NUM_DICE] = faces
            .try_into()
            .map_err(|_| HandFromStrErr::WrongNumberOfDice { found })?;
        Ok(Self(faces))
    }
}

/// Shorthand for creating a hand from a string of five digits.
///
/// This macro is just calling the [`FromStr`] instance of [`Hand`].
/// ```
/// # use yahtzee::{hand, Hand};
/// assert_eq!(hand!("22333"), Hand::new([2, 2, 3, 3, 3]));
/// ```
#[macro_export]
macro_rules! hand {
    ($faces:literal) => {
        <$crate::Hand as std::str::FromStr>::from_str($faces)
            .expect("Invalid hand given to hand! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use hand;
