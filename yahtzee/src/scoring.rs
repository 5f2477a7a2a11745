//! The scoring rules of the thirteen categories.
//!
//! Everything here is a pure function of the hand. Which categories a player
//! already used never influences the result.

use serde::{Deserialize, Serialize};

use crate::{Category, Hand, NUM_CATEGORIES};

pub const FULL_HOUSE_POINTS: u32 = 25;
pub const SMALL_STRAIGHT_POINTS: u32 = 30;
pub const LARGE_STRAIGHT_POINTS: u32 = 40;
pub const YAHTZEE_POINTS: u32 = 50;
/// Credited to the bonus accumulator every time a five-of-a-kind is scored as Yahtzee.
pub const YAHTZEE_BONUS: u32 = 100;

/// What committing a hand to a category is worth.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Points recorded in the category itself.
    pub points: u32,
    /// Extra points for the bonus accumulators, outside of the category.
    pub bonus: u32,
}

/// Scores `hand` in `category`.
///
/// ```
/// # use yahtzee::{hand, score, Category, Score};
/// assert_eq!(score(hand!("44456"), Category::Fours), Score { points: 12, bonus: 0 });
/// assert_eq!(score(hand!("66666"), Category::Yahtzee), Score { points: 50, bonus: 100 });
/// ```
pub fn score(hand: Hand, category: Category) -> Score {
    let points = |condition: bool, points: u32| if condition { points } else { 0 };
    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            // Can't fail for the numbered categories
            let face = category.face().unwrap_or_default();
            Score {
                points: face as u32 * hand.face_counts()[face as usize] as u32,
                bonus: 0,
            }
        }
        Category::ThreeOfAKind => Score {
            points: points(is_three_of_a_kind(hand), hand.sum()),
            bonus: 0,
        },
        Category::FourOfAKind => Score {
            points: points(is_four_of_a_kind(hand), hand.sum()),
            bonus: 0,
        },
        Category::FullHouse => Score {
            points: points(is_full_house(hand), FULL_HOUSE_POINTS),
            bonus: 0,
        },
        Category::SmallStraight => Score {
            points: points(is_small_straight(hand), SMALL_STRAIGHT_POINTS),
            bonus: 0,
        },
        Category::LargeStraight => Score {
            points: points(is_large_straight(hand), LARGE_STRAIGHT_POINTS),
            bonus: 0,
        },
        Category::Chance => Score {
            points: hand.sum(),
            bonus: 0,
        },
        Category::Yahtzee => {
            let yahtzee = is_yahtzee(hand);
            Score {
                points: points(yahtzee, YAHTZEE_POINTS),
                bonus: points(yahtzee, YAHTZEE_BONUS),
            }
        }
    }
}

/// The points (without bonus) every category would award for `hand`, in menu order.
pub fn scores_for_hand(hand: Hand) -> [u32; NUM_CATEGORIES] {
    Category::ALL.map(|category| score(hand, category).points)
}

fn max_count(hand: Hand) -> u8 {
    hand.face_counts().into_iter().max().unwrap_or(0)
}

/// At least three dice show the same face.
pub fn is_three_of_a_kind(hand: Hand) -> bool {
    max_count(hand) >= 3
}

/// At least four dice show the same face.
pub fn is_four_of_a_kind(hand: Hand) -> bool {
    max_count(hand) >= 4
}

/// Exactly three of one face and two of another.
///
/// Five of a kind is *not* a full house.
pub fn is_full_house(hand: Hand) -> bool {
    let counts = hand.face_counts();
    counts.contains(&3) && counts.contains(&2)
}

/// Four consecutive faces are present, i.e. one of {1,2,3,4}, {2,3,4,5} or
/// {3,4,5,6}. The fifth die can be anything.
pub fn is_small_straight(hand: Hand) -> bool {
    let counts = hand.face_counts();
    (1..=3).any(|low| (low..low + 4).all(|face| counts[face] > 0))
}

/// The five dice are 1 to 5 or 2 to 6.
pub fn is_large_straight(hand: Hand) -> bool {
    matches!(hand.sorted(), [1, 2, 3, 4, 5] | [2, 3, 4, 5, 6])
}

/// All five dice show the same face.
pub fn is_yahtzee(hand: Hand) -> bool {
    max_count(hand) == 5
}
