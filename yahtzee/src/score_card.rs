use serde::{Deserialize, Serialize};

use crate::{Category, CategorySet, IllegalAction, Score, NUM_CATEGORIES};

/// The record of one player: which categories are scored, with how many
/// points, plus the bonus accumulators.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    scores: [Option<u32>; NUM_CATEGORIES],
    pub yahtzee_bonus: u32,
    /// No rule credits this at the moment, it is always zero.
    pub large_straight_bonus: u32,
    /// Running total of all bonuses credited to this card.
    pub bonus_score: u32,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The points recorded for `category`, or `None` if it was not played yet.
    pub fn get(&self, category: Category) -> Option<u32> {
        self.scores[category.to_index()]
    }

    pub fn is_used(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    /// Records the score for a category and credits its bonus.
    ///
    /// The card is left untouched if the category was already scored.
    pub fn record(&mut self, category: Category, score: Score) -> Result<(), IllegalAction> {
        let slot = &mut self.scores[category.to_index()];
        if slot.is_some() {
            return Err(IllegalAction::CategoryAlreadyUsed { category });
        }
        *slot = Some(score.points);
        match category {
            Category::Yahtzee => self.yahtzee_bonus += score.bonus,
            Category::LargeStraight => self.large_straight_bonus += score.bonus,
            _ => {}
        }
        self.bonus_score += score.bonus;
        Ok(())
    }

    pub fn used_categories(&self) -> CategorySet {
        Category::ALL
            .into_iter()
            .filter(|&category| self.is_used(category))
            .collect()
    }

    pub fn available_categories(&self) -> CategorySet {
        !self.used_categories()
    }

    /// Every category holds a score.
    pub fn is_complete(&self) -> bool {
        self.scores.iter().all(Option::is_some)
    }

    /// Sum over the recorded category scores, without bonuses.
    pub fn category_total(&self) -> u32 {
        self.scores.iter().flatten().sum()
    }

    /// Category scores plus bonuses.
    pub fn total(&self) -> u32 {
        self.category_total() + self.bonus_score
    }
}
