use serde::{Deserialize, Serialize};

use crate::{Category, Hand, Score, ScoreCard};

/// Something that happened in a game, for display and for game transcripts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A player's turn begins. `turn` counts from 1 and is the same for all
    /// players in one round.
    TurnStarted { player: usize, turn: usize },
    /// The dice were rolled.
    Rolled {
        player: usize,
        /// 1 to 3.
        roll: u8,
        hand: Hand,
    },
    /// A category was filled in.
    Scored {
        player: usize,
        category: Category,
        hand: Hand,
        score: Score,
    },
    /// An input was invalid and is requested again.
    InputRejected { player: usize, reason: String },
    /// Every card is complete.
    GameEnded {
        standings: Vec<Standing>,
        winner: usize,
    },
}

/// The final line of one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: usize,
    /// Sum of the thirteen category scores.
    pub category_total: u32,
    pub yahtzee_bonus: u32,
    pub large_straight_bonus: u32,
    pub bonus_score: u32,
    /// Category scores plus bonuses; this decides the winner.
    pub total: u32,
}

impl Standing {
    pub fn new(player: usize, card: &ScoreCard) -> Self {
        Self {
            player,
            category_total: card.category_total(),
            yahtzee_bonus: card.yahtzee_bonus,
            large_straight_bonus: card.large_straight_bonus,
            bonus_score: card.bonus_score,
            total: card.total(),
        }
    }
}
