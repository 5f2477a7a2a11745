use crate::{Category, TurnPhase, MAX_PLAYERS, MIN_PLAYERS, NUM_DICE};

/// The error type for [`Game::new()`](crate::Game::new).
///
/// This is fatal: a game with this many players never starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidPlayerCount {
    pub requested: i64,
}

impl std::error::Error for InvalidPlayerCount {}

impl std::fmt::Display for InvalidPlayerCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid number of players {}, please enter a number between {} and {}",
            self.requested, MIN_PLAYERS, MAX_PLAYERS
        )
    }
}

/// The error type for a single step of a turn.
///
/// None of these change the game state. The first three are caused by bad
/// player input and the player should simply be asked again. The others mean
/// that the caller does not respect the turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalAction {
    InvalidDieIndex { index: usize },
    InvalidCategory { number: usize },
    CategoryAlreadyUsed { category: Category },
    InvalidRollCount,
    NotAllowedNow { action: &'static str, phase: TurnPhase },
    GameIsOver,
}

impl IllegalAction {
    /// Whether asking the player again can fix this.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            IllegalAction::InvalidDieIndex { .. }
                | IllegalAction::InvalidCategory { .. }
                | IllegalAction::CategoryAlreadyUsed { .. }
        )
    }
}

impl std::error::Error for IllegalAction {}

impl std::fmt::Display for IllegalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalAction::InvalidDieIndex { index } => write!(
                f,
                "There is no die number {}, dice are numbered 1 to {}",
                index, NUM_DICE
            ),
            IllegalAction::InvalidCategory { number } => write!(
                f,
                "There is no category number {}, categories are numbered 1 to {}",
                number,
                Category::ALL.len()
            ),
            IllegalAction::CategoryAlreadyUsed { category } => {
                write!(f, "The category {} has already been scored", category)
            }
            IllegalAction::InvalidRollCount => {
                write!(f, "The dice have already been rolled three times this turn")
            }
            IllegalAction::NotAllowedNow { action, phase } => {
                write!(f, "Cannot {} while {}", action, phase)
            }
            IllegalAction::GameIsOver => write!(f, "The game is already over"),
        }
    }
}
