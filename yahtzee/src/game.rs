use serde::{Deserialize, Serialize};

use crate::{
    score, Category, DiceSelection, DiceSource, Hand, IllegalAction, InvalidPlayerCount, Score,
    ScoreCard, Standing,
};

pub const MIN_PLAYERS: usize = 1;
pub const MAX_PLAYERS: usize = 6;
/// How often the dice may be rolled in one turn, the first roll included.
pub const MAX_ROLLS: u8 = 3;

/// Where the active player is within their turn.
///
/// A turn goes `BetweenTurns` → `AwaitingRoll { 0 }` → `ChoosingRerolls { 1 }`
/// → `AwaitingRoll { 1 }` → `ChoosingRerolls { 2 }` → `AwaitingRoll { 2 }` →
/// `ChoosingCategory` → `Scored` → `BetweenTurns` (or `GameOver`).
/// A category may also be chosen early, from `ChoosingRerolls`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TurnPhase {
    BetweenTurns,
    AwaitingRoll { rolls_done: u8 },
    ChoosingRerolls { rolls_done: u8 },
    ChoosingCategory,
    Scored { category: Category, score: Score },
    GameOver,
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnPhase::BetweenTurns => write!(f, "no turn is in progress"),
            TurnPhase::AwaitingRoll { rolls_done } => {
                write!(f, "waiting for roll {} of {}", rolls_done + 1, MAX_ROLLS)
            }
            TurnPhase::ChoosingRerolls { .. } => write!(f, "choosing dice to reroll"),
            TurnPhase::ChoosingCategory => write!(f, "choosing a category"),
            TurnPhase::Scored { category, .. } => {
                write!(f, "the turn was already scored as {}", category)
            }
            TurnPhase::GameOver => write!(f, "the game is over"),
        }
    }
}

/// The state of a whole game, for any number of players between
/// [`MIN_PLAYERS`] and [`MAX_PLAYERS`].
///
/// All mutation goes through the turn operations, which check that they are
/// called in the right [`TurnPhase`]. A failed operation never changes the state.
#[derive(Clone, Debug)]
pub struct Game {
    cards: Vec<ScoreCard>,
    current_player: usize,
    hand: Option<Hand>,
    rolls_done: u8,
    // The dice that the next roll replaces
    rerolls: DiceSelection,
    phase: TurnPhase,
    turns_completed: usize,
}

impl Game {
    /// Any count outside of `MIN_PLAYERS..=MAX_PLAYERS` is rejected,
    /// including negative ones.
    pub fn new(num_players: i64) -> Result<Self, InvalidPlayerCount> {
        let invalid = InvalidPlayerCount {
            requested: num_players,
        };
        let num_players = usize::try_from(num_players).map_err(|_| invalid)?;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(invalid);
        }
        Ok(Self {
            cards: vec![ScoreCard::new(); num_players],
            current_player: 0,
            hand: None,
            rolls_done: 0,
            rerolls: DiceSelection::ALL,
            phase: TurnPhase::BetweenTurns,
            turns_completed: 0,
        })
    }

    pub fn num_players(&self) -> usize {
        self.cards.len()
    }

    /// Index of the player whose turn it is.
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The dice of the turn in progress, `None` before the first roll.
    pub fn hand(&self) -> Option<Hand> {
        self.hand
    }

    /// How often the dice were rolled in the turn in progress.
    pub fn rolls_done(&self) -> u8 {
        self.rolls_done
    }

    pub fn score_cards(&self) -> &[ScoreCard] {
        &self.cards
    }

    pub fn current_card(&self) -> &ScoreCard {
        &self.cards[self.current_player]
    }

    /// Number of turns that were scored and advanced, over all players.
    pub fn turns_completed(&self) -> usize {
        self.turns_completed
    }

    /// Starts the turn of the current player, with no dice rolled yet.
    pub fn start_turn(&mut self) -> Result<(), IllegalAction> {
        match self.phase {
            TurnPhase::BetweenTurns => {
                self.hand = None;
                self.rerolls = DiceSelection::ALL;
                self.rolls_done = 0;
                self.phase = TurnPhase::AwaitingRoll { rolls_done: 0 };
                Ok(())
            }
            phase => Err(self.not_allowed("start a turn", phase)),
        }
    }

    /// Rolls every die that is not kept from the previous roll. The first
    /// roll of a turn rolls all five.
    pub fn roll<D: DiceSource + ?Sized>(&mut self, dice: &mut D) -> Result<Hand, IllegalAction> {
        match self.phase {
            TurnPhase::AwaitingRoll { rolls_done } if rolls_done < MAX_ROLLS => {
                let hand = match self.hand {
                    None => Hand::roll(dice),
                    Some(hand) => hand.reroll(self.rerolls, dice),
                };
                let rolls_done = rolls_done + 1;
                self.hand = Some(hand);
                self.rolls_done = rolls_done;
                self.phase = if rolls_done < MAX_ROLLS {
                    TurnPhase::ChoosingRerolls { rolls_done }
                } else {
                    TurnPhase::ChoosingCategory
                };
                Ok(hand)
            }
            TurnPhase::AwaitingRoll { .. } | TurnPhase::ChoosingCategory => {
                Err(IllegalAction::InvalidRollCount)
            }
            phase => Err(self.not_allowed("roll the dice", phase)),
        }
    }

    /// Chooses the dice, by 1-based index, that the next roll replaces.
    /// All other dice are kept. An empty selection keeps every die.
    pub fn mark_for_reroll<I: IntoIterator<Item = usize>>(
        &mut self,
        indices: I,
    ) -> Result<DiceSelection, IllegalAction> {
        match self.phase {
            TurnPhase::ChoosingRerolls { rolls_done } => {
                let selection = DiceSelection::from_indices(indices)?;
                self.rerolls = selection;
                self.phase = TurnPhase::AwaitingRoll { rolls_done };
                Ok(selection)
            }
            phase => Err(self.not_allowed("choose dice to reroll", phase)),
        }
    }

    /// Commits the current hand to `category` on the current player's card.
    pub fn choose_category(&mut self, category: Category) -> Result<Score, IllegalAction> {
        let hand = match (self.phase, self.hand) {
            (TurnPhase::ChoosingRerolls { .. } | TurnPhase::ChoosingCategory, Some(hand)) => hand,
            (phase, _) => return Err(self.not_allowed("choose a category", phase)),
        };
        let score = score(hand, category);
        self.cards[self.current_player].record(category, score)?;
        self.phase = TurnPhase::Scored { category, score };
        Ok(score)
    }

    /// Passes the dice to the next player after a scored turn.
    pub fn advance_turn(&mut self) -> Result<(), IllegalAction> {
        match self.phase {
            TurnPhase::Scored { .. } => {
                self.turns_completed += 1;
                self.current_player = (self.current_player + 1) % self.num_players();
                self.hand = None;
                self.rolls_done = 0;
                self.phase = if self.is_game_over() {
                    TurnPhase::GameOver
                } else {
                    TurnPhase::BetweenTurns
                };
                Ok(())
            }
            phase => Err(self.not_allowed("pass the dice", phase)),
        }
    }

    /// Every player has scored every category.
    pub fn is_game_over(&self) -> bool {
        self.cards.iter().all(ScoreCard::is_complete)
    }

    /// The player with the highest total, bonuses included.
    ///
    /// On a tie, the player with the lowest index wins.
    pub fn winner(&self) -> usize {
        let mut best = 0;
        for (player_idx, card) in self.cards.iter().enumerate() {
            if card.total() > self.cards[best].total() {
                best = player_idx;
            }
        }
        best
    }

    pub fn standings(&self) -> Vec<Standing> {
        self.cards
            .iter()
            .enumerate()
            .map(|(player, card)| Standing::new(player, card))
            .collect()
    }

    fn not_allowed(&self, action: &'static str, phase: TurnPhase) -> IllegalAction {
        match phase {
            TurnPhase::GameOver => IllegalAction::GameIsOver,
            phase => IllegalAction::NotAllowedNow { action, phase },
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{hand, ScriptedDice, NUM_CATEGORIES};

    /// Plays one full turn without rerolling anything.
    fn play_turn<D: DiceSource>(game: &mut Game, dice: &mut D, category: Category) -> Score {
        game.start_turn().unwrap();
        game.roll(dice).unwrap();
        game.mark_for_reroll([]).unwrap();
        game.roll(dice).unwrap();
        game.mark_for_reroll([]).unwrap();
        game.roll(dice).unwrap();
        let score = game.choose_category(category).unwrap();
        game.advance_turn().unwrap();
        score
    }

    #[test]
    fn player_count_limits() {
        assert_eq!(Game::new(0).unwrap_err(), InvalidPlayerCount { requested: 0 });
        assert_eq!(Game::new(7).unwrap_err(), InvalidPlayerCount { requested: 7 });
        assert_eq!(Game::new(-1).unwrap_err(), InvalidPlayerCount { requested: -1 });
        for num_players in MIN_PLAYERS..=MAX_PLAYERS {
            let game = Game::new(num_players as i64).unwrap();
            assert_eq!(game.num_players(), num_players);
            assert_eq!(game.current_player(), 0);
            assert!(game.score_cards().iter().all(|card| *card == ScoreCard::new()));
        }
    }

    #[test]
    fn three_rolls_then_no_more() {
        let mut game = Game::new(1).unwrap();
        let mut dice = ScriptedDice::new(vec![2]);
        game.start_turn().unwrap();
        assert_eq!(game.hand(), None);
        assert_eq!(game.rolls_done(), 0);
        for roll in 1..=MAX_ROLLS {
            game.roll(&mut dice).unwrap();
            assert_eq!(game.rolls_done(), roll);
            if roll < MAX_ROLLS {
                assert_eq!(game.phase(), TurnPhase::ChoosingRerolls { rolls_done: roll });
                game.mark_for_reroll([1]).unwrap();
            }
        }
        assert_eq!(game.phase(), TurnPhase::ChoosingCategory);
        assert_eq!(game.roll(&mut dice), Err(IllegalAction::InvalidRollCount));
        assert_eq!(
            game.mark_for_reroll([1]),
            Err(IllegalAction::NotAllowedNow {
                action: "choose dice to reroll",
                phase: TurnPhase::ChoosingCategory
            })
        );
        // 5 dice on the first roll, then one die on each reroll
        assert_eq!(dice.num_rolled(), 7);
    }

    #[test]
    fn rerolls_keep_unmarked_dice() {
        let mut game = Game::new(1).unwrap();
        let mut dice = ScriptedDice::new(vec![1, 2, 3, 4, 5, 6, 6]);
        game.start_turn().unwrap();
        assert_eq!(game.roll(&mut dice), Ok(hand!("12345")));
        game.mark_for_reroll([1, 3]).unwrap();
        assert_eq!(game.roll(&mut dice), Ok(hand!("62645")));
        game.mark_for_reroll([]).unwrap();
        assert_eq!(game.roll(&mut dice), Ok(hand!("62645")));
    }

    #[test]
    fn invalid_die_index_changes_nothing() {
        let mut game = Game::new(1).unwrap();
        let mut dice = ScriptedDice::new(vec![3]);
        game.start_turn().unwrap();
        game.roll(&mut dice).unwrap();
        let before = game.phase();
        assert_eq!(
            game.mark_for_reroll([2, 6]),
            Err(IllegalAction::InvalidDieIndex { index: 6 })
        );
        assert_eq!(game.phase(), before);
        assert_eq!(game.mark_for_reroll([2]), Ok(DiceSelection::from_iter([1])));
    }

    #[test]
    fn steps_out_of_order_are_rejected() {
        let mut game = Game::new(2).unwrap();
        let mut dice = ScriptedDice::new(vec![4]);
        assert!(matches!(
            game.roll(&mut dice),
            Err(IllegalAction::NotAllowedNow { .. })
        ));
        game.start_turn().unwrap();
        assert!(matches!(
            game.choose_category(Category::Chance),
            Err(IllegalAction::NotAllowedNow { .. })
        ));
        assert!(matches!(
            game.start_turn(),
            Err(IllegalAction::NotAllowedNow { .. })
        ));
        game.roll(&mut dice).unwrap();
        assert!(matches!(
            game.roll(&mut dice),
            Err(IllegalAction::NotAllowedNow { .. })
        ));
        assert!(matches!(
            game.advance_turn(),
            Err(IllegalAction::NotAllowedNow { .. })
        ));
        assert_eq!(game.current_player(), 0);
    }

    #[test]
    fn category_may_be_chosen_after_the_first_roll() {
        let mut game = Game::new(1).unwrap();
        let mut dice = ScriptedDice::new(vec![5]);
        game.start_turn().unwrap();
        game.roll(&mut dice).unwrap();
        assert_eq!(
            game.choose_category(Category::Fives),
            Ok(Score {
                points: 25,
                bonus: 0
            })
        );
        assert!(matches!(game.phase(), TurnPhase::Scored { .. }));
        assert!(matches!(
            game.roll(&mut dice),
            Err(IllegalAction::NotAllowedNow { .. })
        ));
    }

    #[test]
    fn used_category_is_rejected_and_card_unchanged() {
        let mut game = Game::new(1).unwrap();
        let mut dice = ScriptedDice::new(vec![3]);
        play_turn(&mut game, &mut dice, Category::Threes);

        game.start_turn().unwrap();
        game.roll(&mut dice).unwrap();
        let card_before = game.current_card().clone();
        assert_eq!(
            game.choose_category(Category::Threes),
            Err(IllegalAction::CategoryAlreadyUsed {
                category: Category::Threes
            })
        );
        assert_eq!(*game.current_card(), card_before);
        assert_eq!(game.phase(), TurnPhase::ChoosingRerolls { rolls_done: 1 });
        // The player may pick another one
        assert_eq!(game.choose_category(Category::Chance).unwrap().points, 15);
    }

    #[test]
    fn turns_rotate_over_all_players() {
        let mut game = Game::new(3).unwrap();
        let mut dice = ScriptedDice::new(vec![1, 6, 2]);
        let mut order = vec![];
        for category in &Category::ALL[..2] {
            for _ in 0..3 {
                order.push(game.current_player());
                play_turn(&mut game, &mut dice, *category);
            }
        }
        assert_eq!(order, vec![0, 1, 2, 0, 1, 2]);
        assert_eq!(game.turns_completed(), 6);
        for card in game.score_cards() {
            assert_eq!(card.used_categories().len(), 2);
        }
    }

    #[test]
    fn two_player_game_lasts_26_turns() {
        let mut game = Game::new(2).unwrap();
        let mut rng = StdRng::seed_from_u64(1234);
        for category in Category::ALL {
            for _ in 0..2 {
                assert!(!game.is_game_over());
                play_turn(&mut game, &mut rng, category);
            }
        }
        assert!(game.is_game_over());
        assert_eq!(game.turns_completed(), 2 * NUM_CATEGORIES);
        assert_eq!(game.phase(), TurnPhase::GameOver);
        assert_eq!(game.start_turn(), Err(IllegalAction::GameIsOver));
        assert_eq!(game.roll(&mut rng), Err(IllegalAction::GameIsOver));
    }

    #[test]
    fn single_player_all_ones() {
        let mut game = Game::new(1).unwrap();
        let mut dice = ScriptedDice::new(vec![1]);
        for category in Category::ALL {
            play_turn(&mut game, &mut dice, category);
        }
        assert!(game.is_game_over());
        let card = &game.score_cards()[0];
        assert_eq!(card.get(Category::Ones), Some(5));
        assert_eq!(card.get(Category::Sixes), Some(0));
        assert_eq!(card.get(Category::ThreeOfAKind), Some(5));
        assert_eq!(card.get(Category::FourOfAKind), Some(5));
        assert_eq!(card.get(Category::FullHouse), Some(0));
        assert_eq!(card.get(Category::Chance), Some(5));
        assert_eq!(card.get(Category::Yahtzee), Some(50));
        assert_eq!(card.category_total(), 70);
        assert_eq!(card.yahtzee_bonus, 100);
        assert_eq!(card.bonus_score, 100);
        assert_eq!(game.standings()[0].total, 170);
        assert_eq!(game.winner(), 0);
    }

    #[test]
    fn winner_includes_bonus_and_ties_go_to_the_first_player() {
        let mut game = Game::new(2).unwrap();
        let mut dice = ScriptedDice::new(vec![2]);
        // Both players get identical dice and choices
        for category in Category::ALL {
            play_turn(&mut game, &mut dice, category);
            play_turn(&mut game, &mut dice, category);
        }
        assert_eq!(game.standings()[0].total, game.standings()[1].total);
        assert_eq!(game.winner(), 0);

        let mut game = Game::new(3).unwrap();
        let mut dice = ScriptedDice::new(vec![4]);
        play_turn(&mut game, &mut dice, Category::Chance);
        play_turn(&mut game, &mut dice, Category::Yahtzee);
        play_turn(&mut game, &mut dice, Category::Fours);
        // 20 vs. 50 + 100 vs. 20
        assert_eq!(game.winner(), 1);
    }
}
