use tracing::{debug, info, trace, warn};
use yahtzee::{
    Category, DiceSource, Game, GameEvent, IllegalAction, Score, Standing, TurnPhase,
};

use crate::operator::{Operator, RerollChoice};
use crate::recording::Recorder;

pub struct GameResult {
    pub winner: usize,
    pub standings: Vec<Standing>,
}

/// Sets up a game for `num_players`, asking the operator when it is not given.
///
/// An invalid count is an error, the game does not start.
pub fn new_game<O: Operator + ?Sized>(
    num_players: Option<i64>,
    operator: &mut O,
) -> anyhow::Result<Game> {
    let num_players = match num_players {
        Some(num_players) => num_players,
        None => operator.request_player_count()?,
    };
    let game = Game::new(num_players)?;
    info!(num_players, "Starting game");
    Ok(game)
}

/// Plays `game` until every card is complete.
///
/// Invalid answers are reported back to the operator and asked for again.
/// Returns an error only on communication failure, or if the game is not
/// driven in the right order.
///
/// The recording is written even when the game is abandoned. It then ends
/// without a [`GameEvent::GameEnded`].
pub fn play_game<D, O>(
    game: &mut Game,
    dice: &mut D,
    operator: &mut O,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult>
where
    D: DiceSource + ?Sized,
    O: Operator + ?Sized,
{
    let outcome = play_until_over(game, dice, operator, recorder);
    if let Some(rec) = recorder {
        let written = rec.write_game_recording();
        match &outcome {
            Ok(_) => {
                written?;
            }
            Err(_) => {
                if let Err(err) = written {
                    warn!(%err, "Could not record the abandoned game");
                }
            }
        }
    }
    outcome
}

fn play_until_over<D, O>(
    game: &mut Game,
    dice: &mut D,
    operator: &mut O,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult>
where
    D: DiceSource + ?Sized,
    O: Operator + ?Sized,
{
    while !game.is_game_over() {
        play_turn(game, dice, operator, recorder)?;
    }

    let result = GameResult {
        winner: game.winner(),
        standings: game.standings(),
    };
    info!(
        winner = result.winner + 1,
        total = result.standings[result.winner].total,
        "Game over"
    );
    emit(
        operator,
        recorder,
        GameEvent::GameEnded {
            standings: result.standings.clone(),
            winner: result.winner,
        },
    )?;
    Ok(result)
}

fn play_turn<D, O>(
    game: &mut Game,
    dice: &mut D,
    operator: &mut O,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<()>
where
    D: DiceSource + ?Sized,
    O: Operator + ?Sized,
{
    let player = game.current_player();
    game.start_turn()?;
    let turn = game.turns_completed() / game.num_players() + 1;
    emit(operator, recorder, GameEvent::TurnStarted { player, turn })?;

    let mut hand = game.roll(dice)?;
    emit_roll(game, operator, recorder)?;
    while let TurnPhase::ChoosingRerolls { rolls_done } = game.phase() {
        let selection = loop {
            let indices = match operator.request_reroll_indices(player, hand, rolls_done)? {
                RerollChoice::ScoreNow => break None,
                RerollChoice::Reroll(indices) => indices,
            };
            match game.mark_for_reroll(indices) {
                Ok(selection) => break Some(selection),
                Err(err) => reject(operator, recorder, player, err)?,
            }
        };
        let Some(selection) = selection else {
            break;
        };
        trace!(player, rerolled = ?selection.indices());
        hand = game.roll(dice)?;
        emit_roll(game, operator, recorder)?;
    }

    let (category, score) = loop {
        let number = operator.request_category(player, game.current_card(), hand)?;
        match choose_category(game, number) {
            Ok(choice) => break choice,
            Err(err) => reject(operator, recorder, player, err)?,
        }
    };
    debug!(
        player,
        category = %category,
        points = score.points,
        bonus = score.bonus,
        "Scored"
    );
    emit(
        operator,
        recorder,
        GameEvent::Scored {
            player,
            category,
            hand,
            score,
        },
    )?;

    game.advance_turn()?;
    Ok(())
}

fn choose_category(game: &mut Game, number: usize) -> Result<(Category, Score), IllegalAction> {
    let category = Category::from_number(number)?;
    let score = game.choose_category(category)?;
    Ok((category, score))
}

fn emit_roll<O: Operator + ?Sized>(
    game: &Game,
    operator: &mut O,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<()> {
    let Some(hand) = game.hand() else {
        anyhow::bail!("No dice after rolling");
    };
    emit(
        operator,
        recorder,
        GameEvent::Rolled {
            player: game.current_player(),
            roll: game.rolls_done(),
            hand,
        },
    )
}

/// Tells the operator about a bad answer. Anything that asking again cannot
/// fix is returned as an error instead.
fn reject<O: Operator + ?Sized>(
    operator: &mut O,
    recorder: &mut Option<Recorder>,
    player: usize,
    err: IllegalAction,
) -> anyhow::Result<()> {
    if !err.is_recoverable() {
        return Err(err.into());
    }
    debug!(player, %err, "Rejected input");
    emit(
        operator,
        recorder,
        GameEvent::InputRejected {
            player,
            reason: err.to_string(),
        },
    )
}

fn emit<O: Operator + ?Sized>(
    operator: &mut O,
    recorder: &mut Option<Recorder>,
    event: GameEvent,
) -> anyhow::Result<()> {
    operator.display(&event)?;
    if let Some(recorder) = recorder {
        recorder.store_event(event);
    }
    Ok(())
}
