use std::io::{BufRead, Write};

use yahtzee::{
    visualize_category_menu, visualize_hand, visualize_standings, Category, GameEvent, Hand,
    ScoreCard, MAX_PLAYERS, MAX_ROLLS, MIN_PLAYERS,
};

/// What a player wants to do after a roll that was not the last one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RerollChoice {
    /// Reroll the dice with these 1-based indices. Empty means keep all.
    Reroll(Vec<usize>),
    /// Stop rolling and choose a category right away.
    ScoreNow,
}

/// The human side of a game: answers questions and is shown what happens.
///
/// Answers are passed to the game as given. If the game rejects one, the
/// operator gets an [`GameEvent::InputRejected`] and is asked again.
pub trait Operator {
    /// Any integer, the range is checked by [`Game::new()`](yahtzee::Game::new).
    fn request_player_count(&mut self) -> anyhow::Result<i64>;

    fn request_reroll_indices(
        &mut self,
        player: usize,
        hand: Hand,
        rolls_done: u8,
    ) -> anyhow::Result<RerollChoice>;

    /// Returns the 1-based menu number of the chosen category.
    fn request_category(
        &mut self,
        player: usize,
        card: &ScoreCard,
        hand: Hand,
    ) -> anyhow::Result<usize>;

    fn display(&mut self, event: &GameEvent) -> anyhow::Result<()>;
}

/// An [`Operator`] that talks to a person through lines of text.
///
/// Lines that cannot be parsed at all are asked for again right here. End of
/// input is an error, which ends the game.
pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
    // A re-usable buffer for reading lines.
    buf: String,
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            buf: String::new(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.buf.clear();
        let num_bytes_read = self.input.read_line(&mut self.buf)?;
        if num_bytes_read == 0 {
            anyhow::bail!("Input was closed, abandoning the game");
        }
        Ok(String::from(self.buf.trim()))
    }
}

fn parse_indices(line: &str) -> Option<Vec<usize>> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| token.parse().ok())
        .collect()
}

impl<R: BufRead, W: Write> Operator for ConsoleOperator<R, W> {
    fn request_player_count(&mut self) -> anyhow::Result<i64> {
        let prompt = format!(
            "Enter the number of players ({}-{}): ",
            MIN_PLAYERS, MAX_PLAYERS
        );
        loop {
            match self.ask(&prompt)?.parse::<i64>() {
                Ok(num_players) => return Ok(num_players),
                Err(_) => writeln!(self.output, "Please enter a number.")?,
            }
        }
    }

    fn request_reroll_indices(
        &mut self,
        _player: usize,
        _hand: Hand,
        _rolls_done: u8,
    ) -> anyhow::Result<RerollChoice> {
        let prompt = "Which dice to reroll? (indices separated by spaces, \
                      empty to keep all, 's' to score now): ";
        loop {
            let answer = self.ask(prompt)?;
            if answer.eq_ignore_ascii_case("s") || answer.eq_ignore_ascii_case("score") {
                return Ok(RerollChoice::ScoreNow);
            }
            match parse_indices(&answer) {
                Some(indices) => return Ok(RerollChoice::Reroll(indices)),
                None => writeln!(self.output, "Please enter die numbers like \"1 3 4\".")?,
            }
        }
    }

    fn request_category(
        &mut self,
        _player: usize,
        card: &ScoreCard,
        hand: Hand,
    ) -> anyhow::Result<usize> {
        writeln!(self.output, "Choose a category:")?;
        writeln!(self.output, "{}", visualize_category_menu(card, hand))?;
        loop {
            let answer = self.ask("Category: ")?;
            // Numbers go to the game unchecked, it knows which ones are valid
            if let Ok(number) = answer.parse::<usize>() {
                return Ok(number);
            }
            match answer.parse::<Category>() {
                Ok(category) => return Ok(category.number()),
                Err(err) => writeln!(self.output, "{}. Please choose a valid category.", err)?,
            }
        }
    }

    fn display(&mut self, event: &GameEvent) -> anyhow::Result<()> {
        match event {
            GameEvent::TurnStarted { player, turn } => {
                writeln!(self.output, "\nPlayer {}'s turn (round {}):", player + 1, turn)?
            }
            GameEvent::Rolled { roll, hand, .. } => writeln!(
                self.output,
                "Roll {} of {}:\n{}",
                roll,
                MAX_ROLLS,
                visualize_hand(*hand)
            )?,
            GameEvent::Scored {
                category, score, ..
            } => {
                writeln!(self.output, "Score: {} ({})", score.points, category)?;
                if score.bonus > 0 {
                    writeln!(self.output, "Bonus: {}", score.bonus)?;
                }
            }
            GameEvent::InputRejected { reason, .. } => {
                writeln!(self.output, "{}. Please try again.", reason)?
            }
            GameEvent::GameEnded { standings, winner } => {
                let winning_total = standings
                    .iter()
                    .find(|standing| standing.player == *winner)
                    .map_or(0, |standing| standing.total);
                writeln!(
                    self.output,
                    "\nGame over! Player {} wins with a score of {}",
                    winner + 1,
                    winning_total
                )?;
                writeln!(self.output, "{}", visualize_standings(standings, *winner))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use yahtzee::hand;

    use super::*;

    fn operator(input: &str) -> ConsoleOperator<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleOperator::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(op: ConsoleOperator<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(op.into_output()).unwrap()
    }

    #[test]
    fn player_count_is_asked_until_it_is_a_number() {
        let mut op = operator("two\n9\n");
        // Range checks are up to the game
        assert_eq!(op.request_player_count().unwrap(), 9);
        assert!(output(op).contains("Please enter a number."));
    }

    #[test]
    fn negative_player_count_is_passed_on() {
        let mut op = operator("-1\n3\n");
        assert_eq!(op.request_player_count().unwrap(), -1);
        assert!(!output(op).contains("Please enter a number."));
    }

    #[test]
    fn reroll_answers() {
        let mut op = operator("1 3 5\n\n2,4\nx y\ns\n");
        let hand = hand!("12345");
        assert_eq!(
            op.request_reroll_indices(0, hand, 1).unwrap(),
            RerollChoice::Reroll(vec![1, 3, 5])
        );
        assert_eq!(
            op.request_reroll_indices(0, hand, 1).unwrap(),
            RerollChoice::Reroll(vec![])
        );
        assert_eq!(
            op.request_reroll_indices(0, hand, 1).unwrap(),
            RerollChoice::Reroll(vec![2, 4])
        );
        // "x y" is skipped with a hint
        assert_eq!(
            op.request_reroll_indices(0, hand, 2).unwrap(),
            RerollChoice::ScoreNow
        );
        assert!(output(op).contains("Please enter die numbers"));
    }

    #[test]
    fn out_of_range_indices_are_passed_on() {
        let mut op = operator("0 7\n");
        assert_eq!(
            op.request_reroll_indices(0, hand!("12345"), 1).unwrap(),
            RerollChoice::Reroll(vec![0, 7])
        );
    }

    #[test]
    fn category_by_number_or_name() {
        let mut op = operator("full house\nbanana\n14\n");
        let card = ScoreCard::new();
        assert_eq!(op.request_category(0, &card, hand!("22333")).unwrap(), 9);
        assert_eq!(op.request_category(0, &card, hand!("22333")).unwrap(), 14);
        let out = output(op);
        assert!(out.contains("There is no category called 'banana'"));
        assert!(out.contains("  9.   Full house        25 points"));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut op = operator("");
        assert!(op.request_category(0, &ScoreCard::new(), hand!("11111")).is_err());
    }
}
