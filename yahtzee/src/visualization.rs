use crate::{scores_for_hand, Category, Hand, ScoreCard, Standing};

/// Shows the dice with the 1-based indices used to pick dice for a reroll.
pub fn visualize_hand(hand: Hand) -> String {
    let mut indices = String::new();
    let mut faces = String::new();
    for (idx, face) in hand.faces().into_iter().enumerate() {
        indices += &format!(" {:>2}", idx + 1);
        faces += &format!("  {}", crate::die_char(face));
    }
    format!("{}\n{}   {}", indices, faces, hand)
}

/// The numbered list of categories. Categories that are still open show
/// what `hand` would score in them, used ones show their recorded score.
pub fn visualize_category_menu(card: &ScoreCard, hand: Hand) -> String {
    let preview = scores_for_hand(hand);
    let mut result = String::new();
    for category in Category::ALL {
        let status = match card.get(category) {
            Some(points) => format!("scored {}", points),
            None => format!("{:>3} points", preview[category.number() - 1]),
        };
        let marker = if card.is_used(category) { '✗' } else { ' ' };
        result += &format!(
            "{:>3}. {} {:<16} {}\n",
            category.number(),
            marker,
            category.name(),
            status
        );
    }
    result.pop(); // The trailing newline
    result
}

/// A box with one row per player, with the winner marked.
pub fn visualize_standings(standings: &[Standing], winner: usize) -> String {
    let header = format!(
        "│ {:<10} │ {:>10} │ {:>13} │ {:>20} │ {:>11} │ {:>6} │",
        "Player", "Categories", "Yahtzee bonus", "Large straight bonus", "Bonus score", "Total"
    );
    // The box characters are one column wide, so char count == width
    let inner_width = header.chars().count() - 2;
    let mut result = format!("╭{}╮\n{}\n", "─".repeat(inner_width), header);
    result += &format!("├{}┤\n", "─".repeat(inner_width));
    for standing in standings {
        let name = format!(
            "Player {}{}",
            standing.player + 1,
            if standing.player == winner { " ★" } else { "" }
        );
        result += &format!(
            "│ {:<10} │ {:>10} │ {:>13} │ {:>20} │ {:>11} │ {:>6} │\n",
            name,
            standing.category_total,
            standing.yahtzee_bonus,
            standing.large_straight_bonus,
            standing.bonus_score,
            standing.total
        );
    }
    result += &format!("╰{}╯", "─".repeat(inner_width));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hand, Score};

    #[test]
    fn hand_with_indices() {
        assert_eq!(
            visualize_hand(hand!("16253")),
            "  1  2  3  4  5\n  ⚀  ⚅  ⚁  ⚄  ⚂   [1, 6, 2, 5, 3]"
        );
    }

    #[test]
    fn menu_shows_preview_and_used_categories() {
        let mut card = ScoreCard::new();
        card.record(
            Category::Twos,
            Score {
                points: 4,
                bonus: 0,
            },
        )
        .unwrap();
        let menu = visualize_category_menu(&card, hand!("22333"));
        let lines: Vec<&str> = menu.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "  1.   Ones               0 points");
        assert_eq!(lines[1], "  2. ✗ Twos             scored 4");
        assert_eq!(lines[8], "  9.   Full house        25 points");
    }

    #[test]
    fn standings_box_marks_the_winner() {
        let standings = [
            Standing::new(0, &ScoreCard::new()),
            Standing::new(1, &ScoreCard::new()),
        ];
        let text = visualize_standings(&standings, 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[3].starts_with("│ Player 1   │"));
        assert!(lines[4].starts_with("│ Player 2 ★ │"));
        // All lines have the same width
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|line| line.chars().count() == width));
    }
}
