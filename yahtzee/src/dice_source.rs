use rand::rngs::StdRng;
use rand::Rng;

/// Anything that can roll a single six-sided die.
pub trait DiceSource {
    /// Returns a face in `1..=6`.
    fn roll_die(&mut self) -> u8;
}

impl DiceSource for StdRng {
    fn roll_die(&mut self) -> u8 {
        self.gen_range(1..=6)
    }
}

/// Replays a fixed sequence of faces, starting over when it runs out.
///
/// ```
/// # use yahtzee::{DiceSource, ScriptedDice};
/// let mut dice = ScriptedDice::new(vec![2, 5]);
/// let rolls: Vec<u8> = (0..5).map(|_| dice.roll_die()).collect();
/// assert_eq!(rolls, vec![2, 5, 2, 5, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    next: usize,
}

impl ScriptedDice {
    /// Panics if `faces` is empty or contains a face outside of `1..=6`.
    pub fn new(faces: Vec<u8>) -> Self {
        assert!(!faces.is_empty());
        assert!(
            faces.iter().all(|face| (1..=6).contains(face)),
            "Scripted faces must be in 1..=6, got {:?}",
            faces
        );
        Self { faces, next: 0 }
    }

    /// The number of dice rolled so far.
    pub fn num_rolled(&self) -> usize {
        self.next
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        let face = self.faces[self.next % self.faces.len()];
        self.next += 1;
        face
    }
}
