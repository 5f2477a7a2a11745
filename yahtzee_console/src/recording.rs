use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;
use yahtzee::GameEvent;

/// Writes the events of each game into a numbered JSON file.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    seed: Option<u64>,
    events: Vec<GameEvent>,
}

impl Recorder {
    /// Numbering continues after the recordings already in `directory`.
    pub fn new(directory: PathBuf, seed: Option<u64>) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        let mut num = 1;
        while Self::file_path(&directory, num).exists() {
            num += 1;
        }
        Ok(Self {
            num,
            directory,
            seed,
            events: Vec::new(),
        })
    }

    fn file_path(directory: &std::path::Path, num: usize) -> PathBuf {
        directory.join(format!("game_{:0>6}.json", num))
    }

    pub fn store_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Writes out and forgets the events stored so far.
    pub fn write_game_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = Self::file_path(&self.directory, self.num);
        let writer = BufWriter::new(File::create(&filepath)?);
        let recording = GameRecording {
            seed: self.seed,
            events: std::mem::take(&mut self.events),
        };
        serde_json::to_writer_pretty(writer, &recording)?;
        info!(path = %filepath.display(), "Recorded game");
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Serialize, Deserialize)]
pub struct GameRecording {
    /// The seed of the dice, if known, to replay the game.
    pub seed: Option<u64>,
    pub events: Vec<GameEvent>,
}
