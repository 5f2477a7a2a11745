pub use category::*;
pub use dice::*;
pub use dice_selection::*;
pub use dice_source::*;
pub use errors::*;
pub use events::*;
pub use game::*;
pub use score_card::*;
pub use scoring::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod bitset;
mod category;
mod dice;
mod dice_selection;
mod dice_source;
mod errors;
mod events;
mod game;
mod score_card;
mod scoring;
mod visualization;
