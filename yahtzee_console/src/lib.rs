mod game;
mod operator;
mod recording;
pub use game::*;
pub use operator::*;
pub use recording::*;
