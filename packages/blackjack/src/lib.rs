mod card;
mod deck;
mod error;
mod hand;
mod round;

pub use card::{Card, Rank, RankValue, Suit};
pub use deck::{Deck, DECK_SIZE, DRAW_ATTEMPT_LIMIT};
pub use error::Error;
pub use hand::Hand;
pub use round::{Decision, Outcome, Round, RoundPhase, DEALER_STAND_VALUE};
