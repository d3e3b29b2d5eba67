use crate::RoundPhase;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Rejection sampling gave up before finding a free card. A single
    /// round deals a handful of the 52 cards, so this means the deck
    /// state is corrupted, not that the deck ran dry legitimately.
    #[error("no available card found after {attempts} draw attempts")]
    DeckExhausted { attempts: u32 },

    #[error("cannot {action} during the {phase:?} phase")]
    OutOfTurn {
        action: &'static str,
        phase: RoundPhase,
    },
}
