use crate::{Card, Error, Rank, Suit};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DECK_SIZE: usize = 52;

/// Upper bound on rejection-sampling attempts per draw. A round deals
/// only a handful of the 52 cards, so reaching it means the deck state
/// is corrupted rather than genuinely exhausted.
pub const DRAW_ATTEMPT_LIMIT: u32 = 1000;

/// Arena owning every card in play for a session. Hands reference cards
/// by index rather than holding them; the per-slot in-use flag keeps a
/// card from being dealt into two hands at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
    in_use: Vec<bool>,
}

impl Deck {
    /// Builds the full 52-card deck, one card per (rank, suit) pair,
    /// all available.
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self {
            in_use: vec![false; cards.len()],
            cards,
        }
    }

    pub fn card(&self, index: usize) -> &Card {
        &self.cards[index]
    }

    pub fn is_available(&self, index: usize) -> bool {
        !self.in_use[index]
    }

    pub(crate) fn mark_in_use(&mut self, index: usize) {
        self.in_use[index] = true;
    }

    pub(crate) fn release(&mut self, index: usize) {
        self.in_use[index] = false;
    }

    /// Samples uniform indices from `rng` until a free card turns up,
    /// giving up after `DRAW_ATTEMPT_LIMIT` attempts. The returned index
    /// is not reserved; callers hand it to `Hand::add_card` to claim it.
    pub fn draw_available<R: Rng>(&self, rng: &mut R) -> Result<usize, Error> {
        for _ in 0..DRAW_ATTEMPT_LIMIT {
            let index = rng.gen_range(0..self.cards.len());
            if self.is_available(index) {
                return Ok(index);
            }
        }
        Err(Error::DeckExhausted {
            attempts: DRAW_ATTEMPT_LIMIT,
        })
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
