use crate::{Card, Deck, RankValue};
use serde::{Deserialize, Serialize};

/// A hand of cards held by the player or the dealer.
///
/// The hand does not own any cards; it holds indices into the shared
/// [`Deck`] arena, in draw order. Adding a card flags the deck slot as
/// in use, and [`Hand::clear`] hands every slot back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hand {
    indices: Vec<usize>,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    /// Appends a card to the hand and flags it as held in the deck.
    /// `index` must come from [`Deck::draw_available`] (or otherwise
    /// refer to a free slot).
    pub fn add_card(&mut self, deck: &mut Deck, index: usize) {
        deck.mark_in_use(index);
        self.indices.push(index);
    }

    /// Releases every held card back to the deck's availability pool
    /// and empties the hand. The cards themselves stay in the arena.
    pub fn clear(&mut self, deck: &mut Deck) {
        for &index in &self.indices {
            deck.release(index);
        }
        self.indices.clear();
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Held deck indices, in draw order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The held cards, in draw order.
    pub fn cards<'d>(&'d self, deck: &'d Deck) -> impl Iterator<Item = &'d Card> + 'd {
        self.indices.iter().map(move |&index| deck.card(index))
    }

    /// Scores the hand in a single pass over the cards in draw order.
    ///
    /// Each ace resolves against the running total at the moment it is
    /// counted: 11 if that stays within 21, otherwise 1. An ace counted
    /// as 11 is never demoted by a later card, so draw order affects
    /// the total — {Ace, 9, 5} scores 25, not 15.
    pub fn value(&self, deck: &Deck) -> u8 {
        let mut sum: u8 = 0;
        for &index in &self.indices {
            sum += match deck.card(index).rank.value() {
                RankValue::Fixed(value) => value,
                RankValue::Ace => {
                    if sum + 11 > 21 {
                        1
                    } else {
                        11
                    }
                }
            };
        }
        sum
    }

    pub fn is_bust(&self, deck: &Deck) -> bool {
        self.value(deck) > 21
    }
}
