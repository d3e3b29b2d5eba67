use crate::{Deck, Error, Hand};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Dealer stands once their hand reaches this value.
pub const DEALER_STAND_VALUE: u8 = 17;

/// Where a round currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Dealing,
    PlayerTurn,
    DealerTurn,
    Resolved,
}

/// The player's choice at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Hit,
    Stick,
}

impl Decision {
    /// Reads a decision from a free-form token. Only the first
    /// character counts: `h`/`H` hits, `s`/`S` sticks, anything else is
    /// unrecognized and the caller should prompt again.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().chars().next() {
            Some('h') | Some('H') => Some(Decision::Hit),
            Some('s') | Some('S') => Some(Decision::Stick),
            _ => None,
        }
    }
}

/// Final result of a resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerWin,
    DealerWin,
    Push,
}

/// A single round against the dealer: the opening deal, the player's
/// hit/stick loop, the fixed dealer strategy, and settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub player: Hand,
    pub dealer: Hand,
    phase: RoundPhase,
}

impl Round {
    pub fn new() -> Self {
        Self {
            player: Hand::new(),
            dealer: Hand::new(),
            phase: RoundPhase::Dealing,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Deals the opening two cards each, player and dealer alternating,
    /// then hands control to the player.
    pub fn deal_initial<R: Rng>(&mut self, deck: &mut Deck, rng: &mut R) -> Result<(), Error> {
        self.expect_phase(RoundPhase::Dealing, "deal")?;
        for _ in 0..2 {
            let index = deck.draw_available(rng)?;
            self.player.add_card(deck, index);
            let index = deck.draw_available(rng)?;
            self.dealer.add_card(deck, index);
        }
        self.phase = RoundPhase::PlayerTurn;
        Ok(())
    }

    /// Draws one card for the player and returns the new hand value.
    /// A bust ends the player's turn.
    pub fn player_hit<R: Rng>(&mut self, deck: &mut Deck, rng: &mut R) -> Result<u8, Error> {
        self.expect_phase(RoundPhase::PlayerTurn, "hit")?;
        let index = deck.draw_available(rng)?;
        self.player.add_card(deck, index);
        let value = self.player.value(deck);
        if self.player.is_bust(deck) {
            self.phase = RoundPhase::DealerTurn;
        }
        Ok(value)
    }

    pub fn player_stick(&mut self) -> Result<(), Error> {
        self.expect_phase(RoundPhase::PlayerTurn, "stick")?;
        self.phase = RoundPhase::DealerTurn;
        Ok(())
    }

    pub fn dealer_should_hit(&self, deck: &Deck) -> bool {
        self.dealer.value(deck) < DEALER_STAND_VALUE && !self.dealer.is_bust(deck)
    }

    /// Runs the house strategy to completion: hit below 17, stand at 17
    /// or above. The round is resolved afterwards.
    pub fn play_dealer<R: Rng>(&mut self, deck: &mut Deck, rng: &mut R) -> Result<(), Error> {
        self.expect_phase(RoundPhase::DealerTurn, "dealer draw")?;
        while self.dealer_should_hit(deck) {
            let index = deck.draw_available(rng)?;
            self.dealer.add_card(deck, index);
        }
        self.phase = RoundPhase::Resolved;
        Ok(())
    }

    /// Outcome of a resolved round. Bust checks come before the value
    /// comparison: a standing hand beats a busted one no matter the
    /// totals, and two busted hands push.
    pub fn outcome(&self, deck: &Deck) -> Result<Outcome, Error> {
        self.expect_phase(RoundPhase::Resolved, "settle")?;

        let outcome = if self.dealer.is_bust(deck) {
            if self.player.is_bust(deck) {
                Outcome::Push
            } else {
                Outcome::PlayerWin
            }
        } else if self.player.is_bust(deck) {
            Outcome::DealerWin
        } else {
            let player = self.player.value(deck);
            let dealer = self.dealer.value(deck);
            if player > dealer {
                Outcome::PlayerWin
            } else if player < dealer {
                Outcome::DealerWin
            } else {
                Outcome::Push
            }
        };
        Ok(outcome)
    }

    fn expect_phase(&self, expected: RoundPhase, action: &'static str) -> Result<(), Error> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Error::OutOfTurn {
                action,
                phase: self.phase,
            })
        }
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit, DECK_SIZE};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn give_cards(round_hand: &mut Hand, deck: &mut Deck, cards: &[(Rank, Suit)]) {
        for &(rank, suit) in cards {
            let index = (0..DECK_SIZE)
                .find(|&i| deck.card(i).rank == rank && deck.card(i).suit == suit)
                .unwrap();
            round_hand.add_card(deck, index);
        }
    }

    fn resolved_round(
        deck: &mut Deck,
        player: &[(Rank, Suit)],
        dealer: &[(Rank, Suit)],
    ) -> Round {
        let mut round = Round::new();
        give_cards(&mut round.player, deck, player);
        give_cards(&mut round.dealer, deck, dealer);
        round.phase = RoundPhase::Resolved;
        round
    }

    #[test]
    fn test_decision_parse_first_character_rule() {
        assert_eq!(Decision::parse("h"), Some(Decision::Hit));
        assert_eq!(Decision::parse("H"), Some(Decision::Hit));
        assert_eq!(Decision::parse("hit"), Some(Decision::Hit));
        assert_eq!(Decision::parse("  hello"), Some(Decision::Hit));
        assert_eq!(Decision::parse("s"), Some(Decision::Stick));
        assert_eq!(Decision::parse("Stick"), Some(Decision::Stick));
        assert_eq!(Decision::parse("q"), None);
        assert_eq!(Decision::parse(""), None);
        assert_eq!(Decision::parse("   "), None);
    }

    #[test]
    fn test_initial_deal_gives_two_cards_each() {
        let mut deck = Deck::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut round = Round::new();

        round.deal_initial(&mut deck, &mut rng).unwrap();

        assert_eq!(round.player.len(), 2);
        assert_eq!(round.dealer.len(), 2);
        assert_eq!(round.phase(), RoundPhase::PlayerTurn);
    }

    #[test]
    fn test_deal_is_rejected_outside_dealing_phase() {
        let mut deck = Deck::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut round = Round::new();

        round.deal_initial(&mut deck, &mut rng).unwrap();
        let err = round.deal_initial(&mut deck, &mut rng).unwrap_err();
        assert!(matches!(err, Error::OutOfTurn { action: "deal", .. }));
    }

    #[test]
    fn test_stick_moves_play_to_the_dealer() {
        let mut deck = Deck::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut round = Round::new();

        round.deal_initial(&mut deck, &mut rng).unwrap();
        round.player_stick().unwrap();
        assert_eq!(round.phase(), RoundPhase::DealerTurn);
        assert!(round.player_stick().is_err());
    }

    #[test]
    fn test_player_bust_ends_the_player_turn() {
        let mut deck = Deck::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut round = Round::new();

        round.deal_initial(&mut deck, &mut rng).unwrap();
        while round.phase() == RoundPhase::PlayerTurn {
            round.player_hit(&mut deck, &mut rng).unwrap();
        }

        assert_eq!(round.phase(), RoundPhase::DealerTurn);
        assert!(round.player.is_bust(&deck));
    }

    #[test]
    fn test_dealer_hits_below_seventeen_and_stands_at_seventeen() {
        let mut deck = Deck::new();
        let mut round = Round::new();
        give_cards(
            &mut round.dealer,
            &mut deck,
            &[(Rank::Ten, Suit::Hearts), (Rank::Six, Suit::Spades)],
        );
        assert!(round.dealer_should_hit(&deck)); // 16

        give_cards(&mut round.dealer, &mut deck, &[(Rank::Ace, Suit::Clubs)]);
        assert!(!round.dealer_should_hit(&deck)); // 17
    }

    #[test]
    fn test_dealer_does_not_hit_a_busted_hand() {
        let mut deck = Deck::new();
        let mut round = Round::new();
        give_cards(
            &mut round.dealer,
            &mut deck,
            &[
                (Rank::Ten, Suit::Hearts),
                (Rank::Six, Suit::Spades),
                (Rank::King, Suit::Clubs),
            ],
        );
        assert!(round.dealer.is_bust(&deck));
        assert!(!round.dealer_should_hit(&deck));
    }

    #[test]
    fn test_dealer_plays_to_at_least_seventeen_or_bust() {
        let mut deck = Deck::new();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut round = Round::new();

        round.deal_initial(&mut deck, &mut rng).unwrap();
        round.player_stick().unwrap();
        round.play_dealer(&mut deck, &mut rng).unwrap();

        assert_eq!(round.phase(), RoundPhase::Resolved);
        let value = round.dealer.value(&deck);
        assert!(value >= DEALER_STAND_VALUE || round.dealer.is_bust(&deck));
    }

    #[test]
    fn test_outcome_requires_a_resolved_round() {
        let mut deck = Deck::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut round = Round::new();

        round.deal_initial(&mut deck, &mut rng).unwrap();
        let err = round.outcome(&deck).unwrap_err();
        assert!(matches!(err, Error::OutOfTurn { action: "settle", .. }));
    }

    #[test]
    fn test_outcome_both_bust_is_a_push() {
        let mut deck = Deck::new();
        let round = resolved_round(
            &mut deck,
            &[
                (Rank::King, Suit::Spades),
                (Rank::Queen, Suit::Spades),
                (Rank::Five, Suit::Spades),
            ],
            &[
                (Rank::King, Suit::Hearts),
                (Rank::Queen, Suit::Hearts),
                (Rank::Five, Suit::Hearts),
            ],
        );
        assert_eq!(round.outcome(&deck).unwrap(), Outcome::Push);
    }

    #[test]
    fn test_outcome_dealer_bust_alone_loses_regardless_of_value() {
        let mut deck = Deck::new();
        // Player stands on a lowly 12; dealer busts with 25.
        let round = resolved_round(
            &mut deck,
            &[(Rank::Ten, Suit::Spades), (Rank::Two, Suit::Spades)],
            &[
                (Rank::King, Suit::Hearts),
                (Rank::Queen, Suit::Hearts),
                (Rank::Five, Suit::Hearts),
            ],
        );
        assert_eq!(round.outcome(&deck).unwrap(), Outcome::PlayerWin);
    }

    #[test]
    fn test_outcome_player_bust_alone_loses() {
        let mut deck = Deck::new();
        let round = resolved_round(
            &mut deck,
            &[
                (Rank::King, Suit::Spades),
                (Rank::Queen, Suit::Spades),
                (Rank::Five, Suit::Spades),
            ],
            &[(Rank::Ten, Suit::Hearts), (Rank::Seven, Suit::Hearts)],
        );
        assert_eq!(round.outcome(&deck).unwrap(), Outcome::DealerWin);
    }

    #[test]
    fn test_outcome_higher_standing_value_wins() {
        let mut deck = Deck::new();
        let round = resolved_round(
            &mut deck,
            &[(Rank::King, Suit::Spades), (Rank::Nine, Suit::Spades)],
            &[(Rank::Ten, Suit::Hearts), (Rank::Seven, Suit::Hearts)],
        );
        assert_eq!(round.outcome(&deck).unwrap(), Outcome::PlayerWin);

        let mut deck = Deck::new();
        let round = resolved_round(
            &mut deck,
            &[(Rank::Ten, Suit::Spades), (Rank::Seven, Suit::Spades)],
            &[(Rank::King, Suit::Hearts), (Rank::Nine, Suit::Hearts)],
        );
        assert_eq!(round.outcome(&deck).unwrap(), Outcome::DealerWin);
    }

    #[test]
    fn test_outcome_equal_standing_values_push() {
        let mut deck = Deck::new();
        let round = resolved_round(
            &mut deck,
            &[(Rank::King, Suit::Spades), (Rank::Nine, Suit::Spades)],
            &[(Rank::Queen, Suit::Hearts), (Rank::Nine, Suit::Hearts)],
        );
        assert_eq!(round.outcome(&deck).unwrap(), Outcome::Push);
    }
}
