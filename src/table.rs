use blackjack::{Deck, Decision, Hand, Outcome, Round, RoundPhase};
use rand::Rng;
use std::io::{BufRead, Write};

type BoxErr = Box<dyn std::error::Error + Send + Sync>;

/// Plays one full round: opening deal, the player's hit/stick loop, the
/// dealer's fixed strategy, then the table report and outcome.
///
/// Input and output are generic so tests can script stdin and capture
/// the transcript.
pub fn play_round<R, I, O>(rng: &mut R, mut input: I, mut out: O) -> Result<(), BoxErr>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    let mut deck = Deck::new();
    let mut round = Round::new();

    round.deal_initial(&mut deck, rng)?;
    log::debug!(
        "opening deal: player {:?}, dealer {:?}",
        round.player.indices(),
        round.dealer.indices()
    );

    while round.phase() == RoundPhase::PlayerTurn {
        writeln!(out, "Your hand's value is {}", round.player.value(&deck))?;
        match prompt_decision(&mut input, &mut out)? {
            Decision::Hit => {
                let value = round.player_hit(&mut deck, rng)?;
                log::debug!("player hit, total now {value}");
            }
            Decision::Stick => round.player_stick()?,
        }
    }

    round.play_dealer(&mut deck, rng)?;
    log::debug!("dealer finished at {}", round.dealer.value(&deck));

    report_hand(&mut out, "Player", &round.player, &deck)?;
    writeln!(out)?;
    report_hand(&mut out, "Dealer", &round.dealer, &deck)?;

    let closing = match round.outcome(&deck)? {
        Outcome::DealerWin => "The Dealer has won!",
        Outcome::PlayerWin => "Congratulations you have won!",
        Outcome::Push => "Tie! Nobody wins.",
    };
    writeln!(out, "\n{closing}")?;

    Ok(())
}

/// Prompts until the input yields a recognizable hit/stick token.
/// Unrecognized tokens re-prompt; a closed input stream is an error.
fn prompt_decision<I: BufRead, O: Write>(input: &mut I, out: &mut O) -> Result<Decision, BoxErr> {
    loop {
        write!(out, "Would you like to [h]it or [s]tick? ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err("input closed before a decision was made".into());
        }
        writeln!(out)?;

        match Decision::parse(&line) {
            Some(decision) => return Ok(decision),
            None => log::debug!("unrecognized decision token {:?}", line.trim()),
        }
    }
}

fn report_hand<O: Write>(out: &mut O, owner: &str, hand: &Hand, deck: &Deck) -> Result<(), BoxErr> {
    let names: Vec<String> = hand.cards(deck).map(|card| card.to_string()).collect();
    writeln!(out, "{}", names.join(", "))?;
    writeln!(
        out,
        "{} Value: {} | {}",
        owner,
        hand.value(deck),
        if hand.is_bust(deck) { "Bust" } else { "Not Bust" }
    )?;
    Ok(())
}
