use std::io::{BufRead, Write};

use blackjack_advisor::{
    DealerStop, Decision, DecisionMaker, Error, Estimator, Hand, HitResult, Outcome, Round,
    RoundEventHandler, WinEstimate,
};
use rand::Rng;

const HIDDEN_CARD: &str = "[hidden]";

/// Reads one line at a time. None at end of input.
fn read_line<I: BufRead>(input: &mut I) -> Result<Option<String>, Error> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Takes the player's H/S commands from the input.
struct LineReader<'a, I: BufRead> {
    input: &'a mut I,
}

impl<I: BufRead> DecisionMaker for LineReader<'_, I> {
    fn decide(&mut self, _: &Hand, _: &Hand) -> Result<Option<Decision>, Error> {
        match read_line(self.input)? {
            Some(line) => Ok(Decision::from_input(&line)),
            // Nothing more to read, so the player stands.
            None => Ok(Some(Decision::Stand)),
        }
    }
}

/// Prints the round the same way for every decision point.
struct Renderer<'a, O: Write> {
    output: &'a mut O,
}

impl<O: Write> Renderer<'_, O> {
    fn print_hand(&mut self, label: &str, hand: &Hand) -> Result<(), Error> {
        writeln!(
            self.output,
            "{} hand: {} (total = {})",
            label,
            hand,
            hand.total()
        )?;
        Ok(())
    }

    fn print_dealer_masked(&mut self, hand: &Hand) -> Result<(), Error> {
        write!(self.output, "Dealer hand: {}", HIDDEN_CARD)?;
        for card in hand.cards().iter().skip(1) {
            write!(self.output, " {}", card)?;
        }
        writeln!(self.output)?;
        if let Some(card) = hand.cards().get(1) {
            writeln!(self.output, "Dealer visible card: {}", card)?;
        }
        Ok(())
    }
}

impl<O: Write> RoundEventHandler for Renderer<'_, O> {
    fn on_decision_point(&mut self, player_hand: &Hand, dealer_hand: &Hand) -> Result<(), Error> {
        writeln!(self.output)?;
        self.print_hand("Player", player_hand)?;
        self.print_dealer_masked(dealer_hand)
    }

    fn on_estimate(&mut self, estimate: &WinEstimate) -> Result<(), Error> {
        writeln!(
            self.output,
            "Estimated win probability if you STAND now: {:.2}%",
            estimate.probability() * 100.0
        )?;
        write!(self.output, "Enter H to HIT or S to STAND: ")?;
        self.output.flush()?;
        Ok(())
    }

    fn on_invalid_decision(&mut self) -> Result<(), Error> {
        writeln!(self.output, "Invalid input. Please enter H or S.")?;
        Ok(())
    }

    fn on_stand(&mut self) -> Result<(), Error> {
        writeln!(self.output, "You chose to STAND.")?;
        Ok(())
    }

    fn on_hit(
        &mut self,
        result: &HitResult,
        player_hand: &Hand,
        dealer_hand: &Hand,
    ) -> Result<(), Error> {
        match result {
            HitResult::Drew(card) => writeln!(self.output, "You drew: {}", card)?,
            HitResult::Busted(card) => {
                writeln!(self.output, "You drew: {}", card)?;
                writeln!(self.output)?;
                self.print_hand("Player", player_hand)?;
                self.print_dealer_masked(dealer_hand)?;
                writeln!(
                    self.output,
                    "\nYou BUSTED! (total = {})",
                    player_hand.total()
                )?;
            }
            HitResult::DeckExhausted => writeln!(self.output, "No more cards left in the deck.")?,
        }
        Ok(())
    }

    fn on_dealer_reveal(&mut self, dealer_hand: &Hand) -> Result<(), Error> {
        writeln!(self.output, "\nDealer reveals hole card...")?;
        self.print_hand("Dealer", dealer_hand)
    }

    fn on_summary(
        &mut self,
        player_hand: &Hand,
        dealer_hand: &Hand,
        dealer_stop: Option<DealerStop>,
        outcome: Outcome,
    ) -> Result<(), Error> {
        if outcome == Outcome::PlayerBust {
            writeln!(self.output, "\nFinal Result: Dealer wins (player busted).")?;
            return Ok(());
        }

        if dealer_stop == Some(DealerStop::Exhausted) {
            writeln!(self.output, "No more cards left in the deck.")?;
        }
        writeln!(self.output, "\n--- Final Hands ---")?;
        self.print_hand("Player", player_hand)?;
        self.print_hand("Dealer", dealer_hand)?;

        writeln!(self.output, "\n--- Outcome ---")?;
        let line = match outcome {
            Outcome::DealerBust => "Dealer BUSTED! Player wins.",
            Outcome::PlayerWins => "Player wins!",
            Outcome::DealerWins => "Dealer wins.",
            Outcome::Push => "Push (tie).",
            Outcome::PlayerBust => "Dealer wins (player busted).",
        };
        writeln!(self.output, "{}", line)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub rounds: u32,
    pub player_wins: u32,
    pub dealer_wins: u32,
    pub pushes: u32,
}

impl SessionSummary {
    fn record(&mut self, outcome: Outcome) {
        self.rounds += 1;
        match outcome {
            Outcome::DealerBust | Outcome::PlayerWins => self.player_wins += 1,
            Outcome::PlayerBust | Outcome::DealerWins => self.dealer_wins += 1,
            Outcome::Push => self.pushes += 1,
        }
    }
}

/// A line-oriented Blackjack session: rounds are played until the player
/// declines to play again or the input ends.
pub struct ConsoleSession<I: BufRead, O: Write> {
    input: I,
    output: O,
    estimator: Estimator,
}

impl<I: BufRead, O: Write> ConsoleSession<I, O> {
    pub fn new(input: I, output: O, estimator: Estimator) -> Self {
        ConsoleSession {
            input,
            output,
            estimator,
        }
    }

    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SessionSummary, Error> {
        let mut summary = SessionSummary::default();
        loop {
            let mut round = Round::deal(rng)?;
            writeln!(self.output, "\n=== BLACKJACK (Single Deck) ===")?;

            let mut decider = LineReader {
                input: &mut self.input,
            };
            let mut renderer = Renderer {
                output: &mut self.output,
            };
            let outcome = round.play(&self.estimator, rng, &mut decider, &mut renderer)?;
            summary.record(outcome);

            write!(self.output, "\nPlay again? (Y/N): ")?;
            self.output.flush()?;
            let play_again = match read_line(&mut self.input)? {
                Some(answer) => answer.trim().eq_ignore_ascii_case("y"),
                None => false,
            };
            if !play_again {
                break;
            }
        }

        writeln!(self.output, "\nThanks for playing Blackjack!")?;
        self.output.flush()?;
        log::info!(
            "session over: {} rounds, {} won, {} lost, {} pushed",
            summary.rounds,
            summary.player_wins,
            summary.dealer_wins,
            summary.pushes
        );
        Ok(summary)
    }
}
