use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dealer;
use crate::deck::Deck;
use crate::hand::Hand;
use crate::{Error, BLACKJACK, DEFAULT_TRIALS};

/// Read-only view of a round at a decision point.
#[derive(Debug, Clone, Copy)]
pub struct RoundSnapshot<'a> {
    pub deck: &'a Deck,
    pub player: &'a Hand,
    pub dealer: &'a Hand,
}

/// Result of a Monte Carlo estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinEstimate {
    wins: u32,
    trials: u32,
}

impl WinEstimate {
    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// Fraction of winning trials. 0 when no trial was run.
    pub fn probability(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.wins as f64 / self.trials as f64
    }

    /// Standard error of `probability`, which shrinks as 1/sqrt(trials).
    pub fn standard_error(&self) -> f64 {
        let p = self.probability();
        (p * (1.0 - p) / self.trials as f64).sqrt()
    }
}

/// Estimates the probability that the player wins if they stand now.
///
/// Each trial shuffles a private copy of `deck`, lets the dealer play out a
/// private copy of `dealer`, and counts a win when the dealer busts or ends
/// below the player's total. None of the inputs are modified.
///
/// Returns `Error::ZeroTrials` if `trials` is 0.
pub fn estimate_win_probability<R: Rng + ?Sized>(
    deck: &Deck,
    player: &Hand,
    dealer: &Hand,
    trials: u32,
    rng: &mut R,
) -> Result<f64, Error> {
    if trials == 0 {
        return Err(Error::ZeroTrials);
    }
    let snapshot = RoundSnapshot {
        deck,
        player,
        dealer,
    };
    let wins = run_trials(&snapshot, trials, rng);
    Ok(WinEstimate { wins, trials }.probability())
}

/// Stand-now win probability estimator with a fixed trial count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimator {
    trials: u32,
    number_of_threads: usize,
}

impl Estimator {
    /// Pass 0 as `number_of_threads` to use all available parallelism. The
    /// thread count never exceeds the number of trials.
    pub fn new(trials: u32, number_of_threads: usize) -> Result<Self, Error> {
        if trials == 0 {
            return Err(Error::ZeroTrials);
        }
        let number_of_threads = {
            if number_of_threads == 0 {
                let parallelism = std::thread::available_parallelism();
                match parallelism {
                    Ok(n) => n.get(),
                    Err(_) => 1,
                }
            } else {
                number_of_threads
            }
        };
        let number_of_threads = number_of_threads.min(trials as usize);
        Ok(Estimator {
            trials,
            number_of_threads,
        })
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    pub fn number_of_threads(&self) -> usize {
        self.number_of_threads
    }

    /// Runs all trials. With one thread the given generator is used directly.
    /// With more, each worker gets its own generator seeded from `rng`, so the
    /// result is still reproducible for a seeded `rng` and a fixed thread count.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        snapshot: &RoundSnapshot<'_>,
        rng: &mut R,
    ) -> Result<WinEstimate, Error> {
        let wins = if self.number_of_threads <= 1 {
            run_trials(snapshot, self.trials, rng)
        } else {
            self.run_trials_in_parallel(snapshot, rng)?
        };

        let estimate = WinEstimate {
            wins,
            trials: self.trials,
        };
        log::debug!(
            "stand estimate: {}/{} wins, p = {:.4} (se {:.4})",
            estimate.wins,
            estimate.trials,
            estimate.probability(),
            estimate.standard_error()
        );
        Ok(estimate)
    }

    fn run_trials_in_parallel<R: Rng + ?Sized>(
        &self,
        snapshot: &RoundSnapshot<'_>,
        rng: &mut R,
    ) -> Result<u32, Error> {
        let number_of_threads = u32::try_from(self.number_of_threads).unwrap_or(self.trials);
        let mut dispatched: Vec<(u64, u32)> = Vec::new();
        for i in 0..number_of_threads {
            let share =
                self.trials / number_of_threads + u32::from(i < self.trials % number_of_threads);
            let seed: u64 = rng.gen();
            if share > 0 {
                dispatched.push((seed, share));
            }
        }

        let snapshot = *snapshot;
        std::thread::scope(|scope| -> Result<u32, Error> {
            let threads: Vec<_> = dispatched
                .iter()
                .map(|&(seed, share)| {
                    scope.spawn(move || {
                        let mut worker_rng = StdRng::seed_from_u64(seed);
                        run_trials(&snapshot, share, &mut worker_rng)
                    })
                })
                .collect();

            let mut wins = 0;
            for thread in threads {
                wins += thread.join().map_err(|_| Error::WorkerPanicked)?;
            }
            Ok(wins)
        })
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Estimator {
            trials: DEFAULT_TRIALS,
            number_of_threads: 1,
        }
    }
}

fn run_trials<R: Rng + ?Sized>(snapshot: &RoundSnapshot<'_>, trials: u32, rng: &mut R) -> u32 {
    // The player stands, so the player's total is the same in every trial.
    let player_total = snapshot.player.total();
    let mut wins = 0;
    for _ in 0..trials {
        let mut deck = snapshot.deck.clone();
        let mut dealer_hand = snapshot.dealer.clone();
        deck.shuffle(rng);
        dealer::play_out(&mut dealer_hand, &mut deck);

        let dealer_total = dealer_hand.total();
        if dealer_total > BLACKJACK || player_total > dealer_total {
            wins += 1;
        }
    }
    wins
}
