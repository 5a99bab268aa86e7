//! Round progression: start, choose, advance

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Advance, Outcome, Round, RoundId, Session, SessionError};
use crate::catalog::{Category, Item, Language, items_for};
use crate::consts::STAGES_PER_CYCLE;

impl Session {
    /// Start a session over the catalog list for `category` in `language`.
    ///
    /// The list is shuffled once (Fisher-Yates) and the first round is dealt.
    pub fn start(category: Category, language: Language, seed: u64) -> Result<Self, SessionError> {
        Self::with_items(category, language, items_for(category, language), seed)
    }

    /// Start a session over an explicit item list
    pub fn with_items(
        category: Category,
        language: Language,
        mut items: Vec<Item>,
        seed: u64,
    ) -> Result<Self, SessionError> {
        if items.len() < 2 {
            return Err(SessionError::TooFewItems {
                category,
                language,
                count: items.len(),
            });
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        items.shuffle(&mut rng);
        let round = deal_round(&items, 0, RoundId(0), &mut rng);

        log::debug!(
            "Session started: {category}/{language}, {} items, seed {seed}",
            items.len()
        );

        Ok(Self {
            category,
            language,
            seed,
            items,
            round_cursor: 0,
            stage_cursor: 0,
            round,
            rng,
        })
    }

    /// The round currently on screen. Stable until the next `advance`.
    pub fn current_round(&self) -> &Round {
        &self.round
    }

    /// Check a choice against the current round
    pub fn submit_choice(&mut self, item_id: &str) -> Outcome {
        if self.round.solved {
            return Outcome::Ignored;
        }
        if item_id == self.round.correct.id {
            self.round.solved = true;
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }

    /// Check a choice made while `round` was on screen.
    ///
    /// Taps that arrive after the session moved on are ignored.
    pub fn submit_choice_for(&mut self, round: RoundId, item_id: &str) -> Outcome {
        if round != self.round.id {
            log::debug!("Ignoring choice for stale round {round} (current {})", self.round.id);
            return Outcome::Ignored;
        }
        self.submit_choice(item_id)
    }

    /// Move past a solved round: bump the stage (wrapping per cycle) and
    /// the list cursor (wrapping per list), then deal the next round.
    pub fn advance(&mut self) -> Advance {
        if !self.round.solved {
            return Advance::NotReady;
        }

        let event = if self.stage_cursor + 1 >= STAGES_PER_CYCLE {
            self.stage_cursor = 0;
            Advance::CycleComplete
        } else {
            self.stage_cursor += 1;
            Advance::NextRound
        };

        self.round_cursor = (self.round_cursor + 1) % self.items.len();
        let next_id = RoundId(self.round.id.0 + 1);
        self.round = deal_round(&self.items, self.round_cursor, next_id, &mut self.rng);

        event
    }
}

/// Build the round for `cursor`: the item there plus a uniformly chosen
/// decoy from the rest, in random left/right order.
fn deal_round(items: &[Item], cursor: usize, id: RoundId, rng: &mut Pcg32) -> Round {
    let correct_idx = cursor % items.len();

    // Draw from the n-1 other slots by skipping over the correct one
    let pick = rng.random_range(0..items.len() - 1);
    let decoy_idx = if pick >= correct_idx { pick + 1 } else { pick };

    let correct = items[correct_idx].clone();
    let decoy = items[decoy_idx].clone();
    let options = if rng.random_bool(0.5) {
        [correct.clone(), decoy]
    } else {
        [decoy, correct.clone()]
    };

    Round {
        id,
        correct,
        options,
        solved: false,
    }
}
