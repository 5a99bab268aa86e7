//! Session and round state
//!
//! A `Session` is the whole progression state for one category selection.
//! It is replaced, never patched, when the category or language changes.

use std::fmt;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Category, Item, Language};

/// Identity of one round within a session, increasing from 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the current round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Prompt shown, waiting for a choice
    RoundActive,
    /// Correct choice made; waiting for the caller to `advance`
    RoundSolved,
}

/// Result of a learner's choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Correct,
    /// Wrong item (or unknown id); the round stays open
    Incorrect,
    /// Round already solved, or the choice targeted an older round
    Ignored,
}

/// Result of moving past a solved round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advance {
    NextRound,
    /// The last stage of a cycle was solved; stages start over
    CycleComplete,
    /// Current round is not solved yet; nothing changed
    NotReady,
}

/// One question: the item to find plus a decoy, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub correct: Item,
    /// Left/right order as shown; contains `correct` exactly once
    pub options: [Item; 2],
    pub solved: bool,
}

impl Round {
    /// The option that is not the correct item
    pub fn decoy(&self) -> &Item {
        if self.options[0].id == self.correct.id {
            &self.options[1]
        } else {
            &self.options[0]
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{category}/{language} has {count} item(s); a round needs at least 2")]
    TooFewItems {
        category: Category,
        language: Language,
        count: usize,
    },
}

/// Progression state for one category + language selection
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) category: Category,
    pub(super) language: Language,
    pub(super) seed: u64,
    /// Catalog list permuted once at start
    pub(super) items: Vec<Item>,
    /// Index into `items` of the current correct item
    pub(super) round_cursor: usize,
    /// 0..STAGES_PER_CYCLE
    pub(super) stage_cursor: u8,
    pub(super) round: Round,
    pub(super) rng: Pcg32,
}

impl Session {
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Working order of the session's items
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn round_cursor(&self) -> usize {
        self.round_cursor
    }

    pub fn stage_cursor(&self) -> u8 {
        self.stage_cursor
    }

    pub fn phase(&self) -> Phase {
        if self.round.solved {
            Phase::RoundSolved
        } else {
            Phase::RoundActive
        }
    }
}
