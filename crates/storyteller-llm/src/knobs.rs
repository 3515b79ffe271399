//! Randomized prompt knobs.
//!
//! Each story part gets a sentence cap, a plot setting, and a convergence
//! instruction drawn at random, so consecutive parts do not read alike.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::templates::{CONVERGE_TO_PREMISE, ENDINGS, PLOT_SETTINGS, SENTENCE_CAPS};

/// Knobs for one generated story part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartKnobs {
    /// Maximum number of sentences.
    pub length: u32,
    /// Plot setting to apply.
    pub setting: &'static str,
    /// Either the setting again or a nudge back towards the premise.
    pub convergence: &'static str,
}

impl PartKnobs {
    /// Draw knobs from the thread-local RNG.
    ///
    /// The RNG is dropped before this returns, so callers can hold the result
    /// across `.await` points.
    pub fn roll() -> Self {
        Self::roll_with(&mut rand::thread_rng())
    }

    pub fn roll_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let length = sentence_cap(rng);
        let setting = PLOT_SETTINGS.choose(rng).copied().unwrap_or(PLOT_SETTINGS[0]);
        let convergence = if rng.gen_bool(0.5) {
            setting
        } else {
            CONVERGE_TO_PREMISE
        };
        Self {
            length,
            setting,
            convergence,
        }
    }
}

/// Draw a sentence cap; short parts are weighted more heavily.
pub fn sentence_cap<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    SENTENCE_CAPS.choose(rng).copied().unwrap_or(1)
}

/// Draw an ending style.
pub fn ending<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    ENDINGS.choose(rng).copied().unwrap_or(ENDINGS[0])
}
