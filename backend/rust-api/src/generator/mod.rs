//! Deterministic question generation.
//!
//! Everything under this module is pure: a question is a function of
//! `(family, seed, index, constraint)` and nothing else. The browser client
//! runs the same algorithm, which is what lets the server replay a session
//! from its seed alone.

pub mod cognitive;
pub mod distractor;
pub mod general;
pub mod latex;
pub mod question;
pub mod rng;
pub mod selector;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use cognitive::{Cognitive, CognitiveArchetype};
pub use distractor::{DistractorError, DistractorProfile};
pub use general::{Archetype, General};
pub use question::{Candidate, CognitiveSkill, Constraint, Diagram, Question};
pub use rng::{hash_seed, SeededRng};

/// Draws per generator call before giving up on an archetype.
const GENERATOR_RETRY_LIMIT: usize = 30;

/// One question archetype: its tags and its generator.
pub trait ArchetypeSpec: Copy + Eq + fmt::Debug + 'static {
    fn type_tag(self) -> &'static str;

    fn cognitive_tag(self) -> Option<CognitiveSkill> {
        None
    }

    fn matches_tag(self, tag: &str) -> bool {
        self.type_tag() == tag
    }

    fn distractor_profile(self) -> DistractorProfile;

    /// Draws parameters from `rng` until a valid candidate appears, or
    /// returns `None` after the retry cap.
    fn generate(self, rng: &mut SeededRng) -> Option<Candidate>;
}

/// A family of archetypes sharing the selector.
pub trait QuestionFamily {
    type Archetype: ArchetypeSpec;

    const NAME: &'static str;
    const ID_PREFIX: &'static str;

    fn all() -> &'static [Self::Archetype];

    fn level_pool(level: u8) -> &'static [Self::Archetype];
}

/// Runtime handle for picking a family from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyKind {
    #[default]
    General,
    Cognitive,
}

impl FamilyKind {
    pub fn generate(self, seed: &str, index: u32, constraint: &Constraint) -> Question {
        match self {
            FamilyKind::General => selector::generate::<General>(seed, index, constraint),
            FamilyKind::Cognitive => selector::generate::<Cognitive>(seed, index, constraint),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FamilyKind::General => General::NAME,
            FamilyKind::Cognitive => Cognitive::NAME,
        }
    }
}

impl fmt::Display for FamilyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FamilyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(FamilyKind::General),
            "cognitive" => Ok(FamilyKind::Cognitive),
            other => Err(format!("unknown question family: {other}")),
        }
    }
}

fn retry_draws(
    rng: &mut SeededRng,
    draw: fn(&mut SeededRng) -> Option<Candidate>,
) -> Option<Candidate> {
    (0..GENERATOR_RETRY_LIMIT).find_map(|_| draw(rng).filter(Candidate::is_valid))
}

fn checked_pow(base: i64, exponent: i64) -> Option<i64> {
    let exponent = u32::try_from(exponent).ok()?;
    base.checked_pow(exponent)
}

fn binomial(n: i64, k: i64) -> Option<i64> {
    if k < 0 || k > n {
        return None;
    }
    let k = k.min(n - k);
    (0..k).try_fold(1i64, |acc, i| Some(acc.checked_mul(n - i)? / (i + 1)))
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a.abs()
    } else {
        gcd(b, a % b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_matches_pascal() {
        assert_eq!(binomial(5, 2), Some(10));
        assert_eq!(binomial(12, 4), Some(495));
        assert_eq!(binomial(6, 0), Some(1));
        assert_eq!(binomial(3, 4), None);
    }

    #[test]
    fn checked_pow_rejects_negative_exponents() {
        assert_eq!(checked_pow(3, 4), Some(81));
        assert_eq!(checked_pow(3, -1), None);
    }

    #[test]
    fn gcd_of_coprime_is_one() {
        assert_eq!(gcd(35, 12), 1);
        assert_eq!(gcd(36, 24), 12);
    }

    #[test]
    fn family_kind_round_trips_through_strings() {
        for kind in [FamilyKind::General, FamilyKind::Cognitive] {
            assert_eq!(kind.as_str().parse::<FamilyKind>(), Ok(kind));
        }
        assert!("trivia".parse::<FamilyKind>().is_err());
    }
}
