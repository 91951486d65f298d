//! Wrong-answer synthesis.
//!
//! Each profile lists the values a student plausibly lands on after a
//! typical slip for that kind of question. The pool is shuffled with the
//! question's own stream so the choice set is part of the same deterministic
//! unfolding as the question text.

use thiserror::Error;

use super::question::CHOICE_COUNT;
use super::rng::SeededRng;

const DISTRACTOR_COUNT: usize = CHOICE_COUNT - 1;
const FILL_ATTEMPT_LIMIT: usize = 400;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DistractorError {
    #[error("distractors need a positive answer, got {0}")]
    NonPositiveAnswer(i64),
    #[error("could not find {DISTRACTOR_COUNT} distractors for answer {0}")]
    Exhausted(i64),
}

/// Mistake catalogue. Archetypes map onto these through their
/// `distractor_profile` lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistractorProfile {
    /// Powers: added instead of multiplied exponents, squared twice.
    Exponent,
    /// Roots: forgot to take the root, halved instead of rooted.
    Radical,
    /// Logarithms: small values, off-by-one and base slips.
    Logarithm,
    /// Substitution into polynomials: sign slips and dropped constants.
    Polynomial,
    /// Sequences and sums: fencepost errors.
    Series,
    /// Calculus at a point: dropped factor, doubled factor.
    Calculus,
    /// Counting: order mattered or not, over/under by one.
    Counting,
    /// Angles in degrees: complement/supplement confusion.
    Angle,
    /// Scaled quantities: linear vs squared vs cubed ratio.
    Ratio,
    /// Percent and mean: decimal point slips.
    Percent,
    /// Plain integer arithmetic.
    Arithmetic,
    /// Flat pool of neighbouring integers in `min..=max`.
    SmallRange { min: i64, max: i64 },
}

impl DistractorProfile {
    /// Answers given as a choice position `1..=5`.
    pub const POSITIONAL: DistractorProfile = DistractorProfile::SmallRange { min: 1, max: 5 };

    fn mistakes(self, a: i64) -> Vec<i64> {
        let mut pool = match self {
            DistractorProfile::Exponent => {
                let mut v = vec![a - 1, a + 1, a * 2, a + 2];
                if a % 2 == 0 {
                    v.push(a / 2);
                }
                if a <= 12 {
                    v.push(a * a);
                }
                v
            }
            DistractorProfile::Radical => {
                let mut v = vec![a - 1, a + 1, a * 2, a + 2];
                if a <= 30 {
                    v.push(a * a);
                }
                if a % 2 == 0 {
                    v.push(a / 2);
                }
                v
            }
            DistractorProfile::Logarithm => vec![a - 1, a + 1, a - 2, a + 2, a * 2, a + 10],
            DistractorProfile::Polynomial => {
                vec![a - 1, a + 1, a - 2, a + 2, a * 2, a + 10, a - 10]
            }
            DistractorProfile::Series => {
                let mut v = vec![a - 1, a + 1, a - 2, a + 2, a * 2];
                if a % 2 == 0 {
                    v.push(a / 2);
                }
                v
            }
            DistractorProfile::Calculus => {
                let mut v = vec![a - 1, a + 1, a * 2, a + 2, a - 2];
                if a % 2 == 0 {
                    v.push(a / 2);
                }
                if a % 3 == 0 {
                    v.push(a / 3);
                }
                v
            }
            DistractorProfile::Counting => {
                let mut v = vec![a - 1, a + 1, a * 2, a + 2];
                if a % 2 == 0 {
                    v.push(a / 2);
                }
                if a <= 200 {
                    v.push(a * 6);
                }
                v
            }
            DistractorProfile::Angle => vec![
                180 - a,
                90 - a,
                360 - a,
                a + 10,
                a - 10,
                a + 5,
                a - 5,
                a * 2,
            ],
            DistractorProfile::Ratio => {
                let mut v = vec![a - 1, a + 1, a * 2, a + 2];
                if a % 2 == 0 {
                    v.push(a / 2);
                }
                if a % 3 == 0 {
                    v.push(a / 3);
                }
                v
            }
            DistractorProfile::Percent => {
                let mut v = vec![a * 10, a - 1, a + 1, a + 5, a - 5, a * 2];
                if a % 10 == 0 {
                    v.push(a / 10);
                }
                v
            }
            DistractorProfile::Arithmetic => vec![a - 1, a + 1, a - 2, a + 2, a + 10, a - 10],
            DistractorProfile::SmallRange { min, max } => (min..=max).collect(),
        };
        pool.retain(|v| *v > 0 && *v != a);
        pool
    }
}

/// Outward walking step; grows with the answer so a 4-digit answer does not
/// get `answer ± 1` fillers only.
fn fill_step(answer: i64) -> i64 {
    match answer {
        ..=20 => 1,
        21..=100 => 2,
        101..=1000 => 10,
        _ => answer / 100,
    }
}

/// Builds the sorted five-value choice list containing `answer`.
pub fn synthesize(
    answer: i64,
    rng: &mut SeededRng,
    profile: DistractorProfile,
) -> Result<Vec<i64>, DistractorError> {
    if answer <= 0 {
        return Err(DistractorError::NonPositiveAnswer(answer));
    }

    let mut pool = profile.mistakes(answer);
    rng.shuffle(&mut pool);

    let mut picked: Vec<i64> = Vec::with_capacity(CHOICE_COUNT);
    for value in pool {
        if picked.len() == DISTRACTOR_COUNT {
            break;
        }
        if !picked.contains(&value) {
            picked.push(value);
        }
    }

    let step = fill_step(answer);
    let mut k = 1;
    let mut attempts = 0;
    while picked.len() < DISTRACTOR_COUNT && attempts < FILL_ATTEMPT_LIMIT {
        for value in [answer + k * step, answer - k * step] {
            attempts += 1;
            if picked.len() < DISTRACTOR_COUNT
                && value > 0
                && value != answer
                && !picked.contains(&value)
            {
                picked.push(value);
            }
        }
        k += 1;
    }

    if picked.len() < DISTRACTOR_COUNT {
        return Err(DistractorError::Exhausted(answer));
    }

    picked.push(answer);
    picked.sort_unstable();
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PROFILES: [DistractorProfile; 12] = [
        DistractorProfile::Exponent,
        DistractorProfile::Radical,
        DistractorProfile::Logarithm,
        DistractorProfile::Polynomial,
        DistractorProfile::Series,
        DistractorProfile::Calculus,
        DistractorProfile::Counting,
        DistractorProfile::Angle,
        DistractorProfile::Ratio,
        DistractorProfile::Percent,
        DistractorProfile::Arithmetic,
        DistractorProfile::POSITIONAL,
    ];

    fn assert_well_formed(answer: i64, choices: &[i64]) {
        assert_eq!(choices.len(), CHOICE_COUNT, "choices {choices:?}");
        assert!(choices.windows(2).all(|w| w[0] < w[1]), "not ascending: {choices:?}");
        assert!(choices.iter().all(|c| *c > 0), "non-positive: {choices:?}");
        assert_eq!(choices.iter().filter(|c| **c == answer).count(), 1);
    }

    #[test]
    fn every_profile_yields_five_sorted_distinct_choices() {
        let mut rng = SeededRng::from_key("distractors");
        for profile in ALL_PROFILES {
            for answer in [1, 2, 3, 5, 9, 17, 45, 90, 144, 999, 5_040, 123_456] {
                let choices = synthesize(answer, &mut rng, profile).unwrap();
                assert_well_formed(answer, &choices);
            }
        }
    }

    #[test]
    fn rejects_non_positive_answers() {
        let mut rng = SeededRng::new(1);
        assert_eq!(
            synthesize(0, &mut rng, DistractorProfile::Arithmetic),
            Err(DistractorError::NonPositiveAnswer(0))
        );
        assert_eq!(
            synthesize(-4, &mut rng, DistractorProfile::Angle),
            Err(DistractorError::NonPositiveAnswer(-4))
        );
    }

    #[test]
    fn positional_answers_always_offer_one_through_five() {
        let mut rng = SeededRng::new(9);
        for answer in 1..=5 {
            let choices = synthesize(answer, &mut rng, DistractorProfile::POSITIONAL).unwrap();
            assert_eq!(choices, vec![1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn small_answers_fall_back_to_outward_walk() {
        // Logarithm mistakes for 1 are {2, 3, 11}: one filler needed.
        let mut rng = SeededRng::new(3);
        let choices = synthesize(1, &mut rng, DistractorProfile::Logarithm).unwrap();
        assert_well_formed(1, &choices);
        assert!(choices.contains(&11));
    }

    #[test]
    fn same_stream_gives_same_choices() {
        let a = synthesize(60, &mut SeededRng::new(11), DistractorProfile::Angle).unwrap();
        let b = synthesize(60, &mut SeededRng::new(11), DistractorProfile::Angle).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fill_step_grows_with_magnitude() {
        assert_eq!(fill_step(7), 1);
        assert_eq!(fill_step(64), 2);
        assert_eq!(fill_step(512), 10);
        assert_eq!(fill_step(40_000), 400);
    }
}
