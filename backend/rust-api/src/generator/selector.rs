//! Turns `(seed, index, constraint)` into a question.
//!
//! Each index gets its own stream keyed by `"{seed}-{index}"`, so any single
//! question can be rebuilt without replaying the ones before it. The same
//! stream is consumed by archetype selection, the generator and the
//! distractors, in that order.

use super::distractor::synthesize;
use super::question::{clamp_level, Candidate, Constraint, Question};
use super::rng::SeededRng;
use super::{ArchetypeSpec, QuestionFamily};
use crate::metrics::GENERATION_FALLBACKS_TOTAL;

/// Archetype draws + generator calls before the fallback question.
const MAX_ATTEMPTS: usize = 50;
/// Redraws spent avoiding the previous question's archetype.
const ANTI_REPEAT_DRAWS: usize = 10;

const FALLBACK_TYPE_TAG: &str = "arithmetic";

pub fn question_id<F: QuestionFamily>(seed: &str, index: u32) -> String {
    format!("{}{seed}-{index}", F::ID_PREFIX)
}

fn stream(seed: &str, index: u32) -> SeededRng {
    SeededRng::from_key(&format!("{seed}-{index}"))
}

/// Archetypes eligible under `constraint`. A tag filter that matches
/// nothing widens to the whole family.
pub fn eligible<F: QuestionFamily>(constraint: &Constraint) -> Vec<F::Archetype> {
    match constraint {
        Constraint::Level { level } => F::level_pool(clamp_level(*level)).to_vec(),
        Constraint::Tags { tags } => {
            let filtered: Vec<F::Archetype> = F::all()
                .iter()
                .copied()
                .filter(|a| tags.iter().any(|t| a.matches_tag(t)))
                .collect();
            if filtered.is_empty() {
                F::all().to_vec()
            } else {
                filtered
            }
        }
    }
}

/// First draw of the previous index's stream against the current pool.
///
/// This is what index-1 picked unless its own first draw was redrawn or
/// failed to generate; close enough to break up runs and still derivable
/// from the seed alone.
fn previous_archetype<A: ArchetypeSpec>(seed: &str, index: u32, pool: &[A]) -> Option<A> {
    if index == 0 || pool.len() < 2 {
        return None;
    }
    Some(stream(seed, index - 1).pick(pool))
}

fn draw_archetype<A: ArchetypeSpec>(
    rng: &mut SeededRng,
    pool: &[A],
    previous: Option<A>,
    redraws_left: &mut usize,
) -> A {
    loop {
        let archetype = rng.pick(pool);
        if Some(archetype) != previous || *redraws_left == 0 {
            return archetype;
        }
        *redraws_left -= 1;
    }
}

pub fn generate<F: QuestionFamily>(seed: &str, index: u32, constraint: &Constraint) -> Question {
    let pool = eligible::<F>(constraint);
    let previous = previous_archetype(seed, index, &pool);
    let mut rng = stream(seed, index);
    let mut redraws_left = ANTI_REPEAT_DRAWS;

    for _ in 0..MAX_ATTEMPTS {
        let archetype = draw_archetype(&mut rng, &pool, previous, &mut redraws_left);
        let Some(candidate) = archetype.generate(&mut rng) else {
            continue;
        };
        if !candidate.is_valid() {
            continue;
        }
        return assemble::<F>(seed, index, archetype, candidate, &mut rng);
    }

    tracing::warn!(
        family = F::NAME,
        seed,
        index,
        "question generation exhausted; serving fallback"
    );
    GENERATION_FALLBACKS_TOTAL
        .with_label_values(&[F::NAME])
        .inc();
    fallback::<F>(seed, index)
}

fn assemble<F: QuestionFamily>(
    seed: &str,
    index: u32,
    archetype: F::Archetype,
    candidate: Candidate,
    rng: &mut SeededRng,
) -> Question {
    let choices = match synthesize(candidate.answer, rng, archetype.distractor_profile()) {
        Ok(choices) => choices,
        Err(e) => {
            // Validity was checked above, so this is a generator bug.
            tracing::error!(?archetype, seed, index, "distractor synthesis failed: {}", e);
            if cfg!(debug_assertions) {
                panic!("distractor synthesis failed for {archetype:?}: {e}");
            }
            return fallback::<F>(seed, index);
        }
    };

    Question {
        id: question_id::<F>(seed, index),
        display_text: candidate.display_text,
        answer: candidate.answer,
        choices,
        type_tag: archetype.type_tag().to_string(),
        level: candidate.level,
        cognitive_tag: archetype.cognitive_tag(),
        diagram: candidate.diagram,
    }
}

fn fallback<F: QuestionFamily>(seed: &str, index: u32) -> Question {
    Question {
        id: question_id::<F>(seed, index),
        display_text: "2 + 3".to_string(),
        answer: 5,
        choices: vec![3, 4, 5, 6, 7],
        type_tag: FALLBACK_TYPE_TAG.to_string(),
        level: 1,
        cognitive_tag: None,
        diagram: None,
    }
}
