//! Server-side replay of a submitted play log.
//!
//! Nothing about a session is stored while it is played. At submission time
//! every log entry is regenerated from `(seed, position, constraint)` and
//! compared against what the client claims it saw.

use thiserror::Error;

use crate::config::ScoringConfig;
use crate::generator::FamilyKind;
use crate::models::score::PlayedQuestion;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("question {index} does not match the seed: expected {expected}, got {submitted}")]
    SequenceMismatch {
        index: usize,
        expected: String,
        submitted: String,
    },
    #[error("answer recorded for question {index} is inconsistent with the question")]
    AnswerMismatch { index: usize },
    #[error("question {index} answered correctly in {time_ms}ms, below the {min_ms}ms floor")]
    TimingImplausible {
        index: usize,
        time_ms: u64,
        min_ms: u64,
    },
    #[error("score {score} is outside 0..={ceiling}")]
    ScoreImplausible { score: i64, ceiling: i64 },
    #[error("play log has {len} entries, limit is {max}")]
    LogTooLong { len: usize, max: usize },
}

impl ReplayError {
    pub fn reason(&self) -> &'static str {
        match self {
            ReplayError::SequenceMismatch { .. } => "sequence_mismatch",
            ReplayError::AnswerMismatch { .. } => "answer_mismatch",
            ReplayError::TimingImplausible { .. } => "timing_implausible",
            ReplayError::ScoreImplausible { .. } => "score_implausible",
            ReplayError::LogTooLong { .. } => "log_too_long",
        }
    }
}

/// Upper bounds the client-side scoring can reach per question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub base_points: i64,
    pub max_speed_bonus: i64,
    pub max_combo_bonus: i64,
    pub min_answer_ms: u64,
    pub max_questions: usize,
}

impl ScoringPolicy {
    pub fn per_question_ceiling(&self) -> i64 {
        self.base_points + self.max_speed_bonus + self.max_combo_bonus
    }

    fn entry_ceiling(&self, entry: &PlayedQuestion) -> i64 {
        if entry.correct {
            self.per_question_ceiling()
        } else {
            0
        }
    }
}

impl From<&ScoringConfig> for ScoringPolicy {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            base_points: config.base_points,
            max_speed_bonus: config.max_speed_bonus,
            max_combo_bonus: config.max_combo_bonus,
            min_answer_ms: config.min_answer_ms,
            max_questions: config.max_questions,
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::from(&ScoringConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSubmission {
    pub score: i64,
    pub ceiling: i64,
    pub questions: usize,
    pub correct: usize,
}

/// Replays `log` against `seed` and checks `declared_score` against the
/// recomputed ceiling. The first failing check rejects the whole log.
pub fn verify(
    family: FamilyKind,
    seed: &str,
    log: &[PlayedQuestion],
    declared_score: i64,
    policy: &ScoringPolicy,
) -> Result<VerifiedSubmission, ReplayError> {
    if log.len() > policy.max_questions {
        return Err(ReplayError::LogTooLong {
            len: log.len(),
            max: policy.max_questions,
        });
    }

    let mut ceiling = 0i64;
    let mut correct = 0usize;

    for (index, entry) in log.iter().enumerate() {
        let position = u32::try_from(index).map_err(|_| ReplayError::LogTooLong {
            len: log.len(),
            max: policy.max_questions,
        })?;
        let question = family.generate(seed, position, &entry.constraint);

        if question.id != entry.question_id {
            return Err(ReplayError::SequenceMismatch {
                index,
                expected: question.id,
                submitted: entry.question_id.clone(),
            });
        }

        let consistent = if entry.is_pass() {
            !entry.correct
        } else {
            question.choices.contains(&entry.selected_answer)
                && (entry.selected_answer == question.answer) == entry.correct
        };
        if !consistent {
            return Err(ReplayError::AnswerMismatch { index });
        }

        if entry.correct && entry.time_ms < policy.min_answer_ms {
            return Err(ReplayError::TimingImplausible {
                index,
                time_ms: entry.time_ms,
                min_ms: policy.min_answer_ms,
            });
        }

        if entry.correct {
            correct += 1;
        }
        ceiling += policy.entry_ceiling(entry);
    }

    if declared_score < 0 || declared_score > ceiling {
        return Err(ReplayError::ScoreImplausible {
            score: declared_score,
            ceiling,
        });
    }

    Ok(VerifiedSubmission {
        score: declared_score,
        ceiling,
        questions: log.len(),
        correct,
    })
}
