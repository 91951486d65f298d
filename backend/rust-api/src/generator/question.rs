use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of answer buttons shown for every question.
pub const CHOICE_COUNT: usize = 5;

/// Upper bound on accepted answers; larger values read badly on a button.
pub const MAX_ANSWER: i64 = 999_999;

/// A fully assembled question. Never stored: rebuilt on demand from
/// `(family, seed, index, constraint)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub display_text: String,
    pub answer: i64,
    pub choices: Vec<i64>,
    pub type_tag: String,
    pub level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cognitive_tag: Option<CognitiveSkill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagram: Option<Diagram>,
}

/// What a single generator hands back before choices are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub display_text: String,
    pub answer: i64,
    pub level: u8,
    pub diagram: Option<Diagram>,
}

impl Candidate {
    pub fn new(display_text: impl Into<String>, answer: i64, level: u8) -> Self {
        Self {
            display_text: display_text.into(),
            answer,
            level,
            diagram: None,
        }
    }

    pub fn with_diagram(mut self, diagram: Diagram) -> Self {
        self.diagram = Some(diagram);
        self
    }

    /// Positive integer small enough to render.
    pub fn is_valid(&self) -> bool {
        self.answer > 0 && self.answer <= MAX_ANSWER
    }
}

/// Skill axis the cognitive question family is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveSkill {
    Computation,
    Understanding,
    Reasoning,
    Application,
}

impl CognitiveSkill {
    pub const ALL: [CognitiveSkill; 4] = [
        CognitiveSkill::Computation,
        CognitiveSkill::Understanding,
        CognitiveSkill::Reasoning,
        CognitiveSkill::Application,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CognitiveSkill::Computation => "computation",
            CognitiveSkill::Understanding => "understanding",
            CognitiveSkill::Reasoning => "reasoning",
            CognitiveSkill::Application => "application",
        }
    }
}

impl fmt::Display for CognitiveSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drawing instructions for geometry questions. The renderer owns the
/// meaning; the generator only guarantees the numbers match the text and
/// never include the asked-for value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagram {
    Triangle { known_angles: [i64; 2] },
    ExteriorAngle { interior_angles: [i64; 2] },
    ParallelLines { given_angle: i64, relation: AngleRelation },
    /// `None` marks the side being asked for.
    RightTriangle {
        legs: [Option<i64>; 2],
        hypotenuse: Option<i64>,
    },
    SimilarTriangles { small_sides: [i64; 2], large_side: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleRelation {
    Corresponding,
    Alternate,
    CoInterior,
}

/// Narrows which archetypes are eligible for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// Fixed level → archetype table, 1..=5 (clamped).
    Level { level: u8 },
    /// Explicit type tags, or cognitive skill names for the cognitive family.
    Tags { tags: Vec<String> },
}

impl Constraint {
    pub fn level(level: u8) -> Self {
        Constraint::Level { level }
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constraint::Tags {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Constraint::Level { level: 1 }
    }
}

pub fn clamp_level(level: u8) -> u8 {
    level.clamp(1, 5)
}
