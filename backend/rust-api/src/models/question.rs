use serde::Deserialize;

use crate::generator::Constraint;

/// Query string of `GET /api/v1/questions/{family}/{seed}/{index}`.
///
/// `tags` is a comma separated list; when it names anything it wins over
/// `level`.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionQuery {
    pub level: Option<u8>,
    pub tags: Option<String>,
}

impl QuestionQuery {
    pub fn constraint(&self) -> Constraint {
        let tags: Vec<&str> = self
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        if tags.is_empty() {
            Constraint::level(self.level.unwrap_or(1))
        } else {
            Constraint::tags(tags)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_take_precedence_over_level() {
        let query = QuestionQuery {
            level: Some(4),
            tags: Some("log, integral,,".to_string()),
        };
        assert_eq!(query.constraint(), Constraint::tags(["log", "integral"]));
    }

    #[test]
    fn blank_tags_fall_back_to_level() {
        let query = QuestionQuery {
            level: Some(3),
            tags: Some(" , ".to_string()),
        };
        assert_eq!(query.constraint(), Constraint::level(3));
        assert_eq!(QuestionQuery::default().constraint(), Constraint::level(1));
    }
}
