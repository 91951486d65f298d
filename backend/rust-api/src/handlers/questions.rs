use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};

use super::{api_error, ApiError};
use crate::generator::{FamilyKind, Question};
use crate::metrics::QUESTIONS_GENERATED_TOTAL;
use crate::models::question::QuestionQuery;

/// GET /api/v1/questions/{family}/{seed}/{index}
///
/// Same derivation the client runs locally and the replay check runs at
/// submission, exposed for thin clients and practice mode.
pub async fn get_question(
    Path((family, seed, index)): Path<(String, String, u32)>,
    Query(query): Query<QuestionQuery>,
) -> Result<Json<Question>, ApiError> {
    let family: FamilyKind = family
        .parse()
        .map_err(|e: String| api_error(StatusCode::NOT_FOUND, "unknown_family", e))?;

    let question = family.generate(&seed, index, &query.constraint());
    QUESTIONS_GENERATED_TOTAL
        .with_label_values(&[family.as_str()])
        .inc();
    tracing::debug!(%family, seed = %seed, index, question_id = %question.id, "Generated question");

    Ok(Json(question))
}
