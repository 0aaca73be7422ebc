use axum::extract::State;
use axum::Json;

use rankbridge_core::assign;
use rankbridge_core::cache::RankColorMap;
use rankbridge_core::RankError;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/rank-colors — the current rank name → hex color snapshot.
///
/// Always answers from memory; an empty object until the first successful
/// refresh.
pub async fn get_rank_colors(State(app): State<AppState>) -> Json<RankColorMap> {
    Json(app.cache.snapshot().as_ref().clone())
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRankBody {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    new_rank: Option<String>,
}

/// POST /api/assign-rank — swap a member's rank role for `newRank`.
///
/// `newRank` must be a key of the current color snapshot; anything else is
/// rejected before any upstream call is made.
pub async fn assign_rank(
    State(app): State<AppState>,
    Json(body): Json<AssignRankBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user_id = body
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(RankError::MissingField("userId"))?;
    let new_rank = body
        .new_rank
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(RankError::MissingField("newRank"))?;

    if !app.cache.contains_rank(new_rank) {
        return Err(RankError::UnknownRank(new_rank.to_string()).into());
    }

    assign::set_rank(
        app.platform.as_ref(),
        app.cache.allowlist(),
        user_id,
        new_rank,
    )
    .await?;

    Ok(Json(serde_json::json!({ "success": true })))
}
