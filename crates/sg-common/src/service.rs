use tracing::{debug, instrument};

use crate::db::{
    CandidateFetchError, PgPool, UserStorageError, fetch_candidates_with_location,
    fetch_preference_vector, store_preference_vector,
};
use crate::matching::{RankedRecommendation, RecommendationEngine};
use crate::preference::{PreferenceVector, aggregate_observations};
use crate::{Item, Location};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("user storage error: {0}")]
    User(#[from] UserStorageError),
    #[error("candidate fetch error: {0}")]
    Candidates(#[from] CandidateFetchError),
}

/// 選択結果からユーザーの嗜好ベクトルを学習し、保存済みベクトルを
/// 全上書きする。同一ユーザーへの並行呼び出しは後勝ちになる。
#[instrument(skip(pool, shown, selected_ids))]
pub async fn learn_preferences(
    pool: &PgPool,
    user_id: i64,
    shown: &[Item],
    selected_ids: &[String],
) -> Result<PreferenceVector, ServiceError> {
    let vector = aggregate_observations(shown, selected_ids);
    store_preference_vector(pool, user_id, &vector).await?;

    debug!(user_id, shown = shown.len(), selected = selected_ids.len(), "preference vector learned");
    Ok(vector)
}

/// 保存済みの嗜好ベクトルと現在地から近隣のおすすめを返す。
/// 全ゼロベクトルのユーザーは（エラーではなく）空の結果になる。
#[instrument(skip(pool, engine))]
pub async fn recommend_nearby(
    pool: &PgPool,
    user_id: i64,
    origin: &Location,
    engine: &RecommendationEngine,
) -> Result<Vec<RankedRecommendation>, ServiceError> {
    let user_vector = fetch_preference_vector(pool, user_id).await?;
    let candidates = fetch_candidates_with_location(pool).await?;

    let ranked = engine.rank(&user_vector, origin, &candidates);
    debug!(user_id, candidates = candidates.len(), ranked = ranked.len(), "recommendations ranked");

    Ok(ranked)
}
