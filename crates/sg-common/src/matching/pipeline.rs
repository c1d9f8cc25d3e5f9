use tracing::debug;

use super::{geo::haversine_km, similarity::cosine_similarity};
use crate::preference::PreferenceVector;
use crate::{Candidate, Item, Location};

#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// 推薦対象とする最大距離（km）。これを超える候補は除外。
    pub max_distance_km: f64,
    /// 通過させる最小マッチスコア（0〜100）。これ未満は除外。
    pub min_match_score: i32,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            max_distance_km: 10.0,
            min_match_score: 40,
        }
    }
}

/// ランキング結果。レスポンス内にのみ存在し、永続化はしない。
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRecommendation {
    pub item: Item,
    pub location: Location,
    pub categories: Vec<String>,
    pub match_score: i32,
    pub distance_km: f64,
}

pub struct RecommendationEngine {
    config: RecommendConfig,
}

impl RecommendationEngine {
    pub fn new(config: RecommendConfig) -> Self {
        Self { config }
    }

    pub fn default() -> Self {
        Self::new(RecommendConfig::default())
    }

    /// 候補を地理的半径とマッチスコアで絞り込み、スコア降順に並べる。
    ///
    /// 位置情報の無い候補は黙ってスキップする。同スコアの候補は入力順を
    /// 保持する（安定ソート）。
    pub fn rank(
        &self,
        user_vector: &PreferenceVector,
        origin: &Location,
        candidates: &[Candidate],
    ) -> Vec<RankedRecommendation> {
        let user = user_vector.as_array();

        let mut ranked: Vec<_> = candidates
            .iter()
            .filter_map(|candidate| self.evaluate_candidate(&user, origin, candidate))
            .collect();

        ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        ranked
    }

    fn evaluate_candidate(
        &self,
        user: &[f64; crate::preference::DIMENSION_COUNT],
        origin: &Location,
        candidate: &Candidate,
    ) -> Option<RankedRecommendation> {
        let Some(location) = candidate.location else {
            debug!(item_id = %candidate.item.id, "candidate has no resolvable location; skipping");
            return None;
        };

        let distance = haversine_km(origin, &location);
        if distance > self.config.max_distance_km {
            return None;
        }

        let similarity = cosine_similarity(user, &candidate.item.preferences.as_array());
        // 整数キャストで 0 方向へ切り捨てる（四捨五入ではない）
        let match_score = (similarity * 100.0) as i32;
        if match_score < self.config.min_match_score {
            return None;
        }

        Some(RankedRecommendation {
            item: candidate.item.clone(),
            location,
            categories: candidate.categories.clone(),
            match_score,
            distance_km: (distance * 10.0).round() / 10.0,
        })
    }
}
