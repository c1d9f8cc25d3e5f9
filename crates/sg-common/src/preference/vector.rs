use serde::{Deserialize, Serialize};

/// 嗜好ベクトルの次元数。
pub const DIMENSION_COUNT: usize = 16;

/// 16 次元の正準順序。ベクトルと配列の相互変換、SQL のカラムリスト、
/// 行マッパーはすべてこのリストを参照する。順序を変えると既存ユーザーの
/// 保存済みスコアと整合しなくなる。
pub const PREFERENCE_DIMENSIONS: [&str; DIMENSION_COUNT] = [
    "heritage_soul",
    "modern_heirloom",
    "folk_heart",
    "fresh_folk",
    "masterpiece",
    "innovative_classic",
    "craft_sense",
    "smart_craft",
    "signature_mood",
    "iconic_style",
    "local_trend",
    "playful_pop",
    "design_master",
    "global_trend",
    "smart_local",
    "smart_pick",
];

/// ユーザー・サプライヤー・商品で共通の 16 次元嗜好ベクトル。
/// 各次元はおおむね 0〜100 の整数だが、学習結果では負値も許容される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceVector {
    pub heritage_soul: i32,
    pub modern_heirloom: i32,
    pub folk_heart: i32,
    pub fresh_folk: i32,
    pub masterpiece: i32,
    pub innovative_classic: i32,
    pub craft_sense: i32,
    pub smart_craft: i32,
    pub signature_mood: i32,
    pub iconic_style: i32,
    pub local_trend: i32,
    pub playful_pop: i32,
    pub design_master: i32,
    pub global_trend: i32,
    pub smart_local: i32,
    pub smart_pick: i32,
}

impl PreferenceVector {
    /// `PREFERENCE_DIMENSIONS` の順序で整数スコアを取り出す。
    pub fn scores(&self) -> [i32; DIMENSION_COUNT] {
        [
            self.heritage_soul,
            self.modern_heirloom,
            self.folk_heart,
            self.fresh_folk,
            self.masterpiece,
            self.innovative_classic,
            self.craft_sense,
            self.smart_craft,
            self.signature_mood,
            self.iconic_style,
            self.local_trend,
            self.playful_pop,
            self.design_master,
            self.global_trend,
            self.smart_local,
            self.smart_pick,
        ]
    }

    /// `PREFERENCE_DIMENSIONS` の順序の配列からベクトルを組み立てる。
    pub fn from_scores(scores: [i32; DIMENSION_COUNT]) -> Self {
        Self {
            heritage_soul: scores[0],
            modern_heirloom: scores[1],
            folk_heart: scores[2],
            fresh_folk: scores[3],
            masterpiece: scores[4],
            innovative_classic: scores[5],
            craft_sense: scores[6],
            smart_craft: scores[7],
            signature_mood: scores[8],
            iconic_style: scores[9],
            local_trend: scores[10],
            playful_pop: scores[11],
            design_master: scores[12],
            global_trend: scores[13],
            smart_local: scores[14],
            smart_pick: scores[15],
        }
    }

    /// 数値計算用に実数配列へ変換する。
    pub fn as_array(&self) -> [f64; DIMENSION_COUNT] {
        self.scores().map(f64::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_names_are_unique() {
        for (idx, name) in PREFERENCE_DIMENSIONS.iter().enumerate() {
            assert_eq!(
                PREFERENCE_DIMENSIONS.iter().position(|n| n == name),
                Some(idx)
            );
        }
    }

    #[test]
    fn scores_round_trip_through_from_scores() {
        let scores = std::array::from_fn(|idx| idx as i32 * 7 - 20);
        let vector = PreferenceVector::from_scores(scores);
        assert_eq!(vector.scores(), scores);
    }

    #[test]
    fn field_order_matches_canonical_dimension_order() {
        // Build the vector from a JSON object keyed by dimension name; the
        // array views must line up index-for-index with PREFERENCE_DIMENSIONS.
        let object = PREFERENCE_DIMENSIONS
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.to_string(), serde_json::json!(idx as i32 + 1)))
            .collect::<serde_json::Map<_, _>>();

        let vector: PreferenceVector =
            serde_json::from_value(serde_json::Value::Object(object)).unwrap();

        for (idx, score) in vector.scores().into_iter().enumerate() {
            assert_eq!(score, idx as i32 + 1);
        }
    }

    #[test]
    fn missing_fields_deserialize_to_zero() {
        let vector: PreferenceVector =
            serde_json::from_value(serde_json::json!({"heritage_soul": 42})).unwrap();

        assert_eq!(vector.heritage_soul, 42);
        assert_eq!(vector.modern_heirloom, 0);
        assert_eq!(vector.smart_pick, 0);
    }
}
