use std::collections::HashSet;

use crate::Item;
use crate::preference::vector::{DIMENSION_COUNT, PreferenceVector};

/// 非選択アイテムに適用する負の重み。選択 (+1.0) に対して 1/5 の弱いシグナル。
pub const UNSELECTED_WEIGHT: f64 = 0.2;

/// 提示されたアイテム群と選択された id 集合から嗜好ベクトルを学習する。
///
/// 選択されたアイテムのベクトルを加算、非選択は `UNSELECTED_WEIGHT` 倍を減算し、
/// 最大の次元が 100 になるよう比例スケールする。正の蓄積がひとつも無い場合は
/// 全ゼロのベクトルを返す。結果は保存済みベクトルの全上書き用であり、過去の
/// 学習結果とはマージしない。
pub fn aggregate_observations(shown: &[Item], selected_ids: &[String]) -> PreferenceVector {
    let selected: HashSet<&str> = selected_ids.iter().map(String::as_str).collect();

    let mut accumulator = [0.0f64; DIMENSION_COUNT];
    for item in shown {
        let weights = item.preferences.as_array();
        if selected.contains(item.id.as_str()) {
            for (acc, weight) in accumulator.iter_mut().zip(weights) {
                *acc += weight;
            }
        } else {
            for (acc, weight) in accumulator.iter_mut().zip(weights) {
                *acc -= weight * UNSELECTED_WEIGHT;
            }
        }
    }

    let max_score = accumulator.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max_score <= 0.0 {
        return PreferenceVector::default();
    }

    let mut scores = [0i32; DIMENSION_COUNT];
    for (slot, value) in scores.iter_mut().zip(accumulator) {
        // 負の次元はそのまま残す（クランプしない）
        *slot = (value / max_score * 100.0).round() as i32;
    }

    PreferenceVector::from_scores(scores)
}
