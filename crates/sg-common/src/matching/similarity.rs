use crate::preference::DIMENSION_COUNT;

/// コサイン類似度。どちらかがゼロベクトルのときは 0.0（未定義ではなく
/// 「嗜好なし＝最大限の不一致」として扱う）。
pub fn cosine_similarity(a: &[f64; DIMENSION_COUNT], b: &[f64; DIMENSION_COUNT]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
