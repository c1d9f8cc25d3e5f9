pub mod geo;
pub mod pipeline;
pub mod similarity;

pub use geo::{EARTH_RADIUS_KM, haversine_km};
pub use pipeline::{RankedRecommendation, RecommendConfig, RecommendationEngine};
pub use similarity::cosine_similarity;
