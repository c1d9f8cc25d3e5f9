pub mod db;
pub mod logging;
pub mod matching;
pub mod preference;
pub mod service;

use serde::{Deserialize, Serialize};

use preference::PreferenceVector;

// Commonly used data models shared by preference learning and recommendation.

/// Geographic point as stored in the suppliers table (`{"lat": .., "lng": ..}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Catalog entry shown to users during the selection round.
/// Supplier ids are `s{supplier_id}`, product ids are the product code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub preferences: PreferenceVector,
}

/// Catalog entry eligible for ranking. Suppliers carry their own location;
/// product candidates inherit the owning supplier's location at fetch time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub item: Item,
    pub location: Option<Location>,
    pub categories: Vec<String>,
}
