use deadpool_postgres::PoolError;
use serde_json::Value;
use tokio_postgres::{Error as PgError, Row};
use tracing::instrument;

use crate::db::{PgPool, dimension_columns, preference_vector_from_row};
use crate::{Candidate, Item, Location};

#[derive(Debug, thiserror::Error)]
pub enum CandidateFetchError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

/// The location column holds either a JSON object or (in older rows) a JSON
/// string wrapping one. Anything unparsable maps to `None` and the candidate
/// is later skipped by the ranker, never surfaced as an error.
fn parse_location(value: Option<Value>) -> Option<Location> {
    match value? {
        Value::String(raw) => serde_json::from_str(&raw).ok(),
        other => serde_json::from_value(other).ok(),
    }
}

fn parse_categories(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect(),
        _ => vec![],
    }
}

fn candidate_from_row(row: &Row, id: String, categories: Vec<String>) -> Candidate {
    Candidate {
        item: Item {
            id,
            name: row.get("name"),
            description: row.get("description"),
            image_url: row.get("image_url"),
            preferences: preference_vector_from_row(row),
        },
        location: parse_location(row.get("location")),
        categories,
    }
}

/// Fetch every supplier as a ranking candidate, with its own location.
#[instrument(skip(pool))]
pub async fn fetch_supplier_candidates(
    pool: &PgPool,
) -> Result<Vec<Candidate>, CandidateFetchError> {
    let client = pool.get().await?;

    let query = format!(
        "SELECT supplier_id, name, description, image_url, location, categories, {} \
         FROM suppliers",
        dimension_columns()
    );
    let rows = client.query(&query, &[]).await?;

    Ok(rows
        .iter()
        .map(|row| {
            candidate_from_row(
                row,
                format!("s{}", row.get::<_, i64>("supplier_id")),
                parse_categories(row.get("categories")),
            )
        })
        .collect())
}

/// Fetch every product as a ranking candidate. Products have no location of
/// their own and inherit the owning supplier's.
#[instrument(skip(pool))]
pub async fn fetch_product_candidates(
    pool: &PgPool,
) -> Result<Vec<Candidate>, CandidateFetchError> {
    let client = pool.get().await?;

    let columns = dimension_columns()
        .split(", ")
        .map(|dimension| format!("p.{dimension}"))
        .collect::<Vec<_>>()
        .join(", ");
    let query = format!(
        "SELECT p.product_code, p.name, p.description, p.image_url, \
                s.location, s.categories, {columns} \
         FROM products p \
         JOIN suppliers s ON s.supplier_id = p.supplier_id"
    );
    let rows = client.query(&query, &[]).await?;

    Ok(rows
        .iter()
        .map(|row| {
            candidate_from_row(
                row,
                row.get("product_code"),
                parse_categories(row.get("categories")),
            )
        })
        .collect())
}

/// Every rankable catalog entry: suppliers first, then products. The
/// concatenation order is what breaks match-score ties downstream, so keep
/// it deterministic.
#[instrument(skip(pool))]
pub async fn fetch_candidates_with_location(
    pool: &PgPool,
) -> Result<Vec<Candidate>, CandidateFetchError> {
    let mut candidates = fetch_supplier_candidates(pool).await?;
    candidates.extend(fetch_product_candidates(pool).await?);
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_location_objects() {
        let value = serde_json::json!({"lat": 35.6812, "lng": 139.7671});
        let location = parse_location(Some(value)).unwrap();
        assert_eq!(location.lat, 35.6812);
        assert_eq!(location.lng, 139.7671);
    }

    #[test]
    fn parses_location_stored_as_json_string() {
        let value = Value::String(r#"{"lat": 34.7, "lng": 135.5}"#.into());
        let location = parse_location(Some(value)).unwrap();
        assert_eq!(location.lat, 34.7);
    }

    #[test]
    fn malformed_location_maps_to_none() {
        assert!(parse_location(None).is_none());
        assert!(parse_location(Some(Value::String("not json".into()))).is_none());
        assert!(parse_location(Some(serde_json::json!({"lat": 35.0}))).is_none());
        assert!(parse_location(Some(serde_json::json!(42))).is_none());
    }

    #[test]
    fn parses_category_arrays_and_ignores_the_rest() {
        let value = serde_json::json!(["craft", "food", 3]);
        assert_eq!(parse_categories(Some(value)), vec!["craft", "food"]);
        assert!(parse_categories(None).is_empty());
        assert!(parse_categories(Some(Value::String("craft".into()))).is_empty());
    }
}
