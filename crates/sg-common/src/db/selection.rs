use deadpool_postgres::PoolError;
use tokio_postgres::{Error as PgError, Row};
use tracing::instrument;

use crate::Item;
use crate::db::{PgPool, dimension_columns, preference_vector_from_row};

#[derive(Debug, thiserror::Error)]
pub enum SelectionFetchError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

/// Random sample of catalog items shown to a user in one selection round.
#[derive(Debug, Clone, Default)]
pub struct SelectionBatch {
    pub suppliers: Vec<Item>,
    pub products: Vec<Item>,
}

fn item_from_row(row: &Row, id: String) -> Item {
    Item {
        id,
        name: row.get("name"),
        description: row.get("description"),
        image_url: row.get("image_url"),
        preferences: preference_vector_from_row(row),
    }
}

/// Fetch `limit` random suppliers and `limit` random products for the
/// selection round. Sampling happens database-side (ORDER BY RANDOM()), so
/// repeated rounds show different items.
#[instrument(skip(pool))]
pub async fn fetch_items_for_selection(
    pool: &PgPool,
    limit: i64,
) -> Result<SelectionBatch, SelectionFetchError> {
    let client = pool.get().await?;
    let columns = dimension_columns();

    let supplier_query = format!(
        "SELECT supplier_id, name, description, image_url, {columns} \
         FROM suppliers ORDER BY RANDOM() LIMIT $1"
    );
    let suppliers = client
        .query(&supplier_query, &[&limit])
        .await?
        .iter()
        .map(|row| item_from_row(row, format!("s{}", row.get::<_, i64>("supplier_id"))))
        .collect();

    let product_query = format!(
        "SELECT product_code, name, description, image_url, {columns} \
         FROM products ORDER BY RANDOM() LIMIT $1"
    );
    let products = client
        .query(&product_query, &[&limit])
        .await?
        .iter()
        .map(|row| item_from_row(row, row.get("product_code")))
        .collect();

    Ok(SelectionBatch {
        suppliers,
        products,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_batch_defaults_to_empty() {
        let batch = SelectionBatch::default();
        assert!(batch.suppliers.is_empty());
        assert!(batch.products.is_empty());
    }
}
