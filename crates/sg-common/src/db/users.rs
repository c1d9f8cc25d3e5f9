use deadpool_postgres::PoolError;
use tokio_postgres::Error as PgError;
use tokio_postgres::types::ToSql;
use tracing::instrument;

use crate::db::{PgPool, dimension_columns, preference_vector_from_row};
use crate::preference::{PREFERENCE_DIMENSIONS, PreferenceVector};

#[derive(Debug, thiserror::Error)]
pub enum UserStorageError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
    #[error("user not found: {0}")]
    NotFound(i64),
}

/// Fetch the stored preference vector for a user. Columns that were never
/// written read back as zero; a missing user row is an error.
#[instrument(skip(pool))]
pub async fn fetch_preference_vector(
    pool: &PgPool,
    user_id: i64,
) -> Result<PreferenceVector, UserStorageError> {
    let client = pool.get().await?;

    let query = format!(
        "SELECT {} FROM users WHERE user_id = $1",
        dimension_columns()
    );
    let row = client
        .query_opt(&query, &[&user_id])
        .await?
        .ok_or(UserStorageError::NotFound(user_id))?;

    Ok(preference_vector_from_row(&row))
}

/// Overwrite all 16 preference columns for a user. The previous vector is
/// discarded, never merged. Concurrent writers race and the last one wins.
#[instrument(skip(pool, vector))]
pub async fn store_preference_vector(
    pool: &PgPool,
    user_id: i64,
    vector: &PreferenceVector,
) -> Result<(), UserStorageError> {
    let client = pool.get().await?;

    let set_clause = PREFERENCE_DIMENSIONS
        .iter()
        .enumerate()
        .map(|(idx, dimension)| format!("{dimension} = ${}", idx + 2))
        .collect::<Vec<_>>()
        .join(", ");
    let query = format!("UPDATE users SET {set_clause} WHERE user_id = $1");

    let scores = vector.scores();
    let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(scores.len() + 1);
    params.push(&user_id);
    for score in &scores {
        params.push(score);
    }

    let rows = client.execute(&query, &params).await?;
    if rows == 0 {
        return Err(UserStorageError::NotFound(user_id));
    }

    Ok(())
}
