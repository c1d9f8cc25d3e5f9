pub mod candidates;
pub mod pool;
pub mod selection;
pub mod users;

// Keep re-exports unique so downstream crates see a single symbol per helper.
pub use candidates::{
    CandidateFetchError, fetch_candidates_with_location, fetch_product_candidates,
    fetch_supplier_candidates,
};
pub use pool::{DbPoolError, PgPool, create_pool_from_url, create_pool_from_url_checked};
pub use selection::{SelectionBatch, SelectionFetchError, fetch_items_for_selection};
pub use users::{UserStorageError, fetch_preference_vector, store_preference_vector};

use tokio_postgres::Row;

use crate::preference::{DIMENSION_COUNT, PREFERENCE_DIMENSIONS, PreferenceVector};

/// Comma-separated preference columns in canonical order, for SELECT lists.
pub(crate) fn dimension_columns() -> String {
    PREFERENCE_DIMENSIONS.join(", ")
}

/// Map the 16 preference columns of a row into a vector. NULL reads as 0,
/// which also covers users whose vector was never learned.
pub(crate) fn preference_vector_from_row(row: &Row) -> PreferenceVector {
    let mut scores = [0i32; DIMENSION_COUNT];
    for (slot, dimension) in scores.iter_mut().zip(PREFERENCE_DIMENSIONS) {
        *slot = row.get::<_, Option<i32>>(dimension).unwrap_or(0);
    }

    PreferenceVector::from_scores(scores)
}
