//! Display-name resolution for grouped restaurant ids

use std::collections::HashMap;

use crate::store::{RecordStore, StoreError};

/// Placeholder for restaurant ids with no reference row
pub const UNKNOWN_RESTAURANT: &str = "Unknown";

/// Resolve display names for the given restaurant ids in one batched
/// lookup. Every input id gets an entry; a dangling id maps to
/// [`UNKNOWN_RESTAURANT`] rather than failing the request.
pub async fn resolve_restaurant_names(
    store: &dyn RecordStore,
    ids: &[String],
) -> Result<HashMap<String, String>, StoreError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let found = store.restaurants_by_ids(ids).await?;
    let by_id: HashMap<&str, &str> = found
        .iter()
        .map(|r| (r.restaurant_id.as_str(), r.name.as_str()))
        .collect();

    Ok(ids
        .iter()
        .map(|id| {
            let name = by_id
                .get(id.as_str())
                .copied()
                .unwrap_or(UNKNOWN_RESTAURANT);
            (id.clone(), name.to_string())
        })
        .collect())
}
