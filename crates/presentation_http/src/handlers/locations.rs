//! Location directory handler

use application::LocationDirectory;
use axum::{Json, extract::State};
use serde::Serialize;

use crate::{error::ApiError, state::AppState};

/// Response for `GET /locations`
#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    /// Location name to id
    pub locations: LocationDirectory,
}

/// List every stored location keyed by name
pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<LocationsResponse>, ApiError> {
    let locations = state.queries()?.list_locations().await?;
    Ok(Json(LocationsResponse { locations }))
}

#[cfg(test)]
mod tests {
    use domain::LocationId;

    use super::*;

    #[test]
    fn ids_serialize_as_plain_integers() {
        let mut locations = LocationDirectory::new();
        locations.insert("nicosia".to_string(), LocationId::new(3));

        let json = serde_json::to_value(LocationsResponse { locations }).unwrap();
        assert_eq!(json, serde_json::json!({"locations": {"nicosia": 3}}));
    }

    #[tokio::test]
    async fn missing_storage_is_an_error() {
        let result = list_locations(State(AppState::default())).await;
        assert!(matches!(result, Err(ApiError::Internal(_))));
    }
}
