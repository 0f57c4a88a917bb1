//! Admin PIN endpoint

use api_types::auth::PinStatus;
use axum::Json;

/// Login gate for the parent view.
///
/// The PIN itself is checked by the admin middleware; reaching this handler
/// means it matched.
pub async fn verify() -> Json<PinStatus> {
    Json(PinStatus {
        status: "ok".to_string(),
    })
}
