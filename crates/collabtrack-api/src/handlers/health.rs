//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// GET /api/health
///
/// Reports database and object-store reachability. Always returns 200;
/// the body says which dependency is down.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .is_ok();

    let storage = state.store.health_check().await.unwrap_or(false);

    Json(serde_json::json!({
        "status": if database && storage { "ok" } else { "degraded" },
        "database": database,
        "storage": storage,
        "storage_provider": state.store.provider_type(),
    }))
}
