use crate::api::AppState;
use crate::fallback::{self, DataSource};
use crate::ranking::{self, RankedBuilder};
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Feed page size.
const PAGE_LIMIT: usize = 20;

#[derive(Debug, Serialize, Deserialize)]
pub struct BuilderListResponse {
    pub success: bool,
    pub builders: Vec<RankedBuilder>,
    pub source: DataSource,
}

pub async fn list_builders(State(state): State<AppState>) -> Json<BuilderListResponse> {
    let (builders, source) = fallback::fetch_builders(&state.db_path, PAGE_LIMIT);
    let builders = ranking::rank_builders(builders);
    Json(BuilderListResponse {
        success: true,
        builders,
        source,
    })
}
