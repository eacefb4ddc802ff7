//! `GET /api/v1` - entry point listing the available resources

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiIndex {
    pub message: String,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Endpoints {
    pub movies: String,
    pub movie: String,
}

#[utoipa::path(
    get,
    path = "/api/v1",
    tag = "Index",
    responses((status = 200, description = "API entry point", body = ApiIndex))
)]
pub async fn api_index() -> Json<ApiIndex> {
    Json(ApiIndex {
        message: "Movie API v1".to_string(),
        endpoints: Endpoints {
            movies: "/api/v1/movies".to_string(),
            movie: "/api/v1/movies/:id".to_string(),
        },
    })
}
