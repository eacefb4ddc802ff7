//! Movie REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    Json,
};

use super::dto::{ListMoviesQuery, MovieRequest, MovieResponse};
use crate::application::MovieService;
use crate::infrastructure::SeaOrmMovieRepository;
use crate::interfaces::http::common::{
    ApiError, ApiResponse, FiltersMeta, PaginationMeta, RootedJson, RootedJsonRejection,
};

pub type SharedMovieService = Arc<MovieService<SeaOrmMovieRepository>>;

/// State for the movie routes
#[derive(Clone)]
pub struct MoviesState {
    pub service: SharedMovieService,
}

#[utoipa::path(
    get,
    path = "/api/v1/movies",
    tag = "Movies",
    params(ListMoviesQuery),
    responses(
        (status = 200, description = "Page of movies, newest first", body = ApiResponse<Vec<MovieResponse>>)
    )
)]
pub async fn list_movies(
    State(state): State<MoviesState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<Vec<MovieResponse>>>, ApiError> {
    let params = ListMoviesQuery::parse(query.as_deref());
    let page = state.service.list(&params).await?;

    let pagination = PaginationMeta::from(&page.result);
    let movies: Vec<MovieResponse> = page.result.items.into_iter().map(Into::into).collect();

    Ok(Json(
        ApiResponse::success(movies, "Movies retrieved successfully")
            .with_pagination(pagination)
            .with_filters(FiltersMeta::from(page.filters)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie details", body = ApiResponse<MovieResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_movie(
    State(state): State<MoviesState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MovieResponse>>, ApiError> {
    let movie = state.service.get(&id).await?;
    Ok(Json(ApiResponse::success(
        movie.into(),
        "Movie retrieved successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/movies",
    tag = "Movies",
    request_body(content = MovieRequest, description = "Fields wrapped in a `movie` object"),
    responses(
        (status = 201, description = "Created", body = ApiResponse<MovieResponse>),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Validation failed; data holds field errors")
    )
)]
pub async fn create_movie(
    State(state): State<MoviesState>,
    RootedJson(body): RootedJson<MovieRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MovieResponse>>), ApiError> {
    let movie = state
        .service
        .create(body.into())
        .await
        .map_err(|e| ApiError::from_domain(e, "Movie creation failed"))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            movie.into(),
            "Movie created successfully",
        )),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/v1/movies/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie ID")),
    request_body(content = MovieRequest, description = "Only the supplied fields change. Also served as PUT"),
    responses(
        (status = 200, description = "Updated", body = ApiResponse<MovieResponse>),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed; data holds field errors")
    )
)]
pub async fn update_movie(
    State(state): State<MoviesState>,
    Path(id): Path<String>,
    body: Result<RootedJson<MovieRequest>, RootedJsonRejection>,
) -> Result<Json<ApiResponse<MovieResponse>>, ApiError> {
    // An unknown id is reported before any problem with the body.
    let RootedJson(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            state.service.get(&id).await?;
            return Err(rejection.into());
        }
    };

    let movie = state
        .service
        .update(&id, body.into())
        .await
        .map_err(|e| ApiError::from_domain(e, "Movie update failed"))?;

    Ok(Json(ApiResponse::success(
        movie.into(),
        "Movie updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/movies/{id}",
    tag = "Movies",
    params(("id" = String, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_movie(
    State(state): State<MoviesState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.service.delete(&id).await?;
    Ok(Json(ApiResponse::empty("Movie deleted successfully")))
}
