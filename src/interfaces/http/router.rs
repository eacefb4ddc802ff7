//! API Router with Swagger UI

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::MovieService;
use crate::config::CorsConfig;
use crate::infrastructure::SeaOrmMovieRepository;
use crate::interfaces::http::common::{ApiResponse, FiltersMeta, PaginationMeta, ResponseStatus};
use crate::interfaces::http::modules::{
    health, index,
    metrics::{http_metrics_middleware, prometheus_metrics, MetricsState},
    movies,
    request_id::request_id_middleware,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        index::api_index,
        movies::list_movies,
        movies::get_movie,
        movies::create_movie,
        movies::update_movie,
        movies::delete_movie,
    ),
    components(
        schemas(
            ApiResponse<movies::MovieResponse>,
            ApiResponse<Vec<movies::MovieResponse>>,
            ResponseStatus,
            PaginationMeta,
            FiltersMeta,
            movies::MovieResponse,
            movies::MovieRequest,
            health::HealthResponse,
            health::ComponentHealth,
            index::ApiIndex,
            index::Endpoints,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Index", description = "API entry point"),
        (name = "Movies", description = "Movie catalog: paginated, filterable listing and CRUD"),
    ),
    info(
        title = "Movie Catalog API",
        version = "1.0.0",
        description = "REST API for a catalog of films",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Browser access is limited to the configured origins; an empty list
/// still answers preflights but never grants an origin.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
            Method::HEAD,
        ])
        .allow_headers(Any)
        .allow_credentials(false)
        .max_age(Duration::from_secs(600))
}

/// Create the API router with all routes
pub fn create_api_router(
    db: DatabaseConnection,
    cors: &CorsConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let repo = Arc::new(SeaOrmMovieRepository::new(db.clone()));
    let movies_state = movies::MoviesState {
        service: Arc::new(MovieService::new(repo)),
    };

    let movie_routes = Router::new()
        .route("/", get(movies::list_movies).post(movies::create_movie))
        .route(
            "/{id}",
            get(movies::get_movie)
                .patch(movies::update_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .with_state(movies_state);

    let health_state = health::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/up", get(health::health_check))
        .with_state(health_state);

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: prometheus_handle,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .route("/api/v1", get(index::api_index))
        .nest("/api/v1/movies", movie_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::database::memory_db;

    struct TestApp {
        router: Router,
    }

    impl TestApp {
        async fn new() -> Self {
            Self::with_cors(CorsConfig::default()).await
        }

        async fn with_cors(cors: CorsConfig) -> Self {
            let handle = PrometheusBuilder::new().build_recorder().handle();
            Self {
                router: create_api_router(memory_db().await, &cors, handle),
            }
        }

        async fn send(&self, req: Request<Body>) -> Response {
            self.router.clone().oneshot(req).await.unwrap()
        }

        async fn get(&self, uri: &str) -> (StatusCode, Value) {
            let resp = self
                .send(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await;
            json_of(resp).await
        }

        async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
            self.send_raw(method, uri, &body.to_string()).await
        }

        async fn send_raw(&self, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
            let req = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap();
            json_of(self.send(req).await).await
        }

        async fn delete(&self, uri: &str) -> (StatusCode, Value) {
            let req = Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            json_of(self.send(req).await).await
        }

        async fn create(&self, title: &str, director: &str, year: i32, genre: &str) -> Value {
            let (status, body) = self
                .send_json(
                    "POST",
                    "/api/v1/movies",
                    json!({"movie": {"title": title, "director": director, "year": year, "genre": genre}}),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "{}", body);
            body["data"].clone()
        }

        async fn create_many(&self, n: usize) {
            for i in 1..=n {
                self.create(&format!("Movie {}", i), "Director", 2000, "Drama")
                    .await;
            }
        }

        async fn count(&self) -> u64 {
            let (_, body) = self.get("/api/v1/movies").await;
            body["pagination"]["total_count"].as_u64().unwrap()
        }
    }

    async fn json_of(resp: Response) -> (StatusCode, Value) {
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn titles(body: &Value) -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["title"].as_str().unwrap().to_string())
            .collect()
    }

    // ── Listing ─────────────────────────────────────────────────

    #[tokio::test]
    async fn list_defaults_to_first_page_of_twenty() {
        let app = TestApp::new().await;
        app.create_many(29).await;

        let (status, body) = app.get("/api/v1/movies").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Movies retrieved successfully");
        assert_eq!(body["data"].as_array().unwrap().len(), 20);
        assert_eq!(
            body["pagination"],
            json!({
                "current_page": 1,
                "per_page": 20,
                "total_count": 29,
                "total_pages": 2,
                "next_page": 2,
                "prev_page": null
            })
        );
        assert_eq!(body["filters"], json!({}));
        assert_eq!(titles(&body)[0], "Movie 29");
    }

    #[tokio::test]
    async fn second_page_holds_the_rest() {
        let app = TestApp::new().await;
        app.create_many(29).await;

        let (_, body) = app.get("/api/v1/movies?page=2").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 9);
        assert_eq!(body["pagination"]["current_page"], 2);
        assert_eq!(body["pagination"]["prev_page"], 1);
        assert!(body["pagination"]["next_page"].is_null());
    }

    #[tokio::test]
    async fn page_beyond_last_is_empty_success() {
        let app = TestApp::new().await;
        app.create_many(29).await;

        let (status, body) = app.get("/api/v1/movies?page=999").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());
        assert_eq!(body["pagination"]["current_page"], 999);
        assert_eq!(body["pagination"]["total_count"], 29);
    }

    #[tokio::test]
    async fn bad_pagination_input_is_normalized() {
        let app = TestApp::new().await;
        app.create_many(3).await;

        let cases = [
            ("page=0", 1, 20),
            ("page=-4", 1, 20),
            ("page=abc", 1, 20),
            ("per_page=0", 1, 20),
            ("per_page=abc", 1, 20),
            ("per_page=200", 1, 100),
            ("per_page=5", 1, 5),
        ];
        for (query, page, per_page) in cases {
            let (status, body) = app.get(&format!("/api/v1/movies?{}", query)).await;
            assert_eq!(status, StatusCode::OK, "{}", query);
            assert_eq!(body["pagination"]["current_page"], page, "{}", query);
            assert_eq!(body["pagination"]["per_page"], per_page, "{}", query);
        }
    }

    #[tokio::test]
    async fn custom_per_page_splits_pages() {
        let app = TestApp::new().await;
        app.create_many(19).await;

        let (_, body) = app.get("/api/v1/movies?per_page=5").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
        assert_eq!(body["pagination"]["total_pages"], 4);
    }

    #[tokio::test]
    async fn genre_filter_is_case_insensitive_and_exact() {
        let app = TestApp::new().await;
        app.create("Inception", "Christopher Nolan", 2010, "Sci-Fi").await;
        app.create("The Matrix", "Lana Wachowski", 1999, "Sci-Fi").await;
        app.create("The Godfather", "Francis Ford Coppola", 1972, "Crime").await;

        let (_, body) = app.get("/api/v1/movies?genre=sci-fi").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["filters"], json!({"genre": "sci-fi"}));

        let (_, body) = app.get("/api/v1/movies?genre=sci").await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_year_is_ignored() {
        let app = TestApp::new().await;
        app.create("Inception", "Christopher Nolan", 2010, "Sci-Fi").await;
        app.create("The Godfather", "Francis Ford Coppola", 1972, "Crime").await;

        let (status, body) = app.get("/api/v1/movies?year=1800").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["filters"], json!({}));

        let (_, body) = app.get("/api/v1/movies?year=2010").await;
        assert_eq!(titles(&body), vec!["Inception"]);
        assert_eq!(body["filters"]["year"], 2010);
    }

    #[tokio::test]
    async fn search_covers_title_and_director() {
        let app = TestApp::new().await;
        app.create("Inception", "Christopher Nolan", 2010, "Sci-Fi").await;
        app.create("The Matrix", "Lana Wachowski", 1999, "Sci-Fi").await;

        let (_, body) = app.get("/api/v1/movies?q=nolan").await;
        assert_eq!(titles(&body), vec!["Inception"]);

        let (_, body) = app.get("/api/v1/movies?q=MATRIX").await;
        assert_eq!(titles(&body), vec!["The Matrix"]);

        let (_, body) = app.get("/api/v1/movies?q=%25").await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn filters_combine() {
        let app = TestApp::new().await;
        app.create("Inception", "Christopher Nolan", 2010, "Sci-Fi").await;
        app.create("Interstellar", "Christopher Nolan", 2014, "Sci-Fi").await;
        app.create("The Dark Knight", "Christopher Nolan", 2008, "Action").await;
        app.create("The Matrix", "Lana Wachowski", 1999, "Sci-Fi").await;

        let (_, body) = app.get("/api/v1/movies?genre=Sci-Fi&q=Nolan").await;
        assert_eq!(titles(&body), vec!["Interstellar", "Inception"]);
        assert_eq!(body["filters"], json!({"genre": "Sci-Fi", "q": "Nolan"}));

        let (_, body) = app.get("/api/v1/movies?genre=Western&year=1950").await;
        assert!(body["data"].as_array().unwrap().is_empty());
        assert_eq!(body["pagination"]["total_count"], 0);
        assert_eq!(body["pagination"]["total_pages"], 0);
    }

    // ── Show ────────────────────────────────────────────────────

    #[tokio::test]
    async fn show_existing_movie() {
        let app = TestApp::new().await;
        let created = app.create("Inception", "Christopher Nolan", 2010, "Sci-Fi").await;

        let (status, body) = app
            .get(&format!("/api/v1/movies/{}", created["id"]))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Movie retrieved successfully");
        assert_eq!(body["data"]["title"], "Inception");
        assert_eq!(body["data"]["year"], 2010);
        for key in [
            "id", "title", "director", "year", "genre", "rating", "synopsis", "poster_url",
            "created_at", "updated_at",
        ] {
            assert!(body["data"].get(key).is_some(), "missing {}", key);
        }
    }

    #[tokio::test]
    async fn show_missing_movie_is_404_with_id() {
        let app = TestApp::new().await;
        for id in ["9999999", "abc"] {
            let (status, body) = app.get(&format!("/api/v1/movies/{}", id)).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["status"], "error");
            assert_eq!(body["message"], format!("Movie with ID {} not found", id));
            assert!(body["data"].is_null());
        }
    }

    // ── Create ──────────────────────────────────────────────────

    #[tokio::test]
    async fn create_with_full_payload() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send_json(
                "POST",
                "/api/v1/movies",
                json!({"movie": {
                    "title": "Interstellar",
                    "director": "Christopher Nolan",
                    "year": 2014,
                    "genre": "Sci-Fi",
                    "rating": 8.6,
                    "synopsis": "A team of explorers travel through a wormhole in space.",
                    "poster_url": "https://image.tmdb.org/t/p/w500/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg"
                }}),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Movie created successfully");
        assert_eq!(body["data"]["title"], "Interstellar");
        assert_eq!(body["data"]["rating"], json!(8.6));
        assert_eq!(app.count().await, 1);
    }

    #[tokio::test]
    async fn create_ignores_fields_outside_the_allow_list() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send_json(
                "POST",
                "/api/v1/movies",
                json!({"movie": {
                    "id": 4242,
                    "created_at": "1999-01-01T00:00:00Z",
                    "title": "Heat",
                    "director": "Michael Mann",
                    "year": 1995,
                    "genre": "Crime"
                }}),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_ne!(body["data"]["id"], 4242);
        assert_ne!(body["data"]["created_at"], "1999-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn create_with_blank_title_is_422() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send_json(
                "POST",
                "/api/v1/movies",
                json!({"movie": {"title": "", "director": "test director", "year": 2000, "genre": "Drama"}}),
            )
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Movie creation failed");
        assert_eq!(body["data"]["title"], json!(["can't be blank"]));
        assert_eq!(app.count().await, 0);
    }

    #[tokio::test]
    async fn create_with_old_year_is_422() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send_json(
                "POST",
                "/api/v1/movies",
                json!({"movie": {"title": "Old movie", "director": "Test", "year": 1920, "genre": "Drama"}}),
            )
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["data"]["year"],
            json!(["must be greater than or equal to 1930"])
        );
        assert_eq!(app.count().await, 0);
    }

    #[tokio::test]
    async fn create_with_bad_rating_and_url_is_422() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send_json(
                "POST",
                "/api/v1/movies",
                json!({"movie": {
                    "title": "Heat", "director": "Michael Mann", "year": 1995, "genre": "Crime",
                    "rating": 11, "poster_url": "ftp://example.com/heat.jpg"
                }}),
            )
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["data"]["rating"], json!(["must be less than or equal to 10"]));
        assert_eq!(body["data"]["poster_url"], json!(["must be a valid URL"]));
    }

    #[tokio::test]
    async fn malformed_bodies_are_400() {
        let app = TestApp::new().await;
        let (status, body) = app.send_raw("POST", "/api/v1/movies", "{nope").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");

        let (status, _) = app
            .send_json("POST", "/api/v1/movies", json!({"title": "Heat"}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(app.count().await, 0);
    }

    #[tokio::test]
    async fn wrong_value_type_is_422() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send_json(
                "POST",
                "/api/v1/movies",
                json!({"movie": {"title": "Heat", "director": "Michael Mann", "year": "soon", "genre": "Crime"}}),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], "error");
    }

    // ── Update ──────────────────────────────────────────────────

    #[tokio::test]
    async fn patch_changes_only_supplied_fields() {
        let app = TestApp::new().await;
        let created = app.create("Inception", "Christopher Nolan", 2010, "Sci-Fi").await;
        let uri = format!("/api/v1/movies/{}", created["id"]);

        let (status, body) = app
            .send_json(
                "PATCH",
                &uri,
                json!({"movie": {"rating": 9.0, "synopsis": "Updated synopsis"}}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Movie updated successfully");
        assert_eq!(body["data"]["rating"], json!(9.0));
        assert_eq!(body["data"]["synopsis"], "Updated synopsis");
        assert_eq!(body["data"]["title"], "Inception");
        assert_eq!(body["data"]["created_at"], created["created_at"]);
    }

    #[tokio::test]
    async fn put_is_accepted_for_update() {
        let app = TestApp::new().await;
        let created = app.create("Inception", "Christopher Nolan", 2010, "Sci-Fi").await;

        let (status, body) = app
            .send_json(
                "PUT",
                &format!("/api/v1/movies/{}", created["id"]),
                json!({"movie": {"genre": "Thriller"}}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["genre"], "Thriller");
    }

    #[tokio::test]
    async fn failed_update_is_atomic() {
        let app = TestApp::new().await;
        let created = app.create("Inception", "Christopher Nolan", 2010, "Sci-Fi").await;
        let uri = format!("/api/v1/movies/{}", created["id"]);

        let (status, body) = app
            .send_json(
                "PATCH",
                &uri,
                json!({"movie": {"title": "Changed", "year": 1800}}),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Movie update failed");
        assert!(body["data"]["year"].is_array());

        let (_, stored) = app.get(&uri).await;
        assert_eq!(stored["data"], created);
    }

    #[tokio::test]
    async fn update_missing_movie_is_404() {
        let app = TestApp::new().await;
        let (status, body) = app
            .send_json("PATCH", "/api/v1/movies/77", json!({"movie": {"title": "X"}}))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Movie with ID 77 not found");
    }

    #[tokio::test]
    async fn unknown_id_wins_over_bad_update_body() {
        let app = TestApp::new().await;
        for body in ["{nope", r#"{"title": "X"}"#, r#"{"movie": {"year": "soon"}}"#] {
            let (status, resp) = app.send_raw("PATCH", "/api/v1/movies/999", body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", body);
            assert_eq!(resp["message"], "Movie with ID 999 not found");
        }

        let created = app.create("Inception", "Christopher Nolan", 2010, "Sci-Fi").await;
        let uri = format!("/api/v1/movies/{}", created["id"]);
        let (status, _) = app.send_raw("PATCH", &uri, "{nope").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = app
            .send_raw("PATCH", &uri, r#"{"movie": {"year": "soon"}}"#)
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    // ── Delete ──────────────────────────────────────────────────

    #[tokio::test]
    async fn delete_then_404() {
        let app = TestApp::new().await;
        let created = app.create("Inception", "Christopher Nolan", 2010, "Sci-Fi").await;
        let uri = format!("/api/v1/movies/{}", created["id"]);

        let (status, body) = app.delete(&uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Movie deleted successfully");
        assert!(body["data"].is_null());
        assert_eq!(app.count().await, 0);

        let (status, body) = app.delete(&uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");

        let (status, _) = app.get(&uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ── Ambient routes ──────────────────────────────────────────

    #[tokio::test]
    async fn index_lists_endpoints() {
        let app = TestApp::new().await;
        let (status, body) = app.get("/api/v1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Movie API v1");
        assert_eq!(body["endpoints"]["movies"], "/api/v1/movies");
        assert_eq!(body["endpoints"]["movie"], "/api/v1/movies/:id");
    }

    #[tokio::test]
    async fn health_reports_database() {
        let app = TestApp::new().await;
        for uri in ["/health", "/up"] {
            let (status, body) = app.get(uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "ok");
            assert_eq!(body["database"]["status"], "ok");
        }
    }

    #[tokio::test]
    async fn openapi_document_lists_movie_paths() {
        let app = TestApp::new().await;
        let (status, body) = app.get("/api-doc/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/api/v1/movies").is_some());
        assert!(body["paths"].get("/api/v1/movies/{id}").is_some());
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let app = TestApp::new().await;
        let resp = app
            .send(
                Request::builder()
                    .uri("/api/v1")
                    .header("x-request-id", "trace-me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-me");
    }

    #[tokio::test]
    async fn cors_allows_only_listed_origins() {
        let app = TestApp::with_cors(CorsConfig {
            allowed_origins: vec!["http://localhost:5173".into()],
        })
        .await;

        let preflight = |origin: &str| {
            Request::builder()
                .method("OPTIONS")
                .uri("/api/v1/movies")
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
                .body(Body::empty())
                .unwrap()
        };

        let allowed = app.send(preflight("http://localhost:5173")).await;
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_MAX_AGE).unwrap(),
            "600"
        );

        let denied = app.send(preflight("http://evil.test")).await;
        assert!(denied
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
