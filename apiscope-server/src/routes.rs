//! HTTP handlers for the Apiscope server.

use std::path::PathBuf;

use actix_web::{HttpResponse, Responder, get, web};
use apiscope_core::{
    AggregateSummary, Aggregator, ApiRow, ApiscopeError, FsSnapshotStore, ScatterPoint, TrendPoint,
};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::openapi::ApiDoc;

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Directory holding the daily snapshot files.
    pub data_dir: PathBuf,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Query parameters for range endpoints.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// Range start, `YYYY-MM-DD`.
    pub start: Option<String>,
    /// Range end, `YYYY-MM-DD`.
    pub end: Option<String>,
}

/// Query parameters for single-day endpoints.
#[derive(Debug, Deserialize)]
pub struct DayQuery {
    /// Day key, `YYYY-MM-DD`.
    pub date: Option<String>,
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse { message })
}

fn require_param(value: &Option<String>, name: &str) -> Result<String, HttpResponse> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.clone()),
        _ => Err(bad_request(format!("missing required parameter: {name}"))),
    }
}

fn error_response(err: ApiscopeError) -> HttpResponse {
    match err {
        ApiscopeError::InvalidDate(_) => bad_request(err.to_string()),
        other => HttpResponse::InternalServerError().json(ErrorResponse {
            message: other.to_string(),
        }),
    }
}

/// Render a blocked aggregation result as an HTTP response.
fn respond<T: Serialize>(
    result: Result<Result<T, ApiscopeError>, actix_web::error::BlockingError>,
) -> HttpResponse {
    match result {
        Ok(Ok(value)) => HttpResponse::Ok().json(value),
        Ok(Err(err)) => error_response(err),
        Err(err) => HttpResponse::InternalServerError().json(ErrorResponse {
            message: format!("aggregation task failed: {err}"),
        }),
    }
}

fn aggregator(state: &web::Data<AppState>) -> Aggregator<FsSnapshotStore> {
    Aggregator::new(FsSnapshotStore::new(state.data_dir.clone()))
}

#[utoipa::path(
    get,
    path = "/stats/summary",
    responses(
        (status = 200, description = "Cross-range summary", body = AggregateSummary),
        (status = 400, description = "Missing or invalid date parameter", body = ErrorResponse)
    ),
    tag = "stats"
)]
#[get("/api/stats/summary")]
/// Summary statistics over an inclusive date range.
pub async fn summary(state: web::Data<AppState>, query: web::Query<RangeQuery>) -> impl Responder {
    let start = match require_param(&query.start, "start") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let end = match require_param(&query.end, "end") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let aggregator = aggregator(&state);
    respond(web::block(move || aggregator.summary(&start, &end)).await)
}

#[utoipa::path(
    get,
    path = "/stats/coverage-usage",
    responses(
        (status = 200, description = "Coverage/usage scatter pairs", body = [ScatterPoint]),
        (status = 400, description = "Missing or invalid date parameter", body = ErrorResponse)
    ),
    tag = "stats"
)]
#[get("/api/stats/coverage-usage")]
/// Coverage/usage scatter pairs for one day.
pub async fn coverage_usage(
    state: web::Data<AppState>,
    query: web::Query<DayQuery>,
) -> impl Responder {
    let date = match require_param(&query.date, "date") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let aggregator = aggregator(&state);
    respond(web::block(move || aggregator.coverage_usage(&date)).await)
}

#[utoipa::path(
    get,
    path = "/stats/coverage-trends",
    responses(
        (status = 200, description = "Per-day coverage trend series", body = [TrendPoint]),
        (status = 400, description = "Missing or invalid date parameter", body = ErrorResponse)
    ),
    tag = "stats"
)]
#[get("/api/stats/coverage-trends")]
/// Per-day mean coverage series over an inclusive date range.
pub async fn coverage_trends(
    state: web::Data<AppState>,
    query: web::Query<RangeQuery>,
) -> impl Responder {
    let start = match require_param(&query.start, "start") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let end = match require_param(&query.end, "end") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let aggregator = aggregator(&state);
    respond(web::block(move || aggregator.coverage_trends(&start, &end)).await)
}

#[utoipa::path(
    get,
    path = "/stats/api-table",
    responses(
        (status = 200, description = "Per-API detail rows", body = [ApiRow]),
        (status = 400, description = "Missing or invalid date parameter", body = ErrorResponse)
    ),
    tag = "stats"
)]
#[get("/api/stats/api-table")]
/// Per-API detail rows for one day.
pub async fn api_table(state: web::Data<AppState>, query: web::Query<DayQuery>) -> impl Responder {
    let date = match require_param(&query.date, "date") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let aggregator = aggregator(&state);
    respond(web::block(move || aggregator.api_table(&date)).await)
}

#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/api/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::{
        AppState, ErrorResponse, api_table, coverage_trends, coverage_usage, openapi_json, summary,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use apiscope_core::{AggregateSummary, ApiRow, ScatterPoint, TrendPoint};
    use std::path::PathBuf;

    fn seed_data_dir() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        let root = std::env::temp_dir().join(format!("apiscope_server_test_{nanos}"));
        std::fs::create_dir_all(&root).expect("create temp dir");

        std::fs::write(
            root.join("coverage-2024-01-01.json"),
            r#"{"A": {"fullSize": 100, "coveredLines": 50, "apidoc": "https://docs/a"}}"#,
        )
        .expect("write coverage");
        std::fs::write(
            root.join("usage-2024-01-01.json"),
            r#"[{"apiName": "A", "usageCount": 10, "totalClients": 4}]"#,
        )
        .expect("write usage");
        // Day 2 has usage but no coverage file.
        std::fs::write(
            root.join("usage-2024-01-02.json"),
            r#"[{"apiName": "A", "usageCount": 5, "totalClients": 2}]"#,
        )
        .expect("write usage");
        // Day 3 coverage is corrupt on disk.
        std::fs::write(root.join("coverage-2024-01-03.json"), "{broken")
            .expect("write corrupt coverage");

        root
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .service(summary)
                    .service(coverage_usage)
                    .service(coverage_trends)
                    .service(api_table)
                    .service(openapi_json),
            )
            .await
        };
    }

    fn state_for(root: &PathBuf) -> web::Data<AppState> {
        web::Data::new(AppState {
            data_dir: root.clone(),
        })
    }

    #[actix_web::test]
    async fn summary_aggregates_range_with_partial_days() {
        let root = seed_data_dir();
        let app = test_app!(state_for(&root));
        let req = test::TestRequest::get()
            .uri("/api/stats/summary?start=2024-01-01&end=2024-01-02")
            .to_request();
        let resp: AggregateSummary = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.total_apis, 1);
        assert_eq!(resp.avg_coverage, 50.0);
        assert_eq!(resp.total_calls, 15);

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[actix_web::test]
    async fn summary_rejects_missing_parameter() {
        let root = seed_data_dir();
        let app = test_app!(state_for(&root));
        let req = test::TestRequest::get()
            .uri("/api/stats/summary?start=2024-01-01")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.message, "missing required parameter: end");

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[actix_web::test]
    async fn summary_rejects_invalid_date() {
        let root = seed_data_dir();
        let app = test_app!(state_for(&root));
        let req = test::TestRequest::get()
            .uri("/api/stats/summary?start=yesterday&end=2024-01-02")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.message.contains("invalid date"));

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[actix_web::test]
    async fn summary_over_reversed_range_is_success_with_zeros() {
        let root = seed_data_dir();
        let app = test_app!(state_for(&root));
        let req = test::TestRequest::get()
            .uri("/api/stats/summary?start=2024-02-01&end=2024-01-01")
            .to_request();
        let resp: AggregateSummary = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.total_apis, 0);
        assert_eq!(resp.avg_coverage, 0.0);
        assert_eq!(resp.total_calls, 0);

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[actix_web::test]
    async fn coverage_usage_defaults_usage_to_zero() {
        let root = seed_data_dir();
        // Shadow day 1 usage so coverage stands alone.
        std::fs::remove_file(root.join("usage-2024-01-01.json")).expect("remove usage");
        let app = test_app!(state_for(&root));
        let req = test::TestRequest::get()
            .uri("/api/stats/coverage-usage?date=2024-01-01")
            .to_request();
        let resp: Vec<ScatterPoint> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.len(), 1);
        assert_eq!(resp[0].name, "A");
        assert_eq!(resp[0].coverage, 50.0);
        assert_eq!(resp[0].usage, 0);

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[actix_web::test]
    async fn coverage_trends_skip_days_without_coverage() {
        let root = seed_data_dir();
        let app = test_app!(state_for(&root));
        let req = test::TestRequest::get()
            .uri("/api/stats/coverage-trends?start=2024-01-01&end=2024-01-03")
            .to_request();
        let resp: Vec<TrendPoint> = test::call_and_read_body_json(&app, req).await;

        // Day 2 has no coverage file and day 3 is corrupt; both are omitted.
        assert_eq!(resp.len(), 1);
        assert_eq!(resp[0].date, "2024-01-01");
        assert_eq!(resp[0].avg_coverage, 50.0);

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[actix_web::test]
    async fn api_table_returns_rows_with_defaults() {
        let root = seed_data_dir();
        let app = test_app!(state_for(&root));
        let req = test::TestRequest::get()
            .uri("/api/stats/api-table?date=2024-01-01")
            .to_request();
        let resp: Vec<ApiRow> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.len(), 1);
        assert_eq!(resp[0].name, "A");
        assert_eq!(resp[0].coverage_percent, 50.0);
        assert_eq!(resp[0].usage_count, 10);
        assert_eq!(resp[0].total_clients, 4);
        assert_eq!(resp[0].apidoc, "https://docs/a");
        assert_eq!(resp[0].full_size, 100);
        assert_eq!(resp[0].covered_lines, 50);

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[actix_web::test]
    async fn corrupt_snapshot_day_still_returns_success() {
        let root = seed_data_dir();
        let app = test_app!(state_for(&root));
        let req = test::TestRequest::get()
            .uri("/api/stats/api-table?date=2024-01-03")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let rows: Vec<ApiRow> = test::read_body_json(resp).await;
        assert!(rows.is_empty());

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[actix_web::test]
    async fn openapi_json_returns_document() {
        let root = seed_data_dir();
        let app = test_app!(state_for(&root));
        let req = test::TestRequest::get()
            .uri("/api/openapi.json")
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert!(resp.get("openapi").is_some());

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }
}
