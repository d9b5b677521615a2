//! OpenAPI specification for the Apiscope server.

use utoipa::OpenApi;

use apiscope_core::{AggregateSummary, ApiRow, CoverageRecord, ScatterPoint, TrendPoint, UsageRecord};

use crate::routes::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::summary,
        crate::routes::coverage_usage,
        crate::routes::coverage_trends,
        crate::routes::api_table,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            AggregateSummary,
            ApiRow,
            CoverageRecord,
            ErrorResponse,
            ScatterPoint,
            TrendPoint,
            UsageRecord
        )
    ),
    tags(
        (name = "stats", description = "Coverage and usage statistics"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the Apiscope server.
pub struct ApiDoc;
