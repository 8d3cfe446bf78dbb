use crate::export::ExportFormat;
use crate::language::Language;
use crate::report::MarketReport;
use crate::request::{
    ARTICLES_LIMIT, ARTICLES_LIMIT_STEP, ReportRequest, STORIES_PER_THEME, TEMPERATURE,
    TEMPERATURE_STEP,
};
use crate::slice::ReportSlice;
use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::{DateTime, Days, NaiveDate, Utc};
use recap_derive::{api_handler, api_model};
use recap_domain::constants::REPORTS_TAG;
use recap_domain::features::ReportFeatures;
use recap_kernel::security::SessionId;
use recap_kernel::server::{ApiError, ApiJson, ApiState, ErrorBody};
use std::str::FromStr;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::info;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// A numeric knob with its bounds.
#[api_model]
pub struct NumericOption {
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Everything a client needs to build a report form.
#[api_model]
pub struct ReportOptions {
    pub languages: Vec<Language>,
    pub formats: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    pub features: ReportFeatures,
    pub articles_limit: NumericOption,
    pub stories_per_theme: NumericOption,
    pub temperature: NumericOption,
}

/// A generated report as returned by the API.
#[api_model]
pub struct ReportView {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub period_label: String,
    pub days: i64,
    pub language: Language,
    pub articles_count: usize,
    pub themes_count: usize,
    #[cfg_attr(feature = "server", schema(value_type = Object))]
    pub features: ReportFeatures,
    pub generated_at: DateTime<Utc>,
    /// First 1000 characters of the content.
    pub preview: String,
    pub truncated: bool,
    pub content: String,
    /// Export formats available for download.
    pub exports: Vec<String>,
}

impl From<&MarketReport> for ReportView {
    fn from(report: &MarketReport) -> Self {
        let preview = report.preview();
        Self {
            start_date: report.period.start(),
            end_date: report.period.end(),
            period_label: report.period.label(),
            days: report.days(),
            language: report.language,
            articles_count: report.articles_count,
            themes_count: report.themes_count,
            features: report.features,
            generated_at: report.generated_at,
            preview: preview.text,
            truncated: preview.truncated,
            content: report.content.clone(),
            exports: report.export_formats().map(|format| format.to_string()).collect(),
        }
    }
}

/// Report endpoints. They read the caller's [`SessionId`] from the request
/// extensions, so mount them behind the session middleware.
pub fn routes() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(options))
        .routes(routes!(generate))
        .routes(routes!(latest))
        .routes(routes!(download))
}

#[api_handler(
    get,
    path = "/api/reports/options",
    responses((status = OK, description = "Report form options", body = ReportOptions)),
    tag = REPORTS_TAG,
)]
pub(crate) async fn options(
    State(state): State<ApiState>,
) -> Result<Json<ReportOptions>, ApiError> {
    let slice = state.try_get_slice::<ReportSlice>()?;
    let defaults = &slice.defaults;
    let end_date = Utc::now().date_naive();
    let start_date = end_date.checked_sub_days(Days::new(7)).unwrap_or(end_date);

    Ok(Json(ReportOptions {
        languages: Language::iter().collect(),
        formats: ExportFormat::iter().map(|format| format.to_string()).collect(),
        start_date,
        end_date,
        features: ReportFeatures::default(),
        articles_limit: NumericOption {
            default: f64::from(defaults.articles_limit),
            min: f64::from(*ARTICLES_LIMIT.start()),
            max: f64::from(*ARTICLES_LIMIT.end()),
            step: f64::from(ARTICLES_LIMIT_STEP),
        },
        stories_per_theme: NumericOption {
            default: f64::from(defaults.stories_per_theme),
            min: f64::from(*STORIES_PER_THEME.start()),
            max: f64::from(*STORIES_PER_THEME.end()),
            step: 1.0,
        },
        temperature: NumericOption {
            default: f64::from(defaults.temperature),
            min: f64::from(*TEMPERATURE.start()),
            max: f64::from(*TEMPERATURE.end()),
            step: f64::from(TEMPERATURE_STEP),
        },
    }))
}

#[api_handler(
    post,
    path = "/api/reports",
    request_body = ReportRequest,
    responses(
        (status = OK, description = "Report generated", body = ReportView),
        (status = BAD_REQUEST, description = "Invalid period", body = ErrorBody),
        (status = NOT_FOUND, description = "No articles for the period", body = ErrorBody),
        (status = UNPROCESSABLE_ENTITY, description = "Value out of range", body = ErrorBody),
        (status = BAD_GATEWAY, description = "Upstream provider failed", body = ErrorBody),
    ),
    tag = REPORTS_TAG,
)]
pub(crate) async fn generate(
    State(state): State<ApiState>,
    Extension(session): Extension<SessionId>,
    ApiJson(request): ApiJson<ReportRequest>,
) -> Result<Json<ReportView>, ApiError> {
    let slice = state.try_get_slice::<ReportSlice>()?;
    let plan = request.plan(&slice.defaults, Utc::now().date_naive())?;

    let report = Arc::new(slice.pipeline.generate(&plan).await?);
    info!(
        session = ?session,
        articles = report.articles_count,
        themes = report.themes_count,
        "Report generated"
    );

    let view = ReportView::from(report.as_ref());
    slice.remember(session, report).await;
    Ok(Json(view))
}

#[api_handler(
    get,
    path = "/api/reports/latest",
    responses(
        (status = OK, description = "Latest report of this session", body = ReportView),
        (status = NOT_FOUND, description = "Nothing generated yet", body = ErrorBody),
    ),
    tag = REPORTS_TAG,
)]
pub(crate) async fn latest(
    State(state): State<ApiState>,
    Extension(session): Extension<SessionId>,
) -> Result<Json<ReportView>, ApiError> {
    let report = latest_report(&state, &session).await?;
    Ok(Json(ReportView::from(report.as_ref())))
}

#[api_handler(
    get,
    path = "/api/reports/latest/{format}",
    params(("format" = String, Path, description = "report, executive, email, json or csv")),
    responses(
        (status = OK, description = "Export file as an attachment"),
        (status = NOT_FOUND, description = "Unknown or disabled format", body = ErrorBody),
    ),
    tag = REPORTS_TAG,
)]
pub(crate) async fn download(
    State(state): State<ApiState>,
    Extension(session): Extension<SessionId>,
    Path(format): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let format = ExportFormat::from_str(&format)
        .map_err(|_| ApiError::not_found(format!("Unknown export format '{format}'")))?;
    let report = latest_report(&state, &session).await?;

    let export = report.export(format)?.ok_or_else(|| {
        ApiError::not_found(format!("The {format} export is disabled for this report"))
    })?;

    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    Ok((
        [
            (CONTENT_TYPE, export.mime.to_owned()),
            (CONTENT_DISPOSITION, disposition),
            (CACHE_CONTROL, "no-store".to_owned()),
        ],
        export.body,
    ))
}

async fn latest_report(
    state: &ApiState,
    session: &SessionId,
) -> Result<Arc<MarketReport>, ApiError> {
    let slice = state.try_get_slice::<ReportSlice>()?;
    slice
        .latest(session)
        .await
        .ok_or_else(|| ApiError::not_found("No report has been generated in this session yet"))
}
