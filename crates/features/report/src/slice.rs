use crate::error::ReportError;
use crate::report::MarketReport;
use crate::{LivePipeline, live_pipeline};
use moka::future::Cache;
use recap_domain::config::{ApiConfig, ReportDefaults};
use recap_kernel::config::Secrets;
use recap_kernel::domain::registry::InitializedSlice;
use recap_kernel::security::SessionId;
use std::sync::Arc;
use std::time::Duration;

/// Report feature state: the live pipeline and the latest report of each session.
#[recap_derive::recap_slice]
pub struct ReportSlice {
    pub pipeline: LivePipeline,
    pub defaults: ReportDefaults,
    latest: Cache<SessionId, Arc<MarketReport>>,
}

impl ReportSlice {
    pub async fn latest(&self, session: &SessionId) -> Option<Arc<MarketReport>> {
        self.latest.get(session).await
    }

    pub async fn remember(&self, session: SessionId, report: Arc<MarketReport>) {
        self.latest.insert(session, report).await;
    }

    pub async fn forget(&self, session: &SessionId) {
        self.latest.invalidate(session).await;
    }
}

/// Builds the report slice. Latest reports expire with the session settings.
///
/// # Errors
/// See [`live_pipeline`].
pub fn init(config: &ApiConfig, secrets: &Secrets) -> Result<InitializedSlice, ReportError> {
    let pipeline = live_pipeline(config, secrets)?;
    let session = &config.security.session;
    let latest = Cache::builder()
        .max_capacity(session.capacity)
        .time_to_live(Duration::from_secs(session.ttl_seconds))
        .build();

    tracing::info!(model = %pipeline.settings().model, "Report slice initialized");

    let inner = ReportSliceInner { pipeline, defaults: config.report.clone(), latest };
    Ok(InitializedSlice::new(ReportSlice::new(inner)))
}
