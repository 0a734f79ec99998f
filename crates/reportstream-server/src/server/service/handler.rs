//! Report service state and HTTP handlers.
//!
//! [`ReportService`] is cloned into every request. It holds the read-only
//! report registry, the responder that produces chat frames, and the shared
//! [`StreamTracker`] used for graceful shutdown.
//!
//! ## Responsibilities
//!
//! - Start one paced emission per chat request and stream it as
//!   newline-delimited JSON via [`feed_frames`].
//! - Serve report lookups, feedback acknowledgments and category labels.
//! - Refuse new streams once shutdown begins.

use super::extract::ApiJson;
use crate::server::{
    config::{PacingStrategy, ServerConfig},
    streaming::{
        coordinator::{StreamOutcome, feed_frames},
        tracker::{InflightGuard, StreamTracker},
    },
    telemetry::{increment_feedback, increment_requests, increment_stream_errors},
};
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use core::convert::Infallible;
use futures::StreamExt;
use reportstream::{ProgressiveResponder, SleepProvider, TokioSleep, TokioYield};
use reportstream_api::{
    Error, Result,
    feedback::{FeedbackAck, FeedbackRecord},
    hapak::{HAPAKS, Hapak},
    report::{ReportRecord, ReportRegistry},
    types::{ChatStreamRequest, GetReportRequest, QUERY_ID_HEADER, REQUEST_IDS_HEADER},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::Instrument;

#[derive(Clone)]
pub struct ReportService {
    config: Arc<ServerConfig>,
    registry: Arc<ReportRegistry>,
    responder: ProgressiveResponder,
    request_ids: HeaderValue,
    streams: Arc<StreamTracker>,
}

impl ReportService {
    /// Creates the service with `config.report_count` sample reports stamped
    /// with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if the registry keys cannot be rendered into
    /// the `Request-Ids` header.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let registry = ReportRegistry::seeded_now(config.report_count, config.content_format);
        Self::with_registry(config, registry)
    }

    /// Creates the service around an existing registry.
    ///
    /// # Errors
    ///
    /// See [`ReportService::new`].
    pub fn with_registry(config: ServerConfig, registry: ReportRegistry) -> Result<Self> {
        let request_ids =
            HeaderValue::from_str(&registry.keys_json()?).map_err(|e| Error::Encode {
                context: format!("Request-Ids header: {e}"),
            })?;

        let responder = ProgressiveResponder::new(
            config.content_format.source_text(),
            config.link_pool.clone(),
        )
        .with_pacing(config.pacing);

        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            responder,
            request_ids,
            streams: Arc::new(StreamTracker::new()),
        })
    }

    pub fn registry(&self) -> &ReportRegistry {
        &self.registry
    }

    pub const fn streams(&self) -> &Arc<StreamTracker> {
        &self.streams
    }

    /// Refuses new streams, drains in-flight ones for up to the configured
    /// shutdown timeout, then cancels the rest.
    pub async fn shutdown(&self) {
        self.streams.shutdown(self.config.shutdown_timeout).await;
    }

    /// Starts one emission and returns the streaming response.
    ///
    /// With `return_empty` set, the responder is skipped and the body is empty
    /// with no metadata headers. Otherwise a coordinator task is spawned that
    /// feeds frames into the body until the emission completes, the client
    /// disconnects, the deadline elapses, or the service shuts down.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] if the query id cannot be sent as a header.
    /// - [`Error::ServiceShutdown`] once shutdown has begun.
    pub fn start_stream(&self, request: &ChatStreamRequest) -> Result<Response> {
        if request.return_empty {
            return Ok((
                [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                Body::empty(),
            )
                .into_response());
        }

        let query_id = request.query_id_or_generate();
        let query_id_header = HeaderValue::from_str(&query_id)
            .map_err(|_| Error::invalid_request("query_id is not a valid header value"))?;

        let guard = StreamTracker::begin(&self.streams)?;

        let (resp_tx, resp_rx) = mpsc::channel::<Bytes>(self.config.stream_buffer_size);
        match self.config.pacing_strategy {
            PacingStrategy::Sleep => {
                self.spawn_coordinator::<TokioSleep>(guard, resp_tx, &query_id);
            }
            PacingStrategy::Yield => {
                self.spawn_coordinator::<TokioYield>(guard, resp_tx, &query_id);
            }
        }

        let body = Body::from_stream(ReceiverStream::new(resp_rx).map(Ok::<_, Infallible>));
        let mut response = Response::new(body);
        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(REQUEST_IDS_HEADER),
            self.request_ids.clone(),
        );
        headers.insert(HeaderName::from_static(QUERY_ID_HEADER), query_id_header);
        Ok(response)
    }

    /// Spawns the task feeding one paced emission into `resp_tx`. `guard` is
    /// held until the task ends.
    fn spawn_coordinator<S>(
        &self,
        guard: InflightGuard,
        resp_tx: mpsc::Sender<Bytes>,
        query_id: &str,
    ) where
        S: SleepProvider + 'static,
    {
        let frames = self.responder.stream::<S>();
        let cancel = self.streams.token().child_token();
        let deadline = self.config.stream_deadline;

        let fut = async move {
            let feed = feed_frames(frames, resp_tx, cancel);
            let result = match deadline {
                Some(limit) => tokio::time::timeout(limit, feed)
                    .await
                    .unwrap_or(Ok(StreamOutcome::DeadlineExceeded)),
                None => feed.await,
            };

            match result {
                Ok(outcome) if outcome.is_complete() => {
                    tracing::debug!(?outcome, "Stream completed");
                }
                Ok(outcome) => {
                    increment_stream_errors();
                    tracing::debug!(?outcome, "Stream interrupted");
                }
                Err(e) => {
                    increment_stream_errors();
                    tracing::warn!("Error: {}", e);
                }
            }
            drop(guard);
        };

        let span = tracing::info_span!("streaming", query_id);
        tokio::spawn(fut.instrument(span));
    }
}

/// `POST /run_chat_stream`
#[tracing::instrument(skip_all)]
pub async fn run_chat_stream(
    State(service): State<ReportService>,
    ApiJson(request): ApiJson<ChatStreamRequest>,
) -> Result<Response> {
    increment_requests("run_chat_stream");
    service.start_stream(&request)
}

/// `POST /get_report`
#[tracing::instrument(skip_all)]
pub async fn get_report(
    State(service): State<ReportService>,
    ApiJson(request): ApiJson<GetReportRequest>,
) -> Result<Json<ReportRecord>> {
    increment_requests("get_report");
    tracing::debug!(report_id = %request.report_id, "Looking up report");
    let record = service.registry().require(&request.report_id)?;
    Ok(Json(record.clone()))
}

/// `POST /submit_feedback`
pub async fn submit_feedback(ApiJson(record): ApiJson<FeedbackRecord>) -> Json<FeedbackAck> {
    increment_requests("submit_feedback");
    let kind = record.kind().as_str();
    increment_feedback(kind);
    tracing::info!(
        kind,
        query = record.query(),
        is_relevant = record.is_relevant(),
        "Feedback received"
    );
    Json(record.acknowledge())
}

/// `GET /get_hapaks`
pub async fn get_hapaks() -> Json<[Hapak; 10]> {
    increment_requests("get_hapaks");
    Json(HAPAKS)
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}
