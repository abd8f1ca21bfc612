use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use hiclimate_query::QueryEngine;
use opentelemetry::metrics::{Counter, MeterProvider};
use opentelemetry::KeyValue;
use opentelemetry_prometheus::exporter;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use prometheus::{Encoder, Registry, TextEncoder};

const INDEX_HTML: &str = r#"<html>
<h1>Hawaii Climate API</h1>
<p>Precipitation Analysis:</p>
<ul>
  <li><a href="/api/v1.0/precipitation">/api/v1.0/precipitation</a></li>
</ul>
<p>Station Analysis:</p>
<ul>
  <li><a href="/api/v1.0/stations">/api/v1.0/stations</a></li>
</ul>
<p>Temperature Analysis:</p>
<ul>
  <li><a href="/api/v1.0/tobs">/api/v1.0/tobs</a></li>
</ul>
<p>Start Day Analysis:</p>
<ul>
  <li><a href="/api/v1.0/2016-02-14">/api/v1.0/2016-02-14</a></li>
</ul>
<p>Start &amp; End Day Analysis:</p>
<ul>
  <li><a href="/api/v1.0/2016-02-14/2016-02-28">/api/v1.0/2016-02-14/2016-02-28</a></li>
</ul>
</html>
"#;

pub struct AppState {
    ready: AtomicBool,
    registry: Registry,
    #[allow(dead_code)]
    provider: SdkMeterProvider,
    requests_total: Counter<u64>,
    engine: QueryEngine,
}

impl AppState {
    fn count(&self, endpoint: &'static str) {
        self.requests_total
            .add(1, &[KeyValue::new("endpoint", endpoint)]);
    }
}

pub fn build_app(engine: QueryEngine) -> Result<(Router, Arc<AppState>)> {
    // Prometheus exporter via OpenTelemetry
    let registry = Registry::new();
    let reader = exporter().with_registry(registry.clone()).build()?;
    let provider = SdkMeterProvider::builder().with_reader(reader).build();
    let meter = provider.meter("hiclimate-api");

    let requests_total = meter
        .u64_counter("hiclimate_requests_total")
        .with_description("Total HTTP requests served")
        .init();

    let state = Arc::new(AppState {
        ready: AtomicBool::new(false),
        registry,
        provider,
        requests_total,
        engine,
    });

    let router = Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/:start", get(stats_from))
        .route("/api/v1.0/:start/:end", get(stats_between))
        .with_state(Arc::clone(&state));

    Ok((router, state))
}

pub fn set_ready(state: &Arc<AppState>, is_ready: bool) {
    state.ready.store(is_ready, Ordering::Relaxed);
}

async fn index(State(state): State<Arc<AppState>>) -> Html<&'static str> {
    state.count("index");
    Html(INDEX_HTML)
}

async fn healthz(State(state): State<Arc<AppState>>) -> StatusCode {
    state.count("healthz");
    StatusCode::OK
}

async fn readyz(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.ready.load(Ordering::Relaxed) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics(
    State(state): State<Arc<AppState>>,
) -> (
    [(axum::http::header::HeaderName, axum::http::HeaderValue); 1],
    String,
) {
    let encoder = TextEncoder::new();
    let metric_families = state.registry.gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buf) {
        tracing::warn!(error=?e, "failed to encode metrics");
    }
    let body = String::from_utf8(buf).unwrap_or_default();
    let header = (
        header::CONTENT_TYPE,
        axum::http::HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    ([header], body)
}

async fn precipitation(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.count("precipitation");
    Json(state.engine.precipitation_map())
}

async fn stations(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.count("stations");
    Json(state.engine.stations())
}

async fn tobs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.count("tobs");
    Json(state.engine.temperature_observations())
}

async fn stats_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> impl IntoResponse {
    state.count("start");
    Json(state.engine.temperature_stats(&start, None))
}

async fn stats_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> impl IntoResponse {
    state.count("start_end");
    Json(state.engine.temperature_stats(&start, Some(&end)))
}
