use std::convert::Infallible;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;

use crate::state::NotifyState;

/// Event name subscribers listen for; fixed by the web client.
pub const RANK_UPDATED_EVENT: &str = "mmrUpdated";

/// POST /api/notify — broadcast the payload to everyone connected right
/// now. Fire and forget: no acknowledgment, no delivery guarantee, and a
/// 200 even when nobody is listening.
pub async fn notify(
    State(app): State<NotifyState>,
    Json(payload): Json<serde_json::Value>,
) -> StatusCode {
    let receivers = app.event_tx.send(payload).unwrap_or(0);
    tracing::debug!(receivers, "payload broadcast");
    StatusCode::OK
}

/// GET /api/events — SSE stream delivering each broadcast payload under
/// the fixed event name. Lagged or closed receivers are dropped silently.
pub async fn sse_events(State(app): State<NotifyState>) -> impl axum::response::IntoResponse {
    let rx = app.event_tx.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| {
        msg.ok().and_then(|payload| {
            Event::default()
                .event(RANK_UPDATED_EVENT)
                .json_data(&payload)
                .ok()
                .map(Ok::<Event, Infallible>)
        })
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
