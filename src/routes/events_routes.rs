use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, Sse},
    routing::get,
    Router,
};
use futures::Stream;

use crate::state::AppState;

pub fn create_events_router() -> Router<AppState> {
    Router::new().route("/", get(subscribe_events))
}

/// Feed SSE de eventos de desgaste para los dashboards
async fn subscribe_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    state.broadcaster.handle_sse_connection()
}
