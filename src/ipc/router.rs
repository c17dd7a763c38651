use super::handlers;
use super::types::{AppState, Request};
use crate::ipc::error::err;
use tracing::{debug, warn};

pub fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    debug!(id = %req.id, method = %req.method, "request");

    let families: [fn(&mut AppState, &Request) -> Option<serde_json::Value>; 8] = [
        handlers::core::try_handle,
        handlers::students::try_handle,
        handlers::rooms::try_handle,
        handlers::exams::try_handle,
        handlers::seating::try_handle,
        handlers::conflicts::try_handle,
        handlers::reports::try_handle,
        handlers::data::try_handle,
    ];
    for handle in families {
        if let Some(resp) = handle(state, &req) {
            if resp.get("ok").and_then(|v| v.as_bool()) == Some(false) {
                let code = resp
                    .get("error")
                    .and_then(|e| e.get("code"))
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown");
                warn!(id = %req.id, method = %req.method, code, "request failed");
            }
            return resp;
        }
    }

    err(
        &req.id,
        "not_implemented",
        format!("unknown method: {}", req.method),
        None,
    )
}
