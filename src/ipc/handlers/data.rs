use crate::db;
use crate::ipc::error::ok;
use crate::ipc::helpers::{db_conn, db_failed};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use tracing::info;

fn handle_data_stats(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return ok(
            &req.id,
            json!({ "students": 0, "rooms": 0, "exams": 0, "allocations": 0 }),
        );
    };
    match db::counts(conn) {
        Ok(c) => ok(
            &req.id,
            json!({
                "students": c.students,
                "rooms": c.rooms,
                "exams": c.exams,
                "allocations": c.allocations,
            }),
        ),
        Err(e) => db_failed(req, "db_query_failed", e),
    }
}

fn handle_data_clear(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match db::clear_all(conn) {
        Ok(()) => {
            info!("workspace data cleared");
            ok(&req.id, json!({ "cleared": true }))
        }
        Err(e) => db_failed(req, "db_delete_failed", e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "data.stats" => Some(handle_data_stats(state, req)),
        "data.clear" => Some(handle_data_clear(state, req)),
        _ => None,
    }
}
