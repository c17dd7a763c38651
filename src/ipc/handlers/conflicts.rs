use crate::conflicts::{detect_conflicts, ConflictCheck};
use crate::db;
use crate::ipc::error::ok;
use crate::ipc::helpers::{db_conn, db_failed};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_conflicts_detect(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let loaded = db::list_students(conn).and_then(|s| Ok((s, db::list_exams(conn)?)));
    let (students, exams) = match loaded {
        Ok(v) => v,
        Err(e) => return db_failed(req, "db_query_failed", e),
    };

    let check = detect_conflicts(&students, &exams);
    let conflicts = check.conflicts();
    let message = match &check {
        ConflictCheck::NotApplicable => "No conflicts possible with less than 2 exams".to_string(),
        ConflictCheck::Checked(v) if v.is_empty() => "No conflicts detected".to_string(),
        ConflictCheck::Checked(v) => format!("{} conflict(s) found", v.len()),
    };
    ok(
        &req.id,
        json!({
            "applicable": check != ConflictCheck::NotApplicable,
            "message": message,
            "conflicts": conflicts,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "conflicts.detect" => Some(handle_conflicts_detect(state, req)),
        _ => None,
    }
}
