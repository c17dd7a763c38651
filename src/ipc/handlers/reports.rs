use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{db_conn, db_failed, optional_str};
use crate::ipc::types::{AppState, Request};
use crate::model::{Allocation, Room};
use crate::reports;
use rusqlite::Connection;
use serde_json::json;

fn load_allocations(
    conn: &Connection,
    req: &Request,
    exam_id: Option<&str>,
) -> Result<Vec<Allocation>, serde_json::Value> {
    let rows = db::list_allocations(conn, exam_id).map_err(|e| db_failed(req, "db_query_failed", e))?;
    if rows.is_empty() {
        return Err(err(
            &req.id,
            "no_allocations",
            "generate seating first",
            None,
        ));
    }
    Ok(rows)
}

fn load_rooms(conn: &Connection, req: &Request) -> Result<Vec<Room>, serde_json::Value> {
    db::list_rooms(conn).map_err(|e| db_failed(req, "db_query_failed", e))
}

fn room_charts_model(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = db_conn(state, req)?;
    let exam_id = optional_str(req, "examId");
    let allocations = load_allocations(conn, req, exam_id.as_deref())?;
    let rooms = load_rooms(conn, req)?;
    let exams = reports::room_charts(&allocations, &rooms, exam_id.as_deref());
    Ok(json!({ "exams": exams }))
}

fn attendance_model(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = db_conn(state, req)?;
    let allocations = load_allocations(conn, req, None)?;
    Ok(json!({ "slots": reports::attendance_sheets(&allocations) }))
}

fn hall_tickets_model(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = db_conn(state, req)?;
    let allocations = load_allocations(conn, req, None)?;
    let roll_no = optional_str(req, "rollNo");
    let tickets = reports::hall_tickets(&allocations, roll_no.as_deref());
    if tickets.is_empty() {
        return Err(err(&req.id, "not_found", "no hall ticket for that roll number", None));
    }
    Ok(json!({ "tickets": tickets }))
}

fn statistics_model(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = db_conn(state, req)?;
    let allocations = load_allocations(conn, req, None)?;
    let rooms = load_rooms(conn, req)?;
    Ok(json!(reports::statistics(&allocations, &rooms)))
}

fn seating_plan_model(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = db_conn(state, req)?;
    let allocations = load_allocations(conn, req, None)?;
    let generated_at = chrono::Local::now().to_rfc3339();
    Ok(json!(reports::seating_plan(&allocations, generated_at)))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "reports.roomChartsModel" => room_charts_model(state, req),
        "reports.attendanceModel" => attendance_model(state, req),
        "reports.hallTicketsModel" => hall_tickets_model(state, req),
        "reports.statisticsModel" => statistics_model(state, req),
        "reports.seatingPlanModel" => seating_plan_model(state, req),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(resp) => resp,
    })
}
