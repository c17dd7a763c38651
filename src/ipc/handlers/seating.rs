use crate::db;
use crate::ipc::error::{alloc_err, err, ok};
use crate::ipc::helpers::{db_conn, db_failed, optional_str, required_str};
use crate::ipc::types::{AppState, Request};
use crate::seating::{self, AllocError};
use serde_json::json;

fn handle_seating_generate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let exam_id = match required_str(req, "examId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let exam = match db::get_exam(conn, &exam_id) {
        Ok(Some(e)) => e,
        Ok(None) => return alloc_err(&req.id, &AllocError::ExamNotFound { exam_id }),
        Err(e) => return db_failed(req, "db_query_failed", e),
    };
    let loaded = db::list_students(conn).and_then(|s| Ok((s, db::list_rooms(conn)?)));
    let (students, rooms) = match loaded {
        Ok(v) => v,
        Err(e) => return db_failed(req, "db_query_failed", e),
    };

    // Failure leaves the stored seating for this exam as it was.
    let packing = match seating::allocate_session(&students, &rooms, &exam, &mut state.rng) {
        Ok(p) => p,
        Err(e) => return alloc_err(&req.id, &e),
    };
    if let Err(e) = db::replace_exam_allocations(conn, &exam.exam_id, &packing.records) {
        return db_failed(req, "db_insert_failed", e);
    }

    ok(
        &req.id,
        json!({
            "examId": exam.exam_id,
            "studentsAllocated": packing.students(),
            "roomsUsed": packing.rooms_used,
            "totalCapacity": packing.total_capacity,
            "capacityUtilization": packing.capacity_utilization(),
            "message": format!(
                "{} students distributed across {} room(s)",
                packing.students(),
                packing.rooms_used
            ),
            "records": packing.records,
        }),
    )
}

fn handle_seating_generate_all(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let loaded = db::list_students(conn).and_then(|s| {
        let rooms = db::list_rooms(conn)?;
        let exams = db::list_exams(conn)?;
        Ok((s, rooms, exams))
    });
    let (students, rooms, exams) = match loaded {
        Ok(v) => v,
        Err(e) => return db_failed(req, "db_query_failed", e),
    };

    let run = match seating::allocate_all(&students, &rooms, &exams, &mut state.rng) {
        Ok(r) => r,
        Err(e) => return alloc_err(&req.id, &e),
    };
    if let Err(e) = db::replace_all_allocations(conn, &run.allocations) {
        return db_failed(req, "db_insert_failed", e);
    }

    let sessions: Vec<serde_json::Value> = run
        .sessions
        .iter()
        .map(|s| match &s.outcome {
            Ok(stats) => json!({
                "examId": s.exam_id,
                "subject": s.subject,
                "status": "allocated",
                "studentsAllocated": stats.students,
                "roomsUsed": stats.rooms_used,
                "totalCapacity": stats.total_capacity,
                "message": s.summary_line(),
            }),
            Err(e) => json!({
                "examId": s.exam_id,
                "subject": s.subject,
                "status": "skipped",
                "code": e.code(),
                "details": e.details(),
                "message": s.summary_line(),
            }),
        })
        .collect();

    ok(
        &req.id,
        json!({
            "sessions": sessions,
            "skippedSessions": run.skipped_count(),
            "totalStudents": run.students_allocated(),
            "roomsUtilized": run.distinct_rooms_used(),
            "capacityUtilization": run.capacity_utilization(),
            "totalAllocations": run.allocations.len(),
        }),
    )
}

fn handle_seating_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let exam_id = optional_str(req, "examId");
    match db::list_allocations(conn, exam_id.as_deref()) {
        Ok(rows) => ok(&req.id, json!({ "allocations": rows })),
        Err(e) => db_failed(req, "db_query_failed", e),
    }
}

fn handle_seating_clear(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match db::clear_allocations(conn) {
        Ok(n) => ok(&req.id, json!({ "cleared": n })),
        Err(e) => db_failed(req, "db_delete_failed", e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "seating.generate" => Some(handle_seating_generate(state, req)),
        "seating.generateAll" => Some(handle_seating_generate_all(state, req)),
        "seating.list" => Some(handle_seating_list(state, req)),
        "seating.clear" => Some(handle_seating_clear(state, req)),
        _ => None,
    }
}
