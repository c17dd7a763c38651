use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{db_conn, db_failed, optional_str, required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::ExamSession;
use serde_json::json;
use uuid::Uuid;

fn handle_exams_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return ok(&req.id, json!({ "exams": [] }));
    };
    match db::list_exams(conn) {
        Ok(exams) => ok(&req.id, json!({ "exams": exams })),
        Err(e) => db_failed(req, "db_query_failed", e),
    }
}

fn parse_exam(req: &Request) -> Result<ExamSession, serde_json::Value> {
    Ok(ExamSession {
        exam_id: optional_str(req, "examId")
            .unwrap_or_else(|| format!("EX-{}", Uuid::new_v4().simple())),
        subject: required_str(req, "subject")?,
        subject_name: required_str(req, "subjectName")?,
        date: required_str(req, "date")?,
        time: required_str(req, "time")?,
    })
}

fn handle_exams_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let exam = match parse_exam(req) {
        Ok(e) => e,
        Err(resp) => return resp,
    };

    match db::get_exam(conn, &exam.exam_id) {
        Ok(Some(_)) => {
            return err(
                &req.id,
                "duplicate",
                format!("exam {} already exists", exam.exam_id),
                Some(json!({ "examId": exam.exam_id })),
            )
        }
        Ok(None) => {}
        Err(e) => return db_failed(req, "db_query_failed", e),
    }
    match db::exam_slot_taken(conn, &exam.subject, &exam.date, &exam.time) {
        Ok(true) => {
            return err(
                &req.id,
                "duplicate",
                format!(
                    "{} is already scheduled on {} at {}",
                    exam.subject, exam.date, exam.time
                ),
                Some(json!({ "subject": exam.subject, "date": exam.date, "time": exam.time })),
            )
        }
        Ok(false) => {}
        Err(e) => return db_failed(req, "db_query_failed", e),
    }

    match db::insert_exam(conn, &exam) {
        Ok(()) => ok(&req.id, json!({ "examId": exam.exam_id, "exam": exam })),
        Err(e) => db_failed(req, "db_insert_failed", e),
    }
}

fn handle_exams_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let exam_id = match required_str(req, "examId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match db::delete_exam(conn, &exam_id) {
        Ok(0) => err(&req.id, "not_found", "exam not found", None),
        Ok(_) => ok(&req.id, json!({ "examId": exam_id })),
        Err(e) => db_failed(req, "db_delete_failed", e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "exams.list" => Some(handle_exams_list(state, req)),
        "exams.create" => Some(handle_exams_create(state, req)),
        "exams.delete" => Some(handle_exams_delete(state, req)),
        _ => None,
    }
}
