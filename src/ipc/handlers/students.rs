use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{db_conn, db_failed, required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::Student;
use serde_json::json;

/// Accepts `["A", "B"]` or `"A, B"` / `"A; B"`. Entries are trimmed, blanks
/// dropped and repeats removed keeping the first occurrence.
pub fn parse_subjects(v: Option<&serde_json::Value>) -> Option<Vec<String>> {
    let raw: Vec<String> = match v? {
        serde_json::Value::Array(items) => items
            .iter()
            .map(|i| i.as_str().map(|s| s.to_string()))
            .collect::<Option<Vec<_>>>()?,
        serde_json::Value::String(s) => s.split([',', ';']).map(|p| p.to_string()).collect(),
        _ => return None,
    };
    let mut out: Vec<String> = Vec::new();
    for s in raw {
        let t = s.trim();
        if t.is_empty() || out.iter().any(|o| o == t) {
            continue;
        }
        out.push(t.to_string());
    }
    Some(out)
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return ok(&req.id, json!({ "students": [] }));
    };
    match db::list_students(conn) {
        Ok(students) => ok(&req.id, json!({ "students": students })),
        Err(e) => db_failed(req, "db_query_failed", e),
    }
}

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let roll_no = match required_str(req, "rollNo") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let department = req
        .params
        .get("department")
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let Some(subjects) = parse_subjects(req.params.get("subjects")) else {
        return err(
            &req.id,
            "bad_params",
            "subjects must be a list of strings or a comma separated string",
            None,
        );
    };
    if subjects.is_empty() {
        return err(&req.id, "bad_params", "at least one subject is required", None);
    }

    match db::student_exists(conn, &roll_no) {
        Ok(true) => {
            return err(
                &req.id,
                "duplicate",
                format!("roll number {} already exists", roll_no),
                Some(json!({ "rollNo": roll_no })),
            )
        }
        Ok(false) => {}
        Err(e) => return db_failed(req, "db_query_failed", e),
    }

    let student = Student {
        roll_no,
        name,
        department,
        subjects,
    };
    match db::insert_student(conn, &student) {
        Ok(()) => ok(&req.id, json!({ "rollNo": student.roll_no, "student": student })),
        Err(e) => db_failed(req, "db_insert_failed", e),
    }
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let roll_no = match required_str(req, "rollNo") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match db::delete_student(conn, &roll_no) {
        Ok(0) => err(&req.id, "not_found", "student not found", None),
        Ok(_) => ok(&req.id, json!({ "rollNo": roll_no })),
        Err(e) => db_failed(req, "db_delete_failed", e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        _ => None,
    }
}
