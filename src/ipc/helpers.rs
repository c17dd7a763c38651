use crate::ipc::error::err;
use crate::ipc::types::{AppState, Request};
use rusqlite::Connection;

pub fn db_conn<'a>(state: &'a AppState, req: &Request) -> Result<&'a Connection, serde_json::Value> {
    state
        .db
        .as_ref()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a workspace first", None))
}

/// Trimmed, non-empty string param.
pub fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    let Some(raw) = req.params.get(key).and_then(|v| v.as_str()) else {
        return Err(err(&req.id, "bad_params", format!("missing {}", key), None));
    };
    let t = raw.trim();
    if t.is_empty() {
        return Err(err(
            &req.id,
            "bad_params",
            format!("{} must not be empty", key),
            None,
        ));
    }
    Ok(t.to_string())
}

pub fn optional_str(req: &Request, key: &str) -> Option<String> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Positive integer param; numeric strings are accepted.
pub fn required_positive(req: &Request, key: &str) -> Result<u32, serde_json::Value> {
    let v = req.params.get(key);
    let n = v
        .and_then(|v| v.as_u64())
        .or_else(|| v.and_then(|v| v.as_str()).and_then(|s| s.trim().parse::<u64>().ok()));
    match n {
        Some(n) if n >= 1 && n <= u32::MAX as u64 => Ok(n as u32),
        _ => Err(err(
            &req.id,
            "bad_params",
            format!("{} must be a positive integer", key),
            None,
        )),
    }
}

pub fn db_failed(req: &Request, code: &str, e: anyhow::Error) -> serde_json::Value {
    err(&req.id, code, format!("{e:#}"), None)
}
