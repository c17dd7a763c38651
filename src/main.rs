mod config;
mod conflicts;
mod db;
mod ipc;
mod logging;
mod model;
mod reports;
mod seating;

use std::io::{self, BufRead, Write};
use tracing::{info, warn};

fn main() {
    let config = config::Config::from_env();
    logging::init(&config.log_filter);

    let mut state = ipc::AppState::new(config.seed);
    if let Some(path) = config.workspace.clone() {
        if let Err(e) = ipc::open_workspace(&mut state, path) {
            warn!("startup workspace not opened: {e:#}");
        }
    }
    info!(version = env!("CARGO_PKG_VERSION"), "examseatd ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id; answer with an id-less error line.
                warn!("unparseable request: {e}");
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", resp);
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}
