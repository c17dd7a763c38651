use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    /// Shuffle source for seating runs.
    pub rng: StdRng,
}

impl AppState {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            workspace: None,
            db: None,
            rng,
        }
    }
}
