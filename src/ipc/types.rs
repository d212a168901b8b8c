use serde::Deserialize;
use std::path::PathBuf;

use crate::session::SessionController;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub export_dir: PathBuf,
    pub session: SessionController,
}
