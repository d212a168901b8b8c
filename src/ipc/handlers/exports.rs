use crate::ipc::error::{ok, session_err};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;

/// `params.outDir` overrides the configured export directory.
fn out_dir(state: &AppState, req: &Request) -> PathBuf {
    req.params
        .get("outDir")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
        .unwrap_or_else(|| state.export_dir.clone())
}

fn handle_export_image(state: &mut AppState, req: &Request) -> serde_json::Value {
    let dir = out_dir(state, req);
    let now = chrono::Local::now().naive_local();
    match state.session.export_image(&dir, now) {
        Ok((file, layout)) => ok(
            &req.id,
            json!({
                "file": file,
                "layout": layout,
                "notice": state.session.notice(),
            }),
        ),
        Err(e) => session_err(&req.id, &e),
    }
}

fn handle_export_csv(state: &mut AppState, req: &Request) -> serde_json::Value {
    let dir = out_dir(state, req);
    let now = chrono::Local::now().naive_local();
    match state.session.export_csv(&dir, now) {
        Ok((file, content)) => ok(
            &req.id,
            json!({
                "file": file,
                "content": content,
                "notice": state.session.notice(),
            }),
        ),
        Err(e) => session_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "export.image" => Some(handle_export_image(state, req)),
        "export.csv" => Some(handle_export_csv(state, req)),
        _ => None,
    }
}
