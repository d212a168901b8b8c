use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn session_summary(state: &AppState) -> serde_json::Value {
    let session = &state.session;
    json!({
        "stage": session.stage().as_str(),
        "editing": session.stage().is_editing(),
        "classSize": session.class_size(),
        "recorded": session.attendance().map(|a| a.is_recorded()).unwrap_or(false),
        "notice": session.notice(),
    })
}

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "stage": state.session.stage().as_str(),
            "exportDir": state.export_dir.to_string_lossy(),
        }),
    )
}

fn handle_session_state(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, session_summary(state))
}

fn handle_notice_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "notice": state.session.notice() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "session.state" => Some(handle_session_state(state, req)),
        "notice.get" => Some(handle_notice_get(state, req)),
        _ => None,
    }
}
