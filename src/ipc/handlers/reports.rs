use crate::ipc::error::{ok, session_err};
use crate::ipc::types::{AppState, Request};
use crate::render;
use serde_json::json;

fn handle_report_view(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.session.report() {
        Ok(report) => ok(
            &req.id,
            json!({
                "percentageLabel": report.percentage_label(),
                "report": report,
            }),
        ),
        Err(e) => session_err(&req.id, &e),
    }
}

fn handle_report_markup(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.session.report() {
        Ok(report) => ok(&req.id, json!({ "html": render::to_markup(&report) })),
        Err(e) => session_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "report.view" => Some(handle_report_view(state, req)),
        "report.markup" => Some(handle_report_markup(state, req)),
        _ => None,
    }
}
