use super::required_str;
use crate::ipc::error::{err, ok, session_err};
use crate::ipc::types::{AppState, Request};
use crate::session::Field;
use serde_json::json;

/// The class size arrives as typed text or as a JSON number.
fn class_size_text(req: &Request) -> Result<String, serde_json::Value> {
    match req.params.get("classSize") {
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        Some(serde_json::Value::Null) | None => Ok(String::new()),
        Some(_) => Err(err(
            &req.id,
            "bad_params",
            "classSize must be a string or number",
            None,
        )),
    }
}

fn field_param(req: &Request) -> Result<Field, serde_json::Value> {
    let name = required_str(req, "field")?;
    Field::from_name(name).ok_or_else(|| {
        let allowed = json!(["classSize", "rollNumbers", "editRollNumbers"]);
        err(
            &req.id,
            "bad_params",
            format!("unknown field: {}", name),
            Some(json!({ "allowed": allowed })),
        )
    })
}

fn started(state: &AppState, req: &Request, class_size: u32) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "classSize": class_size,
            "stage": state.session.stage().as_str(),
            "notice": state.session.notice(),
        }),
    )
}

fn handle_session_start(state: &mut AppState, req: &Request) -> serde_json::Value {
    let raw = match class_size_text(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.session.start(&raw) {
        Ok(size) => started(state, req, size),
        Err(e) => session_err(&req.id, &e),
    }
}

fn handle_attendance_record(state: &mut AppState, req: &Request) -> serde_json::Value {
    let text = match required_str(req, "text") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.session.record(text) {
        Ok(report) => ok(
            &req.id,
            json!({
                "stage": state.session.stage().as_str(),
                "report": report,
            }),
        ),
        Err(e) => session_err(&req.id, &e),
    }
}

fn handle_attendance_edit(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.session.begin_edit() {
        Ok(prefill) => ok(
            &req.id,
            json!({
                "editing": true,
                "text": prefill,
            }),
        ),
        Err(e) => session_err(&req.id, &e),
    }
}

fn handle_attendance_save(state: &mut AppState, req: &Request) -> serde_json::Value {
    let text = match required_str(req, "text") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.session.save_edit(text) {
        Ok(report) => ok(
            &req.id,
            json!({
                "editing": false,
                "report": report,
                "notice": state.session.notice(),
            }),
        ),
        Err(e) => session_err(&req.id, &e),
    }
}

fn handle_input_changed(state: &mut AppState, req: &Request) -> serde_json::Value {
    match field_param(req) {
        Ok(field) => {
            state.session.input_changed(field);
            ok(&req.id, json!({ "notice": null }))
        }
        Err(resp) => resp,
    }
}

fn handle_input_keypress(state: &mut AppState, req: &Request) -> serde_json::Value {
    let field = match field_param(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let key = match required_str(req, "key") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let value = req
        .params
        .get("value")
        .and_then(|v| v.as_str())
        .unwrap_or_default();

    match state.session.key_press(field, key, value) {
        Ok(Some(size)) => started(state, req, size),
        Ok(None) => ok(&req.id, json!({ "handled": false })),
        Err(e) => session_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.start" => Some(handle_session_start(state, req)),
        "attendance.record" => Some(handle_attendance_record(state, req)),
        "attendance.edit" => Some(handle_attendance_edit(state, req)),
        "attendance.save" => Some(handle_attendance_save(state, req)),
        "input.changed" => Some(handle_input_changed(state, req)),
        "input.keypress" => Some(handle_input_keypress(state, req)),
        _ => None,
    }
}
