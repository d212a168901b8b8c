use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_rollcalld");
    let mut child = Command::new(exe)
        .arg("--export-dir")
        .arg(std::env::temp_dir())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn rollcalld");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert_eq!(
        value.get("ok").and_then(|v| v.as_bool()),
        Some(true),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_default()
}

fn error_code(value: &serde_json::Value) -> &str {
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
}

#[test]
fn five_student_session_records_edits_and_reports() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let started = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "session.start",
        json!({ "classSize": "5" }),
    );
    assert_eq!(started["classSize"].as_u64(), Some(5));
    assert_eq!(started["stage"].as_str(), Some("recording"));
    assert_eq!(started["notice"]["kind"].as_str(), Some("success"));

    let recorded = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "attendance.record",
        json!({ "text": "2,4,4,6" }),
    );
    let report = &recorded["report"];
    assert_eq!(report["present"], json!([2, 4]));
    assert_eq!(report["absent"], json!([1, 3, 5]));
    assert_eq!(report["presentCount"].as_u64(), Some(2));
    assert_eq!(report["absentCount"].as_u64(), Some(3));
    assert_eq!(report["attendancePercentage"].as_f64(), Some(40.0));

    let view = request_ok(&mut stdin, &mut reader, "3", "report.view", json!({}));
    assert_eq!(view["percentageLabel"].as_str(), Some("40.0"));
    assert_eq!(view["report"]["groups"][0]["first"].as_u64(), Some(1));
    assert_eq!(view["report"]["groups"][0]["last"].as_u64(), Some(5));

    let edit = request_ok(&mut stdin, &mut reader, "4", "attendance.edit", json!({}));
    assert_eq!(edit["text"].as_str(), Some("2, 4"));

    let saved = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "attendance.save",
        json!({ "text": "1\n2\n3\n4\n5" }),
    );
    let percentage = saved["report"]["attendancePercentage"].as_f64();
    assert_eq!(percentage, Some(100.0));
    assert_eq!(
        saved["notice"]["message"].as_str(),
        Some("Attendance updated successfully!")
    );

    let markup = request_ok(&mut stdin, &mut reader, "6", "report.markup", json!({}));
    assert!(markup["html"]
        .as_str()
        .map(|h| h.contains("100.0%"))
        .unwrap_or(false));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn rejected_actions_leave_state_intact() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let bad_size = request(
        &mut stdin,
        &mut reader,
        "1",
        "session.start",
        json!({ "classSize": "0" }),
    );
    assert_eq!(error_code(&bad_size), "invalid_class_size");
    let bad_size = request(&mut stdin, &mut reader, "2", "session.start", json!({}));
    assert_eq!(error_code(&bad_size), "invalid_class_size");
    let too_big = request(
        &mut stdin,
        &mut reader,
        "2b",
        "session.start",
        json!({ "classSize": "5000" }),
    );
    assert_eq!(error_code(&too_big), "class_size_above_limit");
    let cap = too_big["error"]["details"]["maxClassSize"].as_u64();
    assert_eq!(cap, Some(1000));
    assert_eq!(
        too_big["error"]["message"].as_str(),
        Some("Class strength cannot be more than 1000 students.")
    );

    let st = request_ok(&mut stdin, &mut reader, "3", "session.state", json!({}));
    assert_eq!(st["stage"].as_str(), Some("setup"));
    assert_eq!(st["notice"]["kind"].as_str(), Some("error"));

    request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "session.start",
        json!({ "classSize": 10 }),
    );

    let empty = request(
        &mut stdin,
        &mut reader,
        "5",
        "attendance.record",
        json!({ "text": "" }),
    );
    assert_eq!(error_code(&empty), "empty_roll_numbers");

    let invalid = request(
        &mut stdin,
        &mut reader,
        "6",
        "attendance.record",
        json!({ "text": "1, 2, abc, 3.5, abc" }),
    );
    assert_eq!(error_code(&invalid), "invalid_roll_numbers");
    let tokens = &invalid["error"]["details"]["tokens"];
    assert_eq!(tokens, &json!(["abc", "3.5", "abc"]));

    let st = request_ok(&mut stdin, &mut reader, "7", "session.state", json!({}));
    assert_eq!(st["stage"].as_str(), Some("recording"));
    assert_eq!(st["recorded"].as_bool(), Some(false));

    let restart = request(
        &mut stdin,
        &mut reader,
        "8",
        "session.start",
        json!({ "classSize": "12" }),
    );
    assert_eq!(error_code(&restart), "wrong_stage");
    let stage = restart["error"]["details"]["stage"].as_str();
    assert_eq!(stage, Some("recording"));

    let missing = request(&mut stdin, &mut reader, "9", "attendance.record", json!({}));
    assert_eq!(error_code(&missing), "bad_params");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn enter_key_starts_and_typing_clears_notice() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let ignored = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "input.keypress",
        json!({ "field": "classSize", "key": "3", "value": "3" }),
    );
    assert_eq!(ignored["handled"].as_bool(), Some(false));

    let started = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "input.keypress",
        json!({ "field": "classSize", "key": "Enter", "value": "30" }),
    );
    assert_eq!(started["classSize"].as_u64(), Some(30));

    let notice = request_ok(&mut stdin, &mut reader, "3", "notice.get", json!({}));
    assert!(notice["notice"]["message"]
        .as_str()
        .map(|m| m.starts_with("Class strength set to 30 students."))
        .unwrap_or(false));

    request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "input.changed",
        json!({ "field": "rollNumbers" }),
    );
    let notice = request_ok(&mut stdin, &mut reader, "5", "notice.get", json!({}));
    assert!(notice["notice"].is_null());

    let bad_field = request(
        &mut stdin,
        &mut reader,
        "6",
        "input.changed",
        json!({ "field": "nope" }),
    );
    assert_eq!(error_code(&bad_field), "bad_params");

    drop(stdin);
    let _ = child.wait();
}
