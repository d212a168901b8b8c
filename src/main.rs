mod attendance;
mod config;
mod error;
mod export;
mod ipc;
mod notice;
mod render;
mod roster;
mod session;

use clap::Parser;
use log::{info, warn};
use serde_json::json;
use std::io::{self, BufRead, Write};

fn init_logging(cfg: &config::Config) {
    // stdout carries the protocol; logs go to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cfg.log_level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    let cfg = config::Config::parse();
    init_logging(&cfg);
    info!(
        "rollcalld {} ready (exports -> {})",
        env!("CARGO_PKG_VERSION"),
        cfg.export_dir.to_string_lossy()
    );

    let mut state = ipc::AppState {
        export_dir: cfg.export_dir.clone(),
        session: session::SessionController::new(cfg.max_class_size),
    };

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
                // Can't reply without id.
                warn!("bad request line: {e}");
                let bad = json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", bad);
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

    info!("stdin closed, exiting");
}
