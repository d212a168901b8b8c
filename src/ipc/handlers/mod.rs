pub mod core;
pub mod exports;
pub mod reports;
pub mod session;

use crate::ipc::error::err;
use crate::ipc::types::Request;

pub(crate) fn required_str<'a>(req: &'a Request, key: &str) -> Result<&'a str, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}
