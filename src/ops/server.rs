//! Server operation: `run_server`.

use super::{OpResult, error_chain, to_value};
use crate::log;
use crate::serve::{DEFAULT_PORT, PreviewServer};
use crate::site::Site;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunServerResult {
    success: bool,
    port: u16,
    url: String,
    root_dir: String,
}

/// Start the preview server over `dist` on a detached thread.
///
/// The listener keeps running after this operation returns; stopping it
/// is the caller's responsibility. An absent `dist` or an unbindable
/// port is an explicit failure.
pub fn run_server(site: &Site, args: &Value) -> OpResult {
    let port = args
        .get("port")
        .and_then(Value::as_u64)
        .map_or(DEFAULT_PORT, |p| p as u16);
    let root = site.dist_dir();

    match PreviewServer::bind(&root, port) {
        Ok(server) => {
            let url = server.url();
            let result = RunServerResult {
                success: true,
                port: server.port(),
                url: url.clone(),
                root_dir: server.root().display().to_string(),
            };
            log!("serve"; "{url}");
            server.spawn();

            Ok(to_value(result))
        }
        Err(err) => Ok(json!({
            "success": false,
            "error": error_chain(&err),
            "rootDir": root.display().to_string(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use crate::ops::dispatch;
    use crate::site::Site;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_run_server_missing_dist_fails() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path());

        let result = dispatch(&site, "run_server", &json!({}));
        assert_eq!(result["success"], false);
        assert!(result["error"].as_str().unwrap().contains("dist"));
    }
}
