//! Test data fixtures.

use std::path::PathBuf;

use apicheck_contract::ErrorEnvelope;
use serde_json::{Value, json};
use tempfile::TempDir;

/// A well-formed unknown-request body.
pub fn unknown_request_body(detail: &str) -> String {
    ErrorEnvelope::unknown_request(detail).to_body()
}

/// A contract file declaring a 410 matcher and a few captured cases.
pub fn orders_contract() -> Value {
    json!({
        "name": "orders-api",
        "description": "Error contracts of the orders API",
        "matchers": [
            {
                "name": "be_a_410",
                "status": 410,
                "code": 10004,
                "description": {"matches": "^Order \\d+ was cancelled$"}
            }
        ],
        "cases": [
            {
                "name": "unknown route",
                "response": {"statusCode": 404, "body": unknown_request_body("/nope")}
            },
            {
                "name": "cancelled order",
                "matcher": "be_a_410",
                "response": {
                    "statusCode": 410,
                    "body": "{\"code\":10004,\"description\":\"Order 7 was cancelled\"}"
                }
            },
            {
                "name": "legacy error code",
                "tags": ["legacy"],
                "response": {
                    "statusCode": 404,
                    "body": "{\"code\":9999,\"description\":\"Unknown request\"}"
                }
            }
        ]
    })
}

/// Writes a JSON document into a temporary directory.
pub fn write_contract(dir: &TempDir, file_name: &str, contract: &Value) -> PathBuf {
    let path = dir.path().join(file_name);
    std::fs::write(&path, serde_json::to_string_pretty(contract).unwrap())
        .expect("Failed to write contract file");
    path
}
