//! Request handling for the standalone engine process.
//!
//! One JSON document comes in on stdin, one response goes out on
//! stdout. The document may be a bare parameter mapping or wrapped
//! under `"habitat"`. Input that is not JSON at all gets an error
//! response and a failing exit status; anything that parses produces a
//! layout, with defaults filled in for missing fields.

use habitat_logic::{generate_layout_from_raw, LayoutResponse};
use serde_json::Value;
use tracing::{debug, warn};

/// Handle one request. The flag is `false` when the request failed.
pub fn handle_request(input: &str) -> (LayoutResponse, bool) {
    let raw: Value = match serde_json::from_str(input) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(error = %err, "rejecting unparseable request");
            return (
                LayoutResponse::error(format!("Failed to parse input JSON: {err}")),
                false,
            );
        }
    };

    match generate_layout_from_raw(&raw) {
        Ok(layout) => {
            debug!(modules = layout.modules.len(), layers = layout.layer_count(), "layout generated");
            (LayoutResponse::Success(layout), true)
        }
        Err(err) => {
            warn!(error = %err, "rejecting malformed parameters");
            (
                LayoutResponse::error(format!("Failed to parse input JSON: {err}")),
                false,
            )
        }
    }
}
