//! JSONP response bodies.
//!
//! JSONP delivery is off for every type until the engine config opts it in
//! with [`Config::allow_jsonp_callback`](veneer::Config::allow_jsonp_callback).
//! The callback name comes from an untrusted query parameter, so it is
//! validated against a conservative identifier-path grammar before being
//! echoed into the body.

use serde_json::Value;
use veneer::Config;

use crate::{json, FormatError};

/// Serializes a document as a JSONP callback invocation.
///
/// # Errors
///
/// [`FormatError::CallbackRefused`] when `config` does not allow callbacks
/// for `api_type`; [`FormatError::InvalidCallback`] when the callback name
/// is not a plain identifier path.
pub fn to_string(
    doc: &Value,
    callback: &str,
    api_type: &str,
    config: &Config,
) -> Result<String, FormatError> {
    if !config.jsonp_allowed(api_type) {
        return Err(FormatError::CallbackRefused {
            api_type: api_type.to_string(),
        });
    }
    if !valid_callback(callback) {
        return Err(FormatError::InvalidCallback {
            name: callback.to_string(),
        });
    }

    Ok(format!("{callback}({})", json::to_string(doc)?))
}

/// Accepts dotted identifier paths like `handleUsers` or `app.api.done`.
fn valid_callback(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
                }
                _ => false,
            }
        })
}
