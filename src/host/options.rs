use crate::foundation::error::{RailyardError, RailyardResult};

/// Options recognized when mounting a container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RenderOptions {
    /// Keep the container's previous content after the diagram instead of discarding it.
    pub keep_content: bool,
}

impl RenderOptions {
    /// Parse options from a JSON object such as `{"keepContent": true}`.
    pub fn from_json(json: &str) -> RailyardResult<Self> {
        serde_json::from_str(json).map_err(|e| RailyardError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/options.rs"]
mod tests;
