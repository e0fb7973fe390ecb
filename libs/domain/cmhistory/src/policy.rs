use std::path::Path;

use cmchrono::duration::Span;

use crate::Error;

// -----------------------------------------------------------------------------
// CoveragePolicy
// -----------------------------------------------------------------------------
/// Business rules of a history coverage check.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case", deny_unknown_fields, default)]
pub struct CoveragePolicy {
    /// Length of the trailing window which must be covered. 5 years by default.
    pub lookback: Span,

    /// Cap the displayed percentage at 100.
    ///
    /// Whole month rounding of several short periods can add up to more
    /// than the window itself.
    pub clamp_percentage: bool,
}

impl Default for CoveragePolicy {
    fn default() -> Self {
        CoveragePolicy {
            lookback: Span::default(),
            clamp_percentage: true,
        }
    }
}

//
// ser/de
//
impl CoveragePolicy {
    pub fn from_yaml_str(s: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse = match ext.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(Error::UnsupportedFormat(path.to_owned())),
        };
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let policy = parse(&contents)?;
        log::debug!("loaded coverage policy from {path:?}: {policy:?}");
        Ok(policy)
    }

    /// [`CoveragePolicy::from_path`] if a path is given, the default otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        path.map_or_else(|| Ok(Self::default()), Self::from_path)
    }
}
