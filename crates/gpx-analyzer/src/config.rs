//! Runtime configuration read from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::AnalyzerError;
use crate::metrics::DistanceMethod;

pub const MAP_PATH_VAR: &str = "GPX_ANALYZER_MAP";
pub const CHART_PATH_VAR: &str = "GPX_ANALYZER_CHART";
pub const OPEN_VIEWER_VAR: &str = "GPX_ANALYZER_OPEN";
pub const DISTANCE_METHOD_VAR: &str = "GPX_ANALYZER_DISTANCE";

pub const DEFAULT_MAP_PATH: &str = "track_map.html";
pub const DEFAULT_CHART_PATH: &str = "elevation_profile.svg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Where the interactive map document is written.
    pub map_path: PathBuf,
    /// Where the elevation chart is written; `None` skips the chart.
    pub chart_path: Option<PathBuf>,
    /// Hand the map to the system viewer once written.
    pub open_viewer: bool,
    pub distance_method: DistanceMethod,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            map_path: PathBuf::from(DEFAULT_MAP_PATH),
            chart_path: Some(PathBuf::from(DEFAULT_CHART_PATH)),
            open_viewer: true,
            distance_method: DistanceMethod::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_env() -> Result<Self, AnalyzerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup, falling back to
    /// defaults for anything unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AnalyzerError> {
        let mut config = Self::default();

        if let Some(path) = lookup(MAP_PATH_VAR) {
            if path.trim().is_empty() {
                return Err(AnalyzerError::Config(format!("{MAP_PATH_VAR} must not be empty")));
            }
            config.map_path = PathBuf::from(path);
        }

        if let Some(path) = lookup(CHART_PATH_VAR) {
            config.chart_path = if path.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }

        if let Some(value) = lookup(OPEN_VIEWER_VAR) {
            config.open_viewer = parse_bool(&value).ok_or_else(|| {
                AnalyzerError::Config(format!("{OPEN_VIEWER_VAR}: expected a boolean, got '{value}'"))
            })?;
        }

        if let Some(value) = lookup(DISTANCE_METHOD_VAR) {
            config.distance_method = value
                .parse()
                .map_err(|e| AnalyzerError::Config(format!("{DISTANCE_METHOD_VAR}: {e}")))?;
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AnalyzerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.map_path, PathBuf::from("track_map.html"));
        assert!(config.open_viewer);
    }

    #[test]
    fn test_overrides() {
        let config = AnalyzerConfig::from_lookup(lookup(&[
            (MAP_PATH_VAR, "out/map.html"),
            (CHART_PATH_VAR, ""),
            (OPEN_VIEWER_VAR, "no"),
            (DISTANCE_METHOD_VAR, "haversine"),
        ]))
        .unwrap();

        assert_eq!(config.map_path, PathBuf::from("out/map.html"));
        assert_eq!(config.chart_path, None);
        assert!(!config.open_viewer);
        assert_eq!(config.distance_method, DistanceMethod::Haversine);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let result = AnalyzerConfig::from_lookup(lookup(&[(OPEN_VIEWER_VAR, "sometimes")]));
        assert!(matches!(result, Err(AnalyzerError::Config(_))));

        let result = AnalyzerConfig::from_lookup(lookup(&[(DISTANCE_METHOD_VAR, "flat")]));
        assert!(matches!(result, Err(AnalyzerError::Config(_))));

        let result = AnalyzerConfig::from_lookup(lookup(&[(MAP_PATH_VAR, "  ")]));
        assert!(matches!(result, Err(AnalyzerError::Config(_))));
    }
}
