use reqview_core::Severity;
use serde::{Deserialize, Serialize};

/// Background colour per severity, used for highlight tags. Empty entries
/// and names that are not a severity resolve to `fallback`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SeverityColorMap {
    pub information: String,
    pub low: String,
    pub medium: String,
    pub high: String,
    pub fallback: String,
}

impl Default for SeverityColorMap {
    fn default() -> Self {
        Self {
            information: "#00ff00".to_string(),
            low: "#0000ff".to_string(),
            medium: "#ffff00".to_string(),
            high: "#ff0000".to_string(),
            fallback: "#ffff00".to_string(),
        }
    }
}

impl SeverityColorMap {
    pub fn color(&self, severity: Severity) -> &str {
        let color = match severity {
            Severity::Information => &self.information,
            Severity::Low => &self.low,
            Severity::Medium => &self.medium,
            Severity::High => &self.high,
        };
        if color.trim().is_empty() {
            &self.fallback
        } else {
            color
        }
    }

    pub fn color_for_name(&self, name: &str) -> &str {
        match Severity::parse(name) {
            Some(severity) => self.color(severity),
            None => &self.fallback,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewerConfig {
    pub enable_manual_button: bool,
    pub enable_fuzzy_button: bool,
    pub enable_compare_button: bool,
    pub request_editable: bool,
    pub response_editable: bool,
    pub widget_name: String,
    pub severity_colors: SeverityColorMap,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            enable_manual_button: true,
            enable_fuzzy_button: true,
            enable_compare_button: true,
            request_editable: false,
            response_editable: false,
            widget_name: "default".to_string(),
            severity_colors: SeverityColorMap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_matches_severity_ranks() {
        let colors = SeverityColorMap::default();
        assert_eq!(colors.color(Severity::Information), "#00ff00");
        assert_eq!(colors.color(Severity::Low), "#0000ff");
        assert_eq!(colors.color(Severity::Medium), "#ffff00");
        assert_eq!(colors.color(Severity::High), "#ff0000");
    }

    #[test]
    fn unknown_or_blank_falls_back() {
        let colors = SeverityColorMap {
            high: " ".to_string(),
            fallback: "#abcdef".to_string(),
            ..SeverityColorMap::default()
        };
        assert_eq!(colors.color(Severity::High), "#abcdef");
        assert_eq!(colors.color_for_name("critical"), "#abcdef");
        assert_eq!(colors.color_for_name("low"), "#0000ff");
    }

    #[test]
    fn default_config_enables_buttons_and_is_read_only() {
        let config = ViewerConfig::default();
        assert!(config.enable_manual_button);
        assert!(config.enable_fuzzy_button);
        assert!(config.enable_compare_button);
        assert!(!config.request_editable);
        assert!(!config.response_editable);
        assert_eq!(config.widget_name, "default");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ViewerConfig = toml::from_str(
            r##"
enable_fuzzy_button = false
request_editable = true

[severity_colors]
high = "#aa0000"
"##,
        )
        .unwrap();
        assert!(config.enable_manual_button);
        assert!(!config.enable_fuzzy_button);
        assert!(config.request_editable);
        assert_eq!(config.severity_colors.color(Severity::High), "#aa0000");
        assert_eq!(config.severity_colors.color(Severity::Low), "#0000ff");
    }
}
