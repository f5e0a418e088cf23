use crate::pairing::DEFAULT_TOLERANCE;
use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairingConfig {
    /// Vectors shorter than this are treated as zero, and points this close to a
    /// splitting plane count as lying on it.
    pub tolerance: f64,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Pair of frame axes the preview is drawn in; first is horizontal, second vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ProjectionView {
    #[default]
    Xz,
    Xy,
    Yz,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub view: ProjectionView,
    pub show_unmatched: bool,
    pub connector_radius: f32,
    pub label_offset: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: 48.0,
            view: ProjectionView::Xz,
            show_unmatched: true,
            connector_radius: 5.0,
            label_offset: 9.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub pairing: PairingConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    text_color: Option<String>,
    inlet_color: Option<String>,
    outlet_color: Option<String>,
    target_color: Option<String>,
    pair_line_color: Option<String>,
    unmatched_color: Option<String>,
    axis_color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PairingConfigFile {
    tolerance: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    view: Option<ProjectionView>,
    show_unmatched: Option<bool>,
    connector_radius: Option<f32>,
    label_offset: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    pairing: Option<PairingConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("loading config file {}", path.display()))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = match theme_name {
            "blueprint" => Theme::blueprint(),
            "default" | "base" => Theme::default_theme(),
            other => return Err(anyhow::anyhow!("unknown theme '{}'", other)),
        };
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.inlet_color {
            config.theme.inlet_color = v;
        }
        if let Some(v) = vars.outlet_color {
            config.theme.outlet_color = v;
        }
        if let Some(v) = vars.target_color {
            config.theme.target_color = v;
        }
        if let Some(v) = vars.pair_line_color {
            config.theme.pair_line_color = v;
        }
        if let Some(v) = vars.unmatched_color {
            config.theme.unmatched_color = v;
        }
        if let Some(v) = vars.axis_color {
            config.theme.axis_color = v;
        }
    }

    if let Some(pairing) = parsed.pairing {
        if let Some(tolerance) = pairing.tolerance {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(anyhow::anyhow!(
                    "pairing.tolerance must be a positive finite number, got {}",
                    tolerance
                ));
            }
            config.pairing.tolerance = tolerance;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.padding {
            config.render.padding = v;
        }
        if let Some(v) = render.view {
            config.render.view = v;
        }
        if let Some(v) = render.show_unmatched {
            config.render.show_unmatched = v;
        }
        if let Some(v) = render.connector_radius {
            config.render.connector_radius = v;
        }
        if let Some(v) = render.label_offset {
            config.render.label_offset = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.pairing.tolerance, 1e-9);
        assert_eq!(config.render.view, ProjectionView::Xz);
    }

    #[test]
    fn overrides_only_given_fields() {
        let config = parse_config(
            r##"{
                "theme": "blueprint",
                "themeVariables": { "outletColor": "#ff0000" },
                "pairing": { "tolerance": 1e-6 },
                "render": { "width": 320, "view": "xy", "showUnmatched": false }
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.outlet_color, "#ff0000");
        assert_eq!(config.theme.background, Theme::blueprint().background);
        assert_eq!(config.pairing.tolerance, 1e-6);
        assert_eq!(config.render.width, 320.0);
        assert_eq!(config.render.height, RenderConfig::default().height);
        assert_eq!(config.render.view, ProjectionView::Xy);
        assert!(!config.render.show_unmatched);
    }

    #[test]
    fn rejects_non_positive_tolerance() {
        let err = parse_config(r#"{ "pairing": { "tolerance": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("tolerance"));
    }

    #[test]
    fn rejects_unknown_theme() {
        assert!(parse_config(r#"{ "theme": "neon" }"#).is_err());
    }
}
