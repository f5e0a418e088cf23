use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub text_color: String,
    pub inlet_color: String,
    pub outlet_color: String,
    pub target_color: String,
    pub pair_line_color: String,
    pub unmatched_color: String,
    pub axis_color: String,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            background: "#FFFFFF".to_string(),
            text_color: "#1C2430".to_string(),
            inlet_color: "#1C2430".to_string(),
            outlet_color: "#2F6FDB".to_string(),
            target_color: "#1F9D6B".to_string(),
            pair_line_color: "#7A8AA6".to_string(),
            unmatched_color: "#D64545".to_string(),
            axis_color: "#D7E0F0".to_string(),
        }
    }

    pub fn blueprint() -> Self {
        Self {
            font_family: "\"DejaVu Sans Mono\", Menlo, monospace".to_string(),
            font_size: 11.0,
            background: "#0B3D6E".to_string(),
            text_color: "#EAF2FB".to_string(),
            inlet_color: "#FFFFFF".to_string(),
            outlet_color: "#9CD2FF".to_string(),
            target_color: "#FFD479".to_string(),
            pair_line_color: "#EAF2FB".to_string(),
            unmatched_color: "#FF8A80".to_string(),
            axis_color: "#2C5F92".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
