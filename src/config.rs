use tessera_core::grid::STROKE_COLOR_DEFAULT;
use tessera_core::readiness::POLL_INTERVAL_MS_DEFAULT;
use tessera_core::OPTIONS_STORAGE_KEY;

pub const CONTROLS_ANCHOR_ID_DEFAULT: &str = "bottom-keybindings";
pub const CANVAS_ANCHOR_ID_DEFAULT: &str = "editor-canvases";

/// Where to attach, how often to look, and where to persist.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Controls are inserted right before this element.
    pub controls_anchor_id: String,
    /// The overlay is appended to this element and sized to its client box.
    pub canvas_anchor_id: String,
    pub poll_interval_ms: u32,
    pub storage_key: String,
    pub stroke_color: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            controls_anchor_id: CONTROLS_ANCHOR_ID_DEFAULT.to_string(),
            canvas_anchor_id: CANVAS_ANCHOR_ID_DEFAULT.to_string(),
            poll_interval_ms: POLL_INTERVAL_MS_DEFAULT,
            storage_key: OPTIONS_STORAGE_KEY.to_string(),
            stroke_color: STROKE_COLOR_DEFAULT.to_string(),
        }
    }
}

impl OverlayConfig {
    /// Defaults, overridden by `TESSERA_*` variables set at build time.
    pub fn from_env() -> Self {
        Self::from_overrides(
            option_env!("TESSERA_CONTROLS_ANCHOR_ID"),
            option_env!("TESSERA_CANVAS_ANCHOR_ID"),
            option_env!("TESSERA_POLL_INTERVAL_MS"),
            option_env!("TESSERA_STORAGE_KEY"),
            option_env!("TESSERA_STROKE_COLOR"),
        )
    }

    fn from_overrides(
        controls_anchor_id: Option<&str>,
        canvas_anchor_id: Option<&str>,
        poll_interval_ms: Option<&str>,
        storage_key: Option<&str>,
        stroke_color: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            controls_anchor_id: non_empty(controls_anchor_id)
                .unwrap_or(defaults.controls_anchor_id),
            canvas_anchor_id: non_empty(canvas_anchor_id).unwrap_or(defaults.canvas_anchor_id),
            poll_interval_ms: poll_interval_ms
                .and_then(parse_interval_ms)
                .unwrap_or(defaults.poll_interval_ms),
            storage_key: non_empty(storage_key).unwrap_or(defaults.storage_key),
            stroke_color: non_empty(stroke_color).unwrap_or(defaults.stroke_color),
        }
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn parse_interval_ms(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|ms| *ms > 0)
}
