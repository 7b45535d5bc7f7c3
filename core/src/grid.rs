use crate::catalog::{PatternCatalog, PatternDefinition, NONE_PATTERN_ID};
use crate::options::GridOptions;

pub const GRID_PATTERN_ELEMENT_ID: &str = "grid-pattern";
pub const STROKE_WIDTH_BASE: f64 = 1.0;
pub const STROKE_COLOR_DEFAULT: &str = "black";
const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Pixel box of the overlay, measured once from the host container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerSize {
    pub width: u32,
    pub height: u32,
}

impl ContainerSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Tile placement expressed as percentages of the container box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileLayout {
    pub repeat_x: f64,
    pub repeat_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub stroke_width: f64,
}

pub fn tile_layout(
    options: &GridOptions,
    pattern: &PatternDefinition,
    size: ContainerSize,
) -> TileLayout {
    let ratio_x = pattern.width / size.width as f64;
    let ratio_y = pattern.height / size.height as f64;
    TileLayout {
        repeat_x: options.scale * ratio_x * 100.0,
        repeat_y: options.scale * ratio_y * 100.0,
        offset_x: options.offset_x * ratio_x * 100.0,
        offset_y: options.offset_y * ratio_y * 100.0,
        stroke_width: STROKE_WIDTH_BASE / options.scale,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GridScene {
    Empty,
    Tiled {
        size: ContainerSize,
        pattern: &'static PatternDefinition,
        layout: TileLayout,
    },
}

/// Why a scene came out the way it did, for the caller to log.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutcome {
    Cleared,
    Drawn(TileLayout),
    UnknownPattern(String),
    InvalidGeometry { scale: f64, size: ContainerSize },
}

pub fn build_scene(
    options: &GridOptions,
    size: ContainerSize,
    catalog: &PatternCatalog,
) -> (GridScene, RenderOutcome) {
    if options.pattern_id == NONE_PATTERN_ID {
        return (GridScene::Empty, RenderOutcome::Cleared);
    }
    let Some(pattern) = catalog.get(&options.pattern_id) else {
        return (
            GridScene::Empty,
            RenderOutcome::UnknownPattern(options.pattern_id.clone()),
        );
    };
    if size.is_empty() || !options.scale.is_finite() || options.scale <= 0.0 {
        return (
            GridScene::Empty,
            RenderOutcome::InvalidGeometry {
                scale: options.scale,
                size,
            },
        );
    }
    let layout = tile_layout(options, pattern, size);
    (
        GridScene::Tiled {
            size,
            pattern,
            layout,
        },
        RenderOutcome::Drawn(layout),
    )
}

impl GridScene {
    /// SVG markup that replaces the overlay's content; empty for `Empty`.
    pub fn to_markup(&self, stroke_color: &str) -> String {
        let GridScene::Tiled {
            size,
            pattern,
            layout,
        } = self
        else {
            return String::new();
        };
        let (w, h) = (size.width, size.height);
        format!(
            "<svg width='{w}' height='{h}' viewBox='0 0 {w} {h}' style='width: 100%; height: 100%' xmlns='{SVG_NS}'>\
             <defs><pattern id='{GRID_PATTERN_ELEMENT_ID}' viewBox='0 0 {pw} {ph}' x='{ox}%' y='{oy}%' width='{rx}%' height='{ry}%'>\
             <g stroke='{stroke_color}' fill='none' stroke-width='{sw}'>{content}</g>\
             </pattern></defs><rect fill='url(#{GRID_PATTERN_ELEMENT_ID})' width='{w}' height='{h}'/></svg>",
            pw = pattern.width,
            ph = pattern.height,
            ox = layout.offset_x,
            oy = layout.offset_y,
            rx = layout.repeat_x,
            ry = layout.repeat_y,
            sw = layout.stroke_width,
            content = pattern.content,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{HEX_POINTY, SQUARE};

    #[test]
    fn zero_offsets_print_as_zero_percent() {
        let options = GridOptions {
            pattern_id: HEX_POINTY.id.to_string(),
            ..GridOptions::default()
        };
        let catalog = PatternCatalog::default();
        let (scene, _) = build_scene(&options, ContainerSize::new(800, 600), &catalog);
        let markup = scene.to_markup(STROKE_COLOR_DEFAULT);
        assert!(markup.contains("x='0%' y='0%'"), "{markup}");
        assert!(markup.contains("stroke-width='1'"), "{markup}");
    }

    #[test]
    fn square_markup_is_one_svg_document() {
        let options = GridOptions {
            pattern_id: SQUARE.id.to_string(),
            ..GridOptions::default()
        };
        let (scene, _) = build_scene(&options, ContainerSize::new(200, 100), &PatternCatalog::default());
        assert_eq!(
            scene.to_markup("red"),
            "<svg width='200' height='100' viewBox='0 0 200 100' style='width: 100%; height: 100%' xmlns='http://www.w3.org/2000/svg'>\
             <defs><pattern id='grid-pattern' viewBox='0 0 100 100' x='0%' y='0%' width='50%' height='100%'>\
             <g stroke='red' fill='none' stroke-width='1'><path d='M 0 0 L 100 0 M 0 0 L 0 100'/></g>\
             </pattern></defs><rect fill='url(#grid-pattern)' width='200' height='100'/></svg>"
        );
    }

    #[test]
    fn empty_scene_has_no_markup() {
        assert_eq!(GridScene::Empty.to_markup(STROKE_COLOR_DEFAULT), "");
    }

    #[test]
    fn zero_sized_container_draws_nothing() {
        let options = GridOptions {
            pattern_id: HEX_POINTY.id.to_string(),
            ..GridOptions::default()
        };
        let size = ContainerSize::new(0, 600);
        let (scene, outcome) = build_scene(&options, size, &PatternCatalog::default());
        assert_eq!(scene, GridScene::Empty);
        assert_eq!(outcome, RenderOutcome::InvalidGeometry { scale: 1.0, size });
    }
}
