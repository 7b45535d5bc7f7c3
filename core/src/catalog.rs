/// One repeatable tile of grid line-art.
///
/// `content` is an SVG fragment already expressed in the tile's own box
/// `[0, width] x [0, height]`; the scene builder only cares about the box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatternDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub width: f64,
    pub height: f64,
    pub content: &'static str,
}

pub const NONE_PATTERN_ID: &str = "none";
pub const NONE_PATTERN_LABEL: &str = "None";

pub const HEX_POINTY: PatternDefinition = PatternDefinition {
    id: "hex-pointy",
    label: "Hex (pointy top)",
    width: 387.113671,
    height: 670.5,
    content: "<path d='M 193.556671 223.5 L 387.113671 335.25 L 387.113671 558.75 L 193.556671 670.5 L 0 558.75 M 193.556671 223.5 L 0 335.25 M 193.556671 223.5 L 193.556671 0'/>",
};

// Pointy tile mirrored across its diagonal.
pub const HEX_FLAT: PatternDefinition = PatternDefinition {
    id: "hex-flat",
    label: "Hex (flat top)",
    width: 670.5,
    height: 387.113671,
    content: "<path d='M 223.5 193.556671 L 335.25 387.113671 L 558.75 387.113671 L 670.5 193.556671 L 558.75 0 M 223.5 193.556671 L 335.25 0 M 223.5 193.556671 L 0 193.556671'/>",
};

pub const SQUARE: PatternDefinition = PatternDefinition {
    id: "square",
    label: "Square",
    width: 100.0,
    height: 100.0,
    content: "<path d='M 0 0 L 100 0 M 0 0 L 0 100'/>",
};

pub const PATTERN_CATALOG: &[PatternDefinition] = &[HEX_POINTY, HEX_FLAT, SQUARE];

/// Read-only lookup over a static table of tiles.
#[derive(Clone, Copy, Debug)]
pub struct PatternCatalog {
    entries: &'static [PatternDefinition],
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::new(PATTERN_CATALOG)
    }
}

impl PatternCatalog {
    pub const fn new(entries: &'static [PatternDefinition]) -> Self {
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&'static PatternDefinition> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// `true` for `"none"` and every catalog key.
    pub fn resolves(&self, id: &str) -> bool {
        id == NONE_PATTERN_ID || self.contains(id)
    }

    /// Selector `(value, label)` pairs: `"none"` followed by every entry in
    /// declaration order.
    pub fn choices(&self) -> Vec<(&'static str, &'static str)> {
        std::iter::once((NONE_PATTERN_ID, NONE_PATTERN_LABEL))
            .chain(self.entries.iter().map(|entry| (entry.id, entry.label)))
            .collect()
    }
}
