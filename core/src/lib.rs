pub mod catalog;
pub mod controller;
pub mod grid;
pub mod options;
pub mod readiness;

pub use catalog::{PatternCatalog, PatternDefinition, NONE_PATTERN_ID, NONE_PATTERN_LABEL, PATTERN_CATALOG};
pub use controller::{GridController, OverlaySurface, RestoreReport, UpdateReport};
pub use grid::{build_scene, tile_layout, ContainerSize, GridScene, RenderOutcome, TileLayout};
pub use options::{
    GridOptions, MemoryStore, OptionChange, OptionStore, OptionsError, OPTIONS_STORAGE_KEY,
};
pub use readiness::{PollStep, ReadinessError, ReadinessPoller, ReadinessState};
