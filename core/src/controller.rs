use crate::catalog::{PatternCatalog, NONE_PATTERN_ID};
use crate::grid::{build_scene, ContainerSize, RenderOutcome, STROKE_COLOR_DEFAULT};
use crate::options::{GridOptions, OptionChange, OptionStore, OptionsError, OPTIONS_STORAGE_KEY};

/// Drawing surface the scene markup is written into.
pub trait OverlaySurface {
    /// Replaces the whole content; an empty string clears it.
    fn replace_content(&self, markup: &str);
}

/// Result of one store + render cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateReport {
    pub stored: Result<(), OptionsError>,
    pub render: RenderOutcome,
}

/// What `restore` found in storage.
#[derive(Clone, Debug, PartialEq)]
pub struct RestoreReport {
    pub restored_fields: usize,
    /// Persisted pattern id that no longer exists and was reset to `"none"`.
    pub dropped_pattern: Option<String>,
    pub update: UpdateReport,
}

/// Owns the option record and the memoized overlay box for one page.
pub struct GridController<S, V> {
    options: GridOptions,
    store: S,
    surface: V,
    size: ContainerSize,
    catalog: PatternCatalog,
    storage_key: String,
    stroke_color: String,
}

impl<S, V> GridController<S, V>
where
    S: OptionStore,
    V: OverlaySurface,
{
    pub fn new(store: S, surface: V, size: ContainerSize, catalog: PatternCatalog) -> Self {
        Self {
            options: GridOptions::default(),
            store,
            surface,
            size,
            catalog,
            storage_key: OPTIONS_STORAGE_KEY.to_string(),
            stroke_color: STROKE_COLOR_DEFAULT.to_string(),
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = color.into();
        self
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn store_ref(&self) -> &S {
        &self.store
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    /// Loads persisted options, drops a stale pattern id, then stores and
    /// renders once.
    pub fn restore(&mut self) -> RestoreReport {
        let restored_fields = self.options.load(&self.store, &self.storage_key);
        let dropped_pattern = if self.catalog.resolves(&self.options.pattern_id) {
            None
        } else {
            let stale = std::mem::replace(&mut self.options.pattern_id, NONE_PATTERN_ID.to_string());
            Some(stale)
        };
        RestoreReport {
            restored_fields,
            dropped_pattern,
            update: self.refresh(),
        }
    }

    pub fn set(&mut self, change: OptionChange) -> UpdateReport {
        self.options.apply(change);
        self.refresh()
    }

    /// Persists the current record and redraws the overlay.
    pub fn refresh(&mut self) -> UpdateReport {
        let stored = self.options.store(&self.store, &self.storage_key);
        let render = self.render();
        UpdateReport { stored, render }
    }

    pub fn render(&self) -> RenderOutcome {
        let (scene, outcome) = build_scene(&self.options, self.size, &self.catalog);
        self.surface.replace_content(&scene.to_markup(&self.stroke_color));
        outcome
    }
}
