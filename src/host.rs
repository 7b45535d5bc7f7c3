use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use tessera_core::{ContainerSize, OverlaySurface, ReadinessError};

use crate::config::OverlayConfig;
use crate::local_store::js_err;

/// The two host elements the overlay hangs off.
#[derive(Clone, Debug)]
pub struct HostAnchors {
    pub document: Document,
    pub controls_anchor: Element,
    pub canvas: HtmlElement,
}

/// Looks up both anchors. Every failure here means "try again later".
pub fn find_required_elements(config: &OverlayConfig) -> Result<HostAnchors, ReadinessError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ReadinessError::not_ready("document"))?;
    let controls_anchor = attached_element(&document, &config.controls_anchor_id)?;
    let canvas = attached_element(&document, &config.canvas_anchor_id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| ReadinessError::not_ready(config.canvas_anchor_id.as_str()))?;
    Ok(HostAnchors {
        document,
        controls_anchor,
        canvas,
    })
}

fn attached_element(document: &Document, id: &str) -> Result<Element, ReadinessError> {
    document
        .get_element_by_id(id)
        .filter(|element| element.parent_element().is_some())
        .ok_or_else(|| ReadinessError::not_ready(id))
}

/// The `<div>` the grid scene is written into.
#[derive(Clone, Debug)]
pub struct OverlayElement {
    element: HtmlElement,
}

impl OverlayElement {
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl OverlaySurface for OverlayElement {
    fn replace_content(&self, markup: &str) {
        self.element.set_inner_html(markup);
    }
}

/// Appends a pointer-transparent overlay to `canvas`, sized to its current
/// client box. The size is measured once and never updated.
pub fn create_overlay(
    document: &Document,
    canvas: &HtmlElement,
) -> Result<(OverlayElement, ContainerSize), ReadinessError> {
    let size = ContainerSize::new(
        client_dimension(canvas.client_width()),
        client_dimension(canvas.client_height()),
    );
    let element = document
        .create_element("div")
        .map_err(setup_err)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| ReadinessError::fatal("overlay is not an html element"))?;
    let style = element.style();
    for (name, value) in [
        ("pointer-events", "none".to_string()),
        ("position", "absolute".to_string()),
        ("width", format!("{}px", size.width)),
        ("height", format!("{}px", size.height)),
    ] {
        style.set_property(name, &value).map_err(setup_err)?;
    }
    canvas.append_child(&element).map_err(setup_err)?;
    Ok((OverlayElement { element }, size))
}

fn client_dimension(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

pub(crate) fn setup_err(error: wasm_bindgen::JsValue) -> ReadinessError {
    ReadinessError::fatal(js_err(error))
}
