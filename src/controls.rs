use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlOptionElement, HtmlSelectElement, Node};

use tessera_core::{
    GridController, GridOptions, OptionChange, ReadinessError, RenderOutcome, UpdateReport,
};

use crate::host::{setup_err, OverlayElement};
use crate::local_store::LocalStorageStore;

pub type SharedController = Rc<RefCell<GridController<LocalStorageStore, OverlayElement>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RangeField {
    Scale,
    OffsetX,
    OffsetY,
}

const RANGE_FIELDS: [RangeField; 3] = [RangeField::Scale, RangeField::OffsetX, RangeField::OffsetY];

impl RangeField {
    fn key(self) -> &'static str {
        self.change(0.0).key()
    }

    /// `(min, max, step)` as the input attributes expect them.
    fn bounds(self) -> (&'static str, &'static str, &'static str) {
        match self {
            RangeField::Scale => ("0.01", "2", "0.001"),
            RangeField::OffsetX | RangeField::OffsetY => ("0", "1", "0.01"),
        }
    }

    fn current(self, options: &GridOptions) -> f64 {
        match self {
            RangeField::Scale => options.scale,
            RangeField::OffsetX => options.offset_x,
            RangeField::OffsetY => options.offset_y,
        }
    }

    fn change(self, value: f64) -> OptionChange {
        match self {
            RangeField::Scale => OptionChange::Scale(value),
            RangeField::OffsetX => OptionChange::OffsetX(value),
            RangeField::OffsetY => OptionChange::OffsetY(value),
        }
    }
}

/// Inserts the pattern selector and the three sliders right before `anchor`,
/// showing the controller's current values.
pub fn build_controls(
    document: &Document,
    anchor: &Element,
    controller: &SharedController,
) -> Result<(), ReadinessError> {
    let parent = anchor
        .parent_node()
        .ok_or_else(|| ReadinessError::fatal("controls anchor lost its parent"))?;
    let select = build_pattern_select(document, controller)?;
    insert_before(&parent, &select, anchor)?;
    for field in RANGE_FIELDS {
        let input = build_range_input(document, field, controller)?;
        insert_before(&parent, &input, anchor)?;
    }
    Ok(())
}

fn insert_before(parent: &Node, node: &Node, anchor: &Element) -> Result<(), ReadinessError> {
    parent.insert_before(node, Some(anchor)).map_err(setup_err)?;
    Ok(())
}

fn build_pattern_select(
    document: &Document,
    controller: &SharedController,
) -> Result<HtmlSelectElement, ReadinessError> {
    let select = document
        .create_element("select")
        .map_err(setup_err)?
        .dyn_into::<HtmlSelectElement>()
        .map_err(|_| ReadinessError::fatal("select has unexpected type"))?;
    let (choices, current) = {
        let controller = controller.borrow();
        (controller.catalog().choices(), controller.options().pattern_id.clone())
    };
    for (id, label) in choices {
        let option = document
            .create_element("option")
            .map_err(setup_err)?
            .dyn_into::<HtmlOptionElement>()
            .map_err(|_| ReadinessError::fatal("option has unexpected type"))?;
        option.set_value(id);
        option.set_text(label);
        select.append_child(&option).map_err(setup_err)?;
    }
    select.set_value(&current);
    select.set_title(OptionChange::Pattern(String::new()).key());

    let controller = controller.clone();
    let select_for_cb = select.clone();
    EventListener::new(&select, "change", move |_event| {
        apply_change(&controller, OptionChange::Pattern(select_for_cb.value()));
    })
    .forget();
    Ok(select)
}

fn build_range_input(
    document: &Document,
    field: RangeField,
    controller: &SharedController,
) -> Result<HtmlInputElement, ReadinessError> {
    let input = document
        .create_element("input")
        .map_err(setup_err)?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| ReadinessError::fatal("input has unexpected type"))?;
    let (min, max, step) = field.bounds();
    input.set_type("range");
    input.set_min(min);
    input.set_max(max);
    input.set_step(step);
    input.set_value(&field.current(controller.borrow().options()).to_string());
    input.set_title(field.key());

    let controller = controller.clone();
    let input_for_cb = input.clone();
    EventListener::new(&input, "change", move |_event| {
        let raw = input_for_cb.value();
        match raw.trim().parse::<f64>() {
            Ok(value) => apply_change(&controller, field.change(value)),
            Err(_) => {
                console::warn!("tessera: ignoring unparsable value", field.key(), raw);
            }
        }
    })
    .forget();
    Ok(input)
}

fn apply_change(controller: &SharedController, change: OptionChange) {
    let key = change.key();
    let report = controller.borrow_mut().set(change);
    log_update(key, &report);
}

pub(crate) fn log_update(context: &str, report: &UpdateReport) {
    if let Err(err) = &report.stored {
        console::warn!("tessera: options not saved", context, err.to_string());
    }
    match &report.render {
        RenderOutcome::Cleared | RenderOutcome::Drawn(_) => {}
        RenderOutcome::UnknownPattern(id) => {
            console::warn!("tessera: unknown pattern, overlay cleared", id.clone());
        }
        RenderOutcome::InvalidGeometry { scale, size } => {
            console::warn!(
                "tessera: cannot tile overlay",
                *scale,
                size.width,
                size.height
            );
        }
    }
}
