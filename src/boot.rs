use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use tessera_core::{GridController, PatternCatalog, PollStep, ReadinessError, ReadinessPoller};

use crate::config::OverlayConfig;
use crate::controls::{self, SharedController};
use crate::host::{self, HostAnchors};
use crate::local_store::LocalStorageStore;

/// Polls the host page until both anchors exist, then attaches once.
///
/// The loop waits one interval before the first check and ends on the first
/// terminal step.
pub fn start(config: OverlayConfig) {
    spawn_local(async move {
        let mut poller = ReadinessPoller::new(config.poll_interval_ms);
        loop {
            TimeoutFuture::new(poller.interval_ms()).await;
            let step = poller.poll(
                || host::find_required_elements(&config),
                |anchors| attach(&config, anchors).map(|_| ()),
            );
            match step {
                PollStep::Retry { attempt, missing } => {
                    console::debug!("tessera: host not ready", attempt, missing);
                }
                PollStep::Ready { attempt } => {
                    console::log!("tessera: grid overlay attached", attempt);
                    break;
                }
                PollStep::Failed { reason } => {
                    console::error!("tessera: init failed:", reason);
                    break;
                }
                PollStep::Finished => break,
            }
        }
    });
}

/// Ready-state setup: overlay, option restore with first render, controls.
pub fn attach(
    config: &OverlayConfig,
    anchors: HostAnchors,
) -> Result<SharedController, ReadinessError> {
    let (surface, size) = host::create_overlay(&anchors.document, &anchors.canvas)?;
    let store = LocalStorageStore::from_window();
    if !store.is_available() {
        console::warn!("tessera: local storage unavailable, options will not persist");
    }
    let controller = GridController::new(store, surface, size, PatternCatalog::default())
        .with_storage_key(config.storage_key.as_str())
        .with_stroke_color(config.stroke_color.as_str());
    let controller = Rc::new(RefCell::new(controller));

    let report = controller.borrow_mut().restore();
    if let Some(stale) = report.dropped_pattern.as_ref() {
        console::warn!("tessera: stored pattern no longer exists", stale.clone());
    }
    controls::log_update("restore", &report.update);

    controls::build_controls(&anchors.document, &anchors.controls_anchor, &controller)?;
    Ok(controller)
}
