use dioxus::prelude::*;

use crate::constants::{BG_ELEVATED, BORDER_DEFAULT, TEXT_DIM, TEXT_SECONDARY};

/// Floating zoom buttons in the bottom-right corner of the canvas.
#[component]
pub fn ZoomControls(
    scale: f64,
    on_zoom_in: EventHandler<MouseEvent>,
    on_zoom_out: EventHandler<MouseEvent>,
    on_reset: EventHandler<MouseEvent>,
) -> Element {
    let percent = (scale * 100.0).round();
    rsx! {
        div {
            style: "position: absolute; right: 24px; bottom: 24px; z-index: 10; display: flex; flex-direction: column; align-items: center; gap: 8px;",
            ZoomBtn { icon: "+", title: "Zoom In", on_click: on_zoom_in }
            ZoomBtn { icon: "−", title: "Zoom Out", on_click: on_zoom_out }
            ZoomBtn { icon: "⤢", title: "Reset View", on_click: on_reset }
            span {
                style: "font-size: 10px; color: {TEXT_DIM}; font-family: 'SF Mono', Consolas, monospace; user-select: none;",
                "{percent}%"
            }
        }
    }
}

#[component]
fn ZoomBtn(icon: &'static str, title: &'static str, on_click: EventHandler<MouseEvent>) -> Element {
    rsx! {
        button {
            class: "collapse-btn",
            title: "{title}",
            style: "width: 36px; height: 36px; border: 1px solid {BORDER_DEFAULT}; border-radius: 6px; background-color: {BG_ELEVATED}; color: {TEXT_SECONDARY}; font-size: 16px; cursor: pointer; display: flex; align-items: center; justify-content: center; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.4); transition: all 0.12s ease;",
            onclick: move |e| on_click.call(e),
            "{icon}"
        }
    }
}
