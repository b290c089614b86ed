use std::sync::Arc;

use dioxus::prelude::*;

use crate::constants::*;
use crate::state::{format_end_year, format_year, Civilization};
use crate::utils::format_thousands;

/// Floating card describing the selected civilization.
#[component]
pub fn DetailPanel(
    civilization: Arc<Civilization>,
    current_year: i32,
    on_close: EventHandler<MouseEvent>,
) -> Element {
    let civ = civilization;
    let start = format_year(civ.start_year);
    let end = format_end_year(civ.end_year);
    let duration = format_thousands(civ.duration_years(current_year) as i64);
    let accent = civ.color.to_css(1.0);
    let tint = civ.color.to_css(0.1);

    rsx! {
        div {
            style: "
                position: absolute; top: 24px; right: 24px; z-index: 50;
                width: {DETAIL_PANEL_WIDTH}px; max-height: calc(100% - 48px);
                display: flex; flex-direction: column;
                background-color: {BG_ELEVATED}; border: 1px solid {BORDER_DEFAULT};
                border-radius: 10px; box-shadow: 0 20px 48px rgba(0, 0, 0, 0.55);
                color: {TEXT_PRIMARY};
            ",
            // Header
            div {
                style: "display: flex; align-items: flex-start; justify-content: space-between; gap: 12px; padding: 20px 20px 0 20px;",
                div {
                    style: "flex: 1; min-width: 0;",
                    h2 { style: "margin: 0 0 8px 0; font-size: 22px; font-weight: 600;", "{civ.name}" }
                    span {
                        style: "display: inline-block; padding: 2px 8px; border: 1px solid {BORDER_STRONG}; border-radius: 999px; font-size: 11px; color: {TEXT_SECONDARY};",
                        "{civ.region}"
                    }
                }
                button {
                    class: "collapse-btn",
                    title: "Close",
                    style: "
                        flex-shrink: 0; width: 28px; height: 28px; border: none; border-radius: 4px;
                        background: transparent; color: {TEXT_MUTED}; font-size: 16px; cursor: pointer;
                    ",
                    onclick: move |e| on_close.call(e),
                    "✕"
                }
            }
            div {
                style: "display: flex; gap: 8px; align-items: center; padding: 16px 20px; font-size: 13px; color: {TEXT_MUTED}; border-bottom: 1px solid {BORDER_SUBTLE};",
                span { "{start}" }
                span { "→" }
                span { "{end}" }
                span { style: "margin-left: auto; font-weight: 500; color: {TEXT_SECONDARY};", "{duration} years" }
            }
            // Body
            div {
                style: "flex: 1; min-height: 0; overflow-y: auto; padding: 16px 20px 20px 20px; display: flex; flex-direction: column; gap: 16px;",
                div {
                    SectionTitle { label: "Overview" }
                    p { style: "margin: 0; font-size: 13px; line-height: 1.6; color: {TEXT_SECONDARY};", "{civ.description}" }
                }
                if !civ.cultural_highlights.is_empty() {
                    div {
                        style: "padding-top: 16px; border-top: 1px solid {BORDER_SUBTLE};",
                        SectionTitle { label: "Cultural Highlights" }
                        ul {
                            style: "margin: 0; padding: 0; list-style: none; display: flex; flex-direction: column; gap: 8px;",
                            for (index, highlight) in civ.cultural_highlights.iter().enumerate() {
                                li {
                                    key: "{index}",
                                    style: "display: flex; gap: 8px; font-size: 13px; line-height: 1.5;",
                                    span { style: "color: {ACCENT_HIGHLIGHT}; flex-shrink: 0;", "•" }
                                    span { "{highlight}" }
                                }
                            }
                        }
                    }
                }
                div {
                    style: "padding: 14px 16px; border-radius: 8px; background-color: {tint}; border-left: 4px solid {accent};",
                    p {
                        style: "margin: 0; font-size: 11px; font-style: italic; line-height: 1.5; color: {TEXT_MUTED};",
                        "The cultural legacy of {civ.name} continues to influence modern {civ.region} and beyond, shaping art, philosophy, governance, and daily life across generations."
                    }
                }
            }
        }
    }
}

#[component]
fn SectionTitle(label: &'static str) -> Element {
    rsx! {
        h3 {
            style: "margin: 0 0 8px 0; font-size: 11px; font-weight: 600; letter-spacing: 0.06em; text-transform: uppercase; color: {TEXT_MUTED};",
            "{label}"
        }
    }
}
