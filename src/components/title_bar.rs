use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn TitleBar(civilization_count: usize, era_count: usize) -> Element {
    rsx! {
        div {
            style: "
                display: flex; align-items: center; justify-content: space-between;
                height: {HEADER_HEIGHT}px; padding: 0 24px; flex-shrink: 0;
                background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                user-select: none;
            ",
            div {
                style: "display: flex; flex-direction: column; gap: 2px;",
                span { style: "font-size: 20px; font-weight: 700; color: {TEXT_PRIMARY};", "Cultural Timeline" }
                span {
                    style: "font-size: 12px; color: {TEXT_MUTED};",
                    "Journey through the evolution and branching of civilizations across history"
                }
            }
            span {
                style: "font-size: 11px; color: {TEXT_DIM}; font-family: 'SF Mono', Consolas, monospace;",
                "{civilization_count} civilizations · {era_count} eras"
            }
        }
    }
}
