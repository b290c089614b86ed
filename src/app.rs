use std::sync::Arc;

use dioxus::prelude::*;

use crate::components::{DetailPanel, TitleBar};
use crate::constants::*;
use crate::core::interaction::TimelineView;
use crate::hotkeys::{handle_hotkey, HotkeyAction, HotkeyContext, HotkeyResult};
use crate::state::{Civilization, Dataset, TimelineSettings};
use crate::timeline::{TimelineCanvas, ZoomControls};
use crate::utils::current_year;

/// Loaded before launch and handed to the root component as context.
#[derive(Clone)]
pub struct AppStartup {
    pub dataset: Dataset,
    pub settings: TimelineSettings,
}

/// Main application component
#[component]
pub fn App() -> Element {
    let startup = use_context::<AppStartup>();
    let font_settings = startup.settings.fonts.clone();
    let civilization_count = startup.dataset.civilizations.len();
    let era_count = startup.dataset.eras.len();

    let mut view = use_signal(|| TimelineView::new(&startup.dataset, &startup.settings));
    // Bumped whenever the canvas needs a new frame.
    let mut revision = use_signal(|| 0_u64);
    let mut selected = use_signal(|| None::<Arc<Civilization>>);
    let year = use_hook(current_year);

    // The view mirrors the selection for highlighting; this component owns it.
    use_effect(move || {
        let id = selected().map(|civ| civ.id.clone());
        if view.write().set_selection(id) {
            revision += 1;
        }
    });

    let mut zoom_in = move || {
        if view.write().zoom_in() {
            revision += 1;
        }
    };
    let mut zoom_out = move || {
        if view.write().zoom_out() {
            revision += 1;
        }
    };
    let mut reset_view = move || {
        if view.write().reset_view() {
            revision += 1;
        }
    };

    let scale = view.read().viewport().scale();

    rsx! {
        style {
            r#"
            *, *::before, *::after {{ box-sizing: border-box; }}
            html, body {{ margin: 0; padding: 0; overflow: hidden; background-color: {BG_BASE}; }}
            body {{ -webkit-font-smoothing: antialiased; font-family: system-ui, -apple-system, 'Segoe UI', sans-serif; }}
            ::-webkit-scrollbar {{ width: 6px; height: 6px; }}
            ::-webkit-scrollbar-track {{ background: transparent; }}
            ::-webkit-scrollbar-thumb {{ background: {BORDER_DEFAULT}; border-radius: 3px; }}
            ::-webkit-scrollbar-thumb:hover {{ background: {BORDER_STRONG}; }}
            .collapse-btn {{ opacity: 0.8; transition: opacity 0.15s ease, background-color 0.15s ease; }}
            .collapse-btn:hover {{ opacity: 1; background-color: {BG_HOVER} !important; }}
            "#
        }
        div {
            style: "display: flex; flex-direction: column; width: 100vw; height: 100vh; background-color: {BG_DEEPEST}; color: {TEXT_PRIMARY}; outline: none;",
            tabindex: "0",
            autofocus: true,
            onkeydown: move |e: KeyboardEvent| {
                let hotkey_context = HotkeyContext {
                    has_selection: selected.read().is_some(),
                    // The window has no text inputs.
                    input_focused: false,
                };
                let modifiers = e.modifiers();
                match handle_hotkey(
                    &e.key(),
                    modifiers.shift(),
                    modifiers.ctrl(),
                    modifiers.alt(),
                    modifiers.meta(),
                    &hotkey_context,
                ) {
                    HotkeyResult::Action(action) => {
                        e.prevent_default();
                        tracing::debug!(?action, "hotkey");
                        match action {
                            HotkeyAction::ZoomIn => zoom_in(),
                            HotkeyAction::ZoomOut => zoom_out(),
                            HotkeyAction::ResetView => reset_view(),
                            HotkeyAction::ClearSelection => selected.set(None),
                        }
                    }
                    HotkeyResult::NoMatch | HotkeyResult::Suppressed => {}
                }
            },

            TitleBar { civilization_count, era_count }

            div {
                style: "position: relative; flex: 1; min-height: 0; display: flex;",
                TimelineCanvas {
                    view,
                    revision,
                    font_settings,
                    on_select: move |civ: Arc<Civilization>| {
                        tracing::info!(id = %civ.id, "civilization selected");
                        selected.set(Some(civ));
                    },
                }
                ZoomControls {
                    scale,
                    on_zoom_in: move |_| zoom_in(),
                    on_zoom_out: move |_| zoom_out(),
                    on_reset: move |_| reset_view(),
                }
                if let Some(civ) = selected() {
                    DetailPanel {
                        key: "{civ.id}",
                        civilization: civ,
                        current_year: year,
                        on_close: move |_| selected.set(None),
                    }
                }
            }
        }
    }
}
