use std::sync::Arc;
use std::time::{Duration, Instant};

use dioxus::desktop::use_asset_handler;
use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BG_BASE, FRAME_ASSET_ROUTE, FRAME_INTERVAL_MS, TIMELINE_CANVAS_ID, TIMELINE_CANVAS_SCRIPT,
    TIMELINE_HOST_ID, TIMELINE_VIEWPORT_SCRIPT,
};
use crate::core::coords::Point;
use crate::core::fonts::{FontSettings, LabelFonts};
use crate::core::frame_store::{frame_for, publish_frame};
use crate::core::interaction::{InputResponse, TimelineView};
use crate::core::raster::paint_scene;
use crate::state::Civilization;
use crate::utils::elapsed_ms;

#[derive(Clone, Copy, Debug, PartialEq)]
struct FrameInfo {
    version: u64,
    width: u32,
    height: u32,
}

#[derive(Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum CanvasMessage {
    Frame { version: u64, width: u32, height: u32 },
    Clear,
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct HostSize {
    width: f64,
    height: f64,
}

/// The painted timeline: owns input handling and the frame pipeline.
///
/// `revision` is bumped whenever `view` changes in a way that needs a new
/// frame. Frames are painted off the UI thread at most once per interval,
/// so bursts of pointer moves collapse into one paint.
#[component]
pub fn TimelineCanvas(
    view: Signal<TimelineView>,
    revision: Signal<u64>,
    font_settings: FontSettings,
    on_select: EventHandler<Arc<Civilization>>,
) -> Element {
    let mut view = view;
    let mut revision = revision;
    let fonts = use_hook(|| LabelFonts::discover(&font_settings).map(Arc::new));
    let mut canvas_eval = use_signal(|| None::<document::Eval>);
    let mut viewport_eval = use_signal(|| None::<document::Eval>);
    let mut frame = use_signal(|| None::<FrameInfo>);

    use_asset_handler(FRAME_ASSET_ROUTE, move |request, responder| {
        let version = request
            .uri()
            .path()
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse::<u64>().ok());
        let mut response = match frame_for(version) {
            Some(bytes) => http::Response::new(bytes),
            None => {
                let mut missing = http::Response::new(Vec::new());
                *missing.status_mut() = http::StatusCode::NOT_FOUND;
                missing
            }
        };
        response.headers_mut().insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/octet-stream"),
        );
        response.headers_mut().insert(
            http::header::CACHE_CONTROL,
            http::HeaderValue::from_static("no-store"),
        );
        responder.respond(response);
    });

    use_effect(move || {
        if canvas_eval().is_some() {
            return;
        }
        canvas_eval.set(Some(document::eval(TIMELINE_CANVAS_SCRIPT)));
    });

    use_effect(move || {
        if viewport_eval().is_some() {
            return;
        }
        viewport_eval.set(Some(document::eval(TIMELINE_VIEWPORT_SCRIPT)));
    });

    use_effect(move || {
        let frame = frame();
        let Some(eval) = canvas_eval() else {
            return;
        };
        let _ = match frame {
            Some(frame) => eval.send(CanvasMessage::Frame {
                version: frame.version,
                width: frame.width,
                height: frame.height,
            }),
            None => eval.send(CanvasMessage::Clear),
        };
    });

    // Host size reports from the ResizeObserver script.
    use_future(move || async move {
        loop {
            let Some(mut eval) = viewport_eval() else {
                tokio::time::sleep(Duration::from_millis(100)).await;
                continue;
            };
            while let Ok(size) = eval.recv::<HostSize>().await {
                if view.write().resize(size.width, size.height) {
                    revision += 1;
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    });

    // Paint loop.
    use_future(move || {
        let fonts = fonts.clone();
        async move {
            let mut painted = None::<u64>;
            loop {
                tokio::time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)).await;
                let wanted = *revision.peek();
                if painted == Some(wanted) {
                    continue;
                }
                painted = Some(wanted);

                let Some(scene) = view.peek().scene() else {
                    if frame.peek().is_some() {
                        frame.set(None);
                    }
                    continue;
                };
                let fonts = fonts.clone();
                let started = Instant::now();
                let painted_frame = tokio::task::spawn_blocking(move || {
                    let image = paint_scene(&scene, fonts.as_deref());
                    let (width, height) = image.dimensions();
                    publish_frame(width, height, image.into_raw())
                        .map(|version| FrameInfo { version, width, height })
                })
                .await;
                match painted_frame {
                    Ok(Some(info)) => {
                        tracing::trace!(
                            version = info.version,
                            ms = elapsed_ms(started),
                            "timeline frame painted"
                        );
                        frame.set(Some(info));
                    }
                    Ok(None) => {}
                    Err(err) => tracing::warn!("timeline paint task failed: {err}"),
                }
            }
        }
    });

    let cursor = view.read().cursor().as_css();

    rsx! {
        div {
            id: TIMELINE_HOST_ID,
            style: "position: relative; flex: 1; min-height: 0; overflow: hidden; background-color: {BG_BASE};",
            canvas {
                id: TIMELINE_CANVAS_ID,
                style: "display: block; width: 100%; height: 100%; cursor: {cursor};",
                oncontextmenu: move |e| e.prevent_default(),
                onmousedown: move |e: MouseEvent| {
                    let primary = e
                        .trigger_button()
                        .is_some_and(|btn| format!("{:?}", btn) == "Primary");
                    if !primary {
                        return;
                    }
                    e.prevent_default();
                    let p = e.element_coordinates();
                    let response = view.write().pointer_down(Point::new(p.x, p.y));
                    apply(response, revision, on_select);
                },
                onmousemove: move |e: MouseEvent| {
                    let p = e.element_coordinates();
                    let response = view.write().pointer_move(Point::new(p.x, p.y));
                    apply(response, revision, on_select);
                },
                onmouseup: move |_| {
                    let response = view.write().pointer_up();
                    apply(response, revision, on_select);
                },
                onmouseleave: move |_| {
                    let response = view.write().pointer_leave();
                    apply(response, revision, on_select);
                },
                onwheel: move |e: WheelEvent| {
                    e.prevent_default();
                    let p = e.element_coordinates();
                    let delta_y = e.delta().strip_units().y;
                    let response = view.write().wheel(Point::new(p.x, p.y), delta_y);
                    apply(response, revision, on_select);
                },
            }
        }
    }
}

fn apply(response: InputResponse, mut revision: Signal<u64>, on_select: EventHandler<Arc<Civilization>>) {
    if response.redraw {
        revision += 1;
    }
    if let Some(civ) = response.selected {
        on_select.call(civ);
    }
}
