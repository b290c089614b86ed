//! Shared UI constants such as colors, timeline metrics, and scripts.

pub const BG_DEEPEST: &str = "#09090b";
pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";
pub const BG_HOVER: &str = "#262626";

pub const BORDER_SUBTLE: &str = "#1f1f1f";
pub const BORDER_DEFAULT: &str = "#27272a";
pub const BORDER_STRONG: &str = "#3f3f46";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT_HIGHLIGHT: &str = "#d4a24c";

// Year domain mapped onto the world x axis.
pub const TIMELINE_MIN_YEAR: i32 = -4000;
pub const TIMELINE_MAX_YEAR: i32 = 2100;
pub const TIMELINE_BASE_WIDTH: f64 = 4000.0;

// Row layout, in world units.
pub const ROW_HEIGHT: f64 = 120.0;
pub const ROW_BASE_OFFSET: f64 = 200.0;
pub const ROW_PADDING: f64 = 40.0;
pub const MAX_ROW_SCAN: usize = 50;
pub const NODE_MIN_WIDTH: f64 = 180.0;
pub const NODE_HEIGHT: f64 = 50.0;
pub const NODE_CORNER_RADIUS: f64 = 8.0;
pub const LAYOUT_EXTENT_MARGIN: f64 = 100.0;

// Viewport.
pub const MIN_SCALE: f64 = 0.3;
pub const MAX_SCALE: f64 = 3.0;
pub const WHEEL_ZOOM_FACTOR: f64 = 1.1;
pub const BUTTON_ZOOM_FACTOR: f64 = 1.3;
pub const RESET_MARGIN_X: f64 = 100.0;

// Scene styling.
pub const ERA_BAND_HEIGHT: f64 = 3000.0;
pub const ERA_BAND_OPACITY: f32 = 0.05;
pub const ERA_LABEL_INSET: f64 = 10.0;
pub const ERA_LABEL_BASELINE: f64 = 30.0;
pub const ERA_LABEL_SIZE: f64 = 11.0;
pub const CONNECTOR_OPACITY: f32 = 0.3;
pub const CONNECTOR_WIDTH: f64 = 2.0;
pub const NODE_IDLE_OPACITY: f32 = 0.85;
pub const SELECTED_OUTLINE_WIDTH: f64 = 3.0;
pub const HOVERED_OUTLINE_WIDTH: f64 = 2.0;
pub const NODE_TITLE_SIZE: f64 = 14.0;
pub const NODE_DATE_SIZE: f64 = 10.0;
pub const NODE_DATE_OFFSET: f64 = 15.0;
pub const NODE_LABEL_INSET: f64 = 5.0;
pub const NODE_DATE_OPACITY: f32 = 0.8;

pub const TIMELINE_CANVAS_ID: &str = "timeline-canvas";
pub const TIMELINE_HOST_ID: &str = "timeline-canvas-host";
pub const FRAME_ASSET_ROUTE: &str = "timeline-frame";
/// Minimum spacing between painted frames; input in between is coalesced.
pub const FRAME_INTERVAL_MS: u64 = 16;

pub const HEADER_HEIGHT: f64 = 64.0;
pub const DETAIL_PANEL_WIDTH: f64 = 380.0;

pub const TIMELINE_CANVAS_SCRIPT: &str = r#"
let canvas = null;
let ctx = null;

function getCanvas() {
    if (!canvas || !document.body.contains(canvas)) {
        canvas = document.getElementById("timeline-canvas");
        ctx = canvas ? canvas.getContext("2d") : null;
    }
    return { canvas, ctx };
}

while (true) {
    const msg = await dioxus.recv();
    if (!msg) {
        continue;
    }
    if (msg.kind === "clear") {
        const state = getCanvas();
        if (state.ctx && state.canvas) {
            state.ctx.clearRect(0, 0, state.canvas.width, state.canvas.height);
        }
        continue;
    }
    if (msg.kind !== "frame") {
        continue;
    }

    const version = msg.version;
    const width = msg.width;
    const height = msg.height;

    const state = getCanvas();
    if (!state.ctx || !state.canvas) {
        continue;
    }

    if (state.canvas.width !== width || state.canvas.height !== height) {
        state.canvas.width = width;
        state.canvas.height = height;
    }

    try {
        const response = await fetch("/timeline-frame/" + version);
        if (!response.ok) {
            continue;
        }
        const buffer = await response.arrayBuffer();
        if (buffer.byteLength !== width * height * 4) {
            continue;
        }
        const imageData = new ImageData(new Uint8ClampedArray(buffer), width, height);
        state.ctx.putImageData(imageData, 0, 0);
    } catch (_) {
        // Ignore transient fetch errors; the next frame supersedes this one.
    }
}
"#;

pub const TIMELINE_VIEWPORT_SCRIPT: &str = r#"
const hostId = "timeline-canvas-host";
let last = null;

function sendSize() {
    const host = document.getElementById(hostId);
    if (!host) {
        return;
    }
    const next = { width: host.clientWidth || 0, height: host.clientHeight || 0 };
    if (last &&
        Math.abs(last.width - next.width) < 0.5 &&
        Math.abs(last.height - next.height) < 0.5) {
        return;
    }
    last = next;
    dioxus.send(next);
}

function attach() {
    const host = document.getElementById(hostId);
    if (!host) {
        setTimeout(attach, 100);
        return;
    }
    const observer = new ResizeObserver(() => sendSize());
    observer.observe(host);
    window.addEventListener("resize", sendSize, { passive: true });
    sendSize();
}

attach();
await new Promise(() => {});
"#;
