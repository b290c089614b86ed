//! Scene building: turns the layout and view state into draw commands.
//!
//! Everything here is in world coordinates. The raster backend applies the
//! frame's single viewport transform while painting.

use image::Rgba;

use crate::constants::{
    CONNECTOR_OPACITY, CONNECTOR_WIDTH, ERA_BAND_HEIGHT, ERA_BAND_OPACITY, ERA_LABEL_BASELINE,
    ERA_LABEL_INSET, ERA_LABEL_SIZE, HOVERED_OUTLINE_WIDTH, NODE_DATE_OFFSET, NODE_DATE_OPACITY,
    NODE_DATE_SIZE, NODE_IDLE_OPACITY, NODE_LABEL_INSET, NODE_TITLE_SIZE, SELECTED_OUTLINE_WIDTH,
};
use crate::state::EraBackdrop;

use super::coords::{Point, Rect, YearScale};
use super::layout::{LayoutMetrics, LayoutNode, TimelineLayout};
use super::viewport::Viewport;

pub const ERA_LABEL_COLOR: Rgba<u8> = Rgba([99, 99, 99, 102]);
pub const LABEL_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const HIGHLIGHT_RGB: [u8; 3] = [0xd4, 0xa2, 0x4c];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Title,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Anchor is the left end of the baseline.
    Start,
    /// Anchor is the center of the text box.
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub color: Rgba<u8>,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Band {
        rect: Rect,
        fill: Rgba<u8>,
    },
    Connector {
        from: Point,
        ctrl_a: Point,
        ctrl_b: Point,
        to: Point,
        color: Rgba<u8>,
        width: f64,
    },
    Block {
        id: String,
        rect: Rect,
        radius: f64,
        fill: Rgba<u8>,
        outline: Option<Outline>,
    },
    Text {
        text: String,
        anchor: Point,
        align: TextAlign,
        size: f64,
        role: FontRole,
        color: Rgba<u8>,
        /// Text outside this rectangle is cut off.
        clip: Option<Rect>,
    },
}

/// One frame's worth of draw commands, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

/// Everything a frame depends on.
pub struct SceneInput<'a> {
    pub eras: &'a [EraBackdrop],
    pub layout: &'a TimelineLayout,
    pub year_scale: &'a YearScale,
    pub metrics: &'a LayoutMetrics,
    pub viewport: &'a Viewport,
    pub hovered: Option<&'a str>,
    pub selected: Option<&'a str>,
    /// Surface size in pixels
    pub width: f64,
    pub height: f64,
}

/// Builds the frame, or `None` when the surface has no area to paint.
pub fn build_scene(input: &SceneInput<'_>) -> Option<Scene> {
    if !(input.width >= 1.0 && input.height >= 1.0) {
        return None;
    }

    let mut commands = Vec::new();
    push_era_bands(&mut commands, input.eras, input.year_scale);
    push_connectors(&mut commands, input.layout);
    for node in input.layout.nodes() {
        push_block(&mut commands, node, input);
    }

    Some(Scene {
        width: input.width.round() as u32,
        height: input.height.round() as u32,
        viewport: *input.viewport,
        commands,
    })
}

fn push_era_bands(commands: &mut Vec<DrawCommand>, eras: &[EraBackdrop], scale: &YearScale) {
    for era in eras {
        let x = scale.year_to_x(era.start_year);
        let width = scale.year_to_x(era.end_year) - x;
        commands.push(DrawCommand::Band {
            rect: Rect::new(x, 0.0, width, ERA_BAND_HEIGHT),
            fill: era.color.to_rgba(ERA_BAND_OPACITY),
        });
        commands.push(DrawCommand::Text {
            text: era.name.clone(),
            anchor: Point::new(x + ERA_LABEL_INSET, ERA_LABEL_BASELINE),
            align: TextAlign::Start,
            size: ERA_LABEL_SIZE,
            role: FontRole::Body,
            color: ERA_LABEL_COLOR,
            clip: None,
        });
    }
}

fn push_connectors(commands: &mut Vec<DrawCommand>, layout: &TimelineLayout) {
    for node in layout.nodes() {
        let Some(parent) = layout.parent_of(node) else {
            continue;
        };
        let from = parent.right_anchor();
        let to = node.left_anchor();
        let control_x = (from.x + to.x) / 2.0;
        commands.push(DrawCommand::Connector {
            from,
            ctrl_a: Point::new(control_x, from.y),
            ctrl_b: Point::new(control_x, to.y),
            to,
            color: node.civ.color.to_rgba(CONNECTOR_OPACITY),
            width: CONNECTOR_WIDTH,
        });
    }
}

fn push_block(commands: &mut Vec<DrawCommand>, node: &LayoutNode, input: &SceneInput<'_>) {
    let is_selected = input.selected == Some(node.id());
    let is_hovered = input.hovered == Some(node.id());
    let [r, g, b] = HIGHLIGHT_RGB;

    let outline = if is_selected {
        Some(Outline {
            color: Rgba([r, g, b, 255]),
            width: SELECTED_OUTLINE_WIDTH,
        })
    } else if is_hovered {
        Some(Outline {
            color: Rgba([r, g, b, 128]),
            width: HOVERED_OUTLINE_WIDTH,
        })
    } else {
        None
    };
    let opacity = if is_selected || is_hovered { 1.0 } else { NODE_IDLE_OPACITY };

    commands.push(DrawCommand::Block {
        id: node.id().to_string(),
        rect: node.block,
        radius: input.metrics.corner_radius,
        fill: node.civ.color.to_rgba(opacity),
        outline,
    });

    let clip = node.block.inset_x(NODE_LABEL_INSET);
    let center_x = node.block.center().x;
    commands.push(DrawCommand::Text {
        text: node.civ.name.clone(),
        anchor: Point::new(center_x, node.y),
        align: TextAlign::Center,
        size: NODE_TITLE_SIZE,
        role: FontRole::Title,
        color: LABEL_COLOR,
        clip: Some(clip),
    });
    let [lr, lg, lb, _] = LABEL_COLOR.0;
    commands.push(DrawCommand::Text {
        text: node.civ.year_range_label(),
        anchor: Point::new(center_x, node.y + NODE_DATE_OFFSET),
        align: TextAlign::Center,
        size: NODE_DATE_SIZE,
        role: FontRole::Body,
        color: Rgba([lr, lg, lb, (NODE_DATE_OPACITY * 255.0).round() as u8]),
        clip: Some(clip),
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::color::Color;
    use crate::state::Civilization;

    fn civ(id: &str, start: i32, end: Option<i32>, parent: Option<&str>) -> Arc<Civilization> {
        Arc::new(Civilization {
            id: id.to_string(),
            name: format!("{id} name"),
            start_year: start,
            end_year: end,
            color: Color::rgb(200, 100, 50),
            parent_id: parent.map(str::to_string),
            description: String::new(),
            cultural_highlights: Vec::new(),
            region: String::new(),
        })
    }

    fn era() -> EraBackdrop {
        EraBackdrop {
            name: "CLASSICAL".into(),
            start_year: -500,
            end_year: 500,
            color: Color::rgb(10, 20, 30),
        }
    }

    struct Fixture {
        eras: Vec<EraBackdrop>,
        layout: TimelineLayout,
        year_scale: YearScale,
        metrics: LayoutMetrics,
        viewport: Viewport,
    }

    impl Fixture {
        fn new(civs: &[Arc<Civilization>]) -> Self {
            let year_scale = YearScale::default();
            let metrics = LayoutMetrics::default();
            Self {
                eras: vec![era()],
                layout: TimelineLayout::compute(civs, &year_scale, &metrics),
                year_scale,
                metrics,
                viewport: Viewport::default(),
            }
        }

        fn scene(&self, hovered: Option<&str>, selected: Option<&str>) -> Option<Scene> {
            build_scene(&SceneInput {
                eras: &self.eras,
                layout: &self.layout,
                year_scale: &self.year_scale,
                metrics: &self.metrics,
                viewport: &self.viewport,
                hovered,
                selected,
                width: 800.0,
                height: 600.0,
            })
        }
    }

    fn block<'a>(scene: &'a Scene, wanted: &str) -> (&'a Rgba<u8>, &'a Option<Outline>) {
        scene
            .commands
            .iter()
            .find_map(|command| match command {
                DrawCommand::Block { id, fill, outline, .. } if id == wanted => Some((fill, outline)),
                _ => None,
            })
            .unwrap()
    }

    fn texts(scene: &Scene) -> Vec<&str> {
        scene
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_draw_order_is_back_to_front() {
        let fixture = Fixture::new(&[civ("parent", -500, Some(500), None), civ("child", 0, Some(900), Some("parent"))]);
        let scene = fixture.scene(None, None).unwrap();
        let rank = |command: &DrawCommand| match command {
            DrawCommand::Band { .. } => 0,
            DrawCommand::Text { clip: None, .. } => 0,
            DrawCommand::Connector { .. } => 1,
            DrawCommand::Block { .. } | DrawCommand::Text { .. } => 2,
        };
        let ranks: Vec<i32> = scene.commands.iter().map(rank).collect();
        assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]), "{ranks:?}");
    }

    #[test]
    fn test_connector_runs_from_parent_right_edge() {
        let fixture = Fixture::new(&[civ("parent", -500, Some(500), None), civ("child", 0, Some(900), Some("parent"))]);
        let scene = fixture.scene(None, None).unwrap();
        let parent = fixture.layout.node("parent").unwrap();
        let child = fixture.layout.node("child").unwrap();

        let connectors: Vec<_> = scene
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Connector { from, to, color, .. } => Some((*from, *to, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(connectors.len(), 1);
        let (from, to, color) = connectors[0];
        assert_eq!(from, Point::new(parent.block.right(), parent.y));
        assert_eq!(to, Point::new(child.block.x, child.y));
        assert_eq!(color, Rgba([200, 100, 50, 77]));
    }

    #[test]
    fn test_dangling_parent_draws_no_connector() {
        let fixture = Fixture::new(&[civ("orphan", 0, Some(100), Some("ghost"))]);
        let scene = fixture.scene(None, None).unwrap();
        assert!(!scene.commands.iter().any(|c| matches!(c, DrawCommand::Connector { .. })));
    }

    #[test]
    fn test_ongoing_label_reads_present() {
        let fixture = Fixture::new(&[civ("modern", 1800, None, None), civ("rome", -27, Some(476), None)]);
        let scene = fixture.scene(None, None).unwrap();
        let labels = texts(&scene);
        assert!(labels.contains(&"1800 CE - Present"));
        assert!(labels.contains(&"27 BCE - 476 CE"));
        assert!(labels.contains(&"CLASSICAL"));
    }

    #[test]
    fn test_hover_and_selection_styling() {
        let fixture = Fixture::new(&[
            civ("a", -3000, Some(-2000), None),
            civ("b", -1000, Some(0), None),
            civ("c", 500, Some(1000), None),
        ]);
        let scene = fixture.scene(Some("b"), Some("c")).unwrap();

        let (fill, outline) = block(&scene, "a");
        assert_eq!(fill[3], 217);
        assert!(outline.is_none());

        let (fill, outline) = block(&scene, "b");
        assert_eq!(fill[3], 255);
        let hovered = outline.unwrap();
        assert_eq!(hovered.width, HOVERED_OUTLINE_WIDTH);
        assert_eq!(hovered.color[3], 128);

        let (fill, outline) = block(&scene, "c");
        assert_eq!(fill[3], 255);
        assert_eq!(outline.unwrap().width, SELECTED_OUTLINE_WIDTH);
    }

    #[test]
    fn test_labels_are_clipped_to_block() {
        let fixture = Fixture::new(&[civ("short", 0, Some(1), None)]);
        let scene = fixture.scene(None, None).unwrap();
        let node = fixture.layout.node("short").unwrap();
        for command in &scene.commands {
            if let DrawCommand::Text { clip: Some(clip), anchor, .. } = command {
                assert_eq!(*clip, node.block.inset_x(NODE_LABEL_INSET));
                assert_eq!(anchor.x, node.block.center().x);
            }
        }
    }

    #[test]
    fn test_degenerate_surface_skips_frame() {
        let fixture = Fixture::new(&[civ("a", 0, Some(100), None)]);
        for (width, height) in [(0.0, 600.0), (800.0, 0.0), (-5.0, 10.0), (f64::NAN, 10.0)] {
            let scene = build_scene(&SceneInput {
                eras: &fixture.eras,
                layout: &fixture.layout,
                year_scale: &fixture.year_scale,
                metrics: &fixture.metrics,
                viewport: &fixture.viewport,
                hovered: None,
                selected: None,
                width,
                height,
            });
            assert!(scene.is_none());
        }
    }
}
