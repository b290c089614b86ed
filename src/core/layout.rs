//! Row layout for the civilization timeline.
//!
//! Civilizations are packed greedily into horizontal rows: sorted by start
//! year, each one takes the first row (at or below its parent's) whose claimed
//! intervals it does not touch. The whole layout is rebuilt whenever the
//! dataset changes. The per-row scan is O(rows x nodes), fine for tens of
//! entries; a much larger dataset would want a sorted interval set per row.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::{
    LAYOUT_EXTENT_MARGIN, MAX_ROW_SCAN, NODE_CORNER_RADIUS, NODE_HEIGHT, NODE_MIN_WIDTH,
    ROW_BASE_OFFSET, ROW_HEIGHT, ROW_PADDING,
};
use crate::state::Civilization;

use super::coords::{Point, Rect, YearScale};

/// Layout metrics in world units.
///
/// `row_padding` and `min_node_width` do not scale with zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub row_height: f64,
    /// Y of row 0's center line
    pub base_offset: f64,
    /// Gap kept on each side of a claimed interval
    pub row_padding: f64,
    /// Rows scanned before giving up and overlapping
    pub max_rows: usize,
    pub min_node_width: f64,
    pub node_height: f64,
    pub corner_radius: f64,
    /// Space below the last row counted into the layout extent
    pub extent_margin: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            row_height: ROW_HEIGHT,
            base_offset: ROW_BASE_OFFSET,
            row_padding: ROW_PADDING,
            max_rows: MAX_ROW_SCAN,
            min_node_width: NODE_MIN_WIDTH,
            node_height: NODE_HEIGHT,
            corner_radius: NODE_CORNER_RADIUS,
            extent_margin: LAYOUT_EXTENT_MARGIN,
        }
    }
}

/// Placement of one civilization.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub civ: Arc<Civilization>,
    pub row: usize,
    /// Midpoint of the mapped year interval
    pub x: f64,
    /// Center line of the row
    pub y: f64,
    /// Mapped start year
    pub start_x: f64,
    /// Mapped end year (the domain end for ongoing civilizations)
    pub end_x: f64,
    /// Painted block, widened to the minimum node width
    pub block: Rect,
}

impl LayoutNode {
    pub fn id(&self) -> &str {
        &self.civ.id
    }

    /// Where an incoming lineage connector attaches.
    pub fn left_anchor(&self) -> Point {
        Point::new(self.block.x, self.y)
    }

    /// Where outgoing lineage connectors start.
    pub fn right_anchor(&self) -> Point {
        Point::new(self.block.right(), self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    start: f64,
    end: f64,
}

impl Span {
    fn touches(&self, other: &Span, padding: f64) -> bool {
        !(self.end < other.start - padding || self.start > other.end + padding)
    }
}

/// Claimed intervals per row, alive for a single layout pass.
#[derive(Default)]
struct RowOccupancy {
    rows: Vec<Vec<Span>>,
}

impl RowOccupancy {
    fn is_free(&self, row: usize, span: &Span, padding: f64) -> bool {
        self.rows
            .get(row)
            .map_or(true, |claimed| !claimed.iter().any(|other| span.touches(other, padding)))
    }

    /// First free row in `floor..max_rows`, or `floor` when every scanned row is taken.
    fn find_row(&self, span: &Span, floor: usize, max_rows: usize, padding: f64) -> usize {
        match (floor..max_rows).find(|&row| self.is_free(row, span, padding)) {
            Some(row) => row,
            None => {
                tracing::debug!(floor, max_rows, "no free row, overlapping at the floor row");
                floor
            }
        }
    }

    fn claim(&mut self, row: usize, span: Span) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        self.rows[row].push(span);
    }
}

/// Computed placement for a whole dataset.
///
/// Nodes are kept in layout order (stable sort by start year); hit-testing
/// and painting both walk them in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineLayout {
    nodes: Vec<LayoutNode>,
    index: HashMap<String, usize>,
    extent_margin: f64,
}

impl TimelineLayout {
    pub fn compute(
        civilizations: &[Arc<Civilization>],
        scale: &YearScale,
        metrics: &LayoutMetrics,
    ) -> Self {
        let mut sorted: Vec<&Arc<Civilization>> = civilizations.iter().collect();
        // `sort_by_key` is stable, so equal start years keep input order.
        sorted.sort_by_key(|civ| civ.start_year);

        let mut occupancy = RowOccupancy::default();
        let mut nodes: Vec<LayoutNode> = Vec::with_capacity(sorted.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(sorted.len());

        for civ in sorted {
            let start_x = scale.year_to_x(civ.start_year);
            let end_x = scale.end_to_x(civ.end_year);
            let block_width = (end_x - start_x).max(metrics.min_node_width);
            let span = Span {
                start: start_x,
                end: start_x + block_width,
            };

            // Parents laid out later (or missing) leave the child as a root.
            let floor = civ
                .parent_id
                .as_deref()
                .and_then(|parent| index.get(parent))
                .map_or(0, |&parent| nodes[parent].row + 1);

            let row = occupancy.find_row(&span, floor, metrics.max_rows, metrics.row_padding);
            occupancy.claim(row, span);

            let y = row as f64 * metrics.row_height + metrics.base_offset;
            index.insert(civ.id.clone(), nodes.len());
            nodes.push(LayoutNode {
                civ: Arc::clone(civ),
                row,
                x: start_x + (end_x - start_x) / 2.0,
                y,
                start_x,
                end_x,
                block: Rect::new(
                    start_x,
                    y - metrics.node_height / 2.0,
                    block_width,
                    metrics.node_height,
                ),
            });
        }

        tracing::debug!(
            nodes = nodes.len(),
            rows = occupancy.rows.len(),
            "timeline layout computed"
        );

        Self {
            nodes,
            index,
            extent_margin: metrics.extent_margin,
        }
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// The laid-out parent of `node`, if its parent id resolves.
    pub fn parent_of(&self, node: &LayoutNode) -> Option<&LayoutNode> {
        node.civ.parent_id.as_deref().and_then(|id| self.node(id))
    }

    /// Bottom of the laid-out content: deepest row center plus the margin.
    pub fn extent_bottom(&self) -> Option<f64> {
        self.nodes
            .iter()
            .map(|node| node.y)
            .reduce(f64::max)
            .map(|y| y + self.extent_margin)
    }

    /// First node in layout order whose painted block contains `world`.
    pub fn hit_test(&self, world: Point) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.block.contains(world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;
    use crate::state::Dataset;

    fn civ(id: &str, start: i32, end: Option<i32>, parent: Option<&str>) -> Arc<Civilization> {
        Arc::new(Civilization {
            id: id.to_string(),
            name: id.to_uppercase(),
            start_year: start,
            end_year: end,
            color: Color::rgb(120, 80, 60),
            parent_id: parent.map(str::to_string),
            description: String::new(),
            cultural_highlights: Vec::new(),
            region: String::new(),
        })
    }

    fn layout(civs: &[Arc<Civilization>]) -> TimelineLayout {
        TimelineLayout::compute(civs, &YearScale::default(), &LayoutMetrics::default())
    }

    fn row_of(layout: &TimelineLayout, id: &str) -> usize {
        layout.node(id).unwrap().row
    }

    #[test]
    fn test_disjoint_roots_share_row_zero() {
        let civs = [civ("a", -3000, Some(-2000), None), civ("b", 0, Some(1000), None)];
        let layout = layout(&civs);
        assert_eq!(row_of(&layout, "a"), 0);
        assert_eq!(row_of(&layout, "b"), 0);
    }

    #[test]
    fn test_overlapping_roots_split_rows() {
        let civs = [civ("a", 100, Some(300), None), civ("b", 200, Some(400), None)];
        let layout = layout(&civs);
        assert_ne!(row_of(&layout, "a"), row_of(&layout, "b"));
    }

    #[test]
    fn test_child_sits_below_parent() {
        let civs = [
            civ("parent", -500, Some(500), None),
            civ("child", 0, Some(800), Some("parent")),
        ];
        let layout = layout(&civs);
        assert!(row_of(&layout, "child") >= row_of(&layout, "parent") + 1);
        let child = layout.node("child").unwrap();
        assert_eq!(layout.parent_of(child).unwrap().id(), "parent");
    }

    #[test]
    fn test_short_spans_use_rendered_width() {
        // ~98 world units apart: clear of the padding on raw coordinates, but
        // the painted 180-wide blocks would collide.
        let civs = [civ("a", 0, Some(1), None), civ("b", 150, Some(151), None)];
        let layout = layout(&civs);
        assert_ne!(row_of(&layout, "a"), row_of(&layout, "b"));
        assert_eq!(layout.node("a").unwrap().block.width, NODE_MIN_WIDTH);
    }

    #[test]
    fn test_ongoing_end_maps_to_domain_end() {
        let civs = [civ("modern", 1800, None, None)];
        let layout = layout(&civs);
        let node = layout.node("modern").unwrap();
        assert_eq!(node.end_x, YearScale::default().year_to_x(2100));
    }

    #[test]
    fn test_positions_follow_row() {
        let civs = [civ("a", 100, Some(300), None), civ("b", 200, Some(400), None)];
        let layout = layout(&civs);
        let b = layout.node("b").unwrap();
        assert_eq!(b.y, b.row as f64 * ROW_HEIGHT + ROW_BASE_OFFSET);
        assert_eq!(b.x, (b.start_x + b.end_x) / 2.0);
        assert_eq!(b.block.center().y, b.y);
    }

    #[test]
    fn test_stable_order_for_equal_starts() {
        let civs = [civ("first", 0, Some(100), None), civ("second", 0, Some(100), None)];
        let layout = layout(&civs);
        let order: Vec<&str> = layout.nodes().iter().map(|node| node.id()).collect();
        assert_eq!(order, ["first", "second"]);
        assert_eq!(row_of(&layout, "first"), 0);
        assert_eq!(row_of(&layout, "second"), 1);
    }

    #[test]
    fn test_forward_and_dangling_parents_are_roots() {
        let civs = [
            civ("orphan", -1000, Some(-900), Some("ghost")),
            // Parent starts later, so it is not laid out yet.
            civ("early-child", -3000, Some(-2900), Some("late-parent")),
            civ("late-parent", 1000, Some(1100), None),
        ];
        let layout = layout(&civs);
        assert_eq!(row_of(&layout, "orphan"), 0);
        assert_eq!(row_of(&layout, "early-child"), 0);
        assert!(layout.parent_of(layout.node("orphan").unwrap()).is_none());
    }

    #[test]
    fn test_exhausted_scan_falls_back_to_floor() {
        let metrics = LayoutMetrics {
            max_rows: 2,
            ..LayoutMetrics::default()
        };
        let civs = [
            civ("a", 0, Some(500), None),
            civ("b", 0, Some(500), None),
            civ("c", 0, Some(500), None),
        ];
        let layout = TimelineLayout::compute(&civs, &YearScale::default(), &metrics);
        assert_eq!(row_of(&layout, "a"), 0);
        assert_eq!(row_of(&layout, "b"), 1);
        assert_eq!(row_of(&layout, "c"), 0);
    }

    #[test]
    fn test_hit_test_prefers_layout_order() {
        let metrics = LayoutMetrics {
            max_rows: 1,
            ..LayoutMetrics::default()
        };
        let civs = [civ("later", 10, Some(500), None), civ("earlier", 0, Some(500), None)];
        let layout = TimelineLayout::compute(&civs, &YearScale::default(), &metrics);
        let point = layout.node("later").unwrap().block.center();
        assert_eq!(layout.hit_test(point).unwrap().id(), "earlier");
        assert!(layout.hit_test(Point::new(-10_000.0, 0.0)).is_none());
    }

    #[test]
    fn test_builtin_dataset_invariants() {
        let dataset = Dataset::builtin().unwrap();
        let metrics = LayoutMetrics::default();
        let layout = TimelineLayout::compute(&dataset.civilizations, &YearScale::default(), &metrics);
        assert_eq!(layout.nodes().len(), dataset.civilizations.len());

        for node in layout.nodes() {
            if let Some(parent) = layout.parent_of(node) {
                assert!(node.row >= parent.row + 1, "{} above {}", node.id(), parent.id());
            }
        }

        let nodes = layout.nodes();
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                if a.row != b.row {
                    continue;
                }
                let apart = a.block.right() + metrics.row_padding < b.block.x
                    || b.block.right() + metrics.row_padding < a.block.x;
                assert!(apart, "{} and {} collide in row {}", a.id(), b.id(), a.row);
            }
        }
    }

    #[test]
    fn test_extent_bottom() {
        assert_eq!(layout(&[]).extent_bottom(), None);
        let civs = [civ("a", 100, Some(300), None), civ("b", 200, Some(400), None)];
        let layout = layout(&civs);
        let deepest = layout.nodes().iter().map(|n| n.y).fold(0.0, f64::max);
        assert_eq!(layout.extent_bottom(), Some(deepest + LAYOUT_EXTENT_MARGIN));
    }
}
