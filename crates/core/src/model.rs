use serde::{Deserialize, Serialize};

/// One weighted business unit, e.g. a hotel branch sized by room count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub category: String,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        weight: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weight,
            category: category.into(),
        }
    }
}

/// The items of one category plus their precomputed weight sum.
///
/// A category with no items is never materialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: String,
    pub children: Vec<Item>,
    pub aggregate_weight: f64,
}

/// Axis-aligned rectangle in absolute pixel coordinates.
///
/// Invariant for emitted layout nodes: `x1 > x0` and `y1 > y0`. Width and
/// height are derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Shrink by `d` on all four sides. May invert a rect thinner than
    /// `2*d`; callers guard or repair afterwards.
    pub(crate) fn inset(&self, d: f64) -> Rect {
        Rect::new(self.x0 + d, self.y0 + d, self.x1 - d, self.y1 - d)
    }

    pub(crate) fn expand(&self, d: f64) -> Rect {
        self.inset(-d)
    }
}

/// A positioned element of the finished layout.
///
/// Renderers match on the variant to decide header-vs-tile drawing; there
/// is no flag field to probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutNode {
    /// The thin band reserved for a category label, sitting above that
    /// category's tiles and never overlapping them.
    CategoryHeader { category: String, rect: Rect },
    /// The tile for one item.
    Leaf {
        id: String,
        name: String,
        category: String,
        rect: Rect,
    },
}

impl LayoutNode {
    pub fn rect(&self) -> Rect {
        match self {
            LayoutNode::CategoryHeader { rect, .. } | LayoutNode::Leaf { rect, .. } => *rect,
        }
    }

    pub fn category(&self) -> &str {
        match self {
            LayoutNode::CategoryHeader { category, .. } | LayoutNode::Leaf { category, .. } => {
                category
            }
        }
    }
}

/// Paddings and header sizing, threaded explicitly through
/// [`compute_layout`](crate::treemap::compute_layout) rather than read from
/// ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Gap between sibling rectangles, in pixels.
    pub inner_padding: f64,
    /// Inset of the whole layout from the container edge, in pixels.
    pub outer_padding: f64,
    /// Height of the label band at the top of each category, in pixels.
    pub header_band_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            inner_padding: 1.0,
            outer_padding: 2.0,
            header_band_height: 24.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_derives_width_height_area() {
        let r = Rect::new(2.0, 3.0, 12.0, 8.0);
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 5.0);
        assert_eq!(r.area(), 50.0);
    }

    #[test]
    fn layout_node_serializes_with_kind_tag() {
        let node = LayoutNode::CategoryHeader {
            category: "서울".to_string(),
            rect: Rect::new(0.0, 0.0, 100.0, 24.0),
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "category_header");
        assert_eq!(json["category"], "서울");

        let back: LayoutNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn config_defaults_match_documented_values() {
        let cfg = LayoutConfig::default();
        assert_eq!(cfg.inner_padding, 1.0);
        assert_eq!(cfg.outer_padding, 2.0);
        assert_eq!(cfg.header_band_height, 24.0);
    }
}
