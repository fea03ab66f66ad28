use crate::error::{LayoutError, Result};
use crate::hierarchy;
use crate::model::{CategoryGroup, Item, LayoutConfig, LayoutNode, Rect};

/// Compute the full two-level layout for `items` inside a `width` x
/// `height` container.
///
/// This is the single entry point renderers need: items are grouped by
/// category, each category gets a header band plus a squarified tile per
/// item, and every returned rectangle is in absolute pixel coordinates.
/// The call is pure; identical inputs produce identical output and nothing
/// is retained between calls. An empty item list yields an empty layout.
pub fn compute_layout(
    items: &[Item],
    width: f64,
    height: f64,
    config: &LayoutConfig,
) -> Result<Vec<LayoutNode>> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(LayoutError::InvalidDimension { width, height });
    }
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let groups = hierarchy::build(items, None)?;
    layout(&groups, Rect::new(0.0, 0.0, width, height), config)
}

/// Lay out prebuilt category groups inside `container`.
///
/// Groups and their children must already be ordered weight-descending,
/// which is what [`hierarchy::build`] produces.
pub fn layout(
    groups: &[CategoryGroup],
    container: Rect,
    config: &LayoutConfig,
) -> Result<Vec<LayoutNode>> {
    let (width, height) = (container.width(), container.height());
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(LayoutError::InvalidDimension { width, height });
    }
    if groups.is_empty() {
        return Ok(Vec::new());
    }

    let working = container.inset(config.outer_padding.max(0.0));
    if working.width() <= 0.0 || working.height() <= 0.0 {
        return Err(LayoutError::DegenerateLayout { width, height });
    }

    tracing::debug!(
        categories = groups.len(),
        leaves = groups.iter().map(|g| g.children.len()).sum::<usize>(),
        width = working.width(),
        height = working.height(),
        "computing squarified layout"
    );

    let weights: Vec<f64> = groups.iter().map(|g| g.aggregate_weight).collect();
    let bands = partition(&weights, working, config.inner_padding.max(0.0));

    let mut nodes = Vec::new();
    for (group, band) in groups.iter().zip(bands) {
        nodes.extend(layout_category(group, band, config)?);
    }

    for node in &mut nodes {
        let rect = match node {
            LayoutNode::CategoryHeader { rect, .. } | LayoutNode::Leaf { rect, .. } => rect,
        };
        *rect = round_rect(*rect, working);
    }
    Ok(nodes)
}

/// Header band plus squarified child tiles for one category rectangle.
fn layout_category(
    group: &CategoryGroup,
    rect: Rect,
    config: &LayoutConfig,
) -> Result<Vec<LayoutNode>> {
    let band_height = config.header_band_height.max(0.0);
    if rect.height() <= band_height {
        return Err(LayoutError::DegenerateLayout {
            width: rect.width(),
            height: rect.height(),
        });
    }
    let header = Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + band_height);
    let content = Rect::new(rect.x0, header.y1, rect.x1, rect.y1);

    let weights: Vec<f64> = group.children.iter().map(|c| c.weight).collect();
    let tiles = partition(&weights, content, config.inner_padding.max(0.0));

    let mut nodes = vec![LayoutNode::CategoryHeader {
        category: group.category.clone(),
        rect: header,
    }];
    nodes.extend(
        group
            .children
            .iter()
            .zip(tiles)
            .map(|(item, tile)| LayoutNode::Leaf {
                id: item.id.clone(),
                name: item.name.clone(),
                category: item.category.clone(),
                rect: tile,
            }),
    );
    Ok(nodes)
}

/// Squarified partition of `rect` into one tile per weight, with `gap`
/// pixels between adjacent tiles.
///
/// Tiling runs inside the rect expanded by half the gap, then every tile
/// is inset by the same half; adjacent tiles end up exactly `gap` apart
/// while boundary tiles stay flush with `rect`.
fn partition(weights: &[f64], rect: Rect, gap: f64) -> Vec<Rect> {
    let half = gap / 2.0;
    squarify(weights, rect.expand(half))
        .into_iter()
        .map(|tile| tile.inset(half))
        .collect()
}

/// Classic squarified treemap over weight-descending input: rows are grown
/// greedily across the rect's shorter side and emitted as soon as taking
/// one more item would worsen the row's worst aspect ratio.
fn squarify(weights: &[f64], rect: Rect) -> Vec<Rect> {
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return Vec::new();
    }
    let scale = rect.area() / total;
    let areas: Vec<f64> = weights.iter().map(|w| w * scale).collect();

    let mut out = Vec::with_capacity(areas.len());
    let Rect {
        mut x0,
        mut y0,
        x1,
        y1,
    } = rect;
    let mut i0 = 0;

    while i0 < areas.len() {
        let w = x1 - x0;
        let h = y1 - y0;
        let short = w.min(h).max(1e-9);

        let mut i1 = i0 + 1;
        let mut row_sum = areas[i0];
        let mut row_min = areas[i0];
        let mut row_max = areas[i0];
        let mut ratio = worst_aspect(row_min, row_max, row_sum, short);
        while i1 < areas.len() {
            let area = areas[i1];
            let sum = row_sum + area;
            let min = row_min.min(area);
            let max = row_max.max(area);
            let next = worst_aspect(min, max, sum, short);
            if next > ratio {
                break;
            }
            row_sum = sum;
            row_min = min;
            row_max = max;
            ratio = next;
            i1 += 1;
        }

        // The row consumes a band of this thickness from the longer axis;
        // items share the short side proportionally to their areas.
        let thickness = row_sum / short;
        if w < h {
            let mut x = x0;
            for &area in &areas[i0..i1] {
                let len = area / thickness.max(1e-9);
                out.push(Rect::new(x, y0, x + len, y0 + thickness));
                x += len;
            }
            y0 += thickness;
        } else {
            let mut y = y0;
            for &area in &areas[i0..i1] {
                let len = area / thickness.max(1e-9);
                out.push(Rect::new(x0, y, x0 + thickness, y + len));
                y += len;
            }
            x0 += thickness;
        }
        i0 = i1;
    }
    out
}

/// Worst aspect ratio of a row with the given min/max/total areas when it
/// spans a side of length `side`.
fn worst_aspect(min: f64, max: f64, sum: f64, side: f64) -> f64 {
    let side_sq = side * side;
    let sum_sq = sum * sum;
    (side_sq * max / sum_sq).max(sum_sq / (side_sq * min))
}

/// Snap a rectangle to the integer pixel grid after all levels are placed.
///
/// A tile that rounding would collapse below one pixel is widened into the
/// adjacent gap, staying inside `bounds` and off its siblings' rounded
/// interiors.
fn round_rect(r: Rect, bounds: Rect) -> Rect {
    let (bx1, by1) = (bounds.x1.round(), bounds.y1.round());
    let mut x0 = r.x0.round();
    let mut x1 = r.x1.round();
    let mut y0 = r.y0.round();
    let mut y1 = r.y1.round();
    if x1 <= x0 {
        tracing::warn!(x0 = r.x0, x1 = r.x1, "tile collapsed horizontally, widening into gap");
        if x0 + 1.0 <= bx1 {
            x1 = x0 + 1.0;
        } else {
            x1 = bx1;
            x0 = x1 - 1.0;
        }
    }
    if y1 <= y0 {
        tracing::warn!(y0 = r.y0, y1 = r.y1, "tile collapsed vertically, widening into gap");
        if y0 + 1.0 <= by1 {
            y1 = y0 + 1.0;
        } else {
            y1 = by1;
            y0 = y1 - 1.0;
        }
    }
    Rect::new(x0, y0, x1, y1)
}
