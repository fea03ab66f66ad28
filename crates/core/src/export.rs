use crate::model::LayoutNode;

/// Structural JSON for a finished layout, tagged by node kind so renderers
/// on the other side of a process boundary can rebuild it losslessly.
pub fn to_json(nodes: &[LayoutNode]) -> serde_json::Value {
    serde_json::json!({
        "nodes": nodes.iter().map(|n| {
            let r = n.rect();
            match n {
                LayoutNode::CategoryHeader { category, .. } => serde_json::json!({
                    "kind": "category_header",
                    "category": category,
                    "rect": { "x0": r.x0, "y0": r.y0, "x1": r.x1, "y1": r.y1 },
                }),
                LayoutNode::Leaf { id, name, category, .. } => serde_json::json!({
                    "kind": "leaf",
                    "id": id,
                    "name": name,
                    "category": category,
                    "rect": { "x0": r.x0, "y0": r.y0, "x1": r.x1, "y1": r.y1 },
                }),
            }
        }).collect::<Vec<_>>()
    })
}

/// One CSV record per layout node. Header bands carry an empty id.
pub fn to_csv(nodes: &[LayoutNode], mut w: impl std::io::Write) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(&mut w);
    writer.write_record([
        "kind", "id", "name", "category", "x0", "y0", "x1", "y1", "width", "height",
    ])?;
    for n in nodes {
        let (kind, id, name, category) = match n {
            LayoutNode::CategoryHeader { category, .. } => {
                ("header", "", category.as_str(), category.as_str())
            }
            LayoutNode::Leaf { id, name, category, .. } => {
                ("leaf", id.as_str(), name.as_str(), category.as_str())
            }
        };
        let r = n.rect();
        writer.write_record([
            kind.to_string(),
            id.to_string(),
            name.to_string(),
            category.to_string(),
            r.x0.to_string(),
            r.y0.to_string(),
            r.x1.to_string(),
            r.y1.to_string(),
            r.width().to_string(),
            r.height().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, LayoutConfig};
    use crate::treemap::compute_layout;

    fn sample_nodes() -> Vec<LayoutNode> {
        let items = vec![
            Item::new("S001", "테스트지점A", 100.0, "서울"),
            Item::new("S002", "테스트지점B", 200.0, "서울"),
            Item::new("S003", "테스트지점C", 150.0, "부산"),
        ];
        compute_layout(&items, 800.0, 600.0, &LayoutConfig::default()).unwrap()
    }

    #[test]
    fn json_export_carries_every_node() {
        let nodes = sample_nodes();
        let json = to_json(&nodes);
        assert_eq!(json["nodes"].as_array().unwrap().len(), nodes.len());
        assert_eq!(json["nodes"][0]["kind"], "category_header");
    }

    #[test]
    fn layout_round_trips_through_serde() {
        let nodes = sample_nodes();
        let encoded = serde_json::to_string(&nodes).unwrap();
        let decoded: Vec<LayoutNode> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, nodes);
    }

    #[test]
    fn csv_export_writes_one_record_per_node() {
        let nodes = sample_nodes();
        let mut buf = Vec::new();
        to_csv(&nodes, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), nodes.len() + 1);
        assert!(lines[0].starts_with("kind,id,name,category"));
        assert!(lines.iter().skip(1).any(|l| l.starts_with("leaf,S002")));
    }
}
