use std::cmp::Ordering;

use crate::error::{LayoutError, Result};
use crate::model::{CategoryGroup, Item};

/// Group a flat item list into per-category groups, ordered for layout.
///
/// Children within a category are sorted by weight descending, ties broken
/// by id ascending so equal-weight siblings always land in the same spot.
/// Categories are sorted by aggregate weight descending; ties prefer the
/// position in `category_order` when one is supplied (the caller's master
/// region list), then category name ascending.
///
/// All items are validated eagerly: a missing id or category, or a weight
/// that is not a finite positive number, fails the whole build. When
/// `category_order` is given, an item naming a category outside it is
/// rejected as well instead of being silently dropped.
pub fn build(items: &[Item], category_order: Option<&[String]>) -> Result<Vec<CategoryGroup>> {
    for item in items {
        validate_item(item)?;
        if let Some(order) = category_order {
            if !order.iter().any(|c| c == &item.category) {
                return Err(LayoutError::Validation {
                    id: item.id.clone(),
                    reason: format!("unknown category {:?}", item.category),
                });
            }
        }
    }

    let mut groups: Vec<CategoryGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => {
                group.children.push(item.clone());
                group.aggregate_weight += item.weight;
            }
            None => groups.push(CategoryGroup {
                category: item.category.clone(),
                children: vec![item.clone()],
                aggregate_weight: item.weight,
            }),
        }
    }

    // Unreachable after per-item validation, but a zero-weight band must
    // never make it into the layout.
    if let Some(group) = groups.iter().find(|g| g.aggregate_weight <= 0.0) {
        return Err(LayoutError::Validation {
            id: group.category.clone(),
            reason: "category has no positive aggregate weight".to_string(),
        });
    }

    for group in &mut groups {
        group.children.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
    }

    let rank = |category: &str| {
        category_order
            .and_then(|order| order.iter().position(|c| c == category))
            .unwrap_or(usize::MAX)
    };
    groups.sort_by(|a, b| {
        b.aggregate_weight
            .partial_cmp(&a.aggregate_weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| rank(&a.category).cmp(&rank(&b.category)))
            .then_with(|| a.category.cmp(&b.category))
    });

    Ok(groups)
}

fn validate_item(item: &Item) -> Result<()> {
    let fail = |item: &Item, reason: &str| {
        Err(LayoutError::Validation {
            id: item.id.clone(),
            reason: reason.to_string(),
        })
    };
    if item.id.is_empty() {
        return fail(item, "missing id");
    }
    if item.category.is_empty() {
        return fail(item, "missing category");
    }
    if !item.weight.is_finite() || item.weight <= 0.0 {
        return Err(LayoutError::Validation {
            id: item.id.clone(),
            reason: format!("weight must be a finite positive number, got {}", item.weight),
        });
    }
    Ok(())
}
