//! Decides which drop target a dragged card is over.
//!
//! Pointer containment wins over rectangle overlap, which wins over corner
//! proximity. Whenever the archive zone shows up among the pointer or
//! overlap candidates it is the only one returned, so a column rendered
//! behind or next to the archive can never steal the drop.

use std::cmp::Ordering;

use super::{
    geometry::{DragGeometry, Droppable},
    item::TargetId,
};

/// A candidate drop target with the score it was ranked by.
///
/// What `value` means depends on the strategy that produced it: mean corner
/// distance for pointer and corner detection (lower is better), overlap
/// ratio for rectangle intersection (higher is better).
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub id: TargetId,
    pub value: f64,
}

/// Targets whose rectangle contains the pointer, nearest first.
#[must_use]
pub fn pointer_within(geometry: &DragGeometry, targets: &[Droppable]) -> Vec<Collision> {
    let Some(pointer) = geometry.pointer else {
        return Vec::new();
    };

    let mut collisions: Vec<Collision> = targets
        .iter()
        .filter(|target| target.rect.contains(pointer))
        .map(|target| Collision {
            id: target.id.clone(),
            value: target.rect.mean_distance_to_corners(pointer),
        })
        .collect();

    collisions.sort_by(ascending);
    collisions
}

/// Targets overlapping the dragged card, largest overlap first.
#[must_use]
pub fn rect_intersection(geometry: &DragGeometry, targets: &[Droppable]) -> Vec<Collision> {
    let mut collisions: Vec<Collision> = targets
        .iter()
        .filter_map(|target| {
            let ratio = target.rect.intersection_ratio(&geometry.active_rect);
            (ratio > 0.0).then(|| Collision {
                id: target.id.clone(),
                value: ratio,
            })
        })
        .collect();

    collisions.sort_by(|a, b| ascending(b, a));
    collisions
}

/// Every target ranked by how close its corners are to the dragged card's,
/// dropping those further than `max_distance` if one is given.
#[must_use]
pub fn closest_corners(
    geometry: &DragGeometry,
    targets: &[Droppable],
    max_distance: Option<f64>,
) -> Vec<Collision> {
    let mut collisions: Vec<Collision> = targets
        .iter()
        .map(|target| Collision {
            id: target.id.clone(),
            value: target.rect.corner_distance(&geometry.active_rect),
        })
        .filter(|collision| max_distance.is_none_or(|max| collision.value <= max))
        .collect();

    collisions.sort_by(ascending);
    collisions
}

/// Ranks the drop targets for the current drag geometry; the first entry is
/// the one the card is considered to be over.
#[must_use]
pub fn resolve_collisions(
    geometry: &DragGeometry,
    targets: &[Droppable],
    closest_corners_range: Option<f64>,
) -> Vec<Collision> {
    let pointer_collisions = pointer_within(geometry, targets);
    if !pointer_collisions.is_empty() {
        return prefer_archive(pointer_collisions);
    }

    let intersections = rect_intersection(geometry, targets);
    if !intersections.is_empty() {
        return prefer_archive(intersections);
    }

    closest_corners(geometry, targets, closest_corners_range)
}

fn prefer_archive(collisions: Vec<Collision>) -> Vec<Collision> {
    match collisions
        .iter()
        .position(|collision| collision.id == TargetId::Archive)
    {
        Some(index) => vec![collisions[index].clone()],
        None => collisions,
    }
}

// Stable sort keeps the caller's target order for equal scores.
fn ascending(a: &Collision, b: &Collision) -> Ordering { a.value.total_cmp(&b.value) }
