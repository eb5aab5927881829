//! Inventory aggregation over unit-level records.
//!
//! Inventory is modeled per physical unit, never as a quantity counter.
//! Availability and groupings are derived here from already-loaded unit
//! records on every read; nothing in the system stores a cached count, so
//! there is no counter to drift from the true unit states.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{InventoryStatus, SampleColor, SampleSize, StorageLocation};
use crate::types::DbId;

/// Minimal view of one inventory unit, with the owning sample item's
/// color and size joined in by the repository.
#[derive(Debug, Clone)]
pub struct UnitView {
    pub unit_id: DbId,
    pub sample_item_id: DbId,
    pub status: InventoryStatus,
    pub location: Option<StorageLocation>,
    pub size: Option<SampleSize>,
    pub color: Option<SampleColor>,
}

/// Count of units with status AVAILABLE.
pub fn available_count(units: &[UnitView]) -> usize {
    units
        .iter()
        .filter(|u| u.status == InventoryStatus::Available)
        .count()
}

/// Unit count per status, complete over all five statuses.
pub fn status_breakdown(units: &[UnitView]) -> BTreeMap<InventoryStatus, usize> {
    let mut counts: BTreeMap<InventoryStatus, usize> =
        InventoryStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for unit in units {
        if let Some(n) = counts.get_mut(&unit.status) {
            *n += 1;
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Nested grouping
// ---------------------------------------------------------------------------

/// Units of one sample item within a color group.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VariantGroup {
    pub sample_item_id: DbId,
    /// Unit ids in ascending order.
    pub unit_ids: Vec<DbId>,
}

/// Color level of the grouping. `color: None` is the distinguished
/// "no color" group, not an absence of data.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ColorGroup {
    pub color: Option<SampleColor>,
    pub variants: Vec<VariantGroup>,
}

/// Size level of the grouping.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SizeGroup {
    pub size: Option<SampleSize>,
    pub colors: Vec<ColorGroup>,
}

/// Location level of the grouping.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LocationGroup {
    pub location: Option<StorageLocation>,
    pub sizes: Vec<SizeGroup>,
}

/// Group units by location, then size, then color, then sample item.
///
/// Ordering is deterministic: the unkeyed group (`None`) sorts first at
/// every level, followed by catalog declaration order; unit ids ascend
/// within each variant group.
pub fn group_units(units: &[UnitView]) -> Vec<LocationGroup> {
    type VariantMap = BTreeMap<DbId, Vec<DbId>>;
    type ColorMap = BTreeMap<Option<SampleColor>, VariantMap>;
    type SizeMap = BTreeMap<Option<SampleSize>, ColorMap>;
    let mut tree: BTreeMap<Option<StorageLocation>, SizeMap> = BTreeMap::new();

    for unit in units {
        tree.entry(unit.location)
            .or_default()
            .entry(unit.size)
            .or_default()
            .entry(unit.color)
            .or_default()
            .entry(unit.sample_item_id)
            .or_default()
            .push(unit.unit_id);
    }

    tree.into_iter()
        .map(|(location, sizes)| LocationGroup {
            location,
            sizes: sizes
                .into_iter()
                .map(|(size, colors)| SizeGroup {
                    size,
                    colors: colors
                        .into_iter()
                        .map(|(color, variants)| ColorGroup {
                            color,
                            variants: variants
                                .into_iter()
                                .map(|(sample_item_id, mut unit_ids)| {
                                    unit_ids.sort_unstable();
                                    VariantGroup {
                                        sample_item_id,
                                        unit_ids,
                                    }
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(
        unit_id: DbId,
        sample_item_id: DbId,
        status: InventoryStatus,
        location: Option<StorageLocation>,
    ) -> UnitView {
        UnitView {
            unit_id,
            sample_item_id,
            status,
            location,
            size: Some(SampleSize::M),
            color: Some(SampleColor::Black),
        }
    }

    #[test]
    fn available_count_ignores_other_statuses() {
        let units = vec![
            unit(1, 10, InventoryStatus::Available, None),
            unit(2, 10, InventoryStatus::InUse, None),
            unit(3, 10, InventoryStatus::Available, None),
            unit(4, 10, InventoryStatus::Damaged, None),
            unit(5, 10, InventoryStatus::Reserved, None),
        ];
        assert_eq!(available_count(&units), 2);
    }

    #[test]
    fn breakdown_covers_all_statuses_even_when_absent() {
        let units = vec![unit(1, 10, InventoryStatus::Available, None)];
        let counts = status_breakdown(&units);
        assert_eq!(counts.len(), InventoryStatus::ALL.len());
        assert_eq!(counts[&InventoryStatus::Available], 1);
        assert_eq!(counts[&InventoryStatus::Archived], 0);
    }

    #[test]
    fn count_tracks_unit_updates_without_drift() {
        let mut units: Vec<UnitView> = (1..=6)
            .map(|i| unit(i, 10, InventoryStatus::Available, None))
            .collect();
        assert_eq!(available_count(&units), 6);

        units[0].status = InventoryStatus::InUse;
        units[3].status = InventoryStatus::Damaged;
        assert_eq!(available_count(&units), 4);

        units[0].status = InventoryStatus::Available;
        assert_eq!(available_count(&units), 5);
    }

    #[test]
    fn unlocated_group_sorts_before_named_locations() {
        let units = vec![
            unit(1, 10, InventoryStatus::Available, Some(StorageLocation::StudioA)),
            unit(2, 10, InventoryStatus::Available, None),
        ];
        let groups = group_units(&units);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].location, None);
        assert_eq!(groups[1].location, Some(StorageLocation::StudioA));
    }

    #[test]
    fn grouping_nests_location_size_color_variant() {
        let mut a = unit(2, 10, InventoryStatus::Available, Some(StorageLocation::StudioA));
        a.color = Some(SampleColor::Navy);
        let mut b = unit(1, 10, InventoryStatus::InUse, Some(StorageLocation::StudioA));
        b.color = Some(SampleColor::Navy);
        let mut c = unit(3, 11, InventoryStatus::Available, Some(StorageLocation::StudioA));
        c.color = None;

        let groups = group_units(&[a, b, c]);
        assert_eq!(groups.len(), 1);
        let sizes = &groups[0].sizes;
        assert_eq!(sizes.len(), 1);
        let colors = &sizes[0].colors;
        // Colorless group first, then NAVY.
        assert_eq!(colors[0].color, None);
        assert_eq!(colors[0].variants[0].sample_item_id, 11);
        assert_eq!(colors[1].color, Some(SampleColor::Navy));
        // Unit ids ascend regardless of input order.
        assert_eq!(colors[1].variants[0].unit_ids, vec![1, 2]);
    }

    #[test]
    fn grouping_of_empty_input_is_empty() {
        assert!(group_units(&[]).is_empty());
    }
}
