//! Orphan scanner
//!
//! Walks a department's locally funded items for one purpose and picks out
//! the ones whose exemplar is gone. An entry loses its exemplar-type
//! property when the plugin file that defined the building is deleted.

use std::rc::Rc;

use crate::host::DepartmentBudget;
use crate::models::{
    BuildingType, HostList, ItemRef, LocallyFundedItem, NodeAllocator, NodeArena, PurposeId,
    EXEMPLAR_TYPE,
};

/// An item staged for removal
///
/// Holds its own reference to the item until the removal steps for it are
/// done.
#[derive(Debug, Clone)]
pub struct OrphanedItem {
    pub item: ItemRef,
    pub building_type: BuildingType,
}

/// Whether an item should be removed
pub fn is_orphaned(item: &LocallyFundedItem, clear_all: bool) -> bool {
    clear_all || !item.has_property(EXEMPLAR_TYPE)
}

/// Select the orphaned items in `items`
///
/// Entries that are not building occupants are skipped. The list is only
/// read.
pub fn scan<A>(items: &HostList<ItemRef>, allocator: &A, clear_all: bool) -> Vec<OrphanedItem>
where
    A: NodeAllocator<ItemRef> + ?Sized,
{
    items
        .iter(allocator)
        .filter(|item| is_orphaned(item, clear_all))
        .filter_map(|item| {
            let building_type = item.building_type()?;
            Some(OrphanedItem {
                item: Rc::clone(item),
                building_type,
            })
        })
        .collect()
}

/// Fetch a department's items for `purpose` and scan them
pub fn collect_orphans(
    department: &dyn DepartmentBudget,
    purpose: PurposeId,
    clear_all: bool,
) -> Vec<OrphanedItem> {
    let mut arena = NodeArena::new();
    let mut items = HostList::new();

    let orphans = if department.locally_funded_items_by_purpose(purpose, &mut items, &mut arena) {
        scan(&items, &arena, clear_all)
    } else {
        Vec::new()
    };

    items.teardown(&mut arena);
    orphans
}
