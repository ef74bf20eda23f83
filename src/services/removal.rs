//! Removal coordinator
//!
//! Takes the items the scanner staged and deletes them from both budget
//! lists: the department's locally funded items and its line items. The
//! same building can fund two purposes (Education staff and coverage, for
//! example), so orphans are counted by building type across the whole
//! command.

use std::collections::BTreeSet;
use std::fmt;

use crate::host::{BudgetSimulator, DepartmentBudget};
use crate::models::{BuildingType, DepartmentId, OccupantId, PurposeId};

use super::command::PhantomCommand;
use super::scanner::{collect_orphans, OrphanedItem};

/// Building types removed during one command
#[derive(Debug, Clone, Default)]
pub struct OrphanSet {
    building_types: BTreeSet<BuildingType>,
}

impl OrphanSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a building type; false if it was already counted
    pub fn insert(&mut self, building_type: BuildingType) -> bool {
        self.building_types.insert(building_type)
    }

    pub fn contains(&self, building_type: BuildingType) -> bool {
        self.building_types.contains(&building_type)
    }

    pub fn len(&self) -> usize {
        self.building_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.building_types.is_empty()
    }
}

/// What happened to one removed item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRecord {
    pub department: DepartmentId,
    pub purpose: PurposeId,
    pub occupant_id: OccupantId,
    pub building_type: BuildingType,
    /// The item was found in and unlinked from the locally funded list
    pub unlinked: bool,
    /// A line item for the building type existed and was removed
    pub line_item_removed: bool,
}

impl fmt::Display for RemovalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Removed occupant {} (building type {}) from department {} purpose {}",
            self.occupant_id, self.building_type, self.department, self.purpose
        )?;
        if !self.unlinked {
            write!(f, "; it was not in the locally funded list")?;
        }
        if self.line_item_removed {
            write!(f, "; line item removed")?;
        }
        Ok(())
    }
}

/// Remove staged orphans from one department purpose
///
/// Each orphan's reference is released as soon as its own steps finish.
/// Unless `clear_all` is set, building types are added to `orphan_set`.
pub fn apply(
    department: &mut dyn DepartmentBudget,
    purpose: PurposeId,
    orphans: Vec<OrphanedItem>,
    clear_all: bool,
    orphan_set: &mut OrphanSet,
) -> Vec<RemovalRecord> {
    let department_id = department.department_id();
    let mut records = Vec::with_capacity(orphans.len());

    for orphan in orphans {
        let unlinked = department.remove_locally_funded_object(&orphan.item, purpose);

        // Not every building has a line item
        let line_item_removed = department.remove_line_item(orphan.building_type);

        if !clear_all {
            orphan_set.insert(orphan.building_type);
        }

        records.push(RemovalRecord {
            department: department_id,
            purpose,
            occupant_id: orphan.item.occupant_id,
            building_type: orphan.building_type,
            unlinked,
            line_item_removed,
        });
    }

    records
}

/// Outcome reported to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The whole category was cleared; holds the category as typed
    Cleared { category: String },
    /// Nothing was orphaned
    NoneFound,
    /// This many distinct building types were removed
    Removed(usize),
}

impl fmt::Display for RemovalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cleared { category } => write!(f, "Cleared the {} budget category.", category),
            Self::NoneFound => write!(f, "No orphaned budget items found."),
            Self::Removed(count) => write!(f, "Removed {} orphaned budget item(s).", count),
        }
    }
}

/// Result of one command
#[derive(Debug, Clone)]
pub struct RemovalReport {
    pub outcome: RemovalOutcome,
    pub records: Vec<RemovalRecord>,
    /// Department/purpose pairs skipped because the city has no such department
    pub missing_departments: Vec<DepartmentId>,
}

/// Service that runs a command against the budget simulator
pub struct RemovalService<'a> {
    simulator: &'a mut dyn BudgetSimulator,
}

impl<'a> RemovalService<'a> {
    /// Create a new removal service
    pub fn new(simulator: &'a mut dyn BudgetSimulator) -> Self {
        Self { simulator }
    }

    /// Scan and remove phantom items for every pair the command resolved to
    pub fn remove_phantom_items(&mut self, command: &PhantomCommand) -> RemovalReport {
        let mut orphan_set = OrphanSet::new();
        let mut records = Vec::new();
        let mut missing_departments = Vec::new();

        for target in &command.targets {
            let Some(department) = self.simulator.department_budget(target.department) else {
                missing_departments.push(target.department);
                continue;
            };

            let orphans = collect_orphans(&*department, target.purpose, command.clear_all);
            records.extend(apply(
                department,
                target.purpose,
                orphans,
                command.clear_all,
                &mut orphan_set,
            ));
        }

        let outcome = if command.clear_all {
            RemovalOutcome::Cleared {
                category: command.category_text.clone(),
            }
        } else if orphan_set.is_empty() {
            RemovalOutcome::NoneFound
        } else {
            RemovalOutcome::Removed(orphan_set.len())
        };

        RemovalReport {
            outcome,
            records,
            missing_departments,
        }
    }
}
