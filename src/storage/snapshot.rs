//! Budget snapshots
//!
//! A snapshot is a JSON description of a city's budget departments: the
//! locally funded items per purpose and the line items. The CLI loads one
//! into the in-memory host, runs a command and can write the result back out.
//!
//! ```json
//! {
//!   "departments": [
//!     {
//!       "id": "0x28F55A9F",
//!       "name": "Fire",
//!       "purposes": [
//!         { "id": "0xEA567BC3", "items": [
//!           { "occupant_id": "0x00000001", "building_type": "0x000000F1",
//!             "name": "Deleted Station", "properties": [] }
//!         ] }
//!       ],
//!       "line_items": [
//!         { "building_type": "0x000000F1", "name": "Deleted Station", "monthly_expense": 300 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Ids are written as `0x`-prefixed hex. On input a JSON number or a
//! decimal string is also accepted; a bare string such as `"1A"` is not.
//!
//! An occupant that appears under several departments is loaded as one
//! shared item, the way the host shares one property holder.

use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{PhantomError, PhantomResult};
use crate::host::{InMemoryBudgetSimulator, InMemoryDepartment};
use crate::models::{DepartmentId, ItemRef, LineItem, LocallyFundedItem, OccupantId, PurposeId};

use super::file_io::{read_snapshot, write_snapshot, SnapshotRole};

/// Items recorded for one purpose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurposeSnapshot {
    pub id: PurposeId,

    #[serde(default)]
    pub items: Vec<LocallyFundedItem>,
}

/// One department's budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSnapshot {
    pub id: DepartmentId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub purposes: Vec<PurposeSnapshot>,

    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// A city's budget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    #[serde(default)]
    pub departments: Vec<DepartmentSnapshot>,
}

impl BudgetSnapshot {
    /// Load the budget a command runs against
    pub fn load(path: impl AsRef<Path>) -> PhantomResult<Self> {
        read_snapshot(path, SnapshotRole::Budget)
    }

    /// Write the snapshot atomically as command output
    pub fn save(&self, path: impl AsRef<Path>) -> PhantomResult<()> {
        write_snapshot(path, self, SnapshotRole::Output)
    }

    /// Build an in-memory simulator
    ///
    /// # Errors
    ///
    /// Fails on a repeated department id, or when one occupant id is given
    /// two different descriptions.
    pub fn into_simulator(self) -> PhantomResult<InMemoryBudgetSimulator> {
        let mut shared: BTreeMap<OccupantId, ItemRef> = BTreeMap::new();
        let mut simulator = InMemoryBudgetSimulator::new();

        for department in self.departments {
            let mut budget = InMemoryDepartment::new(department.id, department.name);

            for purpose in department.purposes {
                budget.add_purpose(purpose.id);

                for item in purpose.items {
                    let item = match shared.get(&item.occupant_id) {
                        Some(existing) if **existing == item => Rc::clone(existing),
                        Some(_) => {
                            return Err(PhantomError::duplicate_occupant(item.occupant_id.to_string()))
                        }
                        None => {
                            let item = Rc::new(item);
                            shared.insert(item.occupant_id, Rc::clone(&item));
                            item
                        }
                    };
                    budget.add_item(purpose.id, item);
                }
            }

            for line_item in department.line_items {
                budget.add_line_item(line_item);
            }

            simulator.insert_department(budget)?;
        }

        Ok(simulator)
    }

    /// Capture the current state of an in-memory simulator
    pub fn from_simulator(simulator: &InMemoryBudgetSimulator) -> Self {
        let departments = simulator
            .departments()
            .map(|department| DepartmentSnapshot {
                id: department.id(),
                name: department.name().to_string(),
                purposes: department
                    .purposes()
                    .into_iter()
                    .map(|(id, items)| PurposeSnapshot {
                        id,
                        items: items.iter().map(|item| (**item).clone()).collect(),
                    })
                    .collect(),
                line_items: department.line_items().cloned().collect(),
            })
            .collect();

        Self { departments }
    }

    /// Total number of locally funded entries
    pub fn item_count(&self) -> usize {
        self.departments
            .iter()
            .flat_map(|department| &department.purposes)
            .map(|purpose| purpose.items.len())
            .sum()
    }
}
