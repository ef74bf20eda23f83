//! Budget simulator interfaces

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{
    BuildingType, DepartmentId, HostList, ItemRef, LocallyFundedItem, NodeAllocator, PurposeId,
};

/// One department's budget records
pub trait DepartmentBudget {
    /// The department this budget belongs to
    fn department_id(&self) -> DepartmentId;

    /// Append the locally funded items for `purpose` to `out`
    ///
    /// Nodes are taken from `allocator`; the caller tears the list down.
    /// Returns false when the department has nothing recorded for the
    /// purpose.
    fn locally_funded_items_by_purpose(
        &self,
        purpose: PurposeId,
        out: &mut HostList<ItemRef>,
        allocator: &mut dyn NodeAllocator<ItemRef>,
    ) -> bool;

    /// Unlink an item from the locally funded list for `purpose`
    fn remove_locally_funded_object(&mut self, item: &LocallyFundedItem, purpose: PurposeId) -> bool;

    /// Remove the line item keyed by `building_type`, if there is one
    fn remove_line_item(&mut self, building_type: BuildingType) -> bool;
}

/// The city's budget simulator
pub trait BudgetSimulator {
    /// Look up a department's budget
    ///
    /// Cities do not have every department, so `None` is an ordinary answer.
    fn department_budget(&mut self, department: DepartmentId) -> Option<&mut dyn DepartmentBudget>;
}

/// Handle to the active city's budget simulator
pub type SimulatorHandle = Rc<RefCell<dyn BudgetSimulator>>;
