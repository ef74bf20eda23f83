//! Core data models for phantom-budget
//!
//! This module contains the identifiers, budget categories, budget entries
//! and the host list used to enumerate them.

pub mod category;
pub mod ids;
pub mod item;
pub mod list;

pub use category::{BudgetCategory, DepartmentPurpose};
pub use ids::{
    BuildingType, CheatId, DepartmentId, DirectorId, MessageId, OccupantId, PropertyId, PurposeId,
};
pub use item::{ItemRef, LineItem, LocallyFundedItem, EXEMPLAR_TYPE};
pub use list::{
    HostList, ListElement, ListError, ListId, ListNode, NodeAllocator, NodeArena, NodeIndex,
    OwnershipKind, TeardownSummary,
};
