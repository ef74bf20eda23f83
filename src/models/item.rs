//! Locally funded items and line items
//!
//! A locally funded item is the budget department's record of one building
//! that contributes to a purpose. Line items are the separate per-building
//! type entries the budget window shows next to them.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::ids::{BuildingType, OccupantId, PropertyId};

/// Property present on every exemplar whose plugin file is still installed
pub const EXEMPLAR_TYPE: PropertyId = PropertyId::new(0x0000_0010);

/// Shared handle to a locally funded item
///
/// The host counts references to its property holders; the same item can
/// sit in two departments' lists at once.
pub type ItemRef = Rc<LocallyFundedItem>;

/// One building's entry in a department's locally funded list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocallyFundedItem {
    /// Host occupant this entry belongs to
    pub occupant_id: OccupantId,

    /// Display name of the building
    #[serde(default)]
    pub name: String,

    /// Building type, when the property holder is a building occupant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_type: Option<BuildingType>,

    /// Exemplar properties carried by the entry
    #[serde(default)]
    pub properties: BTreeSet<PropertyId>,
}

impl LocallyFundedItem {
    /// Create an entry for a building occupant with no properties
    pub fn new(occupant_id: OccupantId, building_type: BuildingType) -> Self {
        Self {
            occupant_id,
            name: String::new(),
            building_type: Some(building_type),
            properties: BTreeSet::new(),
        }
    }

    /// Create an entry whose exemplar is still installed
    pub fn installed(occupant_id: OccupantId, building_type: BuildingType) -> Self {
        Self::new(occupant_id, building_type).with_property(EXEMPLAR_TYPE)
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a property
    pub fn with_property(mut self, property: PropertyId) -> Self {
        self.properties.insert(property);
        self
    }

    /// Check whether the entry carries a property
    pub fn has_property(&self, property: PropertyId) -> bool {
        self.properties.contains(&property)
    }

    /// Whether the backing exemplar is still installed
    pub fn is_installed(&self) -> bool {
        self.has_property(EXEMPLAR_TYPE)
    }

    /// Resolve the entry to its building type
    ///
    /// Returns `None` when the property holder is not a building occupant.
    pub fn building_type(&self) -> Option<BuildingType> {
        self.building_type
    }
}

impl fmt::Display for LocallyFundedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "occupant {}", self.occupant_id)
        } else {
            write!(f, "{} ({})", self.name, self.occupant_id)
        }
    }
}

/// Budget line item keyed by building type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Building type the line item is keyed by
    pub building_type: BuildingType,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Monthly expense in simoleons
    #[serde(default)]
    pub monthly_expense: i64,
}

impl LineItem {
    /// Create a line item
    pub fn new(building_type: BuildingType, name: impl Into<String>, monthly_expense: i64) -> Self {
        Self {
            building_type,
            name: name.into(),
            monthly_expense,
        }
    }
}
