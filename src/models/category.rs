//! Budget categories
//!
//! A budget category is what the operator names on the command line. Each
//! one maps to the department/purpose pairs the budget simulator tracks.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{DepartmentId, PurposeId};

/// The budget categories the command understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Fire,
    Police,
    Jail,
    Power,
    Education,
    Health,
}

impl BudgetCategory {
    /// Every category, in the order the usage message lists them
    pub const ALL: [BudgetCategory; 6] = [
        BudgetCategory::Fire,
        BudgetCategory::Police,
        BudgetCategory::Jail,
        BudgetCategory::Power,
        BudgetCategory::Education,
        BudgetCategory::Health,
    ];

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Police => "Police",
            Self::Jail => "Jail",
            Self::Power => "Power",
            Self::Education => "Education",
            Self::Health => "Health",
        }
    }

    /// Look up a category by name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A department and the purpose within it that a category covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepartmentPurpose {
    pub department: DepartmentId,
    pub purpose: PurposeId,
    /// Short label such as "Staff" or "Coverage"
    pub label: &'static str,
}

impl DepartmentPurpose {
    pub const fn new(department: u32, purpose: u32, label: &'static str) -> Self {
        Self {
            department: DepartmentId::new(department),
            purpose: PurposeId::new(purpose),
            label,
        }
    }
}

impl fmt::Display for DepartmentPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} ({})", self.department, self.purpose, self.label)
    }
}
