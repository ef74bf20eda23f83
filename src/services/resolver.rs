//! Category resolver
//!
//! Expands a budget category name into the department/purpose pairs the
//! budget simulator stores its items under. Education and Health each
//! cover two departments: one for staff and one for coverage.

use crate::models::{BudgetCategory, DepartmentPurpose};

pub const FIRE: DepartmentPurpose = DepartmentPurpose::new(0x28F5_5A9F, 0xEA56_7BC3, "Fire");
pub const POLICE: DepartmentPurpose = DepartmentPurpose::new(0xA296_3983, 0x0A56_7BAA, "Police");
pub const JAIL: DepartmentPurpose = DepartmentPurpose::new(0xA296_3984, 0xEA56_768A, "Jail");
pub const POWER: DepartmentPurpose = DepartmentPurpose::new(0x8910_BC8A, 0xCA58_E540, "Power");
pub const EDUCATION_STAFF: DepartmentPurpose =
    DepartmentPurpose::new(0x0918_8F4C, 0xEA56_54B6, "Staff");
pub const EDUCATION_COVERAGE: DepartmentPurpose =
    DepartmentPurpose::new(0x4A53_8CC6, 0x4A56_54BA, "Coverage");
pub const HEALTH_STAFF: DepartmentPurpose =
    DepartmentPurpose::new(0x0918_8F42, 0xCA56_5486, "Staff");
pub const HEALTH_COVERAGE: DepartmentPurpose =
    DepartmentPurpose::new(0xAA53_8CB3, 0xEA56_549E, "Coverage");

/// The department/purpose pairs a category covers
pub fn category_purposes(category: BudgetCategory) -> &'static [DepartmentPurpose] {
    match category {
        BudgetCategory::Fire => &[FIRE],
        BudgetCategory::Police => &[POLICE],
        BudgetCategory::Jail => &[JAIL],
        BudgetCategory::Power => &[POWER],
        BudgetCategory::Education => &[EDUCATION_STAFF, EDUCATION_COVERAGE],
        BudgetCategory::Health => &[HEALTH_STAFF, HEALTH_COVERAGE],
    }
}

/// Resolve a category name, ignoring ASCII case
///
/// Unknown names resolve to an empty list.
pub fn resolve(name: &str) -> Vec<DepartmentPurpose> {
    BudgetCategory::from_name(name)
        .map(|category| category_purposes(category).to_vec())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DepartmentId, PurposeId};

    #[test]
    fn test_single_purpose_categories() {
        for (name, expected) in [("Fire", FIRE), ("Police", POLICE), ("Jail", JAIL), ("Power", POWER)] {
            assert_eq!(resolve(name), vec![expected], "{}", name);
        }
    }

    #[test]
    fn test_fire_table_values() {
        let pairs = resolve("fire");
        assert_eq!(pairs[0].department, DepartmentId::new(0x28F55A9F));
        assert_eq!(pairs[0].purpose, PurposeId::new(0xEA567BC3));
    }

    #[test]
    fn test_two_purpose_categories() {
        assert_eq!(resolve("Education"), vec![EDUCATION_STAFF, EDUCATION_COVERAGE]);
        assert_eq!(resolve("Health"), vec![HEALTH_STAFF, HEALTH_COVERAGE]);
        assert_ne!(EDUCATION_STAFF.department, EDUCATION_COVERAGE.department);
    }

    #[test]
    fn test_any_case_mixture_resolves() {
        for category in BudgetCategory::ALL {
            let name = category.name();
            let upper = name.to_ascii_uppercase();
            let lower = name.to_ascii_lowercase();
            let mixed: String = name
                .chars()
                .enumerate()
                .map(|(i, c)| if i % 2 == 0 { c.to_ascii_lowercase() } else { c.to_ascii_uppercase() })
                .collect();

            let expected = category_purposes(category).to_vec();
            assert_eq!(resolve(&upper), expected);
            assert_eq!(resolve(&lower), expected);
            assert_eq!(resolve(&mixed), expected);
        }
    }

    #[test]
    fn test_unknown_names_resolve_to_nothing() {
        for name in ["Atomic", "", "Fir", "Educ", "Fire Dept", "Health Staff", "water"] {
            assert!(resolve(name).is_empty(), "{}", name);
        }
    }
}
