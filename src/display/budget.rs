//! Budget display formatting
//!
//! Formats budget snapshots, the category table and host dialogs for
//! terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::host::Dialog;
use crate::models::{BudgetCategory, EXEMPLAR_TYPE};
use crate::services::category_purposes;
use crate::storage::BudgetSnapshot;

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Purpose")]
    purpose: String,
    #[tabled(rename = "Occupant")]
    occupant: String,
    #[tabled(rename = "Building Type")]
    building_type: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Installed")]
    installed: &'static str,
}

#[derive(Tabled)]
struct LineItemRow {
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Building Type")]
    building_type: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Monthly Expense")]
    monthly_expense: i64,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Purpose")]
    purpose: String,
    #[tabled(rename = "Covers")]
    label: &'static str,
}

/// Format a budget snapshot as an item table and a line item table
pub fn format_budget(snapshot: &BudgetSnapshot) -> String {
    if snapshot.departments.is_empty() {
        return "No budget departments found.".to_string();
    }

    let mut items = Vec::new();
    let mut line_items = Vec::new();

    for department in &snapshot.departments {
        let department_name = if department.name.is_empty() {
            department.id.to_string()
        } else {
            department.name.clone()
        };

        for purpose in &department.purposes {
            for item in &purpose.items {
                items.push(ItemRow {
                    department: department_name.clone(),
                    purpose: purpose.id.to_string(),
                    occupant: item.occupant_id.to_string(),
                    building_type: item
                        .building_type()
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    name: item.name.clone(),
                    installed: if item.has_property(EXEMPLAR_TYPE) { "yes" } else { "no" },
                });
            }
        }

        for line_item in &department.line_items {
            line_items.push(LineItemRow {
                department: department_name.clone(),
                building_type: line_item.building_type.to_string(),
                name: line_item.name.clone(),
                monthly_expense: line_item.monthly_expense,
            });
        }
    }

    let mut output = String::new();

    output.push_str("Locally Funded Items:\n");
    if items.is_empty() {
        output.push_str("  (none)\n");
    } else {
        output.push_str(&Table::new(items).with(Style::modern()).to_string());
        output.push('\n');
    }

    output.push_str("\nLine Items:\n");
    if line_items.is_empty() {
        output.push_str("  (none)\n");
    } else {
        output.push_str(&Table::new(line_items).with(Style::modern()).to_string());
        output.push('\n');
    }

    output
}

/// Format every category with the department/purpose pairs it covers
pub fn format_category_table() -> String {
    let rows: Vec<CategoryRow> = BudgetCategory::ALL
        .into_iter()
        .flat_map(|category| {
            category_purposes(category).iter().map(move |pair| CategoryRow {
                category: category.name(),
                department: pair.department.to_string(),
                purpose: pair.purpose.to_string(),
                label: pair.label,
            })
        })
        .collect();

    Table::new(rows).with(Style::modern()).to_string()
}

/// Format a dialog the way the host would title it
pub fn format_dialog(dialog: &Dialog) -> String {
    format!("[{}] {}", dialog.caption, dialog.message)
}
