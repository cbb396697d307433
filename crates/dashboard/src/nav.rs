//! Sidebar navigation.

use serde::Serialize;

pub const BRAND: &str = "Malabar Eco";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Stable identifier used as the active-tab key.
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSection {
    /// Section heading; the first section renders without one.
    pub title: Option<&'static str>,
    pub items: Vec<NavItem>,
}

/// The sidebar, top to bottom.
pub fn sidebar() -> Vec<NavSection> {
    vec![
        NavSection {
            title: None,
            items: vec![
                NavItem { id: "dashboard", label: "Dashboard" },
                NavItem { id: "locations", label: "Locations" },
                NavItem { id: "collections", label: "Collections" },
                NavItem { id: "inventory", label: "Inventory" },
                NavItem { id: "sales", label: "Sales" },
                NavItem { id: "expenses", label: "Expenses" },
                NavItem { id: "reports", label: "Reports" },
            ],
        },
        NavSection {
            title: Some("TRANSPORT"),
            items: vec![
                NavItem { id: "vehicles", label: "Vehicles" },
                NavItem { id: "drivers", label: "Drivers" },
                NavItem { id: "trips", label: "Trips" },
                NavItem { id: "token", label: "Token Lookup" },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_section_then_transport() {
        let sections = sidebar();
        assert_eq!(sections.len(), 2);
        assert!(sections[0].title.is_none());
        assert_eq!(sections[0].items.len(), 7);
        assert_eq!(sections[1].title, Some("TRANSPORT"));
        assert_eq!(sections[1].items.len(), 4);
    }

    #[test]
    fn item_ids_are_unique() {
        let mut ids: Vec<_> = sidebar()
            .iter()
            .flat_map(|s| s.items.iter().map(|i| i.id))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
