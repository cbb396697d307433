//! Recent sales list.

use serde::Serialize;

/// One entry in the dashboard's recent-sales panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentSale {
    pub customer: &'static str,
    pub description: &'static str,
    /// Rupees; formatted at render time with [`crate::format_inr`].
    pub amount: i64,
}

pub fn recent_sales() -> Vec<RecentSale> {
    vec![
        RecentSale {
            customer: "MALAPPURAM",
            description: "4520 units of cardboard",
            amount: 45_220,
        },
        RecentSale {
            customer: "asap cement",
            description: "10 units of metal",
            amount: 10_000,
        },
        RecentSale {
            customer: "Yy",
            description: "12554 units of other",
            amount: 125,
        },
    ]
}
