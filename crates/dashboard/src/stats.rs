//! Overview stat cards.

use serde::Serialize;

/// One card on the dashboard's top row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    /// Pre-formatted display value, exactly as rendered.
    pub value: &'static str,
    pub subtext: &'static str,
}

/// The four overview cards, in render order.
pub fn overview_stats() -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Total Collections",
            value: "2",
            subtext: "+0 today",
        },
        StatCard {
            title: "Inventory Value",
            value: "₹44",
            subtext: "Estimated value",
        },
        StatCard {
            title: "Total Sales",
            value: "₹55,345",
            subtext: "From all recorded sales",
        },
        StatCard {
            title: "Total Expenses",
            value: "₹1,000",
            subtext: "All recorded expenses",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_cards_in_render_order() {
        let cards = overview_stats();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].title, "Total Collections");
        assert_eq!(cards[2].value, "₹55,345");
    }

    #[test]
    fn cards_serialize_for_the_renderer() {
        let json = serde_json::to_value(overview_stats()).unwrap();
        assert_eq!(json[1]["title"], "Inventory Value");
        assert_eq!(json[1]["value"], "₹44");
    }
}
