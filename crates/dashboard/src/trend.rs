//! Collection trend chart data.

use serde::Serialize;

/// One bar of the collection trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Day label, `dd/mm`.
    pub date: &'static str,
    /// Collected value in lakh rupees.
    pub value: f64,
}

/// The week of collection figures behind the trend chart.
pub fn collection_trend() -> Vec<TrendPoint> {
    vec![
        TrendPoint { date: "29/03", value: 1.2 },
        TrendPoint { date: "30/03", value: 2.1 },
        TrendPoint { date: "31/03", value: 1.8 },
        TrendPoint { date: "01/04", value: 2.8 },
        TrendPoint { date: "02/04", value: 2.4 },
        TrendPoint { date: "03/04", value: 2.0 },
        TrendPoint { date: "04/04", value: 3.2 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_full_week_of_points() {
        let trend = collection_trend();
        assert_eq!(trend.len(), 7);
        assert_eq!(trend.first().unwrap().date, "29/03");
        assert_eq!(trend.last().unwrap().value, 3.2);
    }
}
