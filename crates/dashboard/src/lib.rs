//! Dashboard content for the Malabar Eco operations views.
//!
//! Everything in this crate is presentational: stat cards, the collection
//! trend series, the recent-sales list, and the sidebar navigation, all
//! carrying the sample figures the dashboard currently renders. There is no
//! pipeline, persistence, or failure handling here; the renderer takes
//! these view models as-is.

pub mod currency;
pub mod nav;
pub mod sales;
pub mod stats;
pub mod trend;

pub use currency::format_inr;
pub use nav::{BRAND, NavItem, NavSection, sidebar};
pub use sales::{RecentSale, recent_sales};
pub use stats::{StatCard, overview_stats};
pub use trend::{TrendPoint, collection_trend};
