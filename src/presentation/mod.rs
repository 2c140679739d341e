//! View models and renderers for the two dashboard pages.
//!
//! The aggregator produces plain data; this module arranges it into the
//! overview and route explorer pages, renders them as text and exports the
//! route map as GeoJSON.

pub mod map;
pub mod render;
pub mod views;

pub use map::{MapOverlay, PALETTE, Polyline, StopMarker};
pub use render::{DashboardRenderer, TextRenderer};
pub use views::{ChartBar, OverviewView, RouteExplorerView, TOP_ROUTES};
