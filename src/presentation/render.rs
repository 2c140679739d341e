//! Plain-text rendering of the dashboard views.

use crate::aggregate::RouteOption;
use crate::presentation::views::{OverviewView, RouteExplorerView, TOP_ROUTES};
use anyhow::Result;
use std::io::Write;

const BAR_WIDTH: usize = 40;

/// Something that can show the dashboard pages.
pub trait DashboardRenderer {
    fn overview(&mut self, view: &OverviewView) -> Result<()>;
    fn route_options(&mut self, options: &[RouteOption]) -> Result<()>;
    fn route_explorer(&mut self, view: &RouteExplorerView) -> Result<()>;
}

/// Writes metrics, an ASCII bar chart and tables to any [`Write`].
///
/// The full per-route table and the raw trip table are only written when
/// the renderer is `expanded`.
pub struct TextRenderer<W> {
    out: W,
    expanded: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            expanded: false,
        }
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn metric(&mut self, name: &str, value: impl std::fmt::Display) -> Result<()> {
        writeln!(self.out, "  {name:<22}{value}")?;
        Ok(())
    }
}

impl<W: Write> DashboardRenderer for TextRenderer<W> {
    fn overview(&mut self, view: &OverviewView) -> Result<()> {
        let s = &view.summary;

        writeln!(self.out, "== Overview ==")?;
        self.metric("Total Routes", s.total_routes)?;
        self.metric("Routes in Catalog", s.catalog_routes)?;
        self.metric("Total Trips", s.total_trips)?;
        self.metric("Avg Trips per Route", format!("{:.2}", s.mean_trips_per_route))?;
        if let Some(busiest) = &s.busiest {
            self.metric("Most Trips", format!("Route {} ({} trips)", busiest.route_id, busiest.trips))?;
        }
        if let Some(quietest) = &s.quietest {
            self.metric("Fewest Trips", format!("Route {} ({} trips)", quietest.route_id, quietest.trips))?;
        }
        if let Some(loaded_at) = view.loaded_at {
            self.metric("Data Loaded", loaded_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }

        if self.expanded {
            writeln!(self.out)?;
            writeln!(self.out, "Trip counts per route")?;
            writeln!(self.out, "  {:<12}{:>10}", "route_id", "Trip Count")?;
            for count in &s.route_counts {
                writeln!(self.out, "  {:<12}{:>10}", count.route_id, count.trips)?;
            }
        }

        writeln!(self.out)?;
        writeln!(self.out, "Top {TOP_ROUTES} Routes by Number of Trips")?;
        let label_width = view.top_routes.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
        let max_trips = view.top_routes.iter().map(|b| b.trips).max().unwrap_or(0);
        for bar in &view.top_routes {
            let len = if max_trips == 0 {
                0
            } else {
                (bar.trips * BAR_WIDTH).div_ceil(max_trips)
            };
            writeln!(
                self.out,
                "  {:<width$}  {} {}",
                bar.label,
                "#".repeat(len),
                bar.trips,
                width = label_width
            )?;
        }

        Ok(())
    }

    fn route_options(&mut self, options: &[RouteOption]) -> Result<()> {
        for option in options {
            writeln!(self.out, "  {:<12}{}", option.route_id, option.label)?;
        }
        Ok(())
    }

    fn route_explorer(&mut self, view: &RouteExplorerView) -> Result<()> {
        let s = &view.summary;

        writeln!(self.out, "== Summary for Route: {} ==", view.label)?;
        self.metric("Total Trips", s.total_trips)?;
        self.metric("Unique Shapes", s.unique_shapes)?;
        self.metric("Unique Stops", s.unique_stops)?;
        self.metric("Directionality", s.directionality)?;

        writeln!(self.out)?;
        if view.map.has_shapes() {
            writeln!(self.out, "Route Shape")?;
            for line in &view.map.polylines {
                writeln!(
                    self.out,
                    "  {:<16}{:<10}{} points",
                    line.shape_id,
                    line.color,
                    line.points.len()
                )?;
            }
            if let Some((lat, lon)) = view.map.center {
                writeln!(self.out, "  center {lat:.5}, {lon:.5}")?;
            }
            writeln!(self.out, "  {} stops", view.map.markers.len())?;
        } else {
            writeln!(self.out, "No shapes found for this route.")?;
        }

        writeln!(self.out)?;
        writeln!(self.out, "Trips by Shape ID")?;
        writeln!(self.out, "  {:<16}{:>10}", "Shape ID", "Trip Count")?;
        for count in &view.shape_counts {
            writeln!(self.out, "  {:<16}{:>10}", count.label(), count.trips)?;
        }

        if !view.shape_groups.is_empty() {
            writeln!(self.out)?;
            writeln!(self.out, "Trips by Shape and Direction")?;
            writeln!(self.out, "  {:<16}{:<10}{:>10}", "Shape ID", "Direction", "Trip Count")?;
            for group in &view.shape_groups {
                let direction = group.direction_id.map(|d| u8::from(d).to_string()).unwrap_or_default();
                writeln!(self.out, "  {:<16}{:<10}{:>10}", group.shape_id, direction, group.trips)?;
            }
        }

        if self.expanded {
            writeln!(self.out)?;
            writeln!(self.out, "Trip details")?;
            writeln!(
                self.out,
                "  {:<20}{:<10}{:<16}{:<10}{}",
                "trip_id", "route_id", "shape_id", "direction", "headsign"
            )?;
            for trip in &view.trips {
                writeln!(
                    self.out,
                    "  {:<20}{:<10}{:<16}{:<10}{}",
                    trip.trip_id,
                    trip.route_id,
                    trip.shape_id.as_deref().unwrap_or(""),
                    trip.direction_id.map(|d| u8::from(d).to_string()).unwrap_or_default(),
                    trip.trip_headsign.as_deref().unwrap_or("")
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Directionality, RouteSummary, ShapeDirectionGroup, ShapeTripCount};
    use crate::models::{Direction, Route, Trip};
    use crate::presentation::map::MapOverlay;
    use chrono::{TimeZone, Utc};

    fn overview_view() -> OverviewView {
        let routes = vec![Route::new("5", Some("5"), Some("Hataitai")), Route::new("7", Some("7"), Some("Kingston"))];
        let trips = vec![
            Trip::new("t1", "5", None, None),
            Trip::new("t2", "5", None, None),
            Trip::new("t3", "7", None, None),
        ];
        OverviewView::build(&routes, &trips)
    }

    fn render_overview(view: &OverviewView, expanded: bool) -> String {
        let mut renderer = TextRenderer::new(Vec::new()).expanded(expanded);
        renderer.overview(view).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    fn render_explorer(view: &RouteExplorerView, expanded: bool) -> String {
        let mut renderer = TextRenderer::new(Vec::new()).expanded(expanded);
        renderer.route_explorer(view).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    fn explorer_view() -> RouteExplorerView {
        RouteExplorerView {
            label: "14 – Wilton".to_string(),
            summary: RouteSummary {
                route_id: "14".to_string(),
                total_trips: 1,
                unique_shapes: 0,
                unique_stops: 0,
                directionality: Directionality::OneWay,
            },
            shape_counts: vec![ShapeTripCount {
                shape_id: None,
                trips: 1,
            }],
            shape_groups: vec![],
            map: MapOverlay::default(),
            trips: vec![Trip::new("t9", "14", None, None)],
        }
    }

    #[test]
    fn test_overview_metrics_and_chart() {
        let text = render_overview(&overview_view(), false);
        assert!(text.contains("Avg Trips per Route   1.50"));
        assert!(text.contains("Most Trips            Route 5 (2 trips)"));
        assert!(text.contains("5 - Hataitai  ######################################## 2"));
        assert!(text.contains("7 - Kingston  #################### 1"));
        assert!(!text.contains("Trip counts per route"));
        assert!(!text.contains("Data Loaded"));
    }

    #[test]
    fn test_overview_expanded_table() {
        let text = render_overview(&overview_view(), true);
        assert!(text.contains("Trip counts per route"));
    }

    #[test]
    fn test_overview_shows_load_time() {
        let loaded_at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let text = render_overview(&overview_view().loaded_at(loaded_at), false);
        assert!(text.contains("Data Loaded           2024-03-01 08:30:00 UTC"));
    }

    #[test]
    fn test_explorer_without_shapes() {
        let text = render_explorer(&explorer_view(), false);

        assert!(text.contains("== Summary for Route: 14 – Wilton =="));
        assert!(text.contains("Directionality        One-way"));
        assert!(text.contains("No shapes found for this route."));
        assert!(text.contains("No Shape"));
        assert!(!text.contains("Trips by Shape and Direction"));
        assert!(!text.contains("t9"));
    }

    #[test]
    fn test_explorer_shape_direction_table() {
        let mut view = explorer_view();
        view.shape_groups = vec![
            ShapeDirectionGroup {
                shape_id: "s1".to_string(),
                direction_id: Some(Direction::Outbound),
                trips: 3,
            },
            ShapeDirectionGroup {
                shape_id: "s1".to_string(),
                direction_id: Some(Direction::Inbound),
                trips: 2,
            },
            ShapeDirectionGroup {
                shape_id: "s2".to_string(),
                direction_id: None,
                trips: 1,
            },
        ];

        let text = render_explorer(&view, false);
        assert!(text.contains("Trips by Shape and Direction"));
        assert!(text.contains("  s1              0                  3"));
        assert!(text.contains("  s1              1                  2"));
        assert!(text.contains("  s2                                 1"));
    }

    #[test]
    fn test_explorer_expanded_lists_trips() {
        let text = render_explorer(&explorer_view(), true);
        assert!(text.contains("t9"));
    }
}
