use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::format::{format_currency, format_number, MISSING};
use crate::upstream::{endpoints, settle_all, Payload, UpstreamClient};

/// The four independent calls behind the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Stats,
    PendingDrivers,
    Drivers,
    Bookings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatTile {
    pub label: &'static str,
    pub value: String,
    pub subtext: String,
    pub accent: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub stats: Value,
    pub stat_tiles: Vec<StatTile>,
    pub pending_drivers: Vec<Value>,
    pub drivers: Vec<Value>,
    pub bookings: Vec<Value>,
    pub driver_cancellations: Vec<Value>,
    pub users_metrics: Value,
    pub drivers_metrics: Value,
    pub trips_metrics: Value,
    pub revenue_metrics: Value,
    pub recent_activity: Vec<Value>,
    pub popular_locations: Vec<Value>,
    pub timestamp: Option<Value>,
}

/// Result of loading the dashboard. `degraded` is set when not a single
/// slice could be loaded and the page shows placeholder tiles only.
#[derive(Debug, Clone)]
pub struct DashboardLoad {
    pub view: DashboardView,
    pub degraded: bool,
}

pub struct DashboardService<'a> {
    client: &'a UpstreamClient,
}

impl<'a> DashboardService<'a> {
    pub fn new(client: &'a UpstreamClient) -> Self {
        Self { client }
    }

    /// Fetch stats, pending drivers, all drivers and bookings concurrently.
    /// Each failed call empties only its own part of the page.
    pub async fn load(&self, token: Option<&str>) -> DashboardLoad {
        let requests = vec![
            (Slice::Stats, endpoints::dashboard_stats().bearer(token)),
            (Slice::PendingDrivers, endpoints::pending_drivers().bearer(token)),
            (Slice::Drivers, endpoints::all_drivers().bearer(token)),
            (Slice::Bookings, endpoints::bookings().bearer(token)),
        ];

        let mut stats = Payload::default();
        let mut pending = Payload::default();
        let mut drivers = Payload::default();
        let mut bookings = Payload::default();
        let mut failures = 0;

        for settled in settle_all(self.client, requests).await {
            if settled.result.is_err() {
                failures += 1;
            }
            let key = settled.key;
            let payload = settled.or_empty();
            match key {
                Slice::Stats => stats = payload,
                Slice::PendingDrivers => pending = payload,
                Slice::Drivers => drivers = payload,
                Slice::Bookings => bookings = payload,
            }
        }

        if failures == 4 {
            tracing::error!("every dashboard slice failed, showing placeholders");
            return DashboardLoad {
                view: fallback_view(),
                degraded: true,
            };
        }

        DashboardLoad {
            view: build_view(&stats, &pending, &drivers, &bookings),
            degraded: false,
        }
    }
}

/// Derive the dashboard view-model from the four (possibly empty) payloads.
pub fn build_view(
    stats: &Payload,
    pending: &Payload,
    drivers: &Payload,
    bookings: &Payload,
) -> DashboardView {
    let data = stats.data();
    let overview = data.section("overview");
    let users_metrics = data.section("users");
    let drivers_metrics = data.section("drivers");
    let trips_metrics = data.section("trips");
    let revenue_metrics = data.section("revenue");
    let recent_activity = data.list("recentActivity").to_vec();

    let stat_tiles = vec![
        StatTile {
            label: "Total trips",
            value: format_number(overview.get("totalTrips")),
            subtext: format!("Active trips: {}", format_number(overview.get("activeTrips"))),
            accent: "red",
        },
        StatTile {
            label: "Revenue",
            value: format_currency(overview.get("totalRevenue")),
            subtext: format!("Today: {}", format_currency(revenue_metrics.get("today"))),
            accent: "green",
        },
        StatTile {
            label: "Drivers",
            value: format_number(overview.get("totalDrivers")),
            subtext: format!("{} online", format_number(drivers_metrics.get("online"))),
            accent: "blue",
        },
        StatTile {
            label: "Pending approvals",
            value: format_number(overview.get("pendingApprovals")),
            subtext: format!("{} documents", format_number(drivers_metrics.get("pending"))),
            accent: "orange",
        },
    ];

    DashboardView {
        stats: data.to_value(),
        stat_tiles,
        pending_drivers: pending.data_list_or("drivers").to_vec(),
        drivers: sort_by_join_date(drivers.data_list_or("drivers").to_vec()),
        bookings: bookings.data_list_or("bookings").to_vec(),
        driver_cancellations: cancellations(&recent_activity),
        users_metrics: users_metrics.to_value(),
        drivers_metrics: drivers_metrics.to_value(),
        trips_metrics: trips_metrics.to_value(),
        revenue_metrics: revenue_metrics.to_value(),
        recent_activity,
        popular_locations: data.list("popularLocations").to_vec(),
        timestamp: data.get("timestamp").cloned(),
    }
}

/// Placeholder page used when the backend could not be reached at all.
pub fn fallback_view() -> DashboardView {
    let tile = |label, subtext: &str, accent| StatTile {
        label,
        value: MISSING.to_string(),
        subtext: subtext.to_string(),
        accent,
    };

    DashboardView {
        stats: json!({
            "overview": {}, "users": {}, "drivers": {}, "trips": {}, "revenue": {},
            "recentActivity": [], "popularLocations": []
        }),
        stat_tiles: vec![
            tile("Total trips", &format!("Active trips: {}", MISSING), "red"),
            tile("Revenue", &format!("Today: {}", MISSING), "green"),
            tile("Drivers", &format!("{} online", MISSING), "blue"),
            tile("Pending approvals", "Documents pending", "orange"),
        ],
        pending_drivers: Vec::new(),
        drivers: Vec::new(),
        bookings: Vec::new(),
        driver_cancellations: Vec::new(),
        users_metrics: json!({}),
        drivers_metrics: json!({}),
        trips_metrics: json!({}),
        revenue_metrics: json!({}),
        recent_activity: Vec::new(),
        popular_locations: Vec::new(),
        timestamp: None,
    }
}

/// Oldest first by `joinedAt`, then `createdAt`. Drivers with neither, or
/// with an unreadable date, count as the epoch and keep their order.
pub fn sort_by_join_date(mut drivers: Vec<Value>) -> Vec<Value> {
    drivers.sort_by_key(join_millis);
    drivers
}

fn join_millis(driver: &Value) -> i64 {
    ["joinedAt", "createdAt"]
        .iter()
        .filter_map(|key| driver.get(*key))
        .find(|v| crate::upstream::payload::is_truthy(v))
        .and_then(timestamp_millis)
        .unwrap_or(0)
}

/// Milliseconds since the epoch for an RFC 3339 timestamp, a bare
/// `YYYY-MM-DD` date (UTC midnight), a zone-less date-time (read as UTC) or
/// a number of milliseconds.
pub fn timestamp_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.timestamp_millis());
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(dt.and_utc().timestamp_millis());
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc().timestamp_millis())
        }
        _ => None,
    }
}

/// Recent-activity events describing a cancelled ride.
pub fn cancellations(events: &[Value]) -> Vec<Value> {
    events
        .iter()
        .filter(|event| {
            let kind = event.get("type").and_then(Value::as_str).unwrap_or("");
            let status = event.get("status").and_then(Value::as_str).unwrap_or("");
            kind.to_lowercase().contains("cancel") || status.eq_ignore_ascii_case("CANCELLED")
        })
        .cloned()
        .collect()
}
