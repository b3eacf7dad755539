// ── Mock reference data ──
//
// The hard-coded Sunshine Rides fleet: western-Colorado vans, sedans and
// accessible vehicles, their drivers, recent trips, service history and
// the rider/support views. Timestamps are offsets from a supplied `now`.

use chrono::{DateTime, Duration, Utc};

use crate::model::{
    Alert, AlertId, AlertKind, AlertSeverity, Driver, DriverId, DriverStatus, FuelRecord,
    Location, MaintenanceId, MaintenanceKind, MaintenanceRecord, MaintenanceStatus, Ride,
    RideDriver, RideId, RideStatus, SupportMetrics, SupportTicket, TicketId, TicketPriority,
    TicketStats, TicketStatus, Trip, TripId, TripStatus, Utilization, Vehicle, VehicleId,
    VehicleKind, VehicleStatus,
};

/// Everything a mounted fleet view starts from.
#[derive(Debug, Clone)]
pub struct FleetSeed {
    pub drivers: Vec<Driver>,
    pub vehicles: Vec<Vehicle>,
    pub alerts: Vec<Alert>,
    pub trips: Vec<Trip>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub fuel_history: Vec<FuelRecord>,
    pub utilization: Vec<Utilization>,
    pub active_ride: Ride,
    pub recent_rides: Vec<Ride>,
    pub tickets: Vec<SupportTicket>,
    pub support_metrics: SupportMetrics,
}

impl FleetSeed {
    /// The Sunshine Rides demo fleet, stamped relative to `now`.
    pub fn sunshine(now: DateTime<Utc>) -> Self {
        let drivers = drivers();
        let vehicles = vehicles(&drivers, now);
        Self {
            alerts: alerts(now),
            trips: trips(now),
            maintenance: maintenance(now),
            fuel_history: fuel_history(),
            utilization: utilization(),
            active_ride: active_ride(),
            recent_rides: recent_rides(),
            tickets: tickets(),
            support_metrics: support_metrics(),
            drivers,
            vehicles,
        }
    }

    /// An empty fleet, handy for edge-case tests.
    pub fn empty() -> Self {
        Self {
            drivers: Vec::new(),
            vehicles: Vec::new(),
            alerts: Vec::new(),
            trips: Vec::new(),
            maintenance: Vec::new(),
            fuel_history: Vec::new(),
            utilization: Vec::new(),
            active_ride: active_ride(),
            recent_rides: Vec::new(),
            tickets: Vec::new(),
            support_metrics: support_metrics(),
        }
    }
}

// ── Drivers ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn driver(
    n: u8,
    name: &str,
    phone: &str,
    license: &str,
    status: DriverStatus,
    rating: f64,
    total_trips: u32,
    safety_score: u8,
) -> Driver {
    Driver {
        id: DriverId::new(format!("driver-{n}")),
        name: name.into(),
        phone: phone.into(),
        license: license.into(),
        status,
        rating,
        total_trips,
        safety_score,
    }
}

#[rustfmt::skip]
fn drivers() -> Vec<Driver> {
    vec![
        driver(1, "Maria Garcia",    "(970) 555-1234", "CDL-B",   DriverStatus::OnTrip,    4.9, 456, 98),
        driver(2, "James Wilson",    "(970) 555-2345", "CDL-B",   DriverStatus::OnTrip,    4.8, 342, 96),
        driver(3, "Sarah Chen",      "(970) 555-3456", "CDL-B",   DriverStatus::OnTrip,    4.9, 521, 99),
        driver(4, "Michael Brown",   "(970) 555-4567", "CDL-B",   DriverStatus::OnTrip,    4.7, 289, 94),
        driver(5, "Emily Rodriguez", "(970) 555-5678", "CDL-B",   DriverStatus::OnTrip,    4.8, 378, 97),
        driver(6, "David Nguyen",    "(970) 555-6789", "Class C", DriverStatus::Available, 4.6, 178, 92),
        driver(7, "Lisa Thompson",   "(970) 555-7890", "CDL-B",   DriverStatus::Available, 4.5, 234, 91),
        driver(8, "Carlos Martinez", "(970) 555-8901", "CDL-B",   DriverStatus::OffDuty,   4.7, 412, 95),
    ]
}

// ── Vehicles ────────────────────────────────────────────────────────

struct VehicleSpec<'a> {
    n: u8,
    name: &'a str,
    kind: VehicleKind,
    status: VehicleStatus,
    driver: Option<usize>,
    at: (f64, f64, &'a str),
    fuel: f64,
    odometer: u32,
    speed: f64,
    stale: bool,
}

#[rustfmt::skip]
fn vehicles(drivers: &[Driver], now: DateTime<Utc>) -> Vec<Vehicle> {
    let specs = [
        VehicleSpec { n: 1, name: "Sunshine Van 01", kind: VehicleKind::Van, status: VehicleStatus::Active, driver: Some(0), at: (39.0639, -108.5506, "Grand Junction, CO"), fuel: 78.0, odometer: 45_230, speed: 55.0, stale: false },
        VehicleSpec { n: 2, name: "Sunshine Van 02", kind: VehicleKind::Van, status: VehicleStatus::Active, driver: Some(1), at: (38.4783, -107.8762, "Montrose, CO"), fuel: 62.0, odometer: 32_100, speed: 45.0, stale: false },
        VehicleSpec { n: 3, name: "Sunshine Van 03", kind: VehicleKind::Van, status: VehicleStatus::Active, driver: Some(2), at: (37.9375, -107.8123, "Telluride, CO"), fuel: 85.0, odometer: 28_750, speed: 35.0, stale: false },
        VehicleSpec { n: 4, name: "Sunshine Van 04", kind: VehicleKind::Van, status: VehicleStatus::Active, driver: Some(3), at: (39.6403, -106.3742, "Vail, CO"), fuel: 45.0, odometer: 52_300, speed: 60.0, stale: false },
        VehicleSpec { n: 5, name: "Sunshine Sedan 01", kind: VehicleKind::Sedan, status: VehicleStatus::Maintenance, driver: None, at: (39.7392, -104.9903, "Denver Service Center"), fuel: 35.0, odometer: 67_200, speed: 0.0, stale: true },
        VehicleSpec { n: 6, name: "Sunshine Sedan 02", kind: VehicleKind::Sedan, status: VehicleStatus::Idle, driver: Some(5), at: (39.1911, -106.8175, "Aspen Depot"), fuel: 92.0, odometer: 18_500, speed: 0.0, stale: false },
        VehicleSpec { n: 7, name: "Sunshine Accessible 01", kind: VehicleKind::Accessible, status: VehicleStatus::Active, driver: Some(4), at: (39.0639, -108.5506, "Grand Junction, CO"), fuel: 68.0, odometer: 38_900, speed: 42.0, stale: false },
        VehicleSpec { n: 8, name: "Sunshine Accessible 02", kind: VehicleKind::Accessible, status: VehicleStatus::Idle, driver: Some(6), at: (39.7392, -104.9903, "Denver Hub"), fuel: 55.0, odometer: 24_600, speed: 0.0, stale: false },
    ];

    specs
        .into_iter()
        .map(|s| Vehicle {
            id: VehicleId::new(format!("vehicle-{}", s.n)),
            name: s.name.into(),
            kind: s.kind,
            license_plate: format!("CO-SUN-{:03}", s.n),
            status: s.status,
            driver: s.driver.and_then(|i| drivers.get(i)).map(Driver::to_ref),
            location: Location {
                lat: s.at.0,
                lng: s.at.1,
                address: s.at.2.into(),
            },
            fuel_level: s.fuel,
            odometer: s.odometer,
            speed: s.speed,
            last_update: if s.stale { now - Duration::days(1) } else { now },
        })
        .collect()
}

// ── Alerts ──────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn alert(
    n: u8,
    vehicle: u8,
    vehicle_name: &str,
    kind: AlertKind,
    message: &str,
    at: DateTime<Utc>,
    severity: AlertSeverity,
    acknowledged: bool,
) -> Alert {
    Alert {
        id: AlertId::new(format!("alert-{n}")),
        vehicle_id: VehicleId::new(format!("vehicle-{vehicle}")),
        vehicle_name: vehicle_name.into(),
        kind,
        message: message.into(),
        timestamp: at,
        severity,
        acknowledged,
    }
}

#[rustfmt::skip]
fn alerts(now: DateTime<Utc>) -> Vec<Alert> {
    vec![
        alert(1, 4, "Sunshine Van 04", AlertKind::Speeding, "Vehicle exceeded 65 mph on I-70 mountain corridor", now - Duration::minutes(30), AlertSeverity::Medium, false),
        alert(2, 5, "Sunshine Sedan 01", AlertKind::Maintenance, "Overdue for transmission service", now - Duration::days(1), AlertSeverity::High, false),
        alert(3, 2, "Sunshine Van 02", AlertKind::FuelLow, "Fuel level at 45% - recommend refuel in Montrose", now - Duration::hours(1), AlertSeverity::Medium, false),
        alert(4, 3, "Sunshine Van 03", AlertKind::Geofence, "Entering Telluride mountain zone", now - Duration::hours(2), AlertSeverity::Low, true),
        alert(5, 1, "Sunshine Van 01", AlertKind::HarshBraking, "Harsh braking event on Highway 145", now - Duration::minutes(15), AlertSeverity::Low, false),
        alert(6, 8, "Sunshine Accessible 02", AlertKind::Maintenance, "Wheelchair lift inspection overdue", now - Duration::days(3), AlertSeverity::High, false),
    ]
}

// ── Trips ───────────────────────────────────────────────────────────

struct TripSpec<'a> {
    n: u8,
    vehicle: (u8, &'a str),
    driver: (u8, &'a str),
    from: &'a str,
    to: &'a str,
    started_mins_ago: i64,
    ended_mins_ago: Option<i64>,
    distance: f64,
    fuel_used: f64,
    status: TripStatus,
}

#[rustfmt::skip]
fn trips(now: DateTime<Utc>) -> Vec<Trip> {
    let specs = [
        TripSpec { n: 1, vehicle: (1, "Sunshine Van 01"), driver: (1, "Maria Garcia"), from: "Grand Junction Airport", to: "Telluride Mountain Village", started_mins_ago: 60, ended_mins_ago: None, distance: 124.5, fuel_used: 8.2, status: TripStatus::InProgress },
        TripSpec { n: 2, vehicle: (2, "Sunshine Van 02"), driver: (2, "James Wilson"), from: "Montrose Regional Airport", to: "Black Canyon Resort", started_mins_ago: 120, ended_mins_ago: None, distance: 45.3, fuel_used: 3.8, status: TripStatus::InProgress },
        TripSpec { n: 3, vehicle: (3, "Sunshine Van 03"), driver: (3, "Sarah Chen"), from: "Telluride Ski Resort", to: "Mountain Village Plaza", started_mins_ago: 30, ended_mins_ago: None, distance: 8.1, fuel_used: 0.6, status: TripStatus::InProgress },
        TripSpec { n: 4, vehicle: (4, "Sunshine Van 04"), driver: (4, "Michael Brown"), from: "Vail Village", to: "Denver International Airport", started_mins_ago: 240, ended_mins_ago: Some(180), distance: 115.8, fuel_used: 7.2, status: TripStatus::Completed },
        TripSpec { n: 5, vehicle: (7, "Sunshine Accessible 01"), driver: (5, "Emily Rodriguez"), from: "Grand Junction Medical Center", to: "Mesa County Senior Center", started_mins_ago: 90, ended_mins_ago: None, distance: 12.7, fuel_used: 1.3, status: TripStatus::InProgress },
    ];

    specs
        .into_iter()
        .map(|s| Trip {
            id: TripId::new(format!("trip-{}", s.n)),
            vehicle_id: VehicleId::new(format!("vehicle-{}", s.vehicle.0)),
            vehicle_name: s.vehicle.1.into(),
            driver_id: DriverId::new(format!("driver-{}", s.driver.0)),
            driver_name: s.driver.1.into(),
            start_location: s.from.into(),
            end_location: s.to.into(),
            start_time: now - Duration::minutes(s.started_mins_ago),
            end_time: s.ended_mins_ago.map(|m| now - Duration::minutes(m)),
            distance: s.distance,
            fuel_used: s.fuel_used,
            status: s.status,
        })
        .collect()
}

// ── Maintenance ─────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn maintenance_record(
    n: u8,
    vehicle: u8,
    vehicle_name: &str,
    kind: MaintenanceKind,
    scheduled: DateTime<Utc>,
    status: MaintenanceStatus,
    cost: u32,
    notes: &str,
) -> MaintenanceRecord {
    MaintenanceRecord {
        id: MaintenanceId::new(format!("maint-{n}")),
        vehicle_id: VehicleId::new(format!("vehicle-{vehicle}")),
        vehicle_name: vehicle_name.into(),
        kind,
        scheduled_date: scheduled,
        status,
        cost: Some(cost),
        notes: Some(notes.into()),
    }
}

#[rustfmt::skip]
fn maintenance(now: DateTime<Utc>) -> Vec<MaintenanceRecord> {
    vec![
        maintenance_record(1, 5, "Sunshine Sedan 01", MaintenanceKind::Repair, now - Duration::days(1), MaintenanceStatus::Overdue, 1250, "Transmission service needed"),
        maintenance_record(2, 1, "Sunshine Van 01", MaintenanceKind::OilChange, now + Duration::days(2), MaintenanceStatus::Scheduled, 85, "Regular 5000 mile service"),
        maintenance_record(3, 2, "Sunshine Van 02", MaintenanceKind::TireRotation, now + Duration::days(5), MaintenanceStatus::Scheduled, 60, "Mountain driving wear check"),
        maintenance_record(4, 8, "Sunshine Accessible 02", MaintenanceKind::Inspection, now - Duration::days(3), MaintenanceStatus::Overdue, 150, "Wheelchair lift inspection"),
        maintenance_record(5, 3, "Sunshine Van 03", MaintenanceKind::BrakeService, now + Duration::days(7), MaintenanceStatus::Scheduled, 320, "Mountain brake check"),
        maintenance_record(6, 4, "Sunshine Van 04", MaintenanceKind::OilChange, now - Duration::days(7), MaintenanceStatus::Completed, 65, "Completed on schedule"),
    ]
}

// ── Fuel and utilization ────────────────────────────────────────────

fn fuel_history() -> Vec<FuelRecord> {
    [
        ("Mon", 145.0, 478.5, 18.2),
        ("Tue", 132.0, 435.6, 18.5),
        ("Wed", 158.0, 521.4, 17.9),
        ("Thu", 141.0, 465.3, 18.3),
        ("Fri", 167.0, 551.1, 18.0),
        ("Sat", 98.0, 323.4, 19.7),
        ("Sun", 72.0, 237.6, 20.1),
    ]
    .into_iter()
    .map(|(date, gallons, cost, mpg)| FuelRecord {
        date: date.into(),
        gallons,
        cost,
        mpg,
    })
    .collect()
}

fn utilization() -> Vec<Utilization> {
    [
        ("Sunshine Van 01", 87, 42, 1250),
        ("Sunshine Van 02", 72, 38, 890),
        ("Sunshine Van 03", 81, 45, 1120),
        ("Sunshine Van 04", 78, 36, 1080),
        ("Sunshine Sedan 01", 12, 5, 180),
        ("Sunshine Sedan 02", 65, 28, 420),
        ("Accessible 01", 68, 32, 680),
        ("Accessible 02", 45, 22, 310),
    ]
    .into_iter()
    .map(|(name, utilization, trips, miles)| Utilization {
        name: name.into(),
        utilization,
        trips,
        miles,
    })
    .collect()
}

// ── Rides ───────────────────────────────────────────────────────────

fn active_ride() -> Ride {
    Ride {
        id: RideId::from("RIDE-2847"),
        status: RideStatus::InProgress,
        pickup: "Grand Junction Medical Center".into(),
        dropoff: "1247 Patterson Road, Grand Junction".into(),
        date: "2:30 PM".into(),
        estimated_arrival: Some("2:45 PM".into()),
        eta_minutes: Some(12),
        progress: Some(65),
        fare_cents: 2450,
        driver: Some(RideDriver {
            name: "Marcus Johnson".into(),
            rating: 4.9,
            vehicle_info: "2023 Toyota Sienna - Silver".into(),
            license_plate: "CO-SUN-847".into(),
            phone: "(970) 555-0147".into(),
        }),
    }
}

#[rustfmt::skip]
fn recent_rides() -> Vec<Ride> {
    [
        ("RIDE-2846", "Jan 5, 2026", "Montrose Regional Hospital", "245 S Cascade Ave, Montrose", RideStatus::Completed, 1875),
        ("RIDE-2843", "Jan 4, 2026", "Telluride Town Park", "Mountain Village Center", RideStatus::Completed, 3200),
        ("RIDE-2840", "Jan 3, 2026", "Denver International Airport", "1600 Broadway, Denver", RideStatus::Completed, 6725),
        ("RIDE-2838", "Jan 2, 2026", "Vail Medical Center", "392 E Lionshead Circle, Vail", RideStatus::Cancelled, 0),
    ]
    .into_iter()
    .map(|(id, date, pickup, dropoff, status, fare_cents)| Ride {
        id: RideId::from(id),
        status,
        pickup: pickup.into(),
        dropoff: dropoff.into(),
        date: date.into(),
        estimated_arrival: None,
        eta_minutes: None,
        progress: None,
        fare_cents,
        driver: None,
    })
    .collect()
}

// ── Support ─────────────────────────────────────────────────────────

#[rustfmt::skip]
fn tickets() -> Vec<SupportTicket> {
    [
        ("TKT-001", "Maria Garcia", "Wheelchair ramp not deployed", TicketPriority::High, TicketStatus::Open, "2 hours ago"),
        ("TKT-002", "James Wilson", "Driver arrived late", TicketPriority::Medium, TicketStatus::InProgress, "4 hours ago"),
        ("TKT-003", "Sarah Chen", "Billing question about Medicaid", TicketPriority::Low, TicketStatus::Pending, "1 day ago"),
        ("TKT-004", "Robert Johnson", "Request for regular pickup schedule", TicketPriority::Low, TicketStatus::Resolved, "2 days ago"),
        ("TKT-005", "Emily Davis", "Vehicle cleanliness concern", TicketPriority::Medium, TicketStatus::Open, "3 hours ago"),
        ("TKT-006", "Michael Brown", "Lost item in vehicle", TicketPriority::High, TicketStatus::InProgress, "5 hours ago"),
    ]
    .into_iter()
    .map(|(id, customer, subject, priority, status, created)| SupportTicket {
        id: TicketId::from(id),
        customer: customer.into(),
        subject: subject.into(),
        priority,
        status,
        created: created.into(),
    })
    .collect()
}

fn support_metrics() -> SupportMetrics {
    SupportMetrics {
        ticket_stats: TicketStats {
            open: 12,
            in_progress: 8,
            pending: 5,
            resolved: 147,
        },
        satisfaction: 4.7,
        avg_response_time: "12 min".into(),
        avg_resolution_time: "2.4 hrs".into(),
        today_resolved: 23,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fleet_mix_matches_dashboard() {
        let seed = FleetSeed::sunshine(Utc::now());
        assert_eq!(seed.drivers.len(), 8);
        assert_eq!(seed.vehicles.len(), 8);

        let count = |s: VehicleStatus| seed.vehicles.iter().filter(|v| v.status == s).count();
        assert_eq!(count(VehicleStatus::Active), 5);
        assert_eq!(count(VehicleStatus::Idle), 2);
        assert_eq!(count(VehicleStatus::Maintenance), 1);
        assert_eq!(count(VehicleStatus::Offline), 0);
    }

    #[test]
    fn reference_collections_are_populated() {
        let seed = FleetSeed::sunshine(Utc::now());
        assert_eq!(seed.alerts.len(), 6);
        assert_eq!(seed.trips.len(), 5);
        assert_eq!(seed.maintenance.len(), 6);
        assert_eq!(seed.fuel_history.len(), 7);
        assert_eq!(seed.utilization.len(), 8);
        assert_eq!(seed.recent_rides.len(), 4);
        assert_eq!(seed.tickets.len(), 6);
    }

    #[test]
    fn ids_are_unique() {
        let seed = FleetSeed::sunshine(Utc::now());
        let ids: HashSet<_> = seed.vehicles.iter().map(|v| v.id.clone()).collect();
        assert_eq!(ids.len(), seed.vehicles.len());
        let ids: HashSet<_> = seed.alerts.iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids.len(), seed.alerts.len());
    }

    #[test]
    fn assigned_drivers_resolve() {
        let seed = FleetSeed::sunshine(Utc::now());
        let van = &seed.vehicles[0];
        assert_eq!(van.driver_name(), Some("Maria Garcia"));
        let sedan = &seed.vehicles[4];
        assert!(sedan.driver.is_none());
    }

    #[test]
    fn timestamps_are_relative_to_now() {
        let now = Utc::now();
        let seed = FleetSeed::sunshine(now);
        assert_eq!(seed.vehicles[0].last_update, now);
        assert_eq!(seed.vehicles[4].last_update, now - Duration::days(1));
        assert_eq!(seed.trips[3].end_time, Some(now - Duration::hours(3)));
    }
}
