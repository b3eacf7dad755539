//! Colored dots for vehicle status and alert severity.

use ratatui::style::Style;
use ratatui::text::Span;

use sunfleet_core::{AlertSeverity, VehicleStatus};

use crate::theme;

pub fn status_char(status: VehicleStatus) -> &'static str {
    match status {
        VehicleStatus::Active => "●",
        VehicleStatus::Idle => "◐",
        VehicleStatus::Maintenance => "◉",
        VehicleStatus::Offline => "○",
    }
}

/// Dot plus status name, e.g. `● active`.
pub fn status_span(status: VehicleStatus) -> Span<'static> {
    Span::styled(
        format!("{} {status}", status_char(status)),
        Style::default().fg(theme::vehicle_status_color(status)),
    )
}

pub fn severity_span(severity: AlertSeverity) -> Span<'static> {
    let symbol = match severity {
        AlertSeverity::High => "▲",
        AlertSeverity::Medium => "◆",
        AlertSeverity::Low => "·",
    };
    Span::styled(
        format!("{symbol} {severity}"),
        Style::default().fg(theme::severity_color(severity)),
    )
}
