//! Sunshine palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

use sunfleet_core::{AlertSeverity, TicketPriority, VehicleStatus};

// ── Core palette ──────────────────────────────────────────────────────

pub const SUNSHINE: Color = Color::Rgb(255, 196, 0); // #ffc400
pub const SKY: Color = Color::Rgb(102, 204, 255); // #66ccff
pub const SUNSET: Color = Color::Rgb(255, 138, 76); // #ff8a4c
pub const MEADOW: Color = Color::Rgb(120, 220, 120); // #78dc78
pub const ALERT_RED: Color = Color::Rgb(255, 92, 92); // #ff5c5c
pub const AMBER: Color = Color::Rgb(255, 170, 51); // #ffaa33

// ── Neutrals ──────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(214, 218, 228); // #d6dae4
pub const MUTED: Color = Color::Rgb(112, 124, 150); // #707c96
pub const BG_HIGHLIGHT: Color = Color::Rgb(44, 46, 58); // #2c2e3a
pub const BG_DARK: Color = Color::Rgb(28, 29, 38); // #1c1d26

// ── Semantic styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(SUNSHINE).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(SUNSHINE)
}

pub fn border_default() -> Style {
    Style::default().fg(MUTED)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(SKY)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(SUNSHINE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(SUNSHINE).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(TEXT)
}

/// Label half of a `label  value` pair.
pub fn label() -> Style {
    Style::default().fg(MUTED)
}

pub fn value() -> Style {
    Style::default().fg(TEXT)
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(SKY).add_modifier(Modifier::BOLD)
}

// ── Domain colors ─────────────────────────────────────────────────────

pub fn vehicle_status_color(status: VehicleStatus) -> Color {
    match status {
        VehicleStatus::Active => MEADOW,
        VehicleStatus::Idle => SUNSHINE,
        VehicleStatus::Maintenance => SUNSET,
        VehicleStatus::Offline => MUTED,
    }
}

pub fn severity_color(severity: AlertSeverity) -> Color {
    match severity {
        AlertSeverity::High => ALERT_RED,
        AlertSeverity::Medium => AMBER,
        AlertSeverity::Low => SKY,
    }
}

pub fn priority_color(priority: TicketPriority) -> Color {
    match priority {
        TicketPriority::High => ALERT_RED,
        TicketPriority::Medium => AMBER,
        TicketPriority::Low => MEADOW,
    }
}

/// Green above half a tank, amber above a quarter, red below.
pub fn fuel_color(level: f64) -> Color {
    if level > 50.0 {
        MEADOW
    } else if level > 25.0 {
        AMBER
    } else {
        ALERT_RED
    }
}
