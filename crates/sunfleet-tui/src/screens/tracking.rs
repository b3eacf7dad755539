//! Ride tracking: the rider's active trip with live progress, the driver
//! card, and recent ride history.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Gauge, Paragraph, Row, Table, TableState};

use sunfleet_core::{Ride, RideStatus};

use crate::action::{Action, ReferenceData};
use crate::component::Component;
use crate::theme;
use crate::widgets::panel::panel;

fn ride_status_color(status: RideStatus) -> Color {
    match status {
        RideStatus::InProgress => theme::SKY,
        RideStatus::Completed => theme::MEADOW,
        RideStatus::Cancelled => theme::ALERT_RED,
        RideStatus::Scheduled => theme::SUNSHINE,
    }
}

fn kv(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<10}"), theme::label()),
        Span::styled(value, theme::value()),
    ])
}

pub struct TrackingScreen {
    focused: bool,
    data: Option<Arc<ReferenceData>>,
    table_state: TableState,
}

impl TrackingScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            data: None,
            table_state: TableState::default(),
        }
    }

    fn render_active(frame: &mut Frame, area: Rect, ride: &Ride) {
        let cols = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        // Trip card
        let block = panel(format!(" Active Ride {} ", ride.id), false);
        let inner = block.inner(cols[0]);
        frame.render_widget(block, cols[0]);
        let parts = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let eta = match (&ride.estimated_arrival, ride.eta_minutes) {
            (Some(at), Some(mins)) => format!("{at} ({mins} min)"),
            (Some(at), None) => at.clone(),
            (None, Some(mins)) => format!("{mins} min"),
            (None, None) => "─".to_owned(),
        };
        let lines = vec![
            Line::from(vec![
                Span::styled("  Status    ", theme::label()),
                Span::styled(
                    ride.status.to_string(),
                    Style::default()
                        .fg(ride_status_color(ride.status))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            kv("Pickup", ride.pickup.clone()),
            kv("Dropoff", ride.dropoff.clone()),
            kv("Departed", ride.date.clone()),
            kv("ETA", eta),
            kv("Fare", ride.fare_display()),
        ];
        frame.render_widget(Paragraph::new(lines), parts[0]);

        let progress = ride.progress.unwrap_or(0).min(100);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme::SUNSHINE).bg(theme::BG_HIGHLIGHT))
            .percent(u16::from(progress))
            .label(format!("{progress}% of route"));
        frame.render_widget(gauge, parts[1]);

        // Driver card
        let block = panel(" Your Driver ".to_owned(), false);
        let inner = block.inner(cols[1]);
        frame.render_widget(block, cols[1]);
        let lines = ride.driver.as_ref().map_or_else(
            || vec![Line::styled("  No driver assigned", theme::label())],
            |d| {
                vec![
                    Line::from(Span::styled(
                        format!("  {}", d.name),
                        Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(vec![
                        Span::styled("  Rating    ", theme::label()),
                        Span::styled(
                            format!("★ {:.1}", d.rating),
                            Style::default().fg(theme::SUNSHINE),
                        ),
                    ]),
                    kv("Vehicle", d.vehicle_info.clone()),
                    kv("Plate", d.license_plate.clone()),
                    kv("Phone", d.phone.clone()),
                ]
            },
        );
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_recent(&self, frame: &mut Frame, area: Rect, rides: &[Ride]) {
        let block = panel(" Recent Rides ".to_owned(), self.focused);
        let header = Row::new(
            ["Ride", "Date", "From", "To", "Fare", "Driver", "Status"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = rides
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.id.to_string()).style(Style::default().fg(theme::MUTED)),
                    Cell::from(r.date.clone()),
                    Cell::from(r.pickup.clone()),
                    Cell::from(r.dropoff.clone()),
                    Cell::from(r.fare_display()),
                    Cell::from(
                        r.driver
                            .as_ref()
                            .map_or_else(|| "─".to_owned(), |d| d.name.clone()),
                    ),
                    Cell::from(r.status.to_string())
                        .style(Style::default().fg(ride_status_color(r.status))),
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Fill(3),
            Constraint::Fill(3),
            Constraint::Length(8),
            Constraint::Fill(2),
            Constraint::Length(11),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(theme::table_selected());
        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }
}

impl Component for TrackingScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let len = self.data.as_ref().map_or(0, |d| d.recent_rides.len());
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.table_state
                    .select(super::step(self.table_state.selected(), len, 1));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.table_state
                    .select(super::step(self.table_state.selected(), len, -1));
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ReferenceLoaded(data) = action {
            self.table_state.select(super::clamp(
                self.table_state.selected(),
                data.recent_rides.len(),
            ));
            self.data = Some(Arc::clone(data));
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(data) = &self.data else {
            frame.render_widget(
                Paragraph::new("  Loading ride...").style(theme::label()),
                area,
            );
            return;
        };

        let layout = Layout::vertical([
            Constraint::Length(9),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);

        Self::render_active(frame, layout[0], &data.active_ride);
        self.render_recent(frame, layout[1], &data.recent_rides);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("browse history", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Tracking"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use crossterm::event::KeyModifiers;
    use sunfleet_core::{FleetController, FleetSeed, SimulationConfig};

    use super::*;

    fn reference() -> Arc<ReferenceData> {
        let controller =
            FleetController::new(SimulationConfig::default(), FleetSeed::sunshine(Utc::now()))
                .unwrap();
        Arc::new(ReferenceData::collect(&controller))
    }

    #[test]
    fn history_cursor_stays_in_bounds() {
        let mut screen = TrackingScreen::new();
        let data = reference();
        let len = data.recent_rides.len();
        screen.update(&Action::ReferenceLoaded(data)).unwrap();

        for _ in 0..len + 3 {
            screen
                .handle_key_event(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE))
                .unwrap();
        }
        assert_eq!(screen.table_state.selected(), Some(len - 1));
    }

    #[test]
    fn active_ride_carries_driver_and_progress() {
        let data = reference();
        assert!(data.active_ride.driver.is_some());
        assert!(data.active_ride.progress.is_some_and(|p| p <= 100));
    }
}
