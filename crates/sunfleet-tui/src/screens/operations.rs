//! Operations screen: trips, maintenance, and fuel & utilization, each on
//! its own sub-tab.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Cell, LineGauge, Paragraph, Row, Table, TableState,
};

use sunfleet_core::{FuelTotals, MaintenanceStatus, TripStatus};

use crate::action::{Action, ReferenceData};
use crate::component::Component;
use crate::theme;
use crate::widgets::panel::panel;
use crate::widgets::sub_tabs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationsTab {
    #[default]
    Trips,
    Maintenance,
    FuelUtilization,
}

impl OperationsTab {
    const ALL: [Self; 3] = [Self::Trips, Self::Maintenance, Self::FuelUtilization];
    const LABELS: [&'static str; 3] = ["Trips", "Maintenance", "Fuel & Utilization"];

    fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

fn trip_status_color(status: TripStatus) -> Color {
    match status {
        TripStatus::InProgress => theme::SKY,
        TripStatus::Completed => theme::MEADOW,
        TripStatus::Cancelled => theme::MUTED,
    }
}

fn maintenance_status_color(status: MaintenanceStatus) -> Color {
    match status {
        MaintenanceStatus::Scheduled => theme::SUNSHINE,
        MaintenanceStatus::Completed => theme::MEADOW,
        MaintenanceStatus::Overdue => theme::ALERT_RED,
    }
}

pub struct OperationsScreen {
    focused: bool,
    data: Option<Arc<ReferenceData>>,
    tab: OperationsTab,
    trips_state: TableState,
    maintenance_state: TableState,
}

impl OperationsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            data: None,
            tab: OperationsTab::default(),
            trips_state: TableState::default(),
            maintenance_state: TableState::default(),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let Some(data) = &self.data else {
            return;
        };
        match self.tab {
            OperationsTab::Trips => {
                let next = super::step(self.trips_state.selected(), data.trips.len(), delta);
                self.trips_state.select(next);
            }
            OperationsTab::Maintenance => {
                let next =
                    super::step(self.maintenance_state.selected(), data.maintenance.len(), delta);
                self.maintenance_state.select(next);
            }
            OperationsTab::FuelUtilization => {}
        }
    }

    fn render_trips(&self, frame: &mut Frame, area: Rect, data: &ReferenceData) {
        let header = Row::new(
            ["Vehicle", "Driver", "Route", "Started", "Duration", "Miles", "Gal", "Status"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = data
            .trips
            .iter()
            .map(|t| {
                let duration = t.end_time.map_or_else(
                    || "─".to_owned(),
                    |end| {
                        let mins = end.signed_duration_since(t.start_time).num_minutes().max(0);
                        format!("{}h {:02}m", mins / 60, mins % 60)
                    },
                );
                Row::new(vec![
                    Cell::from(t.vehicle_name.clone()).style(Style::default().fg(theme::SKY)),
                    Cell::from(t.driver_name.clone()),
                    Cell::from(format!("{} → {}", t.start_location, t.end_location)),
                    Cell::from(t.start_time.format("%b %d %H:%M").to_string()),
                    Cell::from(duration),
                    Cell::from(format!("{:.1}", t.distance)),
                    Cell::from(format!("{:.1}", t.fuel_used)),
                    Cell::from(t.status.to_string())
                        .style(Style::default().fg(trip_status_color(t.status))),
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Fill(4),
            Constraint::Length(13),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(12),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());
        let mut state = self.trips_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_maintenance(&self, frame: &mut Frame, area: Rect, data: &ReferenceData) {
        let header = Row::new(
            ["Vehicle", "Service", "Scheduled", "Status", "Cost", "Notes"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = data
            .maintenance
            .iter()
            .map(|m| {
                Row::new(vec![
                    Cell::from(m.vehicle_name.clone()).style(Style::default().fg(theme::SKY)),
                    Cell::from(m.kind.to_string()),
                    Cell::from(m.scheduled_date.format("%Y-%m-%d").to_string()),
                    Cell::from(m.status.to_string())
                        .style(Style::default().fg(maintenance_status_color(m.status))),
                    Cell::from(m.cost.map_or_else(|| "─".to_owned(), |c| format!("${c}"))),
                    Cell::from(m.notes.clone().unwrap_or_default()),
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Fill(2),
            Constraint::Length(14),
            Constraint::Length(11),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Fill(3),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());
        let mut state = self.maintenance_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    #[allow(
        clippy::unused_self,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation,
        clippy::as_conversions
    )]
    fn render_fuel(&self, frame: &mut Frame, area: Rect, data: &ReferenceData) {
        let cols = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        let left = Layout::vertical([Constraint::Min(5), Constraint::Length(2)]).split(cols[0]);

        let bars: Vec<Bar> = data
            .fuel_history
            .iter()
            .map(|r| {
                Bar::default()
                    .value(r.gallons.max(0.0).round() as u64)
                    .text_value(format!("{:.0}", r.gallons))
                    .label(Line::from(r.date.clone()))
                    .style(Style::default().fg(theme::SUNSET))
            })
            .collect();
        let chart = BarChart::default()
            .block(panel(" Fuel (gal/day) ".to_owned(), false))
            .data(BarGroup::default().bars(&bars))
            .bar_width(5)
            .bar_gap(1)
            .value_style(Style::default().fg(theme::BG_DARK).bg(theme::SUNSET));
        frame.render_widget(chart, left[0]);

        let totals = FuelTotals::from_records(data.fuel_history.as_slice());
        let summary = Line::from(vec![
            Span::styled("  Week ", theme::label()),
            Span::styled(format!("{:.0} gal  ", totals.gallons), theme::value()),
            Span::styled(format!("${:.2}  ", totals.cost), Style::default().fg(theme::SUNSHINE)),
            Span::styled("avg ", theme::label()),
            Span::styled(format!("{:.1} mpg", totals.average_mpg), theme::value()),
        ]);
        frame.render_widget(Paragraph::new(summary), left[1]);

        let block = panel(" Utilization ".to_owned(), false);
        let inner = block.inner(cols[1]);
        frame.render_widget(block, cols[1]);

        let rows = Layout::vertical(
            data.utilization
                .iter()
                .map(|_| Constraint::Length(1))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);
        for (u, row) in data.utilization.iter().zip(rows.iter()) {
            let color = if u.utilization >= 80 {
                theme::MEADOW
            } else if u.utilization >= 50 {
                theme::SUNSHINE
            } else {
                theme::AMBER
            };
            let gauge = LineGauge::default()
                .ratio(f64::from(u.utilization.min(100)) / 100.0)
                .label(format!("{:<18} {:>3}%", u.name, u.utilization))
                .line_set(symbols::line::THICK)
                .filled_style(Style::default().fg(color))
                .unfilled_style(Style::default().fg(theme::BG_HIGHLIGHT));
            frame.render_widget(gauge, *row);
        }
    }
}

impl Component for OperationsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Char(']') => self.tab = self.tab.next(),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('[') => self.tab = self.tab.prev(),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ReferenceLoaded(data) = action {
            self.trips_state
                .select(super::clamp(self.trips_state.selected(), data.trips.len()));
            self.maintenance_state.select(super::clamp(
                self.maintenance_state.selected(),
                data.maintenance.len(),
            ));
            self.data = Some(Arc::clone(data));
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" Operations ".to_owned(), self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(
                &OperationsTab::LABELS,
                self.tab.index(),
            )),
            layout[0],
        );

        if let Some(data) = &self.data {
            match self.tab {
                OperationsTab::Trips => self.render_trips(frame, layout[1], data),
                OperationsTab::Maintenance => self.render_maintenance(frame, layout[1], data),
                OperationsTab::FuelUtilization => self.render_fuel(frame, layout[1], data),
            }
        }

        let hints = Line::from(vec![
            Span::styled("  h/l ", theme::key_hint_key()),
            Span::styled("switch view  ", theme::key_hint()),
            Span::styled("j/k ", theme::key_hint_key()),
            Span::styled("navigate", theme::key_hint()),
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
        "Operations"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sub_tabs_wrap_both_ways() {
        let mut screen = OperationsScreen::new();
        let press = |s: &mut OperationsScreen, code| {
            s.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
                .unwrap();
        };
        press(&mut screen, KeyCode::Char('h'));
        assert_eq!(screen.tab, OperationsTab::FuelUtilization);
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.tab, OperationsTab::Trips);
        press(&mut screen, KeyCode::Char(']'));
        assert_eq!(screen.tab, OperationsTab::Maintenance);
    }

    #[test]
    fn cursor_is_a_no_op_before_data_arrives() {
        let mut screen = OperationsScreen::new();
        screen.move_cursor(1);
        assert_eq!(screen.trips_state.selected(), None);
    }
}
