//! Fleet screen: vehicle table, status summary and the selected-vehicle
//! inspector.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;

use sunfleet_core::{Alert, FleetSummary, Vehicle, VehicleFilter, VehicleId, VehicleStatus};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::panel::panel;
use crate::widgets::{status_indicator, sub_tabs};

const FILTER_LABELS: [&str; 5] = ["All", "Active", "Idle", "Maintenance", "Offline"];

fn status_filter(index: usize) -> VehicleFilter {
    match index {
        1 => VehicleFilter::ByStatus(VehicleStatus::Active),
        2 => VehicleFilter::ByStatus(VehicleStatus::Idle),
        3 => VehicleFilter::ByStatus(VehicleStatus::Maintenance),
        4 => VehicleFilter::ByStatus(VehicleStatus::Offline),
        _ => VehicleFilter::All,
    }
}

pub struct FleetScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    vehicles: Arc<Vec<Arc<Vehicle>>>,
    alerts: Arc<Vec<Arc<Alert>>>,
    summary: FleetSummary,
    filter_index: usize,
    search_query: String,
    filtered: Vec<Arc<Vehicle>>,
    table_state: TableState,
    /// The store's selection, mirrored from `SelectionChanged`.
    selected: Option<VehicleId>,
}

impl FleetScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            action_tx: None,
            vehicles: Arc::new(Vec::new()),
            alerts: Arc::new(Vec::new()),
            summary: FleetSummary::default(),
            filter_index: 0,
            search_query: String::new(),
            filtered: Vec::new(),
            table_state: TableState::default(),
            selected: None,
        }
    }

    fn recompute(&mut self) {
        let by_status = status_filter(self.filter_index);
        let search = VehicleFilter::Search(self.search_query.clone());
        self.filtered = self
            .vehicles
            .iter()
            .filter(|v| by_status.matches(v) && search.matches(v))
            .cloned()
            .collect();
        let cursor = super::clamp(self.table_state.selected(), self.filtered.len());
        self.table_state.select(cursor);
    }

    fn highlighted(&self) -> Option<&Arc<Vehicle>> {
        self.table_state
            .selected()
            .and_then(|i| self.filtered.get(i))
    }

    fn selected_vehicle(&self) -> Option<&Arc<Vehicle>> {
        let id = self.selected.as_ref()?;
        self.vehicles.iter().find(|v| &v.id == id)
    }

    fn move_cursor(&mut self, delta: isize) {
        let next = super::step(self.table_state.selected(), self.filtered.len(), delta);
        self.table_state.select(next);
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let s = &self.summary;
        let count = |label: &'static str, n: usize, status: VehicleStatus| {
            vec![
                Span::styled(
                    format!("{} ", status_indicator::status_char(status)),
                    Style::default().fg(theme::vehicle_status_color(status)),
                ),
                Span::styled(format!("{n} "), theme::value().add_modifier(Modifier::BOLD)),
                Span::styled(format!("{label}   "), theme::label()),
            ]
        };

        let mut spans = vec![
            Span::styled(" Vehicles ", theme::label()),
            Span::styled(format!("{}   ", s.total), theme::value().add_modifier(Modifier::BOLD)),
        ];
        spans.extend(count("active", s.active, VehicleStatus::Active));
        spans.extend(count("idle", s.idle, VehicleStatus::Idle));
        spans.extend(count("maintenance", s.maintenance, VehicleStatus::Maintenance));
        spans.extend([
            Span::styled("│ Utilization ", theme::label()),
            Span::styled(format!("{:.0}%   ", s.utilization_rate), Style::default().fg(theme::SKY)),
            Span::styled("Avg fuel ", theme::label()),
            Span::styled(
                format!("{:.0}%   ", s.average_fuel),
                Style::default().fg(theme::fuel_color(s.average_fuel)),
            ),
            Span::styled("Open alerts ", theme::label()),
            Span::styled(
                s.unacknowledged.to_string(),
                Style::default().fg(if s.unacknowledged_high > 0 {
                    theme::ALERT_RED
                } else {
                    theme::TEXT
                }),
            ),
        ]);
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(
            ["", "Name", "Plate", "Kind", "Status", "Driver", "Speed", "Fuel", "Location"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );

        let cursor = self.table_state.selected();
        let rows: Vec<Row> = self
            .filtered
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let marker = match (cursor == Some(i), self.selected.as_ref() == Some(&v.id)) {
                    (true, true) => "▸◆",
                    (true, false) => "▸",
                    (false, true) => " ◆",
                    (false, false) => "",
                };
                Row::new(vec![
                    Cell::from(marker).style(Style::default().fg(theme::SUNSHINE)),
                    Cell::from(v.name.clone()).style(Style::default().fg(theme::SKY)),
                    Cell::from(v.license_plate.clone()),
                    Cell::from(v.kind.to_string()),
                    Cell::from(Line::from(status_indicator::status_span(v.status))),
                    Cell::from(v.driver_name().unwrap_or("─").to_owned()),
                    Cell::from(format!("{:.0} mph", v.speed)),
                    Cell::from(format!("{:.0}%", v.fuel_level))
                        .style(Style::default().fg(theme::fuel_color(v.fuel_level))),
                    Cell::from(v.location.address.clone()),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Length(2),
            Constraint::Fill(2),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Length(14),
            Constraint::Fill(2),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Fill(3),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    #[allow(clippy::unused_self)]
    fn render_detail(&self, frame: &mut Frame, area: Rect, v: &Vehicle) {
        let block = panel(
            format!(" {}  ·  {}  ·  {} ", v.name, v.license_plate, v.kind),
            true,
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let pair = |label: &'static str, value: String| {
            vec![
                Span::styled(format!("  {label:<12}"), theme::label()),
                Span::styled(format!("{value:<24}"), theme::value()),
            ]
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("  {:<12}", "Status"), theme::label()),
                status_indicator::status_span(v.status),
            ]),
            Line::from(
                [
                    pair("Driver", v.driver_name().unwrap_or("unassigned").to_owned()),
                    pair("Odometer", format!("{} mi", v.odometer)),
                ]
                .concat(),
            ),
            Line::from(
                [
                    pair("Speed", format!("{:.1} mph", v.speed)),
                    pair("Fuel", format!("{:.1}%", v.fuel_level)),
                ]
                .concat(),
            ),
            Line::from(pair("Location", v.location.address.clone())),
            Line::from(pair(
                "Position",
                format!("{:.4}, {:.4}", v.location.lat, v.location.lng),
            )),
            Line::from(pair(
                "Updated",
                v.last_update.format("%H:%M:%S UTC").to_string(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for FleetScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Char('g') => self
                .table_state
                .select(super::clamp(Some(0), self.filtered.len())),
            KeyCode::Char('G') => {
                self.table_state
                    .select(self.filtered.len().checked_sub(1));
            }
            KeyCode::Char('f') => {
                self.filter_index = (self.filter_index + 1) % FILTER_LABELS.len();
                self.recompute();
            }
            KeyCode::Enter => {
                let Some(v) = self.highlighted() else {
                    return Ok(None);
                };
                // Enter on the inspected vehicle closes the inspector
                let target = if self.selected.as_ref() == Some(&v.id) {
                    None
                } else {
                    Some(v.id.clone())
                };
                return Ok(Some(Action::SelectVehicle(target)));
            }
            KeyCode::Char('c') if self.selected.is_some() => {
                return Ok(Some(Action::SelectVehicle(None)));
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::VehiclesUpdated(vehicles) => {
                self.vehicles = Arc::clone(vehicles);
                self.summary =
                    FleetSummary::compute(self.vehicles.as_slice(), self.alerts.as_slice());
                self.recompute();
            }
            Action::AlertsUpdated(alerts) => {
                self.alerts = Arc::clone(alerts);
                self.summary =
                    FleetSummary::compute(self.vehicles.as_slice(), self.alerts.as_slice());
            }
            Action::SelectionChanged(id) => {
                self.selected.clone_from(id);
            }
            Action::SearchInput(query) => {
                self.search_query.clone_from(query);
                self.recompute();
            }
            Action::CloseSearch => {
                self.search_query.clear();
                self.recompute();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = if self.search_query.is_empty() {
            format!(" Fleet ({}/{}) ", self.filtered.len(), self.vehicles.len())
        } else {
            format!(
                " Fleet ({}/{}) [\"{}\"] ",
                self.filtered.len(),
                self.vehicles.len(),
                self.search_query
            )
        };
        let block = panel(title, self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let selected = self.selected_vehicle();
        let layout = Layout::vertical([
            Constraint::Length(1), // summary
            Constraint::Length(1), // filter tabs
            Constraint::Min(3),    // table
            Constraint::Length(if selected.is_some() { 8 } else { 0 }),
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_summary(frame, layout[0]);
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&FILTER_LABELS, self.filter_index)),
            layout[1],
        );
        self.render_table(frame, layout[2]);
        if let Some(v) = selected {
            self.render_detail(frame, layout[3], v);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("inspect  ", theme::key_hint()),
            Span::styled("c ", theme::key_hint_key()),
            Span::styled("clear  ", theme::key_hint()),
            Span::styled("f ", theme::key_hint_key()),
            Span::styled("filter  ", theme::key_hint()),
            Span::styled("/ ", theme::key_hint_key()),
            Span::styled("search", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[4]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Fleet"
    }
}
