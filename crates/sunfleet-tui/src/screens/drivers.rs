//! Drivers screen: roster with ratings, safety scores and the vehicle
//! each driver is currently assigned to.

use std::collections::HashMap;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use sunfleet_core::{Driver, DriverId, DriverStatus};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::panel::panel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DriverSort {
    #[default]
    Name,
    Rating,
    Safety,
}

impl DriverSort {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Rating,
            Self::Rating => Self::Safety,
            Self::Safety => Self::Name,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Rating => "rating",
            Self::Safety => "safety",
        }
    }
}

fn driver_status_color(status: DriverStatus) -> Color {
    match status {
        DriverStatus::Available => theme::MEADOW,
        DriverStatus::OnTrip => theme::SKY,
        DriverStatus::OffDuty => theme::MUTED,
    }
}

fn safety_color(score: u8) -> Color {
    if score >= 95 {
        theme::MEADOW
    } else if score >= 90 {
        theme::SUNSHINE
    } else {
        theme::AMBER
    }
}

pub struct DriversScreen {
    focused: bool,
    drivers: Arc<Vec<Arc<Driver>>>,
    /// Driver id → vehicle name, rebuilt on every vehicle update.
    assignments: HashMap<DriverId, String>,
    sort: DriverSort,
    search_query: String,
    filtered: Vec<Arc<Driver>>,
    table_state: TableState,
}

impl DriversScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            drivers: Arc::new(Vec::new()),
            assignments: HashMap::new(),
            sort: DriverSort::default(),
            search_query: String::new(),
            filtered: Vec::new(),
            table_state: TableState::default(),
        }
    }

    fn recompute(&mut self) {
        let q = self.search_query.to_lowercase();
        let mut filtered: Vec<Arc<Driver>> = self
            .drivers
            .iter()
            .filter(|d| q.is_empty() || d.name.to_lowercase().contains(&q))
            .cloned()
            .collect();
        match self.sort {
            DriverSort::Name => filtered.sort_by(|a, b| a.name.cmp(&b.name)),
            DriverSort::Rating => filtered.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            DriverSort::Safety => filtered.sort_by(|a, b| b.safety_score.cmp(&a.safety_score)),
        }
        self.filtered = filtered;
        let cursor = super::clamp(self.table_state.selected(), self.filtered.len());
        self.table_state.select(cursor);
    }
}

impl Component for DriversScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let next = super::step(self.table_state.selected(), self.filtered.len(), 1);
                self.table_state.select(next);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let next = super::step(self.table_state.selected(), self.filtered.len(), -1);
                self.table_state.select(next);
            }
            KeyCode::Char('s') => {
                self.sort = self.sort.next();
                self.recompute();
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ReferenceLoaded(data) => {
                self.drivers = Arc::clone(&data.drivers);
                self.recompute();
            }
            Action::VehiclesUpdated(vehicles) => {
                self.assignments = vehicles
                    .iter()
                    .filter_map(|v| v.driver.as_ref().map(|d| (d.id.clone(), v.name.clone())))
                    .collect();
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
        let block = panel(
            format!(" Drivers ({}) · sorted by {} ", self.filtered.len(), self.sort.label()),
            self.focused,
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let header = Row::new(
            ["Name", "Phone", "License", "Status", "Rating", "Trips", "Safety", "Vehicle"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = self
            .filtered
            .iter()
            .map(|d| {
                Row::new(vec![
                    Cell::from(d.name.clone()).style(Style::default().fg(theme::SKY)),
                    Cell::from(d.phone.clone()),
                    Cell::from(d.license.clone()),
                    Cell::from(d.status.to_string())
                        .style(Style::default().fg(driver_status_color(d.status))),
                    Cell::from(format!("★ {:.1}", d.rating))
                        .style(Style::default().fg(theme::SUNSHINE)),
                    Cell::from(d.total_trips.to_string()),
                    Cell::from(d.safety_score.to_string())
                        .style(Style::default().fg(safety_color(d.safety_score))),
                    Cell::from(
                        self.assignments
                            .get(&d.id)
                            .map_or("─", String::as_str)
                            .to_owned(),
                    ),
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Fill(2),
            Constraint::Length(15),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Fill(2),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());
        let mut state = self.table_state;
        frame.render_stateful_widget(table, layout[0], &mut state);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("s ", theme::key_hint_key()),
            Span::styled("sort  ", theme::key_hint()),
            Span::styled("/ ", theme::key_hint_key()),
            Span::styled("search", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Drivers"
    }
}
