//! Customer support: ticket counts, service metrics and the open queue.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use sunfleet_core::{SupportTicket, TicketStatus};

use crate::action::{Action, ReferenceData};
use crate::component::Component;
use crate::theme;
use crate::widgets::panel::panel;

fn ticket_status_color(status: TicketStatus) -> Color {
    match status {
        TicketStatus::Open => theme::ALERT_RED,
        TicketStatus::InProgress => theme::SKY,
        TicketStatus::Pending => theme::AMBER,
        TicketStatus::Resolved => theme::MEADOW,
    }
}

pub struct SupportScreen {
    focused: bool,
    data: Option<Arc<ReferenceData>>,
    /// Hide resolved tickets.
    open_only: bool,
    search_query: String,
    filtered: Vec<SupportTicket>,
    table_state: TableState,
}

impl SupportScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            data: None,
            open_only: false,
            search_query: String::new(),
            filtered: Vec::new(),
            table_state: TableState::default(),
        }
    }

    fn recompute(&mut self) {
        let Some(data) = &self.data else {
            return;
        };
        let query = self.search_query.to_lowercase();
        self.filtered = data
            .tickets
            .iter()
            .filter(|t| !self.open_only || t.status != TicketStatus::Resolved)
            .filter(|t| {
                query.is_empty()
                    || t.customer.to_lowercase().contains(&query)
                    || t.subject.to_lowercase().contains(&query)
            })
            .cloned()
            .collect();
        self.table_state
            .select(super::clamp(self.table_state.selected(), self.filtered.len()));
    }

    fn stats_lines(data: &ReferenceData) -> Vec<Line<'static>> {
        let m = &data.support_metrics;
        let s = m.ticket_stats;
        let stat = |label: &str, n: u32, color: Color| {
            vec![
                Span::styled(
                    format!("{n}"),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {label}   "), theme::label()),
            ]
        };
        let mut counts = vec![Span::raw("  ")];
        counts.extend(stat("open", s.open, theme::ALERT_RED));
        counts.extend(stat("in progress", s.in_progress, theme::SKY));
        counts.extend(stat("pending", s.pending, theme::AMBER));
        counts.extend(stat("resolved", s.resolved, theme::MEADOW));
        counts.push(Span::styled(format!("of {}", s.total()), theme::label()));

        vec![
            Line::from(counts),
            Line::from(vec![
                Span::styled("  Satisfaction ", theme::label()),
                Span::styled(
                    format!("{:.1}%", m.satisfaction),
                    Style::default().fg(theme::SUNSHINE),
                ),
                Span::styled("   Response ", theme::label()),
                Span::styled(m.avg_response_time.clone(), theme::value()),
                Span::styled("   Resolution ", theme::label()),
                Span::styled(m.avg_resolution_time.clone(), theme::value()),
                Span::styled("   Resolved today ", theme::label()),
                Span::styled(m.today_resolved.to_string(), theme::value()),
            ]),
        ]
    }
}

impl Component for SupportScreen {
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
            KeyCode::Char('o') => {
                self.open_only = !self.open_only;
                self.recompute();
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ReferenceLoaded(data) => {
                self.data = Some(Arc::clone(data));
                self.recompute();
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
        let block = panel(" Support ".to_owned(), self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(data) = &self.data else {
            return;
        };

        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

        frame.render_widget(Paragraph::new(Self::stats_lines(data)), layout[0]);

        let header = Row::new(
            ["Ticket", "Customer", "Subject", "Priority", "Status", "Created"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = self
            .filtered
            .iter()
            .map(|t| {
                Row::new(vec![
                    Cell::from(t.id.to_string()).style(Style::default().fg(theme::MUTED)),
                    Cell::from(t.customer.clone()),
                    Cell::from(t.subject.clone()),
                    Cell::from(t.priority.to_string())
                        .style(Style::default().fg(theme::priority_color(t.priority))),
                    Cell::from(t.status.to_string())
                        .style(Style::default().fg(ticket_status_color(t.status))),
                    Cell::from(t.created.clone()).style(Style::default().fg(theme::MUTED)),
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Length(10),
            Constraint::Fill(2),
            Constraint::Fill(4),
            Constraint::Length(9),
            Constraint::Length(12),
            Constraint::Length(14),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());
        let mut state = self.table_state;
        frame.render_stateful_widget(table, layout[1], &mut state);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("o ", theme::key_hint_key()),
            Span::styled(
                if self.open_only {
                    "show all"
                } else {
                    "hide resolved"
                },
                theme::key_hint(),
            ),
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
        "Support"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use sunfleet_core::{FleetController, FleetSeed, SimulationConfig};

    use super::*;

    fn loaded() -> SupportScreen {
        let controller =
            FleetController::new(SimulationConfig::default(), FleetSeed::sunshine(Utc::now()))
                .unwrap();
        let mut screen = SupportScreen::new();
        screen
            .update(&Action::ReferenceLoaded(Arc::new(ReferenceData::collect(
                &controller,
            ))))
            .unwrap();
        screen
    }

    #[test]
    fn open_only_hides_resolved_tickets() {
        let mut screen = loaded();
        let all = screen.filtered.len();
        let resolved = screen
            .filtered
            .iter()
            .filter(|t| t.status == TicketStatus::Resolved)
            .count();

        screen
            .handle_key_event(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(screen.filtered.len(), all - resolved);
        assert!(
            screen
                .filtered
                .iter()
                .all(|t| t.status != TicketStatus::Resolved)
        );
    }

    #[test]
    fn search_matches_customer_or_subject() {
        let mut screen = loaded();
        let all = screen.filtered.len();
        screen
            .update(&Action::SearchInput("zzz-no-match".into()))
            .unwrap();
        assert!(screen.filtered.is_empty());
        assert_eq!(screen.table_state.selected(), None);

        screen.update(&Action::CloseSearch).unwrap();
        assert_eq!(screen.filtered.len(), all);
    }
}
