//! Alerts screen: newest-first alert feed with acknowledgement.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use sunfleet_core::{Alert, AlertFilter, AlertSeverity};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::panel::panel;
use crate::widgets::{status_indicator, sub_tabs};

const FILTER_LABELS: [&str; 5] = ["All", "Unacknowledged", "High", "Medium", "Low"];

fn alert_filter(index: usize) -> AlertFilter {
    match index {
        1 => AlertFilter::Unacknowledged,
        2 => AlertFilter::BySeverity(AlertSeverity::High),
        3 => AlertFilter::BySeverity(AlertSeverity::Medium),
        4 => AlertFilter::BySeverity(AlertSeverity::Low),
        _ => AlertFilter::All,
    }
}

/// Unacknowledged counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct OpenCounts {
    high: usize,
    medium: usize,
    low: usize,
}

impl OpenCounts {
    fn of(alerts: &[Arc<Alert>]) -> Self {
        let mut c = Self::default();
        for a in alerts.iter().filter(|a| !a.acknowledged) {
            match a.severity {
                AlertSeverity::High => c.high += 1,
                AlertSeverity::Medium => c.medium += 1,
                AlertSeverity::Low => c.low += 1,
            }
        }
        c
    }

    fn total(self) -> usize {
        self.high + self.medium + self.low
    }
}

pub struct AlertsScreen {
    focused: bool,
    alerts: Arc<Vec<Arc<Alert>>>,
    counts: OpenCounts,
    filter_index: usize,
    search_query: String,
    filtered: Vec<Arc<Alert>>,
    table_state: TableState,
}

impl AlertsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            alerts: Arc::new(Vec::new()),
            counts: OpenCounts::default(),
            filter_index: 0,
            search_query: String::new(),
            filtered: Vec::new(),
            table_state: TableState::default(),
        }
    }

    fn recompute(&mut self) {
        let filter = alert_filter(self.filter_index);
        let q = self.search_query.to_lowercase();
        let mut filtered: Vec<Arc<Alert>> = self
            .alerts
            .iter()
            .filter(|a| filter.matches(a))
            .filter(|a| {
                q.is_empty()
                    || a.vehicle_name.to_lowercase().contains(&q)
                    || a.message.to_lowercase().contains(&q)
            })
            .cloned()
            .collect();
        // Stable, so equal timestamps keep the store's order
        filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.filtered = filtered;
        let cursor = super::clamp(self.table_state.selected(), self.filtered.len());
        self.table_state.select(cursor);
    }

    fn render_counts(&self, frame: &mut Frame, area: Rect) {
        let c = self.counts;
        let count = |n: usize, severity: AlertSeverity| {
            [
                status_indicator::severity_span(severity),
                Span::styled(
                    format!(" {n}    "),
                    Style::default()
                        .fg(theme::severity_color(severity))
                        .add_modifier(Modifier::BOLD),
                ),
            ]
        };
        let mut spans = vec![
            Span::styled(" Unacknowledged ", theme::label()),
            Span::styled(
                format!("{}    ", c.total()),
                theme::value().add_modifier(Modifier::BOLD),
            ),
        ];
        spans.extend(count(c.high, AlertSeverity::High));
        spans.extend(count(c.medium, AlertSeverity::Medium));
        spans.extend(count(c.low, AlertSeverity::Low));
        spans.push(Span::styled(
            format!("│ {} total", self.alerts.len()),
            theme::label(),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(
            ["", "Time", "Severity", "Kind", "Vehicle", "Message"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );

        let rows: Vec<Row> = self
            .filtered
            .iter()
            .map(|a| {
                let (mark, mark_style) = if a.acknowledged {
                    ("✓", Style::default().fg(theme::MUTED))
                } else {
                    ("●", Style::default().fg(theme::severity_color(a.severity)))
                };
                let text_style = if a.acknowledged {
                    Style::default().fg(theme::MUTED)
                } else {
                    theme::table_row()
                };
                Row::new(vec![
                    Cell::from(mark).style(mark_style),
                    Cell::from(a.timestamp.format("%H:%M:%S").to_string()),
                    Cell::from(Line::from(status_indicator::severity_span(a.severity))),
                    Cell::from(a.kind.to_string()),
                    Cell::from(a.vehicle_name.clone()).style(Style::default().fg(theme::SKY)),
                    Cell::from(a.message.clone()),
                ])
                .style(text_style)
            })
            .collect();

        let widths = [
            Constraint::Length(2),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(14),
            Constraint::Fill(1),
            Constraint::Fill(2),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }
}

impl Component for AlertsScreen {
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
            KeyCode::Char('f') => {
                self.filter_index = (self.filter_index + 1) % FILTER_LABELS.len();
                self.recompute();
            }
            KeyCode::Char('a') => {
                let target = self
                    .table_state
                    .selected()
                    .and_then(|i| self.filtered.get(i))
                    .filter(|a| !a.acknowledged);
                if let Some(alert) = target {
                    return Ok(Some(Action::AcknowledgeAlert(alert.id.clone())));
                }
            }
            KeyCode::Char('A') if self.counts.total() > 0 => {
                return Ok(Some(Action::AcknowledgeAll));
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::AlertsUpdated(alerts) => {
                self.alerts = Arc::clone(alerts);
                self.counts = OpenCounts::of(&self.alerts);
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
        let block = panel(
            format!(" Alerts ({}/{}) ", self.filtered.len(), self.alerts.len()),
            self.focused,
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

        self.render_counts(frame, layout[0]);
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&FILTER_LABELS, self.filter_index)),
            layout[1],
        );
        if self.filtered.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  No alerts", theme::key_hint())),
                layout[2],
            );
        } else {
            self.render_table(frame, layout[2]);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("acknowledge  ", theme::key_hint()),
            Span::styled("A ", theme::key_hint_key()),
            Span::styled("acknowledge all  ", theme::key_hint()),
            Span::styled("f ", theme::key_hint_key()),
            Span::styled("filter", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Alerts"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use sunfleet_core::FleetSeed;

    use super::*;

    fn loaded() -> AlertsScreen {
        let seed = FleetSeed::sunshine(Utc::now());
        let alerts: Vec<Arc<Alert>> = seed.alerts.into_iter().map(Arc::new).collect();
        let mut screen = AlertsScreen::new();
        screen
            .update(&Action::AlertsUpdated(Arc::new(alerts)))
            .unwrap();
        screen
    }

    fn press(screen: &mut AlertsScreen, c: char) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn counts_open_alerts_by_severity() {
        let screen = loaded();
        assert_eq!(screen.counts.total(), 5);
        assert_eq!(screen.counts.high, 2);
        assert_eq!(screen.counts.medium, 2);
    }

    #[test]
    fn feed_is_newest_first() {
        let screen = loaded();
        assert!(
            screen
                .filtered
                .windows(2)
                .all(|w| w[0].timestamp >= w[1].timestamp)
        );
    }

    #[test]
    fn acknowledge_targets_the_highlighted_open_alert() {
        let mut screen = loaded();
        press(&mut screen, 'f'); // unacknowledged only
        let first = screen.filtered[0].id.clone();
        match press(&mut screen, 'a') {
            Some(Action::AcknowledgeAlert(id)) => assert_eq!(id, first),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(press(&mut screen, 'A'), Some(Action::AcknowledgeAll)));
    }

    #[test]
    fn acknowledge_all_is_silent_when_nothing_is_open() {
        let mut screen = loaded();
        let acked: Vec<Arc<Alert>> = screen
            .alerts
            .iter()
            .map(|a| {
                Arc::new(Alert {
                    acknowledged: true,
                    ..(**a).clone()
                })
            })
            .collect();
        screen
            .update(&Action::AlertsUpdated(Arc::new(acked)))
            .unwrap();
        assert!(press(&mut screen, 'A').is_none());
        assert!(press(&mut screen, 'a').is_none());
    }
}
