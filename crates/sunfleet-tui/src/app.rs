//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use sunfleet_config::Config;
use sunfleet_core::{AlertSeverity, Command, CommandResult, FleetController, SimulatorState};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Toast text for a finished command, if it deserves one.
fn result_message(result: &CommandResult) -> Option<String> {
    match result {
        CommandResult::Acknowledged { changed: true } => Some("Alert acknowledged".into()),
        CommandResult::Acknowledged { changed: false }
        | CommandResult::AcknowledgedAll { count: 0 }
        | CommandResult::Selected(_) => None,
        CommandResult::AcknowledgedAll { count: 1 } => Some("Acknowledged 1 alert".into()),
        CommandResult::AcknowledgedAll { count } => Some(format!("Acknowledged {count} alerts")),
    }
}

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    sim_state: SimulatorState,
    tick_count: u64,
    last_tick: Option<DateTime<Utc>>,
    help_visible: bool,
    search_active: bool,
    search_query: String,
    terminal_size: (u16, u16),
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    controller: FleetController,
    /// Cancels the data bridge task.
    data_cancel: CancellationToken,
    /// Active toast with its display timestamp.
    notification: Option<(Notification, Instant)>,
    tick_rate: Duration,
    render_rate: Duration,
    submit_delay: Duration,
}

impl App {
    pub fn new(controller: FleetController, cfg: &Config) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        Self {
            active_screen: ScreenId::Fleet,
            previous_screen: None,
            screens,
            running: true,
            sim_state: SimulatorState::Stopped,
            tick_count: 0,
            last_tick: None,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            controller,
            data_cancel: CancellationToken::new(),
            notification: None,
            tick_rate: cfg.tui.tick_rate(),
            render_rate: cfg.tui.render_rate(),
            submit_delay: cfg.contact.submit_delay(),
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Mount the simulator, run the event loop until quit, then unmount.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        self.controller.start().await?;

        let controller = self.controller.clone();
        let cancel = self.data_cancel.clone();
        let tx = self.action_tx.clone();
        let bridge = tokio::spawn(async move {
            crate::data_bridge::spawn_data_bridge(controller, tx, cancel).await;
        });

        let mut events = EventReader::new(self.tick_rate, self.render_rate);

        info!("TUI event loop started");

        let result = self.event_loop(&mut tui, &mut events).await;

        // Unmount: stop the bridge first so no update lands after teardown
        self.data_cancel.cancel();
        let _ = bridge.await;
        self.controller.stop().await;
        events.stop();
        tui.exit();
        info!("TUI event loop ended");
        result
    }

    async fn event_loop(&mut self, tui: &mut Tui, events: &mut EventReader) -> Result<()> {
        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }
        Ok(())
    }

    fn active_captures_input(&self) -> bool {
        self.screens
            .get(&self.active_screen)
            .is_some_and(|s| s.captures_input())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys go to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // Text entry owns the keyboard
        if self.active_captures_input() {
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        if self.search_active {
            return match key.code {
                KeyCode::Esc => {
                    self.search_query.clear();
                    Ok(Some(Action::CloseSearch))
                }
                KeyCode::Enter => Ok(Some(Action::SearchSubmit)),
                KeyCode::Backspace => {
                    self.search_query.pop();
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                _ => Ok(None),
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                return Ok(Some(Action::ToggleHelp));
            }
            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='7')) => {
                let n = c.to_digit(10).and_then(|d| u8::try_from(d).ok());
                if let Some(screen) = n.and_then(ScreenId::from_number) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    fn switch_to(&mut self, target: ScreenId) {
        if target == self.active_screen {
            return;
        }
        debug!("switching screen: {} → {}", self.active_screen, target);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.previous_screen = Some(self.active_screen);
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn update_active(&mut self, action: &Action) -> Result<()> {
        let follow_up = match self.screens.get_mut(&self.active_screen) {
            Some(screen) => screen.update(action)?,
            None => None,
        };
        if let Some(follow_up) = follow_up {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Render => {}

            Action::Resize(w, h) => self.terminal_size = (*w, *h),

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, created)| created.elapsed() > NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
                self.update_active(action)?;
            }

            Action::SwitchScreen(target) => {
                if self.search_active {
                    self.search_active = false;
                    self.search_query.clear();
                    self.broadcast(&Action::CloseSearch)?;
                }
                self.switch_to(*target);
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::OpenSearch => {
                self.search_active = true;
                self.search_query.clear();
            }

            Action::CloseSearch => {
                self.search_active = false;
                self.search_query.clear();
                self.update_active(action)?;
            }

            // Leave the filter applied, just hide the prompt
            Action::SearchSubmit => self.search_active = false,

            Action::TickRecorded { count, at } => {
                self.tick_count = *count;
                self.last_tick = *at;
            }

            Action::SimulatorStateChanged(state) => self.sim_state = *state,

            Action::AlertRaised(alert) => {
                let message = format!("{}: {}", alert.vehicle_name, alert.message);
                let notification = if alert.severity == AlertSeverity::High {
                    Notification::warning(message)
                } else {
                    Notification::info(message)
                };
                self.notification = Some((notification, Instant::now()));
            }

            // Data updates reach every screen so they stay in sync
            Action::VehiclesUpdated(_)
            | Action::AlertsUpdated(_)
            | Action::ReferenceLoaded(_)
            | Action::SelectionChanged(_)
            | Action::ContactSubmitted => self.broadcast(action)?,

            // ── Command pipeline ──────────────────────────────────────
            Action::SelectVehicle(id) => {
                self.execute_command(Command::SelectVehicle { id: id.clone() });
            }
            Action::AcknowledgeAlert(id) => {
                self.execute_command(Command::Acknowledge { id: id.clone() });
            }
            Action::AcknowledgeAll => self.execute_command(Command::AcknowledgeAll),

            Action::ContactSubmitting => {
                let tx = self.action_tx.clone();
                let delay = self.submit_delay;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Action::ContactSubmitted);
                });
            }

            Action::Notify(n) => self.notification = Some((n.clone(), Instant::now())),

            Action::DismissNotification => self.notification = None,

            // Everything else goes to the active screen only
            other => self.update_active(other)?,
        }

        Ok(())
    }

    /// Spawn a command execution task. Failures and noteworthy results
    /// come back as a Notify action.
    fn execute_command(&self, cmd: Command) {
        let controller = self.controller.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match controller.execute(cmd).await {
                Ok(result) => {
                    if let Some(msg) = result_message(&result) {
                        let _ = tx.send(Action::Notify(Notification::success(msg)));
                    }
                }
                Err(e) => {
                    warn!(error = %e, "command execution failed");
                    let _ = tx.send(Action::Notify(Notification::error(format!("{e}"))));
                }
            }
        });
    }

    // ── Rendering ─────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays, last is topmost
        if let Some((ref notif, _)) = self.notification {
            Self::render_notification(frame, area, notif);
        }
        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let compact = self.terminal_size.0 > 0 && self.terminal_size.0 < 100;
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                let label = if compact { id.label_short() } else { id.label() };
                Line::from(Span::styled(format!(" {} {label} ", id.number()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );
        frame.render_widget(tabs, area);
    }

    fn data_age_label(&self) -> String {
        let Some(at) = self.last_tick else {
            return "waiting for first tick".into();
        };
        let secs = Utc::now().signed_duration_since(at).num_seconds();
        let age = Duration::from_secs(u64::try_from(secs).unwrap_or(0));
        format!("updated {} ago", humantime::format_duration(age))
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.search_active {
            let line = Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme::SUNSHINE)),
                Span::styled(&self.search_query, Style::default().fg(theme::SKY)),
                Span::styled("█", Style::default().fg(theme::SKY)),
                Span::styled("  Esc cancel  Enter submit", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let indicator = match self.sim_state {
            SimulatorState::Running => {
                Span::styled("● live", Style::default().fg(theme::MEADOW))
            }
            SimulatorState::Stopped => {
                Span::styled("○ stopped", Style::default().fg(theme::ALERT_RED))
            }
        };

        let line = Line::from(vec![
            Span::raw(" "),
            indicator,
            Span::styled(
                format!("  tick {}  {}", self.tick_count, self.data_age_label()),
                theme::label(),
            ),
            Span::styled(" │ ? help  / search  q quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 60u16.min(area.width.saturating_sub(4));
        let help_height = 24u16.min(area.height.saturating_sub(4));
        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let key = |k: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {k:<10}"), theme::key_hint_key()),
                Span::styled(desc, theme::key_hint()),
            ])
        };
        let heading = |title: &'static str| {
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::SKY),
            ))
        };

        let help_text = vec![
            Line::from(""),
            heading("Navigation"),
            key("1-7", "Jump to screen"),
            key("Tab", "Next screen"),
            key("j/k ↑/↓", "Move up/down"),
            key("g/G", "Top / bottom"),
            key("h/l", "Switch sub-tab"),
            key("Esc", "Back"),
            Line::from(""),
            heading("Fleet"),
            key("Enter", "Inspect vehicle"),
            key("c", "Clear selection"),
            key("f", "Cycle filter"),
            key("a / A", "Acknowledge alert / all"),
            key("s", "Sort drivers"),
            Line::from(""),
            heading("Global"),
            key("/", "Search"),
            key("?", "This help"),
            key("q", "Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "                         Esc or ? to close",
                theme::key_hint(),
            )),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }

    /// Toast in the bottom-right corner, above the status bar.
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
        let width = msg_len
            .saturating_add(6)
            .clamp(20, 70)
            .min(area.width.saturating_sub(2));
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2);
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::MEADOW, "✓"),
            NotificationLevel::Error => (theme::ALERT_RED, "✗"),
            NotificationLevel::Warning => (theme::AMBER, "!"),
            NotificationLevel::Info => (theme::SKY, "·"),
        };

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(&notif.message, Style::default().fg(theme::TEXT)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}
