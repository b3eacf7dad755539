//! Contact form. Submission is simulated: the form validates, waits out
//! the configured delay, then shows a confirmation.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use strum::IntoEnumIterator;

use sunfleet_core::contact::{self, BUSINESS_HOURS, SERVICE_AREAS};
use sunfleet_core::{ContactForm, FormPhase, ServiceType};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::panel::panel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Phone,
    Email,
    Service,
    Message,
    Submit,
}

impl Field {
    const ALL: [Self; 6] = [
        Self::Name,
        Self::Phone,
        Self::Email,
        Self::Service,
        Self::Message,
        Self::Submit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Service => "Service",
            Self::Message => "Message",
            Self::Submit => "Send Message",
        }
    }

    fn is_text(self) -> bool {
        matches!(self, Self::Name | Self::Phone | Self::Email | Self::Message)
    }
}

/// `None` → first → ... → last → `None`.
fn cycle_service(current: Option<ServiceType>, forward: bool) -> Option<ServiceType> {
    let all: Vec<ServiceType> = ServiceType::iter().collect();
    let pos = current.and_then(|s| all.iter().position(|&t| t == s));
    let next = match (pos, forward) {
        (None, true) => Some(0),
        (None, false) => all.len().checked_sub(1),
        (Some(i), true) => Some(i + 1).filter(|&n| n < all.len()),
        (Some(i), false) => i.checked_sub(1),
    };
    next.and_then(|i| all.get(i).copied())
}

pub struct ContactScreen {
    focused: bool,
    form: ContactForm,
    field: Field,
    editing: bool,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl ContactScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            form: ContactForm::new(),
            field: Field::Name,
            editing: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let req = &mut self.form.request;
        match field {
            Field::Name => Some(&mut req.name),
            Field::Phone => Some(&mut req.phone),
            Field::Email => Some(&mut req.email),
            Field::Message => Some(&mut req.message),
            Field::Service | Field::Submit => None,
        }
    }

    fn display_value(&self, field: Field) -> String {
        let req = &self.form.request;
        match field {
            Field::Name => req.name.clone(),
            Field::Phone => req.phone.clone(),
            Field::Email => req.email.clone(),
            Field::Message => req.message.clone(),
            Field::Service => req
                .service
                .map_or_else(|| "Select a service...".to_owned(), |s| s.label().to_owned()),
            Field::Submit => String::new(),
        }
    }

    fn move_field(&mut self, delta: isize) {
        let idx = Field::ALL.iter().position(|&f| f == self.field).unwrap_or(0);
        let next = super::step(Some(idx), Field::ALL.len(), delta).unwrap_or(0);
        self.field = Field::ALL[next];
    }

    fn submit(&mut self) -> Option<Action> {
        match self.form.begin_submit() {
            Ok(()) => Some(Action::ContactSubmitting),
            Err(e) => Some(Action::Notify(Notification::error(e.to_string()))),
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let field = self.field;
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => self.editing = false,
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut(field) {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.text_mut(field) {
                    text.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_field(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_field(-1),
            KeyCode::Char('l') | KeyCode::Right if self.field == Field::Service => {
                self.form.request.service = cycle_service(self.form.request.service, true);
            }
            KeyCode::Char('h') | KeyCode::Left if self.field == Field::Service => {
                self.form.request.service = cycle_service(self.form.request.service, false);
            }
            KeyCode::Enter => match self.field {
                f if f.is_text() => self.editing = true,
                Field::Service => {
                    self.form.request.service = cycle_service(self.form.request.service, true);
                }
                _ => return self.submit(),
            },
            _ => {}
        }
        None
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from("")];
        for field in Field::ALL {
            let selected = field == self.field;
            if field == Field::Submit {
                lines.push(Line::from(""));
                let style = if selected {
                    Style::default()
                        .fg(theme::BG_DARK)
                        .bg(theme::SUNSHINE)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme::SUNSHINE)
                };
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!(" {} ", field.label()), style),
                ]));
                continue;
            }

            let marker = if selected { "▸ " } else { "  " };
            let mut value = self.display_value(field);
            if selected && self.editing {
                value.push('█');
            }
            let value_style = if field == Field::Service && self.form.request.service.is_none() {
                Style::default().fg(theme::MUTED)
            } else if selected {
                Style::default().fg(theme::SUNSHINE)
            } else {
                theme::value()
            };
            let required = if field == Field::Service { " " } else { "*" };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme::SUNSHINE)),
                Span::styled(format!("{:<8}", field.label()), theme::label()),
                Span::styled(required, Style::default().fg(theme::ALERT_RED)),
                Span::raw(" "),
                Span::styled(value, value_style),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_submitting(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
        let throbber = throbber_widgets_tui::Throbber::default()
            .label("  Sending message...")
            .style(Style::default().fg(theme::TEXT))
            .throbber_style(Style::default().fg(theme::SUNSHINE));
        frame.render_stateful_widget(throbber, layout[1], &mut self.throbber_state.clone());
    }

    fn render_submitted(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  ✓ Message Sent!",
                Style::default()
                    .fg(theme::MEADOW)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "  Thank you for contacting Sunshine Rides, {}. We'll be in touch shortly.",
                    self.form.request.name
                ),
                theme::value(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  n ", theme::key_hint_key()),
                Span::styled("send another message", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_info(frame: &mut Frame, area: Rect) {
        let block = panel(" Sunshine Rides ".to_owned(), false);
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Phone  ", theme::label()),
                Span::styled(contact::PHONE, Style::default().fg(theme::SUNSHINE)),
            ]),
            Line::from(vec![
                Span::styled("  Email  ", theme::label()),
                Span::styled(contact::EMAIL, Style::default().fg(theme::SKY)),
            ]),
            Line::from(""),
            Line::from(Span::styled("  Service Areas", theme::title_style())),
        ];
        lines.extend(
            SERVICE_AREAS
                .iter()
                .map(|a| Line::from(Span::styled(format!("    · {a}"), theme::value()))),
        );
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Hours", theme::title_style())));
        lines.extend(BUSINESS_HOURS.iter().map(|(days, hours)| {
            Line::from(vec![
                Span::styled(format!("    {days:<18}"), theme::label()),
                Span::styled(*hours, theme::value()),
            ])
        }));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Component for ContactScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.form.phase() {
            FormPhase::Editing if self.editing => {
                self.handle_edit_key(key);
                None
            }
            FormPhase::Editing => self.handle_form_key(key),
            FormPhase::Submitting => None,
            FormPhase::Submitted => {
                if matches!(key.code, KeyCode::Char('n') | KeyCode::Enter) {
                    self.form.reset();
                    self.field = Field::Name;
                }
                None
            }
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ContactSubmitted => self.form.complete_submit(),
            Action::Tick => {
                if self.form.phase() == FormPhase::Submitting {
                    self.throbber_state.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let cols = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let block = panel(" Contact Us ".to_owned(), self.focused);
        let inner = block.inner(cols[0]);
        frame.render_widget(block, cols[0]);
        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        match self.form.phase() {
            FormPhase::Editing => self.render_form(frame, layout[0]),
            FormPhase::Submitting => self.render_submitting(frame, layout[0]),
            FormPhase::Submitted => self.render_submitted(frame, layout[0]),
        }

        let hints = if self.editing {
            Line::from(vec![
                Span::styled("  Enter/Esc ", theme::key_hint_key()),
                Span::styled("done", theme::key_hint()),
            ])
        } else if self.form.phase() == FormPhase::Editing {
            Line::from(vec![
                Span::styled("  j/k ", theme::key_hint_key()),
                Span::styled("field  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("edit/send  ", theme::key_hint()),
                Span::styled("h/l ", theme::key_hint_key()),
                Span::styled("service", theme::key_hint()),
            ])
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(hints), layout[1]);

        Self::render_info(frame, cols[1]);
    }

    fn captures_input(&self) -> bool {
        self.editing
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Contact"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    use super::*;

    fn press(screen: &mut ContactScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_text(screen: &mut ContactScreen, text: &str) {
        press(screen, KeyCode::Enter);
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
        press(screen, KeyCode::Enter);
    }

    #[test]
    fn service_cycles_through_none() {
        let first = cycle_service(None, true);
        assert_eq!(first, Some(ServiceType::Local));
        assert_eq!(cycle_service(Some(ServiceType::Other), true), None);
        assert_eq!(cycle_service(None, false), Some(ServiceType::Other));
        assert_eq!(cycle_service(first, false), None);
    }

    #[test]
    fn editing_captures_keys_including_globals() {
        let mut screen = ContactScreen::new();
        press(&mut screen, KeyCode::Enter);
        assert!(screen.captures_input());

        // 'q' and 'j' are text while editing
        press(&mut screen, KeyCode::Char('q'));
        press(&mut screen, KeyCode::Char('j'));
        press(&mut screen, KeyCode::Backspace);
        press(&mut screen, KeyCode::Esc);
        assert!(!screen.captures_input());
        assert_eq!(screen.form.request.name, "q");
        assert_eq!(screen.field, Field::Name);
    }

    #[test]
    fn invalid_submit_notifies_and_stays_editing() {
        let mut screen = ContactScreen::new();
        for _ in 0..5 {
            press(&mut screen, KeyCode::Char('j'));
        }
        assert_eq!(screen.field, Field::Submit);
        let action = press(&mut screen, KeyCode::Enter);
        assert!(matches!(
            action,
            Some(Action::Notify(Notification { ref message, .. })) if message.contains("name")
        ));
        assert_eq!(screen.form.phase(), FormPhase::Editing);
    }

    #[test]
    fn full_submission_flow() {
        let mut screen = ContactScreen::new();
        type_text(&mut screen, "John Doe");
        press(&mut screen, KeyCode::Char('j'));
        type_text(&mut screen, "(970) 555-0123");
        press(&mut screen, KeyCode::Char('j'));
        type_text(&mut screen, "john@example.com");
        press(&mut screen, KeyCode::Char('j'));
        press(&mut screen, KeyCode::Char('l'));
        press(&mut screen, KeyCode::Char('l'));
        press(&mut screen, KeyCode::Char('l'));
        assert_eq!(screen.form.request.service, Some(ServiceType::Airport));
        press(&mut screen, KeyCode::Char('j'));
        type_text(&mut screen, "Need a ride to the airport");
        press(&mut screen, KeyCode::Char('j'));

        let action = press(&mut screen, KeyCode::Enter);
        assert!(matches!(action, Some(Action::ContactSubmitting)));
        assert_eq!(screen.form.phase(), FormPhase::Submitting);

        // keys are ignored mid-flight
        press(&mut screen, KeyCode::Char('n'));
        assert_eq!(screen.form.phase(), FormPhase::Submitting);

        screen.update(&Action::ContactSubmitted).unwrap();
        assert_eq!(screen.form.phase(), FormPhase::Submitted);

        press(&mut screen, KeyCode::Char('n'));
        assert_eq!(screen.form.phase(), FormPhase::Editing);
        assert!(screen.form.request.name.is_empty());
        assert_eq!(screen.field, Field::Name);
    }
}
