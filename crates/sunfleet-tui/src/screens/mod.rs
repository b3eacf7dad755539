//! Screen implementations. Each screen is a top-level Component.

pub mod alerts;
pub mod contact;
pub mod drivers;
pub mod fleet;
pub mod operations;
pub mod support;
pub mod tracking;

use crate::component::Component;
use crate::screen::ScreenId;

pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Fleet, Box::new(fleet::FleetScreen::new())),
        (ScreenId::Alerts, Box::new(alerts::AlertsScreen::new())),
        (ScreenId::Drivers, Box::new(drivers::DriversScreen::new())),
        (
            ScreenId::Operations,
            Box::new(operations::OperationsScreen::new()),
        ),
        (ScreenId::Tracking, Box::new(tracking::TrackingScreen::new())),
        (ScreenId::Support, Box::new(support::SupportScreen::new())),
        (ScreenId::Contact, Box::new(contact::ContactScreen::new())),
    ]
}

/// Move a table cursor by `delta` rows, clamped to `[0, len)`.
/// `None` for an empty table.
pub(crate) fn step(current: Option<usize>, len: usize, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let cur = current.unwrap_or(0).min(len - 1);
    let next = if delta.is_negative() {
        cur.saturating_sub(delta.unsigned_abs())
    } else {
        cur.saturating_add(delta.unsigned_abs()).min(len - 1)
    };
    Some(next)
}

/// Keep a cursor inside a table that may have shrunk.
pub(crate) fn clamp(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(current.unwrap_or(0).min(len - 1))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn step_clamps_to_table() {
        assert_eq!(step(Some(0), 5, -1), Some(0));
        assert_eq!(step(Some(3), 5, 10), Some(4));
        assert_eq!(step(None, 5, 1), Some(1));
        assert_eq!(step(Some(2), 0, 1), None);
    }

    #[test]
    fn clamp_follows_shrinking_tables() {
        assert_eq!(clamp(Some(7), 3), Some(2));
        assert_eq!(clamp(None, 3), Some(0));
        assert_eq!(clamp(Some(1), 0), None);
    }

    #[test]
    fn every_screen_is_created_once() {
        let screens = create_screens();
        assert_eq!(screens.len(), ScreenId::ALL.len());
        for id in ScreenId::ALL {
            assert_eq!(screens.iter().filter(|(s, _)| *s == id).count(), 1);
        }
    }
}
