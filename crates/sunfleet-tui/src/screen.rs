//! Screen identifiers and tab order.

use std::fmt;

/// Primary screens, navigable by number keys 1-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Fleet,
    Alerts,
    Drivers,
    Operations,
    Tracking,
    Support,
    Contact,
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 7] = [
        Self::Fleet,
        Self::Alerts,
        Self::Drivers,
        Self::Operations,
        Self::Tracking,
        Self::Support,
        Self::Contact,
    ];

    pub fn number(self) -> u8 {
        match self {
            Self::Fleet => 1,
            Self::Alerts => 2,
            Self::Drivers => 3,
            Self::Operations => 4,
            Self::Tracking => 5,
            Self::Support => 6,
            Self::Contact => 7,
        }
    }

    /// Screen for a number key. `None` outside 1-7.
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.number() == n)
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Fleet => "Fleet",
            Self::Alerts => "Alerts",
            Self::Drivers => "Drivers",
            Self::Operations => "Operations",
            Self::Tracking => "Tracking",
            Self::Support => "Support",
            Self::Contact => "Contact",
        }
    }

    /// Compact label for narrow terminals (< 100 cols).
    pub fn label_short(self) -> &'static str {
        match self {
            Self::Fleet => "Flt",
            Self::Alerts => "Alr",
            Self::Drivers => "Drv",
            Self::Operations => "Ops",
            Self::Tracking => "Trk",
            Self::Support => "Sup",
            Self::Contact => "Ctc",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn number_keys_round_trip() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(id.number()), Some(id));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(8), None);
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(ScreenId::Contact.next(), ScreenId::Fleet);
        assert_eq!(ScreenId::Fleet.prev(), ScreenId::Contact);
        assert_eq!(ScreenId::Alerts.next(), ScreenId::Drivers);
        assert_eq!(ScreenId::Drivers.prev(), ScreenId::Alerts);
    }
}
