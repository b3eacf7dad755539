// ── Typed identifiers ──
//
// Every record in the fleet carries a string identifier. Wrapping each
// in its own newtype keeps a `VehicleId` from being handed to an alert
// lookup by accident. All of them serialize as plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_owned()))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a fleet vehicle (`vehicle-1`, ...).
    VehicleId
);
string_id!(
    /// Identifier of a driver (`driver-1`, ...).
    DriverId
);
string_id!(
    /// Identifier of an alert. Seed alerts use `alert-N`; generated alerts
    /// use `alert-<millis>-<seq>`.
    AlertId
);
string_id!(TripId);
string_id!(MaintenanceId);
string_id!(RideId);
string_id!(TicketId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        let id: VehicleId = "vehicle-3".parse().unwrap();
        assert_eq!(id.to_string(), "vehicle-3");
        assert_eq!(id.as_str(), "vehicle-3");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = AlertId::new("alert-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"alert-1\"");

        let back: AlertId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn distinct_types_compare_by_value() {
        assert_eq!(DriverId::from("driver-1"), DriverId::new(String::from("driver-1")));
        assert_ne!(TripId::from("trip-1"), TripId::from("trip-2"));
    }
}
