//! The closed set of capabilities a share link can grant on a team.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Capability granted on a team, either implicitly through ownership or
/// explicitly through a share link.
///
/// The set is closed; it is not extensible at runtime. Wire strings are the
/// kebab-case forms (`view-team`, `manage-participants`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Base capability every share link implies: see the team itself.
    ViewTeam,
    ManageParticipants,
    ViewParticipants,
    ManageAttendance,
    ViewAttendance,
    ViewReports,
}

/// Error type for parsing Capability from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCapabilityError(pub String);

impl std::fmt::Display for ParseCapabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid capability: {}", self.0)
    }
}

impl std::error::Error for ParseCapabilityError {}

impl FromStr for Capability {
    type Err = ParseCapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view-team" => Ok(Capability::ViewTeam),
            "manage-participants" => Ok(Capability::ManageParticipants),
            "view-participants" => Ok(Capability::ViewParticipants),
            "manage-attendance" => Ok(Capability::ManageAttendance),
            "view-attendance" => Ok(Capability::ViewAttendance),
            "view-reports" => Ok(Capability::ViewReports),
            _ => Err(ParseCapabilityError(s.to_string())),
        }
    }
}

impl Capability {
    /// All capabilities, in wire order.
    pub const ALL: [Capability; 6] = [
        Capability::ViewTeam,
        Capability::ManageParticipants,
        Capability::ViewParticipants,
        Capability::ManageAttendance,
        Capability::ViewAttendance,
        Capability::ViewReports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ViewTeam => "view-team",
            Capability::ManageParticipants => "manage-participants",
            Capability::ViewParticipants => "view-participants",
            Capability::ManageAttendance => "manage-attendance",
            Capability::ViewAttendance => "view-attendance",
            Capability::ViewReports => "view-reports",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
