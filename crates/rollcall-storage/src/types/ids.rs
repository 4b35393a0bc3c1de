//! Strongly-typed identifiers (avoid mixing strings/UUIDs arbitrarily).

use uuid::Uuid;

/// User identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

/// Team identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TeamId(pub Uuid);

/// Participant identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParticipantId(pub Uuid);

/// Attendance activity identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActivityId(pub Uuid);

/// Attendance record identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttendanceRecordId(pub Uuid);

/// Share link identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShareLinkId(pub Uuid);
