//! Operation handlers, grouped by domain area.

pub mod attendance;
pub mod directory;
pub mod roster;
pub mod share_links;
