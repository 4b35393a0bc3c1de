//! Record types, parameter structs and enumerations shared by all backends.

mod attendance;
mod capabilities;
mod ids;
mod participants;
mod share_links;
mod teams;

pub use attendance::*;
pub use capabilities::*;
pub use ids::*;
pub use participants::*;
pub use share_links::*;
pub use teams::*;
