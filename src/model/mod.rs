mod event;
mod fight;
mod fighter;
mod odds;
mod scorecard;
mod stats;

pub use event::*;
pub use fight::*;
pub use fighter::*;
pub use odds::*;
pub use scorecard::*;
pub use stats::*;
