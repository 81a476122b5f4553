mod available_types;
mod company;
mod date_range;
mod employee;
mod time_clock;

pub use available_types::*;
pub use company::*;
pub use date_range::*;
pub use employee::*;
pub use time_clock::*;
