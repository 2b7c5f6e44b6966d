pub mod locks;
pub mod time_utils;

pub use locks::KeyedLocks;
pub use time_utils::{ClockTrait, FixedClock, SystemClock};
