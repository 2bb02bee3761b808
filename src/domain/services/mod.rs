pub mod availability;
pub mod capacity;
pub mod recurrence;
pub mod scheduler;
pub mod time_window;
