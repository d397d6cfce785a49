//! Month-grid calendar engine for date pickers.
//!
//! [`grid::build_grid`] lays out six Sunday-first weeks around a month,
//! [`selection::try_select`] gates every selection against the configured
//! [`grid::Bounds`], and [`selection::DatePicker`] ties both to an
//! open/closed picker with a keyboard focus.

pub mod clock;
pub mod cmds;
pub mod config;
pub mod datemath;
pub mod error;
pub mod format;
pub mod grid;
pub mod selection;
pub mod style;
pub mod ui;

pub use clock::{Clock, FixedClock, SystemClock};
pub use datemath::{CalendarDate, MonthCursor};
pub use grid::{build_grid, navigate, Bounds, DayCell, Direction, Grid};
pub use selection::{try_select, DatePicker, PickerState, Rejected};
