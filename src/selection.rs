use std::error;
use std::fmt;

use crate::clock::{Clock, SystemClock};
use crate::cmds::{Cmd, Outcome};
use crate::datemath::{self, CalendarDate, MonthCursor};
use crate::grid::{self, Bounds, Direction, Grid};

/// A selection attempt hit a disabled date. Nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected {
    pub date: CalendarDate,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is outside the selectable range", self.date)
    }
}

impl error::Error for Rejected {}

/// The only gate for selections: passes `date` through unless it is
/// disabled by `bounds`.
pub fn try_select(date: CalendarDate, bounds: &Bounds) -> Result<CalendarDate, Rejected> {
    if bounds.contains(&date) {
        Ok(date)
    } else {
        Err(Rejected { date })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    Closed,
    Open,
}

/// One date picker instance: the displayed month, the chosen value, a
/// keyboard focus and the open/closed state.
pub struct DatePicker<C: Clock = SystemClock> {
    state: PickerState,
    cursor: MonthCursor,
    value: Option<CalendarDate>,
    focus: CalendarDate,
    bounds: Bounds,
    clock: C,
}

impl DatePicker<SystemClock> {
    pub fn new(value: Option<CalendarDate>, bounds: Bounds) -> Self {
        DatePicker::with_clock(value, bounds, SystemClock)
    }
}

impl<C: Clock> DatePicker<C> {
    pub fn with_clock(value: Option<CalendarDate>, bounds: Bounds, clock: C) -> Self {
        let focus = value.unwrap_or_else(|| clock.today());

        DatePicker {
            state: PickerState::Closed,
            cursor: focus.cursor(),
            value,
            focus,
            bounds,
            clock,
        }
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PickerState::Open
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn value(&self) -> Option<CalendarDate> {
        self.value
    }

    pub fn focus(&self) -> CalendarDate {
        self.focus
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn grid(&self) -> Grid {
        grid::build_grid(self.cursor, self.value, &self.bounds, &self.clock)
    }

    pub fn activate(&mut self) -> Outcome {
        if self.is_open() {
            return Outcome::Ignored;
        }

        log::debug!("Opening picker at {}", self.cursor);
        self.state = PickerState::Open;
        Outcome::Opened
    }

    /// Click outside or escape.
    pub fn dismiss(&mut self) -> Outcome {
        self.close()
    }

    pub fn close(&mut self) -> Outcome {
        if !self.is_open() {
            return Outcome::Ignored;
        }

        log::debug!("Closing picker");
        self.state = PickerState::Closed;
        Outcome::Closed
    }

    /// Shows the adjacent month. The focus keeps its day of month, clamped
    /// to the length of the new month.
    pub fn navigate(&mut self, direction: Direction) -> MonthCursor {
        self.show_month(grid::navigate(self.cursor, direction))
    }

    /// Jumps straight to `cursor`, e.g. from a month/year dropdown.
    pub fn show_month(&mut self, cursor: MonthCursor) -> MonthCursor {
        self.cursor = cursor;
        self.focus = self.in_month(self.focus.day());

        log::debug!("Showing {}", self.cursor);
        self.cursor
    }

    /// Day `day` of the displayed month, clamped to its length.
    fn in_month(&self, day: u32) -> CalendarDate {
        let last = datemath::days_of_month(self.cursor);
        datemath::add_days(
            datemath::start_of_month(self.cursor),
            day.clamp(1, last) as i64 - 1,
        )
    }

    /// Selects `date` if the bounds allow it and closes the picker. The
    /// cursor stays where it is, so a date from a neighbouring month only
    /// moves the focus to the same day of the displayed month. A rejected
    /// date leaves value, cursor and state untouched.
    pub fn select(&mut self, date: CalendarDate) -> Result<CalendarDate, Rejected> {
        match try_select(date, &self.bounds) {
            Ok(date) => {
                log::debug!("Selected {}", date);
                self.value = Some(date);
                self.focus = if self.cursor.contains(&date) {
                    date
                } else {
                    self.in_month(date.day())
                };
                self.state = PickerState::Closed;
                Ok(date)
            }
            Err(rejected) => {
                log::debug!("{}", rejected);
                Err(rejected)
            }
        }
    }

    /// Moves the keyboard focus. Leaving the displayed month moves the
    /// cursor along with it.
    pub fn move_focus(&mut self, days: i64) -> CalendarDate {
        self.set_focus(datemath::add_days(self.focus, days))
    }

    pub fn focus_today(&mut self) -> CalendarDate {
        let today = self.clock.today();
        self.set_focus(today)
    }

    fn set_focus(&mut self, date: CalendarDate) -> CalendarDate {
        self.focus = date;
        if !self.cursor.contains(&date) {
            self.cursor = date.cursor();
            log::debug!("Focus moved cursor to {}", self.cursor);
        }
        date
    }

    pub fn handle(&mut self, cmd: Cmd) -> Outcome {
        use Cmd::*;

        match cmd {
            Exit => return Outcome::Exit,
            Noop => return Outcome::Ignored,
            Activate => return self.activate(),
            _ if !self.is_open() => return Outcome::Ignored,
            _ => {}
        }

        match cmd {
            Dismiss => self.dismiss(),
            Close => self.close(),
            PrevDay => Outcome::Focused(self.move_focus(-1)),
            NextDay => Outcome::Focused(self.move_focus(1)),
            PrevWeek => Outcome::Focused(self.move_focus(-(grid::WEEK_LEN as i64))),
            NextWeek => Outcome::Focused(self.move_focus(grid::WEEK_LEN as i64)),
            PrevMonth => Outcome::Navigated(self.navigate(Direction::Prev)),
            NextMonth => Outcome::Navigated(self.navigate(Direction::Next)),
            Today => Outcome::Focused(self.focus_today()),
            Confirm => match self.select(self.focus) {
                Ok(date) => Outcome::Selected(date),
                Err(rejected) => Outcome::Rejected(rejected),
            },
            Exit | Noop | Activate => Outcome::Ignored,
        }
    }
}
