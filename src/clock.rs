use chrono::Local;

use crate::datemath::CalendarDate;

/// Source of "today". Grid building asks this once per build, so a picker
/// can be pinned to a fixed day in tests.
pub trait Clock {
    fn today(&self) -> CalendarDate;
}

/// Reads the local wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate::from(Local::now().date_naive())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> CalendarDate {
        (**self).today()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today(&self) -> CalendarDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_stable() {
        let day = CalendarDate::from_ymd_normalized(2024, 5, 15);
        let clock = FixedClock(day);
        assert_eq!(clock.today(), day);
        assert_eq!((&clock).today(), day);

        let boxed: Box<dyn Clock> = Box::new(clock);
        assert_eq!(boxed.today(), day);
    }

    #[test]
    fn system_clock_matches_local_date() {
        let before = Local::now().date_naive();
        let today = SystemClock.today().naive();
        let after = Local::now().date_naive();
        assert!(before <= today && today <= after);
    }
}
