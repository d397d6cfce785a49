use crate::clock::Clock;
use crate::datemath::{self, CalendarDate, MonthCursor};

pub const WEEK_LEN: usize = 7;
pub const WEEKS: usize = 6;
pub const GRID_CELLS: usize = WEEK_LEN * WEEKS;

/// Inclusive range of selectable dates. Either end may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min: Option<CalendarDate>,
    pub max: Option<CalendarDate>,
}

impl Bounds {
    pub fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Self {
        Bounds { min, max }
    }

    pub fn unbounded() -> Self {
        Bounds::default()
    }

    pub fn is_disabled(&self, date: &CalendarDate) -> bool {
        self.min.map_or(false, |min| date < &min) || self.max.map_or(false, |max| date > &max)
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        !self.is_disabled(date)
    }

    /// True if no date at all can be selected (`min > max`).
    pub fn is_empty(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }

    /// Nearest selectable date to `date`, or `None` for empty bounds.
    pub fn clamp(&self, date: CalendarDate) -> Option<CalendarDate> {
        if self.is_empty() {
            return None;
        }

        let date = self.min.map_or(date, |min| date.max(min));
        Some(self.max.map_or(date, |max| date.min(max)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub date: CalendarDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
}

impl DayCell {
    pub fn day_num(&self) -> u32 {
        self.date.day()
    }
}

/// Six Sunday-first weeks covering one month plus the surrounding days of
/// its neighbours.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cursor: MonthCursor,
    cells: Vec<DayCell>,
}

impl Grid {
    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter()
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(WEEK_LEN)
    }

    pub fn cell(&self, date: &CalendarDate) -> Option<&DayCell> {
        self.cells.iter().find(|cell| &cell.date == date)
    }

    pub fn selected(&self) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.is_selected)
    }

    pub fn today(&self) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.is_today)
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a DayCell;
    type IntoIter = std::slice::Iter<'a, DayCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

pub fn build_grid<C: Clock + ?Sized>(
    cursor: MonthCursor,
    value: Option<CalendarDate>,
    bounds: &Bounds,
    clock: &C,
) -> Grid {
    let first = datemath::start_of_month(cursor);
    let grid_start = datemath::add_days(first, -(datemath::day_of_week(first) as i64));
    let today = clock.today();

    let cells = (0..GRID_CELLS as i64)
        .map(|i| datemath::add_days(grid_start, i))
        .map(|date| {
            let is_current_month = cursor.contains(&date);

            DayCell {
                date,
                is_current_month,
                is_today: datemath::same_date(&date, &today),
                is_selected: is_current_month
                    && value.map_or(false, |v| datemath::same_date(&date, &v)),
                is_disabled: bounds.is_disabled(&date),
            }
        })
        .collect();

    Grid { cursor, cells }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

pub fn navigate(cursor: MonthCursor, direction: Direction) -> MonthCursor {
    match direction {
        Direction::Prev => datemath::add_months(cursor, -1),
        Direction::Next => datemath::add_months(cursor, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn clock() -> FixedClock {
        FixedClock(date(2024, 5, 15))
    }

    #[test]
    fn grid_shape_holds_for_many_months() {
        for year in [1900, 1999, 2000, 2023, 2024, 2100] {
            for month in 0..12 {
                let cursor = MonthCursor::new(year, month);
                let grid = build_grid(cursor, None, &Bounds::unbounded(), &clock());

                assert_eq!(grid.len(), GRID_CELLS);
                assert_eq!(grid.weeks().count(), WEEKS);
                assert_eq!(datemath::day_of_week(grid.cells()[0].date), 0);
                assert_eq!(datemath::day_of_week(grid.cells()[41].date), 6);

                for day in 1..=datemath::days_of_month(cursor) {
                    let hits = grid
                        .iter()
                        .filter(|c| c.is_current_month && c.date.day() == day)
                        .count();
                    assert_eq!(hits, 1, "{} day {}", cursor, day);
                }
            }
        }
    }

    #[test]
    fn cells_are_consecutive() {
        let grid = build_grid(MonthCursor::new(2024, 1), None, &Bounds::unbounded(), &clock());
        for pair in grid.cells().windows(2) {
            assert_eq!(datemath::add_days(pair[0].date, 1), pair[1].date);
        }
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_days() {
        // September 2024 starts on a Sunday
        let grid = build_grid(MonthCursor::new(2024, 8), None, &Bounds::unbounded(), &clock());
        assert_eq!(grid.cells()[0].date, date(2024, 8, 1));
        assert!(grid.cells()[0].is_current_month);
    }

    #[test]
    fn leading_days_come_from_previous_month() {
        // June 2024 starts on a Saturday
        let grid = build_grid(MonthCursor::new(2024, 5), None, &Bounds::unbounded(), &clock());
        assert_eq!(grid.cells()[0].date, date(2024, 4, 26));
        assert!(!grid.cells()[0].is_current_month);
        assert_eq!(grid.cells()[6].date, date(2024, 5, 1));
        assert!(grid.cells()[6].is_current_month);
        assert_eq!(grid.cells()[41].date, date(2024, 6, 6));
    }

    #[test]
    fn selection_of_other_month_is_not_marked() {
        let value = date(2024, 4, 30);
        let grid = build_grid(
            MonthCursor::new(2024, 5),
            Some(value),
            &Bounds::unbounded(),
            &clock(),
        );

        let cell = grid.cell(&value).expect("leading cell present");
        assert!(!cell.is_current_month);
        assert!(!cell.is_selected);
        assert!(grid.selected().is_none());
    }

    #[test]
    fn selection_in_month_is_marked_once() {
        let value = date(2024, 5, 20);
        let grid = build_grid(
            MonthCursor::new(2024, 5),
            Some(value),
            &Bounds::unbounded(),
            &clock(),
        );

        assert_eq!(grid.iter().filter(|c| c.is_selected).count(), 1);
        assert_eq!(grid.selected().map(|c| c.date), Some(value));
    }

    #[test]
    fn today_is_marked_once_with_fixed_clock() {
        let grid = build_grid(MonthCursor::new(2024, 5), None, &Bounds::unbounded(), &clock());
        let today: Vec<_> = grid.iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2024, 5, 15));

        let other = build_grid(MonthCursor::new(2024, 9), None, &Bounds::unbounded(), &clock());
        assert!(other.today().is_none());
    }

    #[test]
    fn disabled_cells_follow_inclusive_bounds() {
        let bounds = Bounds::new(Some(date(2024, 5, 10)), Some(date(2024, 5, 20)));
        let grid = build_grid(MonthCursor::new(2024, 5), None, &bounds, &clock());

        let enabled: Vec<u32> = grid
            .iter()
            .filter(|c| !c.is_disabled)
            .map(|c| c.day_num())
            .collect();
        assert_eq!(enabled, (10..=20).collect::<Vec<_>>());
    }

    #[test]
    fn bounds_clamp() {
        let bounds = Bounds::new(Some(date(2024, 5, 10)), Some(date(2024, 5, 20)));
        assert_eq!(bounds.clamp(date(2024, 5, 1)), Some(date(2024, 5, 10)));
        assert_eq!(bounds.clamp(date(2024, 5, 15)), Some(date(2024, 5, 15)));
        assert_eq!(bounds.clamp(date(2025, 0, 1)), Some(date(2024, 5, 20)));

        let open_ended = Bounds::new(None, Some(date(2024, 5, 20)));
        assert_eq!(open_ended.clamp(date(1999, 0, 1)), Some(date(1999, 0, 1)));

        let inverted = Bounds::new(Some(date(2024, 5, 20)), Some(date(2024, 5, 10)));
        assert!(inverted.is_empty());
        assert_eq!(inverted.clamp(date(2024, 5, 15)), None);
        assert!(inverted.is_disabled(&date(2024, 5, 15)));
    }

    #[test]
    fn navigation_wraps_and_inverts() {
        let december = MonthCursor::new(2024, 11);
        assert_eq!(navigate(december, Direction::Next), MonthCursor::new(2025, 0));

        let january = MonthCursor::new(2024, 0);
        assert_eq!(navigate(january, Direction::Prev), MonthCursor::new(2023, 11));

        for month in 0..12 {
            let cursor = MonthCursor::new(2024, month);
            let there_and_back = navigate(navigate(cursor, Direction::Next), Direction::Prev);
            assert_eq!(there_and_back, cursor);
        }
    }
}
