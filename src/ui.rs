//! Text rendering of a month grid, with and without terminal styling.

use itertools::Itertools;
use termion::color::{self, AnsiValue};
use termion::style;

use crate::datemath::{CalendarDate, WEEKDAY_LABELS};
use crate::grid::{DayCell, Grid, WEEK_LEN};
use crate::style::{cell_style, StyleAttributes, Theme};

pub const CELL_WIDTH: usize = 4;
pub const GRID_WIDTH: usize = CELL_WIDTH * WEEK_LEN;

fn cell_text(cell: &DayCell, focused: bool, theme: &Theme) -> String {
    let today = if cell.is_today {
        theme.today_char.unwrap_or(' ')
    } else {
        ' '
    };

    let focus = if focused {
        theme.focus_char.unwrap_or(' ')
    } else {
        ' '
    };

    format!("{}{}{:>2}", today, focus, cell.day_num())
}

fn paint(text: &str, attrs: &StyleAttributes) -> String {
    if attrs.is_plain() {
        return text.to_owned();
    }

    let mut out = String::new();
    if let Some(fg) = attrs.fg {
        out.push_str(&color::Fg(AnsiValue(fg.ansi())).to_string());
    }
    if let Some(bg) = attrs.bg {
        out.push_str(&color::Bg(AnsiValue(bg.ansi())).to_string());
    }
    if attrs.bold {
        out.push_str(&style::Bold.to_string());
    }
    if attrs.italic {
        out.push_str(&style::Italic.to_string());
    }
    if attrs.dim {
        out.push_str(&style::Faint.to_string());
    }
    if attrs.invert {
        out.push_str(&style::Invert.to_string());
    }
    if attrs.strikethrough {
        out.push_str(&style::CrossedOut.to_string());
    }
    out.push_str(text);
    out.push_str(&style::Reset.to_string());
    out
}

struct Renderer<'a> {
    theme: &'a Theme,
    styled: bool,
}

impl Renderer<'_> {
    fn paint(&self, text: &str, attrs: &StyleAttributes) -> String {
        if self.styled {
            paint(text, attrs)
        } else {
            text.to_owned()
        }
    }

    fn render(&self, grid: &Grid, focus: Option<&CalendarDate>) -> String {
        let title = format!("{:^width$}", grid.cursor().to_string(), width = GRID_WIDTH);

        let header = WEEKDAY_LABELS
            .iter()
            .map(|label| format!("{:>width$}", label, width = CELL_WIDTH))
            .join("");

        let weeks = grid.weeks().map(|week| {
            week.iter()
                .map(|cell| {
                    let focused = focus == Some(&cell.date);
                    let mut attrs = cell_style(cell, self.theme);
                    if focused {
                        attrs = attrs.apply(self.theme.focus_day_style);
                    }
                    self.paint(&cell_text(cell, focused, self.theme), &attrs)
                })
                .join("")
        });

        std::iter::once(self.paint(&title, &self.theme.month_header_style))
            .chain(std::iter::once(
                self.paint(&header, &self.theme.weekday_header_style),
            ))
            .chain(weeks)
            .join("\n")
    }
}

/// Renders `grid` with terminal colors and styles.
pub fn render(grid: &Grid, focus: Option<&CalendarDate>, theme: &Theme) -> String {
    Renderer {
        theme,
        styled: true,
    }
    .render(grid, focus)
}

/// Renders `grid` as plain text: title, weekday header and six weeks.
pub fn render_plain(grid: &Grid, focus: Option<&CalendarDate>, theme: &Theme) -> String {
    Renderer {
        theme,
        styled: false,
    }
    .render(grid, focus)
}
