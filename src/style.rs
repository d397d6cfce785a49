use serde::Deserialize;

use crate::grid::DayCell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl Color {
    /// Index into the basic 16-color ANSI palette.
    pub fn ansi(&self) -> u8 {
        match self {
            Color::Black => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
            Color::Magenta => 5,
            Color::Cyan => 6,
            Color::White => 7,
            Color::Gray => 8,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleAttributes {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub dim: bool,
    pub invert: bool,
    pub strikethrough: bool,
}

impl StyleAttributes {
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn dim(mut self, dim: bool) -> Self {
        self.dim = dim;
        self
    }

    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = strikethrough;
        self
    }

    /// Layers `other` on top of `self`: its colors win where set, flags
    /// accumulate.
    pub fn apply(self, other: StyleAttributes) -> Self {
        StyleAttributes {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            dim: self.dim || other.dim,
            invert: self.invert || other.invert,
            strikethrough: self.strikethrough || other.strikethrough,
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == StyleAttributes::default()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub day_style: StyleAttributes,
    pub outside_day_style: StyleAttributes,
    pub today_day_style: StyleAttributes,
    pub selected_day_style: StyleAttributes,
    pub disabled_day_style: StyleAttributes,
    pub focus_day_style: StyleAttributes,
    pub month_header_style: StyleAttributes,
    pub weekday_header_style: StyleAttributes,
    pub today_char: Option<char>,
    pub focus_char: Option<char>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            day_style: StyleAttributes::default(),
            outside_day_style: StyleAttributes::default().fg(Color::Gray),
            today_day_style: StyleAttributes::default().italic(true),
            selected_day_style: StyleAttributes::default().invert(true),
            disabled_day_style: StyleAttributes::default().dim(true).strikethrough(true),
            focus_day_style: StyleAttributes::default().bg(Color::Blue),
            month_header_style: StyleAttributes::default().fg(Color::Yellow).bold(true),
            weekday_header_style: StyleAttributes::default().fg(Color::Yellow),
            today_char: Some('*'),
            focus_char: None,
        }
    }
}

/// Visual attributes of one grid cell. Later classifications layer over
/// earlier ones: outside-month, today, selected, disabled.
pub fn cell_style(cell: &DayCell, theme: &Theme) -> StyleAttributes {
    let mut style = theme.day_style;

    if !cell.is_current_month {
        style = style.apply(theme.outside_day_style);
    }
    if cell.is_today {
        style = style.apply(theme.today_day_style);
    }
    if cell.is_selected {
        style = style.apply(theme.selected_day_style);
    }
    if cell.is_disabled {
        style = style.apply(theme.disabled_day_style);
    }

    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datemath::CalendarDate;

    fn cell() -> DayCell {
        DayCell {
            date: CalendarDate::from_ymd_normalized(2024, 5, 15),
            is_current_month: true,
            is_today: false,
            is_selected: false,
            is_disabled: false,
        }
    }

    #[test]
    fn plain_day_uses_base_style() {
        let theme = Theme::default();
        assert_eq!(cell_style(&cell(), &theme), theme.day_style);
    }

    #[test]
    fn classifications_layer() {
        let theme = Theme::default();
        let c = DayCell {
            is_today: true,
            is_selected: true,
            ..cell()
        };

        let style = cell_style(&c, &theme);
        assert!(style.italic);
        assert!(style.invert);
        assert!(!style.strikethrough);
    }

    #[test]
    fn outside_and_disabled() {
        let theme = Theme::default();
        let c = DayCell {
            is_current_month: false,
            is_disabled: true,
            ..cell()
        };

        let style = cell_style(&c, &theme);
        assert_eq!(style.fg, Some(Color::Gray));
        assert!(style.dim && style.strikethrough);
    }

    #[test]
    fn apply_prefers_overlay_colors() {
        let base = StyleAttributes::default().fg(Color::Red).bg(Color::Black);
        let merged = base.apply(StyleAttributes::default().fg(Color::Green));
        assert_eq!(merged.fg, Some(Color::Green));
        assert_eq!(merged.bg, Some(Color::Black));
        assert!(StyleAttributes::default().is_plain());
    }
}
