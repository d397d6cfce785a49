use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;

use crate::datemath::{CalendarDate, MonthCursor};
use crate::error::{Error, ErrorKind};
use crate::selection::Rejected;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr)]
pub enum Cmd {
    Noop,
    Activate,
    Dismiss,
    Close,
    PrevDay,
    NextDay,
    PrevWeek,
    NextWeek,
    PrevMonth,
    NextMonth,
    Today,
    Confirm,
    Exit,
}

impl Cmd {
    const NAMES: &'static [(&'static str, Cmd)] = &[
        ("noop", Cmd::Noop),
        ("activate", Cmd::Activate),
        ("dismiss", Cmd::Dismiss),
        ("close", Cmd::Close),
        ("prev_day", Cmd::PrevDay),
        ("next_day", Cmd::NextDay),
        ("prev_week", Cmd::PrevWeek),
        ("next_week", Cmd::NextWeek),
        ("prev_month", Cmd::PrevMonth),
        ("next_month", Cmd::NextMonth),
        ("today", Cmd::Today),
        ("confirm", Cmd::Confirm),
        ("exit", Cmd::Exit),
    ];

    pub fn name(&self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, cmd)| cmd == self)
            .map_or("noop", |(name, _)| *name)
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Cmd {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s.trim()))
            .map(|(_, cmd)| *cmd)
            .ok_or_else(|| Error::new(ErrorKind::CommandParse, &format!("'{}'", s)))
    }
}

/// What handling a [`Cmd`] did to a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Opened,
    Closed,
    Navigated(MonthCursor),
    Focused(CalendarDate),
    Selected(CalendarDate),
    Rejected(Rejected),
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for (name, cmd) in Cmd::NAMES {
            assert_eq!(name.parse::<Cmd>().ok(), Some(*cmd));
            assert_eq!(cmd.to_string(), *name);
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("Next_Month".parse::<Cmd>().ok(), Some(Cmd::NextMonth));
        assert!("sideways".parse::<Cmd>().is_err());
    }
}
