use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use termion::event::Key;

use crate::cmds::Cmd;
use crate::datemath::CalendarDate;
use crate::error::{Error, ErrorKind, Result};
use crate::format::DEFAULT_FORMAT;
use crate::grid::Bounds;
use crate::style::Theme;

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "DATEPICK_CONFIG_FILE";

pub fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    let config_dir = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .ok()
        .or_else(dirs::config_dir);

    if let Some(dir) = config_dir {
        locations.push(dir.join("datepick").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".datepick.toml"));
    }

    locations
}

/// Loads `path` if given, otherwise the first existing file from
/// [`find_configfile_locations`], otherwise the defaults. A file that exists
/// but cannot be parsed is an error, not a reason to fall back.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => load_first_existing(find_configfile_locations()),
    }
}

fn load_first_existing<I: IntoIterator<Item = PathBuf>>(candidates: I) -> Result<Config> {
    match candidates.into_iter().find(|candidate| candidate.is_file()) {
        Some(candidate) => Config::from_file(&candidate).map_err(|e| {
            let detail = e.message.clone().unwrap_or_else(|| e.kind.as_str());
            let message = format!("{}: {}", candidate.display(), detail);
            e.with_msg(&message)
        }),
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// A terminal key as written in the config, e.g. `"h"`, `"left"`,
/// `"enter"` or `"C-n"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr)]
pub struct KeyBinding(pub Key);

impl FromStr for KeyBinding {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || Error::new(ErrorKind::KeyParse, &format!("'{}'", s));

        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(KeyBinding(Key::Char(c)));
        }

        let key = match s.to_ascii_lowercase().as_str() {
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "home" => Key::Home,
            "end" => Key::End,
            "esc" | "escape" => Key::Esc,
            "enter" | "return" => Key::Char('\n'),
            "space" => Key::Char(' '),
            "tab" => Key::Char('\t'),
            "backspace" => Key::Backspace,
            "delete" => Key::Delete,
            "insert" => Key::Insert,
            other => {
                if let Some(c) = other.strip_prefix("c-").and_then(single_char) {
                    Key::Ctrl(c)
                } else if let Some(c) = other.strip_prefix("a-").and_then(single_char) {
                    Key::Alt(c)
                } else if let Some(n) = other.strip_prefix('f') {
                    Key::F(n.parse().map_err(|_| invalid())?)
                } else {
                    return Err(invalid());
                }
            }
        };

        Ok(KeyBinding(key))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    date_format: Option<String>,
    min_date: Option<CalendarDate>,
    max_date: Option<CalendarDate>,
    keys: HashMap<KeyBinding, Cmd>,
    theme: Option<Theme>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub key_map: KeyMap,
    pub date_format: String,
    pub bounds: Bounds,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Config {
        let mut config = Config {
            key_map: HashMap::new(),
            date_format: DEFAULT_FORMAT.to_owned(),
            bounds: Bounds::unbounded(),
            theme: Theme::default(),
        };

        let defaults = [
            (Key::Char('h'), Cmd::PrevDay),
            (Key::Left, Cmd::PrevDay),
            (Key::Char('l'), Cmd::NextDay),
            (Key::Right, Cmd::NextDay),
            (Key::Char('k'), Cmd::PrevWeek),
            (Key::Up, Cmd::PrevWeek),
            (Key::Char('j'), Cmd::NextWeek),
            (Key::Down, Cmd::NextWeek),
            (Key::Char('H'), Cmd::PrevMonth),
            (Key::PageUp, Cmd::PrevMonth),
            (Key::Char('L'), Cmd::NextMonth),
            (Key::PageDown, Cmd::NextMonth),
            (Key::Char('t'), Cmd::Today),
            (Key::Char('\n'), Cmd::Confirm),
            (Key::Char(' '), Cmd::Confirm),
            (Key::Char('o'), Cmd::Activate),
            (Key::Esc, Cmd::Dismiss),
            (Key::Char('q'), Cmd::Exit),
        ];
        config.key_map.extend(defaults.iter().cloned());

        config
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::from(e).with_msg(&format!("could not read {}", path.display()))
        })?;

        log::debug!("Loading config from {}", path.display());
        content.parse()
    }

    pub fn command_for(&self, key: &Key) -> Cmd {
        self.key_map.get(key).copied().unwrap_or(Cmd::Noop)
    }
}

/// Parses TOML. Keys given in `[keys]` override the default bindings.
impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let file: ConfigFile = toml::from_str(s)?;
        let mut config = Config::default();

        if let Some(date_format) = file.date_format {
            config.date_format = date_format;
        }
        if let Some(theme) = file.theme {
            config.theme = theme;
        }

        config.bounds = Bounds::new(file.min_date, file.max_date);
        if config.bounds.is_empty() {
            log::warn!("min_date is after max_date, no date will be selectable");
        }

        config
            .key_map
            .extend(file.keys.into_iter().map(|(binding, cmd)| (binding.0, cmd)));

        Ok(config)
    }
}
