extern crate datepick as lib;

use flexi_logger::{FileSpec, Logger};
use lib::cmds::Outcome;
use lib::config::Config;
use lib::{build_grid, format, ui};
use lib::{Bounds, CalendarDate, DatePicker, MonthCursor, SystemClock};
use nix::sys::termios;
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use termion::input::TermRead;
use termion::raw::IntoRawMode;
use termion::{clear, cursor};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "dp",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "A terminal date picker."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print the month grid non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(
        long = "value",
        help = "preselected date, in the configured date_format or YYYY-MM-DD"
    )]
    pub value: Option<String>,

    #[structopt(long = "min", help = "earliest selectable date")]
    pub min: Option<String>,

    #[structopt(long = "max", help = "latest selectable date")]
    pub max: Option<String>,

    #[structopt(long = "month", help = "month to show first (YYYY-MM)")]
    pub month: Option<MonthCursor>,
}

fn parse_arg(
    arg: &Option<String>,
    config: &Config,
) -> lib::error::Result<Option<CalendarDate>> {
    arg.as_deref()
        .map(|s| format::parse_date_or_iso(s, &config.date_format))
        .transpose()
}

fn show(
    config: &Config,
    month: Option<MonthCursor>,
    value: Option<CalendarDate>,
    bounds: &Bounds,
) {
    let cursor = month
        .or_else(|| value.map(|v| v.cursor()))
        .unwrap_or_else(|| lib::datemath::today().cursor());

    let grid = build_grid(cursor, value, bounds, &SystemClock);
    println!("{}", ui::render(&grid, None, &config.theme));
}

fn draw<W: Write>(
    out: &mut W,
    picker: &DatePicker,
    config: &Config,
    status: &str,
) -> std::io::Result<()> {
    let grid = ui::render(&picker.grid(), Some(&picker.focus()), &config.theme);
    let value = format::format_value(picker.value().as_ref(), &config.date_format);

    write!(out, "{}{}", clear::All, cursor::Goto(1, 1))?;
    // Raw mode needs explicit carriage returns.
    write!(out, "{}\r\n\r\n", grid.replace('\n', "\r\n"))?;
    write!(out, "value: {}\r\n{}", value, status)?;
    out.flush()
}

fn run_picker<W: Write>(
    out: &mut W,
    picker: &mut DatePicker,
    config: &Config,
) -> std::io::Result<Option<CalendarDate>> {
    let mut status = String::new();
    let mut keys = stdin().keys();

    loop {
        draw(&mut *out, picker, config, &status)?;

        let key = match keys.next() {
            Some(key) => key?,
            None => return Ok(None),
        };

        status.clear();
        match picker.handle(config.command_for(&key)) {
            Outcome::Selected(date) => return Ok(Some(date)),
            Outcome::Closed | Outcome::Exit => return Ok(None),
            Outcome::Rejected(rejected) => status = rejected.to_string(),
            _ => {}
        }
    }
}

fn interactive(
    config: &Config,
    month: Option<MonthCursor>,
    value: Option<CalendarDate>,
    bounds: Bounds,
) -> std::io::Result<Option<CalendarDate>> {
    let mut picker = DatePicker::new(value, bounds);
    if let Some(month) = month {
        picker.show_month(month);
    }
    picker.activate();

    let mut out = stdout().into_raw_mode()?;
    write!(out, "{}", cursor::Hide)?;

    let chosen = run_picker(&mut out, &mut picker, config);

    // Restore the screen whether or not the loop failed.
    write!(out, "{}{}{}", clear::All, cursor::Goto(1, 1), cursor::Show)?;
    out.flush()?;

    chosen
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    } else {
        // stderr output would garble the raw-mode screen
        logger = logger.do_not_log();
    }

    let _logger = logger.start()?;

    const STDIN: std::os::unix::io::RawFd = 0;
    if let Ok(orig_attr) = termios::tcgetattr(STDIN) {
        let orig_attr = std::sync::Mutex::new(orig_attr);

        std::panic::set_hook(Box::new(move |info| {
            println!("{}", cursor::Show);

            if let Ok(attr) = orig_attr.lock() {
                let _ = termios::tcsetattr(STDIN, termios::SetArg::TCSANOW, &attr);
            }

            println!("dp ran into a fatal error!");
            println!(
                "Consider filing an issue with a log file and the backtrace below at {}",
                env!("CARGO_PKG_REPOSITORY")
            );

            println!("{}", info);
            println!("{:?}", backtrace::Backtrace::new());
        }));
    }

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let value = parse_arg(&args.value, &config)?;
    let bounds = Bounds::new(
        parse_arg(&args.min, &config)?.or(config.bounds.min),
        parse_arg(&args.max, &config)?.or(config.bounds.max),
    );

    if args.show {
        show(&config, args.month, value, &bounds);
        return Ok(());
    }

    if let Some(date) = interactive(&config, args.month, value, bounds)? {
        println!("{}", format::format_date(&date, &config.date_format));
    }

    Ok(())
}
