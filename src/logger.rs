use env_logger::fmt::Formatter;
use log::{Record, Level};
use std::io::Write;
use chrono::Local;
use colored::*;

pub fn init_logger(log_level: &str) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));
    builder.format(format_log);

    // Filter out logs from actix_server and actix_web
    builder.filter(Some("actix_server"), log::LevelFilter::Warn);
    builder.filter(Some("actix_web"), log::LevelFilter::Warn);
    builder.filter(Some("reqwest"), log::LevelFilter::Warn);

    // A second call (tests, rebuilds) keeps the logger already installed.
    let _ = builder.try_init();
}

fn level_label(level: Level) -> ColoredString {
    match level {
        Level::Error => "ERROR".truecolor(255, 0, 0),
        Level::Warn => "WARN".truecolor(255, 165, 0),
        Level::Info => "INFO".truecolor(0, 255, 255),
        Level::Debug => "DEBUG".truecolor(138, 43, 226),
        Level::Trace => "TRACE".truecolor(255, 105, 180),
    }
}

fn format_log(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    writeln!(
        buf,
        "{} [{}] - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        level_label(record.level()),
        record.args()
    )
}

const BANNER: [&str; 5] = [
    r"  ____  _____ ____  _     ___ ___  _   _ ",
    r" |  _ \| ____|  _ \| |   |_ _/ _ \| \ | |",
    r" | |_) |  _| | | | | |    | | | | |  \| |",
    r" |  _ <| |___| |_| | |___ | | |_| | |\  |",
    r" |_| \_\_____|____/|_____|___\___/|_| \_|",
];

/// Desert sunset, from dune ochre down to deep red.
const GRADIENT: [(u8, u8, u8); 5] = [
    (255, 196, 87),
    (245, 158, 66),
    (232, 118, 48),
    (212, 78, 38),
    (178, 34, 34),
];

pub fn print_banner(host: &str, port: u16, dev_mode: bool) {
    let border = "=".repeat(60);
    println!("{}", border.truecolor(200, 116, 43));
    for (line, (r, g, b)) in BANNER.iter().zip(GRADIENT) {
        println!("    {}", line.truecolor(r, g, b));
    }
    println!();
    let mode = if dev_mode { "development" } else { "production" };
    println!("{}", format!("Redlion safari site is running ({} mode)", mode).green());
    println!("{}", format!("   - Address: http://{}:{}", host, port).cyan());
    println!("{}", format!("   - Booking form: http://{}:{}/#book", host, port).cyan());
    println!("{}", border.truecolor(200, 116, 43));
}
