use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

pub mod features;
pub mod inspect;

fn init_logging(log_level: LevelFilter) {
    // Fails only if a logger is already installed, e.g. by an earlier subcommand in the same process.
    TermLogger::init(
        log_level,
        Default::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();
}
