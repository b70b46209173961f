#![allow(clippy::print_stdout)]

use clap::Parser;

mod args;
mod check;
mod debug;
mod error;
mod resolve;

/// Load a site's `_config.yml` and resolve the front matter of its content.
#[derive(Debug, clap::Parser)]
#[command(name = "siteconf", version, propagate_version = true)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
enum Command {
    Check(check::CheckArgs),
    Resolve(resolve::ResolveArgs),
    #[command(subcommand)]
    Debug(debug::DebugCommands),
}

impl Command {
    fn run(&self) -> error::Result<()> {
        match self {
            Self::Check(cmd) => cmd.run(),
            Self::Resolve(cmd) => cmd.run(),
            Self::Debug(cmd) => cmd.run(),
        }
    }
}

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    let cli = Cli::parse();

    init_logging(cli.verbose.log_level_filter());

    cli.command
        .run()
        .map_err(|e| proc_exit::Code::FAILURE.with_message(format!("{e:#}")))?;

    Ok(())
}

fn init_logging(level: log::LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.format(|f, record| {
        use std::io::Write as _;
        let level = format!("[{}]", record.level()).to_lowercase();
        writeln!(f, "{:8} {}", level, record.args())
    });
    builder.init();
}
