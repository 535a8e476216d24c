use anyhow::Result;
use clap::Parser;
use patchscan::cli::{Cli, Commands};
use patchscan::formatting::{FormattingConfig, Stream};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    let plain = matches!(
        &cli.command,
        Commands::Scan(args) | Commands::Conflicts(args) | Commands::All(args) if args.plain
    );

    if let Err(e) = run(cli.command) {
        let formatting = if plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        };
        eprintln!("{}", formatting.formatter(Stream::Stderr).error(&format!("{:#}", e)));
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    let kind = command.report_kind();
    match command {
        Commands::Init { force } => patchscan::commands::init_config(force),
        Commands::Scan(args) | Commands::Conflicts(args) | Commands::All(args) => {
            // report_kind is always Some for scan commands
            let kind = kind.unwrap_or(patchscan::commands::ReportKind::Both);
            patchscan::commands::handle_scan(args.into_request(kind))
        }
    }
}

// RUST_LOG wins over -v when set
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
