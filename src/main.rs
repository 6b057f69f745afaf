use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use kletype::config::Config;
use kletype::layout::LayoutModel;
use kletype::render::style::StyleConfig;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;
mod terminal;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Keyboard Layout Editor raw data (JSON5)
    layout: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON file with practice and theme settings
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    debug: bool,

    #[command(flatten)]
    settings: Config,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive typing practice (the default)
    Practice,
    /// Print one keyboard frame to stdout
    Render(cmd::render::RenderArgs),
    /// Print the document's metadata and rows as tables
    Inspect,
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // Logs go to stderr so `render` output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::WARN })
        .init();

    info!("📂 Loading Keyboard: {}", cli.layout.display());
    let layout = LayoutModel::load_from_file(&cli.layout).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });
    info!(
        "⌨️  {} keys in {} rows",
        layout.key_count(),
        layout.row_count()
    );

    let mut config = match &cli.config {
        Some(path) => {
            info!("⚙️  Loading Config from: {}", path.display());
            Config::load_from_file(path).unwrap_or_else(|e| {
                error!("{}: {}", path.display(), e);
                process::exit(1);
            })
        }
        None => Config::default(),
    };
    config.merge_from_cli(&cli.settings, &matches);

    let style = StyleConfig::from_theme(&config.theme).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });

    let result = match cli.command.unwrap_or(Commands::Practice) {
        Commands::Practice => cmd::practice::run(&layout, &config, &style),
        Commands::Render(args) => cmd::render::run(&args, &layout, &style),
        Commands::Inspect => cmd::inspect::run(&layout),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
