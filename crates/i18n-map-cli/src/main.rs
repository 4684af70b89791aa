use clap::{Parser, Subcommand};
use i18n_map::{
    commands::{self, ConfigAction, GenerateArgs, ShowFormat},
    logger, CliError, GlobalOpts,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "i18n-map")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Textdomain to version map generator for Composer projects",
    long_about = "i18n-map scans the installed Composer packages of a WordPress plugin or theme \
                  and writes the PHP map of bundled library textdomains to their versions."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the i18n map
    Generate(GenerateArgs),
    /// Handle a Composer script event (post-install-cmd or post-update-cmd)
    Hook {
        event: String,
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// Check that the i18n map is up to date without writing it
    Check(GenerateArgs),
    /// Print the current i18n map
    Show {
        #[arg(long, value_enum, default_value_t = ShowFormat::Php)]
        format: ShowFormat,
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// Delete the i18n map
    Clean(GenerateArgs),
    /// Configure i18n-map for this project
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Commands::Generate(args) => commands::handle_generate(args, &cli.global),
        Commands::Hook { event, args } => commands::handle_hook(event, args, &cli.global),
        Commands::Check(args) => commands::handle_check(args, &cli.global),
        Commands::Show { format, args } => commands::handle_show(*format, args, &cli.global),
        Commands::Clean(args) => commands::handle_clean(args, &cli.global),
        Commands::Config { action } => commands::handle_config(action, &cli.global),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(
        cli.global.verbosity_level(),
        cli.global.quiet,
        cli.global.log_file.as_deref(),
    ) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    if let Some(log_path) = logger::get_log_path() {
        logger::debug(&format!("Logging to {}", log_path.display()));
    }
    init_tracing();

    if let Err(e) = run(&cli) {
        logger::error(&e.to_string());
        std::process::exit(1);
    }
}
