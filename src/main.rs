//! LumaEngine - deployment workflow board and requirements analysis.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use luma_engine::core::Config;
use luma_engine::templates::{self, TemplateCategory};
use luma_engine::workflow::seeded_store;
use luma_engine::{Board, APP_NAME};

/// Deployment workflow board and requirements analysis service
#[derive(Parser)]
#[command(name = "luma")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default lookup
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// JSON file with the items to seed the board with
        #[arg(long, value_name = "FILE")]
        seed: Option<PathBuf>,
    },

    /// Analyze a free-text deployment request
    Analyze {
        /// Requirement text
        text: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Print the workflow board
    Board {
        /// JSON file with the items to seed the board with
        #[arg(long, value_name = "FILE")]
        seed: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List deployable templates
    Templates {
        /// Only list templates in this category (e.g. chat-services)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        generate(shell, &mut Cli::command(), APP_NAME, &mut io::stdout());
        return Ok(());
    }

    let mut config = Config::load_with_path(cli.config.as_deref())?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Serve { host, port, seed } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if seed.is_some() {
                config.board.seed_file = seed;
            }
            config.validate()?;
            cmd_serve(&config)?;
        }
        Commands::Analyze { text, format } => {
            cmd_analyze(&text, format)?;
        }
        Commands::Board { seed, format } => {
            let seed = seed.or_else(|| config.board.seed_file.clone());
            cmd_board(seed, format)?;
        }
        Commands::Templates { category } => {
            cmd_templates(category.as_deref())?;
        }
        Commands::Config { path } => {
            cmd_config(&config, cli.config, path)?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(config.logging.with_target).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn cmd_serve(config: &Config) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(luma_engine::server::serve(config))
}

fn cmd_analyze(text: &str, format: Format) -> Result<()> {
    let result = luma_engine::analysis::analyze(text)?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        Format::Text => print!("{}", result.to_text()),
    }

    Ok(())
}

fn cmd_board(seed: Option<PathBuf>, format: Format) -> Result<()> {
    let store = seeded_store(seed.as_deref())?;
    let board = Board::new(store.into());
    let columns = board.columns();

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&columns)?),
        Format::Text => {
            for column in &columns {
                println!("{} ({})", column.status, column.items.len());
                for item in &column.items {
                    println!(
                        "  #{} {} [{}, {}, {}d]",
                        item.id, item.title, item.priority, item.size, item.estimate
                    );
                }
            }
        }
    }

    Ok(())
}

fn cmd_templates(category: Option<&str>) -> Result<()> {
    let category = category.map(str::parse::<TemplateCategory>).transpose()?;
    let templates = templates::list_templates(category);

    for template in &templates {
        println!("{:<20} {:<18} {}", template.template_id, template.category, template.description);
    }
    println!("\nTotal: {} templates", templates.len());

    Ok(())
}

fn cmd_config(config: &Config, explicit: Option<PathBuf>, show_path: bool) -> Result<()> {
    if show_path {
        let path = explicit
            .or_else(Config::discover)
            .or_else(|| Config::config_dir().map(|dir| dir.join("config.toml")));
        if let Some(path) = path {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let toml = toml::to_string_pretty(config)?;
    println!("{toml}");

    Ok(())
}
