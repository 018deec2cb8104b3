use std::path::PathBuf;

use clap::{Parser, Subcommand};
use discogs_snarfer::{
    api::API_BASE_URL, find_link, DiscogsApi, EntityKind, EntityRef, ReplyContext, Snarfer,
    TemplateConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "discogs-snarf")]
#[command(about = "Summarize Discogs release and master links", long_about = None)]
struct Cli {
    /// Template configuration file (TOML)
    #[arg(short, long, env = "DISCOGS_SNARF_CONFIG")]
    config: Option<PathBuf>,

    /// Discogs API base URL
    #[arg(long, env = "DISCOGS_API_BASE", default_value = API_BASE_URL)]
    api_base: String,

    /// Network the message came from (selects per-network templates)
    #[arg(short, long)]
    network: Option<String>,

    /// Channel the message came from (selects per-channel templates)
    #[arg(long)]
    channel: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reply to a chat message containing a Discogs link
    Snarf {
        /// Message text
        message: String,
    },
    /// Look up a release or master directly
    Lookup {
        /// Entry kind (release or master)
        kind: EntityKind,

        /// Entry id
        id: u64,
    },
    /// Show which link, if any, a message contains
    Match {
        /// Message text
        message: String,
    },
    /// Validate a template configuration file
    Check {
        /// Configuration file
        path: PathBuf,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("discogs_snarfer=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    let ctx = ReplyContext {
        network: cli.network.clone(),
        channel: cli.channel.clone(),
    };

    let load_templates = || -> Result<TemplateConfig, discogs_snarfer::SnarfError> {
        match &cli.config {
            Some(path) => TemplateConfig::load(path),
            None => Ok(TemplateConfig::default()),
        }
    };

    match &cli.command {
        Commands::Snarf { message } => {
            let snarfer = Snarfer::new(DiscogsApi::with_base_url(&cli.api_base)?, load_templates()?);
            match snarfer.handle(message, &ctx).await? {
                Some(reply) => println!("{}", reply),
                None => eprintln!("No Discogs link found"),
            }
        }
        Commands::Lookup { kind, id } => {
            let snarfer = Snarfer::new(DiscogsApi::with_base_url(&cli.api_base)?, load_templates()?);
            let entity = EntityRef { kind: *kind, id: *id };
            println!("{}", snarfer.render_entity(entity, &ctx).await?);
        }
        Commands::Match { message } => match find_link(message) {
            Some(entity) => println!("{} {} ({})", entity.kind, entity.id, entity.site_url()),
            None => println!("no match"),
        },
        Commands::Check { path } => {
            TemplateConfig::load(path)?;
            println!("{}: ok", path.display());
        }
    }

    Ok(())
}
