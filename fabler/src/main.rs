mod verbose;

use std::path::PathBuf;

use clap::{FromArgMatches as _, IntoApp as _, Parser, Subcommand};
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter, Registry};
use twelf::Layer;

use fabler_common::Conf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    #[clap(flatten)]
    verbose: verbose::Verbosity,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate new stories against the local generation service
    Generate {
        /// How many stories to generate
        #[clap(long, default_value_t = 1)]
        stories: u32,

        /// How many chapters each story gets
        #[clap(long, default_value_t = 3)]
        chapters: u32,

        /// Genre to use instead of picking one at random
        #[clap(long)]
        genre: Option<String>,

        /// Also write the legacy plain-text rendition
        #[clap(long)]
        text: bool,
    },
    /// Generate a description and suggested chapter titles for existing story files
    Analyze {
        /// Story files to analyze
        #[clap(required = true)]
        files: Vec<PathBuf>,

        /// Directory the analyzed records are written into
        #[clap(long, default_value = "analyzed")]
        out_dir: PathBuf,
    },
    /// Suggest a replacement title for existing story files, updating them in place
    Retitle {
        /// Story files to retitle
        #[clap(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), fabler_common::Report> {
    fabler_common::install()?;

    let matches = Cli::command().args(&Conf::clap_args()).get_matches();
    let cli = Cli::from_arg_matches(&matches)?;
    let conf = Conf::with_layers(&[
        Layer::Json("fabler.json".into()),
        Layer::Toml("fabler.toml".into()),
        Layer::Env(Some("FABLER_".to_string())),
        Layer::Clap(matches),
    ])?;

    let subscriber = Registry::default()
        .with(ErrorLayer::default())
        .with(tracing_subscriber::fmt::Layer::default())
        .with(EnvFilter::from_default_env().add_directive(cli.verbose.log_level_filter().into()));

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Generate {
            stories,
            chapters,
            genre,
            text,
        } => {
            fabler_command_generate::run(&conf, stories, chapters, genre.as_deref(), text).await?
        }
        Commands::Analyze { files, out_dir } => {
            fabler_command_analyze::run(&conf, &files, &out_dir).await?
        }
        Commands::Retitle { files } => fabler_command_retitle::run(&conf, &files).await?,
    }

    Ok(())
}
