mod import;
mod mapping;
mod report;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use metamerge_core::{AppConfig, Platform};
use metamerge_ingest::{ExportFormat, FieldDictionary};
use metamerge_store::{
    DatasetStore, FsTextReader, JsonDatasetStore, OverrideStore, YamlOverrideStore,
};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::mapping::MappingCommands;

#[derive(Debug, Parser)]
#[command(name = "metamerge")]
#[command(about = "Merge Facebook and Instagram analytics exports into one dataset")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show headers, a row estimate and the detected platform of a CSV file
    Analyze {
        file: PathBuf,
    },
    /// Report which canonical fields a CSV file's headers cover
    Validate {
        file: PathBuf,
    },
    /// Import one or more CSV exports into the dataset
    Import {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Treat every file as this platform instead of detecting it
        #[arg(long)]
        platform: Option<Platform>,
        /// Clear the stored dataset before the first file
        #[arg(long)]
        fresh: bool,
        /// Run the import without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Show per-account sums
    Accounts,
    /// Inspect or remove import records
    Files {
        #[command(subcommand)]
        command: FilesCommands,
    },
    /// Write the dataset as CSV
    Export {
        /// Destination file (defaults to a name built from the imported date range)
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "original")]
        format: FormatArg,
        /// Export per-account sums instead of rows
        #[arg(long)]
        accounts: bool,
    },
    /// Inspect or edit the column mappings
    Mapping {
        #[command(subcommand)]
        command: MappingCommands,
    },
    /// Delete the stored dataset and import records
    Clear,
}

#[derive(Debug, Subcommand)]
enum FilesCommands {
    /// List imported files
    List,
    /// Forget an import record
    Remove { id: Uuid },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Column names as they appear in Meta's exports
    Original,
    /// Internal field names
    Canonical,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Original => ExportFormat::Original,
            FormatArg::Canonical => ExportFormat::Canonical,
        }
    }
}

/// Configuration and collaborators shared by every command.
pub(crate) struct App {
    pub config: AppConfig,
    pub reader: FsTextReader,
    pub store: JsonDatasetStore,
    pub overrides: YamlOverrideStore,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            store: JsonDatasetStore::new(&config.data_dir),
            overrides: YamlOverrideStore::new(&config.mappings_path),
            reader: FsTextReader,
            config,
        }
    }
}

/// Built-in mappings with the user's saved overrides applied.
pub(crate) async fn load_dictionary(
    overrides: &dyn OverrideStore,
) -> anyhow::Result<FieldDictionary> {
    let saved = overrides.load().await?;
    Ok(FieldDictionary::with_overrides(&saved)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = metamerge_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let app = App::new(config);

    match cli.command {
        Some(Commands::Analyze { file }) => report::run_analyze(&app, &file).await?,
        Some(Commands::Validate { file }) => report::run_validate(&app, &file).await?,
        Some(Commands::Import {
            files,
            platform,
            fresh,
            dry_run,
        }) => {
            let options = import::ImportOptions {
                platform,
                fresh,
                dry_run,
                unknown_platform: app.config.unknown_platform,
            };
            let dictionary = load_dictionary(&app.overrides).await?;
            import::run_import(&app.reader, &app.store, &dictionary, &files, options).await?;
        }
        Some(Commands::Accounts) => report::run_accounts(&app.store).await?,
        Some(Commands::Files { command }) => match command {
            FilesCommands::List => report::run_files_list(&app.store).await?,
            FilesCommands::Remove { id } => report::run_files_remove(&app.store, id).await?,
        },
        Some(Commands::Export {
            output,
            format,
            accounts,
        }) => report::run_export(&app, output, format.into(), accounts).await?,
        Some(Commands::Mapping { command }) => mapping::run_mapping(&app.overrides, command).await?,
        Some(Commands::Clear) => {
            app.store.clear().await.context("failed to clear dataset")?;
            println!("cleared dataset in {}", app.config.data_dir.display());
        }
        None => println!("metamerge: run with --help to list commands"),
    }

    Ok(())
}
