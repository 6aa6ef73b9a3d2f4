pub mod commands;
pub mod files;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "darform")]
#[command(about = "darform - inspect and transform data access request form schemas")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Fail on unknown ids instead of leaving the schema unchanged")]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Schema inspection and validation")]
    Schema {
        #[command(subcommand)]
        cmd: commands::schema::SchemaCommands,
    },

    #[command(about = "Repeatable section cloning and removal")]
    Section {
        #[command(subcommand)]
        cmd: commands::section::SectionCommands,
    },

    #[command(about = "Repeatable question group cloning and removal")]
    Questions {
        #[command(subcommand)]
        cmd: commands::questions::QuestionsCommands,
    },

    #[command(about = "Materialize an application's repeated groups in a schema")]
    Reconcile(commands::reconcile::ReconcileArgs),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// `--text` wins over `--json`; text is the default.
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json && !cli.text {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let service = if cli.strict {
        crate::services::DynamicFormService::with_options(true, crate::config::config().forms.suffix_max_attempts)
    } else {
        crate::services::DynamicFormService::new()
    };

    match cli.command {
        Commands::Schema { cmd } => commands::schema::handle(cmd, &service, output_format),
        Commands::Section { cmd } => commands::section::handle(cmd, &service, output_format),
        Commands::Questions { cmd } => commands::questions::handle(cmd, &service, output_format),
        Commands::Reconcile(args) => commands::reconcile::handle(args, &service, output_format),
    }
}
