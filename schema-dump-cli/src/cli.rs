use std::path::PathBuf;
use std::time::Duration;
use clap::{Args, Parser, Subcommand, ValueEnum};
use schema_dump::orm::TargetLanguage;
use schema_dump::ServiceOptions;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about)]
#[command(propagate_version = true)]
/// Dumps the schema of a live database as SQL, lists its tables, or turns the schema into an ORM model.
///
/// Output goes to `schema.sql`, `tables.json` and `orm_model.md`, which are overwritten on every run.
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// The directory the output files are written to.
    #[arg(long, global = true, default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Dump SQL schema from a live database
    DumpSchema {
        #[command(flatten)]
        db_args: DbArgs,

        /// Only dump this table
        #[arg(long)]
        table: Option<String>,
    },
    /// List tables in the database
    ListTables {
        #[command(flatten)]
        db_args: DbArgs,
    },
    /// Transform the SQL schema into an ORM model for a language
    Transform(TransformArgs),
}

/// The kinds of database that can be inspected.
#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum DatabaseKind {
    Postgres,
}

#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// The database type
    #[arg(long, value_enum)]
    pub db: DatabaseKind,

    /// The connection string of the database, passed as is to the driver
    #[arg(long)]
    pub url: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum Language {
    Python,
    Typescript,
    Java,
    Rust,
    Go,
}

impl From<Language> for TargetLanguage {
    fn from(value: Language) -> Self {
        match value {
            Language::Python => TargetLanguage::Python,
            Language::Typescript => TargetLanguage::Typescript,
            Language::Java => TargetLanguage::Java,
            Language::Rust => TargetLanguage::Rust,
            Language::Go => TargetLanguage::Go,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct TransformArgs {
    #[command(flatten)]
    pub db_args: DbArgs,

    /// Only transform this table. All tables are used if not specified
    #[arg(long)]
    pub table: Option<String>,

    /// The language to generate the ORM model for
    #[arg(long, value_enum)]
    pub lang: Language,

    /// Give up on each request to the remote services after this many seconds.
    /// Requests never time out if not specified.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
}

impl TransformArgs {
    pub(crate) fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}
