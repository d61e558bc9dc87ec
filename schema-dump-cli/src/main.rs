use crate::cli::{Commands, DatabaseKind, DbArgs, TransformArgs};
use clap::Parser;
use schema_dump::credentials::{CredentialCache, HttpCredentialIssuer, KeyringSecretStore};
use schema_dump::orm::{transform_to_orm_model, ChatCompletionsClient};
use schema_dump::{dump_schema, list_tables, OutputFiles, PostgresClientWrapper, Result};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    run(cli).await?;

    Ok(())
}

#[instrument(skip_all)]
async fn run(cli: cli::Cli) -> Result<()> {
    let output = OutputFiles::new(cli.output_dir);

    match cli.command {
        Commands::DumpSchema { db_args, table } => {
            let connection = connect(&db_args).await?;
            dump_schema(&connection, table.as_deref(), &output).await?;
        }
        Commands::ListTables { db_args } => {
            let connection = connect(&db_args).await?;
            list_tables(&connection, &output).await?;
        }
        Commands::Transform(transform_args) => {
            do_transform(transform_args, &output).await?;
        }
    }

    Ok(())
}

async fn connect(db_args: &DbArgs) -> Result<PostgresClientWrapper> {
    match db_args.db {
        DatabaseKind::Postgres => PostgresClientWrapper::new(&db_args.url).await,
    }
}

#[instrument(skip_all)]
async fn do_transform(args: TransformArgs, output: &OutputFiles) -> Result<()> {
    let service_options = args.service_options();

    let credentials = CredentialCache::new(
        KeyringSecretStore,
        HttpCredentialIssuer::new(&service_options)?,
    );
    let completions = ChatCompletionsClient::new(&service_options)?;

    let connection = connect(&args.db_args).await?;

    transform_to_orm_model(
        &connection,
        &credentials,
        &completions,
        args.lang.into(),
        args.table.as_deref(),
        output,
    )
    .await?;

    info!(lang = %schema_dump::orm::TargetLanguage::from(args.lang), "Transform complete");

    Ok(())
}
