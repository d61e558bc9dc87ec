use std::fmt::{Display, Formatter};
use std::future::Future;
use futures::try_join;
use tracing::{info, instrument};
use crate::credentials::{CredentialCache, CredentialIssuer, SecretStore};
use crate::output::{read_output_file, write_output_file, OutputFiles, ORM_MODEL_FILE_NAME};
use crate::postgres_client_wrapper::PostgresClientWrapper;
use crate::schema_dump::dump_schema;
use crate::Result;

mod completion_client;

pub use completion_client::*;

/// The languages an ORM model can be generated for.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TargetLanguage {
    Python,
    Typescript,
    Java,
    Rust,
    Go,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 5] = [
        TargetLanguage::Python,
        TargetLanguage::Typescript,
        TargetLanguage::Java,
        TargetLanguage::Rust,
        TargetLanguage::Go,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::Python => "python",
            TargetLanguage::Typescript => "typescript",
            TargetLanguage::Java => "java",
            TargetLanguage::Rust => "rust",
            TargetLanguage::Go => "go",
        }
    }
}

impl Display for TargetLanguage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text completion service that turns a prompt into generated text.
pub trait CompletionService {
    fn complete(&self, api_key: &str, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

pub fn build_prompt(language: TargetLanguage, schema_sql: &str) -> String {
    format!("Transform the following SQL schema to {language} ORM model:\n{schema_sql}")
}

/// Dumps the schema, asks the completion service to turn it into an ORM model
/// for `language` and writes the answer verbatim to `orm_model.md`.
///
/// The schema dump and the credential lookup run concurrently. The prompt is
/// only built once both are done, from the file the dump wrote.
#[instrument(skip(connection, credentials, completions, output))]
pub async fn transform_to_orm_model<S, I, C>(
    connection: &PostgresClientWrapper,
    credentials: &CredentialCache<S, I>,
    completions: &C,
    language: TargetLanguage,
    table_filter: Option<&str>,
    output: &OutputFiles,
) -> Result<String>
where
    S: SecretStore,
    I: CredentialIssuer,
    C: CompletionService,
{
    let (_, api_key) = try_join!(
        dump_schema(connection, table_filter, output),
        credentials.get_api_key()
    )?;

    let schema_sql = read_output_file(&output.schema_sql()).await?;

    generate_orm_model(completions, &api_key, language, &schema_sql, output).await
}

/// Sends the rendered schema to the completion service and stores the reply.
#[instrument(skip(completions, api_key, schema_sql, output))]
pub async fn generate_orm_model<C: CompletionService>(
    completions: &C,
    api_key: &str,
    language: TargetLanguage,
    schema_sql: &str,
    output: &OutputFiles,
) -> Result<String> {
    let prompt = build_prompt(language, schema_sql);

    info!("Requesting ORM model");
    let model = completions.complete(api_key, &prompt).await?;

    write_output_file(&output.orm_model(), &model).await?;

    println!("ORM model written to {ORM_MODEL_FILE_NAME}");

    Ok(model)
}
