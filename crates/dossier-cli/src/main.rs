//! Dossier CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dossier::text::{NormalizationConfig, normalize};
use dossier::{DocumentProcessor, DocumentReference, DossierConfig, DossierError, FormatTag};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code for failures that will not go away on retry.
const EXIT_PERMANENT: u8 = 2;
/// Exit code for transport failures the caller may retry.
const EXIT_RETRYABLE: u8 = 3;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "dossier", version)]
#[command(about = "Extract text from PDF, DOCX and plain-text documents", long_about = None)]
struct Cli {
    /// Config file (TOML, YAML or JSON). Defaults to a discovered dossier.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the text of one document
    Extract {
        /// Remote reference, e.g. gs://bucket/path/to/file.pdf
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        reference: Option<String>,

        /// Read a local file as an upload instead of fetching from storage
        #[arg(long)]
        file: Option<PathBuf>,

        /// Declared media type of --file (guessed from the extension if omitted)
        #[arg(long, requires = "file", conflicts_with = "reference")]
        media_type: Option<String>,

        /// Normalize the text with the configured profile (or the default one)
        #[arg(long)]
        normalize: bool,

        /// Normalize with the lossy ASCII-only profile
        #[arg(long)]
        ascii_only: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List supported formats
    Formats {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Serialize)]
struct ExtractionOutput<'a> {
    format: FormatTag,
    characters: usize,
    content: &'a str,
}

#[derive(Serialize)]
struct FormatInfo {
    tag: &'static str,
    extension: String,
    media_type: &'static str,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<DossierConfig> {
    match path {
        Some(path) => Ok(DossierConfig::from_file(path)?),
        None => Ok(DossierConfig::discover()?.unwrap_or_default()),
    }
}

fn normalization_for(config: &DossierConfig, normalize: bool, ascii_only: bool) -> Option<NormalizationConfig> {
    if ascii_only {
        Some(NormalizationConfig::legacy_ascii())
    } else if normalize {
        Some(config.normalization.clone().unwrap_or_default())
    } else {
        None
    }
}

async fn document_reference(
    reference: Option<String>,
    file: Option<PathBuf>,
    media_type: Option<String>,
) -> Result<DocumentReference> {
    if media_type.is_some() && file.is_none() {
        anyhow::bail!("--media-type can only be used with --file");
    }

    if let Some(path) = file {
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let media_type = media_type.unwrap_or_else(|| {
            mime_guess::from_path(&path)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        });
        tracing::debug!(path = %path.display(), %media_type, "treating file as upload");
        return Ok(DocumentReference::in_memory(bytes, media_type));
    }

    let reference = reference.context("A document reference or --file is required")?;
    Ok(DocumentReference::remote(&reference)?)
}

async fn extract(
    config: &DossierConfig,
    reference: DocumentReference,
    normalization: Option<NormalizationConfig>,
    format: OutputFormat,
) -> Result<()> {
    let processor = DocumentProcessor::from_config(config)?;

    let resolved = processor.locator().resolve(reference).await?;
    let tag = resolved.format;
    let mut text = processor.extract(resolved).await?;

    if let Some(normalization) = normalization {
        text = normalize(&text, &normalization);
    }

    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Text => stdout.write_all(text.as_bytes())?,
        OutputFormat::Json => {
            let output = ExtractionOutput {
                format: tag,
                characters: text.chars().count(),
                content: &text,
            };
            serde_json::to_writer_pretty(&mut stdout, &output)?;
            writeln!(stdout)?;
        }
    }
    stdout.flush()?;
    Ok(())
}

fn list_formats(format: OutputFormat) -> Result<()> {
    let formats: Vec<FormatInfo> = FormatTag::ALL
        .into_iter()
        .map(|tag| FormatInfo {
            tag: tag.as_str(),
            extension: format!(".{}", tag.as_str()),
            media_type: tag.mime_type(),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            for info in &formats {
                println!("{:<6}{:<8}{}", info.tag, info.extension, info.media_type);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&formats)?),
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract {
            reference,
            file,
            media_type,
            normalize,
            ascii_only,
            format,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let normalization = normalization_for(&config, normalize, ascii_only);
            let reference = document_reference(reference, file, media_type).await?;
            extract(&config, reference, normalization, format).await
        }
        Commands::Formats { format } => list_formats(format),
    }
}

fn dossier_error(err: &anyhow::Error) -> Option<&DossierError> {
    err.chain().find_map(|cause| cause.downcast_ref::<DossierError>())
}

fn report_error(err: &anyhow::Error) {
    match dossier_error(err) {
        Some(dossier_err) => eprintln!("error[{}]: {}", dossier_err.kind(), err),
        None => eprintln!("error: {}", err),
    }

    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {}", cause);
    }
}

fn exit_code(err: &anyhow::Error) -> ExitCode {
    match dossier_error(err) {
        Some(dossier_err) if dossier_err.is_retryable() => ExitCode::from(EXIT_RETRYABLE),
        Some(_) => ExitCode::from(EXIT_PERMANENT),
        None => ExitCode::FAILURE,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            exit_code(&err)
        }
    }
}
