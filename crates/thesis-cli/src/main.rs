use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use thesis_core::EntityRecognizer;
use thesis_core::config_file::{self, ConfigFile};
use thesis_parsing::{ExtractionConfig, GazetteerRecognizer, Variant, find_person_names};
use thesis_pdf_mupdf::MupdfBackend;

mod output;

use output::ColorMode;

/// Thesis metadata extractor - pull title, author, director, methodology and
/// conclusions out of thesis PDFs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// PDF files to analyse, in order
    files: Vec<PathBuf>,

    /// Heuristic family: regex, entity or grammar
    #[arg(long)]
    variant: Option<Variant>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only analyse the first page of each document
    #[arg(long)]
    first_page: bool,

    /// Custom given-name list for the entity recogniser (one name per line)
    #[arg(long)]
    names: Option<PathBuf>,

    /// Read settings from this TOML file instead of the default locations
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also list every capitalised "Firstname Lastname" sequence per file
    #[arg(long)]
    list_names: bool,
}

/// Everything needed to run a batch, after flags, environment, config file
/// and defaults have been layered.
#[derive(Debug)]
struct Settings {
    variant: Variant,
    names_path: Option<PathBuf>,
    color: bool,
    extraction: ExtractionConfig,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("thesis_cli=info")),
        )
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let file_config = match &cli.config {
        Some(path) => config_file::load_from_path(path)
            .with_context(|| format!("could not load config file {}", path.display()))?,
        None => config_file::load_config(),
    };
    let settings = resolve_settings(
        &cli,
        std::env::var("THESIS_VARIANT").ok(),
        std::env::var("THESIS_NAMES_PATH").ok(),
        &file_config,
    )?;
    let color = ColorMode(settings.color);

    let mut writer: Box<dyn Write> = if let Some(ref output_path) = cli.output {
        Box::new(
            std::fs::File::create(output_path)
                .with_context(|| format!("could not create {}", output_path.display()))?,
        )
    } else {
        Box::new(std::io::stdout())
    };

    if cli.files.is_empty() {
        output::print_warning(&mut *writer, "No se seleccionó ningún archivo.", color)?;
        return Ok(());
    }

    // Fail before touching any document if a custom name list is unusable.
    let recognizer: Arc<dyn EntityRecognizer> = match &settings.names_path {
        Some(path) => Arc::new(GazetteerRecognizer::from_path(path)?),
        None => Arc::new(GazetteerRecognizer::builtin()),
    };

    tracing::info!(
        variant = %settings.variant,
        files = cli.files.len(),
        first_page = cli.first_page,
        "starting extraction"
    );
    let extractor = settings.variant.extractor(settings.extraction, recognizer);
    let backend = MupdfBackend::new();

    let (mut processed, mut failed, mut skipped) = (0, 0, 0);
    for path in &cli.files {
        if !is_pdf(path) {
            tracing::warn!(path = %path.display(), "skipping non-PDF file");
            output::print_warning(
                &mut *writer,
                &format!("{} no es un archivo PDF, se omite.", path.display()),
                color,
            )?;
            skipped += 1;
            continue;
        }

        let loaded = if cli.first_page {
            extractor.load_first_page(path, &backend)
        } else {
            extractor.load_text(path, &backend)
        };
        let text = match loaded {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "extraction failed");
                output::print_file_error(&mut *writer, path, &e, color)?;
                failed += 1;
                continue;
            }
        };

        let record = extractor.extract_from_text(&text);
        tracing::info!(
            path = %path.display(),
            found = record.found_count(),
            "processed document"
        );
        output::print_record(&mut *writer, path, &record, color)?;
        if cli.list_names {
            output::print_names(&mut *writer, &find_person_names(&text), color)?;
        }
        processed += 1;
    }

    output::print_summary(&mut *writer, processed, failed, skipped, color)?;
    writer.flush()?;

    if failed > 0 {
        anyhow::bail!("{} of {} files could not be processed", failed, cli.files.len());
    }
    Ok(())
}

/// Layer settings: CLI flags > environment > config file > defaults.
fn resolve_settings(
    cli: &Cli,
    env_variant: Option<String>,
    env_names_path: Option<String>,
    file: &ConfigFile,
) -> anyhow::Result<Settings> {
    let extraction = file.extraction.clone().unwrap_or_default();

    let variant = match (cli.variant, env_variant, extraction.variant) {
        (Some(v), _, _) => v,
        (None, Some(v), _) => v.parse::<Variant>().context("invalid THESIS_VARIANT")?,
        (None, None, Some(v)) => v
            .parse::<Variant>()
            .context("invalid variant in config file")?,
        (None, None, None) => Variant::default(),
    };

    let names_path = cli
        .names
        .clone()
        .or_else(|| env_names_path.map(PathBuf::from))
        .or_else(|| {
            file.ner
                .as_ref()
                .and_then(|n| n.names_path.as_ref())
                .map(PathBuf::from)
        });

    let color_pref = file.display.as_ref().and_then(|d| d.color).unwrap_or(true);
    let color = color_pref && !cli.no_color && cli.output.is_none();

    let mut builder = variant.config_builder();
    if let Some(n) = extraction.title_lines {
        builder = builder.title_lines(n);
    }
    if let Some(n) = extraction.paragraphs {
        builder = builder.paragraphs(n);
    }
    if let Some(n) = extraction.max_lines_per_paragraph {
        builder = builder.max_lines_per_paragraph(n);
    }
    if let Some(n) = extraction.min_block_words {
        builder = builder.min_block_words(n);
    }
    if let Some(ref keyword) = extraction.methodology_keyword {
        builder = builder.methodology_keyword(keyword);
    }
    if let Some(ref keyword) = extraction.conclusions_keyword {
        builder = builder.conclusions_keyword(keyword);
    }
    if let Some(keywords) = extraction.author_keywords {
        builder = builder.set_author_keywords(keywords);
    }
    if let Some(keywords) = extraction.advisor_keywords {
        builder = builder.set_advisor_keywords(keywords);
    }
    let extraction = builder.build().context("invalid extraction settings")?;

    Ok(Settings {
        variant,
        names_path,
        color,
        extraction,
    })
}

/// Whether the path has a `.pdf` extension, ignoring case.
fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
