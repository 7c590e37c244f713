use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use thesis_core::{ExtractionRecord, FieldValue};

const RULE_WIDTH: usize = 70;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the report for one document.
///
/// Single-line fields go after their label; methodology and conclusions
/// start on the next line. Values that were not found are dimmed.
pub fn print_record(
    w: &mut dyn Write,
    path: &Path,
    record: &ExtractionRecord,
    color: ColorMode,
) -> std::io::Result<()> {
    print_file_header(w, path, color)?;

    for (field, value) in record.iter() {
        let label = format!("{}:", field.label());
        let separator = if field.is_passage() { "\n" } else { " " };
        if color.enabled() {
            write!(w, "{}{}", label.bold(), separator)?;
            match value {
                FieldValue::Found(v) => writeln!(w, "{}", v)?,
                FieldValue::NotFound { sentinel } => writeln!(w, "{}", sentinel.dimmed())?,
            }
        } else {
            writeln!(w, "{}{}{}", label, separator, value)?;
        }
    }

    writeln!(w)?;
    writeln!(w, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(w)?;
    Ok(())
}

/// Print the capitalised name sequences found anywhere in the document.
pub fn print_names(w: &mut dyn Write, names: &[String], color: ColorMode) -> std::io::Result<()> {
    let heading = format!("Nombres encontrados ({}):", names.len());
    if color.enabled() {
        writeln!(w, "{}", heading.bold())?;
    } else {
        writeln!(w, "{}", heading)?;
    }
    for name in names {
        writeln!(w, "  - {}", name)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print a per-file failure. The run carries on with the next file.
pub fn print_file_error(
    w: &mut dyn Write,
    path: &Path,
    error: &dyn std::fmt::Display,
    color: ColorMode,
) -> std::io::Result<()> {
    print_file_header(w, path, color)?;
    if color.enabled() {
        writeln!(w, "{} {}", "ERROR:".red(), error)?;
    } else {
        writeln!(w, "ERROR: {}", error)?;
    }
    writeln!(w)?;
    writeln!(w, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(w)?;
    Ok(())
}

pub fn print_warning(w: &mut dyn Write, message: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}", "AVISO:".yellow(), message)
    } else {
        writeln!(w, "AVISO: {}", message)
    }
}

/// Print the end-of-run tally.
pub fn print_summary(
    w: &mut dyn Write,
    processed: usize,
    failed: usize,
    skipped: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    let line = format!(
        "Procesados: {}  Con errores: {}  Omitidos: {}",
        processed, failed, skipped
    );
    if !color.enabled() {
        writeln!(w, "{}", line)
    } else if failed > 0 {
        writeln!(w, "{}", line.red())
    } else {
        writeln!(w, "{}", line.green())
    }
}

fn print_file_header(w: &mut dyn Write, path: &Path, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}", "Archivo:".bold().cyan(), path.display())
    } else {
        writeln!(w, "Archivo: {}", path.display())
    }
}
