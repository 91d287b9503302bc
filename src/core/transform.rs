use crate::core::prompt::PromptTemplate;
use crate::domain::model::CsvRows;
use crate::domain::ports::TextGenerator;
use crate::utils::error::{EtlError, Result};
use std::fs;
use std::path::Path;

/// Per-file pipeline: load -> compose -> request -> extract -> parse ->
/// persist. One attempt per file; any failure belongs to that file alone.
pub struct Transformer<G: TextGenerator> {
    generator: G,
    prompt: PromptTemplate,
}

impl<G: TextGenerator> Transformer<G> {
    pub fn new(generator: G, prompt: PromptTemplate) -> Self {
        Self { generator, prompt }
    }

    /// Runs one file through the pipeline. The output file is created (or
    /// overwritten) only after the generated text parsed into at least one
    /// row. Returns the number of rows written.
    pub async fn process_file(&self, input: &Path, output: &Path) -> Result<usize> {
        let document = load_document(input)?;
        let prompt = self.prompt.render(&document);

        tracing::debug!("Requesting transformation for: {}", input.display());
        let generated = self.generator.generate(&prompt).await?;

        let rows = parse_rows(&generated)?;
        write_rows(output, &rows)?;

        tracing::debug!("Wrote {} rows to: {}", rows.len(), output.display());
        Ok(rows.len())
    }
}

fn load_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|_| EtlError::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}

/// Parses generated text as comma-delimited CSV with double-quote escaping.
/// Rows keep whatever field count they came with. Zero rows is a failure,
/// never an empty success.
pub fn parse_rows(text: &str) -> Result<CsvRows> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    if rows.is_empty() {
        return Err(EtlError::EmptyOutput {
            body: text.to_string(),
        });
    }
    Ok(rows)
}

/// Writes rows with every field quoted and `\n` record terminators.
pub fn write_rows(path: &Path, rows: &CsvRows) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_path(path)?;

    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
