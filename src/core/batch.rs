use crate::core::transform::Transformer;
use crate::domain::model::{BatchReport, FileOutcome};
use crate::domain::ports::TextGenerator;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Walks a directory and feeds every matching file through the transform
/// pipeline, one at a time. A file's failure never stops the batch.
pub struct BatchDriver<G: TextGenerator> {
    transformer: Transformer<G>,
    input_suffix: String,
    output_suffix: String,
}

impl<G: TextGenerator> BatchDriver<G> {
    pub fn new(
        transformer: Transformer<G>,
        input_suffix: impl Into<String>,
        output_suffix: impl Into<String>,
    ) -> Self {
        Self {
            transformer,
            input_suffix: input_suffix.into(),
            output_suffix: output_suffix.into(),
        }
    }

    pub async fn run(&self, dir: &Path) -> Result<BatchReport> {
        let inputs = self.collect_inputs(dir)?;
        tracing::info!("Found {} files to transform in {}", inputs.len(), dir.display());

        let mut report = BatchReport::default();
        for input in inputs {
            let output = self.output_path(&input);
            let result = self.transformer.process_file(&input, &output).await;

            match &result {
                Ok(rows) => {
                    tracing::info!("✅ {} -> {} ({} rows)", input.display(), output.display(), rows);
                }
                Err(e) => {
                    tracing::error!("❌ {}: {}", input.display(), e);
                    match e.raw_body() {
                        Some(body) if !body.is_empty() => {
                            tracing::error!("Raw API response for {}: {}", input.display(), body);
                        }
                        _ => {}
                    }
                }
            }

            report.outcomes.push(FileOutcome {
                input,
                output,
                result,
            });
        }

        Ok(report)
    }

    /// Files ending with the input suffix (case-sensitive), sorted by name
    /// for a deterministic order. Outputs of a previous run are skipped so a
    /// rerun does not feed them back through the model.
    fn collect_inputs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut inputs = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(stem) = name.strip_suffix(&self.input_suffix) else {
                continue;
            };
            if stem.ends_with(&self.output_suffix) {
                tracing::debug!("Skipping previous output: {}", name);
                continue;
            }
            inputs.push(path);
        }
        inputs.sort();
        Ok(inputs)
    }

    fn output_path(&self, input: &Path) -> PathBuf {
        let name = input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let stem = name.strip_suffix(&self.input_suffix).unwrap_or(name);
        input.with_file_name(format!("{}{}{}", stem, self.output_suffix, self.input_suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prompt::PromptTemplate;
    use crate::utils::error::EtlError;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct IdentityGenerator;

    #[async_trait]
    impl TextGenerator for IdentityGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            Ok(prompt.to_string())
        }
    }

    fn identity_driver() -> BatchDriver<IdentityGenerator> {
        let prompt = PromptTemplate::new("[DOC]", "[DOC]").unwrap();
        BatchDriver::new(
            Transformer::new(IdentityGenerator, prompt),
            ".csv",
            "-transformed",
        )
    }

    #[test]
    fn output_path_inserts_the_suffix_before_the_extension() {
        let driver = identity_driver();
        assert_eq!(
            driver.output_path(Path::new("/data/sales.csv")),
            PathBuf::from("/data/sales-transformed.csv")
        );
    }

    #[tokio::test]
    async fn only_matching_files_are_transformed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.csv"), "x,y\n").unwrap();
        fs::write(dir.path().join("b.csv"), "p,q\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not csv").unwrap();
        fs::write(dir.path().join("upper.CSV"), "case,sensitive\n").unwrap();

        let report = identity_driver().run(dir.path()).await.unwrap();

        assert_eq!(report.attempted(), 2);
        assert!(report.all_succeeded());
        assert!(dir.path().join("a-transformed.csv").exists());
        assert!(dir.path().join("b-transformed.csv").exists());
        assert!(!dir.path().join("notes-transformed.txt").exists());
    }

    #[tokio::test]
    async fn previous_outputs_are_not_reprocessed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.csv"), "x,y\n").unwrap();
        fs::write(dir.path().join("a-transformed.csv"), "\"x\",\"y\"\n").unwrap();

        let report = identity_driver().run(dir.path()).await.unwrap();

        assert_eq!(report.attempted(), 1);
        assert_eq!(report.outcomes[0].input, dir.path().join("a.csv"));
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_batch() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.csv"), [0x61, 0xFF]).unwrap(); // not UTF-8
        fs::write(dir.path().join("b.csv"), "p,q\n").unwrap();

        let report = identity_driver().run(dir.path()).await.unwrap();

        assert_eq!(report.attempted(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.succeeded(), 1);
        assert!(matches!(
            report.outcomes[0].result,
            Err(EtlError::InvalidUtf8 { .. })
        ));
        assert!(dir.path().join("b-transformed.csv").exists());
        assert!(!dir.path().join("a-transformed.csv").exists());
    }

    #[tokio::test]
    async fn files_are_processed_in_name_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zz.csv"), "z\n").unwrap();
        fs::write(dir.path().join("aa.csv"), "a\n").unwrap();

        let report = identity_driver().run(dir.path()).await.unwrap();

        assert_eq!(report.outcomes[0].input, dir.path().join("aa.csv"));
        assert_eq!(report.outcomes[1].input, dir.path().join("zz.csv"));
    }
}
