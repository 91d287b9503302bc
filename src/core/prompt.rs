use crate::utils::error::{EtlError, Result};

pub const DEFAULT_PLACEHOLDER: &str = "[CSV_DATA_HERE]";

/// Built-in prompt asking the model to reshape CSV data into an inconsistent
/// variant for data-integration testing. Override with `--prompt-file`.
pub const DEFAULT_TEMPLATE: &str = r#"Task: Transform the following CSV data into an inconsistent CSV format suitable for data integration testing.

CSV Data:
[CSV_DATA_HERE]

Transformation Instructions:
- The output MUST be in CSV format. Use comma (",") as the delimiter and double quotes to enclose string values if they contain commas.
- Ensure that ALL columns from the input CSV are present in the output CSV. Do not skip columns.
- Maintain consistent column names across all rows in the output CSV. Column names may differ from the input headers but must stay semantically related to them.
- Introduce realistic formatting mismatches compared to the input: case changes, abbreviations, prefixes and suffixes, different numeric precision or "K" notation, alternative date formats, unit conversions.
- The output CSV should represent the same information as the input CSV in a significantly different format.

Desired Output Format: CSV
"#;

/// Prompt template with one designated placeholder token. Construction fails
/// when the placeholder does not occur in the template, so a silently
/// unsubstituted prompt can never reach the endpoint.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    placeholder: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>, placeholder: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let placeholder = placeholder.into();

        if placeholder.trim().is_empty() {
            return Err(EtlError::InvalidConfigValue {
                field: "placeholder".to_string(),
                value: placeholder,
                reason: "placeholder token cannot be empty".to_string(),
            });
        }
        if !template.contains(&placeholder) {
            return Err(EtlError::config(format!(
                "prompt template does not contain the placeholder token '{}'",
                placeholder
            )));
        }

        Ok(Self {
            template,
            placeholder,
        })
    }

    /// Substitutes every occurrence of the placeholder with the document text.
    pub fn render(&self, document: &str) -> String {
        self.template.replace(&self.placeholder, document)
    }
}
