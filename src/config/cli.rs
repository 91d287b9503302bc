use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "incsv")]
#[command(about = "Transform CSV files into inconsistent variants via a generative-AI endpoint")]
pub struct CliConfig {
    /// Directory containing the CSV files to transform
    pub input_dir: PathBuf,

    /// API key for the generation endpoint
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// generateContent endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// ListModels endpoint URL
    #[arg(long)]
    pub models_endpoint: Option<String>,

    /// File holding the prompt template (must contain the placeholder token)
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,

    /// Placeholder token replaced by each file's content
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Suffix selecting input files
    #[arg(long)]
    pub input_suffix: Option<String>,

    /// Suffix inserted into output file names
    #[arg(long)]
    pub output_suffix: Option<String>,

    /// Per-request timeout in seconds (no timeout when absent)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Read defaults from a TOML config file; CLI flags win
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
