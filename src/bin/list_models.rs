use clap::Parser;
use incsv::config::DEFAULT_MODELS_ENDPOINT;
use incsv::utils::logger;
use incsv::{EtlError, GeminiClient};

/// Diagnostic sibling of the batch runner: asks the ListModels endpoint what
/// the configured key can use and prints each entry's metadata.
#[derive(Debug, Parser)]
#[command(name = "list_models")]
#[command(about = "List the generative models available to the configured API key")]
struct Args {
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(long, default_value = DEFAULT_MODELS_ENDPOINT)]
    endpoint: String,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let client = match GeminiClient::new(
        args.endpoint.clone(),
        args.endpoint,
        args.api_key,
        None,
    ) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ failed to build HTTP client: {}", e);
            std::process::exit(2);
        }
    };

    match client.list_models().await {
        Ok(models) => {
            println!("Available models:\n");
            for model in models {
                println!("Model Name: {}", model.name);
                println!("  Description: {}", model.description.as_deref().unwrap_or("-"));
                println!("  Version: {}", model.version.as_deref().unwrap_or("-"));
                println!(
                    "  Supported Methods: {}",
                    model.supported_generation_methods.join(", ")
                );
                println!("{}", "-".repeat(30));
            }
        }
        Err(e) => {
            eprintln!("❌ listing models failed: {}", e);
            // A transport failure has no response; only print a body when
            // one actually arrived.
            if let EtlError::Api { body, .. } = &e {
                if !body.is_empty() {
                    eprintln!("Raw API response: {}", body);
                }
            }
            std::process::exit(1);
        }
    }
}
