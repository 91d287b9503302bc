use clap::Parser;
use incsv::utils::logger;
use incsv::{BatchDriver, CliConfig, GeminiClient, Settings, Transformer};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting incsv batch run");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match Settings::resolve(cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration error: {}", e);
            eprintln!("❌ configuration error: {}", e);
            std::process::exit(2);
        }
    };

    // Cannot fail after validation, but keep the boundary explicit.
    let prompt = match settings.prompt_template() {
        Ok(prompt) => prompt,
        Err(e) => {
            eprintln!("❌ configuration error: {}", e);
            std::process::exit(2);
        }
    };

    let client = match GeminiClient::new(
        settings.generate_endpoint.clone(),
        settings.models_endpoint.clone(),
        settings.api_key.clone(),
        settings.timeout,
    ) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ failed to build HTTP client: {}", e);
            std::process::exit(2);
        }
    };

    let transformer = Transformer::new(client, prompt);
    let driver = BatchDriver::new(
        transformer,
        settings.input_suffix.clone(),
        settings.output_suffix.clone(),
    );

    match driver.run(&settings.input_dir).await {
        Ok(report) => {
            for outcome in &report.outcomes {
                match &outcome.result {
                    Ok(rows) => println!(
                        "ok   {} -> {} ({} rows)",
                        outcome.input.display(),
                        outcome.output.display(),
                        rows
                    ),
                    Err(e) => println!("fail {}: {}", outcome.input.display(), e),
                }
            }
            println!(
                "{} attempted, {} succeeded, {} failed",
                report.attempted(),
                report.succeeded(),
                report.failed()
            );

            if !report.all_succeeded() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!("❌ Batch run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
