use cep_race::utils::error::CepError;
use cep_race::utils::logger;
use cep_race::{render_outcome, CepLookup, CliConfig, HttpFetcher};
use clap::Parser;
use std::io::{BufRead, Write};

fn read_cep_from_stdin() -> std::io::Result<String> {
    println!("Please enter the Zip code:");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

async fn run(config: &CliConfig) -> Result<String, CepError> {
    let settings = config.race_settings()?;
    tracing::debug!("Race settings: {:?}", settings);

    let input = match &config.cep {
        Some(cep) => cep.clone(),
        None => read_cep_from_stdin()?,
    };

    let lookup = CepLookup::new(HttpFetcher::new(), settings);
    let outcome = lookup.run(&input).await?;
    render_outcome(&outcome)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    match run(&config).await {
        Ok(rendered) => {
            println!("{}", rendered);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Lookup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }
}
