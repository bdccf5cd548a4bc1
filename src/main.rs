use clap::Parser;
use serde::Serialize;
use solence_client::app::{report, walkthrough};
use solence_client::utils::{logger, validation::Validate};
use solence_client::{CliConfig, Command, SolenceApi, SolenceClient, SolenceError};

fn print_json<T: Serialize>(value: &T) -> Result<(), SolenceError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), SolenceError> {
    let config = cli.client_config()?;
    tracing::debug!("Client config: {:?}", config);
    config.validate()?;

    let client = SolenceClient::new(config)?;

    match &cli.command {
        Command::Scan { wallet, public } => {
            let result = client.scan(wallet, *public).await?;
            if cli.json {
                print_json(&result)?;
            } else {
                print!("{}", report::format_scan_result(&result));
            }
        }
        Command::History {
            wallet,
            limit,
            skip,
        } => {
            let history = client.history(wallet, *limit, *skip).await?;
            if cli.json {
                print_json(&history)?;
            } else {
                print!("{}", report::format_history(&history));
            }
        }
        Command::Verify { wallet } => {
            let status = client.verify_badge(wallet).await?;
            if cli.json {
                print_json(&status)?;
            } else {
                print!("{}", report::format_badge_status(&status, None));
            }
        }
        Command::Mint { wallet, scan_id } => {
            let minted = client.mint_badge(wallet, scan_id).await?;
            if cli.json {
                print_json(&minted)?;
            } else {
                print!("{}", report::format_mint_result(&minted));
            }
        }
        Command::Walkthrough { wallet } => {
            let output = walkthrough::run_walkthrough(&client, wallet).await?;
            print!("{}", output);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("Starting solence CLI: {:?}", cli.command);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Request failed: {} (Severity: {:?}, Status: {:?})",
            e,
            e.severity(),
            e.status()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}
