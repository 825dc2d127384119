use clap::Parser;
use door_access::config::cli::execute;
use door_access::utils::logger;
use door_access::{CliConfig, ConsoleNotifier};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 先讀設定檔，日誌選項可能來自檔案
    let file = config.load_file();
    let (verbose, json_logs) = match &file {
        Ok(Some(file)) => (config.verbose || file.verbose(), config.json_logs || file.json_logs()),
        _ => (config.verbose, config.json_logs),
    };

    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    let code = execute(&config, file, ConsoleNotifier::stdout()).await;
    if code != 0 {
        std::process::exit(code);
    }
}
