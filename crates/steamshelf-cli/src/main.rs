use clap::Parser;
use steamshelf_cli::{
    Cli, argv_requests_json, exit_code, report_error, report_usage_error, run, setup_logging,
};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let json = argv_requests_json(std::env::args_os());
            std::process::exit(report_usage_error(&e, json));
        }
    };
    setup_logging(cli.log_level);

    let json = cli.json_output();
    if let Err(e) = run(cli).await {
        report_error(&e, json);
        std::process::exit(exit_code(&e));
    }
}
