use clap::Parser;
use colored::Colorize;
use ejector::logger::initialize_logger;
use ejector::{Ejector, EjectorConfig};
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[arg(short = 'f', long, help = "filter the dependencies you'd like to eject")]
    filter: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();
    initialize_logger();

    println!("\n⏏️  {}\n", "EJECTOR".cyan());

    let ejector = Ejector::new(EjectorConfig::default());
    match ejector.eject(cli_args.filter.as_deref()).await {
        Ok(report) => {
            debug!(
                "Ejected {} categories from {}",
                report.categories.len(),
                report.dependency
            );
            println!("\n🏁 {}\n", "Fin.".cyan());
            ExitCode::SUCCESS
        }
        Err(e) if e.is_cancelled() => {
            debug!("{}", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_is_the_only_option() {
        let args = CliArgs::try_parse_from(["ejector", "-f", "chart"]).unwrap();
        assert_eq!(args.filter.as_deref(), Some("chart"));

        let args = CliArgs::try_parse_from(["ejector"]).unwrap();
        assert_eq!(args.filter, None);

        assert!(CliArgs::try_parse_from(["ejector", "-C", "/tmp"]).is_err());
        assert!(CliArgs::try_parse_from(["ejector", "--project-root", "/tmp"]).is_err());
    }
}
