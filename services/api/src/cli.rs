use crate::feed::{run_extract, ExtractArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use review_feed::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Review Feed",
    about = "Extract five-star customer reviews from a saved review page into the website feed",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract reviews from a saved HTML page (default command)
    Extract(ExtractArgs),
    /// Start the HTTP extraction service
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Extract(ExtractArgs::default()));

    match command {
        Command::Extract(args) => run_extract(args),
        Command::Serve(args) => server::run(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::OutputFormat;
    use std::path::PathBuf;

    #[test]
    fn extract_flags_parse() {
        let cli = Cli::try_parse_from([
            "review-feed",
            "extract",
            "--input",
            "pages/review.html",
            "--format",
            "csv",
            "--diagnostics",
        ])
        .expect("arguments parse");
        match cli.command {
            Some(Command::Extract(args)) => {
                assert_eq!(args.input, Some(PathBuf::from("pages/review.html")));
                assert_eq!(args.format, OutputFormat::Csv);
                assert!(args.diagnostics);
            }
            other => panic!("expected extract command, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_extract() {
        let cli = Cli::try_parse_from(["review-feed"]).expect("arguments parse");
        assert!(cli.command.is_none());
        let args = ExtractArgs::default();
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.input.is_none());
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["review-feed", "serve", "--port", "8080"])
            .expect("arguments parse");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}
