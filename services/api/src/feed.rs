use clap::{Args, ValueEnum};
use review_feed::config::AppConfig;
use review_feed::error::AppError;
use review_feed::extract::render::{summary_line, to_csv, to_pretty_json};
use review_feed::extract::{ExtractionReport, ExtractorOptions, ReviewExtractor};
use review_feed::telemetry::{self, TelemetryMode};
use std::path::PathBuf;

const STDIN_MARKER: &str = "-";

#[derive(Args, Debug, Default)]
pub(crate) struct ExtractArgs {
    /// Saved review page to read, `-` for stdin (defaults to REVIEWS_INPUT or review.html)
    #[arg(long, short)]
    pub(crate) input: Option<PathBuf>,
    /// Output format for the extracted feed
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub(crate) format: OutputFormat,
    /// Print the reason each skipped card was skipped to stderr
    #[arg(long)]
    pub(crate) diagnostics: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Json,
    Csv,
}

pub(crate) fn run_extract(args: ExtractArgs) -> Result<(), AppError> {
    let ExtractArgs {
        input,
        format,
        diagnostics,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, TelemetryMode::Batch)?;

    let input = input.unwrap_or_else(|| config.reviews.input.clone());
    let options = ExtractorOptions::from_config(&config.reviews).with_diagnostics(diagnostics);
    let extractor = ReviewExtractor::new(options)?;

    let report = if input.as_os_str() == STDIN_MARKER {
        extractor.extract_reader(std::io::stdin().lock(), "stdin")?
    } else {
        extractor.extract_path(&input)?
    };

    print!("{}", render_feed(&report, format)?);

    for rejection in &report.rejections {
        eprintln!("skipped card {}: {}", rejection.position, rejection.reason);
    }

    Ok(())
}

/// Feed body, a blank line, then the accepted count.
pub(crate) fn render_feed(
    report: &ExtractionReport,
    format: OutputFormat,
) -> Result<String, AppError> {
    let body = match format {
        OutputFormat::Json => to_pretty_json(&report.reviews)?,
        OutputFormat::Csv => to_csv(&report.reviews)?.trim_end().to_string(),
    };
    Ok(format!("{body}\n\n{}\n", summary_line(report.total())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_CARD: &str = r#"<div data-testid="review-card"><span data-testid="filled-star"></span><span>Seller of house in Toowong, 3 months ago</span><p class="xYFng">Great experience.</p></div>"#;

    fn report(html: &str) -> ExtractionReport {
        ReviewExtractor::new(ExtractorOptions::default())
            .expect("extractor")
            .extract_html(html)
    }

    #[test]
    fn json_feed_ends_with_blank_line_and_count() {
        let output = render_feed(&report(ONE_CARD), OutputFormat::Json).expect("render");
        assert!(output.starts_with("[\n  {\n    \"id\": 1,"));
        assert!(output.ends_with("}\n]\n\nTotal reviews extracted: 1\n"));
    }

    #[test]
    fn empty_page_prints_empty_array() {
        let output = render_feed(&report("<html></html>"), OutputFormat::Json).expect("render");
        assert_eq!(output, "[]\n\nTotal reviews extracted: 0\n");
    }

    #[test]
    fn csv_feed_keeps_summary_line() {
        let output = render_feed(&report(ONE_CARD), OutputFormat::Csv).expect("render");
        assert_eq!(
            output,
            "id,rating,type,location,content,time\n1,5,Seller,Toowong,Great experience.,3 months ago\n\nTotal reviews extracted: 1\n"
        );
    }
}
