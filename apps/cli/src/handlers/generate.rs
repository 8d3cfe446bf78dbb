use crate::models::args::GenerateArgs;
use anyhow::{Context, Result};
use chrono::Utc;
use recap::domain::config::ApiConfig;
use recap::domain::features::ReportFeatures;
use recap::features::report::{ReportRequest, live_pipeline};
use recap::kernel::config::{load_config, load_secrets};
use tracing::info;

/// Runs the pipeline once and writes each export into `args.out`, printing
/// the written paths.
pub(crate) async fn run(args: GenerateArgs) -> Result<()> {
    let cfg: ApiConfig = match &args.config {
        Some(path) => load_config(Some(path)).context("Failed to load configuration")?,
        None => ApiConfig::default(),
    };

    let secrets_file = args.secrets.as_ref().unwrap_or(&cfg.security.secrets_file);
    let secrets = load_secrets(Some(secrets_file.as_path()))?;
    secrets.validate().context("Run `recap check` for details")?;

    let plan = request(&args).plan(&cfg.report, Utc::now().date_naive())?;
    let pipeline = live_pipeline(&cfg, &secrets)?;

    let report = pipeline
        .generate_with(&plan, |phase| eprintln!("[{:>3}%] {phase}", phase.percent()))
        .await?;

    tokio::fs::create_dir_all(&args.out)
        .await
        .with_context(|| format!("Failed to create {}", args.out.display()))?;

    for export in report.exports()? {
        let path = args.out.join(&export.file_name);
        tokio::fs::write(&path, export.body)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{}", path.display());
    }

    info!(
        period = %report.period,
        articles = report.articles_count,
        themes = report.themes_count,
        "Report written"
    );
    Ok(())
}

fn request(args: &GenerateArgs) -> ReportRequest {
    let mut features = ReportFeatures::all();
    features.set(ReportFeatures::SECTORS, !args.no_sectors);
    features.set(ReportFeatures::COMPLIANCE, !args.no_compliance);
    features.set(ReportFeatures::SOURCES, !args.no_sources);
    features.set(ReportFeatures::EMAIL, !args.no_email);

    ReportRequest {
        start_date: args.start,
        end_date: args.end,
        language: args.language,
        features,
        articles_limit: args.articles_limit,
        stories_per_theme: args.stories_per_theme,
        temperature: args.temperature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::args::{AppCommands, Cli};
    use clap::Parser;
    use recap::features::report::Language;

    fn parse(args: &[&str]) -> GenerateArgs {
        let cli = Cli::try_parse_from(["recap", "generate"].iter().chain(args)).unwrap();
        match cli.command {
            AppCommands::Generate(args) => args,
            AppCommands::Check { .. } => unreachable!(),
        }
    }

    #[test]
    fn flags_switch_features_off() {
        let request = request(&parse(&["--no-sectors", "--no-email"]));
        assert_eq!(request.features, ReportFeatures::COMPLIANCE | ReportFeatures::SOURCES);
        assert_eq!(request.language, Language::English);
        assert!(request.temperature.is_none());
    }

    #[test]
    fn passes_dates_and_knobs_through() {
        let args = parse(&[
            "--start",
            "2026-10-05",
            "--end",
            "2026-10-12",
            "--language",
            "Simplified Chinese",
            "--articles-limit",
            "100",
            "--temperature",
            "0.4",
        ]);
        let request = request(&args);

        assert_eq!(request.start_date, chrono::NaiveDate::from_ymd_opt(2026, 10, 5));
        assert_eq!(request.language, Language::SimplifiedChinese);
        assert_eq!(request.articles_limit, Some(100));
        assert_eq!(request.features, ReportFeatures::all());
        assert_eq!(args.out, std::path::PathBuf::from("reports"));
    }
}
