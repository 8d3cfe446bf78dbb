//! Downloadable renderings of a [`MarketReport`].

use crate::error::{ReportError, ReportErrorExt};
use crate::report::MarketReport;
use recap_domain::constants::{PLATFORM_NAME, PLATFORM_VERSION};
use recap_domain::features::ReportFeatures;
use serde_json::json;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

const RULE_WIDTH: usize = 80;
const EXECUTIVE_CHARS: usize = 500;

const EXECUTIVE_DISCLAIMER: &str = "\
EXECUTIVE DISCLAIMER:
This report contains information from third-party financial news sources.
All content should be independently verified from original sources.
This analysis is for informational purposes only and does not constitute investment advice.
";

const COMPLIANCE_NOTICE: &str = "\
COMPLIANCE NOTICE:
- Data Sources: Benzinga Financial News, Yahoo Finance Market Data
- AI Analysis: OpenAI GPT-4 Professional Financial Analysis
";

const VERIFICATION_NOTE: &str =
    "- Verification: Please confirm all information independently before investment decisions";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    /// Full text report with optional compliance blocks.
    Report,
    /// Short briefing built from the first 500 characters.
    Executive,
    /// Email-ready text; only with [`ReportFeatures::EMAIL`].
    Email,
    /// Metadata, settings, content and market data.
    Json,
    /// Eight summary metrics.
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Report => "_report.txt",
            Self::Executive => "_executive.txt",
            Self::Email => "_email.txt",
            Self::Json => "_data.json",
            Self::Csv => "_analytics.csv",
        }
    }

    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Report | Self::Executive | Self::Email => "text/plain; charset=utf-8",
            Self::Json => "application/json",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }

    #[must_use]
    pub fn is_available(self, features: ReportFeatures) -> bool {
        self != Self::Email || features.contains(ReportFeatures::EMAIL)
    }
}

/// A rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime: &'static str,
    pub body: String,
}

impl MarketReport {
    /// `market_intelligence_YYYYMMDD`, dated by the period end.
    #[must_use]
    pub fn file_base(&self) -> String {
        format!("market_intelligence_{}", self.period.end().format("%Y%m%d"))
    }

    /// Formats this report can be exported to.
    pub fn export_formats(&self) -> impl Iterator<Item = ExportFormat> {
        let features = self.features;
        <ExportFormat as strum::IntoEnumIterator>::iter()
            .filter(move |format| format.is_available(features))
    }

    /// Renders one format; `None` when the format is switched off.
    ///
    /// # Errors
    /// [`ReportError::Json`] if the JSON export cannot be serialized.
    pub fn export(&self, format: ExportFormat) -> Result<Option<Export>, ReportError> {
        if !format.is_available(self.features) {
            return Ok(None);
        }

        let body = match format {
            ExportFormat::Report => self.render_report(),
            ExportFormat::Executive => self.render_executive(),
            ExportFormat::Email => self.render_email(),
            ExportFormat::Json => self.render_json()?,
            ExportFormat::Csv => self.render_csv(),
        };

        Ok(Some(Export {
            format,
            file_name: format!("{}{}", self.file_base(), format.suffix()),
            mime: format.mime(),
            body,
        }))
    }

    /// Every available export.
    ///
    /// # Errors
    /// See [`MarketReport::export`].
    pub fn exports(&self) -> Result<Vec<Export>, ReportError> {
        self.export_formats()
            .filter_map(|format| self.export(format).transpose())
            .collect()
    }

    fn render_report(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let compliance = self.features.contains(ReportFeatures::COMPLIANCE);

        let mut out = format!(
            "MARKET INTELLIGENCE REPORT\nGenerated: {}\nPeriod: {} - {}\nLanguage: {}\n\n{rule}\n\n",
            self.generated_at.format("%B %d, %Y at %H:%M"),
            self.period.start().format("%B %d"),
            self.period.end().format("%B %d, %Y"),
            self.language,
        );
        if compliance {
            out.push_str(&format!("{EXECUTIVE_DISCLAIMER}\n{rule}\n\n"));
        }
        out.push_str(&format!("{}\n\n{rule}\n", self.content));
        if compliance {
            out.push_str(&format!(
                "\n{COMPLIANCE_NOTICE}- Generated: {}\n{VERIFICATION_NOTE}\n",
                self.generated_at.to_rfc3339()
            ));
        }
        out
    }

    fn render_executive(&self) -> String {
        let start = self.period.start();
        let end = self.period.end();
        let summary: String = self.content.chars().take(EXECUTIVE_CHARS).collect();

        format!(
            "EXECUTIVE MARKET BRIEFING

TO: Leadership Team
FROM: {PLATFORM_NAME}
DATE: {date}
RE: Market Analysis ({from} - {to})

EXECUTIVE SUMMARY:
{summary}...

DISTRIBUTION:
- Board Members
- Investment Committee
- Risk Management
- Strategy Team

CONFIDENTIALITY NOTICE:
This briefing contains proprietary market analysis and should be treated as confidential.
",
            date = self.generated_at.format("%B %d, %Y"),
            from = start.format("%b %d"),
            to = end.format("%b %d, %Y"),
        )
    }

    fn render_email(&self) -> String {
        let start = self.period.start();
        let end = self.period.end();

        format!(
            "Subject: Market Intelligence Brief | {end_long}

MARKET INTELLIGENCE BRIEFING
{end_long}

Dear Team,

Please find our latest market intelligence analysis covering the period from {from} to {end_long}.

KEY HIGHLIGHTS:
- {articles} market developments analyzed
- {themes} strategic themes identified
- Multi-source verification included

{content}

Best regards,
Market Intelligence Team

---
DISCLAIMER: This analysis is for informational purposes only. Please verify all information independently.
Data Sources: Benzinga, Yahoo Finance | AI Analysis: GPT-4 Professional
",
            end_long = end.format("%B %d, %Y"),
            from = start.format("%B %d"),
            articles = self.articles_count,
            themes = self.themes_count,
            content = self.content,
        )
    }

    fn render_json(&self) -> Result<String, ReportError> {
        let document = json!({
            "report_metadata": {
                "generated_timestamp": self.generated_at.to_rfc3339(),
                "analysis_period": {
                    "start_date": self.period.start(),
                    "end_date": self.period.end(),
                    "duration_days": self.days(),
                },
                "configuration": {
                    "language": self.language,
                    "articles_analyzed": self.articles_count,
                    "themes_identified": self.themes_count,
                    "settings": self.features,
                },
            },
            "report_content": {
                "full_analysis": self.content,
                "language": self.language,
            },
            "market_data": self.market,
            "system_info": {
                "platform": PLATFORM_NAME,
                "version": PLATFORM_VERSION,
                "data_sources": ["Benzinga API", "Yahoo Finance", "OpenAI GPT-4"],
            },
        });

        serde_json::to_string_pretty(&document).context("Rendering JSON export")
    }

    fn render_csv(&self) -> String {
        let rows: [(&str, String, &str); 8] = [
            ("Analysis Period", self.days().to_string(), "Days"),
            ("Articles Analyzed", self.articles_count.to_string(), "Count"),
            ("Market Themes", self.themes_count.to_string(), "Count"),
            ("Language", self.language.to_string(), "Text"),
            ("Generated Date", self.generated_at.format("%Y-%m-%d %H:%M").to_string(), "Timestamp"),
            ("Market Indices", self.market.indices.len().to_string(), "Count"),
            ("Sectors Tracked", self.market.sectors.len().to_string(), "Count"),
            ("Individual Stocks", self.market.stocks.len().to_string(), "Count"),
        ];

        let mut lines = vec!["Metric,Value,Unit".to_owned()];
        lines.extend(
            rows.into_iter().map(|(metric, value, unit)| format!("{metric},{value},{unit}")),
        );
        lines.push(String::new());
        lines.join("\n")
    }
}
