//! Prompt text sent to the language model.

use crate::language::Language;

pub const REPORT_SYSTEM_PROMPT: &str = "\
You are a senior financial market analyst writing a professional market insights report for institutional clients.

CRITICAL INSTRUCTIONS - COMPLIANCE & ACCURACY:
- Use ONLY the provided market data and news articles
- ALWAYS include source links for any news references in your analysis
- When mentioning news stories, format as: \"According to Benzinga [insert URL], [story details]\"
- Add clear disclaimers that news content comes from third-party sources
- Write with authority but acknowledge information sources transparently
- Focus on analysis and interpretation rather than republishing news content
- Maintain professional tone suitable for institutional clients

COMPLIANCE REQUIREMENTS:
- Include source attribution for all news references
- Add disclaimers about third-party content
- Focus on data analysis rather than news republication
- Ensure readers can verify original sources independently";

/// The drafting prompt: verified performance data, ranked news and the
/// expected report structure.
#[must_use]
pub fn report_user_prompt(period_label: &str, performance: &str, news: &str) -> String {
    format!(
        "\
Generate a comprehensive market insights report for the period {period_label}:

MARKET PERFORMANCE DATA (Verified):
{performance}

KEY NEWS DEVELOPMENTS WITH SOURCES:
{news}

COMPLIANCE INSTRUCTIONS:
- For any news story mentioned, include the source URL from the data above
- Use format: \"According to Benzinga (URL), [brief summary]\"
- Add disclaimer: \"Readers should verify information independently from original sources\"
- Focus on analytical insights rather than republishing full news content

Structure the report with these sections:
1. Executive Summary (3-4 key themes with source links)
2. Market Performance Analysis (indices, sectors, notable movements)
3. Key Developments During Period (major themes with source links and disclaimers)
4. Notable Stock Movements (significant performers with context)
5. Market Outlook (forward-looking analysis based on trends)
6. Sources & Disclaimers (comprehensive source list and compliance notices)

Target length: 1200-1500 words. Write for sophisticated investors expecting actionable intelligence with full transparency."
    )
}

#[must_use]
pub fn translation_system_prompt(language: Language) -> String {
    format!(
        "You are a professional financial translator. Translate the following market report to \
         {language} while maintaining professional tone and financial accuracy."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_embeds_inputs_in_order() {
        let prompt = report_user_prompt("October 05, 2026 to October 12, 2026", "PERF", "NEWS");

        assert!(prompt.starts_with(
            "Generate a comprehensive market insights report for the period October 05, 2026 to October 12, 2026:"
        ));
        let perf = prompt.find("MARKET PERFORMANCE DATA (Verified):\nPERF").unwrap();
        let news = prompt.find("KEY NEWS DEVELOPMENTS WITH SOURCES:\nNEWS").unwrap();
        assert!(perf < news);
        assert!(prompt.ends_with("with full transparency."));
    }

    #[test]
    fn translation_prompt_names_the_language() {
        let prompt = translation_system_prompt(Language::TraditionalChinese);
        assert_eq!(
            prompt,
            "You are a professional financial translator. Translate the following market report \
             to Traditional Chinese while maintaining professional tone and financial accuracy."
        );
    }

    #[test]
    fn system_prompt_has_both_rule_blocks() {
        assert!(REPORT_SYSTEM_PROMPT.contains("CRITICAL INSTRUCTIONS - COMPLIANCE & ACCURACY:"));
        assert!(REPORT_SYSTEM_PROMPT.contains("COMPLIANCE REQUIREMENTS:"));
    }
}
