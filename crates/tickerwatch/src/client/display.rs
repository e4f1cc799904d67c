//! Terminal rendering for quotes, the watchlist and news analysis

use crate::client::session::AnalysisReport;
use crate::error::Result;
use crate::models::{NewsAnalysis, NewsItem, Quote};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

const NOT_AVAILABLE: &str = "N/A";

pub fn format_price(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("${v:.2}"))
}

/// Signed percent change with an up/down marker
pub fn format_change(value: Option<f64>) -> String {
    match value {
        Some(v) if v >= 0.0 => format!("▲ +{v:.2}%"),
        Some(v) => format!("▼ {v:.2}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_volume(value: Option<f64>) -> String {
    match value {
        Some(v) if v >= 1e9 => format!("{:.2}B", v / 1e9),
        Some(v) if v >= 1e6 => format!("{:.2}M", v / 1e6),
        Some(v) => group_thousands(v.max(0.0).round() as u64),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `$low - $high`, or N/A unless both ends are known
pub fn format_range(low: Option<f64>, high: Option<f64>) -> String {
    match (low, high) {
        (Some(low), Some(high)) => {
            format!("{} - {}", format_price(Some(low)), format_price(Some(high)))
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Watchlist as a table, in tracked order
pub fn render_watchlist(quotes: &[Quote]) -> String {
    if quotes.is_empty() {
        return "Your watchlist is empty. Use /add <SYMBOL> to track a stock.".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Symbol", "Name", "Price", "Change", "Volume", "Day Range", "52W Range",
        ]);

    for quote in quotes {
        table.add_row(vec![
            quote.symbol.clone(),
            quote.name.clone(),
            format_price(quote.price),
            format_change(quote.change),
            format_volume(quote.volume),
            format_range(quote.day_low, quote.day_high),
            format_range(quote.year_low, quote.year_high),
        ]);
    }

    table.to_string()
}

/// Detail block for a single quote
pub fn render_quote(quote: &Quote) -> String {
    [
        format!("{} ({})", quote.name, quote.symbol),
        format!("  Price:          {}", format_price(quote.price)),
        format!("  Change:         {}", format_change(quote.change)),
        format!("  Volume:         {}", format_volume(quote.volume)),
        format!("  Previous close: {}", format_price(quote.previous_close)),
        format!("  Day range:      {}", format_range(quote.day_low, quote.day_high)),
        format!("  52-week range:  {}", format_range(quote.year_low, quote.year_high)),
    ]
    .join("\n")
}

/// Headlines without links
pub fn render_news(news: &[NewsItem]) -> String {
    if news.is_empty() {
        return "No recent news found.".to_string();
    }

    news.iter()
        .map(|item| format!("- {} ({})\n  {}", item.title, item.source, item.snippet))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Answer followed by numbered citations
pub fn render_summary(analysis: &NewsAnalysis) -> String {
    let mut out = analysis.analysis.trim().to_string();
    if analysis.sources.is_empty() {
        return out;
    }

    out.push_str("\n\nSources:");
    for (i, source) in analysis.sources.iter().enumerate() {
        out.push_str(&format!("\n[{}] {}", i + 1, source.title));
        if let Some(link) = &source.link {
            out.push_str(&format!("\n    {link}"));
        }
        out.push_str(&format!("\n    Source: {}", source.source));
    }
    out
}

fn render_section<T>(result: &Result<T>, render: impl FnOnce(&T) -> String) -> String {
    match result {
        Ok(value) => render(value),
        Err(e) => format!("Error: {e}"),
    }
}

/// Full analysis view; each half shows its own failure if it has one
pub fn render_analysis(report: &AnalysisReport) -> String {
    let mut out = render_quote(&report.quote);

    out.push_str("\n\nRecent news\n");
    out.push_str(&render_section(&report.news, |news| render_news(news)));

    out.push_str("\n\nAI analysis\n");
    out.push_str(&render_section(&report.analysis, render_summary));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StockError;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(189.5)), "$189.50");
        assert_eq!(format_price(Some(0.0)), "$0.00");
        assert_eq!(format_price(None), "N/A");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(Some(1.234)), "▲ +1.23%");
        assert_eq!(format_change(Some(-0.5)), "▼ -0.50%");
        assert_eq!(format_change(None), "N/A");
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(Some(2_500_000_000.0)), "2.50B");
        assert_eq!(format_volume(Some(48_120_000.0)), "48.12M");
        assert_eq!(format_volume(Some(987_654.0)), "987,654");
        assert_eq!(format_volume(Some(999.0)), "999");
        assert_eq!(format_volume(None), "N/A");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(Some(1.0), Some(2.5)), "$1.00 - $2.50");
        assert_eq!(format_range(None, Some(2.5)), "N/A");
    }

    #[test]
    fn test_render_watchlist() {
        assert!(render_watchlist(&[]).contains("empty"));

        let mut quote = Quote::new("AAPL", "Apple Inc.");
        quote.price = Some(190.0);
        let table = render_watchlist(&[quote, Quote::new("MSFT", "Microsoft")]);

        assert!(table.contains("AAPL"));
        assert!(table.contains("$190.00"));
        assert!(table.contains("Microsoft"));
        assert!(table.contains("N/A"));
        assert!(table.find("AAPL") < table.find("MSFT"));
    }

    #[test]
    fn test_render_news_and_summary_layout() {
        let item = NewsItem {
            title: "Apple rallies".to_string(),
            snippet: "Shares up".to_string(),
            source: "CNBC".to_string(),
            link: Some("https://cnbc.com/a".to_string()),
        };

        assert_eq!(render_news(&[]), "No recent news found.");
        assert_eq!(
            render_news(std::slice::from_ref(&item)),
            "- Apple rallies (CNBC)\n  Shares up"
        );

        let summary = render_summary(&NewsAnalysis {
            analysis: "  Apple rose [[citation:1]].\n".to_string(),
            sources: vec![item],
        });
        assert_eq!(
            summary,
            "Apple rose [[citation:1]].\n\nSources:\n[1] Apple rallies\n    https://cnbc.com/a\n    Source: CNBC"
        );
    }

    #[test]
    fn test_render_quote_lines() {
        let text = render_quote(&Quote::new("AAPL", "Apple Inc."));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Apple Inc. (AAPL)");
        assert_eq!(lines[6], "  52-week range:  N/A");
    }

    #[test]
    fn test_render_analysis_with_failed_news() {
        let report = AnalysisReport {
            quote: Quote::new("NVDA", "NVIDIA"),
            news: Err(StockError::Api {
                status: 500,
                message: "Failed to fetch stock news".to_string(),
            }),
            analysis: Ok(NewsAnalysis {
                analysis: "Shares jumped [[citation:1]].".to_string(),
                sources: vec![NewsItem {
                    title: "NVIDIA soars".to_string(),
                    snippet: "Record revenue".to_string(),
                    source: "Bloomberg".to_string(),
                    link: Some("https://bloomberg.com/n".to_string()),
                }],
            }),
        };

        let text = render_analysis(&report);
        assert!(text.contains("NVIDIA (NVDA)"));
        assert!(text.contains("Error: Failed to fetch stock news"));
        assert!(text.contains("Shares jumped"));
        assert!(text.contains("[1] NVIDIA soars"));
        assert!(text.contains("https://bloomberg.com/n"));
        assert!(text.contains("Source: Bloomberg"));
    }
}
