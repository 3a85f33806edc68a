//! Terminal formatting for results, records and statistics.

use chrono::Local;
use colored::{ColoredString, Colorize};
use nutriscan_core::assessment::{
    AnalysisResult, Assessment, ConfidenceBand, HistoryOverview, RiskLevel, SCREENING_DISCLAIMER,
    recommendations,
};
use strum::IntoEnumIterator;

pub fn risk_label(level: RiskLevel) -> ColoredString {
    let label = format!("{} Risk", level);
    match level {
        RiskLevel::Low => label.green().bold(),
        RiskLevel::Medium => label.yellow().bold(),
        RiskLevel::High => label.red().bold(),
    }
}

pub fn confidence_label(confidence: f64) -> ColoredString {
    let text = format!("{}%", percent(confidence));
    match ConfidenceBand::of(confidence) {
        ConfidenceBand::Strong => text.green(),
        ConfidenceBand::Moderate => text.yellow(),
        ConfidenceBand::Weak => text.red(),
    }
}

pub fn percent(confidence: f64) -> u32 {
    (confidence * 100.0).round() as u32
}

/// First eight characters of an id, enough to tell records apart.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn print_result(result: &AnalysisResult) {
    println!();
    println!("{}  {}", "Assessment:".bold(), risk_label(result.risk_level));
    println!("{}  {}", "Confidence:".bold(), confidence_label(result.confidence));
    println!();
    println!("{}", "Analysis Details".bold());
    println!("{}", result.explanation);
    println!();
    println!("{}", "Recommended Actions".bold());
    for step in recommendations(result.risk_level) {
        println!("  - {}", step);
    }
    println!();
    println!("{}", SCREENING_DISCLAIMER.dimmed());
}

pub fn print_record(record: &Assessment) {
    println!("{}  {}", "Id:".bold(), record.id);
    println!(
        "{}  {}",
        "Date:".bold(),
        record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    print_result(&record.result());
}

pub fn history_line(record: &Assessment) -> String {
    format!(
        "{}  {}  {:<12}  {:>4}",
        short_id(&record.id),
        record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        risk_label(record.risk_level),
        confidence_label(record.confidence),
    )
}

/// One line for the total, one per risk level, one for the average.
pub fn overview_lines(overview: &HistoryOverview) -> Vec<String> {
    let mut lines = vec![format!("{}  {}", "Total assessments:".bold(), overview.total)];
    lines.extend(
        RiskLevel::iter()
            .map(|level| format!("  {:<12} {}", risk_label(level), overview.count(level))),
    );
    lines.push(format!(
        "{}  {}%",
        "Average confidence:".bold(),
        overview.average_confidence_percent
    ));
    lines
}

pub fn print_overview(overview: &HistoryOverview) {
    for line in overview_lines(overview) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_percent_rounds() {
        assert_eq!(percent(0.86), 86);
        assert_eq!(percent(0.7), 70);
        assert_eq!(percent(0.0), 0);
    }

    #[test]
    fn test_labels_carry_text() {
        assert!(risk_label(RiskLevel::High).to_string().contains("High Risk"));
        assert!(confidence_label(0.62).to_string().contains("62%"));
    }

    #[test]
    fn test_overview_lists_every_level_in_order() {
        let records: Vec<Assessment> = [(RiskLevel::High, 0.8), (RiskLevel::Low, 0.6)]
            .into_iter()
            .map(|(level, confidence)| {
                Assessment::from_result(
                    "data:image/png;base64,AAAA",
                    AnalysisResult::new(level, "note", confidence),
                )
            })
            .collect();
        let overview = HistoryOverview::from_assessments(&records).unwrap();

        let lines = overview_lines(&overview);
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Total assessments:") && lines[0].ends_with('2'));
        assert!(lines[1].contains("Low Risk") && lines[1].ends_with('1'));
        assert!(lines[2].contains("Medium Risk") && lines[2].ends_with('0'));
        assert!(lines[3].contains("High Risk") && lines[3].ends_with('1'));
        assert!(lines[4].ends_with("70%"));
    }
}
