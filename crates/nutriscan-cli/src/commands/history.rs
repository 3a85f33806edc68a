use anyhow::{Result, bail};
use colored::Colorize;
use nutriscan_core::assessment::Assessment;

use crate::bootstrap::App;
use crate::render;

pub async fn list(app: &App) -> Result<()> {
    let history = app.session.history().await;
    if history.is_empty() {
        println!("No assessments yet.");
        return Ok(());
    }

    println!("{}", format!("Assessment History ({})", history.len()).bold());
    for record in &history {
        println!("{}", render::history_line(record));
    }
    println!();
    println!(
        "{}",
        format!("Stored in {}", app.storage_dir.display()).dimmed()
    );
    Ok(())
}

pub async fn show(app: &App, id: &str, json: bool) -> Result<()> {
    let record = match app.session.find_record(id).await {
        Some(record) => record,
        None => find_by_prefix(&app.session.history().await, id)?.clone(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        render::print_record(&record);
    }
    Ok(())
}

/// Resolves an id prefix to exactly one record.
pub fn find_by_prefix<'a>(history: &'a [Assessment], prefix: &str) -> Result<&'a Assessment> {
    let mut matches = history.iter().filter(|record| record.id.starts_with(prefix));
    match (matches.next(), matches.next()) {
        (Some(record), None) if !prefix.is_empty() => Ok(record),
        (Some(_), _) => bail!("Assessment id '{}' is ambiguous", prefix),
        (None, _) => bail!("No assessment with id '{}'", prefix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutriscan_core::assessment::{AnalysisResult, RiskLevel};

    fn record(id: &str) -> Assessment {
        let mut record = Assessment::from_result(
            "data:image/png;base64,AAAA",
            AnalysisResult::new(RiskLevel::Low, "fine", 0.9),
        );
        record.id = id.to_string();
        record
    }

    #[test]
    fn test_find_by_prefix() {
        let history = vec![record("abc123"), record("abd456")];

        assert_eq!(find_by_prefix(&history, "abc").unwrap().id, "abc123");
        assert!(
            find_by_prefix(&history, "ab")
                .unwrap_err()
                .to_string()
                .contains("ambiguous")
        );
        assert!(
            find_by_prefix(&history, "zzz")
                .unwrap_err()
                .to_string()
                .contains("No assessment")
        );
        assert!(find_by_prefix(&history, "").is_err());
    }
}
