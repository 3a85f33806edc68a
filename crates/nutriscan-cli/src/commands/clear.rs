use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::bootstrap::App;

pub async fn run(app: &App, yes: bool) -> Result<()> {
    let count = app.session.history().await.len();
    if count == 0 {
        println!("No assessments to clear.");
        return Ok(());
    }

    let confirmed = yes || confirm(count)?;
    if app.session.clear_history(confirmed).await {
        println!("Cleared {} assessments.", count);
    } else {
        println!("History kept.");
    }
    Ok(())
}

fn confirm(count: usize) -> Result<bool> {
    print!(
        "Are you sure you want to clear all {} assessments? [y/N] ",
        count
    );
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
