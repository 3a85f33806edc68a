use std::path::Path;

use anyhow::{Result, anyhow};
use colored::Colorize;
use nutriscan_application::SessionError;

use crate::bootstrap::App;
use crate::render;

pub async fn run(app: &App, image: &Path, json: bool) -> Result<()> {
    let file = match app.session.select_file(image).await {
        Ok(file) => file,
        Err(err) => return Err(report(err)),
    };

    eprintln!(
        "{}",
        format!(
            "Analyzing {} ({} KB) with {}...",
            file.name,
            file.size.div_ceil(1024),
            app.config.api.model
        )
        .dimmed()
    );

    let record = app.session.analyze().await.map_err(report)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record.result())?);
    } else {
        render::print_result(&record.result());
        println!();
        println!("Saved as {}", render::short_id(&record.id).bold());
    }
    Ok(())
}

/// Session errors already carry their user-facing message.
fn report(err: SessionError) -> anyhow::Error {
    anyhow!("{}", err)
}
