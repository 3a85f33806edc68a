use anyhow::Result;

use crate::bootstrap::App;
use crate::render;

pub async fn run(app: &App) -> Result<()> {
    match app.session.overview().await {
        Some(overview) => render::print_overview(&overview),
        None => println!("No assessments yet."),
    }
    Ok(())
}
