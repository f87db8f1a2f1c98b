use crate::app::App;
use crate::render;
use anyhow::Result;

pub async fn profile(app: &App) -> Result<()> {
    app.auth.require_session().await?;
    let directory = app.directory();
    let profile = directory.profile().await?;
    print!("{}", render::render_profile(profile.as_ref(), directory.avatars()));
    Ok(())
}

pub async fn members(app: &App, year: Option<u32>) -> Result<()> {
    app.auth.require_session().await?;
    let directory = app.directory();
    let roster = directory.roster(year).await?;
    print!("{}", render::render_roster(&roster, directory.avatars()));
    Ok(())
}
