use crate::app::App;
use anyhow::Result;

pub async fn sign_in(app: &App, email: &str, password: &str) -> Result<()> {
    let session = app.auth.sign_in(email, password).await?;
    println!("Signed in as {}", session.display_name());
    Ok(())
}

pub async fn sign_out(app: &App) -> Result<()> {
    app.auth.sign_out().await?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    match app.auth.restore().await {
        Some(session) => println!(
            "{} <{}>",
            session.display_name(),
            session.email().unwrap_or("-")
        ),
        None => println!("Not signed in"),
    }
    Ok(())
}
