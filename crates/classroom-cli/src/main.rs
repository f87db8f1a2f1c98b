use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod render;

#[derive(Parser)]
#[command(name = "classroom")]
#[command(about = "Classroom portal client - sign in, browse the class and follow the feed", long_about = None)]
struct Cli {
    /// Directory holding config.toml and the saved session
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Backend origin, overriding config and environment
    #[arg(long, global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the saved session
    Signout,
    /// Show who is signed in
    Whoami,
    /// Show the signed-in user's profile
    Profile,
    /// List the members of a class year
    Members {
        /// Enrollment year (defaults to the configured roster year)
        #[arg(long)]
        year: Option<u32>,
    },
    /// Show the status feed
    Feed,
    /// Publish a new post
    Post { content: String },
    /// Like a post, or unlike it if already liked
    Like { post_id: String },
    /// Comment on a post
    Comment { post_id: String, content: String },
    /// Delete one of your own posts
    Delete { post_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = app::App::load(cli.config_dir.as_deref(), cli.origin)?;

    match cli.command {
        Commands::Signin { email, password } => commands::auth::sign_in(&app, &email, &password).await?,
        Commands::Signout => commands::auth::sign_out(&app).await?,
        Commands::Whoami => commands::auth::whoami(&app).await?,
        Commands::Profile => commands::directory::profile(&app).await?,
        Commands::Members { year } => commands::directory::members(&app, year).await?,
        Commands::Feed => commands::feed::show(&app).await?,
        Commands::Post { content } => commands::feed::post(&app, &content).await?,
        Commands::Like { post_id } => commands::feed::like(&app, &post_id).await?,
        Commands::Comment { post_id, content } => {
            commands::feed::comment(&app, &post_id, &content).await?
        }
        Commands::Delete { post_id } => commands::feed::delete(&app, &post_id).await?,
    }

    Ok(())
}
