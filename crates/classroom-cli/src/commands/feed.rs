//! Feed commands. Each run opens the feed view: it loads the feed first,
//! applies the intent, then prints what changed.

use crate::app::App;
use crate::render;
use anyhow::{Context, Result};
use classroom_application::FeedService;

async fn open(app: &App) -> Result<FeedService> {
    let feed = app.feed().await?;
    feed.on_focus().await.context("Could not load the feed")?;
    Ok(feed)
}

async fn print_post(feed: &FeedService, post_id: &str) {
    let state = feed.snapshot().await;
    if let Some(post) = state.post(post_id) {
        print!("{}", render::render_post(post, feed.viewer()));
    }
}

pub async fn show(app: &App) -> Result<()> {
    let feed = app.feed().await?;
    // Load errors are part of the view, not a command failure.
    if let Err(e) = feed.on_focus().await {
        tracing::debug!("Feed load failed: {}", e);
    }
    print!("{}", render::render_feed(&feed.snapshot().await, feed.viewer()));
    Ok(())
}

pub async fn post(app: &App, content: &str) -> Result<()> {
    let feed = app.feed().await?;
    let post = feed.create_post(content).await?;
    print!("{}", render::render_post(&post, feed.viewer()));
    Ok(())
}

pub async fn like(app: &App, post_id: &str) -> Result<()> {
    let feed = open(app).await?;
    let liked = feed.toggle_like(post_id).await?;
    println!("{}", if liked { "Liked" } else { "Unliked" });
    print_post(&feed, post_id).await;
    Ok(())
}

pub async fn comment(app: &App, post_id: &str, content: &str) -> Result<()> {
    let feed = open(app).await?;
    feed.add_comment(post_id, content).await?;
    print_post(&feed, post_id).await;
    Ok(())
}

pub async fn delete(app: &App, post_id: &str) -> Result<()> {
    let feed = open(app).await?;
    feed.delete_post(post_id).await?;
    println!("Deleted {}", post_id);
    Ok(())
}
