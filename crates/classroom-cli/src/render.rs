//! Plain-text views of the feed, roster and profile.

use chrono::{DateTime, Local, Utc};
use classroom_application::Roster;
use classroom_core::avatar::AvatarResolver;
use classroom_core::feed::{Comment, FeedPhase, FeedState, Post, Viewer};
use classroom_core::user::UserRecord;
use std::fmt::Write;

const MISSING: &str = "-";

pub fn like_label(count: usize) -> String {
    if count == 1 {
        "1 like".to_string()
    } else {
        format!("{} likes", count)
    }
}

fn timestamp(at: Option<DateTime<Utc>>) -> Option<String> {
    at.map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
}

fn or_missing(value: Option<&str>) -> &str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(MISSING)
}

fn render_comment(out: &mut String, comment: &Comment) {
    let _ = write!(out, "    {}: {}", comment.author.label(), comment.content);
    if comment.is_pending() {
        out.push_str(" (sending)");
    }
    out.push('\n');
}

pub fn render_post(post: &Post, viewer: &Viewer) -> String {
    let mut out = String::new();

    let _ = write!(out, "[{}] {}", post.id, post.author.label());
    if let Some(at) = timestamp(post.created_at) {
        let _ = write!(out, "  {}", at);
    }
    out.push('\n');
    let _ = writeln!(out, "  {}", post.content);

    let marker = if post.has_liked() { "♥" } else { "♡" };
    let _ = write!(out, "  {} {}", marker, like_label(post.like_count()));
    if post.can_delete(viewer) {
        out.push_str("  [delete]");
    }
    out.push('\n');

    for comment in &post.comments {
        render_comment(&mut out, comment);
    }
    out
}

/// Newest post first, separated by blank lines.
pub fn render_feed(state: &FeedState, viewer: &Viewer) -> String {
    match &state.phase {
        FeedPhase::Error(message) => return format!("Could not load the feed: {}\n", message),
        FeedPhase::Idle | FeedPhase::Loading => return "Loading...\n".to_string(),
        FeedPhase::Ready => {}
    }
    if state.posts.is_empty() {
        return "No posts yet.\n".to_string();
    }
    state
        .posts
        .iter()
        .map(|post| render_post(post, viewer))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_roster(roster: &Roster, avatars: &AvatarResolver) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Class of {} ({} members)", roster.year, roster.members.len());
    if roster.is_empty() {
        out.push_str("no members found\n");
        return out;
    }
    for member in &roster.members {
        let _ = writeln!(
            out,
            "  {}  <{}>  {}",
            member.display_name(),
            or_missing(member.email.as_deref()),
            member.avatar_url(avatars)
        );
    }
    out
}

pub fn render_profile(profile: Option<&UserRecord>, avatars: &AvatarResolver) -> String {
    let Some(user) = profile else {
        return "No profile available.\n".to_string();
    };

    let education = user.education.clone().unwrap_or_default();
    let enrollment_year = education.enrollment_year_label();
    let confirmed = match user.confirmed {
        Some(true) => "yes",
        Some(false) => "no",
        None => MISSING,
    };

    let rows = [
        ("Name", user.display_name()),
        ("Email", or_missing(user.email.as_deref()).to_string()),
        ("Role", or_missing(user.role.as_deref()).to_string()),
        ("Confirmed", confirmed.to_string()),
        ("Major", or_missing(education.major.as_deref()).to_string()),
        ("Student ID", or_missing(education.student_id.as_deref()).to_string()),
        ("Enrollment year", or_missing(enrollment_year.as_deref()).to_string()),
        ("Avatar", user.avatar_url(avatars)),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{:<16}{}", label, value);
    }
    out
}
