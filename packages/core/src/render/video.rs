//! Video embeds

use crate::render::escape::{escape_html, is_safe_url};
use regex::Regex;
use std::sync::LazyLock;

/// Label used for plain links when a video has no title
pub const VIDEO_LINK_FALLBACK: &str = "Watch Video";

/// Recognized YouTube URL shapes; group 1 is the 11-character video id
static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|v/|shorts/|live/)|youtube-nocookie\.com/embed/|youtu\.be/)([A-Za-z0-9_-]{11})(?:[?&#/].*)?$",
    )
    .unwrap()
});

/// Extract the YouTube video id from a URL, if it is one
///
/// # Examples
///
/// ```
/// use portfolio_core::render::youtube_video_id;
///
/// assert_eq!(youtube_video_id("https://youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
/// assert_eq!(youtube_video_id("https://vimeo.com/123"), None);
/// ```
pub fn youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_RE
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Embed for YouTube URLs, a plain link otherwise
pub fn render_video(url: &str, title: Option<&str>) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    let title = title.map(str::trim).filter(|t| !t.is_empty());

    if let Some(id) = youtube_video_id(url) {
        return format!(
            "<div class=\"video-embed\"><iframe src=\"https://www.youtube.com/embed/{}\" title=\"{}\" frameborder=\"0\" allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\" allowfullscreen></iframe></div>",
            id,
            escape_html(title.unwrap_or("YouTube video")),
        );
    }

    let label = escape_html(title.unwrap_or(VIDEO_LINK_FALLBACK));
    if is_safe_url(url) {
        format!(
            "<a class=\"video-link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_html(url),
            label
        )
    } else {
        tracing::debug!(url, "Refusing unsafe video URL");
        format!("<span class=\"video-link\">{}</span>", label)
    }
}
