use url::Url;

const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Derives the player id from a bare id, a `youtube.com/watch?v=` URL or a
/// `youtu.be/` share link.
pub fn embed_id(video_ref: &str) -> Option<String> {
    let trimmed = video_ref.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains("youtube.com") {
        return parse_lenient(trimmed)?
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty());
    }

    if trimmed.contains("youtu.be") {
        let url = parse_lenient(trimmed)?;
        return url
            .path_segments()?
            .filter(|segment| !segment.is_empty())
            .last()
            .map(ToOwned::to_owned);
    }

    Some(trimmed.to_string())
}

pub fn embed_url(video_ref: &str) -> Option<String> {
    embed_id(video_ref).map(|id| format!("{EMBED_BASE}{id}"))
}

// Share links are often pasted without a scheme.
fn parse_lenient(raw: &str) -> Option<Url> {
    Url::parse(raw)
        .or_else(|_| Url::parse(&format!("https://{raw}")))
        .ok()
}
