use ammonia;

/// Clean HTML content using the ammonia library.
///
/// Note titles, note bodies, and link descriptions are shared between users,
/// so everything user-supplied is run through a whitelist-based sanitizer at
/// the write path: safe tags (like <b>, <p>) survive, dangerous tags (like
/// <script>, <iframe>) and event-handler attributes are stripped. This is the
/// fail-safe against stored XSS in the shared/public listings.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
