use std::collections::HashSet;

use url::Url;

/// Derive a safe, collision-free filename for a downloaded image.
///
/// The URL path's final segment is preferred; when the URL carries no usable
/// name, one is synthesized from the host and the supplied unix timestamp.
/// Everything outside `[A-Za-z0-9.\-_]` is deleted, not substituted.
pub fn derive_filename(
    url: &Url,
    content_type: &str,
    existing: &HashSet<String>,
    unix_timestamp: u64,
) -> String {
    let base = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");
    let base = urlencoding::decode(base)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| base.to_string());

    let name = if base.is_empty() || !base.contains('.') {
        let host = url.host_str().unwrap_or("unknown");
        let host = host.strip_prefix("www.").unwrap_or(host);
        format!(
            "{}_{}{}",
            host,
            unix_timestamp,
            extension_for(content_type)
        )
    } else {
        base
    };

    resolve_collision(sanitize(&name), existing)
}

/// Map a content type to a file extension, `.jpg` when nothing matches.
fn extension_for(content_type: &str) -> String {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    // mime_guess lists several extensions for jpeg; pin the common one.
    if essence == "image/jpeg" {
        return ".jpg".to_string();
    }
    mime_guess::get_mime_extensions_str(essence)
        .and_then(|extensions| extensions.first())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_else(|| ".jpg".to_string())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}

/// Append `_1`, `_2`, ... before the extension until the name is free.
/// The counter always suffixes the original stem.
fn resolve_collision(name: String, existing: &HashSet<String>) -> String {
    if !existing.contains(&name) {
        return name;
    }

    let (stem, extension) = match name.rfind('.') {
        Some(index) => (&name[..index], &name[index..]),
        None => (name.as_str(), ""),
    };

    let mut counter = 1;
    loop {
        let candidate = format!("{}_{}{}", stem, counter, extension);
        if !existing.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
