/// Anything advertised above this is worth flagging before download.
const MAX_EXPECTED_BYTES: u64 = 50 * 1024 * 1024;

/// Inspect response metadata and report anything suspicious.
///
/// Warnings are advisory only; they never abort a fetch. The hard
/// image-type rejection lives in the pipeline, not here.
pub fn inspect(
    content_type: &str,
    content_length: Option<u64>,
    content_disposition: Option<&str>,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if !content_type.starts_with("image/") {
        warnings.push(format!(
            "content-type is '{}', not an image type",
            content_type
        ));
    }

    if let Some(length) = content_length {
        if length > MAX_EXPECTED_BYTES {
            let size_mb = length as f64 / (1024.0 * 1024.0);
            warnings.push(format!("large file size: {:.1}MB", size_mb));
        }
    }

    if let Some(disposition) = content_disposition {
        if disposition.contains("attachment") && disposition.contains("filename") {
            warnings.push("server suggests downloading as attachment".to_string());
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::inspect;

    #[test]
    fn clean_image_response_yields_no_warnings() {
        assert!(inspect("image/png", Some(4096), None).is_empty());
    }

    #[test]
    fn flags_non_image_content_type() {
        let warnings = inspect("text/html", None, None);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("text/html"));
    }

    #[test]
    fn flags_oversized_content_length() {
        let warnings = inspect("image/png", Some(60 * 1024 * 1024), None);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("60.0MB"));
    }

    #[test]
    fn size_exactly_at_limit_is_fine() {
        assert!(inspect("image/png", Some(50 * 1024 * 1024), None).is_empty());
    }

    #[test]
    fn flags_attachment_disposition() {
        let warnings = inspect("image/png", None, Some("attachment; filename=\"a.png\""));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("attachment"));
    }

    #[test]
    fn disposition_without_filename_is_fine() {
        assert!(inspect("image/png", None, Some("attachment")).is_empty());
    }

    #[test]
    fn rules_are_applied_independently() {
        let warnings = inspect(
            "text/plain",
            Some(60 * 1024 * 1024),
            Some("attachment; filename=x"),
        );
        assert_eq!(warnings.len(), 3);
    }
}
