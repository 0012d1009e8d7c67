//! Content-Type lookup for stored files.

/// Map a filename's extension to the `Content-Type` it is served with.
pub fn content_type_for_extension(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_types() {
        assert_eq!(content_type_for_extension("20240101_000000_a.JPG"), "image/jpeg");
        assert_eq!(content_type_for_extension("b.jpeg"), "image/jpeg");
        assert_eq!(content_type_for_extension("c.png"), "image/png");
    }

    #[test]
    fn unknown_falls_back_to_octet_stream() {
        assert_eq!(content_type_for_extension("notes.txt"), "application/octet-stream");
        assert_eq!(content_type_for_extension("noext"), "application/octet-stream");
    }
}
