use std::path::Path;

use infer::{MatcherType, Type};

/// Magic-byte detection restricted to image formats.
pub fn sniff_image(bytes: &[u8]) -> Option<Type> {
    infer::get(bytes).filter(|kind| kind.matcher_type() == MatcherType::Image)
}

/// Extension for the stored object: the sniffed image type's when the bytes
/// are recognised, else the uploaded name's extension when it is sane, else `bin`.
pub fn upload_extension(file_name: Option<&str>, bytes: &[u8]) -> String {
    sniff_image(bytes)
        .map(|kind| kind.extension().to_string())
        .or_else(|| {
            file_name
                .and_then(|name| Path::new(name).extension())
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_lowercase())
                .filter(|ext| ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        })
        .unwrap_or_else(|| "bin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIF: &[u8] = b"GIF89a\x01\x00\x01\x00\x00\x00\x00";

    #[test]
    fn keeps_lowercased_file_extension() {
        assert_eq!(upload_extension(Some("Screen Shot.PNG"), &[]), "png");
    }

    #[test]
    fn falls_back_to_sniffed_extension() {
        assert_eq!(upload_extension(Some("capture"), GIF), "gif");
        assert_eq!(upload_extension(Some("weird.p?g"), GIF), "gif");
    }

    #[test]
    fn sniffed_type_wins_over_misleading_name() {
        assert_eq!(upload_extension(Some("payload.html"), GIF), "gif");
    }

    #[test]
    fn unknown_content_gets_bin() {
        assert_eq!(upload_extension(None, b"plain text"), "bin");
    }

    #[test]
    fn only_images_are_sniffed() {
        assert!(sniff_image(GIF).is_some());
        assert!(sniff_image(b"%PDF-1.7\n").is_none());
    }
}
