//! Media URL normalization and active gallery resolution.

use crate::model::{ColorVariant, MediaItem, Product};

/// Prefixes a relative media path with the media base URL.
///
/// Anything starting with `http` is already absolute and is returned as-is.
/// The join is a plain concatenation: the API returns paths with a leading
/// slash and the base is configured without a trailing one.
#[must_use]
pub fn normalize_media_src(media_base: &str, src: &str) -> String {
    if src.starts_with("http") {
        src.to_owned()
    } else {
        format!("{media_base}{src}")
    }
}

/// Resolves a story slide's video path.
///
/// Story uploads are stored with the server's native separators and no
/// leading slash (`uploads\stories\clip.mp4`), so unlike
/// [`normalize_media_src`] the base and path are joined with a `/` and
/// backslashes become forward slashes. Absolute URLs are kept.
#[must_use]
pub fn normalize_story_video_src(media_base: &str, src: &str) -> String {
    if src.starts_with("http") {
        return src.to_owned();
    }
    let path = src.replace('\\', "/");
    format!(
        "{}/{}",
        media_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Resolves the gallery shown for the current color selection.
///
/// First non-empty wins:
/// 1. the selected color's own media;
/// 2. the media of the *first declared* color (not the first color that has
///    media);
/// 3. the product-wide gallery.
#[must_use]
pub fn resolve_active_media<'a>(
    product: &'a Product,
    selected_color: Option<&'a ColorVariant>,
) -> &'a [MediaItem] {
    if let Some(color) = selected_color {
        if !color.media.is_empty() {
            return &color.media;
        }
    }

    if let Some(first) = product.colors.first() {
        if !first.media.is_empty() {
            return &first.media;
        }
    }

    &product.media
}

/// Media item highlighted when a product first loads.
#[must_use]
pub fn initial_media(product: &Product) -> Option<&MediaItem> {
    product
        .colors
        .first()
        .and_then(|c| c.media.first())
        .or_else(|| product.media.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{color, product};
    use crate::model::Stock;

    #[test]
    fn normalize_prefixes_relative_paths() {
        assert_eq!(
            normalize_media_src("https://api.example.tn", "/uploads/a.jpg"),
            "https://api.example.tn/uploads/a.jpg"
        );
    }

    #[test]
    fn normalize_keeps_absolute_urls() {
        assert_eq!(
            normalize_media_src("https://api.example.tn", "https://cdn.example.tn/a.jpg"),
            "https://cdn.example.tn/a.jpg"
        );
        assert_eq!(
            normalize_media_src("https://api.example.tn", "http://legacy.example.tn/a.jpg"),
            "http://legacy.example.tn/a.jpg"
        );
    }

    #[test]
    fn story_video_paths_use_forward_slashes() {
        assert_eq!(
            normalize_story_video_src("https://m.example.tn", r"uploads\stories\clip.mp4"),
            "https://m.example.tn/uploads/stories/clip.mp4"
        );
        assert_eq!(
            normalize_story_video_src("https://m.example.tn/", "/uploads/a.mp4"),
            "https://m.example.tn/uploads/a.mp4"
        );
        assert_eq!(
            normalize_story_video_src("https://m.example.tn", "https://cdn.example.tn/a.mp4"),
            "https://cdn.example.tn/a.mp4"
        );
    }

    #[test]
    fn selected_color_media_wins() {
        let mut p = product();
        p.colors = vec![
            color("Noir", Stock::Untracked, &["noir-1.jpg"]),
            color("Sable", Stock::Untracked, &["sable-1.jpg", "sable-2.jpg"]),
        ];
        let active = resolve_active_media(&p, Some(&p.colors[1]));
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].src, "sable-1.jpg");
    }

    #[test]
    fn falls_back_to_first_color_when_selected_has_no_media() {
        let mut p = product();
        p.colors = vec![
            color("Noir", Stock::Untracked, &["noir-1.jpg"]),
            color("Sable", Stock::Untracked, &[]),
        ];
        let active = resolve_active_media(&p, Some(&p.colors[1]));
        assert_eq!(active[0].src, "noir-1.jpg");
    }

    #[test]
    fn fallback_only_checks_first_declared_color() {
        let mut p = product();
        p.colors = vec![
            color("Noir", Stock::Untracked, &[]),
            color("Sable", Stock::Untracked, &["sable-1.jpg"]),
        ];
        let active = resolve_active_media(&p, None);
        assert_eq!(active, p.media.as_slice());
    }

    #[test]
    fn product_without_colors_uses_global_gallery() {
        let p = product();
        assert_eq!(resolve_active_media(&p, None), p.media.as_slice());
    }

    #[test]
    fn initial_media_prefers_first_color() {
        let mut p = product();
        p.colors = vec![color("Noir", Stock::Untracked, &["noir-1.jpg"])];
        assert_eq!(initial_media(&p).map(|m| m.src.as_str()), Some("noir-1.jpg"));

        p.colors = vec![color("Noir", Stock::Untracked, &[])];
        assert_eq!(
            initial_media(&p).map(|m| m.src.as_str()),
            Some("https://cdn.example.tn/global-1.jpg")
        );

        p.media.clear();
        assert!(initial_media(&p).is_none());
    }
}
