// SPDX-License-Identifier: LGPL-3.0-only
//! Display policy for clipboard objects.
//!
//! The icon, preview and activity of an object are derived from the formats
//! it currently carries. Categories are tried in a fixed order and the first
//! one matching any of the object's format types wins, so an object offering
//! both `text/plain` and `_NETSCAPE_URL` is presented as text.

use crate::object::{DisplayInfo, Format};

/// Default number of characters kept in a text preview.
pub const DEFAULT_PREVIEW_CHARS: usize = 64;

const TEXT_TYPES: &[&str] = &["text/plain", "utf8_string", "string", "text", "compound_text"];
const URI_TYPES: &[&str] = &["_netscape_url", "text/uri-list", "text/x-moz-url"];

const TEXT_ACTIVITY: &str = "org.laptop.AbiWordActivity";
const WEB_ACTIVITY: &str = "org.laptop.WebActivity";
const PDF_ACTIVITY: &str = "org.laptop.sugar.Xbook";

/// Content category of a clipboard object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCategory {
    Text,
    Image,
    Uri,
    Pdf,
    /// Any other MIME-like type, kept verbatim.
    Mime(String),
    Unknown,
}

impl FileCategory {
    /// Icon name for this category.
    pub fn icon_name(&self) -> String {
        match self {
            FileCategory::Text => "text-x-generic".to_string(),
            FileCategory::Image => "image-x-generic".to_string(),
            FileCategory::Uri => "text-html".to_string(),
            FileCategory::Pdf => "application-pdf".to_string(),
            FileCategory::Mime(mime_type) => mime_to_icon_name(mime_type),
            FileCategory::Unknown => "unknown".to_string(),
        }
    }

    /// Activity able to open content of this category, if any.
    pub fn activity(&self) -> &'static str {
        match self {
            FileCategory::Text => TEXT_ACTIVITY,
            FileCategory::Uri => WEB_ACTIVITY,
            FileCategory::Pdf => PDF_ACTIVITY,
            _ => "",
        }
    }
}

/// Derives [`DisplayInfo`] from an object's formats.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    preview_chars: usize,
}

impl TypeRegistry {
    pub fn new(preview_chars: usize) -> Self {
        Self { preview_chars }
    }

    pub fn preview_chars(&self) -> usize {
        self.preview_chars
    }

    /// Classify a set of formats given in insertion order.
    pub fn categorize<'a, I>(&self, formats: I) -> FileCategory
    where
        I: IntoIterator<Item = &'a Format>,
        I::IntoIter: Clone,
    {
        let formats = formats.into_iter();

        if any_type(formats.clone(), is_text_type) {
            FileCategory::Text
        } else if any_type(formats.clone(), |t| t.starts_with("image/")) {
            FileCategory::Image
        } else if any_type(formats.clone(), |t| URI_TYPES.contains(&t)) {
            FileCategory::Uri
        } else if any_type(formats.clone(), |t| t == "application/pdf") {
            FileCategory::Pdf
        } else if let Some(format) = formats.clone().find(|f| is_mime_like(f.format_type())) {
            FileCategory::Mime(format.format_type().to_ascii_lowercase())
        } else {
            FileCategory::Unknown
        }
    }

    /// Compute icon, preview and activity for a set of formats.
    pub fn describe<'a, I>(&self, formats: I) -> DisplayInfo
    where
        I: IntoIterator<Item = &'a Format>,
        I::IntoIter: Clone,
    {
        let formats = formats.into_iter();
        let category = self.categorize(formats.clone());
        let preview = match category {
            FileCategory::Text => formats
                .clone()
                .find(|f| is_inline_of(f, is_text_type))
                .map(|f| self.text_preview(f.data()))
                .unwrap_or_default(),
            FileCategory::Uri => formats
                .clone()
                .find(|f| is_inline_of(f, |t| URI_TYPES.contains(&t)))
                .map(|f| uri_preview(f.data()))
                .unwrap_or_default(),
            _ => String::new(),
        };

        DisplayInfo {
            icon: category.icon_name(),
            preview,
            activity: category.activity().to_string(),
        }
    }

    fn text_preview(&self, data: &[u8]) -> String {
        let text = String::from_utf8_lossy(data);
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed.chars().take(self.preview_chars).collect()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_CHARS)
    }
}

fn any_type<'a>(
    mut formats: impl Iterator<Item = &'a Format>,
    pred: impl Fn(&str) -> bool,
) -> bool {
    formats.any(|f| pred(&f.format_type().to_ascii_lowercase()))
}

fn is_inline_of(format: &Format, pred: impl Fn(&str) -> bool) -> bool {
    !format.is_on_disk() && pred(&format.format_type().to_ascii_lowercase())
}

fn is_text_type(format_type: &str) -> bool {
    TEXT_TYPES.contains(&format_type) || format_type.starts_with("text/plain;")
}

fn is_mime_like(format_type: &str) -> bool {
    matches!(format_type.split_once('/'), Some((main, sub)) if !main.is_empty() && !sub.is_empty())
}

// First line that is not a uri-list comment.
fn uri_preview(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .unwrap_or_default()
        .to_string()
}

/// Map a MIME type to a freedesktop icon name.
fn mime_to_icon_name(mime_type: &str) -> String {
    let Some((main_type, sub_type)) = mime_type.split_once('/') else {
        return "unknown".to_string();
    };
    let sub_type = sub_type.split(';').next().unwrap_or_default().trim();

    match main_type {
        "text" => match sub_type {
            "html" => "text-html".to_string(),
            _ => "text-x-generic".to_string(),
        },
        "application" => match sub_type {
            "pdf" => "application-pdf".to_string(),
            "zip" | "x-zip-compressed" => "application-zip".to_string(),
            "x-tar" => "application-x-tar".to_string(),
            "x-gzip" | "gzip" => "application-x-gzip".to_string(),
            "json" => "application-json".to_string(),
            "xml" => "application-xml".to_string(),
            "rtf" => "application-rtf".to_string(),
            "msword" => "application-msword".to_string(),
            _ => "application-x-generic".to_string(),
        },
        _ => format!("{}-x-generic", main_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(format_type: &str, data: &str) -> Format {
        Format::new(format_type, data.as_bytes().to_vec(), false)
    }

    #[test]
    fn test_empty_is_unknown() {
        let registry = TypeRegistry::default();
        let none: [Format; 0] = [];
        let info = registry.describe(&none);
        assert_eq!(info.icon, "unknown");
        assert_eq!(info.preview, "");
        assert_eq!(info.activity, "");
    }

    #[test]
    fn test_text_preview_collapses_whitespace() {
        let registry = TypeRegistry::new(11);
        let formats = [inline("text/plain", "hello\n   world, again")];
        let info = registry.describe(&formats);
        assert_eq!(info.icon, "text-x-generic");
        assert_eq!(info.preview, "hello world");
        assert_eq!(info.activity, TEXT_ACTIVITY);
    }

    #[test]
    fn test_text_wins_over_uri() {
        let registry = TypeRegistry::default();
        let formats = [
            inline("_NETSCAPE_URL", "http://laptop.org\nOLPC"),
            inline("UTF8_STRING", "OLPC"),
        ];
        assert_eq!(registry.categorize(&formats), FileCategory::Text);
    }

    #[test]
    fn test_uri_preview_skips_comments() {
        let registry = TypeRegistry::default();
        let formats = [inline("text/uri-list", "# comment\nfile:///tmp/a.txt\nfile:///tmp/b.txt")];
        let info = registry.describe(&formats);
        assert_eq!(info.icon, "text-html");
        assert_eq!(info.preview, "file:///tmp/a.txt");
        assert_eq!(info.activity, WEB_ACTIVITY);
    }

    #[test]
    fn test_on_disk_text_has_no_preview() {
        let registry = TypeRegistry::default();
        let formats = [Format::new("text/plain", b"/tmp/clip.txt".to_vec(), true)];
        let info = registry.describe(&formats);
        assert_eq!(info.icon, "text-x-generic");
        assert_eq!(info.preview, "");
    }

    #[test]
    fn test_other_mime_types() {
        let registry = TypeRegistry::default();
        assert_eq!(registry.describe(&[inline("image/png", "")]).icon, "image-x-generic");
        assert_eq!(registry.describe(&[inline("application/pdf", "")]).activity, PDF_ACTIVITY);
        assert_eq!(registry.describe(&[inline("audio/ogg", "")]).icon, "audio-x-generic");
        assert_eq!(registry.describe(&[inline("application/json", "")]).icon, "application-json");
        assert_eq!(registry.describe(&[inline("x-special/thing", "")]).icon, "x-special-x-generic");
        assert_eq!(registry.describe(&[inline("TARGETS", "")]).icon, "unknown");
    }
}
