// SPDX-License-Identifier: MPL-2.0
//! File kind classification.
//!
//! Every "is this an image / a video / a document" question in the crate goes
//! through [`FileKind`]. The icon, accent color and MIME lookups hang off the
//! same table so that presentation code never re-derives them from raw
//! extensions.

use std::path::Path;

/// Supported extensions, grouped by kind. All entries are lowercase.
pub mod extensions {
    /// Image file extensions.
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "gif", "webp", "bmp", "heic", "heif", "tiff", "tif", "ico", "svg",
        "avif", "dng",
    ];

    /// Video file extensions.
    pub const VIDEO_EXTENSIONS: &[&str] = &[
        "mp4", "m4v", "mov", "avi", "mkv", "webm", "3gp", "3g2", "flv", "wmv", "mpeg", "mpg",
    ];

    /// PDF extensions.
    pub const PDF_EXTENSIONS: &[&str] = &["pdf"];

    /// Word processor extensions.
    pub const WORD_EXTENSIONS: &[&str] = &["doc", "docx", "odt", "rtf", "pages"];

    /// Spreadsheet extensions.
    pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "ods", "csv", "numbers"];

    /// Presentation extensions.
    pub const PRESENTATION_EXTENSIONS: &[&str] = &["ppt", "pptx", "odp", "key"];

    /// Plain text extensions.
    pub const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "rst", "tex"];

    /// Archive extensions.
    pub const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z", "tar", "gz", "bz2", "xz", "tgz"];

    /// E-book extensions.
    pub const EBOOK_EXTENSIONS: &[&str] = &["epub", "mobi", "azw", "azw3", "fb2", "djvu"];

    /// Markup and structured data extensions.
    pub const MARKUP_EXTENSIONS: &[&str] = &["html", "htm", "xml", "json", "yaml", "yml"];

    /// All extensions recognized as documents.
    #[must_use]
    pub fn document_extensions() -> Vec<&'static str> {
        PDF_EXTENSIONS
            .iter()
            .chain(WORD_EXTENSIONS)
            .chain(SPREADSHEET_EXTENSIONS)
            .chain(PRESENTATION_EXTENSIONS)
            .chain(TEXT_EXTENSIONS)
            .chain(ARCHIVE_EXTENSIONS)
            .chain(EBOOK_EXTENSIONS)
            .chain(MARKUP_EXTENSIONS)
            .copied()
            .collect()
    }
}

/// RGB accent color associated with a file kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl AccentColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the color as a `#rrggbb` string.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Kind of a file or directory, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// A browsable directory.
    Folder,
    Image,
    Video,
    Pdf,
    Word,
    Spreadsheet,
    Presentation,
    Text,
    Archive,
    Ebook,
    Markup,
    /// Anything not on one of the allow-lists.
    Other,
}

impl FileKind {
    /// Classifies a bare extension (case-insensitive, without the dot).
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        use extensions::*;

        let ext = ext.to_lowercase();
        let ext = ext.as_str();
        let table: [(&[&str], FileKind); 10] = [
            (IMAGE_EXTENSIONS, FileKind::Image),
            (VIDEO_EXTENSIONS, FileKind::Video),
            (PDF_EXTENSIONS, FileKind::Pdf),
            (WORD_EXTENSIONS, FileKind::Word),
            (SPREADSHEET_EXTENSIONS, FileKind::Spreadsheet),
            (PRESENTATION_EXTENSIONS, FileKind::Presentation),
            (TEXT_EXTENSIONS, FileKind::Text),
            (ARCHIVE_EXTENSIONS, FileKind::Archive),
            (EBOOK_EXTENSIONS, FileKind::Ebook),
            (MARKUP_EXTENSIONS, FileKind::Markup),
        ];
        table
            .iter()
            .find(|(list, _)| list.contains(&ext))
            .map_or(FileKind::Other, |(_, kind)| *kind)
    }

    /// Classifies a file path by its extension.
    ///
    /// Paths without an extension are [`FileKind::Other`].
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map_or(FileKind::Other, Self::from_extension)
    }

    /// Returns `true` for kinds that belong to the document category.
    #[must_use]
    pub fn is_document(self) -> bool {
        matches!(
            self,
            FileKind::Pdf
                | FileKind::Word
                | FileKind::Spreadsheet
                | FileKind::Presentation
                | FileKind::Text
                | FileKind::Archive
                | FileKind::Ebook
                | FileKind::Markup
        )
    }

    /// Returns `true` for images and videos, which the library source owns.
    #[must_use]
    pub fn is_visual_media(self) -> bool {
        matches!(self, FileKind::Image | FileKind::Video)
    }

    /// Symbolic icon name for the kind.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            FileKind::Folder => "folder",
            FileKind::Image => "file-image",
            FileKind::Video => "file-video",
            FileKind::Pdf => "file-pdf",
            FileKind::Word => "file-word",
            FileKind::Spreadsheet => "file-spreadsheet",
            FileKind::Presentation => "file-presentation",
            FileKind::Text => "file-text",
            FileKind::Archive => "file-archive",
            FileKind::Ebook => "book",
            FileKind::Markup => "file-code",
            FileKind::Other => "file",
        }
    }

    /// Accent color used behind the kind's icon.
    #[must_use]
    pub fn accent_color(self) -> AccentColor {
        match self {
            FileKind::Folder => AccentColor::rgb(0xf5, 0xb7, 0x3b),
            FileKind::Image => AccentColor::rgb(0x4c, 0xaf, 0x50),
            FileKind::Video => AccentColor::rgb(0x9c, 0x27, 0xb0),
            FileKind::Pdf => AccentColor::rgb(0xe5, 0x39, 0x35),
            FileKind::Word => AccentColor::rgb(0x1e, 0x88, 0xe5),
            FileKind::Spreadsheet => AccentColor::rgb(0x43, 0xa0, 0x47),
            FileKind::Presentation => AccentColor::rgb(0xfb, 0x8c, 0x00),
            FileKind::Text => AccentColor::rgb(0x75, 0x75, 0x75),
            FileKind::Archive => AccentColor::rgb(0x79, 0x55, 0x48),
            FileKind::Ebook => AccentColor::rgb(0x3f, 0x51, 0xb5),
            FileKind::Markup => AccentColor::rgb(0x00, 0x89, 0x7b),
            FileKind::Other => AccentColor::rgb(0x9e, 0x9e, 0x9e),
        }
    }
}

/// Returns the MIME type registered for an extension, if known.
#[must_use]
pub fn mime_type_for_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "tiff" | "tif" => "image/tiff",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "dng" => "image/x-adobe-dng",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "3gp" => "video/3gpp",
        "3g2" => "video/3gpp2",
        "flv" => "video/x-flv",
        "wmv" => "video/x-ms-wmv",
        "mpeg" | "mpg" => "video/mpeg",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "odt" => "application/vnd.oasis.opendocument.text",
        "rtf" => "application/rtf",
        "pages" => "application/vnd.apple.pages",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ods" => "application/vnd.oasis.opendocument.spreadsheet",
        "csv" => "text/csv",
        "numbers" => "application/vnd.apple.numbers",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "odp" => "application/vnd.oasis.opendocument.presentation",
        "key" => "application/vnd.apple.keynote",
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "rst" => "text/x-rst",
        "tex" => "application/x-tex",
        "zip" => "application/zip",
        "rar" => "application/vnd.rar",
        "7z" => "application/x-7z-compressed",
        "tar" => "application/x-tar",
        "gz" | "tgz" => "application/gzip",
        "bz2" => "application/x-bzip2",
        "xz" => "application/x-xz",
        "epub" => "application/epub+zip",
        "mobi" => "application/x-mobipocket-ebook",
        "azw" | "azw3" => "application/vnd.amazon.ebook",
        "fb2" => "application/x-fictionbook+xml",
        "djvu" => "image/vnd.djvu",
        "html" | "htm" => "text/html",
        "xml" => "application/xml",
        "json" => "application/json",
        "yaml" | "yml" => "application/yaml",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_extensions_case_insensitively() {
        assert_eq!(FileKind::from_extension("JPG"), FileKind::Image);
        assert_eq!(FileKind::from_extension("Mp4"), FileKind::Video);
        assert_eq!(FileKind::from_extension("PDF"), FileKind::Pdf);
        assert_eq!(FileKind::from_extension("docx"), FileKind::Word);
        assert_eq!(FileKind::from_extension("epub"), FileKind::Ebook);
        assert_eq!(FileKind::from_extension("exe"), FileKind::Other);
    }

    #[test]
    fn path_without_extension_is_other() {
        assert_eq!(FileKind::from_path(Path::new("/tmp/README")), FileKind::Other);
        assert_eq!(
            FileKind::from_path(Path::new("/tmp/report.final.XLSX")),
            FileKind::Spreadsheet
        );
    }

    #[test]
    fn document_and_visual_media_are_disjoint() {
        for ext in extensions::document_extensions() {
            let kind = FileKind::from_extension(ext);
            assert!(kind.is_document(), "{ext} should be a document");
            assert!(!kind.is_visual_media());
        }
        assert!(FileKind::Image.is_visual_media());
        assert!(!FileKind::Folder.is_document());
        assert!(!FileKind::Other.is_document());
    }

    #[test]
    fn every_document_extension_has_a_mime_type() {
        for ext in extensions::document_extensions() {
            assert!(mime_type_for_extension(ext).is_some(), "missing mime for {ext}");
        }
        assert_eq!(mime_type_for_extension("PDF"), Some("application/pdf"));
        assert_eq!(mime_type_for_extension("unknown"), None);
    }

    #[test]
    fn icons_and_colors_are_distinct_for_common_kinds() {
        assert_eq!(FileKind::Pdf.icon(), "file-pdf");
        assert_eq!(FileKind::Folder.icon(), "folder");
        assert_ne!(FileKind::Pdf.accent_color(), FileKind::Word.accent_color());
        assert_eq!(FileKind::Pdf.accent_color().to_hex(), "#e53935");
    }
}
