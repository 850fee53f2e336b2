//! Saved editor documents as seen by the compile core.

use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use lsp_types::Uri;
use thiserror::Error;
use url::Url;

/// Errors raised while building a [`Document`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The path cannot be expressed as a `file://` URI (for example because
    /// it is relative).
    #[error("cannot build a file URI for '{path}'")]
    InvalidPath {
        /// Offending path.
        path: Utf8PathBuf,
    },
}

/// A snapshot of an editor document taken when the compile was requested.
///
/// Lines and columns exposed here are zero-based, matching the Language
/// Server Protocol. Column widths are measured in UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    uri: Uri,
    path: Utf8PathBuf,
    text: String,
}

impl Document {
    /// Builds a document from an editor-supplied URI.
    #[must_use]
    pub fn new(uri: Uri, path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        Self {
            uri,
            path: path.into(),
            text: text.into(),
        }
    }

    /// Builds a document for an absolute filesystem path.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidPath`] when the path cannot be
    /// converted to a `file://` URI.
    pub fn from_path(
        path: impl Into<Utf8PathBuf>,
        text: impl Into<String>,
    ) -> Result<Self, DocumentError> {
        let owned = path.into();
        let invalid = || DocumentError::InvalidPath {
            path: owned.clone(),
        };
        let url = Url::from_file_path(owned.as_std_path()).map_err(|()| invalid())?;
        let uri = Uri::from_str(url.as_str()).map_err(|_| invalid())?;
        Ok(Self::new(uri, owned, text))
    }

    /// Document URI.
    #[must_use]
    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    /// String form of the URI, used to key compile jobs.
    #[must_use]
    pub fn uri_key(&self) -> String {
        self.uri.as_str().to_owned()
    }

    /// Filesystem path of the document.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        self.path.as_path()
    }

    /// Full document text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Path with `\` separators normalised to `/`.
    #[must_use]
    pub fn unix_path(&self) -> String {
        self.path.as_str().replace('\\', "/")
    }

    /// Bare filename with its last extension removed
    /// (`myCmp.js-meta.xml` becomes `myCmp.js-meta`).
    #[must_use]
    pub fn file_stem(&self) -> &str {
        let raw = self.path.as_str();
        let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }

    /// Number of lines, counting a trailing empty line after a final newline.
    /// Never zero.
    #[must_use]
    pub fn line_count(&self) -> u32 {
        u32::try_from(self.text.split('\n').count()).unwrap_or(u32::MAX)
    }

    /// Length of `line` in UTF-16 code units, excluding the line terminator.
    /// Lines past the end of the document have length zero.
    #[must_use]
    pub fn line_length(&self, line: u32) -> u32 {
        let Ok(index) = usize::try_from(line) else {
            return 0;
        };
        self.text.split('\n').nth(index).map_or(0, |raw| {
            let content = raw.strip_suffix('\r').unwrap_or(raw);
            u32::try_from(content.encode_utf16().count()).unwrap_or(u32::MAX)
        })
    }
}
