//! Single-file attachment staging.

/// A file selected in the picker but not yet sent.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    /// Original file name.
    pub name: String,
    /// MIME type guessed from the file name.
    pub content_type: String,
    /// File content.
    pub content: Vec<u8>,
}

impl std::fmt::Debug for PendingAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingAttachment")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.content.len())
            .finish()
    }
}

impl PendingAttachment {
    /// Create an attachment, guessing its MIME type from the name.
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            name,
            content_type,
            content,
        }
    }

    /// Create an attachment with an explicit MIME type.
    pub fn with_content_type(
        name: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            content,
        }
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Errors raised while staging an attachment.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AttachmentError {
    /// The widget was built without attachment support.
    #[error("Attachments are disabled for this widget")]
    Disabled,

    /// The file exceeds the configured size limit.
    #[error("File '{name}' is {size} bytes, the limit is {limit} bytes")]
    TooLarge {
        /// File name.
        name: String,
        /// Actual size.
        size: usize,
        /// Configured limit.
        limit: usize,
    },
}

/// The file picker control and the one attachment it may have staged.
#[derive(Debug, Clone, Default)]
pub struct AttachmentSlot {
    staged: Option<PendingAttachment>,
    /// Name held by the native picker control; `None` once reset.
    picker_value: Option<String>,
}

impl AttachmentSlot {
    /// Handle a picker `change`. `None` means the picker was cancelled.
    ///
    /// A new file replaces whatever was staged before.
    pub fn select(&mut self, file: Option<PendingAttachment>) {
        match file {
            Some(file) => {
                self.picker_value = Some(file.name.clone());
                self.staged = Some(file);
            }
            None => {
                self.staged = None;
                self.picker_value = None;
            }
        }
    }

    /// Drop the staged attachment and reset the picker so the same file can
    /// be selected again.
    pub fn clear(&mut self) {
        self.staged = None;
        self.picker_value = None;
    }

    /// The staged attachment.
    #[must_use]
    pub fn staged(&self) -> Option<&PendingAttachment> {
        self.staged.as_ref()
    }

    /// Name shown next to the removal control.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.staged.as_ref().map(|file| file.name.as_str())
    }

    /// Value held by the picker control.
    #[must_use]
    pub fn picker_value(&self) -> Option<&str> {
        self.picker_value.as_deref()
    }

    /// Whether a file is staged.
    #[must_use]
    pub fn is_staged(&self) -> bool {
        self.staged.is_some()
    }
}
