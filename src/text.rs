//! A titled text buffer that can be versioned either way: through
//! [`TextEdit`] actions or through [`TextSnapshot`] copies.
//!
//! Positions and lengths count characters, not bytes.

use std::borrow::Cow;

use thiserror::Error;

use crate::traits::{action::Action, snapshot::Snapshotable};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("Invalid position {position}. Document length: {len}")]
    InvalidPosition { position: usize, len: usize },

    #[error("Invalid deletion range: position={position}, length={length}, text_length={len}")]
    InvalidRange {
        position: usize,
        length: usize,
        len: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    title: String,
    content: String,
}

impl TextBuffer {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
        }
    }

    #[must_use]
    pub fn with_content(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Length in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_offset(&self, position: usize) -> Option<usize> {
        self.content
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(self.content.len()))
            .nth(position)
    }

    /// Inserts `text` before the character at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidPosition`] when `position` is past the end.
    pub fn insert(&mut self, position: usize, text: &str) -> Result<(), TextError> {
        let offset = self.byte_offset(position).ok_or(TextError::InvalidPosition {
            position,
            len: self.char_len(),
        })?;

        self.content.insert_str(offset, text);
        Ok(())
    }

    /// Removes `length` characters starting at `position` and returns them.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidRange`] when the range runs past the end.
    pub fn delete(&mut self, position: usize, length: usize) -> Result<String, TextError> {
        let invalid = || TextError::InvalidRange {
            position,
            length,
            len: self.char_len(),
        };

        let end = position.checked_add(length).ok_or_else(invalid)?;
        let (Some(start), Some(end)) = (self.byte_offset(position), self.byte_offset(end)) else {
            return Err(invalid());
        };

        Ok(self.content.drain(start..end).collect())
    }

    pub fn append(&mut self, text: &str) {
        self.content.push_str(text);
    }

    /// Replaces every occurrence of `from` with `to`.
    pub fn replace(&mut self, from: &str, to: &str) {
        self.content = self.content.replace(from, to);
    }
}

impl From<&str> for TextBuffer {
    fn from(content: &str) -> Self {
        Self::with_content("Untitled", content)
    }
}

/// A full copy of a [`TextBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSnapshot {
    pub title: String,
    pub content: String,
}

impl Snapshotable for TextBuffer {
    type Snapshot = TextSnapshot;

    fn snapshot(&self) -> TextSnapshot {
        TextSnapshot {
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }

    fn restore(&mut self, snapshot: &TextSnapshot) {
        self.title.clone_from(&snapshot.title);
        self.content.clone_from(&snapshot.content);
    }
}

/// A reversible edit of a [`TextBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert {
        position: usize,
        text: String,
    },
    Delete {
        position: usize,
        length: usize,
        /// Filled in by `apply`.
        removed: Option<String>,
    },
    Append {
        text: String,
    },
}

impl TextEdit {
    #[must_use]
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self::Insert {
            position,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn delete(position: usize, length: usize) -> Self {
        Self::Delete {
            position,
            length,
            removed: None,
        }
    }

    #[must_use]
    pub fn append(text: impl Into<String>) -> Self {
        Self::Append { text: text.into() }
    }
}

impl Action for TextEdit {
    type Target = TextBuffer;
    type Error = TextError;

    fn apply(&mut self, target: &mut TextBuffer) -> Result<(), TextError> {
        match self {
            Self::Insert { position, text } => target.insert(*position, text),
            Self::Delete {
                position,
                length,
                removed,
            } => {
                *removed = Some(target.delete(*position, *length)?);
                Ok(())
            }
            Self::Append { text } => {
                target.append(text);
                Ok(())
            }
        }
    }

    fn revert(&mut self, target: &mut TextBuffer) -> Result<(), TextError> {
        match self {
            Self::Insert { position, text } => {
                target.delete(*position, text.chars().count())?;
                Ok(())
            }
            Self::Delete {
                position, removed, ..
            } => match removed.as_deref() {
                Some(removed) => target.insert(*position, removed),
                None => Ok(()),
            },
            Self::Append { text } => {
                let length = text.chars().count();
                let len = target.char_len();
                let position = len.checked_sub(length).ok_or(TextError::InvalidRange {
                    position: 0,
                    length,
                    len,
                })?;
                target.delete(position, length)?;
                Ok(())
            }
        }
    }

    fn description(&self) -> Cow<'_, str> {
        match self {
            Self::Insert { position, text } => {
                Cow::Owned(format!("Inserted '{text}' at position {position}"))
            }
            Self::Delete {
                position, length, ..
            } => Cow::Owned(format!("Deleted {length} characters at position {position}")),
            Self::Append { text } => Cow::Owned(format!("Appended '{text}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert() {
        let mut buffer = TextBuffer::from("Hello");
        buffer.insert(5, " World").unwrap();
        buffer.insert(0, ">").unwrap();
        assert_eq!(buffer.content(), ">Hello World");
    }

    #[test]
    fn test_insert_invalid_position() {
        let mut buffer = TextBuffer::from("Hello");
        let err = buffer.insert(6, "!").unwrap_err();
        assert_eq!(err, TextError::InvalidPosition { position: 6, len: 5 });
        assert_eq!(err.to_string(), "Invalid position 6. Document length: 5");
        assert_eq!(buffer.content(), "Hello");
    }

    #[test]
    fn test_delete_returns_removed() {
        let mut buffer = TextBuffer::from("Hello World");
        let removed = buffer.delete(5, 6).unwrap();
        assert_eq!(removed, " World");
        assert_eq!(buffer.content(), "Hello");
    }

    #[test]
    fn test_delete_invalid_range() {
        let mut buffer = TextBuffer::from("abc");
        let err = buffer.delete(2, 5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid deletion range: position=2, length=5, text_length=3"
        );
        assert!(buffer.delete(usize::MAX, 2).is_err());
        assert_eq!(buffer.content(), "abc");
    }

    #[test]
    fn test_positions_count_characters() {
        let mut buffer = TextBuffer::from("héllo");
        assert_eq!(buffer.char_len(), 5);

        let removed = buffer.delete(1, 1).unwrap();
        assert_eq!(removed, "é");
        buffer.insert(1, "ë").unwrap();
        assert_eq!(buffer.content(), "hëllo");
    }

    #[test]
    fn test_replace() {
        let mut buffer = TextBuffer::from("The quick brown fox jumps over the lazy dog.");
        buffer.replace("quick", "clever");
        assert_eq!(buffer.content(), "The clever brown fox jumps over the lazy dog.");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut buffer = TextBuffer::with_content("My Essay", "draft");
        let saved = buffer.snapshot();

        buffer.append(" two");
        buffer.set_title("Renamed");
        assert_eq!(saved.content, "draft");
        assert_eq!(saved.title, "My Essay");

        buffer.restore(&saved);
        assert_eq!(buffer.content(), "draft");
        assert_eq!(buffer.title(), "My Essay");
    }

    #[test]
    fn test_edits_round_trip() {
        let original = TextBuffer::from("Hello World");
        let edits = [
            TextEdit::insert(5, ","),
            TextEdit::delete(0, 6),
            TextEdit::append("!"),
        ];

        for mut edit in edits {
            let mut buffer = original.clone();
            edit.apply(&mut buffer).unwrap();
            assert_ne!(buffer, original, "{edit:?} should change the buffer");
            edit.revert(&mut buffer).unwrap();
            assert_eq!(buffer, original, "{edit:?} should revert cleanly");
        }
    }

    #[test]
    fn test_delete_remembers_removed_text() {
        let mut buffer = TextBuffer::from("Hello World");
        let mut edit = TextEdit::delete(0, 6);

        edit.apply(&mut buffer).unwrap();
        assert_eq!(
            edit,
            TextEdit::Delete {
                position: 0,
                length: 6,
                removed: Some("Hello ".to_string()),
            }
        );
    }

    #[test]
    fn test_description() {
        assert_eq!(
            TextEdit::insert(5, " World").description(),
            "Inserted ' World' at position 5"
        );
        assert_eq!(
            TextEdit::delete(0, 5).description(),
            "Deleted 5 characters at position 0"
        );
        assert_eq!(TextEdit::append("1").description(), "Appended '1'");
    }
}
