//! Position tracking
//!
//! Maps absolute byte offsets to line/column pairs. Lines are 1-based. A
//! column is the distance from the last newline before the offset; on the
//! first line the start of the buffer is the origin, so the first character
//! of the buffer sits at column 0 while the first character of any later
//! line sits at column 1.
//!
//! Offsets past the end of the buffer are clamped to its length.

use crate::span::Position;

/// Returns the line number of `offset`: newlines in `source[..offset]` plus one.
pub fn line_of(source: &str, offset: usize) -> u32 {
    let end = offset.min(source.len());
    let newlines = source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count();
    newlines as u32 + 1
}

/// Returns the column of `offset`: `offset` minus the offset of the last
/// newline before it (or minus zero when there is none).
pub fn column_of(source: &str, offset: usize) -> u32 {
    let end = offset.min(source.len());
    let origin = source.as_bytes()[..end]
        .iter()
        .rposition(|&b| b == b'\n')
        .unwrap_or(0);
    (end - origin) as u32
}

/// Precomputed newline table for a source buffer.
///
/// Answers the same questions as [`line_of`] and [`column_of`] in
/// `O(log n)` and slices individual lines for snippet rendering.
#[derive(Debug, Clone)]
pub struct LineIndex<'src> {
    source: &'src str,
    /// Byte offset of every `\n` in the source, ascending
    newlines: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let newlines = source.match_indices('\n').map(|(i, _)| i).collect();
        Self { source, newlines }
    }

    /// Number of lines, counting the (possibly empty) text after the last newline
    pub fn line_count(&self) -> usize {
        self.newlines.len() + 1
    }

    /// Newlines strictly before `offset`
    fn newlines_before(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < offset)
    }

    pub fn line(&self, offset: usize) -> u32 {
        let offset = offset.min(self.source.len());
        self.newlines_before(offset) as u32 + 1
    }

    pub fn column(&self, offset: usize) -> u32 {
        let offset = offset.min(self.source.len());
        let origin = match self.newlines_before(offset) {
            0 => 0,
            n => self.newlines[n - 1],
        };
        (offset - origin) as u32
    }

    pub fn position(&self, offset: usize) -> Position {
        let clamped = offset.min(self.source.len());
        Position::new(self.line(clamped), self.column(clamped), clamped)
    }

    /// Returns the text of a 1-based line, without its trailing newline
    pub fn line_text(&self, line: u32) -> Option<&'src str> {
        let idx = (line as usize).checked_sub(1)?;
        if idx >= self.line_count() {
            return None;
        }
        let start = match idx {
            0 => 0,
            _ => self.newlines[idx - 1] + 1,
        };
        let end = self.newlines.get(idx).copied().unwrap_or(self.source.len());
        Some(&self.source[start..end])
    }
}
