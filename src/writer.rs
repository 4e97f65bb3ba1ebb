//! Streaming Markdown document writer.
//!
//! Every operation appends its fragment to the underlying sink immediately, so
//! arbitrarily large documents stream to disk without being buffered in memory.
//! The exact placement of line terminators and blank lines is part of each
//! operation's contract; downstream tooling compares rendered documents
//! byte-for-byte.

use std::io::Write;

use crate::error::Result;

#[cfg(windows)]
pub(crate) const EOL: &str = "\r\n";
#[cfg(not(windows))]
pub(crate) const EOL: &str = "\n";

/// Wraps a writable sink and provides operations to compose a Markdown
/// document. The sink is owned exclusively by the writer and is only reachable
/// through the operations below (or [`MdWriter::into_inner`]).
///
/// Each operation returns the writer again so calls chain with `?`; the only
/// failure mode is a write error on the sink, which propagates unrecovered.
///
/// # Examples
///
/// ```
/// use runmark::MdWriter;
///
/// let mut buf = Vec::new();
/// let mut md = MdWriter::new(&mut buf);
/// md.h1("Title")?
///     .paragraph(["This is the first paragraph."])?
///     .h2("Sub-Section")?
///     .single_line("First paragraph of sub-section.")?;
/// # Ok::<(), runmark::Error>(())
/// ```
pub struct MdWriter<W> {
    sink: W,
}

impl<W: Write> MdWriter<W> {
    pub fn new(sink: W) -> MdWriter<W> {
        MdWriter { sink }
    }

    /// Consume the writer and hand the sink back to the caller.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Append the given text to the sink without any modification.
    pub fn append(&mut self, text: &str) -> Result<&mut Self> {
        self.sink.write_all(text.as_bytes())?;
        Ok(self)
    }

    /// Append the given text followed by a single line terminator.
    pub fn single_line(&mut self, text: &str) -> Result<&mut Self> {
        self.append(text)?.break_line()
    }

    /// Append a bare platform line terminator.
    pub fn break_line(&mut self) -> Result<&mut Self> {
        self.append(EOL)
    }

    /// Append a heading of the given level (1 to 4) followed by a blank line,
    /// so no manual spacing is needed after it.
    pub fn heading(&mut self, level: usize, text: &str) -> Result<&mut Self> {
        self.append(&"#".repeat(level))?
            .append(" ")?
            .single_line(text)?
            .break_line()
    }

    pub fn h1(&mut self, text: &str) -> Result<&mut Self> {
        self.heading(1, text)
    }

    pub fn h2(&mut self, text: &str) -> Result<&mut Self> {
        self.heading(2, text)
    }

    pub fn h3(&mut self, text: &str) -> Result<&mut Self> {
        self.heading(3, text)
    }

    pub fn h4(&mut self, text: &str) -> Result<&mut Self> {
        self.heading(4, text)
    }

    /// Append a quotation line followed by a blank line.
    pub fn quote(&mut self, text: &str) -> Result<&mut Self> {
        self.append("> ")?.single_line(text)?.break_line()
    }

    /// Append each given line, then a blank line closing the paragraph.
    pub fn paragraph<I, S>(&mut self, lines: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.single_line(line.as_ref())?;
        }
        self.break_line()
    }

    /// Append a fenced code block with an optional language tag, followed by a
    /// blank line.
    pub fn code(&mut self, lang: Option<&str>, content: &str) -> Result<&mut Self> {
        self.append("```")?;
        if let Some(lang) = lang {
            self.append(lang)?;
        }
        self.break_line()?;
        self.single_line(content)?;
        self.single_line("```")?.break_line()
    }

    /// Append the given columns as one table row: a single leading and
    /// trailing pipe, one space padding each side of every cell. Header and
    /// alignment rows are ordinary rows the caller supplies (e.g. `:--:`).
    pub fn table_row<I, S>(&mut self, columns: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for column in columns {
            self.append("| ")?.append(column.as_ref())?.append(" ")?;
        }
        self.single_line("|")
    }

    /// Append a collapsible section. The composer receives the writer itself
    /// and may call any operation, including another `details`.
    ///
    /// # Examples
    ///
    /// ```
    /// # let mut buf = Vec::new();
    /// # let mut md = runmark::MdWriter::new(&mut buf);
    /// md.details("Show details", |c| {
    ///     c.single_line("This request has failed due to many reasons.")?;
    ///     Ok(())
    /// })?;
    /// # Ok::<(), runmark::Error>(())
    /// ```
    pub fn details<F>(&mut self, title: &str, compose: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.single_line("<details>")?
            .append("<summary>")?
            .append(title)?
            .single_line("</summary>")?
            .break_line()?;
        compose(self)?;
        self.break_line()?.single_line("</details>")
    }
}
