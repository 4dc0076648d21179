//! Line-oriented writer for generated source text.
//!
//! Expansion rules describe their output as nested blocks; the writer owns
//! indentation so every rule produces text with the same layout. Output is
//! relative to column zero; the engine re-indents it when a fragment is
//! placed inside a body.

/// One level of indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indent {
    unit: String,
}

impl Indent {
    pub fn spaces(width: usize) -> Self {
        Self {
            unit: " ".repeat(width),
        }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::spaces(4)
    }
}

pub struct CodeWriter<'a> {
    indent: &'a Indent,
    level: usize,
    buffer: String,
}

impl<'a> CodeWriter<'a> {
    pub fn new(indent: &'a Indent) -> Self {
        Self {
            indent,
            level: 0,
            buffer: String::new(),
        }
    }

    /// Writes one line at the current level.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.buffer.push_str(self.indent.unit());
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Writes `text` and indents the following lines one level deeper.
    pub fn open(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(text);
        self.level += 1;
        self
    }

    /// Leaves one level and writes `text`.
    pub fn close(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self.line(text)
    }

    /// Writes `header {`, runs `body` one level deeper, then writes `}`.
    pub fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.open(format!("{} {{", header.as_ref()));
        body(self);
        self.close("}")
    }

    /// The written text without the trailing newline.
    pub fn finish(mut self) -> String {
        while self.buffer.ends_with('\n') {
            self.buffer.pop();
        }
        self.buffer
    }
}

/// Prefixes every non-empty line of `text` with `prefix`.
pub fn indent_lines(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_blocks_are_indented() {
        let indent = Indent::spaces(2);
        let mut w = CodeWriter::new(&indent);
        w.block("struct A", |w| {
            w.line("var x: Int");
            w.blank();
            w.block("init()", |w| {
                w.line("x = 0");
            });
        });
        assert_eq!(
            w.finish(),
            "struct A {\n  var x: Int\n\n  init() {\n    x = 0\n  }\n}"
        );
    }

    #[test]
    fn indent_lines_skips_blank_lines() {
        assert_eq!(indent_lines("a\n\nb", "    "), "    a\n\n    b");
    }
}
