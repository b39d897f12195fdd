//! Ordered output accumulator shared by the scanners

/// Rewritten text, built one line at a time.
///
/// Every pushed line is terminated with `\n`.
#[derive(Debug, Clone, Default)]
pub struct Output {
    buf: String,
    lines: usize,
}

impl Output {
    /// Preallocate for roughly `bytes` of output
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: String::with_capacity(bytes),
            lines: 0,
        }
    }

    pub fn push_line(&mut self, line: &str) {
        self.buf.push_str(line);
        self.buf.push('\n');
        self.lines += 1;
    }

    pub fn push_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        lines.into_iter().for_each(|line| self.push_line(line));
    }

    /// Number of lines written so far
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.lines
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_lines_terminates_each_line() {
        let mut out = Output::default();
        out.push_line("a");
        out.push_lines(["b", "", "c"]);
        assert_eq!(out.line_count(), 4);
        assert_eq!(out.into_string(), "a\nb\n\nc\n");
    }
}
