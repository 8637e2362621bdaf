//! Forward only line cursor shared by all decoders
use std::io::BufRead;

/// [LineScanner] hands out one physical line at a time,
/// without its line terminator, and keeps track of the line number.
/// One line may be peeked at without consuming it.
#[derive(Debug)]
pub(crate) struct LineScanner<R: BufRead> {
    reader: R,
    peeked: Option<String>,
    line_number: usize,
    eof: bool,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
            line_number: 0,
            eof: false,
        }
    }

    fn read(&mut self) -> std::io::Result<Option<String>> {
        if self.eof {
            return Ok(None);
        }
        let mut buf = String::with_capacity(96);
        let size = self.reader.read_line(&mut buf)?;
        if size == 0 {
            self.eof = true;
            return Ok(None);
        }
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    /// Consumes and returns the next line, [None] on EOF
    pub fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let line = match self.peeked.take() {
            Some(line) => Some(line),
            None => self.read()?,
        };
        if line.is_some() {
            self.line_number += 1;
        }
        Ok(line)
    }

    /// Returns the next line without consuming it
    pub fn peek_line(&mut self) -> std::io::Result<Option<&str>> {
        if self.peeked.is_none() {
            self.peeked = self.read()?;
        }
        Ok(self.peeked.as_deref())
    }

    /// Consumes up to `n` lines, returns how many were actually skipped
    pub fn skip(&mut self, n: usize) -> std::io::Result<usize> {
        let mut skipped = 0;
        while skipped < n {
            if self.next_line()?.is_none() {
                break;
            }
            skipped += 1;
        }
        Ok(skipped)
    }

    /// Number of lines consumed so far, which is also
    /// the 1-based number of the last returned line.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;
    #[test]
    fn scanner() {
        let content = "first line\r\nsecond\n\nfourth";
        let mut scanner = LineScanner::new(Cursor::new(content));
        assert_eq!(scanner.peek_line().unwrap(), Some("first line"));
        assert_eq!(scanner.line_number(), 0);
        assert_eq!(scanner.next_line().unwrap().as_deref(), Some("first line"));
        assert_eq!(scanner.line_number(), 1);
        assert_eq!(scanner.skip(2).unwrap(), 2);
        assert_eq!(scanner.line_number(), 3);
        assert_eq!(scanner.next_line().unwrap().as_deref(), Some("fourth"));
        assert_eq!(scanner.next_line().unwrap(), None);
        assert_eq!(scanner.peek_line().unwrap(), None);
        assert_eq!(scanner.skip(5).unwrap(), 0);
        assert_eq!(scanner.line_number(), 4);
    }
}
