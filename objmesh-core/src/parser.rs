/// Line classification and record dispatch
use std::fmt;

/// Kinds of OBJ records the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Vertex,
    TexCoord,
    Normal,
    Face,
    Comment,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Vertex => f.write_str("vertex"),
            RecordKind::TexCoord => f.write_str("texture coordinate"),
            RecordKind::Normal => f.write_str("normal"),
            RecordKind::Face => f.write_str("face"),
            RecordKind::Comment => f.write_str("comment"),
        }
    }
}

/// State of the line machine. Every line starts `Undefined` and is moved
/// to a record state by its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Undefined,
    Vertex,
    TexCoord,
    Normal,
    Face,
    Comment,
}

impl LineState {
    pub fn record_kind(self) -> Option<RecordKind> {
        match self {
            LineState::Undefined => None,
            LineState::Vertex => Some(RecordKind::Vertex),
            LineState::TexCoord => Some(RecordKind::TexCoord),
            LineState::Normal => Some(RecordKind::Normal),
            LineState::Face => Some(RecordKind::Face),
            LineState::Comment => Some(RecordKind::Comment),
        }
    }
}

/// A classified line handed to a [`RecordHandler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// 1-based line number.
    pub line: usize,
    pub kind: RecordKind,
    /// Line content after the keyword, carriage return removed.
    pub body: &'a str,
}

impl<'a> Record<'a> {
    /// Whitespace-separated fields of the body.
    pub fn fields(&self) -> impl Iterator<Item = &'a str> {
        self.body.split_ascii_whitespace()
    }
}

/// Receives every classified line of a scan.
pub trait RecordHandler {
    type Error;

    fn handle(&mut self, record: Record<'_>) -> Result<(), Self::Error>;
}

/// Classify a line by its leading keyword. Returns the state and the rest
/// of the line after the keyword.
///
/// `v` and `f` must be followed by whitespace, so a bare `v` or `f` line
/// is ignored. `vt`, `vn` and `#` select their state as plain prefixes.
pub fn classify(line: &str) -> (LineState, &str) {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix('#') {
        return (LineState::Comment, rest);
    }
    if let Some(rest) = trimmed.strip_prefix("vt") {
        return (LineState::TexCoord, rest);
    }
    if let Some(rest) = trimmed.strip_prefix("vn") {
        return (LineState::Normal, rest);
    }
    if let Some(rest) = spaced_keyword(trimmed, 'v') {
        return (LineState::Vertex, rest);
    }
    if let Some(rest) = spaced_keyword(trimmed, 'f') {
        return (LineState::Face, rest);
    }
    (LineState::Undefined, trimmed)
}

fn spaced_keyword(line: &str, keyword: char) -> Option<&str> {
    line.strip_prefix(keyword)
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_whitespace()))
}

/// Line machine driving a handler over a whole buffer.
#[derive(Debug, Default)]
struct LineMachine {
    state: LineState,
    line: usize,
}

impl LineMachine {
    fn finish_line<H: RecordHandler>(&mut self, raw: &str, handler: &mut H) -> Result<(), H::Error> {
        self.line += 1;
        let content = raw.strip_suffix('\r').unwrap_or(raw);

        if !content.is_empty() {
            let (state, body) = classify(content);
            self.state = state;
            match self.state.record_kind() {
                Some(kind) => handler.handle(Record {
                    line: self.line,
                    kind,
                    body,
                })?,
                None => tracing::trace!(line = self.line, "Ignoring unrecognised line"),
            }
        }

        self.state = LineState::Undefined;
        Ok(())
    }
}

/// Run `handler` over every classified line of `input`.
///
/// The buffer is only borrowed, so the same input can be scanned any
/// number of times. The last line is dispatched even without a trailing
/// newline.
pub fn scan<H: RecordHandler>(input: &str, handler: &mut H) -> Result<(), H::Error> {
    let mut machine = LineMachine::default();
    let mut start = 0;

    for (i, byte) in input.bytes().enumerate() {
        if byte == b'\n' {
            machine.finish_line(&input[start..i], handler)?;
            start = i + 1;
        }
    }
    if start < input.len() {
        machine.finish_line(&input[start..], handler)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Default)]
    struct Collect(Vec<(usize, RecordKind, String)>);

    impl RecordHandler for Collect {
        type Error = Infallible;

        fn handle(&mut self, record: Record<'_>) -> Result<(), Infallible> {
            self.0.push((record.line, record.kind, record.body.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_classify_keywords() {
        assert_eq!(classify("v 1 2 3").0, LineState::Vertex);
        assert_eq!(classify("vt 0.5 0.5").0, LineState::TexCoord);
        assert_eq!(classify("vn 0 0 1").0, LineState::Normal);
        assert_eq!(classify("f 1 2 3").0, LineState::Face);
        assert_eq!(classify("# hello").0, LineState::Comment);
        assert_eq!(classify("  v\t1 2 3").0, LineState::Vertex);
        assert_eq!(classify("vtx 1 2"), (LineState::TexCoord, "x 1 2"));
        assert_eq!(classify("vn0 0 1"), (LineState::Normal, "0 0 1"));
        assert_eq!(classify("usemtl red").0, LineState::Undefined);
        assert_eq!(classify("o cube_v 1").0, LineState::Undefined);
    }

    #[test]
    fn test_scan_dispatches_with_line_numbers() {
        let mut collect = Collect::default();
        scan("# cube\n\nv 1 2 3\ng group\nf 1 2 3", &mut collect).unwrap();

        assert_eq!(
            collect.0,
            vec![
                (1, RecordKind::Comment, " cube".to_string()),
                (3, RecordKind::Vertex, " 1 2 3".to_string()),
                (5, RecordKind::Face, " 1 2 3".to_string()),
            ]
        );
    }

    #[test]
    fn test_bare_vertex_and_face_keywords_are_ignored() {
        assert_eq!(classify("v").0, LineState::Undefined);
        assert_eq!(classify("f").0, LineState::Undefined);
        assert_eq!(classify("v1 2 3").0, LineState::Undefined);
        assert_eq!(classify("f1").0, LineState::Undefined);
        assert_eq!(classify("vt").0, LineState::TexCoord);

        let mut collect = Collect::default();
        scan("v 1 2 3\nv\r\nf\nf 1\n", &mut collect).unwrap();
        let kinds: Vec<(usize, RecordKind)> = collect.0.iter().map(|r| (r.0, r.1)).collect();
        assert_eq!(kinds, vec![(1, RecordKind::Vertex), (4, RecordKind::Face)]);
    }

    #[test]
    fn test_scan_strips_carriage_return() {
        let mut collect = Collect::default();
        scan("v 1 2 3\r\nvn 0 0 1\r\n", &mut collect).unwrap();
        assert_eq!(collect.0[0].2, " 1 2 3");
        assert_eq!(collect.0[1].2, " 0 0 1");
    }
}
