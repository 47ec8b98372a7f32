//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

#[cfg(test)]
extern crate self as rateq_error;

use ariadne::{Color, Report, Source};
use std::{fmt::{self, Debug, Display, Formatter}, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// The plain, user-facing message of this error, without any report formatting.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// The plain, user-facing message of this error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr, highlighting the spans in the given input.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rateq_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(message = "unexpected end of file", labels = ["add something here"])]
    struct UnexpectedEof;

    #[derive(Debug, ErrorKind)]
    enum Sides {
        #[error(message = "no `=` found", help = "an equation needs two sides")]
        Missing,

        #[error(message = format!("found {} `=` signs", count), labels = ["first", "second"])]
        TooMany { count: usize },
    }

    #[test]
    fn struct_message() {
        let err = Error::new(vec![3..4], UnexpectedEof);
        assert_eq!(err.message(), "unexpected end of file");
        assert_eq!(err.to_string(), "unexpected end of file");
    }

    #[test]
    fn enum_messages() {
        assert_eq!(Sides::Missing.message(), "no `=` found");
        assert_eq!(Sides::TooMany { count: 3 }.message(), "found 3 `=` signs");
    }

    #[test]
    fn report_with_fewer_spans_than_labels() {
        // the second label falls back to the first span's offset instead of panicking
        let err = Error::new(vec![0..1], Sides::TooMany { count: 2 });
        let mut out = Vec::new();
        err.build_report("input").write(("input", Source::from("a=b=c")), &mut out).unwrap();
        assert!(!out.is_empty());
    }

    #[test]
    fn report_without_spans() {
        let err = Error::new(Vec::new(), Sides::Missing);
        let mut out = Vec::new();
        err.build_report("input").write(("input", Source::from("abc")), &mut out).unwrap();
        assert!(!out.is_empty());
    }
}
