use rateq_attrs::ErrorKind;

/// The reasons the normalizer can fail to produce a canonical equation.
#[derive(Debug, Clone, PartialEq, ErrorKind)]
pub enum NormalizeError {
    /// The input contained nothing after artifact stripping.
    #[error(message = "Empty equation")]
    Empty,

    /// No `=` could be found or recovered.
    #[error(
        message = "Equation must contain exactly one '='",
        labels = ["no `=` was found in this input"],
        help = "write the equation as `left side = right side`",
    )]
    NoEquality,

    /// More than one `=` remained after recovery.
    #[error(
        message = "Equation must contain exactly one '='",
        labels = [format!("found {} `=` signs", count)],
    )]
    MultipleEquality {
        /// The number of `=` signs found.
        count: usize,
    },

    /// One side of the equation is not a valid expression.
    #[error(
        message = format!("could not parse the {} side of the equation: {}", side, detail),
        labels = ["this side"],
        help = "multiplication must be explicit and parentheses must be balanced",
    )]
    Unparsable {
        /// Which side failed, `"left"` or `"right"`.
        side: &'static str,

        /// The parser's message.
        detail: String,
    },
}
