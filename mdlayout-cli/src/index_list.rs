use smallvec::SmallVec;

/// List of integers parsed from text such as `1,2,3` or `[1, 2, 3]`.
///
/// Values are kept as `i128` so that negative or oversized values can be
/// reported against the chosen index type later.
pub type IndexList = SmallVec<[i128; 8]>;

/// Parse a comma-separated list of integers.
///
/// Surrounding brackets and whitespace around values are ignored. Empty text
/// (or `[]`) gives the empty list, which is the only index of a rank-0
/// domain.
pub fn parse_index_list(text: &str) -> Result<IndexList, ParseError> {
    let inner = text.trim();
    let inner = match (inner.strip_prefix('['), inner.ends_with(']')) {
        (Some(rest), true) => &rest[..rest.len() - 1],
        (None, false) => inner,
        _ => return Err(ParseError::new(text, ParseErrorKind::UnbalancedBrackets)),
    };

    if inner.trim().is_empty() {
        return Ok(IndexList::new());
    }

    inner
        .split(',')
        .map(|value| {
            let value = value.trim();
            value.parse::<i128>().map_err(|_| {
                ParseError::new(
                    text,
                    ParseErrorKind::InvalidValue {
                        value: value.to_string(),
                    },
                )
            })
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
enum ParseErrorKind {
    /// Text starts with `[` but doesn't end with `]`, or vice versa.
    UnbalancedBrackets,
    /// A list item is not an integer.
    InvalidValue { value: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    text: String,
    kind: ParseErrorKind,
}

impl ParseError {
    fn new(text: &str, kind: ParseErrorKind) -> ParseError {
        ParseError {
            text: text.to_string(),
            kind,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ParseErrorKind::UnbalancedBrackets => {
                write!(fmt, "unbalanced brackets in index list \"{}\"", self.text)
            }
            ParseErrorKind::InvalidValue { value } => write!(
                fmt,
                "invalid value \"{}\" in index list \"{}\". Must be an integer.",
                value, self.text
            ),
        }
    }
}

impl std::error::Error for ParseError {}
