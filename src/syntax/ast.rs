//! Typed syntax tree for JavaScript-flavoured regular expressions.

/// Byte range in the normalized expression text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Tree root: the expression body plus any `/.../flags` flags.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Root {
    /// Top-level alternation.
    pub regexp: Regexp,
    /// Flags in source order, without duplicates.
    pub flags: Vec<Flag>,
}

/// Regular expression flag from the `/body/flags` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Flag {
    /// `g`
    Global,
    /// `i`
    IgnoreCase,
    /// `m`
    Multiline,
    /// `s`
    DotAll,
    /// `u`
    Unicode,
    /// `y`
    Sticky,
}

impl Flag {
    /// Parse a flag letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'g' => Some(Self::Global),
            'i' => Some(Self::IgnoreCase),
            'm' => Some(Self::Multiline),
            's' => Some(Self::DotAll),
            'u' => Some(Self::Unicode),
            'y' => Some(Self::Sticky),
            _ => None,
        }
    }

    /// Text shown in the diagram's flags label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::IgnoreCase => "ignore case",
            Self::Multiline => "multiline",
            Self::DotAll => "dot all",
            Self::Unicode => "unicode",
            Self::Sticky => "sticky",
        }
    }
}

/// One or more alternatives separated by `|`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Regexp {
    /// Alternatives in document order (never empty).
    pub alternatives: Vec<Match>,
    /// Source range.
    pub span: Span,
}

/// A sequence of fragments matched one after another.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Match {
    /// Fragments in document order; empty for an empty alternative.
    pub fragments: Vec<MatchFragment>,
    /// Source range.
    pub span: Span,
}

/// A content item with an optional quantifier.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MatchFragment {
    /// What is matched.
    pub content: Content,
    /// How often it is matched.
    pub repeat: Option<Repeat>,
    /// Source range including the quantifier.
    pub span: Span,
}

/// Quantifier bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Repeat {
    /// Minimum number of matches.
    pub min: u32,
    /// Maximum number of matches; `None` means unbounded.
    pub max: Option<u32>,
    /// `false` for lazy quantifiers (`*?`, `{2,}?`, ...).
    pub greedy: bool,
}

impl Repeat {
    /// Whether the content may be skipped entirely.
    pub fn has_skip(&self) -> bool {
        self.min == 0
    }

    /// Whether the content may be matched more than once.
    pub fn has_loop(&self) -> bool {
        self.max.is_none_or(|max| max > 1)
    }

    /// Label drawn under the loop path, when the shape alone does not say it.
    ///
    /// Counts are loop traversals, one less than match counts.
    pub fn label(&self) -> Option<String> {
        fn times(n: u32) -> String {
            if n == 1 {
                "once".to_owned()
            } else {
                format!("{n} times")
            }
        }

        let label = match (self.min, self.max) {
            (0 | 1, None) => return None,
            (min, None) => format!("{} or more", times(min - 1)),
            (0 | 1, Some(max)) if max >= 2 => format!("at most {}", times(max - 1)),
            (0 | 1, Some(_)) => return None,
            (min, Some(max)) if min == max => times(min - 1),
            (min, Some(max)) => format!("{}\u{2026}{}", min - 1, times(max - 1)),
        };
        if self.greedy {
            Some(label)
        } else {
            Some(format!("lazy {label}"))
        }
    }
}

/// Matchable content of a fragment.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum Content {
    /// `^` or `$`.
    Anchor(AnchorKind),
    /// `.`
    AnyCharacter,
    /// Run of literal characters.
    Literal(Literal),
    /// Backslash escape with a special meaning.
    Escape(Escape),
    /// `\1`, `\2`, ...
    BackReference(u32),
    /// `[...]`
    Charset(Charset),
    /// `(...)`
    Subexp(Subexp),
}

/// Line anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum AnchorKind {
    /// `^`
    Start,
    /// `$`
    End,
}

impl AnchorKind {
    /// Label text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start of line",
            Self::End => "End of line",
        }
    }
}

/// Literal text, possibly spelled with escapes that were not needed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Literal {
    /// Characters matched.
    pub text: String,
    /// Characters in `text` written as `\c` although `c` needs no escaping.
    pub redundant_escapes: Vec<RedundantEscape>,
}

/// A needless backslash in front of an ordinary character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RedundantEscape {
    /// The escaped character.
    pub ch: char,
    /// Byte offset of the backslash.
    pub position: usize,
}

/// Backslash escapes that carry meaning beyond a literal character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Escape {
    /// `\b`
    WordBoundary,
    /// `\B`
    NonWordBoundary,
    /// `\d`
    Digit,
    /// `\D`
    NonDigit,
    /// `\s`
    WhiteSpace,
    /// `\S`
    NonWhiteSpace,
    /// `\w`
    Word,
    /// `\W`
    NonWord,
    /// `\t`
    Tab,
    /// `\n`
    LineFeed,
    /// `\r`
    CarriageReturn,
    /// `\v`
    VerticalTab,
    /// `\f`
    FormFeed,
    /// `\0`
    Null,
    /// `\b` inside a character set.
    Backspace,
    /// `\cX`, stored as the upper-case letter.
    Control(char),
    /// `\xHH`
    Hex(u8),
    /// `\uHHHH`
    Unicode(u16),
}

impl Escape {
    /// Label text.
    pub fn label(self) -> String {
        match self {
            Self::WordBoundary => "word boundary".to_owned(),
            Self::NonWordBoundary => "non-word boundary".to_owned(),
            Self::Digit => "digit".to_owned(),
            Self::NonDigit => "non-digit".to_owned(),
            Self::WhiteSpace => "white space".to_owned(),
            Self::NonWhiteSpace => "non-white space".to_owned(),
            Self::Word => "word".to_owned(),
            Self::NonWord => "non-word".to_owned(),
            Self::Tab => "tab (0x09)".to_owned(),
            Self::LineFeed => "line feed (0x0A)".to_owned(),
            Self::CarriageReturn => "carriage return (0x0D)".to_owned(),
            Self::VerticalTab => "vertical tab (0x0B)".to_owned(),
            Self::FormFeed => "form feed (0x0C)".to_owned(),
            Self::Null => "null (0x00)".to_owned(),
            Self::Backspace => "backspace (0x08)".to_owned(),
            Self::Control(c) => format!("ctrl-{c}"),
            Self::Hex(v) => format!("0x{v:02X}"),
            Self::Unicode(v) => format!("U+{v:04X}"),
        }
    }

    /// Code point for escapes that stand for exactly one character.
    ///
    /// Classes and boundaries return `None`; they cannot bound a set range.
    pub fn code_point(self) -> Option<u32> {
        match self {
            Self::Tab => Some(0x09),
            Self::LineFeed => Some(0x0a),
            Self::CarriageReturn => Some(0x0d),
            Self::VerticalTab => Some(0x0b),
            Self::FormFeed => Some(0x0c),
            Self::Null => Some(0x00),
            Self::Backspace => Some(0x08),
            Self::Control(c) => Some(u32::from(c) % 32),
            Self::Hex(v) => Some(u32::from(v)),
            Self::Unicode(v) => Some(u32::from(v)),
            Self::WordBoundary
            | Self::NonWordBoundary
            | Self::Digit
            | Self::NonDigit
            | Self::WhiteSpace
            | Self::NonWhiteSpace
            | Self::Word
            | Self::NonWord => None,
        }
    }
}

/// `[...]` or `[^...]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Charset {
    /// `true` for `[^...]`.
    pub inverted: bool,
    /// Items in document order, duplicates included.
    pub items: Vec<CharsetItem>,
    /// Source range.
    pub span: Span,
}

impl Charset {
    /// Items de-duplicated by drawn text, first occurrence wins.
    pub fn distinct_items(&self) -> Vec<&CharsetItem> {
        let mut seen = std::collections::HashSet::new();
        self.items
            .iter()
            .filter(|item| seen.insert(item.label()))
            .collect()
    }
}

/// One member of a character set.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum CharsetItem {
    /// Single character.
    Literal(SetChar),
    /// `a-z`
    Range {
        /// Lower bound.
        first: SetChar,
        /// Upper bound.
        last: SetChar,
    },
    /// Class or named escape such as `\d` or `\t`.
    Escape(Escape),
}

impl CharsetItem {
    /// Text drawn for the item.
    pub fn label(&self) -> String {
        match self {
            Self::Literal(c) => c.label(),
            Self::Range { first, last } => format!("{} - {}", first.label(), last.label()),
            Self::Escape(e) => e.label(),
        }
    }
}

/// A character inside a set, written literally or as a single-character escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SetChar {
    /// Spelling in the source.
    pub kind: SetCharKind,
    /// Byte offset in the source.
    pub position: usize,
}

/// Spelling of a [`SetChar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SetCharKind {
    /// Plain character, `redundant` when written as an unnecessary escape.
    Char {
        /// The character.
        ch: char,
        /// Whether it was written as `\ch` without need.
        redundant: bool,
    },
    /// Single-character escape (`\t`, `\x41`, ...).
    Escape(Escape),
}

impl SetChar {
    /// Code point used for range ordering.
    pub fn code_point(&self) -> Option<u32> {
        match self.kind {
            SetCharKind::Char { ch, .. } => Some(u32::from(ch)),
            SetCharKind::Escape(e) => e.code_point(),
        }
    }

    /// Text drawn for the character.
    pub fn label(&self) -> String {
        match self.kind {
            SetCharKind::Char { ch, .. } => format!("\u{201c}{ch}\u{201d}"),
            SetCharKind::Escape(e) => e.label(),
        }
    }
}

/// Parenthesized subexpression.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Subexp {
    /// Group flavour.
    pub kind: SubexpKind,
    /// Enclosed expression.
    pub regexp: Regexp,
    /// Source range including parentheses.
    pub span: Span,
}

impl Subexp {
    /// Whether the group encloses nothing.
    pub fn is_empty(&self) -> bool {
        self.regexp.alternatives.len() == 1 && self.regexp.alternatives[0].fragments.is_empty()
    }
}

/// Group flavours.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum SubexpKind {
    /// `( ... )`
    Capture,
    /// `(?<name> ... )`
    Named(String),
    /// `(?: ... )`
    NonCapture,
    /// `(?= ... )`
    PositiveLookahead,
    /// `(?! ... )`
    NegativeLookahead,
    /// `(?<= ... )`
    PositiveLookbehind,
    /// `(?<! ... )`
    NegativeLookbehind,
}

impl SubexpKind {
    /// Whether the group takes a number from the group counter.
    pub fn is_capturing(&self) -> bool {
        matches!(self, Self::Capture | Self::Named(_))
    }

    /// Fixed label for lookarounds; capturing labels depend on the group counter.
    pub fn fixed_label(&self) -> Option<&'static str> {
        match self {
            Self::PositiveLookahead => Some("positive lookahead"),
            Self::NegativeLookahead => Some("negative lookahead"),
            Self::PositiveLookbehind => Some("positive lookbehind"),
            Self::NegativeLookbehind => Some("negative lookbehind"),
            Self::Capture | Self::Named(_) | Self::NonCapture => None,
        }
    }
}
