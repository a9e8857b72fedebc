use crate::syntax::ast::{
    AnchorKind, Charset, CharsetItem, Content, Escape, Flag, Literal, Match, MatchFragment,
    RedundantEscape, Regexp, Repeat, Root, SetChar, SetCharKind, Span, Subexp, SubexpKind,
};
use crate::syntax::error::SyntaxError;

/// Characters that may be escaped without the escape being redundant.
const SYNTAX_CHARS: &str = "^$\\.*+?()[]{}|/-";

/// Deepest group nesting accepted by [`parse_expression`].
///
/// Parsing and rendering both recurse once per group level; a tree at this depth renders on a
/// thread with the default 2 MiB stack.
pub const MAX_NESTING: usize = 64;

/// Parse expression text into a syntax tree.
///
/// Accepts either a bare expression (`a|b`) or the literal form (`/a|b/gi`). Callers are expected
/// to have normalized literal newlines already (see [`normalize_newlines`]).
pub fn parse_expression(text: &str) -> Result<Root, SyntaxError> {
    if let Some((body, flags)) = split_literal_form(text) {
        let regexp = parse_body(text, 1, body.len() + 1)?;
        let mut parsed = Vec::new();
        for c in flags.chars() {
            let flag = Flag::from_char(c)
                .ok_or_else(|| SyntaxError::new(text.len(), format!("unknown flag '{c}'")))?;
            if !parsed.contains(&flag) {
                parsed.push(flag);
            }
        }
        return Ok(Root {
            regexp,
            flags: parsed,
        });
    }

    Ok(Root {
        regexp: parse_body(text, 0, text.len())?,
        flags: Vec::new(),
    })
}

/// Replace literal line feeds with the two-character escape `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace('\n', "\\n")
}

fn split_literal_form(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, flags) = (&rest[..close], &rest[close + 1..]);
    if flags.chars().all(|c| Flag::from_char(c).is_some()) {
        Some((body, flags))
    } else {
        None
    }
}

fn parse_body(src: &str, start: usize, end: usize) -> Result<Regexp, SyntaxError> {
    let chars = src[start..end]
        .char_indices()
        .map(|(i, c)| (start + i, c))
        .collect();
    let mut p = Parser {
        chars,
        pos: 0,
        end,
        depth: 0,
    };
    let regexp = p.parse_regexp()?;
    match p.peek() {
        None => Ok(regexp),
        Some(')') => Err(SyntaxError::new(p.offset(), "unmatched ')'")),
        Some(c) => Err(SyntaxError::new(
            p.offset(),
            format!("unexpected character '{c}'"),
        )),
    }
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
    end: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn offset(&self) -> usize {
        self.chars.get(self.pos).map_or(self.end, |&(i, _)| i)
    }

    fn consume(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn consume_str(&mut self, s: &str) -> bool {
        let matches = s
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c));
        if matches {
            self.pos += s.chars().count();
        }
        matches
    }

    fn expect(&mut self, c: char, message: &str) -> Result<(), SyntaxError> {
        if self.consume(c) {
            Ok(())
        } else {
            Err(SyntaxError::new(self.offset(), message).expecting(format!("\"{c}\"")))
        }
    }

    fn parse_regexp(&mut self) -> Result<Regexp, SyntaxError> {
        let start = self.offset();
        let mut alternatives = vec![self.parse_match()?];
        while self.consume('|') {
            alternatives.push(self.parse_match()?);
        }
        Ok(Regexp {
            alternatives,
            span: Span::new(start, self.offset()),
        })
    }

    fn parse_match(&mut self) -> Result<Match, SyntaxError> {
        let start = self.offset();
        let mut fragments: Vec<MatchFragment> = Vec::new();
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            let fragment = self.parse_fragment()?;
            match fragments.last_mut() {
                Some(prev) if can_merge(prev, &fragment) => merge_literal(prev, fragment),
                _ => fragments.push(fragment),
            }
        }
        Ok(Match {
            fragments,
            span: Span::new(start, self.offset()),
        })
    }

    fn parse_fragment(&mut self) -> Result<MatchFragment, SyntaxError> {
        let start = self.offset();
        let content = self.parse_content()?;
        let repeat = self.parse_repeat()?;
        if repeat.is_some() {
            if matches!(content, Content::Anchor(_)) {
                return Err(SyntaxError::new(start, "nothing to repeat"));
            }
            if self.quantifier_ahead() {
                return Err(SyntaxError::new(self.offset(), "nothing to repeat"));
            }
        }
        Ok(MatchFragment {
            content,
            repeat,
            span: Span::new(start, self.offset()),
        })
    }

    fn parse_content(&mut self) -> Result<Content, SyntaxError> {
        let start = self.offset();
        if self.quantifier_ahead() {
            return Err(SyntaxError::new(start, "nothing to repeat"));
        }
        let Some(c) = self.bump() else {
            return Err(SyntaxError::new(start, "unexpected end of expression"));
        };
        match c {
            '^' => Ok(Content::Anchor(AnchorKind::Start)),
            '$' => Ok(Content::Anchor(AnchorKind::End)),
            '.' => Ok(Content::AnyCharacter),
            '(' => self.parse_subexp(start).map(Content::Subexp),
            '[' => self.parse_charset(start).map(Content::Charset),
            '\\' => self.parse_escape(start),
            other => Ok(Content::Literal(Literal {
                text: other.to_string(),
                redundant_escapes: Vec::new(),
            })),
        }
    }

    fn parse_subexp(&mut self, start: usize) -> Result<Subexp, SyntaxError> {
        let kind = if self.consume_str("?:") {
            SubexpKind::NonCapture
        } else if self.consume_str("?=") {
            SubexpKind::PositiveLookahead
        } else if self.consume_str("?!") {
            SubexpKind::NegativeLookahead
        } else if self.consume_str("?<=") {
            SubexpKind::PositiveLookbehind
        } else if self.consume_str("?<!") {
            SubexpKind::NegativeLookbehind
        } else if self.consume_str("?<") {
            SubexpKind::Named(self.parse_group_name()?)
        } else if self.peek() == Some('?') {
            return Err(SyntaxError::new(self.offset(), "invalid group")
                .expecting("\"?:\"")
                .expecting("\"?=\"")
                .expecting("\"?!\"")
                .expecting("\"?<\""));
        } else {
            SubexpKind::Capture
        };
        if self.depth >= MAX_NESTING {
            return Err(SyntaxError::new(
                start,
                format!("nesting too deep (more than {MAX_NESTING} levels)"),
            ));
        }
        self.depth += 1;
        let regexp = self.parse_regexp()?;
        self.depth -= 1;
        self.expect(')', "unterminated group")?;
        Ok(Subexp {
            kind,
            regexp,
            span: Span::new(start, self.offset()),
        })
    }

    fn parse_group_name(&mut self) -> Result<String, SyntaxError> {
        let start = self.offset();
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c == '>' {
                break;
            }
            let valid = if name.is_empty() {
                c.is_alphabetic() || c == '_' || c == '$'
            } else {
                c.is_alphanumeric() || c == '_' || c == '$'
            };
            if !valid {
                return Err(SyntaxError::new(self.offset(), "invalid group name"));
            }
            name.push(c);
            self.pos += 1;
        }
        if name.is_empty() {
            return Err(SyntaxError::new(start, "empty group name").expecting("group name"));
        }
        self.expect('>', "unterminated group name")?;
        Ok(name)
    }

    fn parse_charset(&mut self, start: usize) -> Result<Charset, SyntaxError> {
        let inverted = self.consume('^');
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(SyntaxError::new(self.offset(), "unterminated character set")
                        .expecting("\"]\""));
                }
                Some(']') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => items.push(self.parse_charset_item()?),
            }
        }
        Ok(Charset {
            inverted,
            items,
            span: Span::new(start, self.offset()),
        })
    }

    fn parse_charset_item(&mut self) -> Result<CharsetItem, SyntaxError> {
        let first = match self.parse_set_terminal()? {
            SetTerminal::Char(c) => c,
            SetTerminal::Class(e) => return Ok(CharsetItem::Escape(e)),
        };
        let is_range = self.peek() == Some('-') && !matches!(self.peek_at(1), None | Some(']'));
        if !is_range {
            return Ok(match first.kind {
                SetCharKind::Escape(e) => CharsetItem::Escape(e),
                SetCharKind::Char { .. } => CharsetItem::Literal(first),
            });
        }
        self.pos += 1;
        let last_offset = self.offset();
        let last = match self.parse_set_terminal()? {
            SetTerminal::Char(c) => c,
            SetTerminal::Class(_) => {
                return Err(SyntaxError::new(
                    last_offset,
                    "character class cannot bound a range",
                ));
            }
        };
        if let (Some(a), Some(b)) = (first.code_point(), last.code_point())
            && a > b
        {
            return Err(SyntaxError::new(
                first.position,
                "range out of order in character set",
            ));
        }
        Ok(CharsetItem::Range { first, last })
    }

    fn parse_set_terminal(&mut self) -> Result<SetTerminal, SyntaxError> {
        let position = self.offset();
        let Some(c) = self.bump() else {
            return Err(SyntaxError::new(position, "unterminated character set").expecting("\"]\""));
        };
        if c != '\\' {
            return Ok(SetTerminal::Char(SetChar {
                kind: SetCharKind::Char {
                    ch: c,
                    redundant: false,
                },
                position,
            }));
        }
        let Some(e) = self.bump() else {
            return Err(SyntaxError::new(position, "incomplete escape"));
        };
        let escape = match e {
            'b' => Escape::Backspace,
            'd' => return Ok(SetTerminal::Class(Escape::Digit)),
            'D' => return Ok(SetTerminal::Class(Escape::NonDigit)),
            's' => return Ok(SetTerminal::Class(Escape::WhiteSpace)),
            'S' => return Ok(SetTerminal::Class(Escape::NonWhiteSpace)),
            'w' => return Ok(SetTerminal::Class(Escape::Word)),
            'W' => return Ok(SetTerminal::Class(Escape::NonWord)),
            other => match self.parse_char_escape(other, position)? {
                Some(escape) => escape,
                None => {
                    return Ok(SetTerminal::Char(SetChar {
                        kind: SetCharKind::Char {
                            ch: other,
                            redundant: !SYNTAX_CHARS.contains(other),
                        },
                        position,
                    }));
                }
            },
        };
        Ok(SetTerminal::Char(SetChar {
            kind: SetCharKind::Escape(escape),
            position,
        }))
    }

    /// Escapes shared by set and non-set contexts; `None` means "the character itself".
    fn parse_char_escape(&mut self, c: char, start: usize) -> Result<Option<Escape>, SyntaxError> {
        let escape = match c {
            't' => Escape::Tab,
            'n' => Escape::LineFeed,
            'r' => Escape::CarriageReturn,
            'v' => Escape::VerticalTab,
            'f' => Escape::FormFeed,
            '0' if !self.peek().is_some_and(|d| d.is_ascii_digit()) => Escape::Null,
            'c' => match self.peek() {
                Some(l) if l.is_ascii_alphabetic() => {
                    self.pos += 1;
                    Escape::Control(l.to_ascii_uppercase())
                }
                _ => {
                    return Err(SyntaxError::new(start, "incomplete control escape")
                        .expecting("letter"));
                }
            },
            'x' => {
                let v = self.parse_hex(2, start)?;
                Escape::Hex(
                    u8::try_from(v).map_err(|_| SyntaxError::new(start, "invalid hex escape"))?,
                )
            }
            'u' => {
                let v = self.parse_hex(4, start)?;
                Escape::Unicode(
                    u16::try_from(v)
                        .map_err(|_| SyntaxError::new(start, "invalid unicode escape"))?,
                )
            }
            _ => return Ok(None),
        };
        Ok(Some(escape))
    }

    fn parse_hex(&mut self, digits: usize, start: usize) -> Result<u32, SyntaxError> {
        let mut v = 0u32;
        for _ in 0..digits {
            let d = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| {
                    SyntaxError::new(start, "incomplete escape").expecting("hex digit")
                })?;
            self.pos += 1;
            v = v * 16 + d;
        }
        Ok(v)
    }

    fn parse_escape(&mut self, start: usize) -> Result<Content, SyntaxError> {
        let Some(c) = self.bump() else {
            return Err(SyntaxError::new(start, "incomplete escape"));
        };
        let escape = match c {
            'b' => Escape::WordBoundary,
            'B' => Escape::NonWordBoundary,
            'd' => Escape::Digit,
            'D' => Escape::NonDigit,
            's' => Escape::WhiteSpace,
            'S' => Escape::NonWhiteSpace,
            'w' => Escape::Word,
            'W' => Escape::NonWord,
            '1'..='9' => {
                let mut n = c.to_digit(10).unwrap_or_default();
                while let Some(d) = self.peek().and_then(|d| d.to_digit(10)) {
                    n = n.saturating_mul(10).saturating_add(d);
                    self.pos += 1;
                }
                return Ok(Content::BackReference(n));
            }
            other => match self.parse_char_escape(other, start)? {
                Some(escape) => escape,
                None => {
                    let redundant_escapes = if SYNTAX_CHARS.contains(other) {
                        Vec::new()
                    } else {
                        vec![RedundantEscape {
                            ch: other,
                            position: start,
                        }]
                    };
                    return Ok(Content::Literal(Literal {
                        text: other.to_string(),
                        redundant_escapes,
                    }));
                }
            },
        };
        Ok(Content::Escape(escape))
    }

    fn quantifier_ahead(&self) -> bool {
        match self.peek() {
            Some('*' | '+' | '?') => true,
            Some('{') => self.scan_braces().is_some(),
            _ => false,
        }
    }

    /// Scan `{n}`, `{n,}` or `{n,m}` at the cursor without consuming it.
    ///
    /// Returns the bounds and the number of characters the quantifier spans.
    fn scan_braces(&self) -> Option<(u32, Option<u32>, usize)> {
        let mut i = 1;
        let digits = |i: &mut usize| -> Option<u32> {
            let mut v: Option<u32> = None;
            while let Some(d) = self.peek_at(*i).and_then(|c| c.to_digit(10)) {
                v = Some(v.unwrap_or(0).saturating_mul(10).saturating_add(d));
                *i += 1;
            }
            v
        };
        let min = digits(&mut i)?;
        let max = if self.peek_at(i) == Some(',') {
            i += 1;
            digits(&mut i)
        } else {
            Some(min)
        };
        (self.peek_at(i) == Some('}')).then_some((min, max, i + 1))
    }

    fn parse_repeat(&mut self) -> Result<Option<Repeat>, SyntaxError> {
        let start = self.offset();
        let (min, max) = match self.peek() {
            Some('*') => {
                self.pos += 1;
                (0, None)
            }
            Some('+') => {
                self.pos += 1;
                (1, None)
            }
            Some('?') => {
                self.pos += 1;
                (0, Some(1))
            }
            Some('{') => match self.scan_braces() {
                Some((min, max, len)) => {
                    self.pos += len;
                    if max.is_some_and(|max| max < min) {
                        return Err(SyntaxError::new(
                            start,
                            format!("numbers out of order in {{{min},{}}}", max.unwrap_or(min)),
                        ));
                    }
                    (min, max)
                }
                None => return Ok(None),
            },
            _ => return Ok(None),
        };
        let greedy = !self.consume('?');
        Ok(Some(Repeat { min, max, greedy }))
    }
}

enum SetTerminal {
    Char(SetChar),
    Class(Escape),
}

fn can_merge(prev: &MatchFragment, next: &MatchFragment) -> bool {
    prev.repeat.is_none()
        && next.repeat.is_none()
        && matches!(prev.content, Content::Literal(_))
        && matches!(next.content, Content::Literal(_))
}

fn merge_literal(prev: &mut MatchFragment, next: MatchFragment) {
    if let (Content::Literal(a), Content::Literal(b)) = (&mut prev.content, next.content) {
        a.text.push_str(&b.text);
        a.redundant_escapes.extend(b.redundant_escapes);
        prev.span.end = next.span.end;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/syntax/parser.rs"]
mod tests;
