//! Template parameter/argument list recognition.
//!
//! A `<` is only treated as list-opening when the preceding token
//! makes a list plausible and a bounded lookahead finds a matching
//! `>`. Anything else leaves `<` as the comparison operator it
//! already is; that fallback is expected in valid code and carries
//! no diagnostic.

use crate::span::SpanCategory;
use crate::token::{Token, TokenKind};

/// Significant-token budget for the closing-`>` search. A list
/// that long is not something a fontifier needs to get right.
const LOOKAHEAD_BUDGET: usize = 256;

/// What kind of list a candidate `<` would open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TemplateTrigger {
    /// `<` directly after the `template` keyword.
    ParamList,
    /// `<` directly after an identifier that is heuristically a
    /// template name.
    ArgList,
}

impl TemplateTrigger {
    pub(crate) const fn category(self) -> SpanCategory {
        match self {
            Self::ParamList => SpanCategory::TemplateParamList,
            Self::ArgList => SpanCategory::TemplateArgList,
        }
    }
}

/// Classify the context of a `<` from the preceding significant
/// token.
pub(crate) fn trigger(prev: Option<&Token>, source: &str) -> Option<TemplateTrigger> {
    let prev = prev?;
    match prev.kind {
        TokenKind::Keyword if prev.text(source) == "template" => Some(TemplateTrigger::ParamList),
        TokenKind::Identifier => Some(TemplateTrigger::ArgList),
        _ => None,
    }
}

/// Look ahead from the `<` at `open_idx` for its matching `>`.
///
/// Returns the end offset of the close on success. Angle depth is
/// tracked only outside parentheses and square brackets (so
/// `sizeof...(Args)` or comparisons inside a call never confuse
/// it), `>>` counts as two closes (`A<B<C>>` needs no space), and
/// the search bails out on tokens inconsistent with a list: `;`,
/// braces, shift/compound comparison operators, a preprocessor
/// line, an unbalanced `)` or `]`, the lookahead budget, or
/// end-of-input.
pub(crate) fn find_close(source: &str, tokens: &[Token], open_idx: usize) -> Option<usize> {
    let mut angle = 1usize;
    let mut nested = 0usize;
    let mut budget = LOOKAHEAD_BUDGET;
    for tok in &tokens[open_idx + 1..] {
        if !tok.kind.is_significant() {
            continue;
        }
        budget -= 1;
        if budget == 0 {
            return None;
        }
        match tok.kind {
            TokenKind::Punctuation => match tok.text(source) {
                "(" | "[" => nested += 1,
                ")" | "]" => {
                    if nested == 0 {
                        return None;
                    }
                    nested -= 1;
                }
                ";" | "{" | "}" => return None,
                _ => {}
            },
            TokenKind::Operator if nested == 0 => match tok.text(source) {
                "<" => angle += 1,
                ">" => {
                    angle -= 1;
                    if angle == 0 {
                        return Some(tok.end);
                    }
                }
                ">>" => {
                    // Two closes; if only one level is open the
                    // first half closes it and the second half
                    // belongs to an enclosing list.
                    if angle == 1 {
                        return Some(tok.start + 1);
                    }
                    angle -= 2;
                    if angle == 0 {
                        return Some(tok.end);
                    }
                }
                "<=" | ">=" | "<<" | "<<=" | ">>=" | "<=>" | "||" => return None,
                _ => {}
            },
            TokenKind::Preprocessor => return None,
            _ => {}
        }
    }
    None
}
