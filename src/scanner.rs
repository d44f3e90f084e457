//! The single forward pass that drives the recognizers.
//!
//! The scanner owns everything a scan needs: the token buffer,
//! the bracket stack, and the stack of lambda contexts. No state
//! crosses scan invocations, so independent documents can be
//! scanned concurrently from multiple threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::brackets::{BracketEffect, BracketMatcher, CloseOutcome};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::lambda::{self, LambdaContext, Offered, Step};
use crate::lexer::{Lexed, tokenize_from};
use crate::span::Span;
use crate::template;
use crate::token::{Token, TokenKind};

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// The whole buffer was scanned.
    Complete,
    /// The cancellation flag was observed; the result holds
    /// everything completed up to that point.
    Cancelled,
}

/// Output of a scan: the token sequence, the classified spans in
/// source order (outer before inner at equal starts), and every
/// recoverable condition encountered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub spans: Vec<Span>,
    pub diagnostics: Vec<Diagnostic>,
    pub status: ScanStatus,
}

/// Scan a source buffer with default options.
#[must_use]
pub fn scan(input: &str) -> ScanResult {
    Scanner::new(input).scan()
}

/// A configured scan over one immutable buffer.
///
/// ```
/// use cppscan_rs::{Scanner, SpanCategory};
///
/// let result = Scanner::new("auto f = [x](int y) { return x + y; };").scan();
/// assert!(
///     result
///         .spans
///         .iter()
///         .any(|s| s.category == SpanCategory::LambdaBody)
/// );
/// ```
#[derive(Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            line: 1,
            cancel: None,
        }
    }

    /// Start scanning at `offset`, reporting positions relative to
    /// `line`. Used to re-scan a sub-region when only part of a
    /// buffer changed.
    #[must_use]
    pub const fn from_offset(mut self, offset: usize, line: usize) -> Self {
        self.offset = offset;
        self.line = line;
        self
    }

    /// Install a cancellation flag, polled between token
    /// productions.
    #[must_use]
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    #[must_use]
    pub fn scan(self) -> ScanResult {
        let Lexed {
            tokens,
            mut diagnostics,
        } = tokenize_from(self.input, self.offset, self.line);

        let mut brackets = BracketMatcher::new();
        let mut stack: Vec<LambdaContext> = Vec::new();
        let mut spans: Vec<Span> = Vec::new();
        let mut prev_sig: Option<usize> = None;
        // End offset of the furthest recognised template argument
        // list; commas before this point belong to template
        // arguments, not capture lists.
        let mut template_guard = 0usize;
        let mut status = ScanStatus::Complete;

        for idx in 0..tokens.len() {
            if self
                .cancel
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
            {
                status = ScanStatus::Cancelled;
                break;
            }
            let tok = &tokens[idx];
            if !tok.kind.is_significant() {
                continue;
            }
            let text = tok.text(self.input);

            let effect = Self::bracket_effect(&mut brackets, &mut diagnostics, tok, text, idx);
            let depth = brackets.depth();

            if tok.kind == TokenKind::Operator && text == "<" {
                if let Some(end) =
                    self.recognize_template(&tokens, prev_sig, idx, &mut spans, &mut diagnostics)
                {
                    template_guard = template_guard.max(end);
                }
            }
            let in_template_args = tok.start < template_guard;

            // `[[` opens an attribute block, never a capture list.
            let adjacent_open = tokens.get(idx + 1).is_some_and(|next| {
                next.start == tok.end
                    && next.kind == TokenKind::Punctuation
                    && next.text(self.input) == "["
            });

            let offered = Offered {
                tok,
                idx,
                effect,
                depth,
                adjacent_open,
                in_template_args,
            };

            loop {
                let Some(ctx) = stack.last_mut() else {
                    self.try_start_lambda(&tokens, prev_sig, &offered, &mut stack);
                    break;
                };
                match ctx.on_token(self.input, &offered, &mut spans) {
                    Step::Consumed => break,
                    Step::Ignored => {
                        self.try_start_lambda(&tokens, prev_sig, &offered, &mut stack);
                        break;
                    }
                    Step::Done => {
                        let Some(done) = stack.pop() else { break };
                        if let Some(outer) = stack.last_mut() {
                            outer.note_nested(done.intro_start(), tok.end);
                        }
                        break;
                    }
                    Step::DoneRedispatch => {
                        let Some(done) = stack.pop() else { break };
                        let end = prev_sig.map_or(done.intro_start(), |p| tokens[p].end);
                        if let Some(outer) = stack.last_mut() {
                            outer.note_nested(done.intro_start(), end);
                        }
                        // same token, next context
                    }
                }
            }

            prev_sig = Some(idx);
        }

        if status == ScanStatus::Complete {
            let eof = self.input.len();
            let mut owned = Vec::new();
            for ctx in &stack {
                ctx.owned_open_indices(&mut owned);
            }
            while let Some(ctx) = stack.pop() {
                ctx.finish_at_eof(eof, &mut spans, &mut diagnostics);
            }
            for frame in brackets.into_unclosed() {
                if !owned.contains(&frame.token_index) {
                    let tok = &tokens[frame.token_index];
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::UnclosedBracket {
                            open: char::from(frame.open),
                        },
                        offset: tok.start,
                        line: tok.line,
                        column: tok.column,
                    });
                }
            }
        }

        // Source order, outer before inner at equal starts. The
        // order is deterministic, so scanning twice yields
        // identical output.
        spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        diagnostics.sort_by_key(|d| d.offset);

        ScanResult {
            tokens,
            spans,
            diagnostics,
            status,
        }
    }

    fn bracket_effect(
        brackets: &mut BracketMatcher,
        diagnostics: &mut Vec<Diagnostic>,
        tok: &Token,
        text: &str,
        idx: usize,
    ) -> BracketEffect {
        if tok.kind != TokenKind::Punctuation {
            return BracketEffect::Other;
        }
        match text {
            "(" | "[" | "{" => {
                brackets.open(text.as_bytes()[0], idx);
                BracketEffect::Open
            }
            ")" | "]" | "}" => match brackets.close(text.as_bytes()[0]) {
                CloseOutcome::Matched(frame) => BracketEffect::Close(frame),
                CloseOutcome::Mismatched { expected } => {
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::MismatchedBracket {
                            expected: char::from(expected),
                            found: text.chars().next().unwrap_or('?'),
                        },
                        offset: tok.start,
                        line: tok.line,
                        column: tok.column,
                    });
                    BracketEffect::Other
                }
                CloseOutcome::Stray => {
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::StrayBracket {
                            found: text.chars().next().unwrap_or('?'),
                        },
                        offset: tok.start,
                        line: tok.line,
                        column: tok.column,
                    });
                    BracketEffect::Other
                }
            },
            _ => BracketEffect::Other,
        }
    }

    fn recognize_template(
        &self,
        tokens: &[Token],
        prev_sig: Option<usize>,
        idx: usize,
        spans: &mut Vec<Span>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<usize> {
        let prev = prev_sig.map(|p| &tokens[p]);
        let kind = template::trigger(prev, self.input)?;
        let tok = &tokens[idx];
        if let Some(end) = template::find_close(self.input, tokens, idx) {
            spans.push(Span::new(kind.category(), tok.start, end));
            return Some(end);
        }
        // An identifier's `<` falls back to a comparison operator,
        // which is expected in valid code. After the `template`
        // keyword there is no such reading.
        if kind == template::TemplateTrigger::ParamList {
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::AmbiguousTemplate,
                offset: tok.start,
                line: tok.line,
                column: tok.column,
            });
        }
        None
    }

    fn try_start_lambda(
        &self,
        tokens: &[Token],
        prev_sig: Option<usize>,
        offered: &Offered<'_>,
        stack: &mut Vec<LambdaContext>,
    ) {
        let tok = offered.tok;
        if offered.effect != BracketEffect::Open
            || offered.adjacent_open
            || tok.kind != TokenKind::Punctuation
            || tok.text(self.input) != "["
        {
            return;
        }
        let prev = prev_sig.map(|p| &tokens[p]);
        if lambda::at_introducer_position(prev, self.input) {
            stack.push(LambdaContext::start(offered.idx, tok, offered.depth));
        }
    }
}
