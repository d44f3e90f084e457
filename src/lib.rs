//! C/C++ lexical tokenizer and structural scanner for
//! fontification engines.
//!
//! Given one immutable text buffer, the scanner produces a
//! contiguous token sequence, a set of classified spans (lambda
//! introducers, capture lists, parameter lists, trailing return
//! types, exception specifications, attributes, lambda bodies, and
//! template parameter/argument lists), and diagnostics for every
//! recoverable oddity it met along the way. Nothing here is fatal:
//! malformed or truncated fragments degrade highlighting accuracy,
//! never crash the scan.
//!
//! # Quick start
//!
//! ## Tokenize and round-trip
//!
//! ```
//! use cppscan_rs::tokenize;
//!
//! let input = "auto f = [&total](int x) { total += x; };";
//! let lexed = tokenize(input);
//! let rebuilt: String = lexed.tokens.iter().map(|t| t.text(input)).collect();
//! assert_eq!(rebuilt, input);
//! ```
//!
//! ## Scan for structural spans
//!
//! ```
//! use cppscan_rs::{SpanCategory, scan};
//!
//! let input = "[this](int x) -> char * { return s; };";
//! let result = scan(input);
//! let ret = result
//!     .spans
//!     .iter()
//!     .find(|s| s.category == SpanCategory::TrailingReturnType)
//!     .unwrap();
//! assert_eq!(ret.text(input), "-> char *");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod brackets;
pub mod diagnostics;
mod lambda;
pub mod lexer;
pub mod scanner;
pub mod span;
pub mod stream;
mod template;
pub mod token;

pub use brackets::{BracketFrame, BracketMatcher};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use lexer::{Lexed, Lexer, tokenize, tokenize_from};
pub use scanner::{ScanResult, ScanStatus, Scanner, scan};
pub use span::{Span, SpanCategory};
pub use stream::CharStream;
pub use token::{Token, TokenKind};
