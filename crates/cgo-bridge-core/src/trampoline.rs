//! Structural check of a rendered trampoline.
//!
//! The trampoline must define `cgo_rust_task_callback_bridge_<module>` with a body
//! that forwards `cb(taskData, status);`. A template whose body was dropped or
//! commented out still compiles, but every Go-side task completion would then be
//! lost silently, so such output is rejected here instead of being written.

use crate::descriptor::BridgeDescriptor;
use crate::error::{BridgeError, Result};

/// Status byte passed to a `RustTaskCallback` when the task ran.
pub const TASK_STATUS_SUCCESS: i8 = 0;
/// Status byte passed to a `RustTaskCallback` when the task was cancelled.
pub const TASK_STATUS_CANCELLED: i8 = 1;

/// Argument list and terminator of the forwarding call, with whitespace removed.
const FORWARDED_ARGS: &str = "(taskData,status);";

/// Check that `source` defines the trampoline for `descriptor` and forwards the call.
pub fn verify(source: &str, descriptor: &BridgeDescriptor) -> Result<()> {
    let symbol = descriptor.symbol_name();
    let code = strip_comments(source);

    let body = find_definition_body(&code, &symbol).ok_or_else(|| {
        BridgeError::TrampolineBodyMissing {
            symbol: symbol.clone(),
            missing: "a definition of the trampoline function",
        }
    })?;

    if !forwards_call(body) {
        return Err(BridgeError::TrampolineBodyMissing {
            symbol,
            missing: "the call-through `cb(taskData, status);`",
        });
    }

    Ok(())
}

/// Replace `//` and `/* */` comments with a single space, leaving string and
/// character literals untouched.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                out.push(' ');
            }
            '"' | '\'' => {
                out.push(c);
                let mut escaped = false;
                for inner in chars.by_ref() {
                    out.push(inner);
                    if escaped {
                        escaped = false;
                    } else if inner == '\\' {
                        escaped = true;
                    } else if inner == c {
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Find `symbol(...) { ... }` and return the text between the outer braces.
///
/// Prototypes (`symbol(...);`) and mere mentions of the symbol are skipped.
fn find_definition_body<'a>(code: &'a str, symbol: &str) -> Option<&'a str> {
    for (start, _) in code.match_indices(symbol) {
        let end = start + symbol.len();
        let before_ok = code[..start].chars().next_back().map_or(true, |c| !is_ident(c));
        let rest = &code[end..];
        let after_ok = rest.chars().next().map_or(true, |c| !is_ident(c));
        if !before_ok || !after_ok {
            continue;
        }

        let rest = rest.trim_start();
        let Some(params) = rest.strip_prefix('(') else {
            continue;
        };
        let Some(close) = matching(params, '(', ')') else {
            continue;
        };
        let after_params = params[close + 1..].trim_start();
        let Some(body) = after_params.strip_prefix('{') else {
            continue;
        };
        if let Some(close) = matching(body, '{', '}') {
            return Some(&body[..close]);
        }
    }

    None
}

/// Whether `body` calls `cb` itself (not `other_cb`, `x.cb` or `p->cb`) with the
/// arguments passed through unchanged.
fn forwards_call(body: &str) -> bool {
    body.match_indices("cb").any(|(start, _)| {
        let before = &body[..start];
        if before.chars().next_back().is_some_and(is_ident) {
            return false;
        }
        if before.trim_end().ends_with(['.', '>']) {
            return false;
        }
        let args: String = body[start + 2..]
            .chars()
            .filter(|c| !c.is_whitespace())
            .take(FORWARDED_ARGS.len())
            .collect();
        args == FORWARDED_ARGS
    })
}

fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte offset of the delimiter closing an already-consumed `open`.
fn matching(text: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in text.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}
