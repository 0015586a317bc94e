//! Bracket balance lint for the site's scripts
//!
//! Skips string literals (`'`, `"` and backticks, with escapes), line comments
//! and block comments. Strings and block comments carry over line breaks; a
//! line comment ends with its line.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub ch: char,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BraceReport {
    Balanced,
    ExtraClosing { ch: char, line: usize },
    Mismatched { open: Bracket, found: Bracket },
    Unclosed(Vec<Bracket>),
}

impl BraceReport {
    pub fn is_balanced(&self) -> bool {
        matches!(self, BraceReport::Balanced)
    }
}

impl fmt::Display for BraceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BraceReport::Balanced => {
                write!(f, "No unmatched braces, brackets, or parentheses detected.")
            }
            BraceReport::ExtraClosing { ch, line } => {
                write!(f, "Extra closing '{ch}' at line {line}")
            }
            BraceReport::Mismatched { open, found } => write!(
                f,
                "Mismatched '{}' at line {}, found '{}' at line {}",
                open.ch, open.line, found.ch, found.line
            ),
            BraceReport::Unclosed(open) => {
                let list: Vec<String> = open
                    .iter()
                    .map(|b| format!("'{}' at line {}", b.ch, b.line))
                    .collect();
                write!(f, "Unclosed: {}", list.join(", "))
            }
        }
    }
}

fn closer_for(open: char) -> Option<char> {
    match open {
        '{' => Some('}'),
        '[' => Some(']'),
        '(' => Some(')'),
        _ => None,
    }
}

fn is_closer(ch: char) -> bool {
    matches!(ch, '}' | ']' | ')')
}

pub fn check_braces(text: &str) -> BraceReport {
    let mut stack: Vec<Bracket> = Vec::new();
    let mut string_quote: Option<char> = None;
    let mut escape = false;
    let mut in_block_comment = false;

    for (index, line) in text.split('\n').enumerate() {
        let line_no = index + 1;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            let next = chars.peek().copied();

            if in_block_comment {
                if ch == '*' && next == Some('/') {
                    in_block_comment = false;
                    chars.next();
                }
                continue;
            }

            if let Some(quote) = string_quote {
                if escape {
                    escape = false;
                } else if ch == '\\' {
                    escape = true;
                } else if ch == quote {
                    string_quote = None;
                }
                continue;
            }

            match (ch, next) {
                ('/', Some('/')) => break,
                ('/', Some('*')) => {
                    in_block_comment = true;
                    chars.next();
                    continue;
                }
                ('\'' | '"' | '`', _) => {
                    string_quote = Some(ch);
                    continue;
                }
                _ => {}
            }

            if closer_for(ch).is_some() {
                stack.push(Bracket { ch, line: line_no });
            } else if is_closer(ch) {
                let Some(open) = stack.pop() else {
                    return BraceReport::ExtraClosing { ch, line: line_no };
                };
                if closer_for(open.ch) != Some(ch) {
                    return BraceReport::Mismatched {
                        open,
                        found: Bracket { ch, line: line_no },
                    };
                }
            }
        }
    }

    if stack.is_empty() {
        BraceReport::Balanced
    } else {
        BraceReport::Unclosed(stack)
    }
}
