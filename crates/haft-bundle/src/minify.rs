//! Comment stripping for manifest files.
//!
//! Author-supplied `metadata.json` files may carry `//` and `/* */`
//! comments; they are removed before the JSON is parsed. String literals
//! are left untouched.

pub(crate) fn strip_comments(input: &str) -> String {
    enum State {
        Code,
        InString { escaped: bool },
        LineComment,
        BlockComment { prev_star: bool },
    }

    let mut out = String::with_capacity(input.len());
    let mut state = State::Code;

    for c in input.chars() {
        state = match state {
            State::Code => match c {
                '"' => {
                    out.push(c);
                    State::InString { escaped: false }
                }
                '/' => State::LineComment, // provisional, fixed up below
                _ => {
                    out.push(c);
                    State::Code
                }
            },
            // A lone '/' began a comment candidate; decide which kind.
            State::LineComment => match c {
                '/' => State::LineComment,
                '*' => State::BlockComment { prev_star: false },
                '\n' => {
                    out.push(c);
                    State::Code
                }
                _ => State::LineComment,
            },
            State::BlockComment { prev_star } => match c {
                '/' if prev_star => State::Code,
                '*' => State::BlockComment { prev_star: true },
                _ => State::BlockComment { prev_star: false },
            },
            State::InString { escaped } => {
                out.push(c);
                match c {
                    '\\' if !escaped => State::InString { escaped: true },
                    '"' if !escaped => State::Code,
                    _ => State::InString { escaped: false },
                }
            }
        };
    }

    out
}
