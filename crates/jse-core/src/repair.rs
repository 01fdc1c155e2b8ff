//! # Heuristic Syntax Repair
//!
//! Fixes the syntax mistakes that machine-generated JSON most often
//! contains, so a near-miss document can still reach the schema stage:
//!
//! 1. A Markdown code fence around the document is stripped.
//! 2. Adjacent values with no separator (`"a" "b"`, `1 "k"`, `} {`) get a
//!    comma inserted between them.
//! 3. Trailing commas before `}` or `]` are removed.
//! 4. An unterminated string is closed, then unclosed `[`/`{` are closed in
//!    nesting order.
//!
//! The scanner tracks string literals, so text inside a JSON string is never
//! altered. Well-formed JSON passes through unchanged.
//!
//! Repair is opt-in. The engine only calls it when the caller asks.

/// Counters for the fixes applied by one [`repair`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Fixes {
    fence: bool,
    commas_inserted: usize,
    commas_removed: usize,
    strings_closed: usize,
    brackets_closed: usize,
    stray_closers: usize,
}

impl Fixes {
    fn any(&self) -> bool {
        *self != Fixes::default()
    }
}

/// Repair common JSON syntax mistakes in `raw`.
///
/// Total: always returns a string, which may still fail to parse if the
/// damage is beyond these heuristics.
pub fn repair(raw: &str) -> String {
    let mut fixes = Fixes::default();
    let body = strip_code_fence(raw.trim(), &mut fixes);
    let repaired = Scanner::new(body.len()).run(body, &mut fixes);

    if fixes.any() {
        tracing::debug!(
            fence = fixes.fence,
            commas_inserted = fixes.commas_inserted,
            commas_removed = fixes.commas_removed,
            strings_closed = fixes.strings_closed,
            brackets_closed = fixes.brackets_closed,
            stray_closers = fixes.stray_closers,
            "heuristic repair applied"
        );
    }
    repaired
}

/// Keep only the body of a ```` ```json ```` fence, if there is one.
fn strip_code_fence<'a>(text: &'a str, fixes: &mut Fixes) -> &'a str {
    let Some(start) = text.find("```") else {
        return text;
    };
    fixes.fence = true;
    let rest = &text[start + 3..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let end = rest.find("```").unwrap_or(rest.len());
    rest[..end].trim()
}

struct Scanner {
    out: String,
    /// Closers owed for every open `{` / `[`, innermost last.
    open: Vec<char>,
    /// Byte index in `out` of a comma not yet followed by a value.
    pending_comma: Option<usize>,
    /// The last significant token completed a value.
    after_value: bool,
}

impl Scanner {
    fn new(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity + 8),
            open: Vec::new(),
            pending_comma: None,
            after_value: false,
        }
    }

    fn run(mut self, body: &str, fixes: &mut Fixes) -> String {
        let mut chars = body.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '"' => {
                    self.begin_value(fixes);
                    self.out.push('"');
                    let mut escaped = false;
                    let mut closed = false;
                    for s in chars.by_ref() {
                        self.out.push(s);
                        if escaped {
                            escaped = false;
                        } else if s == '\\' {
                            escaped = true;
                        } else if s == '"' {
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        self.out.push('"');
                        fixes.strings_closed += 1;
                    }
                    self.after_value = true;
                }
                '{' | '[' => {
                    self.begin_value(fixes);
                    self.out.push(c);
                    self.open.push(if c == '{' { '}' } else { ']' });
                    self.after_value = false;
                }
                '}' | ']' => self.close(c, fixes),
                ',' => {
                    if self.pending_comma.is_some() {
                        // Doubled comma: keep the first.
                        fixes.commas_removed += 1;
                        continue;
                    }
                    self.pending_comma = Some(self.out.len());
                    self.out.push(',');
                    self.after_value = false;
                }
                ':' => {
                    self.out.push(':');
                    self.after_value = false;
                }
                c if is_literal_start(c) => {
                    self.begin_value(fixes);
                    self.out.push(c);
                    while let Some(&next) = chars.peek() {
                        if !is_literal_char(next) {
                            break;
                        }
                        self.out.push(next);
                        chars.next();
                    }
                    self.after_value = true;
                }
                c if c.is_whitespace() => self.out.push(c),
                other => {
                    self.out.push(other);
                    self.after_value = false;
                }
            }
        }

        self.drop_pending_comma(fixes);
        while let Some(closer) = self.open.pop() {
            self.out.push(closer);
            fixes.brackets_closed += 1;
        }
        self.out
    }

    /// A value token is about to be written.
    fn begin_value(&mut self, fixes: &mut Fixes) {
        if self.after_value {
            self.out.push_str(", ");
            fixes.commas_inserted += 1;
        }
        self.pending_comma = None;
    }

    fn close(&mut self, closer: char, fixes: &mut Fixes) {
        if !self.open.contains(&closer) {
            fixes.stray_closers += 1;
            return;
        }
        self.drop_pending_comma(fixes);
        while let Some(owed) = self.open.pop() {
            self.out.push(owed);
            if owed == closer {
                break;
            }
            fixes.brackets_closed += 1;
        }
        self.after_value = true;
    }

    fn drop_pending_comma(&mut self, fixes: &mut Fixes) {
        if let Some(at) = self.pending_comma.take() {
            self.out.remove(at);
            fixes.commas_removed += 1;
        }
    }
}

fn is_literal_start(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c.is_ascii_alphabetic()
}

fn is_literal_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-')
}
