//! `CssDocument`: a rope-backed `TokenSource` for plain CSS text.
//!
//! Mimics a line-oriented editor highlighter. Each line is tokenized from
//! column 0 with the lexer state left over from the previous line, so
//! property names, values and multi-line comments classify the same way an
//! editor would show them.

use crate::position::{Position, Selection};
use crate::token::{Token, TokenClass, TokenSource};
use ropey::Rope;

/// Lexer state carried from one line to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LexState {
    /// Block nesting depth.
    depth: u32,
    /// Past the `:` of the current declaration.
    in_value: bool,
    /// Inside an unterminated `/* ... */`.
    in_comment: bool,
}

/// A CSS document with a current selection.
#[derive(Debug, Clone)]
pub struct CssDocument {
    rope: Rope,
    /// Lexer state at the start of each line.
    line_states: Vec<LexState>,
    selection: Selection,
}

impl CssDocument {
    pub fn new(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let mut line_states = Vec::with_capacity(rope.len_lines());
        let mut state = LexState::default();
        for line in 0..rope.len_lines() {
            line_states.push(state);
            let chars = line_chars(&rope, line);
            let mut pos = 0;
            while pos < chars.len() {
                let (end, _) = next_token(&chars, pos, &mut state);
                pos = end;
            }
        }
        Self {
            rope,
            line_states,
            selection: Selection::default(),
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn set_cursor(&mut self, at: Position) {
        self.selection = Selection::cursor(at);
    }

    /// Every token on `line`, in order.
    pub fn line_tokens(&self, line: usize) -> Vec<Token> {
        let Some(&start_state) = self.line_states.get(line) else {
            return Vec::new();
        };
        let chars = line_chars(&self.rope, line);
        let mut state = start_state;
        let mut tokens = Vec::new();
        let mut pos = 0;
        while pos < chars.len() {
            let (end, class) = next_token(&chars, pos, &mut state);
            tokens.push(Token::new(pos, end, collect(&chars[pos..end]), class));
            pos = end;
        }
        tokens
    }
}

impl TokenSource for CssDocument {
    fn token_at(&self, pos: Position) -> Token {
        let Some(&start_state) = self.line_states.get(pos.line) else {
            return Token::empty();
        };
        let chars = line_chars(&self.rope, pos.line);
        let mut state = start_state;
        let mut token = Token::empty();
        let mut cursor = 0;
        while cursor < pos.ch && cursor < chars.len() {
            let (end, class) = next_token(&chars, cursor, &mut state);
            token = Token::new(cursor, end, collect(&chars[cursor..end]), class);
            cursor = end;
        }
        log::trace!("token_at {pos} -> {token:?}");
        token
    }

    fn line_text(&self, line: usize) -> String {
        collect(&line_chars(&self.rope, line))
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn line_len(&self, line: usize) -> usize {
        line_chars(&self.rope, line).len()
    }
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

/// Characters of `line` without the trailing line break.
fn line_chars(rope: &Rope, line: usize) -> Vec<char> {
    if line >= rope.len_lines() {
        return Vec::new();
    }
    let mut chars: Vec<char> = rope.line(line).chars().collect();
    while matches!(chars.last(), Some('\n' | '\r')) {
        chars.pop();
    }
    chars
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn starts_number(chars: &[char], pos: usize) -> bool {
    let digit_at = |i: usize| chars.get(i).is_some_and(char::is_ascii_digit);
    match chars[pos] {
        c if c.is_ascii_digit() => true,
        '.' => digit_at(pos + 1),
        '+' | '-' => digit_at(pos + 1) || (chars.get(pos + 1) == Some(&'.') && digit_at(pos + 2)),
        _ => false,
    }
}

/// Scan one token starting at `pos`. Returns its exclusive end and class.
fn next_token(chars: &[char], pos: usize, state: &mut LexState) -> (usize, TokenClass) {
    if state.in_comment {
        return (scan_comment_body(chars, pos, state), TokenClass::Comment);
    }

    let c = chars[pos];
    if c.is_whitespace() {
        let end = scan_while(chars, pos, char::is_whitespace);
        return (end, TokenClass::Untyped);
    }
    if c == '/' && chars.get(pos + 1) == Some(&'*') {
        state.in_comment = true;
        return (scan_comment_body(chars, pos + 2, state), TokenClass::Comment);
    }

    match c {
        '{' => {
            state.depth += 1;
            state.in_value = false;
            (pos + 1, TokenClass::Untyped)
        }
        '}' => {
            state.depth = state.depth.saturating_sub(1);
            state.in_value = false;
            (pos + 1, TokenClass::Untyped)
        }
        ';' => {
            state.in_value = false;
            (pos + 1, TokenClass::Untyped)
        }
        ':' => {
            if state.depth > 0 {
                state.in_value = true;
            }
            (pos + 1, TokenClass::Untyped)
        }
        '(' | ')' | ',' => (pos + 1, TokenClass::Untyped),
        '"' | '\'' => {
            let mut end = pos + 1;
            while end < chars.len() && chars[end] != c {
                end += if chars[end] == '\\' { 2 } else { 1 };
            }
            ((end + 1).min(chars.len()), TokenClass::String)
        }
        _ if starts_number(chars, pos) => {
            let mut end = pos;
            if matches!(chars[end], '+' | '-') {
                end += 1;
            }
            end = scan_while(chars, end, |c| c.is_ascii_digit() || c == '.');
            end = scan_while(chars, end, |c| c.is_alphabetic() || c == '%');
            (end, TokenClass::Number)
        }
        _ if is_word_char(c) || c == '#' || c == '@' => {
            let end = scan_while(chars, pos + 1, is_word_char);
            (end, classify_word(state))
        }
        _ => (pos + 1, TokenClass::Punctuation),
    }
}

fn classify_word(state: &LexState) -> TokenClass {
    match (state.depth, state.in_value) {
        (0, _) => TokenClass::Selector,
        (_, false) => TokenClass::Identifier,
        (_, true) => TokenClass::Keyword,
    }
}

/// Scan to just past `*/`, or to end of line if the comment stays open.
fn scan_comment_body(chars: &[char], from: usize, state: &mut LexState) -> usize {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
            state.in_comment = false;
            return i + 2;
        }
        i += 1;
    }
    chars.len()
}

fn scan_while(chars: &[char], from: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut end = from;
    while end < chars.len() && pred(chars[end]) {
        end += 1;
    }
    end
}
