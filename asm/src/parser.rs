use arch::Mnemonic;

use crate::error::{Error, Located};

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `name:` on a line of its own
    Label(String),
    /// `[name:] OP [operand]`
    Inst {
        label: Option<String>,
        op: Mnemonic,
        operand: Option<String>,
    },
    /// `Include file`
    Include(String),
}

const LABEL_MAX: usize = 32;

fn is_label(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(head) if head.is_ascii_alphabetic() => {}
        _ => return false,
    }
    s.len() <= LABEL_MAX && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_operand(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || "#%$(),_".contains(c))
}

fn is_filename(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || "_./-".contains(c))
}

impl Stmt {
    /// Parses one source line. Blank and comment-only lines give `None`.
    pub fn parse(line: &str) -> Result<Option<Stmt>, Error> {
        let code = match line.split_once(';') {
            Some((code, _comment)) => code,
            None => line,
        };
        let mut words: Vec<&str> = code.split_whitespace().collect();

        if words.is_empty() {
            return Ok(None);
        }

        // main: / main:CLC
        let mut label = None;
        let first = words[0];
        if let Some((name, rest)) = first.split_once(':') {
            if !is_label(name) {
                return Err(Error::SyntaxError(first.to_string()));
            }
            label = Some(name.to_string());
            if rest.is_empty() {
                words.remove(0);
            } else {
                words[0] = rest;
            }
        }

        let (head, args) = match words.split_first() {
            Some(split) => split,
            None => {
                return Ok(label.map(Stmt::Label));
            }
        };

        // Include other.asm
        if head.eq_ignore_ascii_case("include") {
            return match (label, args) {
                (None, [file]) if is_filename(file) => Ok(Some(Stmt::Include(file.to_string()))),
                _ => Err(Error::SyntaxError(code.trim().to_string())),
            };
        }

        if !head.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::SyntaxError(head.to_string()));
        }
        let op = Mnemonic::parse(head).map_err(|_| Error::UnknownMnemonic(head.to_string()))?;

        let operand = match args {
            [] => None,
            [arg] if is_operand(arg) => Some(arg.to_string()),
            _ => return Err(Error::SyntaxError(args.join(" "))),
        };

        Ok(Some(Stmt::Inst { label, op, operand }))
    }
}

/// Tokenizes a whole text without include expansion. Errors carry the line index.
pub fn parse_lines(text: &str) -> Result<Vec<Stmt>, Located> {
    let mut stmts = vec![];
    for (idx, line) in text.lines().enumerate() {
        if let Some(stmt) = Stmt::parse(line).map_err(|e| e.at(idx))? {
            stmts.push(stmt);
        }
    }
    Ok(stmts)
}
