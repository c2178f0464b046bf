use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::Error;
use crate::parser::Stmt;

/// Where a statement came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pos {
    pub file: String,
    /// 0-based
    pub line: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line + 1)
    }
}

#[derive(Debug)]
pub struct ReadError {
    pub error: Error,
    /// Line that caused it, `None` for the main file itself.
    pub pos: Option<Pos>,
}

/// Flattened program text: includes expanded in place.
#[derive(Debug, Default)]
pub struct Source {
    /// Raw lines of every file read, for diagnostics.
    pub files: IndexMap<String, Vec<String>>,
    pub stmts: Vec<Stmt>,
    /// `pos[i]` is the origin of `stmts[i]`.
    pub pos: Vec<Pos>,
}

impl Source {
    pub fn read(path: &Path) -> Result<Source, ReadError> {
        let mut source = Source::default();
        source.load(path)?;
        Ok(source)
    }

    /// Appends `path` and everything it includes. On failure the lines read so
    /// far stay in `files`, so the failing line can still be shown.
    pub fn load(&mut self, path: &Path) -> Result<(), ReadError> {
        let mut stack = vec![];
        self.expand(path, &mut stack, None)
    }

    fn expand(
        &mut self,
        path: &Path,
        stack: &mut Vec<PathBuf>,
        from: Option<&Pos>,
    ) -> Result<(), ReadError> {
        let name = path.display().to_string();
        let fail = |error: Error| ReadError {
            error,
            pos: from.cloned(),
        };

        let file = File::open(path).map_err(|e| fail(Error::FileOpen(name.clone(), e)))?;
        let canonical = path
            .canonicalize()
            .map_err(|e| fail(Error::FileOpen(name.clone(), e)))?;
        if stack.contains(&canonical) {
            return Err(fail(Error::IncludeCycle(name.clone())));
        }

        let mut lines = vec![];
        for line in BufReader::new(file).lines() {
            lines.push(line.map_err(|e| fail(Error::FileRead(name.clone(), e)))?);
        }
        self.files.insert(name.clone(), lines.clone());

        stack.push(canonical);
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        for (idx, raw) in lines.iter().enumerate() {
            let pos = Pos {
                file: name.clone(),
                line: idx,
            };
            let stmt = Stmt::parse(raw).map_err(|error| ReadError {
                error,
                pos: Some(pos.clone()),
            })?;
            match stmt {
                Some(Stmt::Include(inc)) => self.expand(&dir.join(inc), stack, Some(&pos))?,
                Some(stmt) => {
                    self.stmts.push(stmt);
                    self.pos.push(pos);
                }
                None => {}
            }
        }
        stack.pop();
        Ok(())
    }
}
