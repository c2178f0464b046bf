use arch::{AddressingMode, Mnemonic};
use color_print::cprintln;
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot parse `{0}` as a binary, decimal or hexadecimal literal")]
    MalformedLiteral(String),

    #[error("`{0}` does not fit in 16 bits")]
    OperandOutOfRange(String),

    #[error("Operand `0x{value:04X}` of {op} does not fit in its {width}-byte slot")]
    OperandOverflow { op: Mnemonic, value: u16, width: u8 },

    #[error("{0} does not support {1} addressing")]
    UnsupportedAddressingMode(Mnemonic, AddressingMode),

    #[error("{0} is not implemented yet")]
    UnimplementedMnemonic(Mnemonic),

    #[error("Re-defined label: `{0}`")]
    DuplicateLabel(String),

    #[error("Undefined label: `{0}`")]
    UndefinedLabel(String),

    #[error("Internal error: {0}")]
    MalformedInstruction(String),

    #[error("Syntax Error: cannot parse `{0}`")]
    SyntaxError(String),

    #[error("Unknown operation: `{0}`")]
    UnknownMnemonic(String),

    #[error("Include cycle: `{0}` includes itself")]
    IncludeCycle(String),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line of {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to serialize symbol table")]
    SymbolExport(#[from] serde_yaml::Error),
}

/// An [`Error`] raised while handling the element at `index` of a program.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct Located {
    pub index: usize,
    #[source]
    pub error: Error,
}

impl Error {
    pub fn at(self, index: usize) -> Located {
        Located { index, error: self }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, files: &IndexMap<String, Vec<String>>, file: &str, line_idx: usize) {
        cprintln!("<red,bold>error</>: {}", self);

        // line_idx is 0-based, display as 1-based
        let line_num = line_idx + 1;
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        cprintln!("      <blue>|</>");

        let line_content = files
            .get(file)
            .and_then(|lines| lines.get(line_idx))
            .map(|s| s.as_str())
            .unwrap_or("");

        cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
        cprintln!("      <blue>|</>");
    }

    /// Print error that has no source location
    pub fn print(&self) {
        cprintln!("<red,bold>error</>: {}", self);
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            cprintln!("  <blue>caused by</>: {}", cause);
            source = cause.source();
        }
    }
}
