pub mod emit;
pub mod error;
pub mod inst;
pub mod label;
pub mod literal;
pub mod operand;
pub mod parser;
pub mod resolve;
pub mod source;
pub mod util;

pub use error::{Error, Located};
pub use inst::Instruction;
pub use label::SymbolTable;
pub use operand::Operand;
pub use parser::{parse_lines, Stmt};
pub use resolve::{Element, Program};
pub use source::Source;

/// A fully resolved program and its output.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub program: Program,
    pub symbols: SymbolTable,
    /// One hex string per instruction, in program order.
    pub hex: Vec<String>,
}

/// Runs the whole pipeline: construction, label resolution, emission.
pub fn assemble(stmts: &[Stmt]) -> Result<Assembly, Located> {
    let mut program = Program::build(stmts)?;
    let symbols = program.resolve()?;
    let hex = program
        .elements()
        .iter()
        .enumerate()
        .filter_map(|(idx, elem)| match elem {
            Element::Instruction(inst) => Some(inst.to_hex().map_err(|e| e.at(idx))),
            Element::Label(_) => None,
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Assembly {
        program,
        symbols,
        hex,
    })
}

impl Assembly {
    /// Raw machine code of the whole program.
    pub fn bytes(&self) -> Result<Vec<u8>, Located> {
        let mut bin = vec![];
        for (idx, elem) in self.program.elements().iter().enumerate() {
            if let Element::Instruction(inst) = elem {
                bin.extend(inst.to_bytes().map_err(|e| e.at(idx))?);
            }
        }
        Ok(bin)
    }

    pub fn cycles(&self) -> u32 {
        self.program
            .instructions()
            .filter_map(|inst| inst.resolved())
            .map(|r| r.encoding.cycles as u32)
            .sum()
    }
}
