use indexmap::IndexMap;

use crate::error::{Error, Located};
use crate::inst::Instruction;
use crate::label::SymbolTable;
use crate::operand::Operand;
use crate::parser::Stmt;

/// One element of a program, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Label(String),
    Instruction(Instruction),
}

impl Element {
    /// Label defined by this element, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Element::Label(name) => Some(name),
            Element::Instruction(inst) => inst.label.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    elements: Vec<Element>,
}

impl Program {
    pub fn new() -> Self {
        Program { elements: vec![] }
    }

    /// Classifies and encodes tokenized statements. Element `i` of the
    /// program comes from statement `i`.
    pub fn build(stmts: &[Stmt]) -> Result<Program, Located> {
        let mut program = Program::new();
        for (idx, stmt) in stmts.iter().enumerate() {
            let elem = match stmt {
                Stmt::Label(name) => Element::Label(name.clone()),
                Stmt::Inst { label, op, operand } => {
                    let operand = Operand::from_field(operand.as_deref()).map_err(|e| e.at(idx))?;
                    let inst = Instruction::new(label.clone(), *op, operand).map_err(|e| e.at(idx))?;
                    Element::Instruction(inst)
                }
                Stmt::Include(file) => {
                    return Err(Error::MalformedInstruction(format!(
                        "include of `{file}` was not expanded"
                    ))
                    .at(idx))
                }
            };
            program.elements.push(elem);
        }
        Ok(program)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.elements.iter().filter_map(|elem| match elem {
            Element::Instruction(inst) => Some(inst),
            Element::Label(_) => None,
        })
    }

    pub fn is_resolved(&self) -> bool {
        self.instructions().all(|inst| inst.is_resolved())
    }

    /// Runs both passes: label addresses first, then substitution into operands.
    ///
    /// Running it again on a resolved program changes nothing and yields the
    /// same table.
    pub fn resolve(&mut self) -> Result<SymbolTable, Located> {
        self.check_labels()?;
        let symbols = self.assign_addresses()?;
        self.substitute(&symbols)?;
        Ok(symbols)
    }

    /// Fails on the second definition of a name, then on the first reference
    /// to a name that is never defined.
    fn check_labels(&self) -> Result<(), Located> {
        let mut known: IndexMap<&str, usize> = IndexMap::new();
        for (idx, elem) in self.elements.iter().enumerate() {
            if let Some(name) = elem.label() {
                if known.insert(name, idx).is_some() {
                    return Err(Error::DuplicateLabel(name.to_string()).at(idx));
                }
            }
        }

        for (idx, elem) in self.elements.iter().enumerate() {
            if let Element::Instruction(inst) = elem {
                if let Some(target) = inst.pending() {
                    if !known.contains_key(target.name.as_str()) {
                        return Err(Error::UndefinedLabel(target.name.clone()).at(idx));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walks the program with a running byte counter from address 0.
    fn assign_addresses(&self) -> Result<SymbolTable, Located> {
        let mut symbols = SymbolTable::new();
        let mut pc: u32 = 0;
        for (idx, elem) in self.elements.iter().enumerate() {
            if let Some(name) = elem.label() {
                let addr = u16::try_from(pc)
                    .map_err(|_| Error::OperandOutOfRange(format!("{name} @ 0x{pc:X}")).at(idx))?;
                symbols.insert(name.to_string(), addr);
            }
            if let Element::Instruction(inst) = elem {
                pc += inst.size().map_err(|e| e.at(idx))? as u32;
            }
        }
        Ok(symbols)
    }

    fn substitute(&mut self, symbols: &SymbolTable) -> Result<(), Located> {
        for (idx, elem) in self.elements.iter_mut().enumerate() {
            if let Element::Instruction(inst) = elem {
                let Some(target) = inst.pending() else {
                    continue;
                };
                let addr = symbols
                    .get(&target.name)
                    .ok_or_else(|| Error::UndefinedLabel(target.name.clone()).at(idx))?;
                inst.resolve(addr).map_err(|e| e.at(idx))?;
            }
        }
        Ok(())
    }
}
