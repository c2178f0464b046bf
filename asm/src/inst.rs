use arch::{AddressingMode, Encoding, Missing, Mnemonic};
use color_print::cformat;

use crate::error::Error;
use crate::operand::{LabelRef, Operand};

/// Encoding chosen for an instruction plus the operand value it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub encoding: Encoding,
    pub mode: AddressingMode,
    pub value: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    /// Waiting for the address of a label.
    Pending(LabelRef),
    Resolved(Resolved),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Label defined on the same line.
    pub label: Option<String>,
    pub mnemonic: Mnemonic,
    pub operand: Operand,
    state: State,
}

fn lookup(op: Mnemonic, mode: AddressingMode) -> Result<Encoding, Error> {
    op.encoding(mode).map_err(|missing| match missing {
        Missing::Mnemonic => Error::UnimplementedMnemonic(op),
        Missing::Mode => Error::UnsupportedAddressingMode(op, mode),
    })
}

fn encode(op: Mnemonic, mode: AddressingMode, value: u16) -> Result<Resolved, Error> {
    let encoding = lookup(op, mode)?;
    if encoding.operand_bytes() == 1 && value > 0xFF {
        return Err(Error::OperandOverflow {
            op,
            value,
            width: 1,
        });
    }
    Ok(Resolved {
        encoding,
        mode,
        value,
    })
}

/// Mode a label operand is assembled in.
///
/// The width of a label instruction is fixed before any address is known, so
/// it always takes the full-width member of its family, even when the label
/// lands in zero page. Literal addresses go through
/// [`AddressingMode::for_address`] instead, so `ADC $03` is zero page while a
/// label at `$0003` still encodes as absolute.
pub fn label_mode(label: &LabelRef) -> AddressingMode {
    AddressingMode::absolute(label.index)
}

impl Instruction {
    /// Builds an instruction, encoding it right away unless the operand is a label.
    pub fn new(
        label: Option<String>,
        mnemonic: Mnemonic,
        operand: Operand,
    ) -> Result<Instruction, Error> {
        let state = match &operand {
            Operand::Label(target) => State::Pending(target.clone()),
            Operand::Immediate(value) | Operand::Address(_, value) => {
                State::Resolved(encode(mnemonic, operand.mode(), *value)?)
            }
            Operand::Implied | Operand::Accumulator => {
                State::Resolved(encode(mnemonic, operand.mode(), 0)?)
            }
        };
        Ok(Instruction {
            label,
            mnemonic,
            operand,
            state,
        })
    }

    pub fn resolved(&self) -> Option<&Resolved> {
        match &self.state {
            State::Resolved(resolved) => Some(resolved),
            State::Pending(_) => None,
        }
    }

    pub fn pending(&self) -> Option<&LabelRef> {
        match &self.state {
            State::Pending(label) => Some(label),
            State::Resolved(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, State::Resolved(_))
    }

    /// Byte width, known even before a label operand is resolved.
    pub fn size(&self) -> Result<u8, Error> {
        match &self.state {
            State::Resolved(resolved) => Ok(resolved.encoding.size),
            State::Pending(label) => Ok(lookup(self.mnemonic, label_mode(label))?.size),
        }
    }

    /// Substitutes the address of the pending label. Resolved instructions are left alone.
    pub fn resolve(&mut self, address: u16) -> Result<(), Error> {
        if let State::Pending(label) = &self.state {
            let resolved = encode(self.mnemonic, label_mode(label), address)?;
            self.state = State::Resolved(resolved);
        }
        Ok(())
    }
}

impl Instruction {
    pub fn cformat(&self) -> String {
        let operand = match (&self.operand, &self.state) {
            (Operand::Label(label), State::Resolved(r)) => {
                cformat!("<g>${:04X}({})</>", r.value, label)
            }
            (Operand::Label(label), State::Pending(_)) => cformat!("<r,u>{}</>", label),
            (operand, _) => cformat!("<y>{}</>", operand),
        };
        cformat!("<red>{:<4}</>{}", self.mnemonic, operand)
    }
}
