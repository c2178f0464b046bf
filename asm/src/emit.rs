use crate::error::Error;
use crate::inst::{Instruction, Resolved};

fn resolved(inst: &Instruction) -> Result<&Resolved, Error> {
    inst.resolved().ok_or_else(|| {
        Error::MalformedInstruction(format!("{} emitted with an unresolved label", inst.mnemonic))
    })
}

fn byte_operand(inst: &Instruction, value: u16) -> Result<u8, Error> {
    u8::try_from(value).map_err(|_| Error::OperandOverflow {
        op: inst.mnemonic,
        value,
        width: 1,
    })
}

impl Instruction {
    /// Uppercase hex: opcode, then the operand as 2 or 4 digits.
    pub fn to_hex(&self) -> Result<String, Error> {
        let r = resolved(self)?;
        let opcode = r.encoding.opcode;
        match r.encoding.size {
            1 => Ok(format!("{:02X}", opcode)),
            2 => Ok(format!("{:02X}{:02X}", opcode, byte_operand(self, r.value)?)),
            3 => Ok(format!("{:02X}{:04X}", opcode, r.value)),
            size => Err(Error::MalformedInstruction(format!(
                "{} encoded with {} bytes",
                self.mnemonic, size
            ))),
        }
    }

    /// Machine bytes, 16-bit operands low byte first.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let r = resolved(self)?;
        let opcode = r.encoding.opcode;
        match r.encoding.size {
            1 => Ok(vec![opcode]),
            2 => Ok(vec![opcode, byte_operand(self, r.value)?]),
            3 => {
                let [lo, hi] = r.value.to_le_bytes();
                Ok(vec![opcode, lo, hi])
            }
            size => Err(Error::MalformedInstruction(format!(
                "{} encoded with {} bytes",
                self.mnemonic, size
            ))),
        }
    }
}
