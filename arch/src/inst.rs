use serde::{Deserialize, Serialize};

/// One row of the encoding table: how a (mnemonic, mode) pair is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoding {
    pub opcode: u8,
    /// Total byte width including the opcode, 1 to 3.
    pub size: u8,
    pub cycles: u8,
}

impl Encoding {
    pub const fn new(opcode: u8, size: u8, cycles: u8) -> Self {
        Encoding {
            opcode,
            size,
            cycles,
        }
    }

    /// Number of operand bytes following the opcode.
    pub fn operand_bytes(&self) -> u8 {
        self.size.saturating_sub(1)
    }
}
