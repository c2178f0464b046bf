use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Largest address reachable with a one-byte operand.
pub const ZERO_PAGE_MAX: u16 = 0xFF;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, Display,
)]
pub enum AddressingMode {
    Accumulator,
    Absolute,
    ZeroPage,
    AbsoluteIndexedX,
    AbsoluteIndexedY,
    ZeroPageIndexedX,
    /// `($nn,X)`
    IndexedIndirect,
    /// `($nn),Y`
    IndirectIndexed,
    /// `($nnnn)`
    Indirect,
    Immediate,
    /// Placeholder for an operand that names a label. Never looked up in a table.
    LabelReference,
    Implied,
}

/// Index register suffix of an operand (`,X` / `,Y`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, Display,
)]
pub enum Index {
    X,
    Y,
}

impl Index {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_uppercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Unknown index register: {s}")),
        }
    }
}

impl AddressingMode {
    /// Picks the direct addressing mode for an address value.
    ///
    /// Zero page is chosen iff the value fits in one byte. There is no
    /// zero-page form indexed by Y, so `,Y` is always absolute.
    pub fn for_address(value: u16, index: Option<Index>) -> Self {
        let zero_page = value <= ZERO_PAGE_MAX;
        match (index, zero_page) {
            (None, true) => AddressingMode::ZeroPage,
            (None, false) => AddressingMode::Absolute,
            (Some(Index::X), true) => AddressingMode::ZeroPageIndexedX,
            (Some(Index::X), false) => AddressingMode::AbsoluteIndexedX,
            (Some(Index::Y), _) => AddressingMode::AbsoluteIndexedY,
        }
    }

    /// The full-width member of the direct family for `index`.
    pub fn absolute(index: Option<Index>) -> Self {
        match index {
            None => AddressingMode::Absolute,
            Some(Index::X) => AddressingMode::AbsoluteIndexedX,
            Some(Index::Y) => AddressingMode::AbsoluteIndexedY,
        }
    }
}

#[cfg(test)]
impl AddressingMode {
    fn is_zero_page(&self) -> bool {
        matches!(
            self,
            AddressingMode::ZeroPage | AddressingMode::ZeroPageIndexedX
        )
    }
}
