use std::fmt;

use arch::{AddressingMode, Index};

use crate::error::Error;
use crate::literal::parse_number;

/// A label used as an operand, with the index suffix written next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRef {
    pub name: String,
    pub index: Option<Index>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// No operand field at all.
    Implied,
    /// `A`
    Accumulator,
    /// `#nn`, consumed as a byte value rather than an address.
    Immediate(u16),
    Address(AddressingMode, u16),
    /// Resolved later, once the label has an address.
    Label(LabelRef),
}

impl Operand {
    /// Classifies an optional operand field.
    pub fn from_field(field: Option<&str>) -> Result<Operand, Error> {
        match field {
            None => Ok(Operand::Implied),
            Some(text) => Operand::parse(text),
        }
    }

    /// Classifies raw operand text.
    pub fn parse(text: &str) -> Result<Operand, Error> {
        if text == "A" {
            return Ok(Operand::Accumulator);
        }

        // #nn
        if let Some(lit) = text.strip_prefix('#') {
            return Ok(Operand::Immediate(parse_number(lit)?));
        }

        // $nn / $nnnn / $nn,X / $nnnn,X / $nnnn,Y
        if text.starts_with('$') {
            let (body, index) = split_index(text);
            let value = parse_number(body)?;
            return Ok(Operand::Address(
                AddressingMode::for_address(value, index),
                value,
            ));
        }

        // ($nn,X) / ($nn),Y / ($nnnn)
        if let Some(rest) = text.strip_prefix('(') {
            if rest.starts_with('$') {
                let (body, mode) = if let Some(body) = rest.strip_suffix(",X)") {
                    (body, AddressingMode::IndexedIndirect)
                } else if let Some(body) = rest.strip_suffix("),Y") {
                    (body, AddressingMode::IndirectIndexed)
                } else if let Some(body) = rest.strip_suffix(')') {
                    (body, AddressingMode::Indirect)
                } else {
                    return Err(Error::SyntaxError(text.to_string()));
                };
                return Ok(Operand::Address(mode, parse_number(body)?));
            }
        }

        let (name, index) = split_index(text);
        let mut chars = name.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(Error::SyntaxError(text.to_string()));
        }
        Ok(Operand::Label(LabelRef {
            name: name.to_string(),
            index,
        }))
    }

    pub fn mode(&self) -> AddressingMode {
        match self {
            Operand::Implied => AddressingMode::Implied,
            Operand::Accumulator => AddressingMode::Accumulator,
            Operand::Immediate(_) => AddressingMode::Immediate,
            Operand::Address(mode, _) => *mode,
            Operand::Label(_) => AddressingMode::LabelReference,
        }
    }

    pub fn label(&self) -> Option<&LabelRef> {
        match self {
            Operand::Label(label) => Some(label),
            _ => None,
        }
    }
}

/// Splits a trailing `,X` / `,Y` off operand text.
fn split_index(text: &str) -> (&str, Option<Index>) {
    if let Some((body, reg)) = text.rsplit_once(',') {
        if let Ok(index) = Index::parse(reg) {
            return (body, Some(index));
        }
    }
    (text, None)
}

impl fmt::Display for LabelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{},{}", self.name, index),
            None => write!(f, "{}", self.name),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AddressingMode::*;
        match self {
            Operand::Implied => Ok(()),
            Operand::Accumulator => write!(f, "A"),
            Operand::Immediate(v) => write!(f, "#${:02X}", v),
            Operand::Address(mode, v) => match mode {
                ZeroPage => write!(f, "${:02X}", v),
                ZeroPageIndexedX => write!(f, "${:02X},X", v),
                AbsoluteIndexedX => write!(f, "${:04X},X", v),
                AbsoluteIndexedY => write!(f, "${:04X},Y", v),
                IndexedIndirect => write!(f, "(${:02X},X)", v),
                IndirectIndexed => write!(f, "(${:02X}),Y", v),
                Indirect => write!(f, "(${:04X})", v),
                _ => write!(f, "${:04X}", v),
            },
            Operand::Label(label) => write!(f, "{}", label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AddressingMode::*;

    fn label(name: &str, index: Option<Index>) -> Operand {
        Operand::Label(LabelRef {
            name: name.to_string(),
            index,
        })
    }

    macro_rules! test_operand {
        ($($name:ident: $text:expr => $expect:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(Operand::parse($text).unwrap(), $expect);
                }
            )*
        }
    }

    test_operand! {
        accumulator: "A" => Operand::Accumulator,
        imm_bin: "#%00000001" => Operand::Immediate(1),
        imm_dec: "#01D" => Operand::Immediate(1),
        imm_hex: "#01H" => Operand::Immediate(1),
        imm_dollar: "#$05" => Operand::Immediate(5),
        zero_page: "$10" => Operand::Address(ZeroPage, 0x10),
        zero_page_edge: "$FF" => Operand::Address(ZeroPage, 0xFF),
        absolute_edge: "$0100" => Operand::Address(Absolute, 0x100),
        absolute: "$1234" => Operand::Address(Absolute, 0x1234),
        zero_page_x: "$FF,X" => Operand::Address(ZeroPageIndexedX, 0xFF),
        absolute_x: "$100,X" => Operand::Address(AbsoluteIndexedX, 0x100),
        absolute_y_small: "$10,Y" => Operand::Address(AbsoluteIndexedY, 0x10),
        absolute_y: "$1234,Y" => Operand::Address(AbsoluteIndexedY, 0x1234),
        indexed_indirect: "($20,X)" => Operand::Address(IndexedIndirect, 0x20),
        indirect_indexed: "($20),Y" => Operand::Address(IndirectIndexed, 0x20),
        indirect: "($1234)" => Operand::Address(Indirect, 0x1234),
        label_plain: "START" => label("START", None),
        label_x: "TABLE,X" => label("TABLE", Some(Index::X)),
        label_y: "TABLE,Y" => label("TABLE", Some(Index::Y)),
        label_looks_like_register: "AX" => label("AX", None),
    }

    #[test]
    fn bad_literals() {
        assert!(matches!(Operand::parse("#12B"), Err(Error::MalformedLiteral(_))));
        assert!(matches!(Operand::parse("$1"), Err(Error::MalformedLiteral(_))));
        assert!(matches!(Operand::parse("#99999"), Err(Error::OperandOutOfRange(_))));
        assert!(matches!(Operand::parse("($12"), Err(Error::SyntaxError(_))));
        assert!(matches!(Operand::parse("(LOOP)"), Err(Error::SyntaxError(_))));
        assert!(matches!(Operand::parse("9LIVES"), Err(Error::SyntaxError(_))));
    }

    #[test]
    fn implied_field() {
        assert_eq!(Operand::from_field(None).unwrap(), Operand::Implied);
        assert_eq!(Operand::Implied.mode(), Implied);
    }

    #[test]
    fn display() {
        assert_eq!(Operand::parse("$FF,X").unwrap().to_string(), "$FF,X");
        assert_eq!(Operand::parse("($20),Y").unwrap().to_string(), "($20),Y");
        assert_eq!(Operand::parse("LOOP,X").unwrap().to_string(), "LOOP,X");
        assert_eq!(Operand::parse("#01D").unwrap().to_string(), "#$01");
    }
}
