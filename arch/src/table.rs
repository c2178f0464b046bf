use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::inst::Encoding;
use crate::mode::AddressingMode;
use crate::op::Mnemonic;

/// Why a table lookup produced no encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// The mnemonic has no table at all yet.
    Mnemonic,
    /// The mnemonic has a table, but not this mode.
    Mode,
}

type ModeTable = HashMap<AddressingMode, Encoding>;

// Opcode values follow the SunPlus manual, which differ from the MOS ones.
macro_rules! table {
    ($($op:ident => { $($mode:ident: ($opcode:expr, $size:expr, $cycles:expr)),* $(,)? }),* $(,)?) => {{
        let mut map: HashMap<Mnemonic, ModeTable> = HashMap::new();
        $(
            let mut modes = ModeTable::new();
            $(
                modes.insert(AddressingMode::$mode, Encoding::new($opcode, $size, $cycles));
            )*
            map.insert(Mnemonic::$op, modes);
        )*
        map
    }};
}

static TABLE: Lazy<HashMap<Mnemonic, ModeTable>> = Lazy::new(|| {
    table! {
        ADC => {
            Immediate: (0x56, 2, 2),
            Absolute: (0x57, 3, 4),
            ZeroPage: (0x17, 2, 3),
            AbsoluteIndexedX: (0x5F, 3, 4),
            AbsoluteIndexedY: (0x5E, 3, 4),
            ZeroPageIndexedX: (0x1F, 2, 4),
            IndexedIndirect: (0x16, 2, 6),
            IndirectIndexed: (0x1E, 2, 6),
        },
        AND => {
            Immediate: (0x54, 2, 2),
            ZeroPage: (0x15, 2, 3),
            ZeroPageIndexedX: (0x1D, 2, 4),
            Absolute: (0x55, 3, 4),
            AbsoluteIndexedX: (0x5D, 3, 4),
            AbsoluteIndexedY: (0x5C, 3, 4),
            IndexedIndirect: (0x14, 2, 6),
            IndirectIndexed: (0x1C, 2, 6),
        },
        ASL => {
            Accumulator: (0xC0, 1, 2),
            ZeroPage: (0x81, 2, 5),
            ZeroPageIndexedX: (0x89, 2, 6),
            Absolute: (0xC1, 3, 6),
            AbsoluteIndexedX: (0xC9, 3, 6),
        },
        CLC => { Implied: (0x48, 1, 2) },
        CLD => { Implied: (0x6A, 1, 2) },
        CLI => { Implied: (0x4A, 1, 2) },
        CLV => { Implied: (0x78, 1, 2) },
        DEX => { Implied: (0xE2, 1, 2) },
        DEY => { Implied: (0x60, 1, 2) },
        INX => { Implied: (0x72, 1, 2) },
        INY => { Implied: (0x62, 1, 2) },
        NOP => { Implied: (0xF2, 1, 2) },
        PHA => { Implied: (0x42, 1, 3) },
        PHP => { Implied: (0x40, 1, 3) },
        PLA => { Implied: (0x52, 1, 4) },
        PLP => { Implied: (0x50, 1, 4) },
        RTI => { Implied: (0x02, 1, 6) },
        RTS => { Implied: (0x12, 1, 6) },
        SEC => { Implied: (0x58, 1, 2) },
        SED => { Implied: (0x7A, 1, 2) },
        SEI => { Implied: (0x5A, 1, 2) },
        TAX => { Implied: (0xF0, 1, 2) },
        TAY => { Implied: (0x70, 1, 2) },
        TSX => { Implied: (0xF8, 1, 2) },
        TXA => { Implied: (0xE0, 1, 2) },
        TXS => { Implied: (0xE8, 1, 2) },
        TYA => { Implied: (0x68, 1, 2) },
    }
});

impl Mnemonic {
    /// Looks up the encoding of this mnemonic in `mode`.
    pub fn encoding(self, mode: AddressingMode) -> Result<Encoding, Missing> {
        let modes = TABLE.get(&self).ok_or(Missing::Mnemonic)?;
        modes.get(&mode).copied().ok_or(Missing::Mode)
    }
}

#[cfg(test)]
impl Mnemonic {
    fn is_implemented(self) -> bool {
        TABLE.contains_key(&self)
    }

    /// Modes this mnemonic can be assembled in, in declaration order of [`AddressingMode`].
    fn modes(self) -> Vec<AddressingMode> {
        use strum::IntoEnumIterator;
        match TABLE.get(&self) {
            Some(modes) => AddressingMode::iter()
                .filter(|mode| modes.contains_key(mode))
                .collect(),
            None => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;
    use AddressingMode::*;

    macro_rules! test_enc {
        ($($name:ident: ($op:ident, $mode:ident) => ($opcode:expr, $size:expr, $cycles:expr),)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(
                        Mnemonic::$op.encoding($mode),
                        Ok(Encoding::new($opcode, $size, $cycles))
                    );
                }
            )*
        }
    }

    test_enc! {
        adc_imm: (ADC, Immediate) => (0x56, 2, 2),
        adc_abs: (ADC, Absolute) => (0x57, 3, 4),
        adc_zp: (ADC, ZeroPage) => (0x17, 2, 3),
        adc_izx: (ADC, IndexedIndirect) => (0x16, 2, 6),
        and_aby: (AND, AbsoluteIndexedY) => (0x5C, 3, 4),
        and_izy: (AND, IndirectIndexed) => (0x1C, 2, 6),
        asl_acc: (ASL, Accumulator) => (0xC0, 1, 2),
        asl_zpx: (ASL, ZeroPageIndexedX) => (0x89, 2, 6),
        clc: (CLC, Implied) => (0x48, 1, 2),
        pla: (PLA, Implied) => (0x52, 1, 4),
        rti: (RTI, Implied) => (0x02, 1, 6),
        tya: (TYA, Implied) => (0x68, 1, 2),
    }

    #[test]
    fn unimplemented_mnemonic() {
        assert_eq!(Mnemonic::JMP.encoding(Absolute), Err(Missing::Mnemonic));
        assert_eq!(Mnemonic::LDA.encoding(Immediate), Err(Missing::Mnemonic));
        assert!(!Mnemonic::BCC.is_implemented());
    }

    #[test]
    fn unsupported_mode() {
        assert_eq!(Mnemonic::ASL.encoding(AbsoluteIndexedY), Err(Missing::Mode));
        assert_eq!(Mnemonic::ADC.encoding(Indirect), Err(Missing::Mode));
        assert_eq!(Mnemonic::CLC.encoding(Immediate), Err(Missing::Mode));
    }

    #[test]
    fn table_is_well_formed() {
        for op in Mnemonic::iter() {
            assert!(
                Mnemonic::encoding(op, LabelReference).is_err(),
                "{op} must not encode a bare label"
            );
            for mode in op.modes() {
                let enc = op.encoding(mode).unwrap();
                assert!((1..=3).contains(&enc.size), "{op} {mode}");
                assert!(enc.cycles > 0, "{op} {mode}");
                let expected = match mode {
                    Implied | Accumulator => 1,
                    Absolute | AbsoluteIndexedX | AbsoluteIndexedY | Indirect => 3,
                    _ => 2,
                };
                assert_eq!(enc.size, expected, "{op} {mode}");
            }
        }
    }

    #[test]
    fn opcodes_are_unique() {
        let mut seen = HashMap::new();
        for op in Mnemonic::iter() {
            for mode in op.modes() {
                let enc = op.encoding(mode).unwrap();
                if let Some(prev) = seen.insert(enc.opcode, (op, mode)) {
                    panic!("{:02X} used by {:?} and {:?}", enc.opcode, prev, (op, mode));
                }
            }
        }
    }

    #[test]
    fn implemented_count() {
        let implemented = Mnemonic::iter().filter(|op| op.is_implemented()).count();
        assert_eq!(implemented, 27);
    }
}
