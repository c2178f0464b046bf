use std::fs;
use std::path::PathBuf;

use arch::{AddressingMode, Mnemonic};
use spasm::{assemble, parse_lines, Assembly, Error, Located, Program, Source};

fn run(text: &str) -> Result<Assembly, Located> {
    assemble(&parse_lines(text).unwrap())
}

fn hex(text: &str) -> Vec<String> {
    run(text).unwrap().hex
}

#[test]
fn forward_and_backward_labels() {
    let asm = run("START: CLC\nADC #$05\nADC START").unwrap();
    assert_eq!(asm.hex, ["48", "5605", "570000"]);
    assert_eq!(asm.symbols.get("START"), Some(0));
    assert_eq!(asm.bytes().unwrap(), [0x48, 0x56, 0x05, 0x57, 0x00, 0x00]);
    assert_eq!(asm.cycles(), 8);
}

#[test]
fn forward_reference_with_index() {
    let asm = run("ADC TABLE,X\nTABLE: NOP").unwrap();
    assert_eq!(asm.hex, ["5F0003", "F2"]);
    assert_eq!(asm.symbols.get("TABLE"), Some(3));
}

#[test]
fn bare_label_lines_take_next_address() {
    let asm = run("CLC\nLOOP:\nASL A\nEND:").unwrap();
    assert_eq!(asm.symbols.get("LOOP"), Some(1));
    assert_eq!(asm.symbols.get("END"), Some(2));
    let names: Vec<_> = asm.symbols.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["LOOP", "END"]);
}

#[test]
fn literal_forms_agree() {
    let expect = ["560A"];
    for line in ["ADC #%00001010", "ADC #00001010B", "ADC #10", "ADC #10D", "ADC #0AH", "ADC #$0A"] {
        assert_eq!(hex(line), expect, "{line}");
    }
}

#[test]
fn zero_page_threshold() {
    assert_eq!(hex("ADC $FF"), ["17FF"]);
    assert_eq!(hex("ADC $0100"), ["570100"]);
    assert_eq!(hex("ADC $10,X"), ["1F10"]);
    assert_eq!(hex("ADC $10,Y"), ["5E0010"]);
    assert_eq!(hex("ADC ($10,X)\nADC ($10),Y"), ["1610", "1E10"]);
}

#[test]
fn zero_page_label_stays_absolute() {
    assert_eq!(hex("ADC ZP\nZP: NOP"), ["570003", "F2"]);
    assert_eq!(hex("ADC $03"), ["1703"]);
}

#[test]
fn label_without_space() {
    let asm = run("LOOP:CLC\nADC LOOP").unwrap();
    assert_eq!(asm.hex, ["48", "570000"]);
    assert_eq!(asm.symbols.get("LOOP"), Some(0));
}

#[test]
fn duplicate_label() {
    let err = run("A1: CLC\nNOP\nA1: SEC").unwrap_err();
    assert_eq!(err.index, 2);
    assert!(matches!(err.error, Error::DuplicateLabel(ref name) if name == "A1"));
}

#[test]
fn undefined_label() {
    let err = run("CLC\nADC NOWHERE").unwrap_err();
    assert_eq!(err.index, 1);
    assert!(matches!(err.error, Error::UndefinedLabel(ref name) if name == "NOWHERE"));
}

#[test]
fn unsupported_mode() {
    let err = run("CLC\nASL #$05").unwrap_err();
    assert_eq!(err.index, 1);
    assert!(matches!(
        err.error,
        Error::UnsupportedAddressingMode(Mnemonic::ASL, AddressingMode::Immediate)
    ));
}

#[test]
fn unimplemented_mnemonic() {
    let err = run("JMP $1234").unwrap_err();
    assert!(matches!(err.error, Error::UnimplementedMnemonic(Mnemonic::JMP)));
}

#[test]
fn resolving_twice_is_stable() {
    let stmts = parse_lines("START: CLC\nADC START\nADC END\nEND: RTS").unwrap();
    let mut program = Program::build(&stmts).unwrap();
    assert!(!program.is_resolved());
    let first = program.resolve().unwrap();
    let snapshot = program.clone();
    let second = program.resolve().unwrap();
    assert!(program.is_resolved());
    assert_eq!(first, second);
    assert_eq!(program, snapshot);
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("spasm-program-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn included_labels_are_shared() {
    let dir = scratch("include");
    fs::write(dir.join("main.asm"), "START: CLC\nInclude lib/util.asm\nADC HELPER\n").unwrap();
    fs::create_dir_all(dir.join("lib")).unwrap();
    fs::write(dir.join("lib/util.asm"), "HELPER: SEC ; shared\nRTS\n").unwrap();

    let source = Source::read(&dir.join("main.asm")).unwrap();
    let asm = assemble(&source.stmts).unwrap();
    assert_eq!(asm.hex, ["48", "58", "12", "570001"]);
    assert_eq!(asm.symbols.get("HELPER"), Some(1));
    assert!(source.pos[1].file.ends_with("util.asm"));
}

#[test]
fn error_maps_back_to_included_line() {
    let dir = scratch("located");
    fs::write(dir.join("main.asm"), "CLC\nInclude bad.asm\n").unwrap();
    fs::write(dir.join("bad.asm"), "NOP\nASL ($10),Y\n").unwrap();

    let source = Source::read(&dir.join("main.asm")).unwrap();
    let err = assemble(&source.stmts).unwrap_err();
    let pos = &source.pos[err.index];
    assert!(pos.file.ends_with("bad.asm"));
    assert_eq!(pos.line, 1);
}
