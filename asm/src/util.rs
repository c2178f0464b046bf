use color_print::cformat;

use crate::resolve::Element;
use crate::source::Pos;
use crate::Assembly;

const RULE: &str = "-------------------+-----------------------------------------------------";

/// Builds the listing rows of an assembly. `pos[i]` locates element `i`.
pub fn listing(asm: &Assembly, pos: &[Pos]) -> Vec<String> {
    let mut rows = vec![];
    let mut file: Option<&str> = None;
    let mut pc: u32 = 0;

    for (idx, elem) in asm.program.elements().iter().enumerate() {
        let (path, line_num) = match pos.get(idx) {
            Some(p) => (p.file.as_str(), p.line + 1),
            None => ("", idx + 1),
        };

        // Print file header when the file changes
        if file != Some(path) {
            let fill = 45usize.saturating_sub(path.len());
            rows.push(format!("{}+------[{}]{}", "-".repeat(19), path, "-".repeat(fill)));
            file = Some(path);
        }

        let label = elem.label().map(|name| cformat!("<g>{}:</> ", name)).unwrap_or_default();
        match elem {
            Element::Label(_) => {
                rows.push(format!("{:19}| {:>4}: {}", "", line_num, label));
            }
            Element::Instruction(inst) => {
                let hex = inst
                    .to_hex()
                    .unwrap_or_else(|_| cformat!("<r,s>??????</>"));
                let cycles = inst
                    .resolved()
                    .map(|r| r.encoding.cycles.to_string())
                    .unwrap_or_else(|| "?".to_string());
                rows.push(format!(
                    "[{:04X}] {:<6} {:>2}c | {:>4}: {}{}",
                    pc,
                    hex,
                    cycles,
                    line_num,
                    label,
                    inst.cformat()
                ));
                pc += inst.size().unwrap_or(0) as u32;
            }
        }
    }
    rows.push(RULE.to_string());
    rows.push(format!("{:04X} bytes, {} cycles", pc, asm.cycles()));
    rows
}

pub fn print_dump(asm: &Assembly, pos: &[Pos]) {
    for row in listing(asm, pos) {
        println!("{}", row);
    }
}

pub fn print_symbols(asm: &Assembly) {
    for (name, addr) in asm.symbols.iter() {
        println!("{}", cformat!("  <g>{:<32}</> <y>${:04X}</>", name, addr));
    }
}
