use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use spasm::error::Error;
use spasm::source::{Pos, ReadError, Source};
use tracing::Level;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    /// One hex string per instruction line
    Hex,
    /// Raw machine code
    Bin,
}

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: PathBuf,

    /// Output file
    #[clap(short, long, default_value = "main.hex")]
    output: PathBuf,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = Format::Hex)]
    format: Format,

    /// Write the symbol table as YAML
    #[clap(short, long)]
    symbols: Option<PathBuf>,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,

    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[clap(short, long, default_value_t = Level::INFO)]
    log_level: Level,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args: Args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut source = Source::default();
    match run(&args, &mut source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, &source);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, source: &mut Source) -> Result<(), ReadError> {
    tracing::trace!("reading {}", args.input.display());
    source.load(&args.input)?;
    let source = &*source;
    tracing::debug!(
        "{} statements from {} file(s)",
        source.stmts.len(),
        source.files.len()
    );

    tracing::trace!("assembling");
    let located = |err: spasm::Located| ReadError {
        pos: source.pos.get(err.index).cloned(),
        error: err.error,
    };
    let asm = spasm::assemble(&source.stmts).map_err(located)?;
    tracing::debug!("labels: {}", asm.symbols.len());
    tracing::debug!("instructions: {}", asm.hex.len());

    if args.dump {
        spasm::util::print_dump(&asm, &source.pos);
        spasm::util::print_symbols(&asm);
    }

    tracing::trace!("writing {}", args.output.display());
    let output = args.output.display().to_string();
    let content = match args.format {
        Format::Hex => asm
            .hex
            .iter()
            .map(|h| format!("{h}\n"))
            .collect::<String>()
            .into_bytes(),
        Format::Bin => asm.bytes().map_err(located)?,
    };
    tracing::debug!("output: {} bytes", content.len());
    write_file(&args.output, &content)?;

    if let Some(path) = &args.symbols {
        let name = path.display().to_string();
        let yaml = asm.symbols.to_yaml().map_err(|e| ReadError {
            error: Error::from(e),
            pos: None,
        })?;
        write_file(path, yaml.as_bytes())?;
        tracing::info!("symbols written to {}", name);
    }

    tracing::info!("assembled {} to {}", args.input.display(), output);
    Ok(())
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), ReadError> {
    let name = path.display().to_string();
    let fail = |error: Error| ReadError { error, pos: None };
    let mut file = File::create(path).map_err(|e| fail(Error::FileCreate(name.clone(), e)))?;
    file.write_all(content)
        .map_err(|e| fail(Error::FileWrite(name.clone(), e)))
}

fn report(err: &ReadError, source: &Source) {
    tracing::error!("{}", err.error);
    match &err.pos {
        Some(Pos { file, line }) => err.error.print_diag(&source.files, file, *line),
        None => err.error.print(),
    }
}
