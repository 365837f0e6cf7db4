// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::File;
use std::io::{self, Read, Write};
use std::process;

use pico_args::Arguments;

const HELP: &str = "\
svgscope scopes the embedded styles of an SVG document.

USAGE:
  svgscope [OPTIONS] <in-svg> <out-svg>  # from file to file
  svgscope [OPTIONS] <in-svg> -c         # from file to stdout
  svgscope [OPTIONS] - <out-svg>         # from stdin to file
  svgscope [OPTIONS] - -c                # from stdin to stdout

OPTIONS:
  -h, --help                    Prints help information
  -V, --version                 Prints version information
  -c                            Prints the output SVG to the stdout

  --allow-huge-files            Disables the input size guards and raises
                                the nesting limit
  --rename-nested-classes       Renames already scoped classes that appear
                                after the first selector token
  --single-quote                Uses single quotes for attribute values
  --strict                      Fails on input that cannot be processed
                                instead of writing it unchanged

  --quiet                       Disables warnings
  --verbose                     Prints removed stylesheet rules

ARGS:
  <in-svg>                      Input file
  <out-svg>                     Output file
";

#[derive(Debug)]
struct Args {
    allow_huge_files: bool,
    rename_nested_classes: bool,
    single_quote: bool,
    strict: bool,

    quiet: bool,
    verbose: bool,

    input: String,
    output: String,
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let mut input = Arguments::from_env();

    if input.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    Ok(Args {
        allow_huge_files: input.contains("--allow-huge-files"),
        rename_nested_classes: input.contains("--rename-nested-classes"),
        single_quote: input.contains("--single-quote"),
        strict: input.contains("--strict"),

        quiet: input.contains("--quiet"),
        verbose: input.contains("--verbose"),

        input: input.free_from_str()?,
        output: input.free_from_str()?,
    })
}

#[derive(Clone, PartialEq, Debug)]
enum InputFrom<'a> {
    Stdin,
    File(&'a str),
}

#[derive(Clone, PartialEq, Debug)]
enum OutputTo<'a> {
    Stdout,
    File(&'a str),
}

fn main() {
    let args = match collect_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            let level = if args.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Warn
            };
            log::set_max_level(level);
        }
    }

    if let Err(e) = process(args) {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn process(args: Args) -> Result<(), String> {
    let in_svg = match args.input.as_str() {
        "-" => InputFrom::Stdin,
        "-c" => return Err("-c should be set after input".to_string()),
        path => InputFrom::File(path),
    };

    let out_svg = match args.output.as_str() {
        "-c" => OutputTo::Stdout,
        path => OutputTo::File(path),
    };

    let opt = svgscope::Options {
        allow_huge_files: args.allow_huge_files,
        rename_nested_classes: args.rename_nested_classes,
        use_single_quote: args.single_quote,
    };

    let input_svg = match in_svg {
        InputFrom::Stdin => load_stdin(),
        InputFrom::File(path) => std::fs::read(path).map_err(|e| e.to_string()),
    }?;

    let input_svg =
        String::from_utf8(input_svg).map_err(|_| "the input is not a UTF-8 text".to_string())?;

    let s = if args.strict {
        svgscope::try_scope_styles(&input_svg, &opt).map_err(|e| e.to_string())?
    } else {
        svgscope::scope_styles(&input_svg, &opt).into_owned()
    };

    match out_svg {
        OutputTo::Stdout => {
            io::stdout()
                .write_all(s.as_bytes())
                .map_err(|_| "failed to write to the stdout".to_string())?;
        }
        OutputTo::File(path) => {
            let mut f =
                File::create(path).map_err(|_| "failed to create the output file".to_string())?;
            f.write_all(s.as_bytes())
                .map_err(|_| "failed to write to the output file".to_string())?;
        }
    }

    Ok(())
}

fn load_stdin() -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    let stdin = io::stdin();
    let mut handle = stdin.lock();

    handle
        .read_to_end(&mut buf)
        .map_err(|_| "failed to read from stdin".to_string())?;

    Ok(buf)
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, record.args()),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, record.args()),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, record.args()),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, record.args()),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, record.args()),
            }
        }
    }

    fn flush(&self) {}
}
