//! The Eightebed compiler CLI.
//!
//! Translates Eightebed programs to C, and optionally hands the result to a
//! C compiler and runs it. Orchestration lives in the driver module; the
//! compiler core is the `eightebed` library.

use clap::Parser;

mod driver;

/// A compiler (to C) for the Eightebed programming language.
#[derive(Parser)]
#[command(name = "eightebed")]
#[command(about = "A compiler (to C) for the Eightebed programming language")]
#[command(long_about = "A compiler (to C) for the Eightebed programming language.\n\n\
The @testprog syntax can be used to compile one of the built-in test\n\
programs, e.g. '@alias_is_invalidated'. A single hyphen for the output\n\
filename sends the generated C source to stdout.")]
struct Cli {
    /// Input program: a source file path, or @name for a built-in fixture.
    input: Option<String>,

    /// Output path for the generated C source, or - for stdout.
    output: Option<String>,

    /// Dump the AST after the source is parsed.
    #[arg(short = 'a', long)]
    dump_ast: bool,

    /// Compile the generated C code.
    #[arg(short = 'c', long)]
    compile: bool,

    /// Program to use for compiling C.
    #[arg(short = 'e', long = "c-compiler", value_name = "EXECUTABLE", default_value = "gcc")]
    c_compiler: String,

    /// printf format to use for pointers in --trace-marking.
    #[arg(short = 'f', long, value_name = "FORMAT", default_value = "$%08lx")]
    pointer_format: String,

    /// Enter interactive mode.
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Trace marking actions in the generated C source.
    #[arg(short = 'm', long)]
    trace_marking: bool,

    /// Entity to list as creator of the generated C source.
    #[arg(short = 'p', long, default_value = "eightebed")]
    pedigree: String,

    /// Run the compiled program (implies --compile).
    #[arg(short = 'r', long)]
    run: bool,

    /// Delete the generated C source and executable.
    #[arg(short = 'u', long)]
    clean: bool,

    /// Produce extra status output.
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        simple_logger::init_with_level(log::Level::Info).expect("logger already initialized");
    }

    let options = driver::Options {
        dump_ast: cli.dump_ast,
        compile: cli.compile,
        run: cli.run,
        clean: cli.clean,
        compiler: cli.c_compiler,
        pedigree: cli.pedigree,
        trace_marking: cli.trace_marking,
        pointer_format: cli.pointer_format,
    };

    let result = if cli.interactive {
        driver::interactive(&options)
    } else {
        match (&cli.input, &cli.output) {
            (Some(input), Some(output)) => driver::build(input, output, &options),
            _ => {
                eprintln!("Usage: eightebed [OPTIONS] (in.8ebed|@testprog) (out.c|-)");
                eprintln!("Run with --help to see a list of all options.");
                std::process::exit(1);
            }
        }
    };

    if let Err(error) = result {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}
