//! Drive the Eightebed compiling / C compiling / running processes.
//!
//! The driver owns everything outside the compiler core: resolving inputs
//! (paths or `@fixture` references), writing generated C to a file or
//! stdout, invoking the external C compiler, running the produced
//! executable, and the interactive loop.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;
use tempfile::TempDir;

use eightebed::emit::{EmitOptions, emit};
use eightebed::fixtures;
use eightebed::parser::{ParseError, parse};
use eightebed::semantic::{CheckedProgram, SemanticError, check};

/// Options shared by every driver entry point.
#[derive(Debug, Clone)]
pub(crate) struct Options {
    /// Dump the AST after parsing.
    pub dump_ast: bool,
    /// Compile the generated C.
    pub compile: bool,
    /// Run the compiled program (implies compilation).
    pub run: bool,
    /// Delete the generated C source and executable afterwards.
    pub clean: bool,
    /// The C compiler executable.
    pub compiler: String,
    /// Banner text naming the producer of the generated C.
    pub pedigree: String,
    /// Emit marking traces in the generated C.
    pub trace_marking: bool,
    /// printf conversion for pointers in marking traces.
    pub pointer_format: String,
}

impl Options {
    fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            pedigree: self.pedigree.clone(),
            trace_marking: self.trace_marking,
            pointer_format: self.pointer_format.clone(),
        }
    }
}

/// A compilation error from any phase of the pipeline.
///
/// This enum unifies parse, check, I/O, and C-toolchain errors to simplify
/// error handling in the build flow; each phase error keeps its own
/// rendering.
pub(crate) enum CompileError {
    /// Lexing or parsing failed.
    Parse(ParseError),
    /// Type checking or validity analysis failed.
    Check(SemanticError),
    /// An `@fixture` input named no known fixture.
    UnknownFixture { name: String },
    /// Failed to read the input file.
    FileReadError { path: String, source: io::Error },
    /// Failed to write the output file.
    FileWriteError { path: String, source: io::Error },
    /// Failed to launch the C compiler.
    CompilerLaunch { compiler: String, source: io::Error },
    /// The C compiler produced output on stdout, which means failure.
    CompilationFailed { stdout: String },
    /// Failed to run the compiled executable.
    RunFailed(io::Error),
    /// Compilation was requested but the C went to stdout.
    NothingToCompile,
    /// Any other I/O failure (temp dirs, stdout).
    Io(io::Error),
}

impl From<ParseError> for CompileError {
    fn from(error: ParseError) -> Self {
        CompileError::Parse(error)
    }
}

impl From<SemanticError> for CompileError {
    fn from(error: SemanticError) -> Self {
        CompileError::Check(error)
    }
}

impl From<io::Error> for CompileError {
    fn from(error: io::Error) -> Self {
        CompileError::Io(error)
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Parse(error) => write!(f, "{}", error),
            CompileError::Check(error) => write!(f, "{}", error),
            CompileError::UnknownFixture { name } => {
                write!(f, "no test fixture named '{}'", name)
            }
            CompileError::FileReadError { path, source } => {
                write!(f, "Failed to read file '{}': {}", path, source)
            }
            CompileError::FileWriteError { path, source } => {
                write!(f, "Failed to write file '{}': {}", path, source)
            }
            CompileError::CompilerLaunch { compiler, source } => {
                write!(f, "Failed to run C compiler '{}': {}", compiler, source)
            }
            CompileError::CompilationFailed { stdout } => {
                write!(f, "Compilation failed!")?;
                if !stdout.is_empty() {
                    write!(f, "\n[stdout]\n{}", stdout)?;
                }
                Ok(())
            }
            CompileError::RunFailed(source) => {
                write!(f, "Failed to run compiled program: {}", source)
            }
            CompileError::NothingToCompile => {
                write!(f, "cannot compile when the C source was written to stdout")
            }
            CompileError::Io(source) => write!(f, "{}", source),
        }
    }
}

/// Resolves an input argument to program text.
///
/// `@name` selects the built-in fixture with that name; anything else is
/// read as a file path.
fn resolve_input(input: &str) -> Result<String, CompileError> {
    if let Some(name) = input.strip_prefix('@') {
        return fixtures::lookup(name)
            .map(str::to_string)
            .ok_or_else(|| CompileError::UnknownFixture {
                name: name.to_string(),
            });
    }
    fs::read_to_string(input).map_err(|source| CompileError::FileReadError {
        path: input.to_string(),
        source,
    })
}

/// Parses and checks program text, optionally dumping the AST.
fn parse_and_check(source: &str, dump_ast: bool) -> Result<CheckedProgram, CompileError> {
    info!("Parsing...");
    let ast = parse(source)?;
    if dump_ast {
        eprintln!("{:#?}", ast);
    }
    Ok(check(ast)?)
}

/// Compiles a generated C file and optionally runs the result.
///
/// The compiler's stdout decides success: any output means failure. The
/// executable lands as `a.out` next to the C source.
fn compile_and_run(c_path: &Path, options: &Options) -> Result<String, CompileError> {
    info!("Compiling...");
    let dir = match c_path.parent() {
        Some(parent) if parent != Path::new("") => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    // The compiler runs inside the C file's directory so its a.out lands
    // next to the source.
    let c_file = c_path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| c_path.to_path_buf());
    let output = Command::new(&options.compiler)
        .arg(&c_file)
        .current_dir(&dir)
        .output()
        .map_err(|source| CompileError::CompilerLaunch {
            compiler: options.compiler.clone(),
            source,
        })?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.is_empty() {
        return Err(CompileError::CompilationFailed {
            stdout: stdout.into_owned(),
        });
    }

    let mut run_output = String::new();
    if options.run {
        info!("Running...");
        let executable = dir.join("a.out");
        let output = Command::new(&executable)
            .output()
            .map_err(CompileError::RunFailed)?;
        run_output = String::from_utf8_lossy(&output.stdout).into_owned();
    }

    if options.clean {
        let _ = fs::remove_file(c_path);
        let _ = fs::remove_file(dir.join("a.out"));
    }

    Ok(run_output)
}

/// The `build` flow: resolve input, parse and check, generate C, and
/// optionally compile and run it.
pub(crate) fn build(input: &str, output: &str, options: &Options) -> Result<(), CompileError> {
    let source = resolve_input(input)?;
    let checked = parse_and_check(&source, options.dump_ast)?;

    info!("Generating...");
    let c_path = if output == "-" {
        let stdout = io::stdout();
        emit(&checked, &mut stdout.lock(), &options.emit_options())?;
        None
    } else {
        let mut file =
            fs::File::create(output).map_err(|source| CompileError::FileWriteError {
                path: output.to_string(),
                source,
            })?;
        emit(&checked, &mut file, &options.emit_options())?;
        Some(PathBuf::from(output))
    };

    if options.compile || options.run {
        let c_path = c_path.ok_or(CompileError::NothingToCompile)?;
        let run_output = compile_and_run(&c_path, options)?;
        print!("{}", run_output);
    }
    Ok(())
}

/// Emits, compiles, and runs a checked program in a temporary directory,
/// returning the program's stdout.
fn load_and_go(checked: &CheckedProgram, options: &Options) -> Result<String, CompileError> {
    let dir = TempDir::new()?;
    let c_path = dir.path().join("tmp.c");
    let mut file = fs::File::create(&c_path)?;
    emit(checked, &mut file, &options.emit_options())?;
    drop(file);
    let mut run_options = options.clone();
    run_options.run = true;
    compile_and_run(&c_path, &run_options)
}

/// The interactive loop: read a program per line, compile and run it, and
/// print the program's output or the error.
pub(crate) fn interactive(options: &Options) -> Result<(), CompileError> {
    println!("Eightebed interactive!  Type 'quit' to quit.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line == "quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }
        match parse_and_check(line, options.dump_ast)
            .and_then(|checked| load_and_go(&checked, options))
        {
            Ok(output) => print!("{}", output),
            Err(error) => println!("Exception! {}", error),
        }
    }
    Ok(())
}
