pub mod ast;
pub mod environment;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod value;

use crate::ast::AstPrinter;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::parser::{ParseError, Parser};
use crate::scanner::ScanError;
use log::trace;
use std::io::{self, Write};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit status for this failure, following sysexits.h.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Scan(_) | Error::Parse(_) => 65,
            Error::Runtime(RuntimeError::Output(_)) | Error::Io(_) => 74,
            Error::Runtime(_) => 70,
        }
    }
}

/// Scans, parses and executes `source`, writing program output to `out`.
pub fn run<W: Write>(source: &str, out: W) -> Result<(), Error> {
    trace!("scanning {} bytes", source.len());
    let tokens = scanner::scan_tokens(source)?;
    trace!("tokens {:?}", tokens);
    let mut parser = Parser::new(&tokens);
    let mut interpreter = Interpreter::new(out);
    interpreter.interpret(&mut parser)
}

/// Parses the whole of `source` without running it and writes one
/// s-expression per top-level statement.
pub fn print_ast<W: Write>(source: &str, mut out: W) -> Result<(), Error> {
    let tokens = scanner::scan_tokens(source)?;
    let statements = Parser::new(&tokens).parse()?;
    trace!("parsed {} statements", statements.len());
    let mut printer = AstPrinter {};
    for stmt in &statements {
        writeln!(out, "{}", stmt.accept(&mut printer))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod lib_tests {
    use crate::interpreter::RuntimeError;
    use crate::scanner::ScanError;
    use crate::Error;
    use std::io;

    #[test]
    fn exit_codes() {
        let scan = Error::from(ScanError::UnterminatedString { line: 1, column: 1 });
        assert_eq!(scan.exit_code(), 65);
        assert_eq!(Error::from(RuntimeError::Halted).exit_code(), 70);
        let output = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        assert_eq!(Error::from(RuntimeError::from(output)).exit_code(), 74);
    }

    #[test]
    fn ast_output() {
        let mut out = Vec::new();
        crate::print_ast(
            "import {arguments};\nvar x float = 1.5;\nif (x > 1) { put {x}; }",
            &mut out,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "(import arguments)\n(var x float 1.5)\n(if (> x 1) (put x))\n"
        );
    }

    #[test]
    fn ast_output_does_not_execute() {
        let mut out = Vec::new();
        crate::print_ast("put {\"hi\"};", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(put \"hi\")\n");
    }

    #[test]
    fn errors_display_their_position() {
        let mut out = Vec::new();
        let err = crate::run("put {\"ok\"};\n  @", &mut out).unwrap_err();
        assert_eq!(err.to_string(), "[line 2:3] Error: Unexpected character '@'");
        assert!(out.is_empty());
    }
}
