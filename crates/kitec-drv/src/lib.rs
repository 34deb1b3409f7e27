//! kitec-drv - The `kitec` command-line driver.
//!
//! Wires the pipeline together: read the source file, lex it, drop the
//! comment tokens, parse, interpret. `print` output goes to the given
//! sink; the first error of any phase aborts the run and reaches the
//! binary, which renders it on stderr and exits nonzero.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;

use kitec_int::Interpreter;
use kitec_lex::{Filter, Lexer, Source, TokenKind};
use kitec_par::Parser;

/// Runs a Kite program from an in-memory source.
pub fn run_source(input: impl Into<Vec<u8>>, out: impl Write) -> kitec_util::Result<()> {
    let lexer = Lexer::new(Source::new(input));
    let filter = Filter::new(lexer, TokenKind::Comment);
    let program = Parser::new(filter)?.parse_program()?;

    Interpreter::new(out).interpret(&program)
}

/// Runs the Kite program stored at `path`, writing `print` output to
/// `out`.
pub fn run_file(path: &Path, out: impl Write) -> anyhow::Result<()> {
    let input = fs::read(path)
        .with_context(|| format!("cannot read source file {}", path.display()))?;
    run_source(input, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(input: &str) -> kitec_util::Result<String> {
        let mut out = Vec::new();
        run_source(input, &mut out)?;
        Ok(String::from_utf8(out).expect("output is UTF-8"))
    }

    #[test]
    fn test_pipeline_runs_a_program() {
        assert_eq!(run_to_string("print 2 + 3;").unwrap(), "5\n");
    }

    #[test]
    fn test_comments_never_reach_the_parser() {
        assert_eq!(
            run_to_string("# a comment\nprint 1; # another\n").unwrap(),
            "1\n"
        );
    }

    #[test]
    fn test_pipeline_errors_surface() {
        assert!(run_to_string("print ;;").is_err());
    }

    #[test]
    fn test_missing_files_are_reported_with_their_path() {
        let err = run_file(Path::new("no/such/file.kite"), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("no/such/file.kite"));
    }
}
