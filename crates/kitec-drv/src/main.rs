use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = env::args_os().skip(1);
    let (path, extra) = (args.next(), args.next());

    let Some(path) = path else {
        eprintln!("usage: kitec <source-file>");
        return ExitCode::from(2);
    };
    if extra.is_some() {
        eprintln!("usage: kitec <source-file>");
        return ExitCode::from(2);
    }

    let path = PathBuf::from(path);
    match kitec_drv::run_file(&path, io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
