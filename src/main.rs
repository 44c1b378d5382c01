use std::{env, io, process::ExitCode};

use langc::driver::{compile, init_tracing, Options};

fn main() -> ExitCode {
    init_tracing();

    let result = Options::parse_args(env::args().skip(1))
        .and_then(|options| compile(&options, &mut io::stdout().lock(), &mut io::stderr().lock()));

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
