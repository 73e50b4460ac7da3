use std::process::ExitCode;

fn main() -> ExitCode {
    match projdeps_lib::main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(projdeps_lib::exit_code(&err))
        }
    }
}
