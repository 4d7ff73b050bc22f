use std::process::ExitCode;

fn main() -> ExitCode {
    match offsets_fetcher::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
