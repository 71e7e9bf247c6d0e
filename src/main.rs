use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match spectro::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
