//! Tool for converting a Commodore 64 bitmap font into a Portable Bitmap (PBM) image.

use std::{env, io, process::ExitCode};

use font2pbm::cli::{self, Action};
use tracing::Level;

fn main() -> ExitCode {
    // Standard output carries the image, so diagnostics always go to standard error.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(Level::WARN)
        .init();

    let program = env::args_os()
        .next()
        .map(|program| program.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("font2pbm"));

    let result = match cli::get_action(env::args_os()) {
        Ok(Action::Usage) => {
            print!("{}", cli::usage(&program));
            return ExitCode::SUCCESS;
        }
        Ok(Action::Convert(config)) => font2pbm::run(&config, io::stdout().lock()),
        Err(error) => Err(error.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "conversion failed");
            eprintln!("{program}: {error:#}");
            ExitCode::FAILURE
        }
    }
}
