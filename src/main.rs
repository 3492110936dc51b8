mod options;
mod reporter;

use std::path::Path;
use std::process::ExitCode;

use reporter::ConsoleReporter;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut reporter = ConsoleReporter;
    let settings = match options::parse_args(&args, &mut reporter) {
        Ok(settings) => settings,
        Err(_) => return ExitCode::FAILURE,
    };

    if settings.verbose {
        println!("Settings: {settings:?}");
    }

    for file in &settings.files {
        let name = Path::new(file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(file);
        match (settings.dm_version, settings.dm_build) {
            (Some(version), Some(build)) => println!("Compiling {name} on {version}.{build}"),
            _ => println!("Compiling {name}"),
        }
    }

    ExitCode::SUCCESS
}
