use std::path::Path;

use log::LevelFilter;

/// Wire up logging for a training run: bracketed levels on stdout, and
/// optionally a timestamped file that always captures debug output so a
/// quiet console still leaves a full trace behind.
///
/// Call once per process; a second call fails because a global logger is
/// already installed.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<(), fern::InitError> {
    let console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(console_level)
        .chain(std::io::stdout());

    let mut root = fern::Dispatch::new().chain(console);

    if let Some(path) = log_file {
        let file = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{} [{}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    message
                ))
            })
            .level(LevelFilter::Debug)
            .chain(fern::log_file(path)?);
        root = root.chain(file);
    }

    root.apply()?;
    Ok(())
}
