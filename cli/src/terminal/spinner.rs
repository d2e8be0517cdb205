use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

fn slot() -> &'static Mutex<Option<ProgressBar>> {
    static SLOT: OnceLock<Mutex<Option<ProgressBar>>> = OnceLock::new();
    SLOT.get_or_init(|| Mutex::new(None))
}

/// Keeps the spinner alive for a scope; dropping it clears the line.
pub struct SpinnerGuard;

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        if let Some(spinner) = slot().lock().unwrap().take() {
            spinner.finish_and_clear();
        }
    }
}

/// Starts the apply spinner with an initial message. Only one spinner is
/// ever active; a second call replaces the first.
pub fn start(message: &str) -> SpinnerGuard {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap()
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message.to_string());

    if let Some(previous) = slot().lock().unwrap().replace(spinner) {
        previous.finish_and_clear();
    }
    SpinnerGuard
}

pub fn set_message(message: String) {
    if let Some(spinner) = slot().lock().unwrap().as_ref() {
        spinner.set_message(message);
    }
}

/// Prints a line without tearing the spinner, falling back to stdout when no
/// spinner is active.
pub fn println(msg: &str) {
    match slot().lock().unwrap().as_ref() {
        Some(spinner) => spinner.println(msg),
        None => println!("{msg}"),
    }
}

/// Routes log output through the spinner-safe path so tracing lines and the
/// progress display do not fight over the terminal.
pub struct SpinnerWriter;

impl std::io::Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        println(msg.trim_end());
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
