//! Progress reporting

use indicatif::{ProgressBar, ProgressStyle};

/// Returns a progress bar for `len` units of work. Hidden bars are returned
/// when `visible` is false so callers can update them unconditionally.
///
/// * `len`     - Total units of work.
/// * `visible` - Draw the bar to the terminal.
pub fn create_progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>9}/{len:9} ({eta}) {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=>-");
    progress.set_style(style);
    progress
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
