//! Formatted chemviews output.

use std::fmt;

const CHEMVIEWS_BANNER_LENGTH: usize = 79;

/// Logs a warning to the `chemviews-output` logger.
macro_rules! chemviews_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::warn!(target: "chemviews-output", $fmt, $($($arg)*)?); }
}

/// Logs a main output line to the `chemviews-output` logger.
macro_rules! chemviews_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "chemviews-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {chemviews_output, chemviews_warn};

/// Logs a nicely formatted section title to the `chemviews-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(CHEMVIEWS_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    chemviews_output!("┌──{bar}──┐");
    chemviews_output!("│§ {title:^length$} §│");
    chemviews_output!("└──{bar}──┘");
}

/// Logs a nicely formatted subtitle to the `chemviews-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    chemviews_output!("{}", subtitle);
    chemviews_output!("{}", bar);
}

/// A trait for logging chemviews outputs nicely.
pub(crate) trait ChemviewsOutput: fmt::Display {
    /// Logs display output line by line.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            chemviews_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> ChemviewsOutput for T where T: fmt::Display {}
