mod animation;
mod controller;
mod timer;
mod words;

pub(crate) use animation::{CarouselAnimation, CarouselSettings, CarouselSnapshot};
pub(crate) use controller::{CarouselController, CarouselOptions, StartPosition, VisualParams};
pub(crate) use timer::{Clock, RepeatingTimer, SystemClock};
pub(crate) use words::WordList;

#[cfg(test)]
pub(crate) use timer::ManualClock;

/// The on-screen footprint of a rendered word, in terminal cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct DisplaySize {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

/// Reports how large the view rendered a word.
///
/// Implementations return a zero size for words that have not been rendered yet.
pub(crate) trait Measure {
    fn measure(&self, index: usize) -> DisplaySize;
}

/// Errors that can occur when setting up a carousel
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CarouselError {
    #[error("carousel needs at least one word")]
    EmptyWordList,

    #[error("word '{0}' appears more than once")]
    DuplicateWord(String),

    #[error("transition delay must be positive")]
    ZeroDelay,

    #[error("transition speed must be a non-negative number of seconds, got {0}")]
    InvalidTransitionSpeed(f64),
}
