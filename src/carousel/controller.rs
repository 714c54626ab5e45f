use super::{DisplaySize, Measure, WordList};
use crate::interpolate::{interpolate, InterpolationError};
use serde::{Deserialize, Serialize};

/// Opacity at circular distances 0, 1 and 2 from the active word; the last breakpoint sits at
/// half the list length and is fully transparent.
const OPACITY_STEPS: [f64; 4] = [1.0, 0.4, 0.2, 0.0];

/// Where a carousel starts before its first tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub(crate) enum StartPosition {
    /// The word at `floor(N / 2)`.
    #[default]
    Midpoint,

    /// The first word.
    First,
}

impl StartPosition {
    fn index(self, len: usize) -> usize {
        match self {
            Self::Midpoint => len / 2,
            Self::First => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CarouselOptions {
    pub(crate) start: StartPosition,
    /// Columns added to the measured width of the active word.
    pub(crate) width_padding: u16,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self { start: StartPosition::default(), width_padding: 2 }
    }
}

/// How a single word should be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct VisualParams {
    /// In `[0, 1]`; the active word is fully opaque.
    pub(crate) opacity: f64,
    /// Rows below (positive) or above (negative) the active word's position.
    pub(crate) vertical_offset: f64,
}

/// Cyclic index state for a word carousel.
#[derive(Debug)]
pub(crate) struct CarouselController {
    words: WordList,
    active: usize,
    size: DisplaySize,
    width_padding: u16,
}

impl CarouselController {
    /// Build a controller and prime its display size so the first frame is already sized.
    pub(crate) fn new(words: WordList, options: &CarouselOptions, measure: &dyn Measure) -> Self {
        let start = options.start.index(words.len());
        let mut controller =
            Self { words, active: start, size: DisplaySize::default(), width_padding: options.width_padding };
        controller.advance(start as isize, measure);
        controller
    }

    pub(crate) fn active_index(&self) -> usize {
        self.active
    }

    pub(crate) fn active_word(&self) -> &str {
        &self.words[self.active]
    }

    pub(crate) fn display_size(&self) -> DisplaySize {
        self.size
    }

    /// Make `raw` (taken modulo the word count) the active word and re-measure it.
    pub(crate) fn advance(&mut self, raw: isize, measure: &dyn Measure) {
        let len = self.words.len() as isize;
        self.active = raw.rem_euclid(len) as usize;

        let measured = measure.measure(self.active);
        let width = match measured.width {
            0 => 0,
            width => width.saturating_add(self.width_padding),
        };
        self.size = DisplaySize { width, height: measured.height };
        log::debug!("carousel advanced to {} ({:?}), size {:?}", self.active, self.active_word(), self.size);
    }

    /// The signed offset from `this_index` to the active word, folded onto the shorter way
    /// around the cycle.
    fn circular_delta(&self, this_index: usize) -> f64 {
        let len = self.words.len() as f64;
        let delta = self.active as f64 - this_index as f64;
        delta - closest_snap_point(delta, len)
    }

    pub(crate) fn visual_params(&self, this_index: usize) -> Result<VisualParams, InterpolationError> {
        let len = self.words.len() as f64;
        let delta = self.circular_delta(this_index);
        let opacity_input = [0.0, 1.0, 2.0, len / 2.0 - 1.0];
        let opacity = interpolate(delta.abs(), &opacity_input, &OPACITY_STEPS)?;
        Ok(VisualParams { opacity, vertical_offset: f64::from(self.size.height) * delta })
    }

    pub(crate) fn all_visual_params(&self) -> Result<Vec<VisualParams>, InterpolationError> {
        (0..self.words.len()).map(|index| self.visual_params(index)).collect()
    }
}

/// The multiple of `interval` nearest to `n`, with halves rounded toward positive infinity.
fn closest_snap_point(n: f64, interval: f64) -> f64 {
    (n / interval + 0.5).floor() * interval
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;

    /// Every word measures five columns by three rows.
    struct CharMeasure;

    impl Measure for CharMeasure {
        fn measure(&self, _index: usize) -> DisplaySize {
            DisplaySize { width: 5, height: 3 }
        }
    }

    #[derive(Default)]
    struct RecordingMeasure {
        calls: RefCell<Vec<usize>>,
    }

    impl Measure for RecordingMeasure {
        fn measure(&self, index: usize) -> DisplaySize {
            self.calls.borrow_mut().push(index);
            DisplaySize::default()
        }
    }

    fn words(count: usize) -> WordList {
        WordList::new((0..count).map(|i| format!("word{i}"))).unwrap()
    }

    fn controller(count: usize, active: isize) -> CarouselController {
        let options = CarouselOptions { start: StartPosition::First, width_padding: 2 };
        let mut controller = CarouselController::new(words(count), &options, &CharMeasure);
        controller.advance(active, &CharMeasure);
        controller
    }

    #[rstest]
    #[case(StartPosition::Midpoint, 7, 3)]
    #[case(StartPosition::Midpoint, 4, 2)]
    #[case(StartPosition::Midpoint, 1, 0)]
    #[case(StartPosition::First, 7, 0)]
    fn starts_at_configured_position(#[case] start: StartPosition, #[case] count: usize, #[case] expected: usize) {
        let options = CarouselOptions { start, width_padding: 0 };
        let controller = CarouselController::new(words(count), &options, &CharMeasure);
        assert_eq!(controller.active_index(), expected);
    }

    #[test]
    fn primes_size_on_construction() {
        let measure = RecordingMeasure::default();
        let controller = CarouselController::new(words(7), &CarouselOptions::default(), &measure);
        assert_eq!(*measure.calls.borrow(), [3]);
        assert_eq!(controller.display_size(), DisplaySize::default());
    }

    #[rstest]
    #[case(-1, 6)]
    #[case(7, 0)]
    #[case(15, 1)]
    #[case(-15, 6)]
    #[case(isize::MAX, (isize::MAX % 7) as usize)]
    fn advance_uses_true_modulo(#[case] raw: isize, #[case] expected: usize) {
        assert_eq!(controller(7, raw).active_index(), expected);
    }

    #[test]
    fn repeated_advances_stay_in_range() {
        let mut controller = controller(5, 0);
        for step in -40..40 {
            let raw = controller.active_index() as isize + step;
            controller.advance(raw, &CharMeasure);
            assert!(controller.active_index() < 5);
        }
    }

    #[test]
    fn pads_measured_width() {
        let controller = controller(7, 0);
        assert_eq!(controller.display_size(), DisplaySize { width: 7, height: 3 });
    }

    #[test]
    fn unmeasured_word_is_not_padded() {
        let options = CarouselOptions { start: StartPosition::First, width_padding: 4 };
        let controller = CarouselController::new(words(3), &options, &RecordingMeasure::default());
        assert_eq!(controller.display_size(), DisplaySize { width: 0, height: 0 });
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(4)]
    #[case(7)]
    #[case(12)]
    fn active_word_is_opaque_and_centered(#[case] count: usize) {
        for active in 0..count {
            let controller = controller(count, active as isize);
            let params = controller.visual_params(active).unwrap();
            assert_eq!(params, VisualParams { opacity: 1.0, vertical_offset: 0.0 });
        }
    }

    #[test]
    fn two_ahead_in_seven_words() {
        let controller = controller(7, 3);
        let params = controller.visual_params(5).unwrap();
        assert_eq!(params.opacity, 0.2);
        assert_eq!(params.vertical_offset, -2.0 * 3.0);
    }

    #[test]
    fn wraps_the_shorter_way_around() {
        let controller = controller(7, 0);
        // Two ahead and five behind are the same word on a cycle of seven.
        let ahead = controller.visual_params(2).unwrap();
        let behind = controller.circular_delta(5);
        assert_eq!(controller.circular_delta(2).abs(), 2.0);
        assert_eq!(behind.abs(), 2.0);
        assert_eq!(controller.visual_params(5).unwrap().opacity, ahead.opacity);
        // The last word sits directly below the first.
        assert_eq!(controller.visual_params(6).unwrap().vertical_offset, 3.0);
        assert_eq!(controller.visual_params(6).unwrap().opacity, 0.4);
    }

    #[test]
    fn far_words_are_transparent() {
        let controller = controller(12, 0);
        // Distances beyond N/2 - 1 = 5 clamp to the last output.
        assert_eq!(controller.visual_params(6).unwrap().opacity, 0.0);
        assert_eq!(controller.visual_params(5).unwrap().opacity, 0.0);
        let three_away = controller.visual_params(3).unwrap().opacity;
        assert!((three_away - 0.2 * 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn even_half_cycle_rounds_toward_positive() {
        let first = controller(4, 0);
        // delta = -2, -2 / 4 rounds to 0, so the word keeps its offset of -2 rows.
        let params = first.visual_params(2).unwrap();
        assert_eq!(params.vertical_offset, -6.0);
        let opposite = controller(4, 2).visual_params(0).unwrap();
        // delta = 2 rounds up to a full cycle, so the word lands on the same side.
        assert_eq!(opposite.vertical_offset, -6.0);
    }

    #[test]
    fn all_params_cover_every_word() {
        let controller = controller(7, 3);
        let params = controller.all_visual_params().unwrap();
        let offsets: Vec<_> = params.iter().map(|p| p.vertical_offset / 3.0).collect();
        assert_eq!(offsets, [3.0, 2.0, 1.0, 0.0, -1.0, -2.0, -3.0]);
        let opacities: Vec<_> = params.iter().map(|p| p.opacity).collect();
        assert_eq!(opacities, [0.0, 0.2, 0.4, 1.0, 0.4, 0.2, 0.0]);
    }
}
