/// Errors that can occur when interpolating across a range
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    #[error("input and output ranges are not same length: input: {input}, output: {output}")]
    RangeMismatch { input: usize, output: usize },

    #[error("input and output ranges are empty")]
    EmptyRange,
}

/// Map `input` through the piecewise-linear function whose breakpoints are the pairs
/// `(input_range[i], output_range[i])`.
///
/// Segments are scanned in ascending order and the first closed interval containing `input`
/// wins. A zero-width segment yields `0.0`. Inputs outside every segment clamp to the first
/// output (below the first breakpoint) or to the last output (anything else).
pub(crate) fn interpolate(input: f64, input_range: &[f64], output_range: &[f64]) -> Result<f64, InterpolationError> {
    if input_range.len() != output_range.len() {
        return Err(InterpolationError::RangeMismatch { input: input_range.len(), output: output_range.len() });
    }
    let (Some(first_input), Some(first_output), Some(last_output)) =
        (input_range.first(), output_range.first(), output_range.last())
    else {
        return Err(InterpolationError::EmptyRange);
    };

    for (inputs, outputs) in input_range.windows(2).zip(output_range.windows(2)) {
        let (in_min, in_max) = (inputs[0], inputs[1]);
        if input >= in_min && input <= in_max {
            let (out_min, out_max) = (outputs[0], outputs[1]);
            let width = in_max - in_min;
            if width == 0.0 {
                return Ok(0.0);
            }
            let percent = (input - in_min) / width;
            return Ok(out_min * (1.0 - percent) + out_max * percent);
        }
    }

    if input < *first_input { Ok(*first_output) } else { Ok(*last_output) }
}

/// A pair of breakpoint ranges.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Range {
    input: Vec<f64>,
    output: Vec<f64>,
}

impl Range {
    /// The `[0, 1]` progress range used by tweens.
    pub(crate) fn unit(from: f64, to: f64) -> Self {
        Self { input: vec![0.0, 1.0], output: vec![from, to] }
    }

    pub(crate) fn map(&self, input: f64) -> Result<f64, InterpolationError> {
        interpolate(input, &self.input, &self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const OPACITY_INPUT: [f64; 4] = [0.0, 1.0, 2.0, 2.5];
    const OPACITY_OUTPUT: [f64; 4] = [1.0, 0.4, 0.2, 0.0];

    #[rstest]
    #[case(0, 1.0)]
    #[case(1, 0.4)]
    #[case(2, 0.2)]
    #[case(3, 0.0)]
    fn breakpoints_map_exactly(#[case] index: usize, #[case] expected: f64) {
        let value = interpolate(OPACITY_INPUT[index], &OPACITY_INPUT, &OPACITY_OUTPUT).unwrap();
        assert_eq!(value, expected);
    }

    #[rstest]
    #[case(0.5, 0.7)]
    #[case(1.5, 0.3)]
    #[case(2.25, 0.1)]
    fn interpolates_within_segment(#[case] input: f64, #[case] expected: f64) {
        let value = interpolate(input, &OPACITY_INPUT, &OPACITY_OUTPUT).unwrap();
        assert!((value - expected).abs() < 1e-9, "{value} != {expected}");
    }

    #[rstest]
    #[case(-0.001)]
    #[case(-100.0)]
    #[case(f64::NEG_INFINITY)]
    fn clamps_below_first_breakpoint(#[case] input: f64) {
        assert_eq!(interpolate(input, &OPACITY_INPUT, &OPACITY_OUTPUT).unwrap(), 1.0);
    }

    #[rstest]
    #[case(2.501)]
    #[case(1000.0)]
    #[case(f64::INFINITY)]
    fn clamps_above_last_breakpoint(#[case] input: f64) {
        assert_eq!(interpolate(input, &OPACITY_INPUT, &OPACITY_OUTPUT).unwrap(), 0.0);
    }

    #[test]
    fn zero_width_segment_returns_zero() {
        // Not the segment's output: the degenerate case is pinned to zero.
        let value = interpolate(3.0, &[3.0, 3.0], &[5.0, 9.0]).unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn first_matching_segment_wins() {
        // 1.0 closes the first segment and opens the second.
        let value = interpolate(1.0, &[0.0, 1.0, 2.0], &[0.0, 10.0, -10.0]).unwrap();
        assert_eq!(value, 10.0);
    }

    #[test]
    fn segments_are_continuous() {
        let inputs = [0.0, 1.0, 2.0, 2.5];
        let mut previous = interpolate(0.0, &inputs, &OPACITY_OUTPUT).unwrap();
        for step in 1..=250 {
            let current = interpolate(step as f64 / 100.0, &inputs, &OPACITY_OUTPUT).unwrap();
            assert!((current - previous).abs() <= 0.01, "jump at step {step}");
            previous = current;
        }
    }

    #[rstest]
    #[case(&[0.0, 1.0], &[1.0], 2, 1)]
    #[case(&[0.0], &[1.0, 2.0, 3.0], 1, 3)]
    #[case(&[], &[1.0], 0, 1)]
    fn mismatched_lengths_fail(
        #[case] input_range: &[f64],
        #[case] output_range: &[f64],
        #[case] input: usize,
        #[case] output: usize,
    ) {
        let error = interpolate(0.5, input_range, output_range).unwrap_err();
        assert_eq!(error, InterpolationError::RangeMismatch { input, output });
        let message = error.to_string();
        assert!(message.contains(&format!("input: {input}")));
        assert!(message.contains(&format!("output: {output}")));
    }

    #[test]
    fn empty_ranges_fail() {
        assert_eq!(interpolate(0.0, &[], &[]), Err(InterpolationError::EmptyRange));
    }

    #[test]
    fn nan_falls_through_to_last_output() {
        assert_eq!(interpolate(f64::NAN, &OPACITY_INPUT, &OPACITY_OUTPUT).unwrap(), 0.0);
    }

    #[test]
    fn single_breakpoint_always_clamps() {
        assert_eq!(interpolate(-1.0, &[0.0], &[7.0]).unwrap(), 7.0);
        assert_eq!(interpolate(1.0, &[0.0], &[7.0]).unwrap(), 7.0);
    }

    #[test]
    fn unit_range_maps_progress() {
        let range = Range::unit(4.0, 8.0);
        assert_eq!(range.map(0.0), Ok(4.0));
        assert_eq!(range.map(0.25), Ok(5.0));
        assert_eq!(range.map(1.0), Ok(8.0));
        assert_eq!(range.map(2.0), Ok(8.0));
    }

    #[test]
    fn mismatched_range_reports_error() {
        let range = Range { input: vec![0.0, 1.0], output: vec![1.0] };
        assert_eq!(range.map(0.5), Err(InterpolationError::RangeMismatch { input: 2, output: 1 }));
    }
}
