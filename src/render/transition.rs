use crate::carousel::{CarouselSnapshot, VisualParams};
use crate::interpolate::{InterpolationError, Range};
use std::time::Duration;

/// What the view actually draws for the carousel on a given frame.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CarouselPose {
    /// Width of the clipping window, in columns.
    pub(crate) width: f64,
    pub(crate) params: Vec<VisualParams>,
}

impl From<&CarouselSnapshot> for CarouselPose {
    fn from(snapshot: &CarouselSnapshot) -> Self {
        Self { width: f64::from(snapshot.size.width), params: snapshot.params.clone() }
    }
}

/// Eases the drawn carousel from one snapshot to the next.
#[derive(Debug)]
pub(crate) struct Transition {
    duration: Duration,
    from: CarouselPose,
    to: CarouselPose,
    /// Unset until the first retarget.
    started: Option<Duration>,
}

impl Transition {
    pub(crate) fn new(initial: CarouselPose, duration: Duration) -> Self {
        Self { duration, from: initial.clone(), to: initial, started: None }
    }

    /// Start easing toward `target` from wherever the carousel is drawn at `now`.
    pub(crate) fn retarget(&mut self, target: CarouselPose, now: Duration) -> Result<(), InterpolationError> {
        self.from = self.pose(now)?;
        self.to = target;
        self.started = Some(now);
        Ok(())
    }

    fn progress(&self, now: Duration) -> f64 {
        let Some(started) = self.started else {
            return 1.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub(crate) fn duration(&self) -> Duration {
        self.duration
    }

    pub(crate) fn is_settled(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }

    pub(crate) fn pose(&self, now: Duration) -> Result<CarouselPose, InterpolationError> {
        let progress = self.progress(now);
        if progress >= 1.0 || self.from.params.len() != self.to.params.len() {
            return Ok(self.to.clone());
        }
        let tween = |from: f64, to: f64| Range::unit(from, to).map(progress);
        let params = self
            .from
            .params
            .iter()
            .zip(&self.to.params)
            .map(|(from, to)| -> Result<_, InterpolationError> {
                Ok(VisualParams {
                    opacity: tween(from.opacity, to.opacity)?,
                    vertical_offset: tween(from.vertical_offset, to.vertical_offset)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CarouselPose { width: tween(self.from.width, self.to.width)?, params })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(width: f64, opacity: f64, vertical_offset: f64) -> CarouselPose {
        CarouselPose { width, params: vec![VisualParams { opacity, vertical_offset }] }
    }

    const SPEED: Duration = Duration::from_millis(300);

    #[test]
    fn starts_settled() {
        let transition = Transition::new(pose(10.0, 1.0, 0.0), SPEED);
        assert!(transition.is_settled(Duration::ZERO));
        assert_eq!(transition.pose(Duration::ZERO).unwrap(), pose(10.0, 1.0, 0.0));
    }

    #[test]
    fn eases_linearly() {
        let mut transition = Transition::new(pose(10.0, 1.0, 0.0), SPEED);
        let start = Duration::from_secs(1);
        transition.retarget(pose(20.0, 0.4, -2.0), start).unwrap();
        assert!(!transition.is_settled(start));
        let halfway = transition.pose(start + Duration::from_millis(150)).unwrap();
        assert_eq!(halfway.width, 15.0);
        assert!((halfway.params[0].opacity - 0.7).abs() < 1e-9);
        assert_eq!(halfway.params[0].vertical_offset, -1.0);
        assert_eq!(transition.pose(start + SPEED).unwrap(), pose(20.0, 0.4, -2.0));
        assert!(transition.is_settled(start + SPEED));
    }

    #[test]
    fn retarget_mid_flight_starts_from_drawn_pose() {
        let mut transition = Transition::new(pose(0.0, 0.0, 0.0), SPEED);
        transition.retarget(pose(10.0, 1.0, 10.0), Duration::ZERO).unwrap();
        transition.retarget(pose(0.0, 0.0, 0.0), Duration::from_millis(150)).unwrap();
        let at = transition.pose(Duration::from_millis(150)).unwrap();
        assert_eq!(at.width, 5.0);
    }

    #[test]
    fn zero_speed_snaps() {
        let mut transition = Transition::new(pose(0.0, 0.0, 0.0), Duration::ZERO);
        transition.retarget(pose(4.0, 1.0, 1.0), Duration::from_secs(3)).unwrap();
        assert_eq!(transition.pose(Duration::from_secs(3)).unwrap(), pose(4.0, 1.0, 1.0));
    }
}
