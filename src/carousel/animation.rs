use super::{CarouselController, CarouselError, CarouselOptions, Clock, DisplaySize, Measure, RepeatingTimer, VisualParams, WordList};
use crate::interpolate::InterpolationError;
use crate::render::operation::{Pollable, PollableState};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Timing and layout settings for a running carousel.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CarouselSettings {
    /// Time between automatic advances.
    pub(crate) transition_delay: Duration,
    /// How long the view spends easing between two states. Not used by the carousel itself.
    pub(crate) transition_speed: Duration,
    pub(crate) options: CarouselOptions,
}

impl CarouselSettings {
    pub(crate) fn new(
        transition_delay_ms: u64,
        transition_speed_sec: f64,
        options: CarouselOptions,
    ) -> Result<Self, CarouselError> {
        if transition_delay_ms == 0 {
            return Err(CarouselError::ZeroDelay);
        }
        let transition_speed = Duration::try_from_secs_f64(transition_speed_sec)
            .map_err(|_| CarouselError::InvalidTransitionSpeed(transition_speed_sec))?;
        Ok(Self { transition_delay: Duration::from_millis(transition_delay_ms), transition_speed, options })
    }
}

/// A view of the carousel at one point in time.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CarouselSnapshot {
    pub(crate) active: usize,
    pub(crate) size: DisplaySize,
    /// One entry per word, in word order.
    pub(crate) params: Vec<VisualParams>,
}

#[derive(Debug)]
struct CarouselState {
    controller: CarouselController,
    timer: RepeatingTimer,
    /// Cleared on teardown; nothing mutates the controller afterwards.
    alive: bool,
}

/// A word carousel advanced by a repeating timer.
///
/// The timer is owned by the shared state and polled through [`CarouselAnimation::pollable`].
/// Tearing down (or dropping) the animation cancels it for good.
pub(crate) struct CarouselAnimation {
    state: Arc<Mutex<CarouselState>>,
    measure: Arc<dyn Measure + Send + Sync>,
}

impl CarouselAnimation {
    /// Prime the carousel and arm its timer.
    pub(crate) fn start(
        words: WordList,
        settings: &CarouselSettings,
        measure: Arc<dyn Measure + Send + Sync>,
        clock: &dyn Clock,
    ) -> Self {
        let controller = CarouselController::new(words, &settings.options, measure.as_ref());
        let mut timer = RepeatingTimer::new(settings.transition_delay);
        timer.arm(clock.now());
        let state = CarouselState { controller, timer, alive: true };
        Self { state: Arc::new(Mutex::new(state)), measure }
    }

    fn lock(&self) -> MutexGuard<'_, CarouselState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn snapshot(&self) -> Result<CarouselSnapshot, InterpolationError> {
        let state = self.lock();
        let controller = &state.controller;
        Ok(CarouselSnapshot {
            active: controller.active_index(),
            size: controller.display_size(),
            params: controller.all_visual_params()?,
        })
    }

    /// How long until the timer fires next, or `None` once torn down.
    pub(crate) fn next_fire_in(&self, clock: &dyn Clock) -> Option<Duration> {
        self.lock().timer.remaining(clock.now())
    }

    /// Stop the timer. Any poll after this returns [`PollableState::Done`] without touching state.
    pub(crate) fn teardown(&self) {
        let mut state = self.lock();
        if state.alive {
            state.alive = false;
            state.timer.cancel();
            log::debug!("carousel torn down at index {}", state.controller.active_index());
        }
    }

    pub(crate) fn pollable(&self, clock: Box<dyn Clock>) -> Box<dyn Pollable> {
        Box::new(CarouselPollable { state: self.state.clone(), measure: self.measure.clone(), clock })
    }
}

impl Drop for CarouselAnimation {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for CarouselAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselAnimation").field("state", &self.state).finish_non_exhaustive()
    }
}

struct CarouselPollable {
    state: Arc<Mutex<CarouselState>>,
    measure: Arc<dyn Measure + Send + Sync>,
    clock: Box<dyn Clock>,
}

impl Pollable for CarouselPollable {
    fn poll(&mut self) -> PollableState {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.alive {
            return PollableState::Done;
        }
        if !state.timer.fire_due(self.clock.now()) {
            return PollableState::Unmodified;
        }
        let next = state.controller.active_index() as isize + 1;
        state.controller.advance(next, self.measure.as_ref());
        PollableState::Modified
    }
}
