use crate::carousel::{CarouselAnimation, Clock};
use crate::config::FolioConfig;
use crate::interpolate::InterpolationError;
use crate::render::{
    canvas::Canvas,
    layout::HeroLayout,
    operation::{Pollable, PollableState},
    page::PageView,
    terminal::TerminalGuard,
    transition::{CarouselPose, Transition},
};
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

/// How often to redraw while a transition is easing.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Upper bound on how long to block waiting for input.
const MAX_WAIT: Duration = Duration::from_millis(250);

/// The running page: a carousel, the transition easing it, and the view drawing both.
pub(crate) struct FolioApp<C> {
    animation: CarouselAnimation,
    pollable: Box<dyn Pollable>,
    transition: Transition,
    view: PageView,
    clock: C,
    scroll: u16,
}

enum Action {
    Quit,
    Scroll(i32),
    Redraw,
    Nothing,
}

impl<C: Clock + Clone + 'static> FolioApp<C> {
    pub(crate) fn new(config: &FolioConfig, layout: Arc<HeroLayout>, clock: C) -> anyhow::Result<Self> {
        let words = config.hero.word_list().context("invalid hero words")?;
        let settings = config.hero.carousel_settings().context("invalid hero timing")?;

        let animation = CarouselAnimation::start(words, &settings, layout.clone(), &clock);
        let pollable = animation.pollable(Box::new(clock.clone()));
        let initial = animation.snapshot()?;
        let transition = Transition::new(CarouselPose::from(&initial), settings.transition_speed);
        let view = PageView::new(layout, config.style.clone(), config.page.clone());
        Ok(Self { animation, pollable, transition, view, clock, scroll: 0 })
    }

    /// Poll the carousel once. Returns whether the page needs to be redrawn.
    pub(crate) fn tick(&mut self) -> Result<bool, InterpolationError> {
        let now = self.clock.now();
        match self.pollable.poll() {
            PollableState::Modified => {
                let snapshot = self.animation.snapshot()?;
                log::trace!("easing toward word {} over {:?}", snapshot.active, self.transition.duration());
                self.transition.retarget(CarouselPose::from(&snapshot), now)?;
                Ok(true)
            }
            PollableState::Unmodified => Ok(!self.transition.is_settled(now)),
            PollableState::Done => Ok(false),
        }
    }

    /// The whole page laid out for a `width` x `height` screen.
    pub(crate) fn frame(&self, width: u16, height: u16) -> Result<Canvas, InterpolationError> {
        let pose = self.transition.pose(self.clock.now())?;
        Ok(self.view.render(width, height, &pose))
    }

    /// How long the loop may sleep before something needs doing.
    pub(crate) fn wait_hint(&self) -> Duration {
        let now = self.clock.now();
        if !self.transition.is_settled(now) {
            return FRAME_INTERVAL;
        }
        self.animation.next_fire_in(&self.clock).unwrap_or(MAX_WAIT).min(MAX_WAIT)
    }

    pub(crate) fn shutdown(&self) {
        self.animation.teardown();
    }

    pub(crate) fn run<W: Write>(mut self, terminal: &mut TerminalGuard<W>) -> anyhow::Result<()> {
        let (mut width, mut height) = terminal.size()?;
        self.draw(terminal, width, height)?;
        loop {
            let mut redraw = false;
            if event::poll(self.wait_hint())? {
                match Self::action(event::read()?) {
                    Action::Quit => break,
                    Action::Scroll(by) => {
                        self.scroll = self.scroll.saturating_add_signed(by.clamp(-1000, 1000) as i16);
                        redraw = true;
                    }
                    Action::Redraw => {
                        (width, height) = terminal.size()?;
                        log::trace!("terminal resized to {width}x{height}");
                        redraw = true;
                    }
                    Action::Nothing => {}
                }
            }
            redraw |= self.tick()?;
            if redraw {
                self.draw(terminal, width, height)?;
            }
        }
        self.shutdown();
        Ok(())
    }

    fn draw<W: Write>(&mut self, terminal: &mut TerminalGuard<W>, width: u16, height: u16) -> anyhow::Result<()> {
        let canvas = self.frame(width, height)?;
        self.scroll = self.scroll.min(canvas.height().saturating_sub(height));
        terminal.draw(&canvas, self.scroll, height, self.view.style().background_colour).context("drawing page")
    }

    fn action(event: Event) -> Action {
        match event {
            Event::Key(KeyEvent { kind: KeyEventKind::Release, .. }) => Action::Nothing,
            Event::Key(KeyEvent { code, modifiers, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
                KeyCode::Down | KeyCode::Char('j') => Action::Scroll(1),
                KeyCode::Up | KeyCode::Char('k') => Action::Scroll(-1),
                KeyCode::PageDown | KeyCode::Char(' ') => Action::Scroll(10),
                KeyCode::PageUp => Action::Scroll(-10),
                KeyCode::Home | KeyCode::Char('g') => Action::Scroll(-1000),
                KeyCode::End | KeyCode::Char('G') => Action::Scroll(1000),
                _ => Action::Nothing,
            },
            Event::Resize(..) => Action::Redraw,
            _ => Action::Nothing,
        }
    }
}
