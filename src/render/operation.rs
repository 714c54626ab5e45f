/// Something that changes over time and is polled by the render loop.
pub(crate) trait Pollable {
    /// Update state and report whether anything visible changed.
    fn poll(&mut self) -> PollableState;
}

/// The outcome of polling a [`Pollable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PollableState {
    /// Nothing changed since the last poll.
    Unmodified,

    /// State changed and a redraw is needed.
    Modified,

    /// The pollable is finished and will never change again.
    Done,
}
