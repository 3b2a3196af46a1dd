use crate::foundation::core::Tick;

/// The single real-time suspension point of playback.
pub trait Pacer {
    /// Block for `ticks`. Not cancellable mid-wait.
    fn pause(&mut self, ticks: Tick);
}

/// Sleeps the calling thread for the requested wall-clock time.
///
/// Time spent in the transport between pauses is not compensated.
#[derive(Clone, Copy, Debug, Default)]
pub struct RealtimePacer;

impl Pacer for RealtimePacer {
    fn pause(&mut self, ticks: Tick) {
        if ticks > Tick::ZERO {
            std::thread::sleep(ticks.as_duration());
        }
    }
}

/// Records requested pauses without sleeping, for tests and dry runs.
#[derive(Clone, Debug, Default)]
pub struct RecordingPacer {
    pauses: Vec<Tick>,
}

impl RecordingPacer {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every requested pause, in order.
    pub fn pauses(&self) -> &[Tick] {
        &self.pauses
    }

    /// Total simulated time.
    pub fn total(&self) -> Tick {
        self.pauses.iter().copied().sum()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, ticks: Tick) {
        self.pauses.push(ticks);
    }
}
