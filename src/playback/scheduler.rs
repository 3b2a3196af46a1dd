use crate::{
    compile::timeline::Timeline,
    foundation::core::Tick,
    foundation::error::{VoxError, VoxResult},
    playback::pacer::Pacer,
    render::raster::rasterize,
    transport::sink::FrameTransport,
};

/// Mirror flag and half-rotation accumulator carried from frame to frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    mirror: bool,
    elapsed: Tick,
    /// Ticks between flips. One sweep, not a value derived from the frame delays.
    half_rotation: Tick,
}

impl PlaybackState {
    /// Start unmirrored with nothing accumulated.
    pub fn new(half_rotation: Tick) -> Self {
        Self {
            mirror: false,
            elapsed: Tick::ZERO,
            half_rotation,
        }
    }

    /// Whether the left half is currently reflected.
    pub fn mirror(&self) -> bool {
        self.mirror
    }

    /// Ticks accumulated since the last flip.
    pub fn elapsed(&self) -> Tick {
        self.elapsed
    }

    /// Flip threshold: the timeline sweep, not a value derived from the frame delays.
    pub fn half_rotation(&self) -> Tick {
        self.half_rotation
    }

    /// Account for `delay` ticks of waiting. Returns `true` when the mirror flag flipped.
    pub fn advance(&mut self, delay: Tick) -> bool {
        self.elapsed += delay;
        if self.elapsed >= self.half_rotation {
            self.mirror = !self.mirror;
            self.elapsed = Tick::ZERO;
            return true;
        }
        false
    }
}

/// Session lifecycle. `Disconnected` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Frames are being sent.
    Connected,
    /// The transport is closed.
    Disconnected,
}

/// Options for [`Scheduler::run`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaybackOpts {
    /// Stop after this many passes over the timeline; `None` streams until the transport fails.
    pub max_passes: Option<u64>,
}

/// Counters reported when playback ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Completed passes.
    pub passes: u64,
    /// Frames handed to the transport.
    pub frames_sent: u64,
    /// Mirror flag toggles.
    pub mirror_flips: u64,
    /// Total ticks handed to the pacer.
    pub ticks_paced: u64,
}

/// Real-time playback of a compiled timeline over a frame transport.
///
/// Each frame waits out its delay, so it leaves at its own offset from the start of the pass,
/// then is rasterized with the current mirror flag and sent as one unit. After the last frame
/// the scheduler also waits out [`Timeline::tail`], so one pass lasts exactly one sweep and the
/// mirror flag flips once per pass: twice per rotation.
pub struct Scheduler<'a, T, P> {
    timeline: &'a Timeline,
    transport: T,
    pacer: P,
    state: PlaybackState,
    session: SessionState,
    stats: PlaybackStats,
}

impl<'a, T: FrameTransport, P: Pacer> Scheduler<'a, T, P> {
    /// Fails fast on timelines that cannot be played.
    pub fn new(timeline: &'a Timeline, transport: T, pacer: P) -> VoxResult<Self> {
        if timeline.is_empty() {
            return Err(VoxError::validation("cannot play an empty timeline"));
        }
        if timeline.sweep() == Tick::ZERO {
            return Err(VoxError::validation("timeline sweep must be > 0 ticks"));
        }
        Ok(Self {
            timeline,
            transport,
            pacer,
            state: PlaybackState::new(timeline.sweep()),
            session: SessionState::Connected,
            stats: PlaybackStats::default(),
        })
    }

    /// Current mirror state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Whether the session is still live.
    pub fn session(&self) -> SessionState {
        self.session
    }

    /// Counters so far.
    pub fn stats(&self) -> PlaybackStats {
        self.stats
    }

    /// The transport frames are sent to.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The pacer waits go through.
    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Take back the transport and pacer.
    pub fn into_parts(self) -> (T, P) {
        (self.transport, self.pacer)
    }

    /// Play the timeline once, start to end including the tail.
    pub fn step_pass(&mut self) -> VoxResult<()> {
        if self.session == SessionState::Disconnected {
            return Err(VoxError::transport("session is disconnected"));
        }

        for frame in self.timeline.frames() {
            self.wait(frame.delay);
            let buffer = rasterize(&frame.panel_activations(), self.state.mirror());
            if let Err(e) = self.transport.send_frame(&buffer) {
                self.session = SessionState::Disconnected;
                return Err(e);
            }
            self.stats.frames_sent += 1;
        }
        self.wait(self.timeline.tail());

        self.stats.passes += 1;
        tracing::debug!(
            pass = self.stats.passes,
            mirror = self.state.mirror(),
            "pass complete"
        );
        Ok(())
    }

    /// Stream passes until `opts.max_passes` is reached or the transport fails.
    ///
    /// A transport failure ends the session: it is logged with its cause, the transport is
    /// closed, and the error is returned. There is no retry.
    #[tracing::instrument(skip(self), fields(frames = self.timeline.len(), sweep = self.timeline.sweep().0))]
    pub fn run(&mut self, opts: PlaybackOpts) -> VoxResult<PlaybackStats> {
        tracing::info!("playback started");
        while opts.max_passes.is_none_or(|max| self.stats.passes < max) {
            if let Err(e) = self.step_pass() {
                tracing::error!(
                    error = %e,
                    frames_sent = self.stats.frames_sent,
                    "playback session ended"
                );
                self.session = SessionState::Disconnected;
                if let Err(close_err) = self.transport.close() {
                    tracing::debug!(error = %close_err, "close after failure");
                }
                return Err(e);
            }
        }
        self.transport.close()?;
        self.session = SessionState::Disconnected;
        tracing::info!(
            passes = self.stats.passes,
            frames = self.stats.frames_sent,
            "playback finished"
        );
        Ok(self.stats)
    }

    fn wait(&mut self, ticks: Tick) {
        self.pacer.pause(ticks);
        self.stats.ticks_paced += ticks.0;
        if self.state.advance(ticks) {
            self.stats.mirror_flips += 1;
        }
    }
}

/// Build a [`Scheduler`] and run it.
pub fn play<T: FrameTransport, P: Pacer>(
    timeline: &Timeline,
    transport: T,
    pacer: P,
    opts: PlaybackOpts,
) -> VoxResult<PlaybackStats> {
    Scheduler::new(timeline, transport, pacer)?.run(opts)
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
