use crate::{
    backend::RenderBackend,
    callbacks::ArchiveCallback,
    error::{RibandError, RibandResult},
    replay::ReplayState,
    request::Call,
};

/// What a reel stands for: a linear archive (file, frame, inline archive)
/// or a reusable retained-object definition. Object replay never threads an
/// archive callback; archive replay does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReelKind {
    Archive,
    Object,
}

/// A recorded, replayable sequence of interface calls: the in-memory macro.
/// The reel owns its calls outright and replays them in recorded order.
#[derive(Clone, Debug)]
pub struct Reel {
    name: String,
    kind: ReelKind,
    open: bool,
    valid: bool,
    calls: Vec<Call>,
}

impl Reel {
    pub fn new(name: impl Into<String>, kind: ReelKind) -> Self {
        Self {
            name: name.into(),
            kind,
            open: true,
            valid: true,
            calls: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ReelKind {
        self.kind
    }

    /// Still accepting new calls?
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// False once any call failed to construct during recording. An invalid
    /// reel still replays; callers decide whether to trust it.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn calls(&self) -> impl Iterator<Item = &Call> {
        self.calls.iter()
    }

    /// Appends a finished call. Recording into a closed reel is a state
    /// error.
    pub fn add(&mut self, call: Call) -> RibandResult<()> {
        if !self.open {
            return Err(RibandError::ill_state(format!(
                "reel '{}' is closed",
                self.name
            )));
        }
        self.calls.push(call);
        Ok(())
    }

    /// Appends the result of constructing a call. A construction failure
    /// marks the reel invalid and propagates, but recording stays open:
    /// later calls are still collected for diagnostics.
    pub fn record(&mut self, call: RibandResult<Call>) -> RibandResult<()> {
        match call {
            Ok(call) => self.add(call),
            Err(err) => {
                self.valid = false;
                Err(err)
            }
        }
    }

    /// Stops accepting calls.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Replays every call in recorded order. The archive callback is
    /// threaded through archive reels only; object reels replay without one.
    /// The first failing call aborts the replay and its error propagates
    /// unchanged.
    #[tracing::instrument(skip_all, fields(reel = %self.name, calls = self.calls.len()))]
    pub fn replay(
        &self,
        backend: &mut dyn RenderBackend,
        state: &mut ReplayState,
        callback: Option<&ArchiveCallback>,
    ) -> RibandResult<()> {
        let callback = match self.kind {
            ReelKind::Archive => callback,
            ReelKind::Object => None,
        };
        for call in &self.calls {
            call.replay(backend, state, callback)?;
        }
        Ok(())
    }
}
