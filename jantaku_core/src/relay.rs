use crate::errors::{GameResult, SnapshotError};
use crate::game::{GameConfig, GameEvent, GameState};
use crate::snapshot::Snapshot;

/// Outbound side of the transport. Delivery is fire-and-forget; the
/// implementation must keep snapshots in the order they were broadcast.
pub trait SnapshotChannel {
    fn broadcast(&self, snapshot: &Snapshot);
}

impl<F> SnapshotChannel for F
where
    F: Fn(&Snapshot),
{
    fn broadcast(&self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// The authoritative side: owns the `GameState` and publishes after every
/// accepted event.
#[derive(Debug)]
pub struct HostSession<C> {
    state: GameState,
    channel: C,
}

impl<C: SnapshotChannel> HostSession<C> {
    pub fn new(config: GameConfig, channel: C) -> Self {
        Self::with_state(GameState::new(config), channel)
    }

    pub fn with_state(state: GameState, channel: C) -> Self {
        HostSession { state, channel }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Rejected events publish nothing.
    pub fn apply(&mut self, event: &GameEvent) -> GameResult<Snapshot> {
        self.state.apply(event)?;
        Ok(self.publish())
    }

    /// Re-sends the current state, e.g. to bring a newly joined guest up to date.
    pub fn publish(&self) -> Snapshot {
        let snapshot = self.state.snapshot();
        self.channel.broadcast(&snapshot);
        snapshot
    }
}

/// A guest's read-only copy. Each received snapshot replaces the previous
/// one wholesale.
#[derive(Debug, Clone, Default)]
pub struct GuestView {
    latest: Option<Snapshot>,
}

impl GuestView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receive(&mut self, snapshot: Snapshot) {
        self.latest = Some(snapshot);
    }

    /// A payload that fails to decode leaves the current view in place.
    pub fn receive_json(&mut self, payload: &str) -> Result<(), SnapshotError> {
        let snapshot = Snapshot::from_json(payload)?;
        self.receive(snapshot);
        Ok(())
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    pub fn state(&self) -> Option<Result<GameState, SnapshotError>> {
        self.latest.clone().map(GameState::try_from)
    }
}
