use serde::{Deserialize, Serialize};

/// Core trait for a step-driven game simulation.
///
/// The host owns the frame loop, input polling, and rendering; the
/// simulation only advances deterministic state by a caller-supplied `dt`.
pub trait Simulation {
    /// Per-tick input sampled by the host.
    type Input: Default;
    /// Things that happened during a tick, for the presentation layer.
    type Event;

    /// Metadata for menus and logs.
    fn metadata(&self) -> SimMetadata;

    /// Advance the simulation by `dt` seconds. Returns the events of this tick.
    fn update(&mut self, dt: f32, input: &Self::Input) -> Vec<Self::Event>;

    /// Serialize the mutable simulation state as a snapshot.
    fn serialize_state(&self) -> Vec<u8>;

    /// Restore a snapshot produced by `serialize_state`. Malformed data is ignored.
    fn apply_state(&mut self, state: &[u8]);

    /// Simulation tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    fn pause(&mut self);

    fn resume(&mut self);

    /// Whether the run has reached a terminal state (won or lost).
    fn is_run_over(&self) -> bool;
}

/// Descriptive metadata for a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimMetadata {
    pub name: String,
    pub description: String,
}

/// Generates the 5 boilerplate `Simulation` methods that are identical across games:
/// `serialize_state`, `apply_state`, `pause`, `resume`, `is_run_over`.
///
/// Snapshots go through the re-exported `rmp_serde`, so callers need no
/// direct dependency on it.
///
/// Requires the implementing struct to have `state: $StateType` and `paused: bool` fields,
/// and `$StateType` to have an `is_over(&self) -> bool` method.
#[macro_export]
macro_rules! simulation_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            $crate::rmp_serde::to_vec(&self.state)
                .expect("simulation state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            if let Ok(s) = $crate::rmp_serde::from_slice::<$StateType>(state) {
                self.state = s;
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_run_over(&self) -> bool {
            self.state.is_over()
        }
    };
}
