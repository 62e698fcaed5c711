pub mod countdown;
pub mod geometry;
pub mod sim_trait;

pub use rmp_serde;

pub use countdown::{Accumulator, Countdown};
pub use geometry::{Rect, intersects, translate};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::sim_trait::Simulation;

    /// Run N ticks with default input, returning all accumulated events.
    pub fn run_ticks<S: Simulation>(sim: &mut S, n: usize, dt: f32) -> Vec<S::Event> {
        let input = S::Input::default();
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(sim.update(dt, &input));
        }
        all_events
    }

    /// Assert that the simulation's serialized state differs from `before`.
    pub fn assert_state_changed<S: Simulation>(sim: &S, before: &[u8]) {
        let after = sim.serialize_state();
        assert_ne!(
            before,
            &after[..],
            "Simulation state should have changed after operation"
        );
    }

    // ================================================================
    // Simulation Contract Tests
    // ================================================================
    // Every Simulation implementation must pass these. Game crates call them
    // from their own #[cfg(test)] modules with a freshly loaded instance.

    /// update() with dt>0 must advance state (at minimum the run clock).
    pub fn contract_update_advances_time<S: Simulation>(sim: &mut S) {
        let before = sim.serialize_state();
        sim.update(1.0 / 60.0, &S::Input::default());
        let after = sim.serialize_state();
        assert_ne!(before, after, "update(dt>0) must advance simulation state");
    }

    /// serialize_state → apply_state must be stable after one roundtrip.
    pub fn contract_state_roundtrip_preserves<S: Simulation>(sim: &mut S) {
        let state_a = sim.serialize_state();
        sim.apply_state(&state_a);
        let state_b = sim.serialize_state();
        sim.apply_state(&state_b);
        let state_c = sim.serialize_state();
        assert_eq!(state_a, state_b, "Roundtrip must not alter state");
        assert_eq!(
            state_b, state_c,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// pause() must freeze state, resume() must unfreeze it.
    pub fn contract_pause_stops_updates<S: Simulation>(sim: &mut S) {
        sim.pause();
        let before = sim.serialize_state();
        let input = S::Input::default();
        sim.update(1.0 / 60.0, &input);
        let during_pause = sim.serialize_state();
        assert_eq!(before, during_pause, "State must not change while paused");

        sim.resume();
        sim.update(1.0 / 60.0, &input);
        let after_resume = sim.serialize_state();
        assert_ne!(during_pause, after_resume, "State must change after resume");
    }

    /// Garbage snapshot bytes must be ignored.
    pub fn contract_garbage_state_ignored<S: Simulation>(sim: &mut S) {
        let before = sim.serialize_state();
        sim.apply_state(&[0xFF, 0xFE, 0x00, 0x01, 0xAB, 0xCD]);
        assert_eq!(
            before,
            sim.serialize_state(),
            "Malformed snapshot must leave state untouched"
        );
    }

    /// Once the run is over, further updates must not change state.
    pub fn contract_finished_run_is_frozen<S: Simulation>(sim: &mut S) {
        assert!(sim.is_run_over(), "Precondition: run must already be over");
        let before = sim.serialize_state();
        let events = run_ticks(sim, 10, 1.0 / 60.0);
        assert!(events.is_empty(), "No events after the run is over");
        assert_eq!(before, sim.serialize_state(), "Finished run must not advance");
    }
}
