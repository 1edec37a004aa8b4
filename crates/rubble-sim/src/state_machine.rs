use rubble_core::types::Phase;

/// Events that may move the engine between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// User starts the skydive.
    Drop,
    /// Camera drop animation reached its end.
    DropComplete,
    /// User explodes the structure.
    Dismantle,
    /// User asks for a new shape.
    Rebuild,
    /// Every claimed voxel has arrived.
    RebuildComplete,
    /// Host reloads a scene and wants it at rest.
    Settle,
}

/// Transition table. `None` means the trigger is ignored in that phase.
///
/// DISMANTLING has no exit of its own: rubble stays rubble until a rebuild.
pub fn next_phase(current: Phase, trigger: Trigger) -> Option<Phase> {
    use Phase::*;
    use Trigger::*;

    match (current, trigger) {
        (Intro, Drop) => Some(Dropping),
        (Dropping, DropComplete) => Some(Stable),
        (Stable, Dismantle) => Some(Dismantling),
        (Stable | Dismantling, Rebuild) => Some(Rebuilding),
        (Rebuilding, RebuildComplete) => Some(Stable),
        (Dismantling | Rebuilding, Settle) => Some(Stable),
        _ => None,
    }
}

/// Current phase plus the time it was entered.
#[derive(Debug, Clone)]
pub struct PhaseMachine {
    phase: Phase,
    entered_at_ms: f64,
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            phase: Phase::Intro,
            entered_at_ms: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Milliseconds spent in the current phase.
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.entered_at_ms
    }

    /// Apply a trigger. Returns the new phase if a transition happened.
    pub fn fire(&mut self, trigger: Trigger, now_ms: f64) -> Option<Phase> {
        let next = next_phase(self.phase, trigger)?;
        log::info!("Phase {} -> {} ({:?})", self.phase, next, trigger);
        self.phase = next;
        self.entered_at_ms = now_ms;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut m = PhaseMachine::new();
        assert_eq!(m.phase(), Phase::Intro);
        assert_eq!(m.fire(Trigger::Drop, 0.0), Some(Phase::Dropping));
        assert_eq!(m.fire(Trigger::DropComplete, 4000.0), Some(Phase::Stable));
        assert_eq!(m.fire(Trigger::Dismantle, 5000.0), Some(Phase::Dismantling));
        assert_eq!(m.fire(Trigger::Rebuild, 6000.0), Some(Phase::Rebuilding));
        assert_eq!(m.fire(Trigger::RebuildComplete, 9000.0), Some(Phase::Stable));
    }

    #[test]
    fn test_rebuild_from_stable_directly() {
        assert_eq!(next_phase(Phase::Stable, Trigger::Rebuild), Some(Phase::Rebuilding));
    }

    #[test]
    fn test_redundant_triggers_ignored() {
        assert_eq!(next_phase(Phase::Dismantling, Trigger::Dismantle), None);
        assert_eq!(next_phase(Phase::Rebuilding, Trigger::Rebuild), None);
        assert_eq!(next_phase(Phase::Rebuilding, Trigger::Dismantle), None);
        assert_eq!(next_phase(Phase::Dropping, Trigger::Drop), None);
        assert_eq!(next_phase(Phase::Stable, Trigger::Drop), None);
    }

    #[test]
    fn test_dismantling_has_no_self_exit() {
        for trigger in [Trigger::Drop, Trigger::DropComplete, Trigger::Dismantle, Trigger::RebuildComplete] {
            assert_eq!(next_phase(Phase::Dismantling, trigger), None, "{trigger:?}");
        }
    }

    #[test]
    fn test_rebuild_not_accepted_before_landing() {
        assert_eq!(next_phase(Phase::Intro, Trigger::Rebuild), None);
        assert_eq!(next_phase(Phase::Dropping, Trigger::Rebuild), None);
        assert_eq!(next_phase(Phase::Intro, Trigger::Dismantle), None);
    }

    #[test]
    fn test_settle() {
        assert_eq!(next_phase(Phase::Rebuilding, Trigger::Settle), Some(Phase::Stable));
        assert_eq!(next_phase(Phase::Dismantling, Trigger::Settle), Some(Phase::Stable));
        assert_eq!(next_phase(Phase::Intro, Trigger::Settle), None);
    }

    #[test]
    fn test_elapsed_resets_on_transition() {
        let mut m = PhaseMachine::new();
        m.fire(Trigger::Drop, 1000.0);
        assert_eq!(m.elapsed_ms(1500.0), 500.0);
        assert!(m.fire(Trigger::Dismantle, 2000.0).is_none());
        assert_eq!(m.elapsed_ms(2000.0), 1000.0, "ignored trigger must not reset the clock");
    }
}
