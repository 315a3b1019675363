//! Interaction gate — the pause flag consulted by every tick.

/// Flat pause flag.  Overlapping pause sources (hover and press) share it,
/// so a single `resume` releases all of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionGate {
    paused: bool,
}

impl InteractionGate {
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_and_resume_are_idempotent() {
        let mut gate = InteractionGate::default();
        gate.pause();
        gate.pause();
        assert!(gate.is_paused());

        gate.resume();
        assert!(!gate.is_paused());
        gate.resume();
        assert!(!gate.is_paused());
    }

    #[test]
    fn overlapping_pauses_need_one_resume() {
        let mut gate = InteractionGate::default();
        gate.pause(); // pointer enters
        gate.pause(); // press inside
        gate.resume(); // pointer leaves
        assert!(!gate.is_paused());
    }
}
