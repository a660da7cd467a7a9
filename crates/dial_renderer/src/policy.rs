//! When to draw.
//!
//! The face redraws back-to-back only while it is both visible and
//! interactive.  In every other state it draws once per external trigger and
//! then sits idle, which bounds ambient/hidden power use to one frame per
//! trigger.
use crate::compositor::FaceMode;

/// What the host should do once a frame has been presented.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NextFrame {
    /// Request another frame right away.
    Continuous,
    /// Wait for the next trigger (mode, visibility or time tick).
    Idle,
}

/// Whether a trigger needs a frame.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Redraw {
    Requested,
    NotNeeded,
}

impl Redraw {
    #[inline]
    pub fn is_requested(self) -> bool {
        self == Self::Requested
    }
}

#[derive(Debug)]
pub struct DrawPolicy {
    visible: bool,
}

impl Default for DrawPolicy {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl DrawPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// A mode notification.  `changed` is what the compositor reported.
    pub fn on_mode_changed(&self, changed: bool) -> Redraw {
        if changed {
            Redraw::Requested
        } else {
            Redraw::NotNeeded
        }
    }

    /// Becoming visible draws once (and restarts the continuous loop when
    /// interactive); becoming hidden only lets the loop lapse.
    pub fn on_visibility_changed(&mut self, visible: bool) -> Redraw {
        let became_visible = visible && !self.visible;
        self.visible = visible;
        if became_visible {
            Redraw::Requested
        } else {
            Redraw::NotNeeded
        }
    }

    pub fn on_time_tick(&self) -> Redraw {
        Redraw::Requested
    }

    /// Evaluated after every frame; a state change lands here, never mid-frame.
    pub fn after_frame(&self, mode: FaceMode) -> NextFrame {
        if self.visible && mode == FaceMode::Interactive {
            NextFrame::Continuous
        } else {
            NextFrame::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuous_only_when_visible_and_interactive() {
        let mut policy = DrawPolicy::new();
        assert_eq!(policy.after_frame(FaceMode::Interactive), NextFrame::Continuous);
        assert_eq!(policy.after_frame(FaceMode::Ambient), NextFrame::Idle);

        let _ = policy.on_visibility_changed(false);
        assert_eq!(policy.after_frame(FaceMode::Interactive), NextFrame::Idle);
        assert_eq!(policy.after_frame(FaceMode::Ambient), NextFrame::Idle);
    }

    #[test]
    fn only_becoming_visible_draws() {
        let mut policy = DrawPolicy::new();
        assert_eq!(policy.on_visibility_changed(true), Redraw::NotNeeded);
        assert_eq!(policy.on_visibility_changed(false), Redraw::NotNeeded);
        assert_eq!(policy.on_visibility_changed(true), Redraw::Requested);
        assert!(policy.is_visible());
    }

    #[test]
    fn every_tick_draws() {
        let mut policy = DrawPolicy::new();
        assert!(policy.on_time_tick().is_requested());
        let _ = policy.on_visibility_changed(false);
        assert!(policy.on_time_tick().is_requested());
    }
}
