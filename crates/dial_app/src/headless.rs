//! Windowless simulation: the same trigger sequence the runner produces,
//! played against the recording backend.
use dial_core::WallClock;
use dial_renderer::{
    ComplicationDrawer, FaceMode, FrameReport, NextFrame, RecordingBackend, WatchFace,
};

use crate::builder::AppConfig;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct HeadlessSummary {
    pub frames: u32,
    pub draw_calls: u64,
    /// Idle gaps between frames, each closed by a simulated time tick.
    pub idle_waits: u32,
    pub last: Option<FrameReport>,
}

/// Drives `frames` frames: context created, surface sized from `config`,
/// optional ambient entry, then `request_frame` whenever a redraw is
/// pending.  When the policy goes idle the next time tick is delivered
/// immediately instead of waiting for it.
pub fn simulate<C: WallClock>(
    config: &AppConfig,
    clock: C,
    drawer: Box<dyn ComplicationDrawer>,
    frames: u32,
) -> anyhow::Result<HeadlessSummary> {
    config.validate()?;
    let mut face: WatchFace<RecordingBackend, C> = WatchFace::new(config.face.clone(), clock);
    face.set_complication_drawer(drawer);
    face.on_context_created(RecordingBackend::new())?;
    face.on_surface_resized(config.width, config.height)?;
    // a freshly sized surface always gets its first frame
    let mut pending = true;
    if config.always_ambient {
        pending |= face.on_mode_changed(true).is_requested();
    }
    log::info!(
        "headless: {}x{} {:?}, {frames} frames",
        config.width,
        config.height,
        face.mode()
    );

    let mut summary = HeadlessSummary::default();
    while summary.frames < frames {
        if !pending {
            summary.idle_waits += 1;
            pending = face.on_time_tick().is_requested();
            if !pending {
                log::warn!("headless: time tick requested no frame, stopping");
                break;
            }
        }

        let outcome = face.request_frame()?;
        let r = &outcome.report;
        log::info!(
            "frame {}: {} draws, clear {:?}, second hand {}, angles h{} m{} s{}",
            summary.frames,
            r.draw_calls,
            r.clear.to_array(),
            if r.second_hand { "on" } else { "off" },
            r.angles.hour,
            r.angles.minute,
            r.angles.second,
        );
        summary.frames += 1;
        summary.draw_calls += u64::from(r.draw_calls);
        summary.last = Some(outcome.report);
        pending = outcome.next == NextFrame::Continuous;
    }

    if let Some(backend) = face.backend() {
        debug_assert_eq!(backend.frames_presented(), u64::from(summary.frames));
        log::debug!("headless: {} backend calls recorded", backend.calls().len());
    }
    if face.mode() == FaceMode::Ambient {
        log::info!("headless: ambient run, second hand never drawn");
    }
    Ok(summary)
}
