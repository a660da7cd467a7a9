//! Everything the face draws with, scoped to one graphics context.
use dial_core::FaceConfig;

use crate::backend::{GraphicsApi, ProgramHandle};
use crate::error::RenderError;
use crate::geometry::{builder, TriangleList};
use crate::rotation::RotationCache;

/// The shared program, the five triangle lists and the rotation table.
///
/// Built as a unit in `on_context_created` and dropped as a unit on
/// context loss; nothing here is ever patched in place.
pub struct FaceScene {
    pub program: ProgramHandle,
    pub hour_hand: TriangleList,
    pub minute_hand: TriangleList,
    pub second_hand: TriangleList,
    pub major_ticks: TriangleList,
    pub minor_ticks: TriangleList,
    pub rotations: RotationCache,
}

impl FaceScene {
    pub fn build<G: GraphicsApi + ?Sized>(api: &mut G, cfg: &FaceConfig) -> Result<Self, RenderError> {
        let program = api.create_program()?;

        let hands = &cfg.hands;
        let hand = |api: &mut G, label: &str, style: &dial_core::HandStyle| {
            TriangleList::new(
                api,
                program,
                label,
                builder::hand(style.width, style.length, style.color),
            )
        };
        let hour_hand = hand(api, "hour hand", &hands.hour)?;
        let minute_hand = hand(api, "minute hand", &hands.minute)?;
        let second_hand = hand(api, "second hand", &hands.second)?;

        let major_ticks =
            TriangleList::new(api, program, "major ticks", builder::major_ticks(&cfg.ticks.major))?;
        let minor_ticks =
            TriangleList::new(api, program, "minor ticks", builder::minor_ticks(&cfg.ticks.minor))?;

        let rotations = RotationCache::build();
        log::debug!(
            "face scene built: {} major / {} minor tick triangles",
            major_ticks.triangle_count(),
            minor_ticks.triangle_count()
        );

        Ok(Self {
            program,
            hour_hand,
            minute_hand,
            second_hand,
            major_ticks,
            minor_ticks,
            rotations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{GpuCall, RecordingBackend};

    #[test]
    fn uploads_five_lists_with_one_program() {
        let mut api = RecordingBackend::new();
        let scene = FaceScene::build(&mut api, &FaceConfig::default()).unwrap();

        let programs = api
            .calls()
            .iter()
            .filter(|c| matches!(c, GpuCall::CreateProgram(_)))
            .count();
        assert_eq!(programs, 1);

        let uploads: Vec<(&str, usize)> = api
            .calls()
            .iter()
            .filter_map(|c| match c {
                GpuCall::Upload { label, vertex_count, .. } => Some((label.as_str(), *vertex_count)),
                _ => None,
            })
            .collect();
        assert_eq!(
            uploads,
            vec![
                ("hour hand", 3),
                ("minute hand", 3),
                ("second hand", 3),
                ("major ticks", 12),
                ("minor ticks", 24),
            ]
        );
        assert_eq!(scene.rotations.len(), 360);
        assert_eq!(scene.second_hand.program(), scene.program);
    }

    #[test]
    fn program_failure_aborts_the_build() {
        let mut api = RecordingBackend::failing_program("vertex shader: syntax error");
        let err = FaceScene::build(&mut api, &FaceConfig::default()).err();
        assert!(matches!(err, Some(RenderError::ProgramCreation(_))));
        assert!(api.calls().is_empty());
    }
}
