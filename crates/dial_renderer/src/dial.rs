/// Time-to-angle mapping for the three hands.
///
/// ```text
/// second = s * 360 / 60
/// minute = m * 360 / 60
/// hour   = (h mod 12) * 360 / 12 + (m * 360 / 60) / 12
/// ```
///
/// All divisions truncate.  The hour hand therefore creeps forward in
/// 1-degree steps (one every two minutes, 0‥29 degrees within the hour) rather
/// than continuously.  Every result is already in `[0, 359]`; the largest
/// values are 354 for the second/minute hands and 330 + 29 = 359 for the
/// hour hand.  A malformed [`ClockTime`] is a logic error and panics
/// rather than being folded back onto the dial.
use dial_core::ClockTime;

use crate::rotation::AngleIndex;

/// Rotation-cache indices for one frame.  Recomputed every frame, never
/// carried over.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HandAngles {
    pub second: AngleIndex,
    pub minute: AngleIndex,
    pub hour: AngleIndex,
}

impl HandAngles {
    pub fn from_time(t: &ClockTime) -> Self {
        let second = t.second * 360 / 60;
        let minute = t.minute * 360 / 60;
        let hour = (t.hour % 12) * 360 / 12 + minute / 12;
        Self {
            second: AngleIndex::new(second),
            minute: AngleIndex::new(minute),
            hour: AngleIndex::new(hour),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> (u16, u16, u16) {
        let a = HandAngles::from_time(&ClockTime::from_hms(h, m, s).unwrap());
        (a.second.degrees(), a.minute.degrees(), a.hour.degrees())
    }

    #[test]
    fn midnight_is_all_zero() {
        assert_eq!(at(0, 0, 0), (0, 0, 0));
    }

    #[test]
    fn half_past_midnight() {
        assert_eq!(at(0, 30, 0), (0, 180, 15));
    }

    #[test]
    fn last_second_of_the_day() {
        assert_eq!(at(23, 59, 59), (354, 354, 359));
        assert_eq!(at(11, 59, 0).2, 359);
    }

    #[test]
    fn hour_advances_in_whole_degrees() {
        // 6 degrees per minute on the minute hand, /12 truncated
        assert_eq!(at(3, 1, 0).2, 90);
        assert_eq!(at(3, 2, 0).2, 91);
        assert_eq!(at(3, 11, 0).2, 95);
        assert_eq!(at(3, 59, 0).2, 119);
    }

    #[test]
    fn afternoon_matches_morning() {
        for m in [0, 17, 45] {
            assert_eq!(at(14, m, 0), at(2, m, 0));
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn malformed_time_is_not_folded_onto_the_dial() {
        let bad = ClockTime { hour: 3, minute: 70, second: 0, nanos: 0 };
        let _ = HandAngles::from_time(&bad);
    }

    #[test]
    fn total_over_the_whole_day() {
        for h in 0..24 {
            for m in 0..60 {
                for s in [0, 29, 59] {
                    let (sec, min, hour) = at(h, m, s);
                    assert!(sec < 360 && min < 360 && hour < 360);
                }
            }
        }
    }
}
