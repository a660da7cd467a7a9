//! Screen regions handed to the complication drawer.
//!
//! The complications themselves (data sources, theming) live outside the
//! face.  All the face owns is where they go: three pixel rectangles
//! recomputed on the same resize trigger as the projection.
use std::fmt;

/// Pixel rectangle, half-open: `left..right` × `top..bottom`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// `true` if the two rectangles share at least one pixel.  Touching
    /// edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.left, self.top, self.right, self.bottom)
    }
}

/// The three complication positions.  Discriminants are the ids the
/// complication provider sees.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ComplicationSlot {
    Left = 0,
    Right = 1,
    Bottom = 2,
}

impl ComplicationSlot {
    pub const ALL: [Self; 3] = [Self::Left, Self::Right, Self::Bottom];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ComplicationRegions {
    pub left: Rect,
    pub right: Rect,
    pub bottom: Rect,
}

impl ComplicationRegions {
    /// Lays the slots out from the surface width, in integer arithmetic:
    ///
    /// ```text
    /// size = w / 4      mid = w / 2
    /// hOff = (mid - size) / 2      vOff = mid - size / 2
    /// left   = [hOff,       vOff,        hOff + size,       vOff + size]
    /// right  = [mid + hOff, vOff,        mid + hOff + size, vOff + size]
    /// bottom = [mid - size, vOff + size, mid + 2 * hOff,    vOff + 2 * size]
    /// ```
    ///
    /// The layout is designed for round and square displays and depends on
    /// the width alone.
    pub fn compute(width: u32, _height: u32) -> Self {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let size = w / 4;
        let mid = w / 2;
        let h_off = (mid - size) / 2;
        let v_off = mid - size / 2;
        Self {
            left: Rect::new(h_off, v_off, h_off + size, v_off + size),
            right: Rect::new(mid + h_off, v_off, mid + h_off + size, v_off + size),
            bottom: Rect::new(mid - size, v_off + size, mid + h_off * 2, v_off + 2 * size),
        }
    }

    pub fn get(&self, slot: ComplicationSlot) -> Rect {
        match slot {
            ComplicationSlot::Left => self.left,
            ComplicationSlot::Right => self.right,
            ComplicationSlot::Bottom => self.bottom,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComplicationSlot, Rect)> + '_ {
        ComplicationSlot::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

/// The external collaborator that paints complications.
pub trait ComplicationDrawer {
    /// New bounds for `slot`, after every surface resize.
    fn set_bounds(&mut self, slot: ComplicationSlot, bounds: Rect);

    /// Forwarded on every power-mode transition.
    fn set_in_ambient_mode(&mut self, ambient: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_for_400_square() {
        let r = ComplicationRegions::compute(400, 400);
        assert_eq!(r.left, Rect::new(50, 150, 150, 250));
        assert_eq!(r.right, Rect::new(250, 150, 350, 250));
        assert_eq!(r.bottom, Rect::new(100, 250, 300, 350));
    }

    #[test]
    fn regions_never_overlap() {
        let sizes = (1..=1024u32).map(|w| (w, w)).chain([
            (400, 300),
            (640, 480),
            (1024, 768),
            (300, 400),
        ]);
        for (w, h) in sizes {
            let r = ComplicationRegions::compute(w, h);
            for (a, b) in [(r.left, r.right), (r.left, r.bottom), (r.right, r.bottom)] {
                assert!(!a.intersects(&b), "{w}x{h}: {a} overlaps {b}");
            }
        }
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.intersects(&Rect::new(10, 0, 20, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 20)));
        assert!(a.intersects(&Rect::new(9, 9, 20, 20)));
    }

    #[test]
    fn slot_ids() {
        let ids: Vec<u8> = ComplicationSlot::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
