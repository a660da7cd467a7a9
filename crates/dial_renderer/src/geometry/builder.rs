/// Vertex generators for the hands and tick rings.
///
/// Everything here is pure CPU work returning plain `Vec<Vertex>`; turning
/// the result into a GPU-resident [`TriangleList`](super::TriangleList) is
/// the caller's job.  The dial lies in the z = 0 plane with 12 o'clock on
/// +Y and the tick ring at radius 1.
use dial_core::{Color, TickStyle};

use crate::geometry::Vertex;

/// Single isosceles triangle: apex at `(0, length)`, base corners at
/// `(∓width/2, 0)`, counter-clockwise.
pub fn hand(width: f32, length: f32, color: Color) -> Vec<Vertex> {
    let c = color.to_array();
    vec![
        Vertex::new([0.0, length, 0.0], c),         // top
        Vertex::new([-width / 2.0, 0.0, 0.0], c),   // bottom left
        Vertex::new([width / 2.0, 0.0, 0.0], c),    // bottom right
    ]
}

/// One triangle per tick position `i` in `[0, count)`, rotated by
/// `i * 360 / count` whole degrees.  Positions where `skip` returns `true`
/// are left empty.
///
/// Each tick starts from the template
/// `{(0, 1), (width/2, length + 1), (-width/2, length + 1)}`, i.e. it points
/// inward from just outside the unit circle.
pub fn tick_ring(
    count: u32,
    width: f32,
    length: f32,
    color: Color,
    skip: impl Fn(u32) -> bool,
) -> Vec<Vertex> {
    let c = color.to_array();
    let mut out = Vec::with_capacity(count as usize * 3);
    for i in (0..count).filter(|&i| !skip(i)) {
        let mut tick = [
            Vertex::new([0.0, 1.0, 0.0], c),
            Vertex::new([width / 2.0, length + 1.0, 0.0], c),
            Vertex::new([-width / 2.0, length + 1.0, 0.0], c),
        ];
        rotate_xy(&mut tick, i * 360 / count);
        out.extend_from_slice(&tick);
    }
    out
}

/// Major ticks: every position.
pub fn major_ticks(style: &TickStyle) -> Vec<Vertex> {
    tick_ring(style.count, style.width, style.length, style.color, |_| false)
}

/// Minor ticks: every position except those divisible by `count / 4`,
/// which belong to the major ticks.
pub fn minor_ticks(style: &TickStyle) -> Vec<Vertex> {
    let quarter = (style.count / 4).max(1);
    tick_ring(style.count, style.width, style.length, style.color, |i| {
        i % quarter == 0
    })
}

/// Rotates `vertices` in place about the z axis by `degrees`, positive
/// being counter-clockwise when looking down from +Z:
///
/// ```text
/// x' = cos θ · x − sin θ · y
/// y' = sin θ · x + cos θ · y
/// ```
pub fn rotate_xy(vertices: &mut [Vertex], degrees: u32) {
    let (sin, cos) = (degrees as f64).to_radians().sin_cos();
    for v in vertices {
        let x = v.position[0] as f64;
        let y = v.position[1] as f64;
        v.position[0] = (cos * x - sin * y) as f32;
        v.position[1] = (sin * x + cos * y) as f32;
    }
}
