use dial_renderer::{ComplicationDrawer, ComplicationSlot, Rect};

/// Stand-in complication drawer: remembers and logs what it is told.
#[derive(Debug, Default)]
pub struct LoggingComplications {
    bounds: [Option<Rect>; 3],
    ambient: bool,
}

impl LoggingComplications {
    pub fn bounds(&self, slot: ComplicationSlot) -> Option<Rect> {
        self.bounds[slot.id() as usize]
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }
}

impl ComplicationDrawer for LoggingComplications {
    fn set_bounds(&mut self, slot: ComplicationSlot, bounds: Rect) {
        log::debug!("complication {slot:?} (id {}) -> {bounds}", slot.id());
        self.bounds[slot.id() as usize] = Some(bounds);
    }

    fn set_in_ambient_mode(&mut self, ambient: bool) {
        log::debug!("complications ambient: {ambient}");
        self.ambient = ambient;
    }
}
