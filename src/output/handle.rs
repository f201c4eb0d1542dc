/// Opaque identifier of a registered render output.
///
/// A handle is a slot index plus a generation. Generations start at 1 and increase every time a
/// slot is reused, so a destroyed handle never compares equal to a later live one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderOutputHandle {
    slot: u32,
    generation: u32,
}

impl RenderOutputHandle {
    /// The "no target" sentinel. Never returned by a registry.
    pub const INVALID: Self = Self {
        slot: u32::MAX,
        generation: 0,
    };

    pub(crate) fn new(slot: u32, generation: u32) -> Self {
        debug_assert!(generation != 0, "generation 0 is reserved for INVALID");
        Self { slot, generation }
    }

    /// Return `true` for [`RenderOutputHandle::INVALID`].
    pub fn is_invalid(self) -> bool {
        self.generation == 0
    }

    pub(crate) fn slot(self) -> u32 {
        self.slot
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

impl Default for RenderOutputHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl std::fmt::Display for RenderOutputHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_invalid() {
            f.write_str("#invalid")
        } else {
            write!(f, "#{}v{}", self.slot, self.generation)
        }
    }
}
