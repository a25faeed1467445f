/// Which parts of a fulfiller appear in its option label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    pub include_name: bool,
    pub include_id: bool,
    pub include_internal_id: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            include_name: true,
            include_id: true,
            include_internal_id: false,
        }
    }
}

impl DisplayFlags {
    pub fn new(include_name: bool, include_id: bool, include_internal_id: bool) -> Self {
        Self {
            include_name,
            include_id,
            include_internal_id,
        }
    }

    /// No field selected; the label can only say the widget is misconfigured.
    pub fn is_misconfigured(&self) -> bool {
        !self.include_name && !self.include_id && !self.include_internal_id
    }

    /// All eight flag combinations, in a stable order.
    pub fn all() -> impl Iterator<Item = DisplayFlags> {
        (0u8..8).map(|bits| DisplayFlags::new(bits & 0b100 != 0, bits & 0b010 != 0, bits & 0b001 != 0))
    }
}
