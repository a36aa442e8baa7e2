/// Which screen of the card is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowStep {
    Setup,
    ChooseGender,
    ProduceLink,
    Ask,
    Celebrate,
}

impl FlowStep {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FlowStep::Setup => "setup",
            FlowStep::ChooseGender => "choose_gender",
            FlowStep::ProduceLink => "produce_link",
            FlowStep::Ask => "ask",
            FlowStep::Celebrate => "celebrate",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, FlowStep::Celebrate)
    }
}

/// Number of times the recipient went for the decline control.
///
/// Saturates at `u32::MAX` rather than wrapping back to the default label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclineCounter(u32);

impl DeclineCounter {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Index into a phrase list of `len` entries, or `None` for the default label.
    ///
    /// Count `n > 0` maps to `(n - 1) mod len`.
    #[must_use]
    pub const fn phrase_index(self, len: usize) -> Option<usize> {
        if self.0 == 0 || len == 0 {
            return None;
        }
        Some((self.0 as usize - 1) % len)
    }
}
