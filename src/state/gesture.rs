/// Input gesture state machine.
///
/// ```text
///           begin_draw           end_draw
///   Idle ─────────────► Drawing ─────────► Idle
///   Idle ─────────────► Erasing ─────────► Idle
///           begin_erase          end_erase
/// ```
///
/// Point batches are only interpreted according to the active state; a
/// begin marker while another gesture is active ends that gesture first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No pen or eraser contact
    #[default]
    Idle,
    /// Pen-tip gesture; batches are painted with the current tool
    Drawing,
    /// Eraser-end gesture; samples are accumulated and flushed in batches
    Erasing,
}

impl GestureState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: GestureState) -> bool {
        matches!(
            (self, new_state),
            (Self::Idle, Self::Drawing | Self::Erasing) | (Self::Drawing | Self::Erasing, Self::Idle)
        )
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing)
    }

    pub fn is_erasing(&self) -> bool {
        matches!(self, Self::Erasing)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing => "Drawing",
            Self::Erasing => "Erasing",
        }
    }
}
