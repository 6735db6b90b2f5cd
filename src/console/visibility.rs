/// Whether the terminal overlay is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

/// Host input that can change visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEvent {
    /// The toggle key was pressed
    Toggle,
    /// The close key was pressed
    Escape,
    /// Pointer press outside the terminal's bounds
    ClickOutside,
    /// Pointer press inside the terminal's bounds
    ClickInside,
    /// The title bar's close button was pressed
    CloseButton,
}

impl Visibility {
    pub fn reduce(self, event: VisibilityEvent) -> Self {
        match (self, event) {
            (Visibility::Hidden, VisibilityEvent::Toggle) => Visibility::Visible,
            (Visibility::Visible, VisibilityEvent::Toggle) => Visibility::Hidden,
            (
                _,
                VisibilityEvent::Escape | VisibilityEvent::ClickOutside | VisibilityEvent::CloseButton,
            ) => Visibility::Hidden,
            (state, VisibilityEvent::ClickInside) => state,
        }
    }

    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}
