//! Click events and gesture decisions.

/// Mouse button that produced a click.
///
/// Only the primary button takes part in gesture classification; other
/// buttons are carried through so the classifier can ignore them explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button on right-handed setups.
    Primary,
    /// Any other button.
    Other,
}

/// Modifier keys held while a click happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Alt (left or right).
    pub alt: bool,
    /// Control (left or right).
    pub ctrl: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self {
        alt: false,
        ctrl: false,
    };

    /// Only Alt held.
    pub const ALT: Self = Self {
        alt: true,
        ctrl: false,
    };

    /// Only Control held.
    pub const CTRL: Self = Self {
        alt: false,
        ctrl: true,
    };
}

/// A completed click (button release) fed to the gesture classifier.
///
/// Ephemeral: consumed as soon as it is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// Monotonic tick in milliseconds.
    pub timestamp_ms: u64,
    /// Button that was released.
    pub button: MouseButton,
    /// Modifiers held at release time.
    pub modifiers: Modifiers,
}

impl ClickEvent {
    /// Primary-button click at `timestamp_ms` with the given modifiers.
    pub fn primary(timestamp_ms: u64, modifiers: Modifiers) -> Self {
        Self {
            timestamp_ms,
            button: MouseButton::Primary,
            modifiers,
        }
    }
}

/// Outcome of classifying one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// The click does not complete a gesture.
    None,
    /// The configured click count and modifier rule matched.
    PrimaryTrigger,
    /// A Ctrl shortcut (`--ctrl1` / `--ctrl2`) matched.
    ShortcutTrigger,
}

impl Decision {
    /// Whether this decision should start a copy.
    pub fn is_trigger(self) -> bool {
        !matches!(self, Decision::None)
    }
}
