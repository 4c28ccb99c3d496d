//! Structured command descriptors.
//!
//! Recipes and the chain builder produce descriptors; only
//! [`serializer`](super::serializer) turns them into script text.

use serde::Serialize;

use super::window_types::{WindowAction, WindowBounds};

/// What a command should do to the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Operation {
    SetBounds(WindowBounds),
    Minimize,
    FullScreen,
    Keystroke(KeyChord),
}

impl Operation {
    pub fn for_action(action: WindowAction, bounds: WindowBounds) -> Self {
        match action {
            WindowAction::Minimize => Operation::Minimize,
            WindowAction::Fullscreen => Operation::FullScreen,
            _ => Operation::SetBounds(bounds),
        }
    }
}

/// Script template used to carry out an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptVariant {
    /// `set bounds of front window` on the application.
    AppBounds,
    /// `set position`, settle delay, then `set size`.
    PositionThenSize,
    /// `set properties of front window to {bounds: ...}`.
    NestedWindowProperty,
    /// `set bounds of window 1`.
    IndexedWindow,
    /// `set bounds of window of front document`.
    DocumentWindow,
    /// System Events against the frontmost process.
    FrontProcess,
    /// System Events against the process by name.
    NamedProcess,
    /// Raw `AXPosition` / `AXSize` attributes.
    AxAttribute,
    /// System Events, `window 1` of the named process.
    IndexedProcessWindow,
    /// Frontmost process, guarded by a window count check.
    FirstWindowGuard,
    /// Synthesized key press.
    Keystroke,
}

impl ScriptVariant {
    /// Variants of generic automation, tried in order inside one strategy.
    pub const GENERIC: [ScriptVariant; 5] = [
        ScriptVariant::AppBounds,
        ScriptVariant::PositionThenSize,
        ScriptVariant::NestedWindowProperty,
        ScriptVariant::IndexedWindow,
        ScriptVariant::DocumentWindow,
    ];

    /// Variants of elevated automation through System Events.
    pub const ELEVATED: [ScriptVariant; 5] = [
        ScriptVariant::FrontProcess,
        ScriptVariant::NamedProcess,
        ScriptVariant::AxAttribute,
        ScriptVariant::IndexedProcessWindow,
        ScriptVariant::FirstWindowGuard,
    ];

    /// Whether the variant needs an application name to be meaningful.
    pub fn needs_app(&self) -> bool {
        !matches!(
            self,
            ScriptVariant::FrontProcess | ScriptVariant::FirstWindowGuard | ScriptVariant::Keystroke
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptVariant::AppBounds => "app_bounds",
            ScriptVariant::PositionThenSize => "position_then_size",
            ScriptVariant::NestedWindowProperty => "nested_window_property",
            ScriptVariant::IndexedWindow => "indexed_window",
            ScriptVariant::DocumentWindow => "document_window",
            ScriptVariant::FrontProcess => "front_process",
            ScriptVariant::NamedProcess => "named_process",
            ScriptVariant::AxAttribute => "ax_attribute",
            ScriptVariant::IndexedProcessWindow => "indexed_process_window",
            ScriptVariant::FirstWindowGuard => "first_window_guard",
            ScriptVariant::Keystroke => "keystroke",
        }
    }
}

/// A key plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyChord {
    pub key: Key,
    pub modifiers: Vec<Modifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Char(char),
    /// macOS virtual key code.
    Code(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Command,
    Control,
    Option,
    Shift,
}

pub const KEY_RETURN: u16 = 36;
pub const KEY_LEFT: u16 = 123;
pub const KEY_RIGHT: u16 = 124;
pub const KEY_DOWN: u16 = 125;
pub const KEY_UP: u16 = 126;

impl KeyChord {
    pub fn new(key: Key, modifiers: &[Modifier]) -> Self {
        Self {
            key,
            modifiers: modifiers.to_vec(),
        }
    }

    pub fn command(c: char) -> Self {
        Self::new(Key::Char(c), &[Modifier::Command])
    }

    pub fn control_command(c: char) -> Self {
        Self::new(Key::Char(c), &[Modifier::Control, Modifier::Command])
    }

    fn control_option(key: Key) -> Self {
        Self::new(key, &[Modifier::Control, Modifier::Option])
    }

    /// System-wide tiling shortcut for `action`, using the common
    /// Rectangle/Spectacle bindings.
    pub fn global_for(action: WindowAction) -> Option<Self> {
        let chord = match action {
            WindowAction::SetLeftHalf => Self::control_option(Key::Code(KEY_LEFT)),
            WindowAction::SetRightHalf => Self::control_option(Key::Code(KEY_RIGHT)),
            WindowAction::SetTopHalf => Self::control_option(Key::Code(KEY_UP)),
            WindowAction::SetBottomHalf => Self::control_option(Key::Code(KEY_DOWN)),
            WindowAction::SetTopLeftQuarter => Self::control_option(Key::Char('u')),
            WindowAction::SetTopRightQuarter => Self::control_option(Key::Char('i')),
            WindowAction::SetBottomLeftQuarter => Self::control_option(Key::Char('j')),
            WindowAction::SetBottomRightQuarter => Self::control_option(Key::Char('k')),
            WindowAction::Maximize => Self::control_option(Key::Code(KEY_RETURN)),
            WindowAction::Minimize => Self::command('m'),
            WindowAction::Fullscreen => Self::control_command('f'),
        };
        Some(chord)
    }

    /// Human-readable form, e.g. `Control+Option+Left Arrow`.
    pub fn label(&self) -> String {
        let mut parts: Vec<String> = self
            .modifiers
            .iter()
            .map(|m| match m {
                Modifier::Command => "Command".to_string(),
                Modifier::Control => "Control".to_string(),
                Modifier::Option => "Option".to_string(),
                Modifier::Shift => "Shift".to_string(),
            })
            .collect();
        parts.push(match self.key {
            Key::Char(c) => c.to_ascii_uppercase().to_string(),
            Key::Code(KEY_LEFT) => "Left Arrow".to_string(),
            Key::Code(KEY_RIGHT) => "Right Arrow".to_string(),
            Key::Code(KEY_UP) => "Up Arrow".to_string(),
            Key::Code(KEY_DOWN) => "Down Arrow".to_string(),
            Key::Code(KEY_RETURN) => "Return".to_string(),
            Key::Code(code) => format!("key {}", code),
        });
        parts.join("+")
    }
}

/// One command to be rendered by the serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    /// Application or process name. `None` addresses the frontmost one.
    pub app: Option<String>,
    pub operation: Operation,
    pub variant: ScriptVariant,
    pub settle_delay_ms: u64,
}

impl CommandDescriptor {
    pub fn new(app: Option<&str>, operation: Operation, variant: ScriptVariant) -> Self {
        Self {
            app: app.map(str::to_string),
            operation,
            variant,
            settle_delay_ms: 0,
        }
    }

    pub fn with_settle_delay(mut self, ms: u64) -> Self {
        self.settle_delay_ms = ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_for_action() {
        let bounds = WindowBounds::new(0, 0, 960, 1080);
        assert_eq!(
            Operation::for_action(WindowAction::SetLeftHalf, bounds),
            Operation::SetBounds(bounds)
        );
        assert_eq!(Operation::for_action(WindowAction::Minimize, bounds), Operation::Minimize);
        assert_eq!(
            Operation::for_action(WindowAction::Fullscreen, bounds),
            Operation::FullScreen
        );
    }

    #[test]
    fn test_every_action_has_global_shortcut() {
        for action in WindowAction::ALL {
            assert!(KeyChord::global_for(action).is_some(), "{}", action);
        }
    }

    #[test]
    fn test_chord_label() {
        let chord = KeyChord::global_for(WindowAction::SetLeftHalf).unwrap();
        assert_eq!(chord.label(), "Control+Option+Left Arrow");
        assert_eq!(KeyChord::control_command('f').label(), "Control+Command+F");
    }

    #[test]
    fn test_variant_needs_app() {
        assert!(ScriptVariant::AppBounds.needs_app());
        assert!(ScriptVariant::NamedProcess.needs_app());
        assert!(!ScriptVariant::FrontProcess.needs_app());
        assert!(!ScriptVariant::FirstWindowGuard.needs_app());
    }
}
