//! Known target applications.

use serde::Serialize;
use splitscreen_config::TargetConfig;

use super::command::{CommandDescriptor, KeyChord, Operation, ScriptVariant};
use super::window_types::{WindowAction, WindowBounds};

/// How a target is driven directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectRecipe {
    /// `tell application <app>` to set the bounds of its front window.
    FrontWindowBounds,
    /// System Events against the named process, for apps with no scripting
    /// dictionary (Electron and similar).
    ProcessWindow,
}

impl DirectRecipe {
    /// `app` is the scripting name, `process` the live process name.
    pub fn describe(
        &self,
        app: &str,
        process: &str,
        action: WindowAction,
        bounds: WindowBounds,
    ) -> CommandDescriptor {
        let (name, variant) = match self {
            DirectRecipe::FrontWindowBounds => (app, ScriptVariant::AppBounds),
            DirectRecipe::ProcessWindow => (process, ScriptVariant::NamedProcess),
        };
        CommandDescriptor::new(Some(name), Operation::for_action(action, bounds), variant)
    }

    /// System Events process scripting needs the Accessibility grant;
    /// talking to the application itself does not.
    pub fn needs_elevation(&self) -> bool {
        matches!(self, DirectRecipe::ProcessWindow)
    }
}

/// Per-target keyboard bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutRecipe {
    pub bindings: Vec<(WindowAction, KeyChord)>,
}

impl ShortcutRecipe {
    /// Minimize and fullscreen bindings shared by standard Cocoa apps.
    pub fn standard() -> Self {
        Self {
            bindings: vec![
                (WindowAction::Minimize, KeyChord::command('m')),
                (WindowAction::Fullscreen, KeyChord::control_command('f')),
            ],
        }
    }

    pub fn chord_for(&self, action: WindowAction) -> Option<&KeyChord> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == action)
            .map(|(_, chord)| chord)
    }

    pub fn describe(&self, app: &str, action: WindowAction) -> Option<CommandDescriptor> {
        self.chord_for(action).map(|chord| {
            CommandDescriptor::new(
                Some(app),
                Operation::Keystroke(chord.clone()),
                ScriptVariant::Keystroke,
            )
        })
    }
}

/// A known controllable application.
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    /// Display name, also used as the script-facing application name.
    pub name: String,
    /// Lowercase aliases matched against the foreground process name.
    pub aliases: Vec<String>,
    /// Whether the target accepts direct geometry control.
    pub scriptable: bool,
    pub direct: Option<DirectRecipe>,
    pub shortcuts: Option<ShortcutRecipe>,
}

impl Target {
    pub fn new(name: impl Into<String>, aliases: &[&str]) -> Self {
        Self {
            name: name.into(),
            aliases: aliases.iter().map(|a| a.to_lowercase()).collect(),
            scriptable: false,
            direct: None,
            shortcuts: None,
        }
    }

    pub fn with_direct(mut self, recipe: DirectRecipe) -> Self {
        self.scriptable = true;
        self.direct = Some(recipe);
        self
    }

    pub fn with_shortcuts(mut self, recipe: ShortcutRecipe) -> Self {
        self.shortcuts = Some(recipe);
        self
    }

    /// Descriptor for the direct recipe, if the target has one.
    ///
    /// `process` is the live foreground process matched to this target.
    pub fn direct_command(
        &self,
        process: &str,
        action: WindowAction,
        bounds: WindowBounds,
    ) -> Option<CommandDescriptor> {
        self.direct
            .map(|recipe| recipe.describe(&self.name, process, action, bounds))
    }

    /// Descriptor for the target's own shortcut for `action`, if bound.
    pub fn shortcut_command(&self, action: WindowAction) -> Option<CommandDescriptor> {
        self.shortcuts
            .as_ref()
            .and_then(|recipe| recipe.describe(&self.name, action))
    }

    fn matches(&self, process: &str) -> bool {
        self.aliases
            .iter()
            .map(|alias| squash(alias))
            .any(|alias| !alias.is_empty() && process.contains(&alias))
    }
}

impl From<&TargetConfig> for Target {
    fn from(config: &TargetConfig) -> Self {
        let mut aliases: Vec<&str> = config.aliases.iter().map(String::as_str).collect();
        if aliases.is_empty() {
            aliases.push(config.name.as_str());
        }
        let target = Target::new(config.name.clone(), &aliases);
        if config.scriptable {
            target.with_direct(DirectRecipe::FrontWindowBounds)
        } else {
            target
        }
    }
}

/// Lowercase with all whitespace removed.
fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Ordered, read-only list of targets.
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn new(targets: Vec<Target>) -> Self {
        Self { targets }
    }

    /// Built-in targets.
    pub fn builtin() -> Self {
        Self::new(builtin_targets())
    }

    /// Built-ins followed by configured targets, so built-ins win ties.
    pub fn with_configured(configured: &[TargetConfig]) -> Self {
        let mut targets = builtin_targets();
        targets.extend(configured.iter().map(Target::from));
        Self::new(targets)
    }

    /// First target with an alias contained in `process_name`.
    ///
    /// Case-insensitive, whitespace ignored on both sides.
    pub fn lookup(&self, process_name: &str) -> Option<&Target> {
        let process = squash(process_name);
        if process.is_empty() {
            return None;
        }
        self.targets.iter().find(|t| t.matches(&process))
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Names of targets that can be driven without extra permissions.
    pub fn direct_target_names(&self) -> Vec<&str> {
        self.targets
            .iter()
            .filter(|t| t.direct.is_some_and(|recipe| !recipe.needs_elevation()))
            .map(|t| t.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// Xcode precedes Visual Studio Code so that "Xcode" is not caught by the
// "code" alias.
fn builtin_targets() -> Vec<Target> {
    use DirectRecipe::*;

    vec![
        Target::new("Finder", &["finder"])
            .with_direct(FrontWindowBounds)
            .with_shortcuts(ShortcutRecipe::standard()),
        Target::new("Safari", &["safari"])
            .with_direct(FrontWindowBounds)
            .with_shortcuts(ShortcutRecipe::standard()),
        Target::new("Google Chrome", &["google chrome", "chrome"])
            .with_direct(FrontWindowBounds)
            .with_shortcuts(ShortcutRecipe::standard()),
        Target::new("Terminal", &["terminal"])
            .with_direct(FrontWindowBounds)
            .with_shortcuts(ShortcutRecipe::standard()),
        Target::new("TextEdit", &["textedit"])
            .with_direct(FrontWindowBounds)
            .with_shortcuts(ShortcutRecipe::standard()),
        Target::new("Xcode", &["xcode"]).with_shortcuts(ShortcutRecipe::standard()),
        Target::new("Visual Studio Code", &["visual studio code", "code"])
            .with_direct(ProcessWindow)
            .with_shortcuts(ShortcutRecipe::standard()),
        Target::new("WPS Office", &["wps office", "wpsoffice", "wps"])
            .with_direct(ProcessWindow),
        Target::new("Microsoft Word", &["microsoft word", "winword"])
            .with_direct(FrontWindowBounds)
            .with_shortcuts(ShortcutRecipe::standard()),
        Target::new("iTerm", &["iterm"])
            .with_direct(FrontWindowBounds)
            .with_shortcuts(ShortcutRecipe::standard()),
    ]
}
