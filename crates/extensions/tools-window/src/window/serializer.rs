//! Renders command descriptors into platform script text.
//!
//! Every application name that ends up inside a script passes through
//! [`quote`] here and nowhere else; escaping itself is shared with the
//! reminder notifier.

pub use splitscreen_protocols::script::escape_applescript;

use crate::automation::{SUCCESS_MARKER, ShellCommand};

use super::command::{CommandDescriptor, Key, KeyChord, Modifier, Operation, ScriptVariant};
use super::window_types::{Platform, WindowBounds};

/// Deep link to the Accessibility privacy pane.
pub const ACCESSIBILITY_PANE_URL: &str =
    "x-apple.systempreferences:com.apple.preference.security?Privacy_Accessibility";

const FRONT_PROCESS: &str = "(first application process whose frontmost is true)";
const FRONT_APP: &str = "(path to frontmost application as text)";

fn quote(s: &str) -> String {
    format!("\"{}\"", escape_applescript(s))
}

/// `tell application` target: quoted name, or the frontmost app.
fn app_ref(app: Option<&str>) -> String {
    app.map(quote).unwrap_or_else(|| FRONT_APP.to_string())
}

/// System Events process reference: named process, or the frontmost one.
fn process_ref(app: Option<&str>) -> String {
    match app {
        Some(name) => format!("process {}", quote(name)),
        None => FRONT_PROCESS.to_string(),
    }
}

fn rect(b: &WindowBounds) -> String {
    format!("{{{}, {}, {}, {}}}", b.x, b.y, b.right(), b.bottom())
}

fn point(b: &WindowBounds) -> String {
    format!("{{{}, {}}}", b.x, b.y)
}

fn size(b: &WindowBounds) -> String {
    format!("{{{}, {}}}", b.width, b.height)
}

fn delay_secs(ms: u64) -> String {
    format!("{}", ms as f64 / 1000.0)
}

/// Wrap a script body so it prints the success marker or the error text.
fn wrap(body: &str) -> String {
    format!(
        "try\n{}\nreturn \"{}\"\non error errMsg number errNum\nreturn \"error: \" & errMsg & \" (\" & errNum & \")\"\nend try",
        body, SUCCESS_MARKER
    )
}

fn keystroke(chord: &KeyChord) -> String {
    let press = match chord.key {
        Key::Char(c) => format!("keystroke {}", quote(&c.to_string())),
        Key::Code(code) => format!("key code {}", code),
    };
    if chord.modifiers.is_empty() {
        return press;
    }
    let mods: Vec<&str> = chord
        .modifiers
        .iter()
        .map(|m| match m {
            Modifier::Command => "command down",
            Modifier::Control => "control down",
            Modifier::Option => "option down",
            Modifier::Shift => "shift down",
        })
        .collect();
    format!("{} using {{{}}}", press, mods.join(", "))
}

/// Fullscreen through the standard Cocoa shortcut after activating the app.
fn app_fullscreen(app: Option<&str>) -> String {
    format!(
        "tell application {} to activate\ntell application \"System Events\" to {}",
        app_ref(app),
        keystroke(&KeyChord::control_command('f'))
    )
}

fn app_level(desc: &CommandDescriptor, window: &str) -> String {
    let app = desc.app.as_deref();
    match &desc.operation {
        Operation::SetBounds(b) => match desc.variant {
            ScriptVariant::PositionThenSize => format!(
                "tell application {}\nset position of {w} to {}\ndelay {}\nset size of {w} to {}\nend tell",
                app_ref(app),
                point(b),
                delay_secs(desc.settle_delay_ms),
                size(b),
                w = window
            ),
            ScriptVariant::NestedWindowProperty => format!(
                "tell application {} to set properties of {} to {{bounds:{}}}",
                app_ref(app),
                window,
                rect(b)
            ),
            _ => format!(
                "tell application {} to set bounds of {} to {}",
                app_ref(app),
                window,
                rect(b)
            ),
        },
        Operation::Minimize => match desc.variant {
            ScriptVariant::NestedWindowProperty => format!(
                "tell application {} to set properties of {} to {{miniaturized:true}}",
                app_ref(app),
                window
            ),
            _ => format!(
                "tell application {} to set miniaturized of {} to true",
                app_ref(app),
                window
            ),
        },
        Operation::FullScreen => app_fullscreen(app),
        Operation::Keystroke(chord) => keystroke_body(app, chord),
    }
}

fn system_events(process: &str, window: &str, desc: &CommandDescriptor, ax: bool) -> String {
    let inner = match &desc.operation {
        Operation::SetBounds(b) if ax => format!(
            "set value of attribute \"AXPosition\" of {w} to {}\nset value of attribute \"AXSize\" of {w} to {}",
            point(b),
            size(b),
            w = window
        ),
        Operation::SetBounds(b) => format!(
            "set position of {w} to {}\nset size of {w} to {}",
            point(b),
            size(b),
            w = window
        ),
        Operation::Minimize => format!("set value of attribute \"AXMinimized\" of {} to true", window),
        Operation::FullScreen => format!("set value of attribute \"AXFullScreen\" of {} to true", window),
        Operation::Keystroke(chord) => keystroke(chord),
    };
    format!(
        "tell application \"System Events\"\ntell {}\n{}\nend tell\nend tell",
        process, inner
    )
}

fn keystroke_body(app: Option<&str>, chord: &KeyChord) -> String {
    match app {
        Some(name) => format!(
            "tell application {} to activate\ntell application \"System Events\" to {}",
            quote(name),
            keystroke(chord)
        ),
        None => format!("tell application \"System Events\" to {}", keystroke(chord)),
    }
}

/// Render a descriptor into an `osascript` invocation.
pub fn render(desc: &CommandDescriptor) -> ShellCommand {
    let app = desc.app.as_deref();
    let body = match desc.variant {
        ScriptVariant::AppBounds
        | ScriptVariant::PositionThenSize
        | ScriptVariant::NestedWindowProperty => app_level(desc, "front window"),
        ScriptVariant::IndexedWindow => app_level(desc, "window 1"),
        ScriptVariant::DocumentWindow => app_level(desc, "window of front document"),
        ScriptVariant::FrontProcess => system_events(FRONT_PROCESS, "window 1", desc, false),
        ScriptVariant::NamedProcess => system_events(&process_ref(app), "front window", desc, false),
        ScriptVariant::AxAttribute => system_events(&process_ref(app), "window 1", desc, true),
        ScriptVariant::IndexedProcessWindow => {
            system_events(&process_ref(app), "window 1", desc, false)
        }
        ScriptVariant::FirstWindowGuard => {
            let inner = system_events(FRONT_PROCESS, "first window", desc, false);
            format!(
                "tell application \"System Events\"\nif (count of windows of {}) is 0 then error \"no window found\"\nend tell\n{}",
                FRONT_PROCESS, inner
            )
        }
        ScriptVariant::Keystroke => match &desc.operation {
            Operation::Keystroke(chord) => keystroke_body(app, chord),
            _ => app_level(desc, "front window"),
        },
    };
    ShellCommand::osascript(wrap(&body))
}

/// Name of the frontmost application process.
pub fn foreground_probe() -> ShellCommand {
    ShellCommand::osascript(format!(
        "tell application \"System Events\" to get name of {}",
        FRONT_PROCESS
    ))
}

/// No-op probe that needs the Accessibility grant.
pub fn capability_probe() -> ShellCommand {
    ShellCommand::osascript(wrap(&format!(
        "tell application \"System Events\" to get count of windows of {}",
        FRONT_PROCESS
    )))
}

/// Number of windows of the named process. Prints a bare integer.
pub fn window_count_probe(process: &str) -> ShellCommand {
    ShellCommand::osascript(format!(
        "tell application \"System Events\" to count windows of {}",
        process_ref(Some(process))
    ))
}

/// Opens the Accessibility privacy pane.
pub fn open_accessibility_pane() -> ShellCommand {
    ShellCommand::new("open", vec![ACCESSIBILITY_PANE_URL.to_string()])
}

/// Single deterministic command for a fixed-capability platform.
///
/// Returns `None` on macOS, which has no fixed branch.
pub fn render_fixed(platform: Platform, operation: &Operation) -> Option<ShellCommand> {
    match platform {
        Platform::Windows => Some(ShellCommand::powershell(windows_script(operation))),
        Platform::Linux => Some(ShellCommand::sh(linux_script(operation))),
        Platform::MacOs => None,
    }
}

const WIN32_PRELUDE: &str = r#"Add-Type @"
using System;
using System.Runtime.InteropServices;
public class SplitScreenWin32 {
    [DllImport("user32.dll")] public static extern IntPtr GetForegroundWindow();
    [DllImport("user32.dll")] public static extern bool ShowWindow(IntPtr hWnd, int nCmdShow);
    [DllImport("user32.dll")] public static extern bool MoveWindow(IntPtr hWnd, int x, int y, int w, int h, bool repaint);
}
"@
$h = [SplitScreenWin32]::GetForegroundWindow()
if ($h -eq [IntPtr]::Zero) { Write-Output "error: no foreground window"; exit 1 }"#;

const SW_MAXIMIZE: u8 = 3;
const SW_MINIMIZE: u8 = 6;
const SW_RESTORE: u8 = 9;

fn windows_script(operation: &Operation) -> String {
    let action = match operation {
        Operation::SetBounds(b) => format!(
            "[SplitScreenWin32]::ShowWindow($h, {}) | Out-Null\nif ([SplitScreenWin32]::MoveWindow($h, {}, {}, {}, {}, $true)) {{ Write-Output \"{ok}\" }} else {{ Write-Output \"error: MoveWindow failed\" }}",
            SW_RESTORE,
            b.x,
            b.y,
            b.width,
            b.height,
            ok = SUCCESS_MARKER
        ),
        Operation::Minimize => show_window(SW_MINIMIZE),
        Operation::FullScreen => show_window(SW_MAXIMIZE),
        Operation::Keystroke(_) => {
            "Write-Output \"error: keystrokes are not sent on this platform\"".to_string()
        }
    };
    format!("{}\n{}", WIN32_PRELUDE, action)
}

fn show_window(cmd: u8) -> String {
    format!(
        "[SplitScreenWin32]::ShowWindow($h, {}) | Out-Null\nWrite-Output \"{}\"",
        cmd, SUCCESS_MARKER
    )
}

fn linux_script(operation: &Operation) -> String {
    let command = match operation {
        Operation::SetBounds(b) => format!(
            "wmctrl -r :ACTIVE: -b remove,maximized_vert,maximized_horz && wmctrl -r :ACTIVE: -e 0,{},{},{},{}",
            b.x, b.y, b.width, b.height
        ),
        Operation::Minimize => "xdotool getactivewindow windowminimize".to_string(),
        Operation::FullScreen => "wmctrl -r :ACTIVE: -b add,fullscreen".to_string(),
        Operation::Keystroke(_) => "false".to_string(),
    };
    format!("{} && echo {}", command, SUCCESS_MARKER)
}

#[cfg(test)]
#[path = "serializer_tests.rs"]
mod tests;
