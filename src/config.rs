//! User configuration: key bindings, scroll steps and persistence.
//!
//! Stored as `key = value` lines at
//! `$XDG_CONFIG_HOME/scroll-slides/config.toml`
//! (default `~/.config/scroll-slides/config.toml`).

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("empty key binding")]
    EmptyBinding,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
    #[error("`{key}`: invalid value `{value}`")]
    InvalidValue { key: String, value: String },
}

// ───────────────────────────────────────── actions ───────────

/// Everything a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    PrevSlide,
    NextSlide,
    Top,
    Bottom,
    ToggleDebug,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::PrevSlide,
        Action::NextSlide,
        Action::Top,
        Action::Bottom,
        Action::ToggleDebug,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::PrevSlide => "prev_slide",
            Action::NextSlide => "next_slide",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::ToggleDebug => "toggle_debug",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Key code plus CTRL/ALT/SHIFT modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

fn modifier_mask() -> KeyModifiers {
    KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self {
            code,
            modifiers: modifiers & modifier_mask(),
        }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Platform modifiers such as SUPER are ignored.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && self.modifiers == (event.modifiers & modifier_mask())
    }

    /// Short form for the status bar (`"↓"`, `"Ctrl+d"`).
    pub fn short(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            other => key_name(other),
        });
        s
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    for (flag, name) in [
        (KeyModifiers::CONTROL, "Ctrl+"),
        (KeyModifiers::ALT, "Alt+"),
        (KeyModifiers::SHIFT, "Shift+"),
    ] {
        if modifiers.contains(flag) {
            s.push_str(name);
        }
    }
    s
}

/// Config-file name of a key code.
fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

impl fmt::Display for KeyBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", modifier_prefix(self.modifiers), key_name(self.code))
    }
}

impl FromStr for KeyBind {
    type Err = ConfigError;

    /// Parse `"Ctrl+d"`, `"Shift+Space"`, `"PageDown"`, `"j"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ConfigError::EmptyBinding);
        }
        // A lone "+" is the plus key, not a separator.
        let (prefix, key) = match s.rsplit_once('+') {
            Some((prefix, "")) => (prefix.strip_suffix('+').unwrap_or(""), "+"),
            Some((prefix, key)) => (prefix, key),
            None => ("", s),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in prefix.split('+').filter(|p| !p.is_empty()) {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(ConfigError::UnknownModifier(part.to_string())),
            };
        }

        let lower = key.to_lowercase();
        let code = match lower.as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            f if f.len() > 1 && f.starts_with('f') => match f[1..].parse::<u8>() {
                Ok(n) => KeyCode::F(n),
                Err(_) => return Err(ConfigError::UnknownKey(key.to_string())),
            },
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(ConfigError::UnknownKey(key.to_string())),
                }
            }
        };

        Ok(KeyBind::new(code, modifiers))
    }
}

// ───────────────────────────────────────── config ────────────

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Rows moved by ScrollUp / ScrollDown.
    pub scroll_step: u16,
    /// Rows moved by one mouse-wheel notch.
    pub wheel_step: u16,
    /// Ease toward the target offset instead of jumping.
    pub smooth_scroll: bool,
    /// Fraction of the remaining distance covered per tick.
    pub smooth_speed: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            scroll_step: 1,
            wheel_step: 3,
            smooth_scroll: true,
            smooth_speed: 0.35,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let ctrl = KeyModifiers::CONTROL;
        let mut m = HashMap::new();

        m.insert(Action::ScrollUp, vec![KeyBind::plain(Up), KeyBind::plain(Char('k'))]);
        m.insert(Action::ScrollDown, vec![KeyBind::plain(Down), KeyBind::plain(Char('j'))]);
        m.insert(
            Action::PageUp,
            vec![KeyBind::plain(PageUp), KeyBind::new(Char('u'), ctrl)],
        );
        m.insert(
            Action::PageDown,
            vec![
                KeyBind::plain(PageDown),
                KeyBind::plain(Char(' ')),
                KeyBind::new(Char('d'), ctrl),
            ],
        );
        m.insert(Action::PrevSlide, vec![KeyBind::plain(Left), KeyBind::plain(Char('h'))]);
        m.insert(Action::NextSlide, vec![KeyBind::plain(Right), KeyBind::plain(Char('l'))]);
        m.insert(Action::Top, vec![KeyBind::plain(Home), KeyBind::plain(Char('g'))]);
        m.insert(
            Action::Bottom,
            vec![KeyBind::plain(End), KeyBind::new(Char('G'), KeyModifiers::SHIFT)],
        );
        m.insert(Action::ToggleDebug, vec![KeyBind::plain(Char('d'))]);
        m.insert(Action::Quit, vec![KeyBind::plain(Char('q')), KeyBind::plain(Esc)]);

        m
    }

    /// Action bound to `event`; with several matches the binding carrying the
    /// most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    fn first_binding(&self, action: Action) -> String {
        self.bindings
            .get(&action)
            .and_then(|b| b.first())
            .map_or_else(|| "?".into(), KeyBind::short)
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}/{}: slide | {}: debug | {}: quit",
            self.first_binding(Action::ScrollUp),
            self.first_binding(Action::ScrollDown),
            self.first_binding(Action::PrevSlide),
            self.first_binding(Action::NextSlide),
            self.first_binding(Action::ToggleDebug),
            self.first_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load from the config path, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::parse(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    /// Write to the config path, returning where it went.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    /// Parse config text.  Bad lines are logged and skipped.
    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();
        for (lineno, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!(line = lineno + 1, "config line without `=`");
                continue;
            };
            if let Err(err) = config.apply(key.trim(), value.trim()) {
                tracing::warn!(line = lineno + 1, %err, "ignoring config line");
            }
        }
        config
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "scroll_step" => {
                self.scroll_step = value.parse::<u16>().map_err(|_| invalid())?.clamp(1, 100);
            }
            "wheel_step" => {
                self.wheel_step = value.parse::<u16>().map_err(|_| invalid())?.clamp(1, 100);
            }
            "smooth_scroll" => {
                self.smooth_scroll = value.parse::<bool>().map_err(|_| invalid())?;
            }
            "smooth_speed" => {
                let speed = value.parse::<f64>().map_err(|_| invalid())?;
                if !speed.is_finite() {
                    return Err(invalid());
                }
                self.smooth_speed = speed.clamp(0.05, 0.95);
            }
            _ => {
                let action = Action::from_config_key(key).ok_or_else(invalid)?;
                let binds = value
                    .split(',')
                    .map(|part| part.trim().trim_matches('"').parse::<KeyBind>())
                    .collect::<Result<Vec<_>, _>>()?;
                if binds.is_empty() {
                    return Err(ConfigError::EmptyBinding);
                }
                self.bindings.insert(action, binds);
            }
        }
        Ok(())
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# scroll-slides configuration".to_string(),
            String::new(),
            format!("scroll_step = {}", self.scroll_step),
            format!("wheel_step = {}", self.wheel_step),
            format!("smooth_scroll = {}", self.smooth_scroll),
            format!("smooth_speed = {}", self.smooth_speed),
            String::new(),
            "# action = Key1, Key2  (Ctrl+, Alt+, Shift+ prefixes)".to_string(),
        ];
        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(KeyBind::to_string).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn parses_bindings() {
        assert_eq!("j".parse::<KeyBind>(), Ok(KeyBind::plain(KeyCode::Char('j'))));
        assert_eq!(
            "Ctrl+d".parse::<KeyBind>(),
            Ok(KeyBind::new(KeyCode::Char('d'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            "alt+shift+PgDn".parse::<KeyBind>(),
            Ok(KeyBind::new(
                KeyCode::PageDown,
                KeyModifiers::ALT | KeyModifiers::SHIFT
            ))
        );
        assert_eq!("F5".parse::<KeyBind>(), Ok(KeyBind::plain(KeyCode::F(5))));
        assert_eq!("+".parse::<KeyBind>(), Ok(KeyBind::plain(KeyCode::Char('+'))));
        assert_eq!(
            "Ctrl++".parse::<KeyBind>(),
            Ok(KeyBind::new(KeyCode::Char('+'), KeyModifiers::CONTROL))
        );
    }

    #[test]
    fn rejects_bad_bindings() {
        assert_eq!("".parse::<KeyBind>(), Err(ConfigError::EmptyBinding));
        assert_eq!(
            "Hyper+x".parse::<KeyBind>(),
            Err(ConfigError::UnknownModifier("Hyper".into()))
        );
        assert_eq!(
            "Nope".parse::<KeyBind>(),
            Err(ConfigError::UnknownKey("Nope".into()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for binds in AppConfig::default_bindings().values() {
            for b in binds {
                assert_eq!(b.to_string().parse::<KeyBind>().as_ref(), Ok(b));
            }
        }
    }

    #[test]
    fn match_prefers_more_modifiers() {
        let mut config = AppConfig::default();
        config
            .bindings
            .insert(Action::Bottom, vec![KeyBind::new(KeyCode::Char('d'), KeyModifiers::ALT)]);

        assert_eq!(
            config.match_key(key(KeyCode::Char('d'), KeyModifiers::NONE)),
            Some(Action::ToggleDebug)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(Action::PageDown)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('d'), KeyModifiers::ALT)),
            Some(Action::Bottom)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn super_modifier_is_ignored() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Char('q'), KeyModifiers::SUPER)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn parse_overrides_and_skips_bad_lines() {
        let config = AppConfig::parse(
            "# comment\n\
             [section]\n\
             scroll_step = 4\n\
             wheel_step = lots\n\
             smooth_scroll = false\n\
             smooth_speed = 2.0\n\
             quit = x, Ctrl+x\n\
             next_slide = Bogus+n\n\
             unknown_action = q\n\
             garbage\n",
        );
        assert_eq!(config.scroll_step, 4);
        assert_eq!(config.wheel_step, 3);
        assert!(!config.smooth_scroll);
        assert_eq!(config.smooth_speed, 0.95);
        assert_eq!(
            config.bindings[&Action::Quit],
            vec![
                KeyBind::plain(KeyCode::Char('x')),
                KeyBind::new(KeyCode::Char('x'), KeyModifiers::CONTROL)
            ]
        );
        assert_eq!(
            config.bindings[&Action::NextSlide],
            AppConfig::default_bindings()[&Action::NextSlide]
        );
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut config = AppConfig::default();
        config.scroll_step = 7;
        config.smooth_scroll = false;
        config.bindings.insert(Action::Top, vec![KeyBind::plain(KeyCode::F(2))]);
        assert_eq!(AppConfig::parse(&config.serialise()), config);
    }

    #[test]
    fn hint_uses_first_bindings() {
        let hint = AppConfig::default().status_bar_hint();
        assert!(hint.starts_with("↑/↓: scroll"));
        assert!(hint.contains("d: debug"));
    }
}
