use std::fmt;
use std::str::FromStr;

/// Keys that move or confirm a selection. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Tab,
    Enter,
    Escape,
    Home,
    End,
}

impl NavKey {
    pub const ALL: [NavKey; 9] = [
        NavKey::ArrowUp,
        NavKey::ArrowDown,
        NavKey::ArrowLeft,
        NavKey::ArrowRight,
        NavKey::Tab,
        NavKey::Enter,
        NavKey::Escape,
        NavKey::Home,
        NavKey::End,
    ];

    /// Legacy `keyCode` values some hosts still report.
    pub fn from_key_code(code: u32) -> Option<NavKey> {
        match code {
            38 => Some(NavKey::ArrowUp),
            40 => Some(NavKey::ArrowDown),
            37 => Some(NavKey::ArrowLeft),
            39 => Some(NavKey::ArrowRight),
            9 => Some(NavKey::Tab),
            13 => Some(NavKey::Enter),
            27 => Some(NavKey::Escape),
            36 => Some(NavKey::Home),
            35 => Some(NavKey::End),
            _ => None,
        }
    }

    /// Parse a `key` identifier or a numeric key code.
    pub fn parse(key: &str) -> Option<NavKey> {
        let key = key.trim();
        if let Ok(code) = key.parse::<u32>() {
            return NavKey::from_key_code(code);
        }

        NavKey::ALL.into_iter().find(|k| k.as_str() == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavKey::ArrowUp => "ArrowUp",
            NavKey::ArrowDown => "ArrowDown",
            NavKey::ArrowLeft => "ArrowLeft",
            NavKey::ArrowRight => "ArrowRight",
            NavKey::Tab => "Tab",
            NavKey::Enter => "Enter",
            NavKey::Escape => "Escape",
            NavKey::Home => "Home",
            NavKey::End => "End",
        }
    }

    /// Dismissal keys may close the current surface.
    pub fn is_dismissal(&self) -> bool {
        matches!(self, NavKey::Escape)
    }
}

impl fmt::Display for NavKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NavKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NavKey::parse(s).ok_or_else(|| format!("not a navigation key: {}", s))
    }
}
