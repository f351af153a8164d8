//! Host lifecycle events.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Script events a host package manager can dispatch to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginEvent {
    /// Before dependencies are installed from the lock file.
    PreInstallCmd,
    /// After dependencies were installed.
    PostInstallCmd,
    /// Before dependencies are updated.
    PreUpdateCmd,
    /// After dependencies were updated.
    PostUpdateCmd,
    /// After the autoloader was dumped.
    PostAutoloadDump,
}

impl PluginEvent {
    /// All known events.
    pub const ALL: [PluginEvent; 5] = [
        Self::PreInstallCmd,
        Self::PostInstallCmd,
        Self::PreUpdateCmd,
        Self::PostUpdateCmd,
        Self::PostAutoloadDump,
    ];

    /// Host-side event name (e.g., "post-install-cmd").
    pub fn name(&self) -> &'static str {
        match self {
            Self::PreInstallCmd => "pre-install-cmd",
            Self::PostInstallCmd => "post-install-cmd",
            Self::PreUpdateCmd => "pre-update-cmd",
            Self::PostUpdateCmd => "post-update-cmd",
            Self::PostAutoloadDump => "post-autoload-dump",
        }
    }
}

impl fmt::Display for PluginEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unknown event names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event '{0}'")]
pub struct UnknownEvent(pub String);

impl FromStr for PluginEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for event in PluginEvent::ALL {
            assert_eq!(event.name().parse::<PluginEvent>().unwrap(), event);
        }
    }

    #[test]
    fn test_unknown_event() {
        let err = "post-nothing".parse::<PluginEvent>().unwrap_err();
        assert_eq!(err.to_string(), "unknown event 'post-nothing'");
    }
}
