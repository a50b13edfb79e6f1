//! crates/orchestrator/src/source.rs
//! Where the active configuration came from.

use std::fmt;

/// Provenance of an orchestrator's configuration.
///
/// Determined once, when the orchestrator is constructed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ConfigSource {
    /// Built-in defaults; no external configuration could be used.
    Default,
    /// A configuration passed directly to the instance call.
    DirectParams,
    /// A configuration registered beforehand through `set_config`.
    ExtFuncSetting,
    /// A configuration file, either set beforehand or the default file.
    ExtFileSpecified,
    /// Not yet determined.
    #[default]
    Unknown,
}

impl ConfigSource {
    /// Short stable name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::DirectParams => "direct",
            Self::ExtFuncSetting => "external-setting",
            Self::ExtFileSpecified => "external-file",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
