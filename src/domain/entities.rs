//! Domain entities: core data structures

use std::fmt;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use crate::domain::DomainError;

/// Port ssh connects to when a block has no `Port` directive.
pub const DEFAULT_PORT: u16 = 22;

/// One `Host` block of an SSH client config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostEntry {
    /// `Host` patterns, in file order
    pub aliases: Vec<String>,
    pub hostname: Option<String>,
    pub user: Option<String>,
    pub port: Option<u16>,
    /// Unmodelled directives and comments, trimmed, in file order
    pub extra: Vec<String>,
    /// Comment and blank lines directly above the `Host` line
    pub leading: Vec<String>,
}

impl HostEntry {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            aliases: vec![alias.into()],
            ..Self::default()
        }
    }

    /// Build a fresh entry for `alias` pointing at the target described by `spec`.
    pub fn from_spec(alias: impl Into<String>, spec: &HostSpec) -> Self {
        Self {
            aliases: vec![alias.into()],
            hostname: Some(spec.hostname.clone()),
            user: spec.user.clone(),
            port: spec.port,
            extra: Vec::new(),
            leading: Vec::new(),
        }
    }

    /// Port ssh would use for this entry.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }

    /// True if any of hostname, user, port or alias equals one of `terms`.
    ///
    /// Matching is exact and case-sensitive.
    pub fn matches_any(&self, terms: &[String]) -> bool {
        let port = self.effective_port().to_string();
        let mut values = self
            .hostname
            .iter()
            .chain(self.user.iter())
            .map(String::as_str)
            .chain(std::iter::once(port.as_str()))
            .chain(self.aliases.iter().map(String::as_str));
        values.any(|value| terms.iter().any(|term| term == value))
    }

    /// Drop every alias listed in `targets`. Returns true if the entry has no aliases left.
    pub fn remove_aliases(&mut self, targets: &[String]) -> bool {
        self.aliases.retain(|a| !targets.contains(a));
        self.aliases.is_empty()
    }

    /// Replace the first occurrence of `old` with `new`, keeping its position.
    pub fn rename_alias(&mut self, old: &str, new: &str) -> bool {
        match self.aliases.iter_mut().find(|a| a.as_str() == old) {
            Some(slot) => {
                *slot = new.to_string();
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for HostEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.aliases.iter().join(" "))?;
        if let Some(hostname) = &self.hostname {
            write!(f, " -> ")?;
            if let Some(user) = &self.user {
                write!(f, "{user}@")?;
            }
            write!(f, "{hostname}:{}", self.effective_port())?;
        }
        Ok(())
    }
}

static HOST_SPEC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<user>[^@\s]+)@)?(?P<host>\[[^\]\s]+\]|[^@:\s\[\]]+)(?::(?P<port>[^:]*))?$")
        .expect("host spec pattern compiles")
});

/// Connection target given to `add`: `[user@]hostname[:port]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSpec {
    pub user: Option<String>,
    pub hostname: String,
    pub port: Option<u16>,
}

impl HostSpec {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidHostSpec {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let caps = HOST_SPEC_RE
            .captures(input.trim())
            .ok_or_else(|| invalid("expected [user@]hostname[:port]"))?;

        let host = &caps["host"];
        let hostname = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host)
            .to_string();
        if hostname.is_empty() {
            return Err(invalid("hostname is empty"));
        }

        let port = match caps.name("port") {
            None => None,
            Some(m) => match m.as_str().parse::<u16>() {
                Ok(0) | Err(_) => return Err(invalid("port must be a number between 1 and 65535")),
                Ok(p) => Some(p),
            },
        };

        Ok(Self {
            user: caps.name("user").map(|m| m.as_str().to_string()),
            hostname,
            port,
        })
    }
}

/// Reject aliases the config format cannot represent as a single `Host` pattern.
pub fn validate_alias(alias: &str) -> Result<(), DomainError> {
    let reason = if alias.is_empty() {
        "alias is empty"
    } else if alias.chars().any(char::is_whitespace) {
        "alias must not contain whitespace"
    } else if alias.contains('"') {
        "alias must not contain quotes"
    } else {
        return Ok(());
    };
    Err(DomainError::InvalidAlias {
        alias: alias.to_string(),
        reason: reason.to_string(),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`; leaves the input untouched when expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
