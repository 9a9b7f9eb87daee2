//! Environment snapshot handed to every `gmx` child process.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

/// Variables the engine needs: lookup path plus the GROMACS install directories.
pub const ENGINE_ENV_KEYS: [&str; 5] = ["PATH", "GMXBIN", "GMXLDLIB", "GMXMAN", "GMXDATA"];

/// Whitelisted copy of the caller's environment.
///
/// Children are started with a cleared environment plus exactly these entries.
/// Values are kept as `OsString` so non-UTF-8 paths pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineEnvironment {
    vars: BTreeMap<String, OsString>,
}

impl EngineEnvironment {
    /// Snapshot the current process environment.
    pub fn resolve() -> Self {
        Self::from_vars_os(std::env::vars_os())
    }

    /// Build from raw OS variables. Only the key has to be UTF-8 to match the whitelist.
    pub fn from_vars_os<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let vars = vars
            .into_iter()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v)))
            .filter(|(k, _)| ENGINE_ENV_KEYS.contains(&k.as_str()))
            .collect();
        EngineEnvironment { vars }
    }

    /// Build from an arbitrary set of variables, keeping only whitelisted keys.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self::from_vars_os(vars.into_iter().map(|(k, v)| (k.into(), v.into())))
    }

    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(key).map(OsString::as_os_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_os_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(env: &'a EngineEnvironment, key: &str) -> Option<&'a str> {
        env.get(key).and_then(OsStr::to_str)
    }

    #[test]
    fn test_from_vars_keeps_whitelisted_values() {
        let env = EngineEnvironment::from_vars([
            ("PATH", "/usr/bin:/bin"),
            ("GMXBIN", "/opt/gromacs/bin"),
            ("GMXDATA", "/opt/gromacs/share"),
        ]);
        assert_eq!(env.len(), 3);
        assert_eq!(get(&env, "PATH"), Some("/usr/bin:/bin"));
        assert_eq!(get(&env, "GMXBIN"), Some("/opt/gromacs/bin"));
        assert_eq!(get(&env, "GMXDATA"), Some("/opt/gromacs/share"));
    }

    #[test]
    fn test_from_vars_drops_everything_else() {
        let env = EngineEnvironment::from_vars([
            ("HOME", "/root"),
            ("LD_LIBRARY_PATH", "/opt/lib"),
            ("OMP_NUM_THREADS", "8"),
            ("GMXLDLIB", "/opt/gromacs/lib"),
            ("path", "lowercase-is-not-PATH"),
        ]);
        assert_eq!(env.len(), 1);
        assert_eq!(get(&env, "GMXLDLIB"), Some("/opt/gromacs/lib"));
        assert!(env.get("HOME").is_none());
        assert!(env.get("path").is_none());
    }

    #[test]
    fn test_missing_keys_are_not_an_error() {
        let env = EngineEnvironment::from_vars(Vec::<(String, String)>::new());
        assert!(env.is_empty());
    }

    #[test]
    fn test_resolve_only_returns_whitelisted_keys() {
        let env = EngineEnvironment::resolve();
        for (k, v) in env.iter() {
            assert!(ENGINE_ENV_KEYS.contains(&k));
            assert_eq!(std::env::var_os(k).as_deref(), Some(v));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_value_is_kept_verbatim() {
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"/opt/gromacs-\xff/share");
        let env = EngineEnvironment::from_vars_os([
            (OsString::from("GMXDATA"), raw.to_os_string()),
            (OsString::from("HOME"), raw.to_os_string()),
        ]);
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("GMXDATA"), Some(raw));
        assert_eq!(env.get("GMXDATA").map(OsStr::as_bytes), Some(&b"/opt/gromacs-\xff/share"[..]));
    }
}
