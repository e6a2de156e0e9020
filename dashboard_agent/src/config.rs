//! Startup configuration: environment variables, then CLI overrides.

use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_INTERFACE: &str = "eth0";
pub const DEFAULT_ZPOOL_STATUS: &str = "/app/zpool_status.txt";
pub const DEFAULT_FRONTEND_DIR: &str = "./frontend";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub port: u16,
    pub path_films: Option<PathBuf>,
    pub path_series: Option<PathBuf>,
    pub path_animes: Option<PathBuf>,
    pub net_interface: String,
    pub plex_url: Option<String>,
    pub plex_token: Option<String>,
    pub zpool_status_path: PathBuf,
    /// Dashboard assets served on every path other than /ws.
    pub frontend_dir: PathBuf,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            path_films: None,
            path_series: None,
            path_animes: None,
            net_interface: DEFAULT_INTERFACE.to_string(),
            plex_url: None,
            plex_token: None,
            zpool_status_path: PathBuf::from(DEFAULT_ZPOOL_STATUS),
            frontend_dir: PathBuf::from(DEFAULT_FRONTEND_DIR),
        }
    }
}

impl AgentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("WEBUI_PORT") {
            Some(v) => v.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                source_name: "WEBUI_PORT",
                value: v,
            })?,
            None => defaults.port,
        };

        Ok(Self {
            port,
            path_films: get("PATH_FILMS").map(PathBuf::from),
            path_series: get("PATH_SERIES").map(PathBuf::from),
            path_animes: get("PATH_ANIMES").map(PathBuf::from),
            net_interface: get("NET_INTERFACE").unwrap_or(defaults.net_interface),
            plex_url: get("PLEX_URL").map(|u| u.trim_end_matches('/').to_string()),
            plex_token: get("PLEX_TOKEN"),
            zpool_status_path: get("ZPOOL_STATUS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.zpool_status_path),
            frontend_dir: get("FRONTEND_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.frontend_dir),
        })
    }

    /// Disk usage target: the films library if configured, else the root fs.
    pub fn monitor_path(&self) -> PathBuf {
        self.path_films
            .clone()
            .unwrap_or_else(|| PathBuf::from("/"))
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub help: bool,
}

pub fn usage(prog: &str) -> String {
    format!("Usage: {prog} [--port PORT|-p PORT]\n\nSettings are read from WEBUI_PORT, PATH_FILMS, PATH_SERIES, PATH_ANIMES, NET_INTERFACE, PLEX_URL, PLEX_TOKEN, ZPOOL_STATUS_PATH and FRONTEND_DIR.")
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs, ConfigError> {
    let mut it = args.into_iter();
    let _ = it.next(); // program name
    let mut out = CliArgs::default();
    let mut raw: Option<String> = None;
    while let Some(a) = it.next() {
        match a.as_str() {
            "-h" | "--help" => out.help = true,
            "--port" | "-p" => raw = it.next(),
            _ if a.starts_with("--port=") => {
                if let Some((_, v)) = a.split_once('=') {
                    raw = Some(v.to_string());
                }
            }
            _ => {}
        }
    }
    if let Some(v) = raw {
        let port = v.parse::<u16>().map_err(|_| ConfigError::InvalidPort {
            source_name: "--port",
            value: v,
        })?;
        out.port = Some(port);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_environment_empty() {
        let cfg = AgentConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AgentConfig::default());
        assert_eq!(cfg.monitor_path(), PathBuf::from("/"));
    }

    #[test]
    fn reads_all_variables() {
        let cfg = AgentConfig::from_lookup(lookup(&[
            ("WEBUI_PORT", "9100"),
            ("PATH_FILMS", "/mnt/films"),
            ("PATH_SERIES", "/mnt/series"),
            ("PATH_ANIMES", ""),
            ("NET_INTERFACE", "bond0"),
            ("PLEX_URL", "http://plex:32400/"),
            ("PLEX_TOKEN", "abc"),
            ("FRONTEND_DIR", "/srv/dashboard"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 9100);
        assert_eq!(cfg.path_animes, None);
        assert_eq!(cfg.net_interface, "bond0");
        assert_eq!(cfg.plex_url.as_deref(), Some("http://plex:32400"));
        assert_eq!(cfg.monitor_path(), PathBuf::from("/mnt/films"));
        assert_eq!(cfg.frontend_dir, PathBuf::from("/srv/dashboard"));
    }

    #[test]
    fn rejects_bad_port() {
        let err = AgentConfig::from_lookup(lookup(&[("WEBUI_PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("WEBUI_PORT"));
    }

    #[test]
    fn port_long_short_and_assign() {
        let args = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(
            parse_args(args(&["agent", "--port", "9001"])).unwrap().port,
            Some(9001)
        );
        assert_eq!(parse_args(args(&["agent", "-p", "9002"])).unwrap().port, Some(9002));
        assert_eq!(parse_args(args(&["agent", "--port=9003"])).unwrap().port, Some(9003));
        assert_eq!(parse_args(args(&["agent"])).unwrap(), CliArgs::default());
        assert!(parse_args(args(&["agent", "-p", "x"])).is_err());
        assert!(parse_args(args(&["agent", "--help"])).unwrap().help);
    }
}
