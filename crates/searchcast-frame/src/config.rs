//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

/// Default bind address for local development.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Base URL used when no deployment host is known.
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default Farcaster profile linked from the second frame button.
const DEFAULT_PROFILE_ID: &str = "aminphantom.eth";

/// English Wikipedia MediaWiki API endpoint.
const DEFAULT_WIKI_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000").
    pub bind_addr: String,

    /// Public base URL of this service, without a trailing slash.
    /// Used to build absolute image and post URLs in frame meta tags.
    pub base_url: String,

    /// Frame title shown in `og:title` and the page heading.
    pub title: String,

    /// Farcaster profile identifier shown on the profile button.
    pub profile_id: String,

    /// Link target of the profile button.
    pub profile_url: String,

    /// MediaWiki `api.php` endpoint queried for summaries.
    pub wiki_api_url: String,

    /// Timeout applied to every upstream API request.
    pub upstream_timeout: Duration,

    /// Directory holding `inter.ttf` and the `icon.png` fallback.
    pub assets_dir: PathBuf,

    /// `max-age` (seconds) advertised on rendered images.
    pub image_max_age: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nothing is required; every value has a local development default.
    ///
    /// - `FRAME_BIND_ADDR`: Server bind address (default: "0.0.0.0:3000")
    /// - `FRAME_BASE_URL`: Public base URL. Falls back to `https://$VERCEL_URL`,
    ///   then "http://localhost:3000"
    /// - `FRAME_TITLE`: Frame title (default: "SearchCast-01")
    /// - `FRAME_PROFILE_ID`: Profile identifier (default: "aminphantom.eth")
    /// - `FRAME_PROFILE_URL`: Profile link (default: "https://warpcast.com/{profile_id}")
    /// - `FRAME_WIKI_API_URL`: MediaWiki API endpoint
    /// - `FRAME_UPSTREAM_TIMEOUT_SECS`: Upstream request timeout (default: 10)
    /// - `FRAME_ASSETS_DIR`: Static asset directory (default: "public")
    /// - `FRAME_IMAGE_MAX_AGE`: Image cache lifetime in seconds (default: 3600)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("FRAME_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let base_url = std::env::var("FRAME_BASE_URL")
            .ok()
            .or_else(|| {
                std::env::var("VERCEL_URL")
                    .ok()
                    .filter(|host| !host.trim().is_empty())
                    .map(|host| format!("https://{}", host.trim()))
            })
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = normalize_base_url(&base_url)?;

        let title = std::env::var("FRAME_TITLE").unwrap_or_else(|_| "SearchCast-01".to_string());

        let profile_id =
            std::env::var("FRAME_PROFILE_ID").unwrap_or_else(|_| DEFAULT_PROFILE_ID.to_string());

        let profile_url = std::env::var("FRAME_PROFILE_URL")
            .unwrap_or_else(|_| format!("https://warpcast.com/{profile_id}"));

        let wiki_api_url = std::env::var("FRAME_WIKI_API_URL")
            .unwrap_or_else(|_| DEFAULT_WIKI_API_URL.to_string());

        let upstream_timeout_secs: u64 = match std::env::var("FRAME_UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid FRAME_UPSTREAM_TIMEOUT_SECS '{raw}'"))?,
            Err(_) => 10,
        };

        let assets_dir = std::env::var("FRAME_ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));

        let image_max_age: u32 = match std::env::var("FRAME_IMAGE_MAX_AGE") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid FRAME_IMAGE_MAX_AGE '{raw}'"))?,
            Err(_) => 3600,
        };

        tracing::info!(
            bind_addr = %bind_addr,
            base_url = %base_url,
            profile_id = %profile_id,
            wiki_api_url = %wiki_api_url,
            upstream_timeout_secs,
            assets_dir = %assets_dir.display(),
            "frame configuration loaded"
        );

        Ok(Self {
            bind_addr,
            base_url,
            title,
            profile_id,
            profile_url,
            wiki_api_url,
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            assets_dir,
            image_max_age,
        })
    }

    /// Apply command-line overrides on top of the environment.
    pub fn apply_overrides(
        &mut self,
        bind_addr: Option<String>,
        base_url: Option<String>,
    ) -> anyhow::Result<()> {
        if let Some(bind_addr) = bind_addr {
            self.bind_addr = bind_addr;
        }
        if let Some(base_url) = base_url {
            self.base_url = normalize_base_url(&base_url)?;
        }
        Ok(())
    }

    /// Path of the font loaded into the renderer at startup.
    pub fn font_path(&self) -> PathBuf {
        self.assets_dir.join("inter.ttf")
    }

    /// Path of the static icon served as the initial frame image and as
    /// the fallback when rendering fails.
    pub fn icon_path(&self) -> PathBuf {
        self.assets_dir.join("icon.png")
    }
}

/// Strip trailing slashes and check that the result parses as a URL.
fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let base_url = raw.trim().trim_end_matches('/').to_string();
    url::Url::parse(&base_url).with_context(|| format!("invalid base URL '{base_url}'"))?;
    Ok(base_url)
}

#[cfg(test)]
impl Config {
    /// Default configuration for `base_url`, without touching the environment.
    pub(crate) fn for_tests(base_url: &str) -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            base_url: base_url.to_string(),
            title: "SearchCast-01".to_string(),
            profile_id: DEFAULT_PROFILE_ID.to_string(),
            profile_url: format!("https://warpcast.com/{DEFAULT_PROFILE_ID}"),
            wiki_api_url: DEFAULT_WIKI_API_URL.to_string(),
            upstream_timeout: Duration::from_secs(5),
            assets_dir: PathBuf::from("public"),
            image_max_age: 3600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize config tests that manipulate env vars.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "FRAME_BIND_ADDR",
        "FRAME_BASE_URL",
        "VERCEL_URL",
        "FRAME_TITLE",
        "FRAME_PROFILE_ID",
        "FRAME_PROFILE_URL",
        "FRAME_WIKI_API_URL",
        "FRAME_UPSTREAM_TIMEOUT_SECS",
        "FRAME_ASSETS_DIR",
        "FRAME_IMAGE_MAX_AGE",
    ];

    /// Helper to run config tests with isolated env vars.
    fn with_env_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_MUTEX.lock().unwrap();

        let saved: Vec<_> = ENV_KEYS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: Serialized by mutex; only test code touches these vars.
        unsafe {
            for k in ENV_KEYS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        // SAFETY: Restoring original env state.
        unsafe {
            for (k, v) in &saved {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn config_defaults() {
        with_env_vars(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.bind_addr, "0.0.0.0:3000");
            assert_eq!(config.base_url, "http://localhost:3000");
            assert_eq!(config.title, "SearchCast-01");
            assert_eq!(config.profile_id, "aminphantom.eth");
            assert_eq!(config.profile_url, "https://warpcast.com/aminphantom.eth");
            assert_eq!(config.wiki_api_url, "https://en.wikipedia.org/w/api.php");
            assert_eq!(config.upstream_timeout, Duration::from_secs(10));
            assert_eq!(config.assets_dir, PathBuf::from("public"));
            assert_eq!(config.image_max_age, 3600);
        });
    }

    #[test]
    fn config_custom_values() {
        with_env_vars(
            &[
                ("FRAME_BIND_ADDR", "127.0.0.1:9090"),
                ("FRAME_BASE_URL", "https://frame.example.com"),
                ("FRAME_PROFILE_ID", "someone.eth"),
                ("FRAME_UPSTREAM_TIMEOUT_SECS", "3"),
                ("FRAME_ASSETS_DIR", "/srv/assets"),
                ("FRAME_IMAGE_MAX_AGE", "60"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.bind_addr, "127.0.0.1:9090");
                assert_eq!(config.base_url, "https://frame.example.com");
                assert_eq!(config.profile_url, "https://warpcast.com/someone.eth");
                assert_eq!(config.upstream_timeout, Duration::from_secs(3));
                assert_eq!(config.icon_path(), PathBuf::from("/srv/assets/icon.png"));
                assert_eq!(config.image_max_age, 60);
            },
        );
    }

    #[test]
    fn config_base_url_from_vercel_host() {
        with_env_vars(&[("VERCEL_URL", "searchcast.vercel.app")], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.base_url, "https://searchcast.vercel.app");
        });
    }

    #[test]
    fn config_explicit_base_url_wins_over_vercel() {
        with_env_vars(
            &[
                ("VERCEL_URL", "searchcast.vercel.app"),
                ("FRAME_BASE_URL", "https://custom.example"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.base_url, "https://custom.example");
            },
        );
    }

    #[test]
    fn config_base_url_trailing_slash_stripped() {
        with_env_vars(&[("FRAME_BASE_URL", "https://frame.example.com/")], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.base_url, "https://frame.example.com");
        });
    }

    #[test]
    fn config_rejects_invalid_base_url() {
        with_env_vars(&[("FRAME_BASE_URL", "not a url")], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn config_rejects_invalid_timeout() {
        with_env_vars(&[("FRAME_UPSTREAM_TIMEOUT_SECS", "soon")], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn overrides_replace_env_values() {
        let mut config = Config::for_tests("http://localhost:3000");
        config
            .apply_overrides(
                Some("127.0.0.1:8080".to_string()),
                Some("https://cli.example/".to_string()),
            )
            .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.base_url, "https://cli.example");
    }

    #[test]
    fn overrides_absent_keep_config() {
        let mut config = Config::for_tests("https://frame.example");
        config.apply_overrides(None, None).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:0");
        assert_eq!(config.base_url, "https://frame.example");
    }

    #[test]
    fn overrides_reject_invalid_base_url() {
        let mut config = Config::for_tests("https://frame.example");
        assert!(config.apply_overrides(None, Some("nope".to_string())).is_err());
        assert_eq!(config.base_url, "https://frame.example");
    }

    #[test]
    fn config_profile_url_override() {
        with_env_vars(
            &[("FRAME_PROFILE_URL", "https://farcaster.xyz/aminphantom.eth")],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.profile_url, "https://farcaster.xyz/aminphantom.eth");
                assert_eq!(config.profile_id, "aminphantom.eth");
            },
        );
    }
}
