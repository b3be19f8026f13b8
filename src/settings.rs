use anyhow::{Context, Result};
use directories::ProjectDirs;
use ripple::SimConfig;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub(crate) fn default_settings_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("com", "ripple", "Ripple")
        .context("could not resolve project directories")?;
    let dir = proj.config_dir().to_path_buf();
    fs::create_dir_all(&dir).ok();
    Ok(dir.join("settings.json"))
}

/// Missing or unreadable settings fall back to defaults.
pub(crate) fn load_settings(path: &Path) -> SimConfig {
    let Ok(s) = fs::read_to_string(path) else {
        return SimConfig::default();
    };
    match serde_json::from_str::<SimConfig>(&s) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable settings");
            SimConfig::default()
        }
    }
}

pub(crate) fn save_settings_atomic(path: &Path, s: &SimConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok();
    }
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("removing old {}", path.display()))?;
    }
    fs::rename(&tmp, path).with_context(|| format!("renaming onto {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ripple-settings-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join("settings.json")
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let p = scratch("missing");
        let _ = fs::remove_file(&p);
        assert_eq!(load_settings(&p), SimConfig::default());
    }

    #[test]
    fn test_garbage_gives_defaults() {
        let p = scratch("garbage");
        fs::write(&p, "{ not json").unwrap();
        assert_eq!(load_settings(&p), SimConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let p = scratch("roundtrip");
        let cfg = SimConfig {
            damping: 0.95,
            auto_ripples: true,
            ..SimConfig::default()
        };
        save_settings_atomic(&p, &SimConfig::default()).unwrap();
        save_settings_atomic(&p, &cfg).unwrap();
        assert_eq!(load_settings(&p), cfg);
        assert!(!p.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_save_fails_when_target_cannot_be_removed() {
        let p = scratch("blocked");
        let _ = fs::remove_file(&p);
        let _ = fs::remove_dir_all(&p);
        fs::create_dir_all(p.join("occupied")).unwrap();
        let err = save_settings_atomic(&p, &SimConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("removing old"), "{err:#}");
        fs::remove_dir_all(&p).unwrap();
        let _ = fs::remove_file(p.with_extension("json.tmp"));
    }
}
