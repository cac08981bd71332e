use crate::error::{Result, YapError};
use crate::types::config::YapConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "yapscan.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".yapscan/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/yapscan/config.toml";

pub fn load_config(root: &Path) -> Result<Option<YapConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<YapConfig>> {
    let local_config = root.join(DEFAULT_CONFIG_FILE);
    if !local_config.exists() {
        return Ok(None);
    }

    let layers = [
        global_path.map(Path::to_path_buf),
        Some(local_config),
        Some(root.join(DEFAULT_LOCAL_FILE)),
    ];

    let mut merged = Value::Table(Map::new());
    for path in layers.into_iter().flatten() {
        overlay_file(&mut merged, &path)?;
    }

    let cfg: YapConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| YapError::ConfigParse(e.to_string()))?;
    Ok(Some(cfg))
}

fn overlay_file(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let content = std::fs::read_to_string(path)?;
    let layer: Value = toml::from_str(&content)
        .map_err(|e| YapError::ConfigParse(format!("{}: {}", path.display(), e)))?;
    merge_toml(merged, layer);
    Ok(())
}

/// Later layers win. Tables merge key by key; scalars and arrays replace.
fn merge_toml(base: &mut Value, overlay: Value) {
    match overlay {
        Value::Table(layer) => {
            if let Value::Table(target) = base {
                for (key, value) in layer {
                    match target.entry(key) {
                        toml::map::Entry::Occupied(mut slot) => {
                            merge_toml(slot.get_mut(), value)
                        }
                        toml::map::Entry::Vacant(slot) => {
                            slot.insert(value);
                        }
                    }
                }
            } else {
                *base = Value::Table(layer);
            }
        }
        other => *base = other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_none_when_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn load_config_merges_global_repo_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[scoring]
min_length = 30
optimal_min = 120
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[scoring]
optimal_min = 140

[vocabulary]
generic_phrases = ["gm", "lfg"]
"#,
        )
        .expect("repo config should write");

        fs::create_dir_all(root.path().join(".yapscan")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[scoring]
optimal_min = 160
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");

        let scoring = cfg.scoring_config();
        assert_eq!(scoring.min_length, 30);
        assert_eq!(scoring.optimal_min, 160);
        assert_eq!(scoring.generic_phrases, vec!["gm", "lfg"]);
    }

    #[test]
    fn overlay_replaces_arrays_wholesale() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[vocabulary]
crypto_keywords = ["defi", "nft"]
"#,
        )
        .expect("global config should write");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[vocabulary]
crypto_keywords = ["tvl"]
"#,
        )
        .expect("repo config should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");
        assert_eq!(cfg.scoring_config().crypto_keywords, vec!["tvl"]);
    }

    #[test]
    fn load_config_reports_malformed_toml_with_path() {
        let root = TempDir::new().expect("temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[scoring\nbroken")
            .expect("broken config should write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(err.to_string().contains("config parse error"));
    }
}
