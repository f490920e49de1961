use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use fancy_regex::Regex;
use serde::Deserialize;
use serde_json::Value;

pub const PACKAGE_JSON: &str = "package.json";
pub const TAURI_CONFIG: &str = "src-tauri/tauri.conf.json";
pub const CARGO_MANIFEST: &str = "src-tauri/Cargo.toml";

#[derive(Deserialize)]
struct PackageJson {
    version: String,
}

/// Copies the `package.json` version into the Tauri config and the shell's
/// Cargo manifest. Returns the synced version.
pub fn sync_version(root: &Path) -> Result<String> {
    let version = read_version(&root.join(PACKAGE_JSON))?;
    info!("syncing version {}", version);

    update_tauri_config(&root.join(TAURI_CONFIG), &version)?;
    info!("✓ updated {}", TAURI_CONFIG);

    update_cargo_manifest(&root.join(CARGO_MANIFEST), &version)?;
    info!("✓ updated {}", CARGO_MANIFEST);

    Ok(version)
}

fn read_version(path: &Path) -> Result<String> {
    let content =
        fs::read_to_string(path).with_context(|| format!("error reading {}", path.display()))?;
    let package: PackageJson = serde_json::from_str(&content)
        .with_context(|| format!("error parsing {}", path.display()))?;

    if package.version.contains(['"', '\r', '\n']) {
        bail!(
            "version {:?} in {} cannot be written to a TOML string",
            package.version,
            path.display()
        );
    }

    Ok(package.version)
}

fn update_tauri_config(path: &Path, version: &str) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("error reading {}", path.display()))?;
    let mut config: Value = serde_json::from_str(&content)
        .with_context(|| format!("error parsing {}", path.display()))?;

    let object = config
        .as_object_mut()
        .ok_or_else(|| anyhow!("{} is not a JSON object", path.display()))?;
    object.insert("version".to_string(), Value::String(version.to_string()));

    let mut output = serde_json::to_string_pretty(&config)?;
    output.push('\n');
    fs::write(path, output).with_context(|| format!("error writing {}", path.display()))?;

    Ok(())
}

fn update_cargo_manifest(path: &Path, version: &str) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("error reading {}", path.display()))?;

    let output = replace_version_line(&content, version)?;
    if output == content {
        warn!("no version line changed in {}", path.display());
    }

    fs::write(path, output).with_context(|| format!("error writing {}", path.display()))?;

    Ok(())
}

/// Replaces the first top-level `version = "..."` line. A trailing `\r`
/// is left in place.
fn replace_version_line(content: &str, version: &str) -> Result<String> {
    let re = Regex::new(r#"(?m)^version = ".*"(?=\r?$)"#)?;

    let Some(found) = re.find(content)? else {
        return Ok(content.to_string());
    };

    Ok(format!(
        "{}version = \"{}\"{}",
        &content[..found.start()],
        version,
        &content[found.end()..]
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    const TAURI_CONFIG_JSON: &str = r#"{
  "$schema": "https://schema.tauri.app/config/2",
  "productName": "Alias Assistant",
  "version": "0.1.0",
  "identifier": "com.alias-assistant.app",
  "build": {
    "frontendDist": "../dist",
    "devUrl": "http://localhost:1420"
  },
  "plugins": {
    "updater": {
      "endpoints": ["https://example.com/latest.json"]
    }
  }
}
"#;

    const CARGO_TOML: &str = r#"[package]
name = "alias-assistant"
version = "0.1.0"
edition = "2021"

[dependencies]
serde = { version = "1", features = ["derive"] }
tauri-plugin-updater = "2"
"#;

    fn project(version: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src-tauri")).unwrap();
        fs::write(
            dir.path().join(PACKAGE_JSON),
            format!(r#"{{"name": "alias-assistant", "version": "{}"}}"#, version),
        )
        .unwrap();
        fs::write(dir.path().join(TAURI_CONFIG), TAURI_CONFIG_JSON).unwrap();
        fs::write(dir.path().join(CARGO_MANIFEST), CARGO_TOML).unwrap();
        dir
    }

    #[test]
    fn test_sync_version() {
        let dir = project("1.2.3");

        let version = sync_version(dir.path()).unwrap();
        assert_eq!(version, "1.2.3");

        let config = fs::read_to_string(dir.path().join(TAURI_CONFIG)).unwrap();
        let mut config: Value = serde_json::from_str(&config).unwrap();
        assert_eq!(config["version"], "1.2.3");

        let mut original: Value = serde_json::from_str(TAURI_CONFIG_JSON).unwrap();
        original["version"] = Value::String("1.2.3".to_string());
        assert_eq!(config, original);

        let keys = config
            .as_object_mut()
            .unwrap()
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec!["$schema", "productName", "version", "identifier", "build", "plugins"]
        );

        let manifest = fs::read_to_string(dir.path().join(CARGO_MANIFEST)).unwrap();
        assert_eq!(manifest, CARGO_TOML.replace("version = \"0.1.0\"", "version = \"1.2.3\""));
        assert!(manifest.contains(r#"serde = { version = "1", features = ["derive"] }"#));
    }

    #[test]
    fn test_tauri_config_keeps_pretty_layout() {
        let dir = project("0.1.0");

        sync_version(dir.path()).unwrap();

        let config = fs::read_to_string(dir.path().join(TAURI_CONFIG)).unwrap();
        assert!(config.ends_with("}\n"));
        assert!(config.contains("\n  \"version\": \"0.1.0\",\n"));
    }

    #[test]
    fn test_missing_package_json() {
        let dir = project("1.2.3");
        fs::remove_file(dir.path().join(PACKAGE_JSON)).unwrap();

        assert!(sync_version(dir.path()).is_err());

        let manifest = fs::read_to_string(dir.path().join(CARGO_MANIFEST)).unwrap();
        assert_eq!(manifest, CARGO_TOML);
    }

    #[test]
    fn test_sync_prerelease_version() {
        let dir = project("1.2.3-beta.1");

        assert_eq!(sync_version(dir.path()).unwrap(), "1.2.3-beta.1");

        let config = fs::read_to_string(dir.path().join(TAURI_CONFIG)).unwrap();
        let config: Value = serde_json::from_str(&config).unwrap();
        assert_eq!(config["version"], "1.2.3-beta.1");

        let manifest = fs::read_to_string(dir.path().join(CARGO_MANIFEST)).unwrap();
        assert!(manifest.contains("\nversion = \"1.2.3-beta.1\"\n"));
    }

    #[test]
    fn test_sync_build_metadata_version() {
        let dir = project("1.0.0+build.5");

        assert_eq!(sync_version(dir.path()).unwrap(), "1.0.0+build.5");

        let manifest = fs::read_to_string(dir.path().join(CARGO_MANIFEST)).unwrap();
        assert!(manifest.contains("\nversion = \"1.0.0+build.5\"\n"));
    }

    #[test]
    fn test_unwritable_version() {
        let dir = project(r#"1.2\"3"#);

        assert!(sync_version(dir.path()).is_err());

        let config = fs::read_to_string(dir.path().join(TAURI_CONFIG)).unwrap();
        assert_eq!(config, TAURI_CONFIG_JSON);
        let manifest = fs::read_to_string(dir.path().join(CARGO_MANIFEST)).unwrap();
        assert_eq!(manifest, CARGO_TOML);
    }

    #[test]
    fn test_replace_crlf_version_line() {
        let content = "[package]\r\nname = \"x\"\r\nversion = \"0.1.0\"\r\nedition = \"2021\"\r\n";

        let output = replace_version_line(content, "1.2.3").unwrap();

        assert_eq!(
            output,
            "[package]\r\nname = \"x\"\r\nversion = \"1.2.3\"\r\nedition = \"2021\"\r\n"
        );
    }

    #[test]
    fn test_replace_only_first_version_line() {
        let content = "version = \"0.1.0\"\n[workspace.package]\nversion = \"0.1.0\"\n";

        let output = replace_version_line(content, "2.0.0").unwrap();

        assert_eq!(
            output,
            "version = \"2.0.0\"\n[workspace.package]\nversion = \"0.1.0\"\n"
        );
    }

    #[test]
    fn test_replace_without_version_line() {
        let content = "[package]\nname = \"shell\"\n";

        assert_eq!(replace_version_line(content, "2.0.0").unwrap(), content);
    }
}
