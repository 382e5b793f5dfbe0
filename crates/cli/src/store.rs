use anyhow::{bail, Context, Result};
use floorplan::api::Scene;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Read and validate a stored scene.
pub fn load(path: &Path) -> Result<Scene> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Scene::from_json(&text).with_context(|| format!("decoding {}", path.display()))
}

/// Replace `path` with the scene as a whole: write a sibling temp file, then rename.
pub fn save(path: &Path, scene: &Scene) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("creating plan dir {}", dir.display()))?;
    let text = scene.to_json()?;
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(text.as_bytes())?;
    tmp.persist(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Start a plan file; refuses to clobber an existing one unless `force`.
pub fn create(path: &Path, force: bool) -> Result<Scene> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let scene = Scene::new();
    save(path, &scene)?;
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plans/home.json");
        let scene = Scene::new();
        save(&path, &scene).unwrap();
        assert_eq!(load(&path).unwrap(), scene);
    }

    #[test]
    fn create_refuses_to_clobber() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("home.json");
        create(&path, false).unwrap();
        assert!(create(&path, false).is_err());
        create(&path, true).unwrap();
    }

    #[test]
    fn load_reports_bad_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();
        let err = load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("decoding"));
        assert!(load(&dir.path().join("missing.json")).is_err());
    }
}
