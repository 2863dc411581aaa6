use blobs_runtime::{Blob, EngineConfig, Vec3, Winding};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SceneConfig {
    #[serde(default)] pub lattice: LatticeSection,
    #[serde(default = "default_blobs")] pub blobs: Vec<BlobSpec>,
    #[serde(default)] pub animation: Animation,
}

impl Default for SceneConfig {
    fn default() -> Self { Self { lattice: LatticeSection::default(), blobs: default_blobs(), animation: Animation::default() } }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LatticeSection {
    #[serde(default = "default_dims")] pub dims: [u32; 3],
    #[serde(default = "default_iso")] pub iso_level: f32,
    #[serde(default)] pub winding: WindingName,
}
fn default_dims() -> [u32; 3] { [30, 30, 30] }
fn default_iso() -> f32 { 1.95 }
impl Default for LatticeSection { fn default() -> Self { Self { dims: default_dims(), iso_level: default_iso(), winding: WindingName::default() } } }

#[derive(Clone, Copy, Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WindingName { #[default] Listed, Reversed }

impl From<WindingName> for Winding {
    fn from(w: WindingName) -> Self {
        match w {
            WindingName::Listed => Winding::Listed,
            WindingName::Reversed => Winding::Reversed,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct BlobSpec {
    pub position: [f32; 3],
    pub strength: f32,
}

impl From<BlobSpec> for Blob {
    fn from(b: BlobSpec) -> Self { Blob::new(Vec3::from(b.position), b.strength) }
}

fn default_blobs() -> Vec<BlobSpec> {
    vec![
        BlobSpec { position: [0.16, 0.26, 0.16], strength: 0.13 },
        BlobSpec { position: [0.13, -0.134, 0.35], strength: 0.12 },
        BlobSpec { position: [-0.18, 0.125, -0.25], strength: 0.16 },
        BlobSpec { position: [-0.13, 0.23, 0.255], strength: 0.13 },
        BlobSpec { position: [-0.18, 0.125, 0.35], strength: 0.12 },
    ]
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Animation {
    #[serde(default = "default_anim_enabled")] pub enabled: bool,
    /// Seconds of scripted motion per frame.
    #[serde(default = "default_time_step")] pub time_step: f32,
}
fn default_anim_enabled() -> bool { true }
fn default_time_step() -> f32 { 1.0 / 60.0 }
impl Default for Animation { fn default() -> Self { Self { enabled: default_anim_enabled(), time_step: default_time_step() } } }

impl SceneConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig { dims: self.lattice.dims, iso_level: self.lattice.iso_level, winding: self.lattice.winding.into() }
    }

    pub fn blob_list(&self) -> Vec<Blob> {
        self.blobs.iter().copied().map(Blob::from).collect()
    }
}

pub fn parse_scene(s: &str) -> Result<SceneConfig, String> {
    toml::from_str(s).map_err(|e| format!("parse error: {}", e))
}

pub fn load_scene_from_path(path: &std::path::Path) -> Result<SceneConfig, String> {
    let s = std::fs::read_to_string(path).map_err(|e| format!("read error: {}", e))?;
    parse_scene(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_the_legacy_scene() {
        let cfg = parse_scene("").unwrap();
        assert_eq!(cfg, SceneConfig::default());
        assert_eq!(cfg.lattice.dims, [30, 30, 30]);
        assert_eq!(cfg.lattice.iso_level, 1.95);
        assert_eq!(cfg.blobs.len(), 5);
        assert!(cfg.animation.enabled);
        assert_eq!(cfg.engine_config().winding, Winding::Listed);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = parse_scene(
            r#"
            [lattice]
            dims = [12, 16, 20]
            winding = "reversed"

            [animation]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.lattice.dims, [12, 16, 20]);
        assert_eq!(cfg.lattice.iso_level, 1.95);
        assert_eq!(cfg.engine_config().winding, Winding::Reversed);
        assert!(!cfg.animation.enabled);
        assert_eq!(cfg.animation.time_step, 1.0 / 60.0);
        assert_eq!(cfg.blobs.len(), 5);
    }

    #[test]
    fn explicit_blobs_replace_defaults() {
        let cfg = parse_scene(
            r#"
            [[blobs]]
            position = [0.0, 0.1, -0.2]
            strength = 0.3
            "#,
        )
        .unwrap();
        let blobs = cfg.blob_list();
        assert_eq!(blobs, vec![Blob::new(Vec3::new(0.0, 0.1, -0.2), 0.3)]);
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(parse_scene("[lattice]\nwinding = \"sideways\"").is_err());
        assert!(parse_scene("[[blobs]]\nposition = [0.0, 0.0]\nstrength = 1.0").is_err());
        let err = load_scene_from_path(std::path::Path::new("/nonexistent/scene.toml")).unwrap_err();
        assert!(err.starts_with("read error"));
    }

    #[test]
    fn shipped_scene_matches_defaults() {
        let cfg = parse_scene(include_str!("../scenes/legacy.toml")).unwrap();
        assert_eq!(cfg, SceneConfig::default());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.toml");
        std::fs::write(&path, "[lattice]\niso_level = 0.75\n").unwrap();
        let cfg = load_scene_from_path(&path).unwrap();
        assert_eq!(cfg.lattice.iso_level, 0.75);
    }
}
