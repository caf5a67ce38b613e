//! Whole-scene parameter set and presets.

use crate::error::Result;

use super::{
    CameraPreset, CloudParams, FireworkParams, LeafDriftParams, MoonParams, RenderConfig,
    SeaParams, SkyParams, TerrainParams, TreeParams,
};

/// Everything needed to build a scene
#[derive(Debug, Clone, Default)]
pub struct SceneParams {
    pub terrain: TerrainParams,
    pub sea: SeaParams,
    pub leaves: LeafDriftParams,
    pub trees: TreeParams,
    pub clouds: CloudParams,
    pub fireworks: FireworkParams,
    pub moon: MoonParams,
    pub sky: SkyParams,
    pub camera: CameraPreset,
    pub render: RenderConfig,
}

impl SceneParams {
    /// Desktop scene (full-resolution terrain and sea)
    pub fn desktop() -> Self {
        Self::default()
    }

    /// Head-mounted display scene: lighter meshes, eye at standing height
    pub fn head_mounted() -> Self {
        let mut params = Self::default();
        params.terrain.columns = 128;
        params.terrain.rows = 128;
        params.sea.segments_x = 128;
        params.sea.segments_z = 128;
        params.camera = CameraPreset::head_mounted();
        params
    }

    /// Check every parameter group before any random draw is made
    pub fn validate(&self) -> Result<()> {
        self.terrain.validate()?;
        self.sea.validate()?;
        self.leaves.validate()?;
        self.trees.validate()?;
        self.clouds.validate()?;
        self.fireworks.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;

    #[test]
    fn test_presets_validate() {
        assert!(SceneParams::desktop().validate().is_ok());
        assert!(SceneParams::head_mounted().validate().is_ok());
    }

    #[test]
    fn test_head_mounted_uses_lighter_meshes() {
        let desktop = SceneParams::desktop();
        let hmd = SceneParams::head_mounted();
        assert!(hmd.terrain.columns < desktop.terrain.columns);
        assert!(hmd.terrain.rows < desktop.terrain.rows);
        assert!(hmd.sea.segments_x < desktop.sea.segments_x);
        assert!(matches!(hmd.camera, CameraPreset::HeadMounted(_)));
    }

    #[test]
    fn test_empty_range_rejected() {
        let mut params = SceneParams::default();
        params.clouds.speed_range = 2.0..2.0;
        assert!(matches!(
            params.validate(),
            Err(SceneError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_degenerate_terrain_rejected() {
        let mut params = SceneParams::default();
        params.terrain.rows = 1;
        assert!(params.validate().is_err());
    }
}
