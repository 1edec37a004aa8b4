use rubble_world::Model;

/// Configuration for a single benchmark scene.
pub struct SceneConfig {
    pub name: &'static str,
    pub initial: Model,
    pub target: Model,
    /// Ticks of dismantle before the rebuild. Zero rebuilds straight from STABLE.
    pub dismantle_ticks: u32,
}

/// Return the standard suite: shrinking, growing and same-shape rebuilds.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "campus-to-eagle",
            initial: Model::Campus,
            target: Model::Eagle,
            dismantle_ticks: 120,
        },
        SceneConfig {
            name: "campus-to-cat",
            initial: Model::Campus,
            target: Model::Cat,
            dismantle_ticks: 120,
        },
        SceneConfig {
            name: "eagle-to-campus",
            initial: Model::Eagle,
            target: Model::Campus,
            dismantle_ticks: 60,
        },
        SceneConfig {
            name: "cat-restore",
            initial: Model::Cat,
            target: Model::Cat,
            dismantle_ticks: 180,
        },
        SceneConfig {
            name: "eagle-to-cat-direct",
            initial: Model::Eagle,
            target: Model::Cat,
            dismantle_ticks: 0,
        },
    ]
}
