use serde::Deserialize;

/// `[[cubes]]` tables from a cube definition file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CubesConfig {
    #[serde(default)]
    pub cubes: Vec<CubeDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CubeDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
}
