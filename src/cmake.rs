use std::{fmt, path::Path};

use serde::Deserialize;

use crate::error::{Error, Result};

/// CMake build type, `Debug` unless a release build is requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildType {
    #[default]
    Debug,
    Release,
}

impl BuildType {
    pub fn from_release(release: bool) -> Self {
        if release { BuildType::Release } else { BuildType::Debug }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }

    /// Directory name under `build/`.
    pub fn dir_name(&self) -> &'static str {
        match self {
            BuildType::Debug => "debug",
            BuildType::Release => "release",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct CMakePreset {
    name: String,
    #[serde(default)]
    hidden: bool,
}

impl CMakePreset {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CMakePresets {
    #[serde(default)]
    configure_presets: Vec<CMakePreset>,
}

impl CMakePresets {
    /// Reads `CMakePresets.json` from `path`, or from `path` itself if it names the file.
    pub fn load<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>, {
        let path = path.as_ref();
        let file = if path.ends_with("CMakePresets.json") {
            path.to_path_buf()
        } else {
            path.join("CMakePresets.json")
        };

        let content = std::fs::read_to_string(&file).map_err(|e| Error::Preset {
            message: format!("cannot read {}: {}", file.display(), e),
        })?;
        serde_json::from_str(&content).map_err(|e| Error::Preset {
            message: format!("cannot parse {}: {}", file.display(), e),
        })
    }

    /// Finds a configure preset that can be selected on the command line.
    pub fn get_preset(&self, name: &str) -> Option<&CMakePreset> {
        self.configure_presets
            .iter()
            .find(|p| p.name == name && !p.hidden)
    }
}
