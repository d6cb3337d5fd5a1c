// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Application configuration
//!
//! Loaded from a TOML file; every key is optional.
//!
//! ```toml
//! [display]
//! width = 480
//! height = 272
//! line_size = 512
//! refresh_hz = 60
//! vsync = true
//!
//! [blitter]
//! clip_policy = "clip"   # or "reject"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::blit::BlitterConfig;
use crate::core::display::DisplayConfig;
use crate::core::error::{GraphicsError, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "PSPGFX_CONFIG";

/// Configuration that can be saved/loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub blitter: BlitterConfig,
}

impl AppConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// [`GraphicsError::Config`] for invalid TOML or an unusable display
    /// geometry.
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(source)?;
        config.display.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loading config {}", path.display());
        Self::from_toml(&contents)
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| GraphicsError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load from `path`, else from [`CONFIG_ENV`], else use defaults
    ///
    /// An explicitly named file that fails to load is an error.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => Self::load(path),
            None => {
                log::debug!("Using default config");
                Ok(Self::default())
            }
        }
    }
}
