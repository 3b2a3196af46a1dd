use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::PhysicalConfig;
use crate::foundation::error::{VoxError, VoxResult};
use crate::transport::{
    net::{TcpTransport, UdpTransport},
    sink::FrameTransport,
};

/// How frames reach the panel controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// One stream write per frame.
    #[default]
    Tcp,
    /// One datagram per frame.
    Udp,
}

/// Player settings: where the panel is and how the arm is built.
///
/// Every field has a default, so a config file only needs the values that differ.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Panel controller host name or address.
    pub host: String,
    /// Panel controller port.
    pub port: u16,
    /// Arm rotation speed in revolutions per minute.
    pub rpm: f64,
    /// Radial pixel count `N` on each end of the arm.
    pub radial_pixels: u32,
    /// Cross-section sampling step `d`.
    pub spacing: u32,
    /// Frame transport to open on [`Self::connect`].
    pub transport: TransportKind,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            host: "192.168.1.212".to_string(),
            port: 5005,
            rpm: 1500.0,
            radial_pixels: 24,
            spacing: 2,
            transport: TransportKind::Tcp,
        }
    }
}

impl PlayerConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> VoxResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| VoxError::serde(format!("config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> VoxResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check the endpoint and the arm description.
    pub fn validate(&self) -> VoxResult<()> {
        if self.host.trim().is_empty() {
            return Err(VoxError::validation("host must not be empty"));
        }
        if self.port == 0 {
            return Err(VoxError::validation("port must be > 0"));
        }
        self.physical().map(|_| ())
    }

    /// The arm description used to build the geometry table.
    pub fn physical(&self) -> VoxResult<PhysicalConfig> {
        PhysicalConfig::from_rpm(self.radial_pixels, self.spacing, self.rpm)
    }

    /// Open the configured transport.
    pub fn connect(&self) -> VoxResult<Box<dyn FrameTransport>> {
        Ok(match self.transport {
            TransportKind::Tcp => Box::new(TcpTransport::connect(&self.host, self.port)?),
            TransportKind::Udp => Box::new(UdpTransport::connect(&self.host, self.port)?),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/player.rs"]
mod tests;
