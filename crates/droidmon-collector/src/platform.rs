//! Host platform access for the metric providers.
//!
//! Providers never touch sysfs or procfs directly; they go through the
//! [`Platform`] trait so tests can inject fakes and so every system query
//! fails independently as a recoverable error rather than a crash.

use std::ffi::CString;
use std::fs;
use std::path::Path;
use std::process::Command;

use sysinfo::System;

/// Errors from the host platform layer.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// A sysfs/procfs read failed.
    #[error("Platform: I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The queried capability is not present on this host
    /// (e.g., no battery supply, no backlight device).
    #[error("Platform: {0} unavailable")]
    Unavailable(&'static str),

    /// A system file held a value we could not parse.
    #[error("Platform: failed to parse {what}: {raw:?}")]
    Parse { what: &'static str, raw: String },

    /// An external command (getprop) failed or produced no output.
    #[error("Platform: command failed: {0}")]
    Command(String),
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Battery charge status as reported by the power supply subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeStatus {
    Charging,
    Discharging,
    NotCharging,
    Full,
    Unknown,
}

impl ChargeStatus {
    /// Parse the sysfs `status` string, case-insensitively.
    /// Anything unrecognized maps to `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "charging" => ChargeStatus::Charging,
            "discharging" => ChargeStatus::Discharging,
            "not charging" => ChargeStatus::NotCharging,
            "full" => ChargeStatus::Full,
            _ => ChargeStatus::Unknown,
        }
    }
}

/// Power source the device is drawing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlugType {
    Usb,
    Ac,
    Wireless,
    None,
}

impl PlugType {
    /// Exposition label value for this plug type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlugType::Usb => "usb",
            PlugType::Ac => "ac",
            PlugType::Wireless => "wireless",
            PlugType::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BatteryReading {
    /// Charge percent, 0-100.
    pub percent: u8,
    pub status: ChargeStatus,
    pub plug: PlugType,
}

#[derive(Debug, Clone, Copy)]
pub struct MemoryStats {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct StorageStats {
    pub total_bytes: u64,
    /// Free blocks including space reserved for root (`f_bfree`).
    pub free_bytes: u64,
    /// Blocks available to unprivileged callers (`f_bavail`).
    pub available_bytes: u64,
}

#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub model: String,
    pub os_version: String,
}

/// The capability set the providers consume from the host.
///
/// Each query may fail independently; callers treat failure as "no
/// reading" for the owning provider.
pub trait Platform: Send + Sync {
    fn battery(&self) -> Result<BatteryReading>;
    fn screen_on(&self) -> Result<bool>;
    fn memory(&self) -> Result<MemoryStats>;
    fn storage(&self, path: &str) -> Result<StorageStats>;
    /// The aggregate CPU line of `/proc/stat` (the one starting `cpu `).
    fn cpu_line(&self) -> Result<String>;
    fn device(&self) -> Result<DeviceInfo>;
}

const BATTERY_DIR: &str = "/sys/class/power_supply/battery";
const BACKLIGHT_DIR: &str = "/sys/class/backlight";

/// Real platform backed by sysfs, procfs, `statvfs`, and `getprop`.
///
/// Every query opens and releases its own file handles, so concurrent
/// scrapes can sample through a shared instance without locking.
pub struct SysfsPlatform;

impl SysfsPlatform {
    pub fn new() -> Self {
        Self
    }

    fn read_trimmed(path: impl AsRef<Path>) -> Result<String> {
        Ok(fs::read_to_string(path)?.trim().to_string())
    }

    /// True when the named supply reports `online = 1`.
    fn supply_online(name: &str) -> bool {
        let path = format!("/sys/class/power_supply/{name}/online");
        matches!(fs::read_to_string(path), Ok(s) if s.trim() == "1")
    }

    fn getprop(key: &str) -> Result<String> {
        let output = Command::new("getprop")
            .arg(key)
            .output()
            .map_err(|e| PlatformError::Command(format!("getprop {key}: {e}")))?;
        if !output.status.success() {
            return Err(PlatformError::Command(format!(
                "getprop {key}: exited with {}",
                output.status
            )));
        }
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() {
            return Err(PlatformError::Command(format!("getprop {key}: empty")));
        }
        Ok(value)
    }
}

impl Default for SysfsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

/// Safe wrapper around `libc::statvfs`; the out-parameter is fully
/// written by the call before it is read.
fn statvfs(path: &str) -> Result<libc::statvfs> {
    let c_path = CString::new(path).map_err(|_| PlatformError::Parse {
        what: "storage path",
        raw: path.to_string(),
    })?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(PlatformError::Io(std::io::Error::last_os_error()));
    }
    Ok(stat)
}

impl Platform for SysfsPlatform {
    fn battery(&self) -> Result<BatteryReading> {
        let raw = Self::read_trimmed(format!("{BATTERY_DIR}/capacity"))?;
        let percent: u8 = raw.parse().map_err(|_| PlatformError::Parse {
            what: "battery capacity",
            raw,
        })?;
        let status = ChargeStatus::parse(&Self::read_trimmed(format!("{BATTERY_DIR}/status"))?);

        let plug = if Self::supply_online("usb") {
            PlugType::Usb
        } else if Self::supply_online("ac") {
            PlugType::Ac
        } else if Self::supply_online("wireless") {
            PlugType::Wireless
        } else {
            PlugType::None
        };

        Ok(BatteryReading {
            percent: percent.min(100),
            status,
            plug,
        })
    }

    fn screen_on(&self) -> Result<bool> {
        // Interactive state is approximated by the first backlight device:
        // brightness 0 means the panel is off.
        for entry in fs::read_dir(BACKLIGHT_DIR)? {
            let brightness = entry?.path().join("brightness");
            if brightness.exists() {
                let raw = Self::read_trimmed(&brightness)?;
                let level: u64 = raw.parse().map_err(|_| PlatformError::Parse {
                    what: "backlight brightness",
                    raw,
                })?;
                return Ok(level > 0);
            }
        }
        Err(PlatformError::Unavailable("backlight"))
    }

    fn memory(&self) -> Result<MemoryStats> {
        let mut system = System::new();
        system.refresh_memory();
        Ok(MemoryStats {
            total_bytes: system.total_memory(),
            available_bytes: system.available_memory(),
        })
    }

    fn storage(&self, path: &str) -> Result<StorageStats> {
        // statvfs rather than sysinfo: the free (f_bfree) vs available
        // (f_bavail) distinction is not exposed by sysinfo::Disks.
        let stat = statvfs(path)?;
        let frsize = stat.f_frsize as u64;
        Ok(StorageStats {
            total_bytes: stat.f_blocks as u64 * frsize,
            free_bytes: stat.f_bfree as u64 * frsize,
            available_bytes: stat.f_bavail as u64 * frsize,
        })
    }

    fn cpu_line(&self) -> Result<String> {
        let content = fs::read_to_string("/proc/stat")?;
        content
            .lines()
            .find(|l| l.starts_with("cpu "))
            .map(str::to_string)
            .ok_or(PlatformError::Unavailable("aggregate cpu line"))
    }

    fn device(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo {
            model: Self::getprop("ro.product.model")?,
            os_version: Self::getprop("ro.build.version.release")?,
        })
    }
}
