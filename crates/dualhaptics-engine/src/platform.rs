//! Platform HID policy.
//!
//! Device discovery and raw report I/O sit behind [`HardwarePolicy`], chosen
//! once at startup by [`select_platform_policy`]. On Linux the policy walks
//! `/sys/class/hidraw`, reads each node's `device/uevent` and talks to
//! `/dev/hidrawN` with plain file I/O.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use dualhaptics_errors::DeviceError;
use dualhaptics_hid_sony_protocol::{ConnectionMode, DeviceModel};
use tracing::{debug, info, warn};

/// Outcome of one non-blocking read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollResult {
    /// `n` bytes were read
    ReadOk(usize),
    /// Nothing pending
    NoIoThisTick,
    /// Recoverable failure, try again next tick
    TransientError,
    /// The device is gone; the handle has been invalidated
    Disconnected,
}

/// A discovered controller and its platform handle.
#[derive(Debug)]
pub struct DeviceContext {
    /// Device node used for report I/O
    pub path: PathBuf,
    /// Sysfs directory the device was discovered under
    pub sysfs_path: PathBuf,
    pub vendor_id: u16,
    pub product_id: u16,
    pub model: DeviceModel,
    pub mode: ConnectionMode,
    /// Product string reported by the kernel
    pub name: String,
    handle: Option<File>,
    connected: bool,
}

impl DeviceContext {
    /// Context for a device that has not been opened yet.
    pub fn new(
        path: impl Into<PathBuf>,
        vendor_id: u16,
        product_id: u16,
        model: DeviceModel,
        mode: ConnectionMode,
    ) -> Self {
        Self {
            path: path.into(),
            sysfs_path: PathBuf::new(),
            vendor_id,
            product_id,
            model,
            mode,
            name: String::new(),
            handle: None,
            connected: false,
        }
    }

    /// Whether a handle is open and no disconnect has been observed.
    pub fn is_connected(&self) -> bool {
        self.connected && self.handle.is_some()
    }

    /// Whether a handle is open.
    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    fn label(&self) -> String {
        self.path.display().to_string()
    }
}

/// Platform-specific discovery and report I/O.
pub trait HardwarePolicy: Send {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Enumerate supported controllers.
    fn detect(&self) -> Vec<DeviceContext>;

    /// Open the device node.
    fn create_handle(&self, ctx: &mut DeviceContext) -> Result<(), DeviceError>;

    /// Non-blocking read of one input report.
    fn read(&self, ctx: &mut DeviceContext, buf: &mut [u8]) -> PollResult;

    /// Write one output report.
    fn write(&self, ctx: &mut DeviceContext, report: &[u8]) -> Result<usize, DeviceError>;

    /// Close the handle, mark the device disconnected and forget its path.
    fn invalidate_handle(&self, ctx: &mut DeviceContext) {
        ctx.handle = None;
        ctx.connected = false;
        ctx.path = PathBuf::new();
    }
}

/// Whether an I/O error means the device is gone rather than busy.
pub fn should_treat_as_disconnected(error: &io::Error) -> bool {
    if error.raw_os_error().is_some_and(is_disconnect_errno) {
        return true;
    }

    matches!(
        error.kind(),
        io::ErrorKind::NotFound
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::NotConnected
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::UnexpectedEof
    )
}

#[cfg(target_os = "linux")]
fn is_disconnect_errno(code: i32) -> bool {
    matches!(code, libc::ENODEV | libc::ENXIO | libc::EPIPE | libc::ESHUTDOWN)
}

#[cfg(not(target_os = "linux"))]
fn is_disconnect_errno(_code: i32) -> bool {
    false
}

/// Split a `HID_ID=bbbb:vvvvvvvv:pppppppp` value into bus, vendor and product.
pub fn parse_hid_id(value: &str) -> Option<(u16, u16, u16)> {
    let mut parts = value.trim().split(':');
    let mut field = || -> Option<u16> {
        let raw = u32::from_str_radix(parts.next()?, 16).ok()?;
        u16::try_from(raw).ok()
    };
    let ids = (field()?, field()?, field()?);
    parts.next().is_none().then_some(ids)
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Uevent {
    bus: u16,
    vendor_id: u16,
    product_id: u16,
    name: String,
}

fn parse_uevent(contents: &str) -> Option<Uevent> {
    let mut ids = None;
    let mut name = String::new();
    for line in contents.lines() {
        match line.split_once('=') {
            Some(("HID_ID", value)) => ids = parse_hid_id(value),
            Some(("HID_NAME", value)) => name = value.trim().to_owned(),
            _ => {}
        }
    }
    let (bus, vendor_id, product_id) = ids?;
    Some(Uevent {
        bus,
        vendor_id,
        product_id,
        name,
    })
}

/// Linux hidraw policy.
#[derive(Debug, Clone)]
pub struct HidrawPolicy {
    class_root: PathBuf,
    dev_root: PathBuf,
}

impl Default for HidrawPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl HidrawPolicy {
    /// Policy over the live `/sys/class/hidraw` and `/dev`.
    pub fn new() -> Self {
        Self::with_roots("/sys/class/hidraw", "/dev")
    }

    /// Policy over alternate roots, used to point discovery at a fake tree.
    pub fn with_roots(class_root: impl Into<PathBuf>, dev_root: impl Into<PathBuf>) -> Self {
        Self {
            class_root: class_root.into(),
            dev_root: dev_root.into(),
        }
    }

    fn probe(&self, node: &Path) -> Option<DeviceContext> {
        let node_name = node.file_name()?.to_str()?;
        if !node_name.starts_with("hidraw") {
            return None;
        }

        let contents = fs::read_to_string(node.join("device").join("uevent")).ok()?;
        let uevent = parse_uevent(&contents)?;
        let Some(model) = DeviceModel::from_ids(uevent.vendor_id, uevent.product_id) else {
            debug!(node = node_name, vendor_id = uevent.vendor_id, product_id = uevent.product_id, "Skipping unsupported HID device");
            return None;
        };
        let mode = ConnectionMode::from_hid_bus(uevent.bus)?;

        let mut ctx = DeviceContext::new(
            self.dev_root.join(node_name),
            uevent.vendor_id,
            uevent.product_id,
            model,
            mode,
        );
        ctx.sysfs_path = node.to_path_buf();
        ctx.name = uevent.name;
        Some(ctx)
    }
}

fn open_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.read(true).write(true);
    #[cfg(target_os = "linux")]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NONBLOCK);
    }
    options
}

impl HardwarePolicy for HidrawPolicy {
    fn name(&self) -> &'static str {
        "hidraw"
    }

    fn detect(&self) -> Vec<DeviceContext> {
        let entries = match fs::read_dir(&self.class_root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(root = %self.class_root.display(), error = %e, "No hidraw class directory");
                return Vec::new();
            }
        };

        let mut devices: Vec<DeviceContext> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| self.probe(&entry.path()))
            .collect();
        devices.sort_by(|a, b| a.path.cmp(&b.path));

        info!(count = devices.len(), "Detected Sony controllers");
        devices
    }

    fn create_handle(&self, ctx: &mut DeviceContext) -> Result<(), DeviceError> {
        let label = ctx.label();
        let file = open_options().open(&ctx.path).map_err(|e| {
            warn!(device = %label, error = %e, "Failed to open HID device");
            DeviceError::io(&label, &e)
        })?;
        ctx.handle = Some(file);
        ctx.connected = true;
        debug!(device = %label, "Opened HID device");
        Ok(())
    }

    fn read(&self, ctx: &mut DeviceContext, buf: &mut [u8]) -> PollResult {
        let Some(handle) = ctx.handle.as_mut() else {
            return PollResult::Disconnected;
        };
        match handle.read(buf) {
            Ok(0) => PollResult::NoIoThisTick,
            Ok(n) => PollResult::ReadOk(n),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => PollResult::NoIoThisTick,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => PollResult::TransientError,
            Err(e) if should_treat_as_disconnected(&e) => {
                warn!(device = %ctx.label(), error = %e, "HID device disconnected");
                self.invalidate_handle(ctx);
                PollResult::Disconnected
            }
            Err(e) => {
                debug!(device = %ctx.label(), error = %e, "HID read failed");
                PollResult::TransientError
            }
        }
    }

    fn write(&self, ctx: &mut DeviceContext, report: &[u8]) -> Result<usize, DeviceError> {
        let label = ctx.label();
        let Some(handle) = ctx.handle.as_mut() else {
            return Err(DeviceError::not_connected(label));
        };
        match handle.write(report) {
            Ok(written) => {
                if written != report.len() {
                    warn!(device = %label, written, expected = report.len(), "Partial HID write");
                }
                Ok(written)
            }
            Err(e) if should_treat_as_disconnected(&e) => {
                warn!(device = %label, error = %e, "HID device disconnected during write");
                self.invalidate_handle(ctx);
                Err(DeviceError::disconnected(label))
            }
            Err(e) => Err(DeviceError::io(&label, &e)),
        }
    }
}

/// Policy for platforms without a HID backend. Detects nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatformPolicy;

impl HardwarePolicy for UnsupportedPlatformPolicy {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn detect(&self) -> Vec<DeviceContext> {
        Vec::new()
    }

    fn create_handle(&self, ctx: &mut DeviceContext) -> Result<(), DeviceError> {
        Err(DeviceError::not_connected(ctx.label()))
    }

    fn read(&self, _ctx: &mut DeviceContext, _buf: &mut [u8]) -> PollResult {
        PollResult::Disconnected
    }

    fn write(&self, ctx: &mut DeviceContext, _report: &[u8]) -> Result<usize, DeviceError> {
        Err(DeviceError::not_connected(ctx.label()))
    }
}

/// Pick the policy for the running platform.
pub fn select_platform_policy() -> Box<dyn HardwarePolicy> {
    #[cfg(target_os = "linux")]
    let policy: Box<dyn HardwarePolicy> = Box::new(HidrawPolicy::new());
    #[cfg(not(target_os = "linux"))]
    let policy: Box<dyn HardwarePolicy> = Box::new(UnsupportedPlatformPolicy);

    debug!(policy = policy.name(), "Selected platform HID policy");
    policy
}
