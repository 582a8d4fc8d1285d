use std::ffi::{c_char, c_long, c_uint, c_ulong, CStr, CString};
use std::path::Path;
use std::ptr;

use log::{debug, info};
use xeneth_sys::{
    ErrCode, XCHANDLE, XC_CloseCamera, XC_GetFrame, XC_GetFrameSize, XC_GetFrameType,
    XC_GetHeight, XC_GetPropertyCount, XC_GetPropertyName, XC_GetPropertyValue,
    XC_GetPropertyValueF, XC_GetPropertyValueL, XC_GetWidth, XC_IsCapturing, XC_IsInitialised,
    XC_LoadCalibration, XC_LoadSettings, XC_OpenCamera, XC_SaveData, XC_StartCapture,
    XC_StopCapture, INVALID_HANDLE, XLC_StartSoftwareCorrection,
};

use crate::error::{Error, ErrorCode, XResult};
use crate::frame::FrameBuffer;
use crate::session::{CameraSession, FrameType, GetFrameFlags, SaveDataFlags};
use crate::settings::{ConfigurationSnapshot, DEFAULT_TEMPERATURE_PROPERTY};

const MAX_PROPERTY_NAME: usize = 128;
const MAX_PROPERTY_VALUE: usize = 1024;

/// A session with a camera driven by the Xeneth SDK.
///
/// The SDK owns everything behind the handle; this only remembers the token.
#[derive(Debug)]
pub struct XenethCamera {
    handle: XCHANDLE,
    url: String,
    closed: bool,
    temperature_property: CString,
}

impl Drop for XenethCamera {
    fn drop(&mut self) {
        if !self.closed {
            // errors can be handled by calling close() manually
            unsafe {
                if XC_IsCapturing(self.handle) != 0 {
                    XC_StopCapture(self.handle);
                }
                XC_CloseCamera(self.handle);
            }
        }
    }
}

impl XenethCamera {
    /// Opens a connection, e.g. `cam://0` for the first detected camera
    pub fn open(url: &str) -> XResult<Self> {
        let c_url = CString::new(url)
            .map_err(|_| Error::InvalidArgument(format!("camera url {url:?} contains a nul byte")))?;

        info!("opening connection to {url}");
        let handle = unsafe { XC_OpenCamera(c_url.as_ptr(), None, ptr::null_mut()) };
        if handle == INVALID_HANDLE {
            return Err(Error::OpenFailed(url.to_string()));
        }

        let camera = Self {
            handle,
            url: url.to_string(),
            closed: false,
            temperature_property: c_string(DEFAULT_TEMPERATURE_PROPERTY)?,
        };
        if !camera.is_initialized() {
            // dropping closes the handle
            return Err(Error::OpenFailed(url.to_string()));
        }
        Ok(camera)
    }

    pub fn handle(&self) -> XCHANDLE {
        self.handle
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Name of the property read by [`CameraSession::temperature`]
    pub fn set_temperature_property(&mut self, name: &str) -> XResult<()> {
        self.temperature_property = c_string(name)?;
        Ok(())
    }

    /// Loads a settings file (`.xcf`) saved by Xeneth
    pub fn load_settings(&mut self, path: &Path) -> XResult<()> {
        let c_path = path_to_c_string(path)?;
        check(unsafe { XC_LoadSettings(self.handle, c_path.as_ptr()) })?;
        info!("loaded settings from {}", path.display());
        Ok(())
    }

    /// Loads a calibration pack (`.xca`), optionally starting the software correction filter
    pub fn load_calibration(&mut self, path: &Path, start_software_correction: bool) -> XResult<()> {
        let c_path = path_to_c_string(path)?;
        let flags = if start_software_correction {
            XLC_StartSoftwareCorrection as c_ulong
        } else {
            0
        };
        check(unsafe { XC_LoadCalibration(self.handle, c_path.as_ptr(), flags) })?;
        info!("loaded calibration pack {}", path.display());
        Ok(())
    }

    pub fn width(&self) -> u32 {
        unsafe { XC_GetWidth(self.handle) as u32 }
    }

    pub fn height(&self) -> u32 {
        unsafe { XC_GetHeight(self.handle) as u32 }
    }

    /// Native pixel type, `None` when the SDK reports `FT_UNKNOWN`
    pub fn frame_type(&self) -> Option<FrameType> {
        FrameType::from_raw(unsafe { XC_GetFrameType(self.handle) } as i32)
    }

    /// Property value as text, whatever its type
    pub fn property(&self, name: &str) -> XResult<String> {
        let c_name = c_string(name)?;
        let mut value = [0 as c_char; MAX_PROPERTY_VALUE];
        check(unsafe {
            XC_GetPropertyValue(
                self.handle,
                c_name.as_ptr(),
                value.as_mut_ptr(),
                value.len() as i32,
            )
        })?;
        Ok(from_c_buffer(&value))
    }

    pub fn property_long(&self, name: &str) -> XResult<i64> {
        let c_name = c_string(name)?;
        let mut value: c_long = 0;
        check(unsafe { XC_GetPropertyValueL(self.handle, c_name.as_ptr(), &mut value) })?;
        Ok(value as i64)
    }

    pub fn property_float(&self, name: &str) -> XResult<f64> {
        let c_name = c_string(name)?;
        let mut value = 0.0;
        check(unsafe { XC_GetPropertyValueF(self.handle, c_name.as_ptr(), &mut value) })?;
        Ok(value)
    }

    /// Stops capturing and closes the camera. This is done automatically on drop
    /// but can be called manually to handle any error that may occur.
    pub fn close(mut self) -> XResult<()> {
        self.closed = true;

        let stopped = if self.is_capturing() {
            self.stop_capture()
        } else {
            Ok(())
        };
        unsafe { XC_CloseCamera(self.handle) };
        info!("closed connection to {}", self.url);
        stopped
    }

    fn property_name(&self, index: i32) -> XResult<String> {
        let mut name = [0 as c_char; MAX_PROPERTY_NAME];
        check(unsafe {
            XC_GetPropertyName(self.handle, index, name.as_mut_ptr(), name.len() as i32)
        })?;
        Ok(from_c_buffer(&name))
    }
}

impl CameraSession for XenethCamera {
    fn is_initialized(&self) -> bool {
        xeneth_sys::to_bool(unsafe { XC_IsInitialised(self.handle) })
    }

    fn is_capturing(&self) -> bool {
        xeneth_sys::to_bool(unsafe { XC_IsCapturing(self.handle) })
    }

    fn start_capture(&mut self) -> XResult<()> {
        check(unsafe { XC_StartCapture(self.handle) })
    }

    fn stop_capture(&mut self) -> XResult<()> {
        check(unsafe { XC_StopCapture(self.handle) })
    }

    fn frame_size(&self) -> usize {
        unsafe { XC_GetFrameSize(self.handle) as usize }
    }

    fn get_frame(
        &mut self,
        frame_type: FrameType,
        flags: GetFrameFlags,
        buffer: &mut FrameBuffer,
    ) -> XResult<()> {
        let size = c_uint::try_from(buffer.size_bytes())
            .map_err(|_| Error::InvalidArgument("frame buffer too large".to_string()))?;

        check(unsafe {
            XC_GetFrame(
                self.handle,
                frame_type.raw() as _,
                flags.bits() as c_ulong,
                buffer.as_mut_ptr().cast(),
                size,
            )
        })
    }

    fn save_data(&mut self, path: &Path, flags: SaveDataFlags) -> XResult<()> {
        let c_path = path_to_c_string(path)?;
        check(unsafe { XC_SaveData(self.handle, c_path.as_ptr(), flags.bits() as c_ulong) })
    }

    fn temperature(&self) -> XResult<f64> {
        let mut value = 0.0;
        check(unsafe {
            XC_GetPropertyValueF(self.handle, self.temperature_property.as_ptr(), &mut value)
        })?;
        Ok(value)
    }

    fn configuration(&self) -> XResult<ConfigurationSnapshot> {
        let count = unsafe { XC_GetPropertyCount(self.handle) };
        let mut snapshot = ConfigurationSnapshot::new();

        for index in 0..count {
            let name = self.property_name(index)?;
            match self.property(&name) {
                Ok(value) => snapshot.push(name, value),
                // write-only properties and actions have no value to show
                Err(e) => debug!("skipping property {name}: {e}"),
            }
        }

        Ok(snapshot)
    }
}

fn check(code: ErrCode) -> XResult<()> {
    ErrorCode::check(code as u64).map_err(Error::from)
}

fn c_string(value: &str) -> XResult<CString> {
    CString::new(value).map_err(|_| Error::InvalidArgument(format!("{value:?} contains a nul byte")))
}

fn path_to_c_string(path: &Path) -> XResult<CString> {
    let text = path
        .to_str()
        .ok_or_else(|| Error::InvalidArgument(format!("{} is not valid UTF-8", path.display())))?;
    c_string(text)
}

fn from_c_buffer(buffer: &[c_char]) -> String {
    if !buffer.contains(&0) {
        return String::new();
    }
    unsafe { CStr::from_ptr(buffer.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}
