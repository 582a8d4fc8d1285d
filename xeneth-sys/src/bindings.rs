// Declarations for the subset of XCamera.h used by this workspace, laid out
// the way bindgen emits them with constified enums.

use std::os::raw::{c_char, c_int, c_long, c_uint, c_ulong, c_void};

pub type XCHANDLE = c_int;
pub type ErrCode = c_ulong;
pub type FilterID = c_ulong;
#[cfg(all(unix, target_pointer_width = "64"))]
pub type dword = c_uint;
#[cfg(not(all(unix, target_pointer_width = "64")))]
pub type dword = c_ulong;
pub type word = u16;
pub type byte = u8;
pub type boole = u8;
pub type voidp = *mut c_void;

pub type ErrorCodes = c_uint;
pub const I_OK: ErrorCodes = 0;
pub const I_DIRTY: ErrorCodes = 1;
pub const E_BUG: ErrorCodes = 10000;
pub const E_NOINIT: ErrorCodes = 10001;
pub const E_LOGICLOADFAILED: ErrorCodes = 10002;
pub const E_INTERFACE_ERROR: ErrorCodes = 10003;
pub const E_OUT_OF_RANGE: ErrorCodes = 10004;
pub const E_NOT_SUPPORTED: ErrorCodes = 10005;
pub const E_NOT_FOUND: ErrorCodes = 10006;
pub const E_FILTER_DONE: ErrorCodes = 10007;
pub const E_NO_FRAME: ErrorCodes = 10008;
pub const E_SAVE_ERROR: ErrorCodes = 10009;
pub const E_MISMATCHED: ErrorCodes = 10010;
pub const E_BUSY: ErrorCodes = 10011;
pub const E_INVALID_HANDLE: ErrorCodes = 10012;
pub const E_TIMEOUT: ErrorCodes = 10013;
pub const E_FRAMEGRABBER: ErrorCodes = 10014;
pub const E_NO_CONVERSION: ErrorCodes = 10015;
pub const E_FILTER_SKIP_FRAME: ErrorCodes = 10016;
pub const E_WRONG_VERSION: ErrorCodes = 10017;
pub const E_PACKET_ERROR: ErrorCodes = 10018;
pub const E_WRONG_FORMAT: ErrorCodes = 10019;
pub const E_WRONG_SIZE: ErrorCodes = 10020;
pub const E_CAPSTOP: ErrorCodes = 10021;
pub const E_OUT_OF_MEMORY: ErrorCodes = 10022;

pub type FrameType = c_int;
pub const FT_UNKNOWN: FrameType = -1;
pub const FT_NATIVE: FrameType = 0;
pub const FT_8_BPP_GRAY: FrameType = 1;
pub const FT_16_BPP_GRAY: FrameType = 2;
pub const FT_32_BPP_GRAY: FrameType = 3;
pub const FT_32_BPP_RGBA: FrameType = 4;
pub const FT_32_BPP_RGB: FrameType = 5;
pub const FT_32_BPP_BGRA: FrameType = 6;
pub const FT_32_BPP_BGR: FrameType = 7;

pub type XGetFrameFlags = c_uint;
pub const XGF_Blocking: XGetFrameFlags = 1;
pub const XGF_NoConversion: XGetFrameFlags = 2;
pub const XGF_FetchPFF: XGetFrameFlags = 4;

pub type XSaveDataFlags = c_uint;
pub const XSD_Force16: XSaveDataFlags = 1;
pub const XSD_Force8: XSaveDataFlags = 2;
pub const XSD_AlignLeft: XSaveDataFlags = 4;
pub const XSD_SaveThermalInfo: XSaveDataFlags = 8;

pub type XLoadCalibrationFlags = c_uint;
pub const XLC_StartSoftwareCorrection: XLoadCalibrationFlags = 1;

pub type XStatus = Option<
    unsafe extern "C" fn(v_pUserParm: *mut c_void, iMsg: c_int, ulP: c_ulong, ulT: c_ulong) -> ErrCode,
>;

extern "system" {
    pub fn XC_OpenCamera(pCameraName: *const c_char, pCallBack: XStatus, pUser: *mut c_void) -> XCHANDLE;
    pub fn XC_CloseCamera(hnd: XCHANDLE);
    pub fn XC_IsInitialised(h: XCHANDLE) -> boole;
    pub fn XC_IsCapturing(h: XCHANDLE) -> boole;
    pub fn XC_StartCapture(h: XCHANDLE) -> ErrCode;
    pub fn XC_StopCapture(h: XCHANDLE) -> ErrCode;
    pub fn XC_GetWidth(h: XCHANDLE) -> dword;
    pub fn XC_GetHeight(h: XCHANDLE) -> dword;
    pub fn XC_GetFrameType(h: XCHANDLE) -> FrameType;
    pub fn XC_GetFrameSize(h: XCHANDLE) -> dword;
    pub fn XC_GetFrame(
        h: XCHANDLE,
        type_: FrameType,
        ulFlags: c_ulong,
        buffer: *mut c_void,
        size: c_uint,
    ) -> ErrCode;
    pub fn XC_SaveData(h: XCHANDLE, p_cFileName: *const c_char, ulFlags: c_ulong) -> ErrCode;
    pub fn XC_LoadSettings(h: XCHANDLE, p_cFileName: *const c_char) -> ErrCode;
    pub fn XC_LoadCalibration(h: XCHANDLE, p_cFileName: *const c_char, ulFlags: c_ulong) -> ErrCode;
    pub fn XC_GetPropertyCount(h: XCHANDLE) -> c_int;
    pub fn XC_GetPropertyName(h: XCHANDLE, iIndex: c_int, pPropName: *mut c_char, iMaxLen: c_int) -> ErrCode;
    pub fn XC_GetPropertyValue(h: XCHANDLE, pPrp: *const c_char, pValue: *mut c_char, iMaxLen: c_int) -> ErrCode;
    pub fn XC_GetPropertyValueL(h: XCHANDLE, pPrp: *const c_char, pValue: *mut c_long) -> ErrCode;
    pub fn XC_GetPropertyValueF(h: XCHANDLE, pPrp: *const c_char, pValue: *mut f64) -> ErrCode;
}
