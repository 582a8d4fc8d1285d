//! Raw bindings to the C interface of the Xenics Xeneth SDK (`XCamera.h`).
//!
//! Only the part of the API needed to open a camera, capture frames, save them
//! and read properties is declared. Enable the `bindgen` feature to regenerate
//! the declarations from the SDK header instead.

pub use bindings::*;

#[allow(non_snake_case, non_upper_case_globals, non_camel_case_types, dead_code)]
mod bindings {
    #[cfg(feature = "bindgen")]
    include!(concat!(env!("OUT_DIR"), "/bindings.rs"));

    #[cfg(not(feature = "bindgen"))]
    include!("bindings.rs");
}

/// `XC_OpenCamera` returns this handle when no session could be created.
pub const INVALID_HANDLE: XCHANDLE = 0;

/// Converts an SDK `boole` into a `bool`.
pub fn to_bool(value: boole) -> bool {
    value != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_i_ok_is_zero() {
        assert_eq!(I_OK, 0);
        assert_ne!(E_NOINIT, I_OK);
    }

    #[test]
    fn status_codes_follow_the_header() {
        assert_eq!(E_BUG, 10000);
        assert_eq!(E_NO_FRAME, 10008);
        assert_eq!(E_TIMEOUT, 10013);
        assert_eq!(E_OUT_OF_MEMORY, 10022);
    }
}
