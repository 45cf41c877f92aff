//! C ABI exports for sibling native extensions
//!
//! Other extensions built against the core staticlib call these instead of
//! re-implementing the utils hello or the loop.
//!
//! # Safety Contract
//!
//! `tag` pointers must be null or point at a NUL-terminated string that stays
//! valid for the duration of the call.

use crate::benchmark::sum_squares;
use crate::utils::{HelloUtils, PrintUtils};
use std::ffi::{CStr, c_char};
use tracing::warn;

/// Hand a C string tag to `utils`. Returns whether the call was made.
///
/// # Safety
/// - `tag` must be null or a valid NUL-terminated C string
pub unsafe fn hello_from_utils_with<U: HelloUtils>(tag: *const c_char, utils: &mut U) -> bool {
    if tag.is_null() {
        warn!("hello_from_utils: null tag ignored");
        return false;
    }
    match unsafe { CStr::from_ptr(tag) }.to_str() {
        Ok(tag) => {
            utils.hello_from_utils(tag);
            true
        }
        Err(_) => {
            warn!("hello_from_utils: tag is not valid UTF-8");
            false
        }
    }
}

/// Call the default utils collaborator with a C string tag
///
/// A null or non-UTF-8 tag is ignored.
///
/// # Safety
/// - `tag` must be null or a valid NUL-terminated C string
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pymodule_hello_from_utils(tag: *const c_char) {
    unsafe { hello_from_utils_with(tag, &mut PrintUtils) };
}

/// Sum of `i * i` for `i` in `0..n`, callable from C
#[unsafe(no_mangle)]
pub extern "C" fn pymodule_sum_squares(n: i32) -> i64 {
    sum_squares(n)
}
