//! C-compatible FFI API for cross-language bindings.
//!
//! # ABI Contract
//!
//! All exported functions use the `extern "C"` calling convention and
//! `#[no_mangle]` so symbol names are stable. The header is generated into
//! `include/slideforge.h` by `build.rs`.
//!
//! ## Memory management
//! - Strings returned through out-parameters are allocated on the Rust heap
//!   and **must** be released with `sf_free_string`.
//! - Passing a null pointer to `sf_free_string` is a no-op.
//!
//! ## Error handling
//! - Fallible functions return a `c_int`: `0` on success, non-zero on error.
//!   - `1` null pointer argument
//!   - `2` input is not UTF-8
//!   - `3` deck could not be parsed or built
//!   - `4` output contained an interior NUL byte
//! - The message for the most recent failure is available from
//!   `sf_last_error`.
//!
//! ## Thread safety
//! `sf_last_error` is thread-local, so calls from different threads do not
//! clobber each other's errors.
//!
//! Rendering to PDF needs a browser and an async runtime, so it is not part
//! of this surface: callers get the markup and page size and print it with
//! their own engine.

use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::ptr;
use std::slice;

use crate::deck::Deck;
use crate::document::Document;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
}

/// Build a deck and return its rendered document as JSON:
/// `{ "markup", "widthIn", "heightIn", "pageCount", "warnings" }`.
///
/// # Parameters
/// - `json_ptr`, `json_len`: UTF-8 deck JSON (not necessarily
///   null-terminated)
/// - `out_json_ptr`: receives a pointer to a null-terminated JSON string
///
/// # Returns
/// `0` on success, non-zero on error. On error, call `sf_last_error`.
///
/// # Safety
/// - `json_ptr` must point to `json_len` valid bytes.
/// - `out_json_ptr` must be a valid pointer.
/// - The caller must free `*out_json_ptr` with `sf_free_string`.
#[no_mangle]
pub unsafe extern "C" fn sf_compose_markup(
    json_ptr: *const u8,
    json_len: u32,
    out_json_ptr: *mut *mut c_char,
) -> c_int {
    if json_ptr.is_null() || out_json_ptr.is_null() {
        set_last_error("Null pointer argument");
        return 1;
    }

    let bytes = slice::from_raw_parts(json_ptr, json_len as usize);
    let json = match std::str::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            set_last_error(&format!("Invalid UTF-8: {e}"));
            return 2;
        }
    };

    let rendered = match Deck::from_json(json).and_then(|deck| Document::from_deck(&deck)) {
        Ok(doc) => doc.render(),
        Err(e) => {
            set_last_error(&e.to_string());
            return 3;
        }
    };
    let out = match rendered.to_json() {
        Ok(s) => s,
        Err(e) => {
            set_last_error(&e.to_string());
            return 3;
        }
    };

    match CString::new(out) {
        Ok(cs) => {
            *out_json_ptr = cs.into_raw();
            clear_last_error();
            0
        }
        Err(_) => {
            set_last_error("JSON contained null byte");
            4
        }
    }
}

/// Free a string returned by `sf_compose_markup`.
///
/// # Safety
/// `s` must have been returned through an `sf_*` out-parameter and not
/// freed already.
#[no_mangle]
pub unsafe extern "C" fn sf_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}

/// Retrieve the last error message on this thread, or null if the last
/// call succeeded.
///
/// The pointer stays valid until the next `sf_*` call on the same thread.
/// The caller must **not** free it.
#[no_mangle]
pub extern "C" fn sf_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(cs) => cs.as_ptr(),
        None => ptr::null(),
    })
}

/// Library version as a null-terminated string. Do not free.
#[no_mangle]
pub extern "C" fn sf_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
