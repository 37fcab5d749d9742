//! Vendor C API next to the Vulkan entry points
//!
//! Init, BCn fallback control and structured diagnostic lines. String
//! arguments may be null.

#![allow(clippy::missing_safety_doc)]

use std::borrow::Cow;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use xeno_env::settings::set_force_override;
use xeno_env::{ForceFlag, Settings};

unsafe fn text<'a>(ptr: *const c_char, default: &'a str) -> Cow<'a, str> {
    if ptr.is_null() {
        Cow::Borrowed(default)
    } else {
        CStr::from_ptr(ptr).to_string_lossy()
    }
}

#[no_mangle]
pub extern "C" fn xeno_init() {
    let settings = Settings::from_env();
    xeno_services::init_logging(&settings);
    crate::global().initialize(&settings);
}

#[no_mangle]
pub unsafe extern "C" fn xeno_hw_supports_bc_format(vk_format_name: *const c_char) -> c_int {
    let format = text(vk_format_name, "");
    let needs = crate::global().needs_software_fallback(&format, &Settings::from_env());
    c_int::from(!needs)
}

/// Override `XCLIPSE_FORCE_HW_BC` for this process without touching the
/// environment; later decisions see it through `Settings::from_env`.
#[no_mangle]
pub extern "C" fn xeno_set_force_hw_bc(enable: c_int) {
    crate::ensure_logging();
    let flag = if enable != 0 { ForceFlag::On } else { ForceFlag::Off };
    tracing::info!(?flag, "force hardware BC override");
    set_force_override(flag);
}

#[no_mangle]
pub unsafe extern "C" fn ensure_fallback_decoder_ready(vk_format_name: *const c_char) -> c_int {
    if vk_format_name.is_null() {
        return -1;
    }
    let format = text(vk_format_name, "");
    crate::global().fallback().ensure_ready(&format);
    0
}

/// Decoder path for `vk_format_name`, or null when hardware decoding applies
/// or no decoder exists. The string lives as long as the process.
#[no_mangle]
pub unsafe extern "C" fn prepare_decoder_for_format(vk_format_name: *const c_char) -> *const c_char {
    if vk_format_name.is_null() {
        return std::ptr::null();
    }
    let format = text(vk_format_name, "");
    let icd = crate::global();
    if !icd.needs_software_fallback(&format, &Settings::from_env()) {
        return std::ptr::null();
    }
    match icd.fallback().locate(&format) {
        Some(path) => icd.intern_decoder_path(&path),
        None => std::ptr::null(),
    }
}

/// Read the decoder program for `vk_format_name`. The buffer belongs to the
/// caller and must go back through `xeno_free_blob`.
#[no_mangle]
pub unsafe extern "C" fn load_fallback_spv_blob(vk_format_name: *const c_char, out_size: *mut usize) -> *mut u8 {
    if vk_format_name.is_null() {
        return std::ptr::null_mut();
    }
    let format = text(vk_format_name, "");
    let search_paths = crate::global().fallback().search_paths();
    match xeno_fallback::load_decoder_blob(&format, &search_paths) {
        Ok(blob) => {
            if let Some(size) = out_size.as_mut() {
                *size = blob.len();
            }
            Box::into_raw(blob.into_boxed_slice()).cast::<u8>()
        }
        Err(err) => {
            tracing::warn!(%format, %err, "fallback blob unavailable");
            std::ptr::null_mut()
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn xeno_free_blob(blob: *mut u8, size: usize) {
    if !blob.is_null() {
        drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(blob, size)));
    }
}

#[no_mangle]
pub extern "C" fn bc_emulate_selftest() -> c_int {
    xeno_fallback::run_selftest(crate::global().fallback());
    0
}

#[no_mangle]
pub unsafe extern "C" fn xeno_log_bc_fallback(image_id: *const c_char, format: *const c_char, reason: *const c_char) {
    crate::ensure_logging();
    tracing::info!(
        "BC_FALLBACK image={} format={} reason={}",
        text(image_id, "?"),
        text(format, "?"),
        text(reason, "?")
    );
}

#[no_mangle]
pub unsafe extern "C" fn xeno_log_pipeline_create(
    pipeline_name: *const c_char,
    stage: *const c_char,
    success: c_int,
    detail: *const c_char,
) {
    crate::ensure_logging();
    tracing::info!(
        "PIPELINE_CREATE name={} stage={} success={} detail={}",
        text(pipeline_name, "?"),
        text(stage, "?"),
        success,
        text(detail, "")
    );
}

#[no_mangle]
pub unsafe extern "C" fn xeno_log_queue_submit(queue_name: *const c_char, submit_id: u64, cmdbuf_count: u64, duration_ns: u64) {
    crate::ensure_logging();
    tracing::info!(
        "QUEUE_SUBMIT queue={} id={} cmdbufs={} duration_ns={}",
        text(queue_name, "default"),
        submit_id,
        cmdbuf_count,
        duration_ns
    );
}

#[no_mangle]
pub unsafe extern "C" fn xeno_log_memory_alloc(alloc_type: *const c_char, size: u64, tag: *const c_char) {
    crate::ensure_logging();
    tracing::info!("MEM_ALLOC type={} size={} tag={}", text(alloc_type, "?"), size, text(tag, ""));
}

#[no_mangle]
pub extern "C" fn xeno_flush_logs() {
    crate::ensure_logging();
    tracing::info!("FLUSH_LOGS");
}
