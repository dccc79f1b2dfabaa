//! One-time bring-up of the fontconfig library

use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use fontconfig::Fontconfig;
use fontconfig_sys::statics::{LIB, LIB_RESULT};

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static FAILURE_REPORTED: AtomicBool = AtomicBool::new(false);
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Make sure fontconfig is usable, initializing it on first use.
///
/// Returns `true` once fontconfig has been brought up; later calls return
/// immediately. On failure `false` is returned and the next call tries
/// again; only the first failure is logged as an error. Callers must not
/// touch patterns after `false`.
pub fn ensure_initialized() -> bool {
    if INITIALIZED.load(Ordering::Acquire) {
        return true;
    }

    let _guard = match INIT_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if INITIALIZED.load(Ordering::Acquire) {
        return true;
    }

    // libfontconfig is loaded at runtime and may simply be missing.
    let library_exists = LIB_RESULT.as_ref().ok().is_some();
    if !library_exists || Fontconfig::new().is_none() {
        if FAILURE_REPORTED.swap(true, Ordering::Relaxed) {
            tracing::debug!("fontconfig still unavailable");
        } else {
            tracing::error!("Can't init font config library");
        }
        return false;
    }

    tracing::debug!("fontconfig initialized");
    INITIALIZED.store(true, Ordering::Release);
    true
}

pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::Acquire)
}

/// Reload the font configuration if installed fonts or config files changed.
///
/// Returns `true` when a reload happened, meaning previously resolved fonts
/// may no longer be what a fresh match would produce.
pub fn rescan() -> bool {
    if !is_initialized() {
        return false;
    }

    let up_to_date = unsafe { (LIB.FcConfigUptoDate)(ptr::null_mut()) } != 0;
    if up_to_date {
        return false;
    }

    let reloaded = unsafe { (LIB.FcInitBringUptoDate)() } != 0;
    if reloaded {
        tracing::info!("font configuration changed, reloaded");
    } else {
        tracing::warn!("font configuration changed but reloading failed");
    }
    reloaded
}
