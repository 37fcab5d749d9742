//! Crash handlers
//!
//! SIGSEGV and SIGABRT write a final `CRASH signal=<n>` line to the side log,
//! restore the default disposition and re-raise, so the fault still reaches
//! the host's own reporting.

/// Signals that most often mean the driver stack crashed.
#[cfg(unix)]
pub const CRASH_SIGNALS: [libc::c_int; 2] = [libc::SIGSEGV, libc::SIGABRT];

#[cfg(unix)]
pub fn install_crash_handlers() {
    for sig in CRASH_SIGNALS {
        let previous = unsafe { libc::signal(sig, crash_handler as extern "C" fn(libc::c_int) as libc::sighandler_t) };
        if previous == libc::SIG_ERR {
            tracing::warn!(sig, "failed to install crash handler");
        }
    }
}

#[cfg(not(unix))]
pub fn install_crash_handlers() {
    tracing::debug!("crash handlers unsupported on this platform");
}

#[cfg(unix)]
extern "C" fn crash_handler(sig: libc::c_int) {
    let mut buf = [0u8; 32];
    let line = crash_line(sig, &mut buf);
    // Never wait on the log lock from signal context
    crate::side_log::global().try_append(line);
    unsafe {
        libc::signal(sig, libc::SIG_DFL);
        libc::raise(sig);
    }
}

/// Format `CRASH signal=<n>` without allocating.
pub fn crash_line(sig: i32, buf: &mut [u8; 32]) -> &[u8] {
    const PREFIX: &[u8] = b"CRASH signal=";
    buf[..PREFIX.len()].copy_from_slice(PREFIX);
    let mut len = PREFIX.len();

    let mut digits = [0u8; 11];
    let mut n = sig.unsigned_abs();
    let mut count = 0;
    loop {
        digits[count] = b'0' + (n % 10) as u8;
        count += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    if sig < 0 {
        buf[len] = b'-';
        len += 1;
    }
    for d in digits[..count].iter().rev() {
        buf[len] = *d;
        len += 1;
    }
    &buf[..len]
}
