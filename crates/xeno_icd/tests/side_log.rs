//! Loader-driven calls reach the side log without the vendor init.
//!
//! Own test binary: the global subscriber is installed once per process.

use ash::vk;
use xeno_env::settings::SIDE_LOG_ENV;
use xeno_icd::{entry, exports};

#[test]
fn loader_calls_append_to_side_log_without_init() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("logs/xeno.log");
    std::env::set_var(SIDE_LOG_ENV, &log);

    unsafe {
        let mut version = 2;
        assert_eq!(entry::negotiate_loader_icd_interface_version(&mut version), vk::Result::SUCCESS);
        let mut count = 0;
        assert_eq!(
            entry::enumerate_physical_devices(vk::Instance::null(), &mut count, std::ptr::null_mut()),
            vk::Result::SUCCESS
        );
    }
    exports::xeno_flush_logs();

    let text = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines.iter().any(|l| l.contains("vk_icdNegotiateLoaderICDInterfaceVersion")), "{text}");
    assert!(lines.last().is_some_and(|l| l.contains("FLUSH_LOGS")), "{text}");
}
