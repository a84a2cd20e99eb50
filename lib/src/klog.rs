use core::ffi::c_int;
use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

use spin::Mutex;

use crate::init_flag::InitFlag;
use crate::printf::BoundedWriter;

/// Longest line handed to the sink, newline included. Longer lines are cut.
pub const KLOG_LINE_MAX: usize = 256;

/// Receives one finished line (newline included) per log call.
pub type KlogSink = fn(&[u8]);

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KlogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl KlogLevel {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => KlogLevel::Error,
            1 => KlogLevel::Warn,
            2 => KlogLevel::Info,
            3 => KlogLevel::Debug,
            _ => KlogLevel::Trace,
        }
    }
}

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(KlogLevel::Info as u8);
static SINK_READY: InitFlag = InitFlag::new();
static SINK: Mutex<Option<KlogSink>> = Mutex::new(None);
/// Held while a sink runs; lines logged meanwhile are dropped.
static IN_SINK: InitFlag = InitFlag::new();

#[inline(always)]
fn is_enabled(level: KlogLevel) -> bool {
    level as u8 <= CURRENT_LEVEL.load(Ordering::Relaxed)
}

fn emit(line: &[u8]) {
    // Sink runs unlocked.
    let Some(sink) = *SINK.lock() else {
        return;
    };
    if !IN_SINK.init_once() {
        return;
    }
    sink(line);
    IN_SINK.reset();
}

pub fn log_args(level: KlogLevel, args: fmt::Arguments<'_>) {
    if !is_enabled(level) || !SINK_READY.is_set_relaxed() {
        return;
    }

    let mut line = [0u8; KLOG_LINE_MAX];
    let mut writer = BoundedWriter::new(&mut line);
    let _ = fmt::write(&mut writer, args);
    let len = writer.written();
    line[len] = b'\n';
    emit(&line[..=len]);
}

pub fn klog_init() {
    CURRENT_LEVEL.store(KlogLevel::Info as u8, Ordering::Relaxed);
    klog_detach_sink();
}

pub fn klog_attach_sink(sink: KlogSink) {
    *SINK.lock() = Some(sink);
    SINK_READY.mark_set();
}

pub fn klog_detach_sink() {
    SINK_READY.reset();
    *SINK.lock() = None;
}

pub fn klog_set_level(level: KlogLevel) {
    CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn klog_get_level() -> KlogLevel {
    KlogLevel::from_raw(CURRENT_LEVEL.load(Ordering::Relaxed))
}

pub fn klog_is_enabled(level: KlogLevel) -> c_int {
    if is_enabled(level) { 1 } else { 0 }
}

#[macro_export]
macro_rules! klog {
    ($level:expr, $($arg:tt)*) => {{
        $crate::klog::log_args($level, ::core::format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! klog_error {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Error, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_warn {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Warn, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_info {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Info, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_debug {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Debug, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_trace {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Trace, ::core::format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;

    static CAPTURED: Mutex<Vec<Vec<u8>>> = Mutex::new(Vec::new());

    fn capture(line: &[u8]) {
        CAPTURED.lock().push(line.to_vec());
    }

    fn captured_with(marker: &str) -> Vec<Vec<u8>> {
        CAPTURED
            .lock()
            .iter()
            .filter(|l| l.windows(marker.len()).any(|w| w == marker.as_bytes()))
            .cloned()
            .collect()
    }

    // Level and sink are process-wide, so everything runs in one test.
    #[test]
    fn levels_sink_and_truncation() {
        klog_init();
        assert_eq!(klog_get_level(), KlogLevel::Info);
        klog_info!("klog-test-no-sink");
        assert!(captured_with("klog-test-no-sink").is_empty());

        klog_attach_sink(capture);
        klog_info!("klog-test-info {}", 7);
        klog_debug!("klog-test-debug");
        assert_eq!(captured_with("klog-test-info"), [b"klog-test-info 7\n".to_vec()]);
        assert!(captured_with("klog-test-debug").is_empty());
        assert_eq!(klog_is_enabled(KlogLevel::Debug), 0);

        klog_set_level(KlogLevel::Trace);
        assert_eq!(klog_is_enabled(KlogLevel::Debug), 1);
        klog!(KlogLevel::Trace, "klog-test-trace");
        assert_eq!(captured_with("klog-test-trace").len(), 1);

        let long = [b'x'; KLOG_LINE_MAX * 2];
        let long = core::str::from_utf8(&long).unwrap();
        klog_warn!("klog-test-long {}", long);
        let lines = captured_with("klog-test-long");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), KLOG_LINE_MAX);
        assert_eq!(lines[0].last(), Some(&b'\n'));

        klog_set_level(KlogLevel::Error);
        klog_warn!("klog-test-filtered");
        assert!(captured_with("klog-test-filtered").is_empty());

        klog_init();
        klog_error!("klog-test-detached");
        assert!(captured_with("klog-test-detached").is_empty());

        klog_attach_sink(relogging_sink);
        klog_error!("klog-test-reenter");
        assert_eq!(captured_with("klog-test-reenter"), [b"klog-test-reenter\n".to_vec()]);
        assert!(captured_with("klog-test-nested").is_empty());
        klog_error!("klog-test-after");
        assert_eq!(captured_with("klog-test-after").len(), 1);
        klog_init();
    }

    fn relogging_sink(line: &[u8]) {
        capture(line);
        klog_error!("klog-test-nested");
    }
}
