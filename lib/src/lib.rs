//! enclibc runtime support library.
//!
//! The freestanding pieces of a C runtime for code running inside a
//! memory-constrained enclave: byte and string primitives, a bounded
//! printf-style renderer, and a leveled logger that writes through a
//! host-provided sink.

#![no_std]

#[doc(hidden)]
pub use paste;

pub mod alignment;
pub mod export_macro;
pub mod init_flag;
pub mod klog;
pub mod memory;
pub mod numfmt;
pub mod printf;
pub mod string;

pub use alignment::{align_down, align_up_checked, is_aligned};
pub use enclibc_abi::limits;
pub use init_flag::InitFlag;
pub use klog::{
    KlogLevel, KlogSink, klog_attach_sink, klog_detach_sink, klog_get_level, klog_init,
    klog_is_enabled, klog_set_level,
};
pub use printf::{
    Arg, ArgSource, BoundedWriter, Conversion, RenderConfig, SliceArgs, UnknownDirective,
    snprintf, vsnprintf, vsnprintf_with,
};
