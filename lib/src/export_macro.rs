//! Declarative macro for the C-visible entry points of the runtime.
//!
//! Every primitive is implemented once as a Rust `*_internal` function. The
//! [`encl_export!`] macro stamps out the `#[unsafe(no_mangle)] extern "C"`
//! shim for it under an `encl_` prefix, so the runtime never shadows the
//! host's own `memcpy`/`strlen` when it is linked into a test binary.
//!
//! # Example
//!
//! ```rust,ignore
//! crate::encl_export! {
//!     fn strlen(s: *const c_char) -> usize => strlen_internal;
//! }
//! ```
//!
//! generates `pub unsafe extern "C" fn encl_strlen(s: *const c_char) -> usize`.

#[macro_export]
macro_rules! encl_export {
    (
        $(
            $(#[$meta:meta])*
            fn $name:ident($($arg:ident : $arg_ty:ty),* $(,)?) -> $ret_ty:ty => $target:path;
        )*
    ) => {
        $crate::paste::paste! {
            $(
                $(#[$meta])*
                #[unsafe(no_mangle)]
                pub unsafe extern "C" fn [<encl_ $name>]($($arg: $arg_ty),*) -> $ret_ty {
                    unsafe { $target($($arg),*) }
                }
            )*
        }
    };
}
