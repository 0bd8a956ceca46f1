//! Caller-facing logging macros.
//!
//! Each level macro wraps [`crate::log`], prepending the metadata header
//! and injecting the source file basename, the enclosing function name
//! and the line number ahead of the caller's own arguments.

/// Basename of a source path as reported by `file!()`.
#[doc(hidden)]
pub fn __basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Name of the enclosing function, without its module path.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn marker() {}
        fn name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = name_of(marker);
        let name = &name[..name.len() - "::marker".len()];
        match name.rfind("::") {
            Some(pos) => &name[pos + 2..],
            None => name,
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_with_level {
    ($level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(
            $level,
            &::std::format!("$$%s$$%s$$%d$${}", $template),
            &[
                $crate::FormatArg::from($crate::__basename(::core::file!())),
                $crate::FormatArg::from($crate::__function_name!()),
                $crate::FormatArg::from(::core::line!()),
                $($crate::FormatArg::from($arg)),*
            ],
        )
    };
}

/// Log at [`LogLevel::Critical`](crate::LogLevel::Critical).
#[macro_export]
macro_rules! log_critical {
    ($($args:tt)*) => {
        $crate::__log_with_level!($crate::LogLevel::Critical, $($args)*)
    };
}

/// Log at [`LogLevel::Error`](crate::LogLevel::Error).
#[macro_export]
macro_rules! log_error {
    ($($args:tt)*) => {
        $crate::__log_with_level!($crate::LogLevel::Error, $($args)*)
    };
}

/// Log at [`LogLevel::Warn`](crate::LogLevel::Warn).
#[macro_export]
macro_rules! log_warn {
    ($($args:tt)*) => {
        $crate::__log_with_level!($crate::LogLevel::Warn, $($args)*)
    };
}

/// Log at [`LogLevel::Info`](crate::LogLevel::Info).
///
/// The template goes through the mini-language: `%1` descends into the
/// child named by the next argument, everything else formats
/// printf-style.
///
/// ```ignore
/// log_info!("listener up");                       // record at the root
/// log_info!("%1accepted %s", "net", peer_addr);   // record under "net"
/// ```
#[macro_export]
macro_rules! log_info {
    ($($args:tt)*) => {
        $crate::__log_with_level!($crate::LogLevel::Info, $($args)*)
    };
}

/// Log at [`LogLevel::Debug`](crate::LogLevel::Debug).
#[macro_export]
macro_rules! log_debug {
    ($($args:tt)*) => {
        $crate::__log_with_level!($crate::LogLevel::Debug, $($args)*)
    };
}
