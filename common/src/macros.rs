/// Emits a success line through the log pipeline (rendered as `[+]`).
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        tracing::info!($($arg)*)
    };
}

/// Emits a failure line through the log pipeline (rendered as `[-]`).
#[macro_export]
macro_rules! failure {
    ($($arg:tt)*) => {
        tracing::error!($($arg)*)
    };
}

/// Emits a warning line through the log pipeline (rendered as `[!]`).
#[macro_export]
macro_rules! warning {
    ($($arg:tt)*) => {
        tracing::warn!($($arg)*)
    };
}
