//! Macros for recording metrics.

/// Increments a counter, optionally with a label.
#[macro_export]
macro_rules! inc {
    ($instrument:ident, $metric:ident, $key:expr => $value:expr) => {
        #[cfg(feature = "metrics")]
        ::metrics::$instrument!($crate::Metrics::$metric, $key => $value).increment(1);
    };
    ($instrument:ident, $metric:ident) => {
        #[cfg(feature = "metrics")]
        ::metrics::$instrument!($crate::Metrics::$metric).increment(1);
    };
}

/// Increases a counter by an amount, optionally with a label.
#[macro_export]
macro_rules! add {
    ($instrument:ident, $metric:ident, $key:expr => $value:expr, $amount:expr) => {
        #[cfg(feature = "metrics")]
        ::metrics::$instrument!($crate::Metrics::$metric, $key => $value).increment($amount);
    };
    ($instrument:ident, $metric:ident, $amount:expr) => {
        #[cfg(feature = "metrics")]
        ::metrics::$instrument!($crate::Metrics::$metric).increment($amount);
    };
}
