//! Optional Tracy instrumentation for mesh operations.
//!
//! Enabled with the `profiling` Cargo feature:
//!
//! ```toml
//! [dependencies]
//! wiregrid-core = { version = "0.1", features = ["profiling"] }
//! ```
//!
//! Deflate, normal evaluation and the writers open spans with
//! [`profile_function!`] and [`profile_scope!`]. Connect a Tracy client to the
//! running process to see them.
//!
//! ```ignore
//! use wiregrid_core::profiling::{profile_function, profile_scope};
//!
//! fn rebuild(mesh: &Mesh) {
//!     profile_function!();
//!     {
//!         profile_scope!("sort_keys");
//!         // ...
//!     }
//! }
//! ```
//!
//! With the feature disabled (the default) every macro expands to nothing.

#[cfg(feature = "profiling")]
pub use tracy_client::{self, plot as tracy_plot, span};

/// Create a profiling span for the current scope.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profile_span = $crate::profiling::span!($name);
    };
}

/// Create a profiling span (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_scope {
    ($name:expr) => {};
}

/// Create a profiling span for the enclosing function.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_function {
    () => {
        let _profile_span = $crate::profiling::span!();
    };
}

/// Create a profiling span for function (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_function {
    () => {};
}

/// Plot a value in Tracy, such as the vertex count after a deflate.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_plot {
    ($name:expr, $value:expr) => {
        $crate::profiling::tracy_plot!($name, $value as f64)
    };
}

/// Plot a value (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_plot {
    ($name:expr, $value:expr) => {
        let _ = $value;
    };
}

pub use profile_function;
pub use profile_plot;
pub use profile_scope;

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand_in_plain_functions() {
        fn instrumented(values: &[f32]) -> f32 {
            profile_function!();
            let sum: f32 = {
                profile_scope!("sum");
                values.iter().sum()
            };
            profile_plot!("sum", sum);
            sum
        }
        assert_eq!(instrumented(&[1.0, 2.0]), 3.0);
    }
}
