//! Profiling utilities based on the `puffin` crate.
//!
//! The scope macros are always available and stay inert until
//! `init_profiling` turns scopes on.

pub use puffin::{profile_function, profile_scope};

/// Mark the end of a unit of work, e.g. one atlas build.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(feature = "profiling")]
mod server {
    use std::sync::OnceLock;

    static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

    /// Default address of the puffin HTTP server.
    pub const DEFAULT_ADDR: &str = "127.0.0.1:8585";

    /// Enable scopes and start a `puffin_http` server on `addr`.
    ///
    /// Connect `puffin_viewer` to the address to inspect the data.
    pub fn init_profiling(addr: &str) {
        puffin::set_scopes_on(true);

        match puffin_http::Server::new(addr) {
            Ok(server) => {
                tracing::info!("Puffin profiler server started on http://{}", addr);
                let _ = PROFILING_SERVER.set(server);
            }
            Err(e) => {
                tracing::error!("Failed to start puffin server: {}", e);
            }
        }
    }
}

#[cfg(feature = "profiling")]
pub use server::{DEFAULT_ADDR, init_profiling};
