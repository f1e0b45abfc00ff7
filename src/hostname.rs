//! Hostname resolution for the page headings.
//!
//! Inside a container the hostname is usually the pod or container ID, which is
//! what makes the page useful behind a load balancer. Sources are tried in
//! order: the kernel's UTS hostname, the `HOSTNAME` environment variable, then
//! `/etc/hostname`.

use std::path::Path;

use crate::config::HOSTNAME_PLACEHOLDER;

const PROC_HOSTNAME: &str = "/proc/sys/kernel/hostname";
const ETC_HOSTNAME: &str = "/etc/hostname";
const HOSTNAME_ENV: &str = "HOSTNAME";

#[derive(Debug, thiserror::Error)]
#[error("Unable to resolve hostname from the kernel, $HOSTNAME or /etc/hostname")]
pub struct HostResolutionError;

/// Resolve the hostname of the machine or container.
pub fn resolve() -> Result<String, HostResolutionError> {
    resolve_from(
        PROC_HOSTNAME,
        std::env::var(HOSTNAME_ENV).ok(),
        ETC_HOSTNAME,
    )
}

/// Resolve from explicit sources, in order: the kernel file, the environment
/// value, then the hostname file.
pub fn resolve_from(
    proc_path: impl AsRef<Path>,
    env_value: Option<String>,
    etc_path: impl AsRef<Path>,
) -> Result<String, HostResolutionError> {
    read_file(proc_path)
        .or_else(|| normalize(env_value?))
        .or_else(|| read_file(etc_path))
        .ok_or(HostResolutionError)
}

/// Resolve the hostname, falling back to a placeholder instead of failing.
pub fn resolve_or_placeholder() -> String {
    or_placeholder(resolve())
}

fn or_placeholder(resolved: Result<String, HostResolutionError>) -> String {
    resolved.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Using hostname placeholder");
        HOSTNAME_PLACEHOLDER.to_string()
    })
}

fn read_file(path: impl AsRef<Path>) -> Option<String> {
    normalize(std::fs::read_to_string(path).ok()?)
}

fn normalize(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
