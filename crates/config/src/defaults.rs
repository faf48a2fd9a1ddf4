/// Default values for configuration fields

pub fn host() -> String {
    "0.0.0.0".to_string()
}

pub fn port() -> u16 {
    8080
}

pub fn root_dir() -> String {
    ".".to_string()
}

pub fn public_dir() -> String {
    "public".to_string()
}

pub fn index_file() -> String {
    "index.html".to_string()
}

pub fn tcp_nodelay() -> bool {
    true
}

pub fn timeout_secs() -> u64 {
    60
}

pub fn max_concurrent_requests() -> usize {
    1000
}

pub fn allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn enable_compression() -> bool {
    true
}

pub fn streaming_threshold_mb() -> u64 {
    16  // Larger files are streamed from disk instead of read into memory
}

pub fn cache_max_age_secs() -> u64 {
    3600
}

pub fn scan_max_depth() -> usize {
    16
}

pub fn interactive_port_check() -> bool {
    true
}

pub fn port_release_delay_ms() -> u64 {
    1000  // Give the OS time to release the port after a kill
}

pub fn tunnel_enabled() -> bool {
    true
}

pub fn tunnel_provider() -> super::models::TunnelProvider {
    super::models::TunnelProvider::LocalhostRun
}

pub fn tunnel_timeout_secs() -> u64 {
    30
}
