/// Provider name constants to ensure consistency across the codebase.
/// The factory key is the lowercase form used in configuration and on the CLI;
/// the display name is what ends up in `SearchResult::provider`.

pub const KBGA_PROVIDER: &str = "kbga";
pub const KBGA_DISPLAY_NAME: &str = "KBGA";
pub const KBGA_BASE_URL: &str = "https://meta.karl-barth.ch";

pub const DEFAULT_PROVIDER: &str = KBGA_PROVIDER;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Get all supported provider keys
pub fn get_supported_providers() -> Vec<&'static str> {
    vec![KBGA_PROVIDER]
}
