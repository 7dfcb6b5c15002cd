// Constants module - centralized default values for configuration
//
// This module defines the default values used when a configuration field
// is omitted.

// =============================================================================
// Negotiation defaults
// =============================================================================

/// Default size (in bytes) above which a payload is gzipped for capable clients
pub const DEFAULT_GZIP_THRESHOLD_BYTES: usize = 4096;

/// Default upper bound for a single decompression (100 MB)
pub const DEFAULT_MAX_DECOMPRESSED_SIZE_BYTES: usize = 100 * 1024 * 1024;

// =============================================================================
// Compression levels
// =============================================================================

/// flate2 level used when speed is preferred
pub const FASTEST_LEVEL: u32 = 1;

/// flate2 level used when ratio is preferred
pub const BEST_LEVEL: u32 = 9;

// =============================================================================
// Logging defaults
// =============================================================================

/// Filter directive used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";
