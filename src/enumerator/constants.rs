// Supported operand counts and cache file settings
pub const MIN_OPERANDS: usize = 2;
pub const MAX_OPERANDS: usize = 5;
pub const CACHE_FILE_NAME: &str = "ops.cache";
pub const CACHE_FORMAT_VERSION: u32 = 1;
