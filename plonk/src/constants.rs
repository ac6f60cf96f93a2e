/// Number of wire columns: left, right and output
pub const COLUMNS: usize = 3;

/// `ql`, `qr`, `qo`, `qm` and `qc`
pub const SELECTORS: usize = 5;

/// The quotient is committed to in this many chunks of `n` coefficients
pub const QUOTIENT_CHUNKS: usize = 3;

/// The constraint identities are evaluated on a domain this many times larger
/// than the circuit domain
pub const FFT_EXPANSION_FACTOR: usize = 4;
