use zkp_utils::{error::ArithmeticError, math::log2_exact};

#[test]
fn test_log2_exact() {
    let tests = [(1, 0), (2, 1), (1024, 10), (1 << 40, 40)];
    for (n, expected) in tests {
        assert_eq!(log2_exact(n), Ok(expected), "log2({n})");
    }
    for n in [0, 3, 12, 1023] {
        assert_eq!(log2_exact(n), Err(ArithmeticError::NotPowerOfTwo(n)));
    }
}
