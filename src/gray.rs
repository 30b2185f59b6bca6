//! Reflected binary Gray codes.

/// Reflected Gray code sequence of `bits`-bit patterns, as `'0'`/`'1'` strings.
///
/// ```text
/// gray(0) = [""]
/// gray(n) = ["0" + c for c in gray(n-1)] ++ ["1" + c for c in reverse(gray(n-1))]
/// ```
///
/// Consecutive entries, including the last and the first, differ in exactly one bit.
///
/// ```
/// use logic_rs::gray::gray_code;
///
/// assert_eq!(gray_code(2), vec!["00", "01", "11", "10"]);
/// ```
pub fn gray_code(bits: usize) -> Vec<String> {
    if bits == 0 {
        return vec![String::new()];
    }
    let prev = gray_code(bits - 1);
    prev.iter()
        .map(|c| format!("0{}", c))
        .chain(prev.iter().rev().map(|c| format!("1{}", c)))
        .collect()
}

/// Number of positions at which two equal-length codes differ.
pub fn hamming(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count()
}
