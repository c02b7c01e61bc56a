pub trait ConstantTimeEq {
    fn eq(&self, other: &Self) -> bool;
}

impl ConstantTimeEq for &[u8] {
    fn eq(&self, other: &Self) -> bool {
        subtle::ConstantTimeEq::ct_eq(*self, *other).into()
    }
}

#[cfg(test)]
mod tests {
    use super::ConstantTimeEq;

    #[test]
    fn test_ct_eq() {
        let a: &[u8] = b"subkey-bytes";
        let b: &[u8] = b"subkey-bytes";
        let c: &[u8] = b"subkey-byteZ";
        let short: &[u8] = b"subkey";

        assert!(ConstantTimeEq::eq(&a, &b));
        assert!(!ConstantTimeEq::eq(&a, &c));
        assert!(!ConstantTimeEq::eq(&a, &short));
    }
}
