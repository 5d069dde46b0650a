use nutype::nutype;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationSlice {
    pub limit: PaginationLimit,
    pub offset: u64,
}

#[nutype(
    validate(greater_or_equal = 1, less_or_equal = PaginationLimit::MAX),
    derive(Debug, Clone, Copy, PartialEq, Eq, Deref, TryFrom, Serialize, Deserialize)
)]
pub struct PaginationLimit(u64);

impl PaginationLimit {
    pub const MAX: u64 = 100;
    pub const DEFAULT: u64 = 10;

    pub fn max() -> Self {
        Self::try_new(Self::MAX).unwrap()
    }
}

impl Default for PaginationLimit {
    fn default() -> Self {
        Self::try_new(Self::DEFAULT).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_limit_default() {
        assert_eq!(*PaginationLimit::default(), 10);
    }

    #[test]
    fn pagination_limit_bounds() {
        assert!(PaginationLimit::try_new(0).is_err());
        assert!(PaginationLimit::try_new(101).is_err());
        PaginationLimit::try_new(100).unwrap();
    }
}
