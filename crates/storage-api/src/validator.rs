use reth_chain_primitives::Header;

/// External header-validity rule the core's validator delegates to for every
/// non-genesis header: proof-of-work/difficulty/gas-limit-delta checks and
/// whatever else the active fork requires of a (header, parent) pair. The
/// core treats the result as opaque pass/fail.
pub trait ParentBlockHeaderValidator: Send + Sync {
    fn validate(&self, header: &Header, parent: &Header) -> bool;
}
