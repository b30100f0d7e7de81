//! Request sequencing for store refreshes.

/// Identifies one issued refresh. Later tokens compare greater.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshToken(u64);

/// Hands out refresh tokens and decides which responses may be applied.
///
/// Only the response to the most recently issued token is accepted; anything
/// older is stale no matter when it arrives.
#[derive(Debug, Default)]
pub struct RefreshSequence {
    issued: u64,
    settled: u64,
}

impl RefreshSequence {
    /// Issue a token for a new request, superseding every earlier one.
    ///
    pub fn issue(&mut self) -> RefreshToken {
        self.issued += 1;
        RefreshToken(self.issued)
    }

    pub fn is_latest(&self, token: RefreshToken) -> bool {
        token.0 == self.issued
    }

    /// Mark the latest request as answered. Returns false, and changes
    /// nothing, if the token is stale.
    ///
    pub fn settle(&mut self, token: RefreshToken) -> bool {
        if !self.is_latest(token) {
            return false;
        }
        self.settled = token.0;
        true
    }

    /// True while the latest issued request has not been answered.
    ///
    pub fn is_pending(&self) -> bool {
        self.settled < self.issued
    }
}
