use log::debug;

/// Identity of one selection; later selections get larger tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Latest-wins snapshot slot.
///
/// Every selection change calls [`Latest::begin`]; a result is only stored
/// if it was requested under the most recent token, so a slow response for
/// an old selection can never overwrite a newer one.
#[derive(Debug)]
pub struct Latest<T> {
    issued: u64,
    value: Option<T>,
}

impl<T> Latest<T> {
    pub fn new() -> Self {
        Self {
            issued: 0,
            value: None,
        }
    }

    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Replace the snapshot if `token` is still current; returns whether it was applied
    pub fn apply(&mut self, token: RequestToken, value: T) -> bool {
        if !self.is_current(token) {
            debug!("Discarding stale result for request {} (current {})", token.0, self.issued);
            return false;
        }
        self.value = Some(value);
        true
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Drop the stored value; pending tokens stay valid
    pub fn clear(&mut self) {
        self.value = None;
    }
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self::new()
    }
}
