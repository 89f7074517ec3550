//! Register set of a generated scanner.
//!
//! Table-driven scanner generators keep their state in a handful of
//! registers: the current and end pointers, an optional end-of-file
//! pointer, the state register, the longest-match action register, and the
//! start/end of the most recent token. [`ScannerRegs`] holds them as byte
//! offsets into the input. The bridge only ever reads `ts` and `te`.

/// Scanner registers, as byte offsets into the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScannerRegs {
    /// Current position.
    pub p: usize,
    /// End of the available input.
    pub pe: usize,
    /// End of file, when the whole input is known to be present.
    pub eof: Option<usize>,
    /// Current scanner state.
    pub cs: usize,
    /// Most recent successful longest-match action.
    pub act: usize,
    /// Start of the current token.
    pub ts: usize,
    /// One past the end of the current token.
    pub te: usize,
}

impl ScannerRegs {
    /// Registers positioned at the start of a complete input of `len` bytes.
    pub fn new(len: usize, start_state: usize) -> Self {
        Self {
            p: 0,
            pe: len,
            eof: Some(len),
            cs: start_state,
            act: 0,
            ts: 0,
            te: 0,
        }
    }

    /// Returns `true` once the current position has reached end of file.
    #[inline]
    pub fn at_eof(&self) -> bool {
        self.eof == Some(self.p)
    }

    /// Records a token from `ts` to `te` and moves the current position to
    /// its end.
    pub fn set_token(&mut self, ts: usize, te: usize, act: usize) {
        debug_assert!(ts <= te && te <= self.pe);
        self.ts = ts;
        self.te = te;
        self.act = act;
        self.p = te;
    }

    /// Length of the current token in bytes.
    #[inline]
    pub fn token_len(&self) -> usize {
        self.te - self.ts
    }
}
