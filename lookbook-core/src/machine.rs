//! Expand/collapse state machine.
//!
//! `Idle → Opening → Open → Closing → Idle`. Each accepted open or close mints
//! a fresh sequence token; scheduled phases carry it and are dropped when it
//! no longer matches.

use crate::error::Rejection;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpandState {
    Idle,
    Opening { index: usize },
    Open { index: usize },
    /// `released` flips at the release step; the index stops being reported
    /// but the machine keeps refusing opens until restoration finishes.
    Closing { index: usize, released: bool },
}

#[derive(Clone, Debug)]
pub struct ExpandMachine {
    state: ExpandState,
    token: u64,
}

impl Default for ExpandMachine {
    fn default() -> Self {
        Self { state: ExpandState::Idle, token: 0 }
    }
}

impl ExpandMachine {
    pub fn state(&self) -> ExpandState {
        self.state
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.token == token
    }

    pub fn is_idle(&self) -> bool {
        self.state == ExpandState::Idle
    }

    pub fn is_expand_animating(&self) -> bool {
        matches!(self.state, ExpandState::Opening { .. })
    }

    pub fn is_collapse_animating(&self) -> bool {
        matches!(self.state, ExpandState::Closing { .. })
    }

    /// The post currently expanded, as shown in the breadcrumb.
    pub fn expanded_index(&self) -> Option<usize> {
        match self.state {
            ExpandState::Idle => None,
            ExpandState::Opening { index } | ExpandState::Open { index } => Some(index),
            ExpandState::Closing { index, released } => (!released).then_some(index),
        }
    }

    /// The item whose geometry the machine currently owns, open or on its way.
    pub fn presented_index(&self) -> Option<usize> {
        match self.state {
            ExpandState::Opening { index } | ExpandState::Open { index } => Some(index),
            _ => None,
        }
    }

    pub fn request_open(&mut self, index: usize, len: usize, is_dragging: bool) -> Result<u64, Rejection> {
        if is_dragging {
            return Err(Rejection::Dragging);
        }
        match self.state {
            ExpandState::Idle => {}
            ExpandState::Opening { .. } => return Err(Rejection::Opening),
            ExpandState::Open { .. } => return Err(Rejection::AlreadyOpen),
            ExpandState::Closing { .. } => return Err(Rejection::Closing),
        }
        if index >= len {
            return Err(Rejection::OutOfRange { index, len });
        }
        self.token += 1;
        self.state = ExpandState::Opening { index };
        log::debug!("open #{} accepted (token {})", index, self.token);
        Ok(self.token)
    }

    /// Returns the index being closed and the new sequence token.
    pub fn request_close(&mut self) -> Result<(usize, u64), Rejection> {
        let index = match self.state {
            ExpandState::Open { index } => index,
            ExpandState::Opening { .. } => return Err(Rejection::Opening),
            ExpandState::Closing { .. } => return Err(Rejection::Closing),
            ExpandState::Idle => return Err(Rejection::NothingOpen),
        };
        self.token += 1;
        self.state = ExpandState::Closing { index, released: false };
        log::debug!("close #{} accepted (token {})", index, self.token);
        Ok((index, self.token))
    }

    pub fn finish_open(&mut self, token: u64) -> bool {
        match self.state {
            ExpandState::Opening { index } if self.is_current(token) => {
                self.state = ExpandState::Open { index };
                true
            }
            _ => false,
        }
    }

    pub fn release(&mut self, token: u64) -> bool {
        match self.state {
            ExpandState::Closing { index, released: false } if self.is_current(token) => {
                self.state = ExpandState::Closing { index, released: true };
                true
            }
            _ => false,
        }
    }

    pub fn finish_close(&mut self, token: u64) -> bool {
        match self.state {
            ExpandState::Closing { .. } if self.is_current(token) => {
                self.state = ExpandState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Back to `Idle`, invalidating every outstanding token.
    pub fn reset(&mut self) {
        self.token += 1;
        self.state = ExpandState::Idle;
    }
}
