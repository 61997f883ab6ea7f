// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fullscreen image viewer state.

/// Which image of the selected pin is shown, if the viewer is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewerState {
    pub open: bool,
    pub index: usize,
}

impl ViewerState {
    /// Open at the first image. Stays closed when there is nothing to show.
    pub fn open(&mut self, count: usize) {
        self.index = 0;
        self.open = count > 0;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Advance, wrapping past the last image.
    pub fn next(&mut self, count: usize) {
        if !self.open || count == 0 {
            return;
        }
        self.index = (self.index + 1) % count;
    }

    /// Step back, wrapping before the first image.
    pub fn prev(&mut self, count: usize) {
        if !self.open || count == 0 {
            return;
        }
        self.index = (self.index + count - 1) % count;
    }

    /// Keep the index valid after the image list shrank.
    pub fn clamp(&mut self, count: usize) {
        if count == 0 {
            self.close();
        } else if self.index >= count {
            self.index = count - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps() {
        let mut viewer = ViewerState { open: true, index: 2 };
        viewer.next(3);
        assert_eq!(viewer.index, 0);
    }

    #[test]
    fn test_prev_wraps() {
        let mut viewer = ViewerState { open: true, index: 0 };
        viewer.prev(3);
        assert_eq!(viewer.index, 2);
        viewer.prev(3);
        assert_eq!(viewer.index, 1);
    }

    #[test]
    fn test_open_requires_images() {
        let mut viewer = ViewerState::default();
        viewer.open(0);
        assert!(!viewer.open);
        viewer.open(2);
        assert_eq!(viewer, ViewerState { open: true, index: 0 });
    }

    #[test]
    fn test_navigation_ignored_when_closed() {
        let mut viewer = ViewerState::default();
        viewer.next(3);
        assert_eq!(viewer.index, 0);
    }

    #[test]
    fn test_clamp() {
        let mut viewer = ViewerState { open: true, index: 4 };
        viewer.clamp(2);
        assert_eq!(viewer.index, 1);
        viewer.clamp(0);
        assert_eq!(viewer, ViewerState::default());
    }
}
