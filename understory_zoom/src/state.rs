// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::fling::Scroller;
use crate::history::ZoomSegment;
use crate::smooth::SmoothZoom;

/// Which interaction a [`crate::ZoomView`] is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionState {
    /// No content or no usable layout; input is ignored.
    Disabled,
    /// Idle and ready for input.
    Normal,
    /// A single pointer is dragging the content.
    Scroll,
    /// Two pointers are pinching.
    PinchScale,
    /// A smooth zoom animation is running.
    SmoothScale,
    /// A fling or spring-back is running.
    Fling,
}

/// The engine's state together with the data only that state needs.
#[derive(Clone, Debug)]
pub(crate) enum Interaction {
    Disabled,
    Normal,
    Scroll,
    PinchScale(ZoomSegment),
    SmoothScale(SmoothZoom),
    Fling(Scroller),
}

impl Interaction {
    pub(crate) fn state(&self) -> InteractionState {
        match self {
            Self::Disabled => InteractionState::Disabled,
            Self::Normal => InteractionState::Normal,
            Self::Scroll => InteractionState::Scroll,
            Self::PinchScale(_) => InteractionState::PinchScale,
            Self::SmoothScale(_) => InteractionState::SmoothScale,
            Self::Fling(_) => InteractionState::Fling,
        }
    }

    /// Whether a drag or pinch may start from here.
    pub(crate) fn accepts_gesture(&self) -> bool {
        matches!(self, Self::Normal | Self::Scroll)
    }
}
