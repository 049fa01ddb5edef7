// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Baseline ("normal") placement of content inside a viewport.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Rect, Size, Vec2};

/// How content is mapped into the viewport before any user zoom or pan.
///
/// The policy only decides the baseline transform; user interaction is
/// always composed on top of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FitPolicy {
    /// Uniformly scale so the content fits, then center it.
    #[default]
    FitCenter,
    /// Like [`FitPolicy::FitCenter`], but never scale up.
    CenterInside,
    /// Uniformly scale so the content covers the viewport, then center it.
    ///
    /// Overflow on one axis is cropped by the viewport.
    CenterCrop,
    /// Keep the intrinsic size and center it.
    Center,
    /// Uniformly scale so the content fits, aligned to the top/left edge.
    FitStart,
    /// Uniformly scale so the content fits, aligned to the bottom/right edge.
    FitEnd,
    /// Scale each axis independently so the content exactly fills the viewport.
    FitXY,
}

/// Result of a successful fit: the baseline transform and the content rect it produces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalFit {
    /// Maps content coordinates (`0..width`, `0..height`) into the viewport.
    pub transform: Affine,
    /// The content bounds mapped through [`NormalFit::transform`], clipped to
    /// the viewport when they overflow it.
    pub content_rect: Rect,
}

impl FitPolicy {
    /// Computes the baseline transform for `content` inside a `viewport` of the given size.
    ///
    /// Returns `None` when either size is empty; the engine treats that as
    /// "nothing to interact with" rather than as an error.
    #[must_use]
    pub fn fit(self, content: Size, viewport: Size) -> Option<NormalFit> {
        if !is_positive(content) || !is_positive(viewport) {
            return None;
        }

        let transform = if content == viewport {
            Affine::IDENTITY
        } else {
            self.transform_for(content, viewport)
        };

        let view_rect = viewport.to_rect();
        let mut content_rect = transform.transform_rect_bbox(content.to_rect());
        if !contains_rect(view_rect, content_rect) {
            content_rect = content_rect.intersect(view_rect);
        }

        Some(NormalFit {
            transform,
            content_rect,
        })
    }

    fn transform_for(self, content: Size, viewport: Size) -> Affine {
        let sx = viewport.width / content.width;
        let sy = viewport.height / content.height;
        match self {
            Self::FitCenter | Self::FitStart | Self::FitEnd => {
                let s = sx.min(sy);
                // Only the non-dominant axis leaves slack to distribute.
                let slack = Vec2::new(
                    viewport.width - content.width * s,
                    viewport.height - content.height * s,
                );
                let offset = match self {
                    Self::FitCenter => (slack * 0.5).round(),
                    Self::FitEnd => slack.round(),
                    _ => Vec2::ZERO,
                };
                Affine::translate(offset) * Affine::scale(s)
            }
            Self::CenterInside => {
                let s = if viewport.width < content.width || viewport.height < content.height {
                    sx.min(sy)
                } else {
                    1.0
                };
                centered(content, viewport, s)
            }
            Self::CenterCrop => {
                let s = if viewport.height * content.width > viewport.width * content.height {
                    sy
                } else {
                    sx
                };
                centered(content, viewport, s)
            }
            Self::Center => centered(content, viewport, 1.0),
            Self::FitXY => Affine::scale_non_uniform(sx, sy),
        }
    }
}

fn centered(content: Size, viewport: Size, s: f64) -> Affine {
    let offset = Vec2::new(
        ((viewport.width - content.width * s) * 0.5).round(),
        ((viewport.height - content.height * s) * 0.5).round(),
    );
    Affine::translate(offset) * Affine::scale(s)
}

fn is_positive(size: Size) -> bool {
    size.width > 0.0 && size.height > 0.0 && size.is_finite()
}

/// `true` when `inner` lies entirely inside `outer` (edges may touch).
pub(crate) fn contains_rect(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}
