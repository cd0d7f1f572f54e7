//! Candidate width selection
//!
//! Named devices alone leave large gaps between widths, so the device
//! catalog is merged with a uniform sweep of physical screen widths. The
//! sweep steps by `screen_step` to keep the number of srcset entries sane;
//! its upper bound is the widest screen we care about.

use crate::catalog::physical_widths;
use crate::SrcsetConfig;
use log::debug;

/// Caller-supplied bounds on the physical widths to generate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidthRange {
    pub min_width: Option<u32>,
    pub max_width: Option<u32>,
}

impl WidthRange {
    pub fn new(min_width: Option<u32>, max_width: Option<u32>) -> Self {
        Self { min_width, max_width }
    }

    /// Lower bound after defaults: the sweep step
    pub fn effective_min(&self, config: &SrcsetConfig) -> u32 {
        self.min_width.unwrap_or(config.screen_step)
    }

    /// Upper bound after defaults: the maximum screen width
    pub fn effective_max(&self, config: &SrcsetConfig) -> u32 {
        self.max_width.unwrap_or(config.max_screen_width)
    }
}

/// Uniform sweep `0, step, 2*step, ..` up to and including the maximum.
///
/// The maximum is always the last element, even when it is not a multiple
/// of the step.
pub fn screen_widths(config: &SrcsetConfig) -> Vec<u32> {
    let step = config.screen_step.max(1) as usize;
    let mut widths: Vec<u32> = (0..=config.max_screen_width).step_by(step).collect();
    if widths.last() != Some(&config.max_screen_width) {
        widths.push(config.max_screen_width);
    }
    widths
}

/// Device widths merged with the screen sweep, deduplicated and ascending
pub fn candidate_widths(config: &SrcsetConfig) -> Vec<u32> {
    let mut widths: Vec<u32> = physical_widths().chain(screen_widths(config)).collect();
    widths.sort_unstable();
    widths.dedup();
    widths
}

/// Take `count` elements starting at `start`, clamped to the end of `items`.
///
/// Note that `count` is the index of the first candidate at or above the
/// upper bound, not a distance from `start`. When `start > 0` this keeps
/// more candidates than the bound alone would suggest; callers rely on the
/// exact output, so the quirk lives here and nowhere else.
pub fn slice_from_with_count(items: &[u32], start: usize, count: usize) -> &[u32] {
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(count).min(items.len());
    &items[start..end]
}

/// Widths to render for one srcset: range-filtered candidates, plus exact
/// 1x/2x/3x matches when a display width is known.
pub fn target_widths(range: WidthRange, display_width: Option<u32>, config: &SrcsetConfig) -> Vec<u32> {
    let candidates = candidate_widths(config);
    let min = range.effective_min(config);
    let max = range.effective_max(config);

    let start = candidates.iter().position(|w| *w >= min).unwrap_or(0);
    let end = candidates.iter().position(|w| *w >= max).unwrap_or(candidates.len());
    let mut widths = slice_from_with_count(&candidates, start, end).to_vec();

    if let Some(w) = display_width {
        widths.extend([w, w.saturating_mul(2), w.saturating_mul(3)]);
        if config.dedupe_exact_widths {
            widths.sort_unstable();
            widths.dedup();
        }
    }

    debug!(
        "selected {} widths for range {}..{} (display width {:?})",
        widths.len(),
        min,
        max,
        display_width
    );
    widths
}
