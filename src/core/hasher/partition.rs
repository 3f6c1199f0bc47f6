//! Even division of one image axis into blocks.

use std::ops::Range;

/// Splits `extent` pixels into `blocks` contiguous spans.
///
/// Spans are `extent / blocks` long; the remainder is handed out one pixel at
/// a time to the last spans, so every pixel lands in exactly one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    start: u32,
    base: u32,
    blocks: u32,
    first_long: u32,
}

impl Partition {
    /// Partition `0..extent`. Returns `None` when a span would be empty.
    pub fn new(extent: u32, blocks: u32) -> Option<Self> {
        Self::over(0..extent, blocks)
    }

    /// Partition an arbitrary pixel range
    pub fn over(range: Range<u32>, blocks: u32) -> Option<Self> {
        let extent = range.end.checked_sub(range.start)?;
        if blocks == 0 || extent / blocks == 0 {
            return None;
        }

        Some(Self {
            start: range.start,
            base: extent / blocks,
            blocks,
            first_long: blocks - extent % blocks,
        })
    }

    /// Number of spans
    pub fn len(&self) -> u32 {
        self.blocks
    }

    /// Pixel span of block `index`
    pub fn span(&self, index: u32) -> Range<u32> {
        let offset = |i: u32| self.start + i * self.base + i.saturating_sub(self.first_long);
        offset(index)..offset(index + 1)
    }

    /// All spans, in order
    pub fn spans(&self) -> impl Iterator<Item = Range<u32>> + '_ {
        (0..self.blocks).map(move |i| self.span(i))
    }
}
