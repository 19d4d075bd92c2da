//! Label scroll timing
//!
//! A label wider than its frame scrolls to the end and back. Screens use
//! the round trip duration to schedule a redraw once the text has been
//! fully shown.

use crate::element::{Element, ScrollMode};

/// Time for a label to scroll to its end and back, in milliseconds
///
/// Returns 0 when the element is not a label, has no text, fits in its
/// frame, or does not move (zero speed or zero character width).
pub fn roundtrip_duration_ms(element: &Element<'_>, average_char_width: u32) -> u32 {
    let (ScrollMode::Once { speed, .. } | ScrollMode::Infinite { speed, .. }) =
        element.component.scroll_mode()
    else {
        return 0;
    };
    let Some(text) = element.text else {
        return 0;
    };
    if average_char_width == 0 {
        return 0;
    }

    // Width is estimated per byte, as the renderer receives the text
    let text_len = text.len() as u32;
    let width = element.component.width as u32;
    if width / average_char_width >= text_len {
        return 0;
    }

    let overflow = text_len
        .saturating_mul(average_char_width)
        .saturating_sub(width);
    let travel_ms = overflow.saturating_mul(2).saturating_mul(1000) / speed as u32;
    let delay_ms = element.component.scroll_mode().delay_ms();
    travel_ms.saturating_add(delay_ms.saturating_mul(2))
}
