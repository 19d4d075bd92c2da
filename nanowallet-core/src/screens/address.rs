//! Address display screen
//!
//! A black frame with a cross on the left, a check on the right, a fixed
//! title and one scrolling line showing the address text. Releasing the
//! left button quits the application.

use nanowallet_display::element::{
    Color, Component, Element, ElementKind, Fill, Font, Glyph, ScrollMode, ALIGN_CENTER,
};
use nanowallet_display::{
    roundtrip_duration_ms, ButtonAction, ButtonMask, LabelBuffer, Layout, Screen, Store, UxTimer,
};
use nanowallet_hal::Supervisor;

use crate::config::UxConfig;

/// User id of the scrolling address label
pub const SCROLLING_LABEL_ID: u8 = 2;

/// Fixed title line
pub const TITLE: &str = "Hello!";

/// Exit status reported when the user quits
const EXIT_SUCCESS: u32 = 0;

const BACKGROUND: Component = Component {
    kind: ElementKind::Rectangle,
    width: 128,
    height: 32,
    fill: Fill::Fill,
    foreground: Color::BLACK,
    background: Color::WHITE,
    ..Component::EMPTY
};

const CROSS_ICON: Component = Component {
    kind: ElementKind::Icon,
    x: 3,
    y: 12,
    width: Glyph::Cross.dimensions().0,
    height: Glyph::Cross.dimensions().1,
    foreground: Color::WHITE,
    background: Color::BLACK,
    icon_id: Glyph::Cross.id(),
    ..Component::EMPTY
};

const CHECK_ICON: Component = Component {
    kind: ElementKind::Icon,
    x: 117,
    y: 13,
    width: Glyph::Check.dimensions().0,
    height: Glyph::Check.dimensions().1,
    foreground: Color::WHITE,
    background: Color::BLACK,
    icon_id: Glyph::Check.id(),
    ..Component::EMPTY
};

const TITLE_LINE: Component = Component {
    kind: ElementKind::LabelLine,
    y: 12,
    width: 128,
    height: 12,
    foreground: Color::WHITE,
    background: Color::BLACK,
    font_id: Font::OpenSansRegular11px.id() | ALIGN_CENTER,
    ..Component::EMPTY
};

const ADDRESS_LINE: Component = Component {
    kind: ElementKind::LabelLine,
    user_id: SCROLLING_LABEL_ID,
    x: 23,
    y: 26,
    width: 82,
    height: 12,
    foreground: Color::WHITE,
    background: Color::BLACK,
    font_id: Font::OpenSansExtraBold11px.id() | ALIGN_CENTER,
    ..Component::EMPTY
}
.with_scroll(ScrollMode::Once {
    delay: 10,
    speed: 26,
});

/// Actions of the address screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressAction {
    /// Leave the application
    Quit,
}

/// Only the cross on the left is bound
const BUTTONS: ButtonAction<AddressAction> = ButtonAction::Map {
    left: Some(AddressAction::Quit),
    right: None,
    both: None,
};

/// Screen showing one address label
#[derive(Debug, Clone)]
pub struct AddressScreen {
    label: LabelBuffer,
    min_refresh_ms: u32,
    refresh_margin_ms: u32,
    average_char_width: u32,
}

impl AddressScreen {
    /// Create the screen with an empty label, timed from `config`
    pub fn new(config: &UxConfig) -> Self {
        Self {
            label: LabelBuffer::new(),
            min_refresh_ms: config.min_refresh.as_millis(),
            refresh_margin_ms: config.refresh_margin.as_millis(),
            average_char_width: config.average_char_width,
        }
    }

    /// Write the label text for this activation
    ///
    /// Returns false if the text was truncated to fit the buffer.
    pub fn activate(&mut self, text: &str) -> bool {
        let complete = self.label.set(text);
        if !complete {
            #[cfg(feature = "defmt")]
            defmt::warn!("Address label truncated to {} bytes", self.label.as_str().len());
        }
        complete
    }

    /// Text currently shown by the scrolling label
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Refresh interval for the scrolling label
    fn refresh_interval_ms(&self, element: &Element<'_>) -> u32 {
        let roundtrip = roundtrip_duration_ms(element, self.average_char_width);
        self.refresh_margin_ms
            .saturating_add(roundtrip)
            .max(self.min_refresh_ms)
    }
}

impl Screen for AddressScreen {
    fn elements(&self) -> Layout<'_> {
        let mut layout = Layout::new();
        for element in [
            Element::new(BACKGROUND),
            Element::new(CROSS_ICON),
            Element::new(CHECK_ICON),
            Element::with_text(TITLE_LINE, TITLE),
            Element::with_text(ADDRESS_LINE, self.label.as_str()),
        ] {
            // Five elements always fit
            let _ = layout.push(element);
        }
        layout
    }

    fn prepro<'e>(&self, element: Element<'e>, timer: &mut UxTimer) -> Option<Element<'e>> {
        if element.user_id() == SCROLLING_LABEL_ID {
            timer.set_interval(self.refresh_interval_ms(&element));
        }
        Some(element)
    }

    fn button<S: Supervisor>(&mut self, mask: ButtonMask, _counter: u32, supervisor: &mut S) -> u32 {
        BUTTONS.dispatch(mask, self, supervisor);
        0
    }
}

impl Store for AddressScreen {
    type Action = AddressAction;

    fn process_action<S: Supervisor>(&mut self, action: AddressAction, supervisor: &mut S) {
        match action {
            AddressAction::Quit => {
                #[cfg(feature = "defmt")]
                defmt::info!("Quit requested, exiting");
                supervisor.exit(EXIT_SUCCESS);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanowallet_hal::mock::MockSupervisor;
    use proptest::prelude::*;

    fn screen() -> AddressScreen {
        let mut screen = AddressScreen::new(&UxConfig::default());
        screen.activate("WORLD!");
        screen
    }

    #[test]
    fn test_layout_table() {
        let screen = screen();
        let layout = screen.elements();
        assert_eq!(layout.len(), 5);

        let kinds: heapless::Vec<ElementKind, 5> =
            layout.iter().map(|e| e.component.kind).collect();
        assert_eq!(
            &kinds[..],
            &[
                ElementKind::Rectangle,
                ElementKind::Icon,
                ElementKind::Icon,
                ElementKind::LabelLine,
                ElementKind::LabelLine,
            ]
        );

        assert_eq!(layout[1].component.icon_id, 7);
        assert_eq!(layout[2].component.icon_id, 6);
        assert_eq!(layout[3].text, Some("Hello!"));
        assert_eq!(layout[3].component.font_id, 10 | 0x8000);

        let address = layout[4];
        assert_eq!(address.user_id(), SCROLLING_LABEL_ID);
        assert_eq!(address.text, Some("WORLD!"));
        assert_eq!(address.component.stroke, 0x8A);
        assert_eq!(address.component.icon_id, 26);
        assert_eq!(address.component.font_id, 8 | 0x8000);
        assert_eq!(
            (address.component.x, address.component.y, address.component.width, address.component.height),
            (23, 26, 82, 12)
        );
    }

    #[test]
    fn test_activate_rewrites_label() {
        let mut screen = screen();
        assert!(screen.activate("0x1234"));
        assert_eq!(screen.label(), "0x1234");
        assert_eq!(screen.elements()[4].text, Some("0x1234"));
    }

    #[test]
    fn test_prepro_short_label_uses_minimum() {
        let screen = screen();
        let mut timer = UxTimer::default();
        let label = screen.elements()[4];
        assert_eq!(screen.prepro(label, &mut timer), Some(label));
        assert_eq!(timer.interval_ms(), 3000);
    }

    #[test]
    fn test_prepro_long_label_adds_roundtrip() {
        let mut screen = screen();
        // 40 chars * 7 px = 280 px, 198 px overflow at 26 px/s
        screen.activate(&"A".repeat(40));
        let mut timer = UxTimer::default();
        let label = screen.elements()[4];
        screen.prepro(label, &mut timer);

        let roundtrip = 2 * 198 * 1000 / 26 + 2 * 10 * 100;
        assert_eq!(timer.interval_ms(), 1000 + roundtrip);
    }

    #[test]
    fn test_left_release_exits() {
        let mut screen = screen();
        let mut sup = MockSupervisor::new();
        let ret = screen.button(ButtonMask::EVT_RELEASED | ButtonMask::LEFT, 0, &mut sup);
        assert_eq!(ret, 0);
        assert_eq!(sup.exits(), &[0]);
    }

    #[test]
    fn test_button_map() {
        let released = |mask: ButtonMask| mask | ButtonMask::EVT_RELEASED;
        assert_eq!(BUTTONS.resolve(released(ButtonMask::LEFT)), Some(AddressAction::Quit));
        assert_eq!(BUTTONS.resolve(released(ButtonMask::RIGHT)), None);
        assert_eq!(
            BUTTONS.resolve(released(ButtonMask::LEFT | ButtonMask::RIGHT)),
            None
        );
    }

    #[test]
    fn test_quit_action_exits() {
        let mut screen = screen();
        let mut sup = MockSupervisor::new();
        screen.process_action(AddressAction::Quit, &mut sup);
        assert_eq!(sup.exits(), &[0]);
    }

    #[test]
    fn test_multibyte_label_refresh_counts_bytes() {
        let mut screen = screen();
        // 12 characters, 24 bytes on the wire
        screen.activate("éééééééééééé");
        let mut timer = UxTimer::default();
        let label = screen.elements()[4];
        screen.prepro(label, &mut timer);

        let roundtrip = 2 * (24 * 7 - 82) * 1000 / 26 + 2 * 10 * 100;
        assert_eq!(timer.interval_ms(), 1000 + roundtrip);
    }

    #[test]
    fn test_right_release_does_nothing() {
        let mut screen = screen();
        let mut sup = MockSupervisor::new();
        let ret = screen.button(ButtonMask::EVT_RELEASED | ButtonMask::RIGHT, 0, &mut sup);
        assert_eq!(ret, 0);
        assert!(!sup.exit_requested());
    }

    proptest! {
        #[test]
        fn prop_other_masks_never_exit(mask in any::<u32>(), counter in any::<u32>()) {
            prop_assume!(mask != 0x8000_0001);
            let mut screen = screen();
            let mut sup = MockSupervisor::new();
            prop_assert_eq!(screen.button(ButtonMask(mask), counter, &mut sup), 0);
            prop_assert!(!sup.exit_requested());
        }

        #[test]
        fn prop_left_release_exits_once(counter in any::<u32>()) {
            let mut screen = screen();
            let mut sup = MockSupervisor::new();
            let mask = ButtonMask::EVT_RELEASED | ButtonMask::LEFT;
            prop_assert_eq!(screen.button(mask, counter, &mut sup), 0);
            prop_assert_eq!(sup.exits(), &[0u32][..]);
        }

        #[test]
        fn prop_refresh_interval_floor(text in "[ -~]{0,50}") {
            let mut screen = screen();
            screen.activate(&text);
            let mut timer = UxTimer::default();
            let label = screen.elements()[4];
            prop_assert_eq!(screen.prepro(label, &mut timer), Some(label));
            prop_assert!(timer.interval_ms() >= 3000);
        }

        #[test]
        fn prop_other_elements_untouched(index in 0usize..4) {
            let screen = screen();
            let mut timer = UxTimer::default();
            let element = screen.elements()[index];
            prop_assert_eq!(screen.prepro(element, &mut timer), Some(element));
            prop_assert_eq!(timer.interval_ms(), 0);
        }
    }
}
