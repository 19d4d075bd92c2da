//! BAGL element descriptors
//!
//! An element is the unit the OS renderer draws: a fixed component record
//! (kind, geometry, colors, font) plus an optional text. Layout tables are
//! plain arrays of elements built from [`Component::EMPTY`].

use nanowallet_protocol::status::{ComponentHeader, DisplayBody, Status};

/// Element type as understood by the OS renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ElementKind {
    None = 0,
    Button = 1,
    Label = 2,
    Rectangle = 3,
    Line = 4,
    Icon = 5,
    Circle = 6,
    /// Single line label, may scroll
    LabelLine = 7,
}

impl ElementKind {
    /// Returns true for the kinds that carry text
    pub fn is_label(&self) -> bool {
        matches!(self, ElementKind::Label | ElementKind::LabelLine)
    }
}

/// Shape fill mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Fill {
    NoFill = 0,
    Fill = 1,
    Outline = 2,
}

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);
}

/// Built-in fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    OpenSansExtraBold11px,
    OpenSansLight16px,
    OpenSansRegular11px,
}

impl Font {
    /// Font id as used in the low bits of `font_id`
    pub const fn id(self) -> u16 {
        match self {
            Font::OpenSansExtraBold11px => 8,
            Font::OpenSansLight16px => 9,
            Font::OpenSansRegular11px => 10,
        }
    }
}

// Alignment flags, OR-ed into `font_id`
pub const ALIGN_LEFT: u16 = 0x0000;
pub const ALIGN_RIGHT: u16 = 0x4000;
pub const ALIGN_CENTER: u16 = 0x8000;
pub const ALIGN_TOP: u16 = 0x0000;
pub const ALIGN_MIDDLE: u16 = 0x2000;
pub const ALIGN_BOTTOM: u16 = 0x1000;

/// Scroll only once instead of bouncing forever (high bit of the delay)
pub const STROKE_FLAG_ONESHOT: u8 = 0x80;

/// OS-provided glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    Check,
    Cross,
    Left,
    Right,
    Up,
    Down,
    DashboardBadge,
}

impl Glyph {
    /// Glyph id as used in `icon_id`
    pub const fn id(self) -> u8 {
        match self {
            Glyph::Check => 6,
            Glyph::Cross => 7,
            Glyph::Left => 9,
            Glyph::Right => 10,
            Glyph::Up => 11,
            Glyph::Down => 12,
            Glyph::DashboardBadge => 15,
        }
    }

    /// Glyph size in pixels (width, height)
    pub const fn dimensions(self) -> (u16, u16) {
        match self {
            Glyph::Check => (8, 6),
            Glyph::Cross => (7, 7),
            Glyph::Left | Glyph::Right => (4, 7),
            Glyph::Up | Glyph::Down => (7, 4),
            Glyph::DashboardBadge => (14, 14),
        }
    }
}

/// How a label scrolls text wider than its frame
///
/// `delay` is the pause at each end in deciseconds, `speed` is in pixels
/// per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollMode {
    Disabled,
    /// Scroll to the end, then stop
    Once { delay: u8, speed: u8 },
    /// Bounce back and forth
    Infinite { delay: u8, speed: u8 },
}

impl ScrollMode {
    /// Pause at each end, in milliseconds
    pub fn delay_ms(&self) -> u32 {
        match self {
            ScrollMode::Disabled => 0,
            ScrollMode::Once { delay, .. } | ScrollMode::Infinite { delay, .. } => {
                *delay as u32 * 100
            }
        }
    }
}

const fn clamp_delay(delay: u8) -> u8 {
    if delay > !STROKE_FLAG_ONESHOT {
        !STROKE_FLAG_ONESHOT
    } else {
        delay
    }
}

/// Fixed component record of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Component {
    pub kind: ElementKind,
    /// Application-chosen id, used by preprocessors to find elements
    pub user_id: u8,
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
    /// Stroke width; for labels the scroll delay in deciseconds
    /// (low 7 bits) plus [`STROKE_FLAG_ONESHOT`]
    pub stroke: u8,
    pub radius: u8,
    pub fill: Fill,
    pub foreground: Color,
    pub background: Color,
    /// Font id OR-ed with alignment flags
    pub font_id: u16,
    /// Glyph id; for labels the scroll speed in pixels per second
    pub icon_id: u8,
}

impl Component {
    /// Base record for layout tables
    pub const EMPTY: Component = Component {
        kind: ElementKind::None,
        user_id: 0,
        x: 0,
        y: 0,
        width: 0,
        height: 0,
        stroke: 0,
        radius: 0,
        fill: Fill::NoFill,
        foreground: Color::BLACK,
        background: Color::BLACK,
        font_id: 0,
        icon_id: 0,
    };

    /// Scroll behavior encoded in the stroke and icon fields
    ///
    /// Only labels scroll, and a label with speed 0 never moves.
    pub fn scroll_mode(&self) -> ScrollMode {
        let speed = self.icon_id;
        if !self.kind.is_label() || speed == 0 {
            return ScrollMode::Disabled;
        }
        let delay = self.stroke & !STROKE_FLAG_ONESHOT;
        if self.stroke & STROKE_FLAG_ONESHOT != 0 {
            ScrollMode::Once { delay, speed }
        } else {
            ScrollMode::Infinite { delay, speed }
        }
    }

    /// Set the scroll behavior of a label
    ///
    /// Delays above 127 deciseconds are clamped.
    pub const fn with_scroll(self, mode: ScrollMode) -> Component {
        let (stroke, icon_id) = match mode {
            ScrollMode::Disabled => (0, 0),
            ScrollMode::Once { delay, speed } => (clamp_delay(delay) | STROKE_FLAG_ONESHOT, speed),
            ScrollMode::Infinite { delay, speed } => (clamp_delay(delay), speed),
        };
        Component {
            stroke,
            icon_id,
            ..self
        }
    }

    fn to_header(self) -> ComponentHeader {
        ComponentHeader {
            type_id: self.kind as u8,
            user_id: self.user_id,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            stroke: self.stroke,
            radius: self.radius,
            fill: self.fill as u8,
            foreground_color: self.foreground.0,
            background_color: self.background.0,
            font_id: self.font_id,
            icon_id: self.icon_id,
        }
    }
}

/// One drawable entry of a layout table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Element<'a> {
    pub component: Component,
    pub text: Option<&'a str>,
}

impl<'a> Element<'a> {
    /// Element without text
    pub const fn new(component: Component) -> Self {
        Self {
            component,
            text: None,
        }
    }

    /// Element with text
    pub const fn with_text(component: Component, text: &'a str) -> Self {
        Self {
            component,
            text: Some(text),
        }
    }

    /// Application id of this element
    pub fn user_id(&self) -> u8 {
        self.component.user_id
    }

    /// Screen display status drawing this element
    pub fn to_status(&self) -> Status<'a> {
        let body = match self.text {
            Some(text) if self.component.kind.is_label() => DisplayBody::Text(text),
            Some(text) if self.component.kind == ElementKind::Button => DisplayBody::Text(text),
            _ => DisplayBody::None,
        };
        Status::ScreenDisplay {
            header: self.component.to_header(),
            body,
        }
    }
}
