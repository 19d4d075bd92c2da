//! End-to-end runs of the address screen against a scripted OS

use nanowallet_core::{run, Duration, UxConfig};
use nanowallet_hal::mock::{MockPacket, MockSupervisor};
use nanowallet_hal::UxResponse;

const GENERAL_STATUS: u8 = 0x60;
const SCREEN_DISPLAY: u8 = 0x65;

/// Offset of the label text in a screen display packet
const TEXT_OFFSET: usize = 3 + 28;

fn displays(sent: &[MockPacket]) -> usize {
    sent.iter().filter(|p| p[0] == SCREEN_DISPLAY).count()
}

/// Script the round trips needed to draw the five elements
fn draw_screen(sup: &mut MockSupervisor) {
    for _ in 0..4 {
        sup.push_display_processed();
    }
}

#[test]
fn test_screen_drawn_in_order() {
    let mut sup = MockSupervisor::new();
    draw_screen(&mut sup);

    run(&mut sup, &UxConfig::default()).unwrap();

    let sent = sup.sent();
    assert_eq!(sent.len(), 5);
    assert!(sent.iter().all(|p| p[0] == SCREEN_DISPLAY));

    // Element kinds: rectangle, icon, icon, labelline, labelline
    let kinds: Vec<u8> = sent.iter().map(|p| p[3]).collect();
    assert_eq!(kinds, [3, 5, 5, 7, 7]);
    assert_eq!(&sent[3][TEXT_OFFSET..], b"Hello!");
    assert_eq!(sent[4][4], 2);
    assert_eq!(&sent[4][TEXT_OFFSET..], b"WORLD!");
    assert!(!sup.exit_requested());
}

#[test]
fn test_left_release_exits() {
    let mut sup = MockSupervisor::new();
    draw_screen(&mut sup);
    sup.push_button(0b01);
    sup.push_button(0b00);
    sup.push_ticker();

    run(&mut sup, &UxConfig::default()).unwrap();

    assert_eq!(sup.exits(), &[0]);
    // The ticker after the exit is never received
    assert_eq!(sup.pending(), 1);
    // Press turn acknowledged, release turn cut short by the exit
    assert_eq!(sup.sent().len(), 6);
    assert_eq!(sup.sent()[5][0], GENERAL_STATUS);
}

#[test]
fn test_right_release_does_nothing() {
    let mut sup = MockSupervisor::new();
    draw_screen(&mut sup);
    sup.push_button(0b10);
    sup.push_button(0b00);

    run(&mut sup, &UxConfig::default()).unwrap();

    assert!(!sup.exit_requested());
    assert_eq!(sup.pending(), 0);
    assert_eq!(sup.sent().len(), 7);
    assert_eq!(displays(sup.sent()), 5);
}

#[test]
fn test_both_buttons_release_does_not_exit() {
    let mut sup = MockSupervisor::new();
    draw_screen(&mut sup);
    sup.push_button(0b01);
    sup.push_button(0b11);
    sup.push_button(0b00);

    run(&mut sup, &UxConfig::default()).unwrap();

    assert!(!sup.exit_requested());
}

#[test]
fn test_long_left_hold_does_not_exit() {
    let mut sup = MockSupervisor::new();
    draw_screen(&mut sup);
    for _ in 0..12 {
        sup.push_button(0b01);
    }
    sup.push_button(0b00);

    run(&mut sup, &UxConfig::default()).unwrap();

    // Release after the fast threshold carries no release flag
    assert!(!sup.exit_requested());
}

#[test]
fn test_label_refreshed_after_three_seconds() {
    let mut sup = MockSupervisor::new();
    draw_screen(&mut sup);
    for _ in 0..29 {
        sup.push_ticker();
    }

    run(&mut sup, &UxConfig::default()).unwrap();
    assert_eq!(displays(sup.sent()), 5);

    let mut sup = MockSupervisor::new();
    draw_screen(&mut sup);
    for _ in 0..30 {
        sup.push_ticker();
    }

    run(&mut sup, &UxConfig::default()).unwrap();
    assert_eq!(displays(sup.sent()), 6);
    let last = sup.sent().last().unwrap();
    assert_eq!(last[0], SCREEN_DISPLAY);
    assert_eq!(last[3], 3);
}

#[test]
fn test_provisioned_config_changes_refresh() {
    let custom = UxConfig {
        min_refresh: Duration::from_millis(500),
        refresh_margin: Duration::ZERO,
        ..UxConfig::default()
    };
    let mut buf = [0u8; 128];
    let len = custom.to_bytes(&mut buf).unwrap();
    let config = UxConfig::load_or_default(Some(&buf[..len]));
    assert_eq!(config, custom);

    let mut sup = MockSupervisor::new();
    draw_screen(&mut sup);
    for _ in 0..5 {
        sup.push_ticker();
    }

    run(&mut sup, &config).unwrap();
    assert_eq!(displays(sup.sent()), 6);
}

#[test]
fn test_idle_label_from_config() {
    let mut config = UxConfig::default();
    config.idle_label.clear();
    config.idle_label.push_str("0xBEEF").unwrap();

    let mut sup = MockSupervisor::new();
    draw_screen(&mut sup);

    run(&mut sup, &config).unwrap();
    assert_eq!(&sup.sent()[4][TEXT_OFFSET..], b"0xBEEF");
}

#[test]
fn test_os_ignore_defers_drawing() {
    let mut sup = MockSupervisor::new().with_ux_reply(UxResponse::Ignore);
    draw_screen(&mut sup);
    sup.push_button(0b01);
    sup.push_button(0b00);

    run(&mut sup, &UxConfig::default()).unwrap();

    // Only the start turn draws; every other turn gets a general status
    assert_eq!(displays(sup.sent()), 1);
    assert_eq!(sup.sent().len(), 7);
    assert!(!sup.exit_requested());
}

#[test]
fn test_os_redraw_restarts_layout() {
    let mut sup = MockSupervisor::new();
    // Wake up and the first round trip proceed, the second asks for a redraw
    sup.push_ux_reply(UxResponse::Ok);
    sup.push_ux_reply(UxResponse::Ok);
    sup.push_ux_reply(UxResponse::Redraw);
    for _ in 0..6 {
        sup.push_display_processed();
    }

    run(&mut sup, &UxConfig::default()).unwrap();

    let kinds: Vec<u8> = sup.sent().iter().map(|p| p[3]).collect();
    assert_eq!(kinds, [3, 5, 3, 5, 5, 7, 7]);
}
