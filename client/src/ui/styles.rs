//! Shared UI styles

use bevy::prelude::*;

/// Translucent panel behind the menu
pub const PANEL_BACKGROUND: Color = Color::srgba(0.05, 0.07, 0.10, 0.8);

/// Button colors
pub const BUTTON_NORMAL: Color = Color::srgb(0.14, 0.18, 0.24);
pub const BUTTON_HOVERED: Color = Color::srgb(0.20, 0.27, 0.36);
pub const BUTTON_PRESSED: Color = Color::srgb(0.30, 0.45, 0.60);

pub const BUTTON_BORDER: Color = Color::srgb(0.35, 0.45, 0.55);

/// Text colors
pub const TEXT_COLOR: Color = Color::srgb(0.92, 0.94, 0.96);
pub const TEXT_MUTED: Color = Color::srgb(0.55, 0.60, 0.66);

/// Menu toggle button in the top-left corner
pub fn toggle_button_style() -> Node {
    Node {
        width: Val::Px(90.0),
        height: Val::Px(40.0),
        position_type: PositionType::Absolute,
        left: Val::Px(16.0),
        top: Val::Px(16.0),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        border: UiRect::all(Val::Px(2.0)),
        ..default()
    }
}

/// Square +/- stepper button
pub fn stepper_button_style() -> Node {
    Node {
        width: Val::Px(40.0),
        height: Val::Px(40.0),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        margin: UiRect::horizontal(Val::Px(6.0)),
        border: UiRect::all(Val::Px(2.0)),
        ..default()
    }
}

pub fn button_text_style() -> TextFont {
    TextFont {
        font_size: 20.0,
        ..default()
    }
}

pub fn label_text_style() -> TextFont {
    TextFont {
        font_size: 16.0,
        ..default()
    }
}
