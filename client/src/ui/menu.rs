//! In-game menu: a toggle button and the look sensitivity stepper.
//!
//! The menu never pauses the simulation. Pointer presses that land on any of
//! its buttons are ignored by the input router.

use bevy::prelude::*;
use shared::SandboxSettings;

use super::styles::*;

/// Sensitivity change per stepper press
pub const SENSITIVITY_STEP: f32 = 0.001;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_menu);
        app.add_systems(
            Update,
            (
                button_interactions,
                handle_menu_actions,
                update_sensitivity_label,
            )
                .chain(),
        );
    }
}

/// Marker for the collapsible panel
#[derive(Component)]
struct MenuPanel;

/// Marker for the text showing the current sensitivity
#[derive(Component)]
struct SensitivityLabel;

#[derive(Component, Clone, Copy, Debug)]
enum MenuButton {
    Toggle,
    SensitivityDown,
    SensitivityUp,
}

/// Sensitivity after `steps` stepper presses, rounded to the step size.
///
/// The stepper stops at zero. This is a limit of the buttons only: values set
/// through `SandboxSettings::apply_sensitivity_text` (for example a negative
/// sensitivity from the environment) are kept as-is until the stepper is used.
pub fn step_sensitivity(current: f32, steps: i32) -> f32 {
    let ticks = (current / SENSITIVITY_STEP).round() as i32 + steps;
    ticks.max(0) as f32 * SENSITIVITY_STEP
}

fn sensitivity_text(value: f32) -> String {
    format!("Look sensitivity: {value:.3}")
}

fn spawn_menu(mut commands: Commands, settings: Res<SandboxSettings>) {
    commands
        .spawn((
            Button,
            MenuButton::Toggle,
            toggle_button_style(),
            BackgroundColor(BUTTON_NORMAL),
            BorderColor::from(BUTTON_BORDER),
            BorderRadius::all(Val::Px(4.0)),
        ))
        .with_children(|btn| {
            btn.spawn((Text::new("MENU"), button_text_style(), TextColor(TEXT_COLOR)));
        });

    commands
        .spawn((
            MenuPanel,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(66.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(12.0)),
                row_gap: Val::Px(10.0),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
            BorderRadius::all(Val::Px(6.0)),
            Visibility::Hidden,
        ))
        .with_children(|panel| {
            panel.spawn((
                SensitivityLabel,
                Text::new(sensitivity_text(settings.look_sensitivity)),
                label_text_style(),
                TextColor(TEXT_COLOR),
            ));

            panel
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|row| {
                    spawn_stepper_button(row, "-", MenuButton::SensitivityDown);
                    spawn_stepper_button(row, "+", MenuButton::SensitivityUp);
                });

            panel.spawn((
                Text::new("Tap: place  Hold: remove  Drag: look"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(TEXT_MUTED),
            ));
        });
}

fn spawn_stepper_button(parent: &mut ChildSpawnerCommands<'_>, text: &str, action: MenuButton) {
    parent
        .spawn((
            Button,
            action,
            stepper_button_style(),
            BackgroundColor(BUTTON_NORMAL),
            BorderColor::from(BUTTON_BORDER),
            BorderRadius::all(Val::Px(4.0)),
        ))
        .with_children(|btn| {
            btn.spawn((Text::new(text), button_text_style(), TextColor(TEXT_COLOR)));
        });
}

fn button_interactions(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut bg_color) in buttons.iter_mut() {
        *bg_color = match interaction {
            Interaction::Pressed => BackgroundColor(BUTTON_PRESSED),
            Interaction::Hovered => BackgroundColor(BUTTON_HOVERED),
            Interaction::None => BackgroundColor(BUTTON_NORMAL),
        };
    }
}

fn handle_menu_actions(
    buttons: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    mut panels: Query<&mut Visibility, With<MenuPanel>>,
    mut settings: ResMut<SandboxSettings>,
) {
    for (interaction, action) in buttons.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match action {
            MenuButton::Toggle => {
                for mut visibility in panels.iter_mut() {
                    *visibility = match *visibility {
                        Visibility::Hidden => Visibility::Visible,
                        _ => Visibility::Hidden,
                    };
                }
            }
            MenuButton::SensitivityDown | MenuButton::SensitivityUp => {
                let steps = if matches!(action, MenuButton::SensitivityUp) { 1 } else { -1 };
                let value = step_sensitivity(settings.look_sensitivity, steps);
                if settings.apply_sensitivity_text(&format!("{value:.3}")) {
                    info!("Look sensitivity set to {:.3}", settings.look_sensitivity);
                }
            }
        }
    }
}

fn update_sensitivity_label(
    settings: Res<SandboxSettings>,
    mut labels: Query<&mut Text, With<SensitivityLabel>>,
) {
    if !settings.is_changed() {
        return;
    }
    for mut text in labels.iter_mut() {
        text.0 = sensitivity_text(settings.look_sensitivity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_sensitivity() {
        assert!((step_sensitivity(0.015, 1) - 0.016).abs() < 1e-6);
        assert!((step_sensitivity(0.015, -1) - 0.014).abs() < 1e-6);
        assert_eq!(step_sensitivity(0.001, -3), 0.0);
    }

    #[test]
    fn test_sensitivity_text() {
        assert_eq!(sensitivity_text(0.015), "Look sensitivity: 0.015");
    }
}
