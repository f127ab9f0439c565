//! Crosshair at the screen centre
//!
//! Removal always targets the block under this point.

use bevy::prelude::*;

/// Marker component for the crosshair UI
#[derive(Component)]
pub struct Crosshair;

const ARM_LENGTH: f32 = 10.0;
const ARM_THICKNESS: f32 = 2.0;
const ARM_GAP: f32 = 4.0;
const CROSSHAIR_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);

/// Spawn the crosshair UI
pub fn spawn_crosshair(mut commands: Commands) {
    // Full-screen root that centres its children and never takes input
    commands
        .spawn((
            Crosshair,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(ARM_THICKNESS),
                    height: Val::Px(ARM_THICKNESS),
                    ..default()
                },
                BackgroundColor(CROSSHAIR_COLOR),
            ));

            let offset = ARM_GAP + ARM_LENGTH / 2.0 + ARM_THICKNESS / 2.0;
            for (dx, dy) in [(0.0, -1.0), (0.0, 1.0), (-1.0, 0.0), (1.0, 0.0)] {
                let vertical = dx == 0.0;
                let (width, height) = if vertical {
                    (ARM_THICKNESS, ARM_LENGTH)
                } else {
                    (ARM_LENGTH, ARM_THICKNESS)
                };
                parent.spawn((
                    Node {
                        width: Val::Px(width),
                        height: Val::Px(height),
                        position_type: PositionType::Absolute,
                        margin: UiRect {
                            left: Val::Px(dx * offset * 2.0),
                            top: Val::Px(dy * offset * 2.0),
                            ..default()
                        },
                        ..default()
                    },
                    BackgroundColor(CROSSHAIR_COLOR),
                ));
            }
        });

    info!("Crosshair spawned");
}
