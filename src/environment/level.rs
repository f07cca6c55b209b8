use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, CollisionGroups, Group};

/// Collision group of everything the player can stand on.
pub const GROUND_GROUP: Group = Group::GROUP_2;

#[derive(Component)]
pub struct LevelGeometry;

/// Axis aligned (or tilted) static box: half extents, center, rotation.
struct Block {
    half_extents: Vec3,
    center: Vec3,
    rotation: Quat,
    color: Color,
}

impl Block {
    fn new(half_extents: Vec3, center: Vec3, color: Color) -> Self {
        Self {
            half_extents,
            center,
            rotation: Quat::IDENTITY,
            color,
        }
    }

    fn tilted(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}

fn blocks() -> Vec<Block> {
    let floor = Color::rgb(0.35, 0.45, 0.3);
    let stone = Color::rgb(0.55, 0.55, 0.6);

    let mut blocks = vec![
        Block::new(Vec3::new(40.0, 0.5, 40.0), Vec3::new(0.0, -0.5, 0.0), floor),
        // Ramp to test the ground-stick bias on slopes
        Block::new(Vec3::new(2.0, 0.25, 6.0), Vec3::new(-6.0, 1.2, -8.0), stone)
            .tilted(Quat::from_rotation_x(20.0_f32.to_radians())),
        Block::new(Vec3::new(4.0, 1.5, 4.0), Vec3::new(10.0, 1.5, -10.0), stone),
    ];

    // Stairs low enough for the autostep
    for step in 0..6 {
        let height = 0.2 * (step + 1) as f32;
        blocks.push(Block::new(
            Vec3::new(1.5, height / 2.0, 0.3),
            Vec3::new(6.0, height / 2.0, -4.0 - 0.6 * step as f32),
            stone,
        ));
    }

    blocks
}

pub fn spawn_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for block in blocks() {
        let size = block.half_extents * 2.0;
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(shape::Box::new(size.x, size.y, size.z).into()),
                material: materials.add(block.color.into()),
                transform: Transform::from_translation(block.center)
                    .with_rotation(block.rotation),
                ..default()
            },
            Collider::cuboid(
                block.half_extents.x,
                block.half_extents.y,
                block.half_extents.z,
            ),
            CollisionGroups::new(GROUND_GROUP, Group::ALL),
            LevelGeometry,
            Name::new("Level Block"),
        ));
    }
}
