//! World-space buttons: a rounded face over a border, a centred label, and
//! hand-rolled hit testing against the cursor.

use std::f32::consts::FRAC_PI_2;

use bevy::{
    prelude::*,
    render::{
        mesh::{Indices, PrimitiveTopology},
        render_asset::RenderAssetUsages,
    },
    text::TextBounds,
};

use super::{CursorWorld, PointerSet, MEDIUM_FONT};
use crate::screen::{ControllerSet, Screen, UiAction};

const CORNER_RADIUS: f32 = 15.0;
const BORDER: f32 = 3.0;
const PULSE_SPEED: f32 = 6.0;
const PULSE_MIN: f32 = 0.3;

#[derive(Component, Debug)]
pub struct QuizButton {
    pub action: UiAction,
    pub size: Vec2,
    pub hovered: bool,
    base: Color,
    hover: Color,
    border_material: Handle<ColorMaterial>,
    pulse: f32,
    pulse_dir: f32,
}

impl QuizButton {
    /// Whether `point` lies inside a button centred at `center`.
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let half = self.size / 2.0;
        (point.x - center.x).abs() <= half.x && (point.y - center.y).abs() <= half.y
    }
}

/// Label child of a button.
#[derive(Component)]
pub struct ButtonLabel;

pub struct ButtonSpec {
    pub label: String,
    pub action: UiAction,
    pub center: Vec3,
    pub size: Vec2,
    pub color: Color,
    pub hover_color: Color,
}

impl ButtonSpec {
    pub fn new(label: impl Into<String>, action: UiAction, center: Vec3, size: Vec2) -> Self {
        Self {
            label: label.into(),
            action,
            center,
            size,
            color: super::LIGHT_BLUE,
            hover_color: super::GREEN,
        }
    }

    pub fn colors(mut self, color: Color, hover_color: Color) -> Self {
        self.color = color;
        self.hover_color = hover_color;
        self
    }
}

pub struct ButtonPlugin;

impl Plugin for ButtonPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (hover_buttons, click_buttons.before(ControllerSet))
                .chain()
                .after(PointerSet),
        );
    }
}

const CORNER_SEGMENTS: usize = 8;

/// Outline of a rounded rectangle centred on the origin, counter-clockwise from the
/// top-right corner. Each corner contributes `CORNER_SEGMENTS + 1` points.
fn rounded_rect_outline(size: Vec2, radius: f32) -> Vec<Vec2> {
    let half = size / 2.0;
    let r = radius.min(half.x).min(half.y);
    let inset = half - Vec2::splat(r);

    [
        Vec2::new(inset.x, inset.y),
        Vec2::new(-inset.x, inset.y),
        Vec2::new(-inset.x, -inset.y),
        Vec2::new(inset.x, -inset.y),
    ]
    .into_iter()
    .enumerate()
    .flat_map(|(quadrant, corner)| {
        let start = quadrant as f32 * FRAC_PI_2;
        (0..=CORNER_SEGMENTS).map(move |step| {
            let angle = start + FRAC_PI_2 * step as f32 / CORNER_SEGMENTS as f32;
            corner + r * Vec2::from_angle(angle)
        })
    })
    .collect()
}

/// Triangle fan over [`rounded_rect_outline`], hub at the centre.
pub fn rounded_rect_mesh(size: Vec2, radius: f32) -> Mesh {
    let outline = rounded_rect_outline(size, radius);
    let rim = outline.len() as u32;

    let positions: Vec<[f32; 3]> = std::iter::once(Vec2::ZERO)
        .chain(outline.iter().copied())
        .map(|p| p.extend(0.0).to_array())
        .collect();
    let uvs: Vec<[f32; 2]> = std::iter::once(Vec2::ZERO)
        .chain(outline)
        .map(|p| (p / size + Vec2::splat(0.5)).to_array())
        .collect();
    let indices: Vec<u32> = (1..=rim)
        .flat_map(|i| [0, i, i % rim + 1])
        .collect();

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

/// Spawns a button scoped to `screen` and returns the button entity.
pub fn spawn_button(
    cmd: &mut Commands,
    meshes: &mut Assets<Mesh>,
    mats: &mut Assets<ColorMaterial>,
    spec: ButtonSpec,
    screen: Screen,
) -> Entity {
    let face = meshes.add(rounded_rect_mesh(spec.size, CORNER_RADIUS));
    let rim = meshes.add(rounded_rect_mesh(
        spec.size + Vec2::splat(BORDER * 2.0),
        CORNER_RADIUS + BORDER,
    ));
    // Same outline as the face; the shadow only differs by offset and material.
    let shade = face.clone();
    let border_material = mats.add(ColorMaterial::from(Color::WHITE));

    cmd.spawn((
        Mesh2d(face),
        MeshMaterial2d(mats.add(ColorMaterial::from(spec.color))),
        Transform::from_translation(spec.center),
        QuizButton {
            action: spec.action,
            size: spec.size,
            hovered: false,
            base: spec.color,
            hover: spec.hover_color,
            border_material: border_material.clone(),
            pulse: 1.0,
            pulse_dir: -1.0,
        },
        StateScoped(screen),
    ))
    .with_children(|parent| {
        parent.spawn((
            Mesh2d(rim),
            MeshMaterial2d(border_material),
            Transform::from_xyz(0.0, 0.0, -0.2),
        ));
        // Dropped shadow under the face for a bit of depth
        parent.spawn((
            Mesh2d(shade),
            MeshMaterial2d(mats.add(ColorMaterial::from(Color::srgba(0.0, 0.0, 0.0, 0.35)))),
            Transform::from_xyz(0.0, -5.0, -0.3),
        ));
        parent.spawn((
            Text2d::new(spec.label),
            TextFont {
                font_size: MEDIUM_FONT,
                ..default()
            },
            TextColor(Color::WHITE),
            TextLayout::new_with_justify(JustifyText::Center),
            TextBounds::new_horizontal(spec.size.x - 20.0),
            Transform::from_xyz(0.0, 0.0, 1.0),
            ButtonLabel,
        ));
    })
    .id()
}

fn hover_buttons(
    time: Res<Time>,
    cursor: Res<CursorWorld>,
    mut buttons: Query<(
        &mut QuizButton,
        &GlobalTransform,
        &MeshMaterial2d<ColorMaterial>,
    )>,
    mut mats: ResMut<Assets<ColorMaterial>>,
) {
    for (mut button, transform, face) in buttons.iter_mut() {
        let center = transform.translation().truncate();
        let hovered = cursor.0.is_some_and(|p| button.contains(center, p));

        if hovered != button.hovered {
            button.hovered = hovered;
            button.pulse = 1.0;
            button.pulse_dir = -1.0;
            if let Some(mat) = mats.get_mut(&face.0) {
                mat.color = if hovered { button.hover } else { button.base };
            }
            if !hovered {
                if let Some(mat) = mats.get_mut(&button.border_material) {
                    mat.color = Color::WHITE;
                }
            }
        }

        if !hovered {
            continue;
        }

        // Pulsing border while hovered
        button.pulse += PULSE_SPEED * time.delta_secs() * button.pulse_dir;
        if button.pulse > 1.0 {
            button.pulse = 1.0;
            button.pulse_dir = -1.0;
        } else if button.pulse < PULSE_MIN {
            button.pulse = PULSE_MIN;
            button.pulse_dir = 1.0;
        }
        let alpha = button.pulse;
        if let Some(mat) = mats.get_mut(&button.border_material) {
            mat.color = Color::srgba(1.0, 1.0, 1.0, alpha);
        }
    }
}

fn click_buttons(
    mouse: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorWorld>,
    buttons: Query<(&QuizButton, &GlobalTransform)>,
    mut actions: EventWriter<UiAction>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(point) = cursor.0 else {
        return;
    };

    let hit = buttons
        .iter()
        .find(|(button, transform)| button.contains(transform.translation().truncate(), point));

    if let Some((button, _)) = hit {
        debug!("Clicked {:?}", button.action);
        actions.send(button.action);
    }
}
