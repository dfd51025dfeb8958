use bevy::camera::ScalingMode;
use bevy::prelude::*;

/// Distance from the camera to the board; cell depths stay well inside it
const CAMERA_DISTANCE: f32 = 500.0;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .add_systems(Startup, setup_camera)
            .add_systems(PreUpdate, update_viewport);
    }
}

/// Logical window size; one world unit is one logical pixel
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 1280.0,
        }
    }
}

impl Viewport {
    /// Window coordinates (top-left origin, y down) to world XY (centre origin, y up)
    pub fn window_to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.width * 0.5, self.height * 0.5 - p.y)
    }

    /// Container size in whole pixels, as handed to the measure pass
    pub fn pixel_size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Orthographic camera looking down -Z at the XY plane.
/// Larger Z is nearer to the camera, so it draws on top.
fn setup_camera(mut commands: Commands, viewport: Res<Viewport>) {
    let projection = Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::FixedVertical {
            viewport_height: viewport.height,
        },
        near: 0.0,
        far: CAMERA_DISTANCE * 2.0,
        ..OrthographicProjection::default_3d()
    });
    commands.spawn((
        Camera3d::default(),
        projection,
        Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

/// Track the window size and keep the projection pixel-scaled
fn update_viewport(
    mut viewport: ResMut<Viewport>,
    windows: Query<&Window>,
    mut cameras: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let (width, height) = (window.width(), window.height());
    if (width - viewport.width).abs() < 0.5 && (height - viewport.height).abs() < 0.5 {
        return;
    }

    viewport.width = width;
    viewport.height = height;

    for mut projection in &mut cameras {
        if let Projection::Orthographic(ortho) = &mut *projection {
            ortho.scaling_mode = ScalingMode::FixedVertical {
                viewport_height: height,
            };
        }
    }

    debug!("Viewport resized to {}x{}", width, height);
}
