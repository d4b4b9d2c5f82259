use bevy::prelude::*;

pub mod atmosphere_render;
pub mod camera;
pub mod color_grade;
pub mod debris_render;
pub mod layers;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, camera::setup_camera);

        app.add_plugins((
            debris_render::DebrisRenderPlugin,
            color_grade::ColorGradePlugin,
            atmosphere_render::AtmosphereRenderPlugin,
        ));
    }
}
