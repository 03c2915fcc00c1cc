use glam::Vec3;
use orrery_scene::Scene;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads scene state and a view, then produces output. It never
/// mutates the scene — the advance loop owns all mutation.
pub trait SceneRenderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene state and view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Text renderer: a human-readable snapshot of the scene.
///
/// Keeps the trait honest without a GPU and gives tests something to read.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl SceneRenderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene (tick={}, time={:.3}s) ===\n",
            scene.tick(),
            scene.time()
        ));
        out.push_str(&format!("Bodies: {}\n", scene.body_count()));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        for (id, body) in scene.bodies() {
            let p = body.transform.position;
            let passes = match (scene.passes().in_base(*id), scene.passes().in_bloom(*id)) {
                (true, true) => "base+bloom",
                (true, false) => "base",
                (false, true) => "bloom",
                (false, false) => "untagged",
            };
            out.push_str(&format!(
                "  [{:.8}] pos=({:.2}, {:.2}, {:.2}) passes={}\n",
                &id.0.to_string()[..8],
                p.x,
                p.y,
                p.z,
                passes
            ));
        }

        out
    }
}
