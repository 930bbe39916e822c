use strata_geom::{Vec3, inverse_lerp, lerp};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolMode {
    /// Raise terrain: lowers density so more samples fall below the iso level.
    Add,
    /// Dig: raises density.
    Subtract,
}

/// Edit strength policy for an interactive tool: far hits dig faster than near ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerraformTool {
    pub radius: f32,
    pub speed_near: f32,
    pub speed_far: f32,
    pub dst_near: f32,
    pub dst_far: f32,
}

impl Default for TerraformTool {
    fn default() -> Self {
        Self {
            radius: 5.0,
            speed_near: 0.1,
            speed_far: 0.25,
            dst_near: 10.0,
            dst_far: 60.0,
        }
    }
}

impl TerraformTool {
    /// Signed edit weight for a hit `distance` away from the viewer.
    pub fn weight(&self, mode: ToolMode, distance: f32) -> f32 {
        let t = inverse_lerp(self.dst_near, self.dst_far, distance);
        let speed = lerp(self.speed_near, self.speed_far, t);
        match mode {
            ToolMode::Add => -speed,
            ToolMode::Subtract => speed,
        }
    }

    /// `(point, weight, radius)` for a hit at `point` seen from `eye`.
    pub fn stroke(&self, mode: ToolMode, eye: Vec3, point: Vec3) -> (Vec3, f32, f32) {
        let distance = (point - eye).length();
        (point, self.weight(mode, distance), self.radius)
    }
}
