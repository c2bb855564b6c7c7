//! Backend-independent body descriptions.
//!
//! These are plain data; `core::physics` turns them into Rapier bodies, and
//! test doubles can consume them without pulling in a physics backend.

use glam::Vec3;

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_x: f32, half_y: f32, half_z: f32 },
}

impl ColliderDesc {
    /// Volume of the shape, used to turn a target mass into a density.
    pub fn volume(&self) -> f32 {
        match *self {
            ColliderDesc::Ball { radius } => {
                4.0 / 3.0 * std::f32::consts::PI * radius * radius * radius
            }
            ColliderDesc::Cuboid { half_x, half_y, half_z } => 8.0 * half_x * half_y * half_z,
        }
    }
}

/// How two touching colliders merge a contact coefficient.
/// When the rules differ, the higher-priority one wins (Max > Multiply > Min > Average).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombineRule {
    #[default]
    Average,
    Min,
    Multiply,
    Max,
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
    pub restitution_combine: CombineRule,
    pub friction_combine: CombineRule,
}

impl ColliderMaterial {
    pub fn new(restitution: f32, friction: f32, density: f32) -> Self {
        Self {
            restitution,
            friction,
            density,
            ..Self::default()
        }
    }

    pub fn with_restitution_combine(mut self, rule: CombineRule) -> Self {
        self.restitution_combine = rule;
        self
    }

    pub fn with_friction_combine(mut self, rule: CombineRule) -> Self {
        self.friction_combine = rule;
        self
    }
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
            density: 1.0,
            restitution_combine: CombineRule::Average,
            friction_combine: CombineRule::Average,
        }
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec3,
    pub velocity: Vec3,
    pub gravity_scale: f32,
    pub ccd: bool,
    pub collider: ColliderDesc,
    /// Extra colliders attached to the same body, offset from its origin.
    pub compound: Vec<(ColliderDesc, Vec3)>,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            gravity_scale: 1.0,
            ccd: false,
            collider,
            compound: Vec::new(),
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            gravity_scale: 0.0,
            ..Self::dynamic(collider)
        }
    }

    pub fn with_position(mut self, pos: Vec3) -> Self {
        self.position = pos;
        self
    }

    pub fn with_velocity(mut self, vel: Vec3) -> Self {
        self.velocity = vel;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    /// Attach another collider at `offset` from the body origin.
    pub fn with_extra_collider(mut self, collider: ColliderDesc, offset: Vec3) -> Self {
        self.compound.push((collider, offset));
        self
    }

    /// Set the linear damping (velocity decay). Higher values slow the body faster.
    /// Useful for simulating rolling resistance on table felt.
    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Set the angular damping (rotation decay).
    pub fn with_angular_damping(mut self, damping: f32) -> Self {
        self.angular_damping = damping;
        self
    }
}
