//! The sixteen balls: identity, group, rack coordinates and their bodies.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use pool_engine::{BodyDesc, ColliderDesc, ColliderMaterial, Entity, EntityId, PhysicsAdapter, Scene};

use crate::error::RegistryError;
use crate::table::LENGTH;

/// Regulation ball diameter is 57.15 mm.
pub const BALL_RADIUS: f32 = 0.05715 / 2.0;
pub const BALL_MASS: f32 = 0.17;
pub const BALL_COUNT: usize = 16;
pub const CUE_ID: u8 = 0;
pub const EIGHT_BALL: u8 = 8;

const DAMPING: f32 = 0.5;

/// Rack fill order, back row first. The last entry is the apex.
const RACK_ORDER: [u8; 15] = [4, 3, 14, 2, 15, 13, 7, 12, 5, 6, 8, 9, 10, 11, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallKind {
    Cue,
    Numbered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Unassigned,
    Solid,
    Striped,
}

impl Group {
    /// Solids are 1-7, stripes 9-15. The cue and the 8 belong to nobody.
    pub fn of_ball(id: u8) -> Group {
        match id {
            1..=7 => Group::Solid,
            9..=15 => Group::Striped,
            _ => Group::Unassigned,
        }
    }

    pub fn complement(self) -> Group {
        match self {
            Group::Solid => Group::Striped,
            Group::Striped => Group::Solid,
            Group::Unassigned => Group::Unassigned,
        }
    }

    pub fn code(self) -> f32 {
        match self {
            Group::Unassigned => 0.0,
            Group::Solid => 1.0,
            Group::Striped => 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: u8,
    pub kind: BallKind,
    pub entity: EntityId,
    pub start: Vec3,
    pub pocketed: bool,
}

impl Ball {
    pub fn group(&self) -> Group {
        Group::of_ball(self.id)
    }

    pub fn is_cue(&self) -> bool {
        self.kind == BallKind::Cue
    }
}

/// Where the balls start. The rack is a triangle whose back row sits at
/// `foot_x` and whose apex points toward the cue ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RackLayout {
    pub cue_spot: Vec3,
    pub foot_x: f32,
    pub row_spacing: f32,
    /// Center-to-center distance within a row.
    pub ball_spacing: f32,
    pub radius: f32,
}

impl Default for RackLayout {
    fn default() -> Self {
        Self {
            cue_spot: Vec3::new(-LENGTH / 4.0, BALL_RADIUS, 0.0),
            foot_x: LENGTH / 4.0,
            row_spacing: 1.74 * BALL_RADIUS,
            ball_spacing: 2.0 * (BALL_RADIUS + 0.0005),
            radius: BALL_RADIUS,
        }
    }
}

impl RackLayout {
    /// Start coordinate of every ball, indexed by ball id.
    pub fn positions(&self) -> [Vec3; BALL_COUNT] {
        let mut out = [Vec3::ZERO; BALL_COUNT];
        out[CUE_ID as usize] = self.cue_spot;

        let mut order = RACK_ORDER.iter();
        for (row, count) in (1..=5).rev().enumerate() {
            let x = self.foot_x - row as f32 * self.row_spacing;
            let first_z = (count - 1) as f32 * self.ball_spacing / 2.0;
            for i in 0..count {
                if let Some(&id) = order.next() {
                    let z = first_z - i as f32 * self.ball_spacing;
                    out[id as usize] = Vec3::new(x, self.radius, z);
                }
            }
        }
        out
    }
}

fn ball_desc(start: Vec3) -> BodyDesc {
    BodyDesc::dynamic(ColliderDesc::Ball { radius: BALL_RADIUS })
        .with_position(start)
        .with_linear_damping(DAMPING)
        .with_angular_damping(DAMPING)
        .with_ccd(true)
}

/// Ball-ball contact: restitution 0.8, friction 0.3, density giving 170 g.
pub fn ball_material() -> ColliderMaterial {
    let volume = ColliderDesc::Ball { radius: BALL_RADIUS }.volume();
    ColliderMaterial::new(0.8, 0.3, BALL_MASS / volume)
}

/// All balls of one game, indexed by id.
#[derive(Debug, Clone)]
pub struct BallRegistry {
    balls: Vec<Ball>,
}

impl BallRegistry {
    /// Spawn the cue ball and the racked numbered balls. `entities[id]` becomes
    /// the entity of ball `id`.
    pub fn create_rack(
        layout: &RackLayout,
        entities: [EntityId; BALL_COUNT],
        physics: &mut impl PhysicsAdapter,
        scene: &mut Scene,
    ) -> Self {
        let starts = layout.positions();
        let material = ball_material();
        let mut balls = Vec::with_capacity(BALL_COUNT);

        for (id, (&entity, &start)) in entities.iter().zip(starts.iter()).enumerate() {
            let id = id as u8;
            let kind = if id == CUE_ID { BallKind::Cue } else { BallKind::Numbered };
            let tag = match kind {
                BallKind::Cue => "cue".to_string(),
                BallKind::Numbered => format!("ball_{}", id),
            };
            physics.add_body(entity, &ball_desc(start), material);
            scene.spawn(
                Entity::new(entity)
                    .with_tag(tag)
                    .with_model(id as u32)
                    .with_pos(start),
            );
            balls.push(Ball {
                id,
                kind,
                entity,
                start,
                pocketed: false,
            });
        }

        log::info!("Racked {} balls", balls.len());
        Self { balls }
    }

    /// Put every ball back on its spot, at rest and visible. Bodies are
    /// recreated so pocketed balls rejoin the world.
    pub fn reset(&mut self, physics: &mut impl PhysicsAdapter, scene: &mut Scene) {
        let material = ball_material();
        for ball in &mut self.balls {
            physics.remove_body(ball.entity);
            physics.add_body(ball.entity, &ball_desc(ball.start), material);
            ball.pocketed = false;
            if let Some(entity) = scene.get_mut(ball.entity) {
                entity.pos = ball.start;
                entity.rotation = glam::Quat::IDENTITY;
                entity.visible = true;
            }
        }
        log::debug!("Balls reset to rack");
    }

    pub fn get_ball(&self, id: u8) -> Result<&Ball, RegistryError> {
        self.balls.get(id as usize).ok_or(RegistryError::NotFound(id))
    }

    pub fn get_ball_mut(&mut self, id: u8) -> Result<&mut Ball, RegistryError> {
        self.balls.get_mut(id as usize).ok_or(RegistryError::NotFound(id))
    }

    pub fn cue(&self) -> &Ball {
        &self.balls[CUE_ID as usize]
    }

    pub fn by_entity(&self, entity: EntityId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.entity == entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ball> {
        self.balls.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }
}
