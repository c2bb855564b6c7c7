//! Table geometry: a felt slab open at the pockets and six cushion segments.
//!
//! Coordinates are meters, Y up, the table centered on the origin with its
//! long side along X. The playing surface is the plane `y = 0`; a ball that
//! drops below it has left through a pocket.

use glam::Vec3;
use pool_engine::{BodyDesc, ColliderDesc, ColliderMaterial, CombineRule, EngineContext, Entity, EntityId};

/// Playing surface length (9 ft table).
pub const LENGTH: f32 = 2.7432;
/// Playing surface width.
pub const WIDTH: f32 = 1.3716;

/// Render model index for the table mesh. Balls use their id as model.
pub const TABLE_MODEL: u32 = 16;

const FELT_HALF_THICKNESS: f32 = 0.01;
/// Felt strips at the short ends stop short of the corners.
const FELT_END_STRIP: f32 = 0.04;
const FELT_CORNER_CUT: f32 = 0.05;

const CUSHION_HALF_HEIGHT: f32 = 0.04;
const CUSHION_CENTER_Y: f32 = 0.02;
const LONG_CUSHION_HALF_THICKNESS: f32 = 0.025;
const SHORT_CUSHION_HALF_THICKNESS: f32 = 0.04;
/// Cushion-free length at each corner, along either rail.
const CORNER_GAP: f32 = 0.08;
/// Opening of each side pocket, centered on x = 0.
const SIDE_GAP: f32 = 0.144;

/// Felt: low bounce wins against the ball's own restitution.
pub fn felt_material() -> ColliderMaterial {
    ColliderMaterial::new(0.1, 0.2, 1.0).with_restitution_combine(CombineRule::Min)
}

/// Cushion: lively rebound, averaged friction against the ball.
pub fn cushion_material() -> ColliderMaterial {
    ColliderMaterial::new(0.9, 0.2, 1.0).with_restitution_combine(CombineRule::Max)
}

/// Felt slab as one fixed compound body whose top face is `y = 0`.
pub fn felt_desc() -> BodyDesc {
    let main_half_x = LENGTH / 2.0 - FELT_END_STRIP;
    let strip = ColliderDesc::Cuboid {
        half_x: FELT_END_STRIP / 2.0,
        half_y: FELT_HALF_THICKNESS,
        half_z: WIDTH / 2.0 - FELT_CORNER_CUT,
    };
    let strip_x = LENGTH / 2.0 - FELT_END_STRIP / 2.0;

    BodyDesc::fixed(ColliderDesc::Cuboid {
        half_x: main_half_x,
        half_y: FELT_HALF_THICKNESS,
        half_z: WIDTH / 2.0,
    })
    .with_position(Vec3::new(0.0, -FELT_HALF_THICKNESS, 0.0))
    .with_extra_collider(strip, Vec3::new(strip_x, 0.0, 0.0))
    .with_extra_collider(strip, Vec3::new(-strip_x, 0.0, 0.0))
}

/// The six cushion segments: two per long rail (split by the side pocket)
/// and one per short rail.
pub fn cushion_descs() -> Vec<BodyDesc> {
    let mut descs = Vec::with_capacity(6);

    let seg_start = SIDE_GAP / 2.0;
    let seg_end = LENGTH / 2.0 - CORNER_GAP;
    let seg_half = (seg_end - seg_start) / 2.0;
    let seg_center = seg_start + seg_half;
    let rail_z = WIDTH / 2.0 + LONG_CUSHION_HALF_THICKNESS;
    for z in [rail_z, -rail_z] {
        for x in [seg_center, -seg_center] {
            descs.push(
                BodyDesc::fixed(ColliderDesc::Cuboid {
                    half_x: seg_half,
                    half_y: CUSHION_HALF_HEIGHT,
                    half_z: LONG_CUSHION_HALF_THICKNESS,
                })
                .with_position(Vec3::new(x, CUSHION_CENTER_Y, z)),
            );
        }
    }

    let end_x = LENGTH / 2.0 + SHORT_CUSHION_HALF_THICKNESS;
    for x in [end_x, -end_x] {
        descs.push(
            BodyDesc::fixed(ColliderDesc::Cuboid {
                half_x: SHORT_CUSHION_HALF_THICKNESS,
                half_y: CUSHION_HALF_HEIGHT,
                half_z: WIDTH / 2.0 - CORNER_GAP,
            })
            .with_position(Vec3::new(x, CUSHION_CENTER_Y, 0.0)),
        );
    }

    descs
}

/// Spawn felt and cushions. Returns the felt entity, which carries the
/// table model; cushions are collision-only and stay hidden.
pub fn build_table(ctx: &mut EngineContext) -> EntityId {
    let felt_id = ctx.next_id();
    let felt = Entity::new(felt_id).with_tag("table").with_model(TABLE_MODEL);
    ctx.spawn_with_body(felt, &felt_desc(), felt_material());

    let material = cushion_material();
    for desc in cushion_descs() {
        let id = ctx.next_id();
        let cushion = Entity::new(id).with_tag("cushion").with_visible(false);
        ctx.spawn_with_body(cushion, &desc, material);
    }

    log::info!("Table built ({}m x {}m, 6 cushions)", LENGTH, WIDTH);
    felt_id
}
