use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities.
/// Hidden entities (e.g. pocketed balls) are skipped. Stops at `max_instances`.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
    max_instances: usize,
) {
    buffer.clear();

    for entity in entities.filter(|e| e.visible).take(max_instances) {
        buffer.push(RenderInstance {
            model: entity.model as f32,
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            qx: entity.rotation.x,
            qy: entity.rotation.y,
            qz: entity.rotation.z,
            qw: entity.rotation.w,
        });
    }
}
