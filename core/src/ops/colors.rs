//! Debug coloring of materials.

use crate::material::{MatParamValue, DIFFUSE};
use crate::model::Model;

/// Give every material with a `Diffuse` color a random light tint.
///
/// Red, green and blue are drawn uniformly from `[0.5, 1.0]`; alpha is
/// kept. Materials whose `Diffuse` parameter is not a color are skipped.
/// Returns the number of materials changed.
pub fn randomize_material_colors<R: rand::Rng>(model: &mut Model, rng: &mut R) -> usize {
    let mut changed = 0;
    for material in model.materials_mut() {
        if let Some(MatParamValue::Color(rgba)) = material.param_mut(DIFFUSE) {
            for channel in rgba.iter_mut().take(3) {
                *channel = rng.gen_range(0.5..=1.0);
            }
            changed += 1;
        }
    }
    log::debug!("Randomized {} material colors of {}", changed, model.name());
    changed
}
