use bevy::prelude::*;
use bevy::ui::BoxShadow;

use estate::palette::GlowClass;

/// Glow animation tick interval. Runs on its own timer rather than with the
/// render loop.
pub const GLOW_TICK_MS: u64 = 33;

/// Animate label shadows from the shared glow style table. Every label of a
/// class is in phase, since the table is global constant data.
pub fn animate_label_glow(
    time: Res<Time<Real>>,
    mut labels: Query<(&GlowClass, &mut BoxShadow)>,
) {
    let elapsed = time.elapsed_secs();
    for (class, mut shadow) in &mut labels {
        let blur = Val::Px(class.style().blur_at(elapsed));
        if shadow.blur_radius != blur {
            shadow.blur_radius = blur;
        }
    }
}
