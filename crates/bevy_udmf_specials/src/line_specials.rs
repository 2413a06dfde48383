//! Translation of line specials into derived rendering properties.
//!
//! Currently only TranslucentLine (208) is implemented. Unrecognized
//! special codes are silently ignored so maps authored for unimplemented
//! features keep loading.

use bevy::prelude::*;
use bevy_udmf_map::map::{MapData, RenderStyle};

/// TranslucentLine line special.
pub const TRANSLUCENT_LINE: i32 = 208;

/// Process one line's special, writing derived properties onto the target
/// lines. Re-running with identical inputs yields identical outputs.
pub fn process_line_special(map: &mut MapData, line_index: usize) {
    let line = &map.lines[line_index];
    let special = line.special;
    if special == 0 {
        return;
    }
    let args = line.args;

    if special == TRANSLUCENT_LINE {
        // arg0 selects the target set: 0 means this line only, anything
        // else targets every line with that id.
        let targets = if args[0] > 0 {
            map.lines_with_id(args[0])
        } else {
            vec![line_index]
        };

        // No clamping: out-of-range arg1 produces alpha beyond 1.0.
        let alpha = f64::from(args[1]) / 255.0;
        let style = if args[2] == 0 {
            RenderStyle::Translucent
        } else {
            RenderStyle::Add
        };

        for target in targets {
            let line = &mut map.lines[target];
            line.alpha = alpha;
            line.render_style = style;
            debug!(
                "Line {target} translucent: ({}) {alpha:.2}, {}",
                args[1],
                style.as_udmf()
            );
        }
    }
}
