//! Title-bar sheet: the single derived frame color plus a contrasting
//! foreground, picked by the same luminance rule as classification.

use super::{ColorPlan, push_rule};
use crate::theme::color::{contrasting_foreground, derive_title_bar_color};
use crate::theme::types::ThemeDefinition;

pub(crate) fn emit(definition: &ThemeDefinition) -> String {
    let plan = ColorPlan::new(definition);
    let mut out = String::with_capacity(256);

    let derived = derive_title_bar_color(
        definition.background(),
        definition.color_or_default("button.background"),
        definition.kind,
    );
    let text = contrasting_foreground(derived);

    out.push_str(&format!("/* {} - title bar */\n\n", definition.name));

    push_rule(
        &mut out,
        "#titleBar",
        &[
            ("background-color", &derived.to_hex()),
            ("color", &text.to_hex()),
            ("border-bottom", &format!("1px solid {}", plan.border())),
        ],
    );

    out
}
