//! Document-surface sheet.
//!
//! Container-level rules only: surface backgrounds, inherited text
//! color, selection and scrollbars. No selector in this sheet may match
//! leaf text-content elements; embedded rich content keeps its own
//! styling and only inherits the surface colors.

use super::{ColorPlan, push_rule};
use crate::theme::types::ThemeDefinition;

pub(crate) fn emit(definition: &ThemeDefinition) -> String {
    let plan = ColorPlan::new(definition);
    let mut out = String::with_capacity(1024);

    let bg = plan.background();
    let fg = plan.foreground();

    out.push_str(&format!("/* {} - document surface */\n\n", definition.name));

    push_rule(
        &mut out,
        "html",
        &[("background-color", &bg), ("color", &fg)],
    );
    push_rule(
        &mut out,
        "body",
        &[
            ("background-color", &bg),
            ("color", &fg),
            ("caret-color", &plan.cursor()),
        ],
    );

    push_rule(
        &mut out,
        ".card",
        &[("background-color", &bg), ("color", &fg)],
    );
    push_rule(
        &mut out,
        ".card.night_mode",
        &[("background-color", &bg), ("color", &fg)],
    );

    push_rule(
        &mut out,
        "::selection",
        &[
            ("background-color", &plan.selection_background()),
            ("color", &plan.selection_foreground()),
        ],
    );

    push_rule(
        &mut out,
        "::-webkit-scrollbar",
        &[
            ("background-color", &bg),
            ("width", "12px"),
            ("height", "12px"),
        ],
    );
    push_rule(
        &mut out,
        "::-webkit-scrollbar-thumb",
        &[
            ("background-color", &plan.scrollbar()),
            ("border-radius", "6px"),
        ],
    );
    push_rule(
        &mut out,
        "::-webkit-scrollbar-thumb:hover",
        &[("background-color", &plan.scrollbar_hover())],
    );

    out
}
