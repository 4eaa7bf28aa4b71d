//! Shell-chrome sheet: window, panels, menus, buttons, inputs, lists,
//! scrollbars. Widest applicable selectors for the chrome only.

use super::{ColorPlan, push_rule};
use crate::theme::types::ThemeDefinition;

pub(crate) fn emit(definition: &ThemeDefinition) -> String {
    let plan = ColorPlan::new(definition);
    let mut out = String::with_capacity(4 * 1024);

    let bg = plan.background();
    let fg = plan.foreground();
    let border = plan.border();
    let selection_bg = plan.selection_background();
    let panel_bg = plan.panel_background();
    let panel_fg = plan.panel_foreground();
    let focus = plan.focus();

    out.push_str(&format!("/* {} - shell chrome */\n\n", definition.name));

    push_rule(
        &mut out,
        "QWidget",
        &[("background-color", &bg), ("color", &fg)],
    );
    push_rule(
        &mut out,
        "QMainWindow, QDialog",
        &[
            ("background-color", &bg),
            ("color", &fg),
            ("border", "none"),
        ],
    );

    push_rule(
        &mut out,
        "QMenuBar",
        &[
            ("background-color", &bg),
            ("color", &fg),
            ("border", "none"),
        ],
    );
    push_rule(
        &mut out,
        "QMenuBar::item:selected",
        &[("background-color", &selection_bg)],
    );
    push_rule(
        &mut out,
        "QMenu",
        &[
            ("background-color", &panel_bg),
            ("color", &fg),
            ("border", &format!("1px solid {border}")),
        ],
    );
    push_rule(
        &mut out,
        "QMenu::item:selected",
        &[("background-color", &plan.list_hover())],
    );
    push_rule(
        &mut out,
        "QMenu::separator",
        &[("height", "1px"), ("background-color", &border)],
    );

    push_rule(
        &mut out,
        "QDockWidget, QToolBar",
        &[
            ("background-color", &panel_bg),
            ("color", &panel_fg),
            ("border", "none"),
        ],
    );
    push_rule(
        &mut out,
        "QSplitter::handle",
        &[("background-color", &border)],
    );

    push_rule(
        &mut out,
        "QPushButton",
        &[
            ("background-color", &plan.button_background()),
            ("color", &plan.button_foreground()),
            ("border", "none"),
            ("padding", "6px 12px"),
            ("border-radius", "2px"),
        ],
    );
    push_rule(
        &mut out,
        "QPushButton:hover",
        &[("background-color", &plan.button_hover())],
    );
    push_rule(
        &mut out,
        "QPushButton:pressed",
        &[("background-color", &selection_bg)],
    );
    push_rule(
        &mut out,
        "QPushButton:focus",
        &[("outline", &format!("1px solid {focus}"))],
    );
    push_rule(
        &mut out,
        "QPushButton:disabled",
        &[("background-color", &panel_bg), ("color", &panel_fg)],
    );

    push_rule(
        &mut out,
        "QLineEdit, QTextEdit, QPlainTextEdit, QComboBox, QSpinBox",
        &[
            ("background-color", &plan.input_background()),
            ("color", &plan.input_foreground()),
            ("border", &format!("1px solid {border}")),
            ("border-radius", "2px"),
            ("selection-background-color", &selection_bg),
            ("selection-color", &plan.selection_foreground()),
        ],
    );
    push_rule(
        &mut out,
        "QLineEdit:focus, QTextEdit:focus, QPlainTextEdit:focus",
        &[("border-color", &focus)],
    );

    push_rule(
        &mut out,
        "QListView, QTreeView, QTableView",
        &[
            ("background-color", &bg),
            ("color", &fg),
            ("border", "none"),
            ("alternate-background-color", &panel_bg),
            ("selection-background-color", &plan.list_active_background()),
            ("selection-color", &plan.list_active_foreground()),
        ],
    );
    push_rule(
        &mut out,
        "QHeaderView::section",
        &[
            ("background-color", &panel_bg),
            ("color", &fg),
            ("border", "none"),
            ("border-bottom", &format!("1px solid {border}")),
        ],
    );

    push_rule(
        &mut out,
        "QScrollBar",
        &[("background-color", &bg), ("border", "none")],
    );
    push_rule(
        &mut out,
        "QScrollBar::handle",
        &[
            ("background-color", &plan.scrollbar()),
            ("border-radius", "6px"),
            ("min-height", "20px"),
            ("min-width", "20px"),
        ],
    );
    push_rule(
        &mut out,
        "QScrollBar::handle:hover",
        &[("background-color", &plan.scrollbar_hover())],
    );
    push_rule(
        &mut out,
        "QScrollBar::add-line, QScrollBar::sub-line",
        &[("background", "none"), ("border", "none")],
    );

    push_rule(
        &mut out,
        "QToolTip",
        &[
            ("background-color", &panel_bg),
            ("color", &fg),
            ("border", &format!("1px solid {border}")),
        ],
    );
    push_rule(
        &mut out,
        "QStatusBar",
        &[
            ("background-color", &plan.status_background()),
            ("color", &plan.status_foreground()),
            ("border", "none"),
        ],
    );

    out
}
