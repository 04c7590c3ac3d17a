//! # View Layer
//!
//! Pure renderers: plain data in, HTML fragment out. Nothing here fetches,
//! reads the session store, or keeps state between calls, so rendering can be
//! tested without a network layer.
//!
//! Fragments are produced from minijinja templates kept as standalone files
//! next to this module. Auto-escaping is on for every template (they all end
//! in `.html`), so record text never turns into markup.
//!
//! - [`card`]: doctor cards and the card container of the admin dashboard
//! - [`row`]: patient rows and the appointment table of the doctor dashboard

use crate::error::Result;
use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;

pub mod card;
pub mod row;

pub const DOCTOR_CARD_TEMPLATE: &str = "doctor_card.html";
pub const DOCTOR_LIST_TEMPLATE: &str = "doctor_list.html";
pub const APPOINTMENT_ROWS_TEMPLATE: &str = "appointment_rows.html";

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for (name, source) in [
        (DOCTOR_CARD_TEMPLATE, include_str!("templates/doctor_card.html")),
        (DOCTOR_LIST_TEMPLATE, include_str!("templates/doctor_list.html")),
        (
            APPOINTMENT_ROWS_TEMPLATE,
            include_str!("templates/appointment_rows.html"),
        ),
    ] {
        // Bundled templates are checked by the tests below.
        if let Err(e) = env.add_template(name, source) {
            tracing::error!(template = name, error = %e, "invalid bundled template");
        }
    }
    env
});

pub(crate) fn render<S: Serialize>(template: &str, ctx: S) -> Result<String> {
    let tmpl = TEMPLATES.get_template(template)?;
    Ok(tmpl.render(ctx)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_templates_parse() {
        for name in [
            DOCTOR_CARD_TEMPLATE,
            DOCTOR_LIST_TEMPLATE,
            APPOINTMENT_ROWS_TEMPLATE,
        ] {
            assert!(TEMPLATES.get_template(name).is_ok(), "{}", name);
        }
    }
}
