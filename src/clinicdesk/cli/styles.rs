use console::Style;
use once_cell::sync::Lazy;
use outstanding::{rgb_to_ansi256, Theme};

/// Named styles for the terminal templates' `style` filter.
pub static CLINIC_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add("header", Style::new().bold().underlined())
        .add("id", Style::new().yellow())
        .add("name", Style::new().bold())
        .add("specialty", Style::new().cyan())
        .add(
            "times",
            Style::new()
                .color256(rgb_to_ansi256((154, 154, 154)))
                .italic(),
        )
        .add("action", Style::new().green())
        .add("muted", Style::new().dim())
});
