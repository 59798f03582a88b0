use std::fmt::Write;

use crate::database::models::DesignSystemConfig;

/// Render a design config as CSS custom properties on `:root`, with the
/// dark-mode colors swapped in under `prefers-color-scheme: dark`
pub fn render_css_variables(config: &DesignSystemConfig) -> String {
    let colors = &config.colors;
    let dark = &config.dark_mode;
    let typography = &config.typography;
    let spacing = &config.spacing;
    let radius = &config.border_radius;

    let vars: [(&str, String); 22] = [
        ("color-primary", colors.primary.clone()),
        ("color-secondary", colors.secondary.clone()),
        ("color-accent", colors.accent.clone()),
        ("color-background", colors.background.clone()),
        ("color-text", colors.text.clone()),
        ("color-error", colors.error.clone()),
        ("color-success", colors.success.clone()),
        ("color-warning", colors.warning.clone()),
        ("color-info", colors.info.clone()),
        ("dark-background", dark.background.clone()),
        ("dark-text", dark.text.clone()),
        ("dark-primary", dark.primary.clone()),
        ("typography-font-family", typography.font_family.clone()),
        ("typography-heading-font", typography.heading_font.clone()),
        ("typography-base-size", typography.base_size.clone()),
        ("typography-scale-ratio", typography.scale_ratio.to_string()),
        ("spacing-base-unit", spacing.base_unit.clone()),
        ("spacing-scale-ratio", spacing.scale_ratio.to_string()),
        ("radius-small", radius.small.clone()),
        ("radius-medium", radius.medium.clone()),
        ("radius-large", radius.large.clone()),
        ("radius-round", radius.round.clone()),
    ];

    let mut css = String::from(":root {\n");
    for (name, value) in &vars {
        let _ = writeln!(css, "  --{}: {};", name, value);
    }
    css.push_str("}\n\n@media (prefers-color-scheme: dark) {\n  :root {\n");
    let _ = writeln!(css, "    --color-background: {};", dark.background);
    let _ = writeln!(css, "    --color-text: {};", dark.text);
    let _ = writeln!(css, "    --color-primary: {};", dark.primary);
    css.push_str("  }\n}\n");
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_section() {
        let css = render_css_variables(&DesignSystemConfig::default());
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --color-primary: #8B5CF6;\n"));
        assert!(css.contains("  --typography-font-family: Inter, sans-serif;\n"));
        assert!(css.contains("  --typography-scale-ratio: 1.25;\n"));
        assert!(css.contains("  --spacing-scale-ratio: 2;\n"));
        assert!(css.contains("  --radius-round: 50%;\n"));
    }

    #[test]
    fn dark_block_overrides_base_colors() {
        let css = render_css_variables(&DesignSystemConfig::default());
        let (_, dark) = css.split_once("@media (prefers-color-scheme: dark)").unwrap();
        assert!(dark.contains("--color-background: #1A1F2C;"));
        assert!(dark.contains("--color-primary: #9B87F5;"));
    }
}
