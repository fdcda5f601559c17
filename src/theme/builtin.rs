use super::{ResolvedTheme, Theme, ThemeColor, ThemeColors, ThemeVariant};

pub fn all_themes() -> Vec<Theme> {
    vec![default_dark(), default_light(), monokai(), dracula()]
}

pub fn by_name(name: &str) -> Option<Theme> {
    all_themes().into_iter().find(|t| t.name == name)
}

pub fn default_for_variant(variant: ThemeVariant) -> ResolvedTheme {
    match variant {
        ThemeVariant::Dark => default_dark().into(),
        ThemeVariant::Light => default_light().into(),
    }
}

fn c(s: &str) -> ThemeColor {
    ThemeColor::Named(s.to_string())
}

pub fn default_dark() -> Theme {
    Theme {
        name: "default-dark".to_string(),
        variant: ThemeVariant::Dark,
        colors: ThemeColors {
            foreground: c("white"),
            foreground_dim: c("#6A9A9A"),
            border: c("#6A9A9A"),
            primary: c("yellow"),
            error: c("#E74C3C"),
            post_title: c("white"),
            post_body: c("gray"),
            post_meta: c("#6A9A9A"),
            badge_bg: c("darkgray"),
            badge_fg: c("white"),
            status_bar_bg: c("blue"),
            status_bar_fg: c("white"),
            spinner: c("yellow"),
        },
    }
}

pub fn default_light() -> Theme {
    Theme {
        name: "default-light".to_string(),
        variant: ThemeVariant::Light,
        colors: ThemeColors {
            foreground: c("black"),
            foreground_dim: c("#999999"),
            border: c("#EEEEEE"),
            primary: c("blue"),
            error: c("#E74C3C"),
            post_title: c("#333333"),
            post_body: c("#666666"),
            post_meta: c("#999999"),
            badge_bg: c("black"),
            badge_fg: c("white"),
            status_bar_bg: c("blue"),
            status_bar_fg: c("white"),
            spinner: c("blue"),
        },
    }
}

pub fn monokai() -> Theme {
    Theme {
        name: "monokai".to_string(),
        variant: ThemeVariant::Dark,
        colors: ThemeColors {
            foreground: c("#F8F8F2"),
            foreground_dim: c("#75715E"),
            border: c("#75715E"),
            primary: c("#A6E22E"),
            error: c("#F92672"),
            post_title: c("#F8F8F2"),
            post_body: c("#CFCFC2"),
            post_meta: c("#75715E"),
            badge_bg: c("#49483E"),
            badge_fg: c("#E6DB74"),
            status_bar_bg: c("#A6E22E"),
            status_bar_fg: c("#272822"),
            spinner: c("#E6DB74"),
        },
    }
}

pub fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        variant: ThemeVariant::Dark,
        colors: ThemeColors {
            foreground: c("#F8F8F2"),
            foreground_dim: c("#6272A4"),
            border: c("#6272A4"),
            primary: c("#BD93F9"),
            error: c("#FF5555"),
            post_title: c("#F8F8F2"),
            post_body: c("#E2E2DC"),
            post_meta: c("#6272A4"),
            badge_bg: c("#44475A"),
            badge_fg: c("#F1FA8C"),
            status_bar_bg: c("#BD93F9"),
            status_bar_fg: c("#282A36"),
            spinner: c("#F1FA8C"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_are_unique() {
        let themes = all_themes();
        let mut names: Vec<_> = themes.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), themes.len());
    }

    #[test]
    fn lookup_by_name() {
        assert!(by_name("monokai").is_some());
        assert!(by_name("does-not-exist").is_none());
    }

    #[test]
    fn default_matches_variant() {
        assert_eq!(default_for_variant(ThemeVariant::Dark).name, "default-dark");
        assert_eq!(
            default_for_variant(ThemeVariant::Light).variant,
            ThemeVariant::Light
        );
    }
}
