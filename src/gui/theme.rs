use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub title: Srgba<f64>,
    pub subtitle: Srgba<f64>,
    pub accent: Srgba<f64>,
    pub accent_text: Srgba<f64>,
    pub dot_idle: Srgba<f64>,
    pub placeholder: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            title: Srgba::new(1.0, 1.0, 1.0, 1.0),
            subtitle: rgb8(209, 213, 219),
            accent: rgb8(251, 191, 36),
            accent_text: rgb8(15, 23, 42),
            dot_idle: rgb8(107, 114, 128),
            placeholder: Srgba::new(0.2, 0.25, 0.33, 0.8),
        }
    }
}

fn rgb8(r: u8, g: u8, b: u8) -> Srgba<f64> {
    Srgba::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0, 1.0)
}

impl ThemeColors {
    /// Named colors from the `parallax-*` stylesheet, falling back to the built-in palette.
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            title: Self::lookup_color(context, "parallax_title", fallback.title, None),
            subtitle: Self::lookup_color(context, "parallax_subtitle", fallback.subtitle, None),
            accent: Self::lookup_color(context, "parallax_accent", fallback.accent, None),
            accent_text: Self::lookup_color(
                context,
                "parallax_accent_text",
                fallback.accent_text,
                None,
            ),
            dot_idle: Self::lookup_color(context, "parallax_dot", fallback.dot_idle, None),
            placeholder: Self::lookup_color(
                context,
                "parallax_placeholder",
                fallback.placeholder,
                Some(0.8),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color parallax_title #ffffff;
@define-color parallax_subtitle #d1d5db;
@define-color parallax_accent #fbbf24;
@define-color parallax_accent_text #0f172a;
@define-color parallax_dot #6b7280;
@define-color parallax_placeholder #334155;

.parallax-window, .parallax-stage {
    background-color: #0f172a;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
