//! Layout components - headers, cards, navigation, inputs

/// Escapes text for use inside HTML element content or quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renders a page header with title and optional subtitle.
pub fn page_header(title: &str, subtitle: Option<&str>) -> String {
    let subtitle_html = subtitle
        .map(|s| format!(r#"<p class="text-gray-400 mt-2">{s}</p>"#))
        .unwrap_or_default();

    format!(
        r#"<div class="mb-8">
            <h1 class="text-3xl font-bold text-white">{title}</h1>
            {subtitle_html}
        </div>"#
    )
}

/// Renders a card container with an optional title.
pub fn card(title: Option<&str>, content: &str) -> String {
    let header_html = title
        .map(|t| format!(r#"<h3 class="text-lg font-semibold text-white mb-6">{t}</h3>"#))
        .unwrap_or_default();

    format!(
        r#"<div class="bg-gray-800 border border-gray-700 rounded-lg p-6 mb-6">
            {header_html}
            {content}
        </div>"#
    )
}

/// Renders the main navigation bar.
pub fn nav_bar(active_page: &str) -> String {
    let active_class = if active_page == "search" {
        "text-marquee-500 bg-marquee-500 bg-opacity-10"
    } else {
        "text-gray-300 hover:text-marquee-500 hover:bg-gray-700"
    };

    format!(
        r#"<nav class="bg-gray-800 border-b border-gray-700 sticky top-0 z-50">
            <div class="max-w-7xl mx-auto px-4">
                <div class="flex items-center h-16 space-x-8">
                    <a href="/" class="text-2xl font-bold text-marquee-500">Marquee</a>
                    <a href="/" class="px-3 py-2 rounded-md text-sm font-medium transition-colors {active_class}">Search</a>
                </div>
            </div>
        </nav>"#
    )
}

/// Renders a grid container for responsive layouts.
pub fn grid(columns: &str, content: &str) -> String {
    format!(r#"<div class="grid {columns} gap-6">{content}</div>"#)
}

/// Renders a link styled as a button.
///
/// Variants: "primary", "secondary", "ghost"; disabled links render as
/// inert spans.
pub fn link_button(text: &str, variant: &str, attributes: Option<&str>, disabled: bool) -> String {
    let base_classes = "px-3 py-2 rounded-lg text-sm font-medium transition-colors";

    if disabled {
        return format!(
            r#"<span class="{base_classes} text-gray-600 cursor-not-allowed" aria-disabled="true">{text}</span>"#
        );
    }

    let variant_classes = match variant {
        "primary" => "bg-marquee-500 hover:bg-marquee-600 text-white",
        "secondary" => "bg-gray-700 hover:bg-gray-600 text-white",
        "ghost" => "text-gray-300 hover:text-white hover:bg-gray-700",
        _ => "bg-gray-600 hover:bg-gray-700 text-white",
    };
    let attrs = attributes.unwrap_or("");

    format!(r#"<a class="{base_classes} {variant_classes}" {attrs}>{text}</a>"#)
}

/// Renders an input field with Tailwind styling.
pub fn input(name: &str, placeholder: &str, input_type: &str, attributes: Option<&str>) -> String {
    let attrs = attributes.unwrap_or("");

    format!(
        r#"<input type="{input_type}" name="{name}" placeholder="{placeholder}"
                  class="w-full px-4 py-3 bg-gray-700 border border-gray-600 rounded-lg text-white placeholder-gray-400 focus:outline-none focus:ring-2 focus:ring-marquee-500 focus:border-transparent"
                  {attrs} />"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Amélie"), "Amélie");
    }

    #[test]
    fn test_disabled_link_button_is_inert() {
        let html = link_button("Next", "ghost", Some(r#"href="/?page=2""#), true);
        assert!(html.starts_with("<span"));
        assert!(!html.contains("href"));
    }
}
