//! Base document shared by every full page

use axum::response::Html;

use crate::components::layout::{escape_html, nav_bar};

/// Wraps `content` in the HTML document with Tailwind, HTMX and navigation.
///
/// Error responses from HTMX requests are swapped in like successful ones so
/// the error fallback replaces the region that failed to load.
pub fn render_page(title: &str, active_nav: &str, content: &str) -> Html<String> {
    let html = format!(
        r#"<!DOCTYPE html>
        <html lang="en">
        <head>
            <title>{} - Marquee</title>
            <meta charset="utf-8">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <script src="https://cdn.tailwindcss.com"></script>
            <script src="https://unpkg.com/htmx.org@1.9.10"></script>
            <script>
                tailwind.config = {{
                    darkMode: 'class',
                    theme: {{
                        extend: {{
                            colors: {{
                                'marquee': {{
                                    50: '#fff7ed',
                                    400: '#fb923c',
                                    500: '#f97316',
                                    600: '#ea580c',
                                    900: '#0a0a0a'
                                }}
                            }}
                        }}
                    }}
                }}
            </script>
            <script>
                document.addEventListener('htmx:beforeSwap', function (event) {{
                    if (event.detail.xhr.status >= 400) {{
                        event.detail.shouldSwap = true;
                        event.detail.isError = false;
                    }}
                }});
            </script>
            <style>
                .htmx-indicator {{ display: none; }}
                .htmx-request .htmx-indicator {{ display: block; }}
                .htmx-request.htmx-indicator {{ display: block; }}
                .htmx-request .results-body {{ display: none; }}
            </style>
        </head>
        <body class="bg-gray-900 text-white min-h-screen font-sans">
            {}

            <main class="max-w-7xl mx-auto px-4 py-8">
                {}
            </main>
        </body>
        </html>"#,
        escape_html(title),
        nav_bar(active_nav),
        content
    );

    Html(html)
}
