//! Layout components - page shell, headers, cards, buttons

use axum::response::Html;

/// Escapes text for safe interpolation into HTML content and attributes.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
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

/// Renders a button with Tailwind styling.
///
/// Variants are `primary`, `secondary` and `ghost`; anything else gets a
/// neutral style. Disabled buttons are greyed out and ignore clicks.
pub fn button(text: &str, variant: &str, disabled: bool, attributes: Option<&str>) -> String {
    let base_classes = "px-4 py-2 rounded-lg font-medium transition-colors focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-offset-gray-900";

    let variant_classes = match variant {
        "primary" => "bg-moodreel-500 hover:bg-moodreel-600 text-white focus:ring-moodreel-500",
        "secondary" => "bg-gray-700 hover:bg-gray-600 text-white focus:ring-gray-500",
        "ghost" => "text-gray-300 hover:text-white hover:bg-gray-700 focus:ring-gray-500",
        _ => "bg-gray-600 hover:bg-gray-700 text-white focus:ring-gray-500",
    };

    let (disabled_attr, disabled_classes) = if disabled {
        ("disabled", "opacity-40 cursor-not-allowed")
    } else {
        ("", "")
    };
    let attrs = attributes.unwrap_or("");

    format!(
        r#"<button class="{base_classes} {variant_classes} {disabled_classes}" {disabled_attr} {attrs}>{text}</button>"#
    )
}

/// Wraps page content in the full HTML document with Tailwind and HTMX.
///
/// `demo` adds a "Demo catalog" badge to the navigation bar.
pub fn render_page(title: &str, content: &str, demo: bool) -> Html<String> {
    let badge_html = if demo {
        r#"<span class="ml-4 px-2 py-1 text-xs rounded bg-yellow-800 text-yellow-200">Demo catalog</span>"#
    } else {
        ""
    };

    let html = format!(
        r#"<!DOCTYPE html>
        <html lang="en">
        <head>
            <title>{title} - Moodreel</title>
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
                                'moodreel': {{
                                    400: '#f5a25d',
                                    500: '#f08a3c',
                                    600: '#d9722a'
                                }}
                            }}
                        }}
                    }}
                }}
            </script>
            <style>
                .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
                .htmx-request .htmx-indicator {{ opacity: 1; }}
                .htmx-request.htmx-indicator {{ opacity: 1; }}
            </style>
        </head>
        <body class="bg-gray-900 text-white min-h-screen font-sans">
            <nav class="bg-gray-800 border-b border-gray-700">
                <div class="max-w-7xl mx-auto px-4 h-16 flex items-center">
                    <a href="/" class="text-2xl font-bold text-moodreel-500">Moodreel</a>
                    {badge_html}
                </div>
            </nav>
            <main class="max-w-7xl mx-auto px-4 py-8">
                {content}
            </main>
        </body>
        </html>"#
    );

    Html(html)
}
