//! Search form component

use moodreel_core::{ContentType, MoodTable};
use moodreel_search::QueryView;

use super::layout::{button, escape_html};
use super::results::RESULTS_TARGET;

/// Renders the mood input with suggestions, the type selector and submit.
///
/// The selector keeps the content type of the last request so a repeat
/// search only needs a new mood.
pub fn search_form(moods: &MoodTable, view: &QueryView) -> String {
    let options: String = moods
        .moods()
        .map(|entry| format!(r#"<option value="{}"></option>"#, escape_html(entry.mood)))
        .collect();

    let type_option = |content_type: ContentType| {
        let selected = if content_type == view.content_type {
            "selected"
        } else {
            ""
        };
        format!(
            r#"<option value="{}" {selected}>{}</option>"#,
            content_type.as_query_value(),
            content_type.label()
        )
    };

    let submit = button("Find something", "primary", false, Some(r#"type="submit""#));

    format!(
        r##"<form hx-post="/htmx/search" hx-target="#{RESULTS_TARGET}" hx-swap="outerHTML"
              class="flex flex-col md:flex-row gap-4 mb-8">
            <input type="text" name="mood" list="mood-suggestions" autocomplete="off"
                   placeholder="How are you feeling? (happy, sad, curious...)"
                   class="flex-1 px-4 py-2 bg-gray-700 border border-gray-600 rounded-lg text-white placeholder-gray-400 focus:outline-none focus:ring-2 focus:ring-moodreel-500 focus:border-transparent" />
            <datalist id="mood-suggestions">{options}</datalist>
            <select name="content_type"
                    class="px-4 py-2 bg-gray-700 border border-gray-600 rounded-lg text-white focus:outline-none focus:ring-2 focus:ring-moodreel-500">
                {unset}
                {movie}
                {series}
            </select>
            {submit}
        </form>"##,
        unset = type_option(ContentType::Unset),
        movie = type_option(ContentType::Movie),
        series = type_option(ContentType::Series),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_lists_every_mood() {
        let table = MoodTable::builtin();
        let html = search_form(&table, &QueryView::default());

        for entry in table.moods() {
            assert!(html.contains(&format!(r#"<option value="{}">"#, escape_html(entry.mood))));
        }
        assert!(html.contains(r#"name="content_type""#));
    }

    #[test]
    fn test_form_keeps_selected_type() {
        let view = QueryView {
            content_type: ContentType::Series,
            ..QueryView::default()
        };
        let html = search_form(&MoodTable::builtin(), &view);
        assert!(html.contains(r#"<option value="series" selected>"#));
    }
}
