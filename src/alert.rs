//! Alert messages that are swapped into the page's alert container by HTMX.

use maud::{Markup, html};

/// A dismissable message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Something went wrong, `details` should say how to fix it.
    Error {
        /// A short summary of the problem.
        message: String,
        /// A longer description of the problem.
        details: String,
    },
}

impl Alert {
    /// Render the alert as HTML.
    pub fn into_html(self) -> Markup {
        match self {
            Alert::Error { message, details } => html! {
                div
                    id="alert"
                    role="alert"
                    class="flex items-start p-4 mb-4 text-sm text-red-800
                        border border-red-300 rounded-lg bg-red-50
                        dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
                {
                    div class="flex-1"
                    {
                        p class="font-medium" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Close"
                        class="ms-3 text-red-500 hover:text-red-700"
                        onclick="document.getElementById('alert-container').classList.add('hidden')"
                    {
                        "×"
                    }
                }

                script
                {
                    "document.getElementById('alert-container').classList.remove('hidden');"
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_shows_message_and_details() {
        let alert = Alert::Error {
            message: "Invalid filter date".to_owned(),
            details: "Dates should look like 2024-01-31.".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());

        let selector = Selector::parse("div[role='alert'] p").unwrap();
        let text: Vec<_> = html
            .select(&selector)
            .map(|paragraph| paragraph.text().collect::<String>())
            .collect();
        assert_eq!(
            text,
            vec!["Invalid filter date", "Dates should look like 2024-01-31."]
        );
    }
}
