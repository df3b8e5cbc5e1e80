//! HTML pages. Every value that did not come from this file goes through
//! [`text`] or [`attr`] before it is written into markup.

use advice::models::{Advice, FeedbackCounts, FeedbackKind};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

pub const FAILED_ADVICE: &str = "Failed to retrieve advice.";
pub const ANALYTICS_UNAVAILABLE: &str = "Failed to load feedback analytics.";

/// Client-side delay before the waiting page polls `/get_advice`.
pub const POLL_DELAY_MS: u64 = 5000;

const STYLE: &str = r#"
            body {
                font-family: Arial, sans-serif;
                background-color: #f0f0f0;
                display: flex;
                justify-content: center;
                align-items: center;
                height: 100vh;
                margin: 0;
            }
            .container {
                background-color: #fff;
                padding: 20px;
                border-radius: 10px;
                box-shadow: 0 0 10px rgba(0, 0, 0, 0.1);
                text-align: center;
            }
            .container input[type="text"], .container input[type="submit"] {
                padding: 10px;
                margin: 10px 0;
                border: 1px solid #ccc;
                border-radius: 5px;
            }
            .container input[type="submit"] {
                background-color: #007BFF;
                color: white;
                border: none;
                cursor: pointer;
            }
            .container input[type="submit"]:hover {
                background-color: #0056b3;
            }
            .author {
                font-style: italic;
                color: #555;
            }
            table {
                margin: 0 auto;
                border-collapse: collapse;
            }
            td, th {
                padding: 6px 14px;
                border-bottom: 1px solid #ddd;
            }
"#;

/// Publish outcome shown on the waiting page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    Sent,
    Failed,
}

impl PublishStatus {
    pub fn message(&self) -> &'static str {
        match self {
            PublishStatus::Sent => "Message sent to queue successfully.",
            PublishStatus::Failed => "Failed to send message to queue.",
        }
    }
}

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        <meta charset="utf-8">
        <title>{title}</title>
        <style>{STYLE}</style>
    </head>
    <body>
        <div class="container">
{body}
        </div>
    </body>
</html>
"#,
        title = text(title),
    )
}

pub fn index_page() -> String {
    document(
        "Get Your Daily Advice",
        r#"            <h1>Get Your Daily Advice</h1>
            <form action="/echo_user_input" method="POST">
                <label for="user_input">Enter your name:</label><br>
                <input id="user_input" name="user_input" type="text" placeholder="Your Name"><br>
                <input type="submit" value="Submit!">
            </form>"#,
    )
}

/// Queue mode: confirms the publish and polls for the reply after
/// [`POLL_DELAY_MS`]. The script only ever writes through `textContent`.
pub fn waiting_page(name: &str, status: PublishStatus) -> String {
    let body = format!(
        r#"            <h1>Hi {name},</h1>
            <p>{status}</p>
            <p id="advice">Waiting for advice...</p>
            <a id="again" href="/" hidden>Get another advice</a>
            <script>
                setTimeout(function() {{
                    var advice = document.getElementById('advice');
                    fetch('/get_advice')
                        .then(function(response) {{ return response.json(); }})
                        .then(function(data) {{ advice.textContent = data.message; }})
                        .catch(function() {{ advice.textContent = '{failed}'; }})
                        .finally(function() {{ document.getElementById('again').hidden = false; }});
                }}, {delay});
            </script>"#,
        name = text(name),
        status = status.message(),
        failed = FAILED_ADVICE,
        delay = POLL_DELAY_MS,
    );
    document("Your Advice", &body)
}

/// Api mode: shows the advice right away, with a feedback form when there
/// is something to rate.
pub fn advice_page(name: &str, advice: Option<&Advice>) -> String {
    let (quote, author) = match advice {
        Some(advice) => (advice.quote.as_str(), advice.author.as_str()),
        None => (FAILED_ADVICE, ""),
    };

    let mut body = format!(
        r#"            <h1>Hi {name},</h1>
            <p class="quote">{quote}</p>
            <p class="author">{author}</p>
"#,
        name = text(name),
        quote = text(quote),
        author = text(author),
    );

    if advice.is_some() {
        let choices: String = FeedbackKind::ALL
            .iter()
            .map(|kind| {
                format!(
                    r#"                <label><input type="radio" name="feedback" value="{value}" required> {label}</label>
"#,
                    value = kind.as_str(),
                    label = kind.label(),
                )
            })
            .collect();

        body.push_str(&format!(
            r#"            <form action="/submit_feedback" method="POST">
                <input type="hidden" name="name" value="{name}">
                <input type="hidden" name="advice" value="{quote}">
                <p>How does this advice make you feel?</p>
{choices}                <input type="submit" value="Send feedback">
            </form>
"#,
            name = attr(name),
            quote = attr(quote),
        ));
    }

    body.push_str(r#"            <a href="/">Get another advice</a>"#);
    document("Your Advice", &body)
}

pub fn thank_you_page(name: &str, feedback: FeedbackKind) -> String {
    let body = format!(
        r#"            <h1>Thank you for your feedback, {name}!</h1>
            <p>You told us this advice made you feel: {feedback}.</p>
            <a href="/">Get another advice</a> | <a href="/feedback_analytics">See what others think</a>"#,
        name = text(name),
        feedback = feedback.label(),
    );
    document("Thank You", &body)
}

pub fn analytics_page(counts: &FeedbackCounts) -> String {
    let rows: String = FeedbackKind::ALL
        .iter()
        .map(|kind| {
            format!(
                "                <tr><td>{}</td><td>{}</td></tr>\n",
                kind.label(),
                counts.get(*kind)
            )
        })
        .collect();

    let body = format!(
        r#"            <h1>Feedback Analytics</h1>
            <table>
                <tr><th>Feedback</th><th>Count</th></tr>
{rows}                <tr><th>Total</th><th>{total}</th></tr>
            </table>
            <a href="/">Get your own advice</a>"#,
        total = counts.total(),
    );
    document("Feedback Analytics", &body)
}

pub fn analytics_unavailable_page() -> String {
    let body = format!(
        r#"            <h1>Feedback Analytics</h1>
            <p>{ANALYTICS_UNAVAILABLE}</p>
            <a href="/">Get your own advice</a>"#
    );
    document("Feedback Analytics", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOSTILE: &str = r#"<script>alert("x")</script>"#;

    #[test]
    fn waiting_page_encodes_the_name() {
        let page = waiting_page(HOSTILE, PublishStatus::Sent);
        assert!(!page.contains("<script>alert"));
        assert!(page.contains("Hi &lt;script&gt;alert(\"x\")&lt;/script&gt;,"));
        assert!(page.contains("Message sent to queue successfully."));
        assert!(page.contains("}, 5000);"));
    }

    #[test]
    fn advice_page_encodes_hidden_fields() {
        let advice = Advice::new(r#"Say "no" <sometimes>"#, "Me & You");
        let page = advice_page(HOSTILE, Some(&advice));
        assert!(page.contains(r#"value="&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;""#));
        assert!(page.contains("Say \"no\" &lt;sometimes&gt;"));
        assert!(page.contains("Me &amp; You"));
        assert!(page.contains(r#"value="happy""#));
    }

    #[test]
    fn advice_page_without_advice_has_no_feedback_form() {
        let page = advice_page("Ada", None);
        assert!(page.contains(FAILED_ADVICE));
        assert!(page.contains(r#"<p class="author"></p>"#));
        assert!(!page.contains("/submit_feedback"));
    }

    #[test]
    fn thank_you_page_encodes_the_name() {
        let page = thank_you_page(HOSTILE, FeedbackKind::Sad);
        assert!(!page.contains("<script>alert"));
        assert!(page.contains(
            "Thank you for your feedback, &lt;script&gt;alert(\"x\")&lt;/script&gt;!"
        ));
        assert!(page.contains("made you feel: Sad."));
    }

    #[test]
    fn analytics_page_lists_every_kind() {
        let counts = FeedbackCounts::tally([FeedbackKind::Sad, FeedbackKind::Sad]);
        let page = analytics_page(&counts);
        assert!(page.contains("<tr><td>Happy</td><td>0</td></tr>"));
        assert!(page.contains("<tr><td>Sad</td><td>2</td></tr>"));
        assert!(page.contains("<tr><th>Total</th><th>2</th></tr>"));
    }
}
